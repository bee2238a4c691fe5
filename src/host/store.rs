//! Host-owned message data lookup.

use crate::model::{ChannelId, MessageRecord};

/// Read-only access to the host's message data.
///
/// The returned sequence is in the host's own order and possibly stale
/// between calls: a message id observed on the surface may already have
/// been evicted here. Callers must drop unresolvable ids rather than fail.
pub trait MessageStore {
    /// Messages of a channel, in the host's enumeration order.
    fn messages(&self, channel: &ChannelId) -> Vec<MessageRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyStore;

    impl MessageStore for EmptyStore {
        fn messages(&self, _channel: &ChannelId) -> Vec<MessageRecord> {
            Vec::new()
        }
    }

    #[test]
    fn store_is_object_safe() {
        let store: Box<dyn MessageStore> = Box::new(EmptyStore);
        let channel = ChannelId::new("C1").expect("valid channel");
        assert!(store.messages(&channel).is_empty());
    }
}
