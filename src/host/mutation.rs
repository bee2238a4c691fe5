//! Host mutation signal plumbing.
//!
//! The host fires a bare "something changed, rescan" signal whenever its
//! message subtree is structurally altered. There is no payload: the
//! contract is observe-and-rescan, not diff. Signals are carried over a
//! channel and drained by polling from the single logical control thread,
//! so no handler ever runs re-entrantly inside a host render.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

/// Host-side sender half: fire one signal per structural mutation.
///
/// Cheap to clone; the host keeps one wherever it observes its own tree.
/// Signals fired after the feed is dropped are discarded silently.
#[derive(Debug, Clone)]
pub struct MutationNotifier {
    tx: Sender<()>,
}

impl MutationNotifier {
    /// Signal that the message subtree changed. Never blocks.
    pub fn notify(&self) {
        // Receiver gone means the session ended; nothing to tell anyone.
        let _ = self.tx.send(());
    }
}

/// Engine-side receiver half, drained by polling.
#[derive(Debug)]
pub struct MutationFeed {
    rx: Receiver<()>,
}

impl MutationFeed {
    /// Drain all pending signals, reporting whether any arrived.
    ///
    /// Coalesces bursts: ten signals since the last poll are one "changed".
    /// Non-blocking. A disconnected notifier reads as "no change".
    pub fn poll(&self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(()) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }
}

/// Create a connected notifier/feed pair.
pub fn mutation_channel() -> (MutationNotifier, MutationFeed) {
    let (tx, rx) = channel();
    (MutationNotifier { tx }, MutationFeed { rx })
}

/// Cancellation guard for an observation wired up by the controller.
///
/// Dropping (or explicitly cancelling) the subscription disconnects the
/// feed; later host signals go nowhere.
#[derive(Debug)]
pub struct Subscription {
    feed: Option<MutationFeed>,
}

impl Subscription {
    /// Wrap an active feed.
    pub fn new(feed: MutationFeed) -> Self {
        Self { feed: Some(feed) }
    }

    /// The feed, while still subscribed.
    pub fn feed(&self) -> Option<&MutationFeed> {
        self.feed.as_ref()
    }

    /// Stop observing: drops the feed, disconnecting the notifier.
    pub fn cancel(&mut self) {
        self.feed = None;
    }

    /// Whether the subscription is still live.
    pub fn is_active(&self) -> bool {
        self.feed.is_some()
    }
}
