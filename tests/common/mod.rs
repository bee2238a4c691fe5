//! Shared fakes for acceptance tests: an in-memory host surface, message
//! store, scripted clipboard, and a recording observer.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use selcopy::config::ResolvedConfig;
use selcopy::export::{Clipboard, PendingWrite, WriteCompletion};
use selcopy::host::{mutation_channel, MessageStore, MessageSurface, MutationNotifier, SurfaceNode};
use selcopy::host::Subscription;
use selcopy::model::{ChannelId, ClipboardError, MessageAuthor, MessageId, MessageRecord};
use selcopy::state::{ModeController, ModeEvent, ModeObserver};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// ===== Identifiers =====

pub fn mid(raw: &str) -> MessageId {
    MessageId::new(raw).expect("valid message id")
}

pub fn chan(raw: &str) -> ChannelId {
    ChannelId::new(raw).expect("valid channel id")
}

// ===== Records =====

/// Build a record in `channel` timestamped at `hour`:00 UTC.
pub fn record(id: &str, channel: &str, hour: u32, content: &str) -> MessageRecord {
    MessageRecord {
        id: mid(id),
        content: content.to_string(),
        author: MessageAuthor {
            username: "ann".to_string(),
            global_name: Some("Ann".to_string()),
        },
        timestamp: Utc
            .with_ymd_and_hms(2024, 3, 1, hour, 0, 0)
            .single()
            .expect("valid timestamp"),
        channel_id: chan(channel),
        attachments: Vec::new(),
        embeds: Vec::new(),
    }
}

// ===== Surface =====

#[derive(Debug, Default)]
pub struct SurfaceInner {
    pub attached: bool,
    pub nodes: Vec<SurfaceNode>,
    pub markers: HashMap<MessageId, bool>,
}

/// In-memory host surface with a shared handle for test inspection.
#[derive(Debug, Clone)]
pub struct SharedSurface(pub Rc<RefCell<SurfaceInner>>);

impl SharedSurface {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(SurfaceInner {
            attached: true,
            nodes: Vec::new(),
            markers: HashMap::new(),
        })))
    }

    pub fn add_message(&self, id: &str) {
        self.0.borrow_mut().nodes.push(SurfaceNode::message(mid(id)));
    }

    pub fn add_system(&self, id: &str) {
        self.0
            .borrow_mut()
            .nodes
            .push(SurfaceNode::system_notice(mid(id)));
    }

    /// Host destroys a node (and its marker with it).
    pub fn remove_node(&self, id: &str) {
        let mut inner = self.0.borrow_mut();
        let target = mid(id);
        inner.nodes.retain(|n| n.id != target);
        inner.markers.remove(&target);
    }

    pub fn marker_count(&self) -> usize {
        self.0.borrow().markers.len()
    }

    pub fn marker_checked(&self, id: &str) -> Option<bool> {
        self.0.borrow().markers.get(&mid(id)).copied()
    }
}

impl MessageSurface for SharedSurface {
    fn is_attached(&self) -> bool {
        self.0.borrow().attached
    }

    fn visible_messages(&self) -> Vec<SurfaceNode> {
        self.0.borrow().nodes.clone()
    }

    fn has_marker(&self, id: &MessageId) -> bool {
        self.0.borrow().markers.contains_key(id)
    }

    fn attach_marker(&mut self, id: &MessageId) -> bool {
        let mut inner = self.0.borrow_mut();
        if !inner.nodes.iter().any(|n| &n.id == id) {
            return false;
        }
        inner.markers.insert(id.clone(), false);
        true
    }

    fn set_marker_checked(&mut self, id: &MessageId, checked: bool) -> bool {
        let mut inner = self.0.borrow_mut();
        if !inner.nodes.iter().any(|n| &n.id == id) {
            return false;
        }
        match inner.markers.get_mut(id) {
            Some(state) => {
                *state = checked;
                true
            }
            None => false,
        }
    }

    fn detach_marker(&mut self, id: &MessageId) {
        self.0.borrow_mut().markers.remove(id);
    }

    fn clear_decorations(&mut self, _id: &MessageId) {}
}

// ===== Store =====

/// In-memory message store with a shared handle for eviction mid-test.
#[derive(Debug, Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<Vec<MessageRecord>>>);

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: MessageRecord) {
        self.0.borrow_mut().push(record);
    }

    /// Host evicts a record from the live window.
    pub fn evict(&self, id: &str) {
        let target = mid(id);
        self.0.borrow_mut().retain(|r| r.id != target);
    }
}

impl MessageStore for SharedStore {
    fn messages(&self, channel: &ChannelId) -> Vec<MessageRecord> {
        self.0
            .borrow()
            .iter()
            .filter(|r| &r.channel_id == channel)
            .cloned()
            .collect()
    }
}

// ===== Clipboard =====

#[derive(Debug, Default)]
pub struct ClipboardInner {
    /// `begin_write` rejects immediately when set.
    pub primary_unavailable: bool,
    /// `Some(true)` completes writes with success right away,
    /// `Some(false)` with failure; `None` parks the completion for the
    /// test to resolve later.
    pub auto_complete: Option<bool>,
    pub parked: Vec<WriteCompletion>,
    pub primary_texts: Vec<String>,
    pub fallback_ok: bool,
    pub fallback_texts: Vec<String>,
}

/// Scripted clipboard with a shared handle for test control.
#[derive(Debug, Clone)]
pub struct SharedClipboard(pub Rc<RefCell<ClipboardInner>>);

impl SharedClipboard {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(ClipboardInner {
            auto_complete: Some(true),
            fallback_ok: true,
            ..ClipboardInner::default()
        })))
    }

    /// Resolve the oldest parked write.
    pub fn complete_parked(&self, ok: bool) {
        let completion = self.0.borrow_mut().parked.remove(0);
        let outcome = if ok {
            Ok(())
        } else {
            Err(ClipboardError::WriteFailed("scripted failure".to_string()))
        };
        completion.complete(outcome);
    }

    pub fn last_primary_text(&self) -> Option<String> {
        self.0.borrow().primary_texts.last().cloned()
    }

    pub fn last_fallback_text(&self) -> Option<String> {
        self.0.borrow().fallback_texts.last().cloned()
    }
}

impl Clipboard for SharedClipboard {
    fn begin_write(&mut self, text: String) -> Result<PendingWrite, ClipboardError> {
        let mut inner = self.0.borrow_mut();
        if inner.primary_unavailable {
            return Err(ClipboardError::Unavailable("scripted".to_string()));
        }
        inner.primary_texts.push(text);
        let (completion, pending) = PendingWrite::channel();
        match inner.auto_complete {
            Some(true) => completion.complete(Ok(())),
            Some(false) => {
                completion.complete(Err(ClipboardError::WriteFailed("scripted".to_string())))
            }
            None => inner.parked.push(completion),
        }
        Ok(pending)
    }

    fn write_sync(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut inner = self.0.borrow_mut();
        inner.fallback_texts.push(text.to_string());
        if inner.fallback_ok {
            Ok(())
        } else {
            Err(ClipboardError::NoFallbackUtility)
        }
    }
}

// ===== Observer =====

struct RecordingObserver {
    events: Rc<RefCell<Vec<ModeEvent>>>,
}

impl ModeObserver for RecordingObserver {
    fn on_event(&mut self, event: &ModeEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

// ===== Harness =====

/// A wired controller plus shared handles to all its fakes.
pub struct Harness {
    pub controller: ModeController,
    pub surface: SharedSurface,
    pub store: SharedStore,
    pub clipboard: SharedClipboard,
    pub notifier: MutationNotifier,
    pub events: Rc<RefCell<Vec<ModeEvent>>>,
}

impl Harness {
    pub fn new(config: ResolvedConfig) -> Self {
        let surface = SharedSurface::new();
        let store = SharedStore::new();
        let clipboard = SharedClipboard::new();
        let (notifier, feed) = mutation_channel();
        let events = Rc::new(RefCell::new(Vec::new()));

        let mut controller = ModeController::new(
            Box::new(surface.clone()),
            Box::new(store.clone()),
            Box::new(clipboard.clone()),
            Subscription::new(feed),
            config,
        );
        controller.add_observer(Box::new(RecordingObserver {
            events: Rc::clone(&events),
        }));

        Self {
            controller,
            surface,
            store,
            clipboard,
            notifier,
            events,
        }
    }

    pub fn events(&self) -> Vec<ModeEvent> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }
}
