//! Mode controller: session lifecycle and orchestration.
//!
//! A two-state machine (idle / selection active) wrapping the pure
//! [`SelectionState`]. Every affordance - checkbox click, keyboard
//! shortcut, toolbar button, context-menu entry - funnels through the
//! methods here, which mutate the engine, re-derive the affordance
//! projection, and broadcast one [`ModeEvent`] batch per operation.
//!
//! The controller runs on a single logical thread. The only suspension
//! points are the clipboard write (worker thread reporting through a
//! channel) and the debounced rescan; both re-enter through [`tick`],
//! never concurrently with anything else.
//!
//! [`tick`]: ModeController::tick

use crate::config::{KeyBindings, ResolvedConfig};
use crate::export::{Clipboard, PendingWrite};
use crate::format;
use crate::host::{MessageStore, MessageSurface, Subscription};
use crate::model::{ChannelId, EnterError, ExportError, KeyAction, MessageId, MessageRecord};
use crate::state::observer::{ModeEvent, ModeObserver, SelectionDelta, Severity, SoundCue};
use crate::state::SelectionState;
use crate::sync::{RescanTimer, SurfaceSynchronizer};
use crossterm::event::KeyEvent;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How an export request proceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStart {
    /// Primary clipboard write started; outcome arrives via `tick`.
    WriteStarted,
    /// Fallback path completed synchronously.
    Completed,
    /// Preview requested; waiting for confirm or cancel.
    PreviewRequested {
        /// Selected message count, for the confirmation UI.
        count: usize,
    },
    /// Nothing to do (e.g. confirmation with no pending preview).
    NoOp,
}

/// A formatted export held back for preview confirmation.
#[derive(Debug)]
struct PreparedExport {
    text: String,
    count: usize,
}

/// An export whose primary clipboard write is in flight.
///
/// `generation` pins the session that started the write: a completion
/// observed after that session ended still reports its clipboard outcome,
/// but never touches the destroyed (or successor) session.
#[derive(Debug)]
struct PendingExport {
    write: PendingWrite,
    text: String,
    count: usize,
    generation: u64,
}

/// Orchestrates selection sessions over the host seams.
pub struct ModeController {
    config: ResolvedConfig,
    bindings: KeyBindings,
    state: SelectionState,
    synchronizer: SurfaceSynchronizer,
    surface: Box<dyn MessageSurface>,
    store: Box<dyn MessageStore>,
    clipboard: Box<dyn Clipboard>,
    subscription: Subscription,
    rescan: RescanTimer,
    observers: Vec<Box<dyn ModeObserver>>,
    pending_preview: Option<PreparedExport>,
    pending_export: Option<PendingExport>,
    generation: u64,
}

impl ModeController {
    /// Wire a controller to its host seams.
    ///
    /// `subscription` carries the host's mutation signal; the host keeps
    /// the matching [`crate::host::MutationNotifier`].
    pub fn new(
        surface: Box<dyn MessageSurface>,
        store: Box<dyn MessageStore>,
        clipboard: Box<dyn Clipboard>,
        subscription: Subscription,
        config: ResolvedConfig,
    ) -> Self {
        let rescan = RescanTimer::new(config.rescan_debounce);
        Self {
            config,
            bindings: KeyBindings::default(),
            state: SelectionState::new(),
            synchronizer: SurfaceSynchronizer::new(),
            surface,
            store,
            clipboard,
            subscription,
            rescan,
            observers: Vec::new(),
            pending_preview: None,
            pending_export: None,
            generation: 0,
        }
    }

    /// Register a UI observer.
    pub fn add_observer(&mut self, observer: Box<dyn ModeObserver>) {
        self.observers.push(observer);
    }

    /// Replace the default key bindings.
    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    /// Whether a selection session is active.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Current selection size.
    pub fn selected_count(&self) -> usize {
        self.state.selected_count()
    }

    /// Channel of the active session.
    pub fn channel(&self) -> Option<&ChannelId> {
        self.state.channel()
    }

    /// Label for the host's per-message context-menu entry.
    pub fn menu_label(&self) -> &'static str {
        if self.state.is_active() {
            "Exit Selection Mode"
        } else {
            "Select Messages"
        }
    }

    /// Context-menu action: enter when idle, exit when active.
    ///
    /// # Errors
    ///
    /// Propagates [`EnterError::HostUnavailable`] from entry;
    /// `AlreadyActive` cannot occur through this path.
    pub fn toggle_mode(&mut self, channel: ChannelId) -> Result<(), EnterError> {
        if self.state.is_active() {
            self.exit();
            Ok(())
        } else {
            self.enter(channel)
        }
    }

    // ===== Session lifecycle =====

    /// Start a selection session for `channel`.
    ///
    /// Decorates the currently visible eligible nodes and begins watching
    /// for host mutations. On any error the host surface is untouched.
    ///
    /// # Errors
    ///
    /// [`EnterError::HostUnavailable`] if the message container is gone;
    /// [`EnterError::AlreadyActive`] for nested sessions.
    pub fn enter(&mut self, channel: ChannelId) -> Result<(), EnterError> {
        if !self.surface.is_attached() {
            warn!("Refusing to enter selection mode: host surface unavailable");
            return Err(EnterError::HostUnavailable);
        }
        self.state.enter(channel.clone())?;
        self.generation += 1;

        info!(channel = %channel, "Entering selection mode");
        self.synchronizer.scan(self.surface.as_mut(), &self.state);

        self.emit(ModeEvent::Entered { channel });
        self.sound(SoundCue::Enter);
        self.notify(
            Severity::Info,
            "Selection mode activated! Click messages to select them.",
        );
        Ok(())
    }

    /// End the session: clear the selection, tear down affordances, stop
    /// the rescan timer. No-op while idle.
    ///
    /// A clipboard write still in flight is deliberately left pending; its
    /// completion only reports the clipboard outcome (see [`tick`]).
    ///
    /// [`tick`]: ModeController::tick
    pub fn exit(&mut self) {
        if !self.state.exit() {
            return;
        }
        info!("Exiting selection mode");
        self.rescan.cancel();
        self.pending_preview = None;
        self.synchronizer.detach_all(self.surface.as_mut());
        self.emit(ModeEvent::Exited);
        self.sound(SoundCue::Exit);
    }

    /// Plugin teardown: exit any active session and stop observing.
    pub fn shutdown(&mut self) {
        self.exit();
        self.subscription.cancel();
    }

    // ===== Selection mutators =====

    /// Flip one message's membership (checkbox click). No-op while idle.
    pub fn toggle(&mut self, id: &MessageId) {
        let Some(selected) = self.state.toggle(id) else {
            return;
        };
        self.synchronizer.repaint(self.surface.as_mut(), &self.state);
        let count = self.state.selected_count();
        self.emit(ModeEvent::SelectionChanged {
            delta: SelectionDelta::Toggled {
                id: id.clone(),
                selected,
            },
            count,
        });
        self.sound(if selected {
            SoundCue::Select
        } else {
            SoundCue::Deselect
        });
    }

    /// Select every visible eligible message. No-op while idle.
    pub fn select_all(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let candidates = self.surface.visible_messages();
        let added = self.state.select_all(&candidates);
        self.synchronizer.repaint(self.surface.as_mut(), &self.state);
        let count = self.state.selected_count();
        self.emit(ModeEvent::SelectionChanged {
            delta: SelectionDelta::SelectedAll { added },
            count,
        });
        self.sound(SoundCue::Select);
        self.notify(Severity::Info, format!("Selected {added} messages"));
    }

    /// Deselect everything. No-op while idle.
    pub fn clear_selection(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let removed = self.state.clear();
        self.synchronizer.repaint(self.surface.as_mut(), &self.state);
        self.emit(ModeEvent::SelectionChanged {
            delta: SelectionDelta::Cleared { removed },
            count: 0,
        });
        if removed > 0 {
            self.sound(SoundCue::Deselect);
            self.notify(Severity::Info, format!("Deselected {removed} messages"));
        }
    }

    /// Flip membership of every visible eligible message. No-op while
    /// idle.
    pub fn invert_selection(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let candidates = self.surface.visible_messages();
        let flipped = self.state.invert(&candidates);
        self.synchronizer.repaint(self.surface.as_mut(), &self.state);
        let count = self.state.selected_count();
        self.emit(ModeEvent::SelectionChanged {
            delta: SelectionDelta::Inverted { flipped },
            count,
        });
        self.notify(
            Severity::Info,
            format!("Inverted selection for {flipped} messages"),
        );
    }

    // ===== Keyboard =====

    /// Route a key event through the bindings table.
    ///
    /// Returns whether the key was consumed. Keys are only consumed while
    /// a session is active; the host keeps full keyboard ownership
    /// otherwise.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.state.is_active() {
            return false;
        }
        let Some(action) = self.bindings.get(key) else {
            return false;
        };
        debug!(?action, "Keyboard shortcut");
        match action {
            KeyAction::SelectAll => self.select_all(),
            KeyAction::ClearSelection => self.clear_selection(),
            KeyAction::InvertSelection => self.invert_selection(),
            KeyAction::CopySelected => {
                // Failures are surfaced to the user via events.
                let _ = self.copy_selected();
            }
            KeyAction::ExitMode => self.exit(),
        }
        true
    }

    // ===== Export =====

    /// Export the current selection to the clipboard.
    ///
    /// Resolves selected ids against the store (stale ids drop silently),
    /// formats them in ascending timestamp order, and either requests a
    /// preview (`show_preview` and more than one message) or starts the
    /// write. A successful write auto-exits the session; any failure
    /// keeps the session and selection intact for retry.
    ///
    /// # Errors
    ///
    /// [`ExportError::EmptySelection`] when nothing is selected (or every
    /// selected id went stale); [`ExportError::Clipboard`] when both write
    /// paths failed synchronously.
    pub fn copy_selected(&mut self) -> Result<ExportStart, ExportError> {
        if !self.state.is_active() {
            // Out-of-mode actions stay silent; no toast for the user.
            return Err(ExportError::EmptySelection);
        }
        if self.state.selected_count() == 0 {
            self.sound(SoundCue::Error);
            self.notify(Severity::Warning, "No messages selected!");
            return Err(ExportError::EmptySelection);
        }
        let Some(channel) = self.state.channel().cloned() else {
            // Active sessions always carry a channel; treat a missing one
            // as an empty selection rather than panicking.
            return Err(ExportError::EmptySelection);
        };

        let records = self.store.messages(&channel);
        let order: Vec<MessageId> = records.iter().map(|r| r.id.clone()).collect();
        let by_id: HashMap<&MessageId, &MessageRecord> =
            records.iter().map(|r| (&r.id, r)).collect();

        let snapshot = self
            .state
            .snapshot_ordered_by(&order, |id| by_id.get(id).map(|r| r.timestamp));

        if snapshot.is_empty() {
            // Every selected id went stale before the export ran.
            self.sound(SoundCue::Error);
            self.notify(Severity::Warning, "No messages selected!");
            return Err(ExportError::EmptySelection);
        }

        let ordered_records = snapshot.iter().filter_map(|id| by_id.get(id).copied());
        let text = format::format_export(ordered_records, &self.config.export);
        let count = self.state.selected_count();

        if self.config.show_preview && count > 1 {
            debug!(count, "Export held for preview confirmation");
            self.pending_preview = Some(PreparedExport {
                text: text.clone(),
                count,
            });
            self.emit(ModeEvent::PreviewRequested { text, count });
            return Ok(ExportStart::PreviewRequested { count });
        }

        self.start_write(text, count)
    }

    /// Confirm a pending preview and start the write.
    ///
    /// No-op if nothing is pending.
    ///
    /// # Errors
    ///
    /// Same as [`copy_selected`](ModeController::copy_selected) once the
    /// write starts.
    pub fn confirm_pending_export(&mut self) -> Result<ExportStart, ExportError> {
        let Some(prepared) = self.pending_preview.take() else {
            return Ok(ExportStart::NoOp);
        };
        self.start_write(prepared.text, prepared.count)
    }

    /// Cancel a pending preview: nothing is copied, the session and
    /// selection stay exactly as they were.
    pub fn cancel_pending_export(&mut self) {
        if self.pending_preview.take().is_some() {
            debug!("Export preview cancelled");
        }
    }

    /// Whether an export is waiting for preview confirmation.
    pub fn has_pending_preview(&self) -> bool {
        self.pending_preview.is_some()
    }

    fn start_write(&mut self, text: String, count: usize) -> Result<ExportStart, ExportError> {
        match self.clipboard.begin_write(text.clone()) {
            Ok(write) => {
                self.pending_export = Some(PendingExport {
                    write,
                    text,
                    count,
                    generation: self.generation,
                });
                Ok(ExportStart::WriteStarted)
            }
            Err(primary) => {
                debug!(%primary, "Primary clipboard path unavailable, trying fallback");
                self.run_fallback(&text, count, self.generation)
                    .map(|_| ExportStart::Completed)
            }
        }
    }

    fn run_fallback(
        &mut self,
        text: &str,
        count: usize,
        generation: u64,
    ) -> Result<(), ExportError> {
        match self.clipboard.write_sync(text) {
            Ok(()) => {
                self.report_copy_success(count, generation);
                Ok(())
            }
            Err(fallback) => {
                warn!(%fallback, "Both clipboard paths failed");
                self.sound(SoundCue::Error);
                self.notify(Severity::Error, "Failed to copy messages to clipboard");
                Err(ExportError::Clipboard(fallback))
            }
        }
    }

    /// Report success and auto-exit the session that started the export.
    ///
    /// The notification always fires - a user-visible clipboard outcome is
    /// worth reporting even after the session ended - but the exit only
    /// applies to the originating session, never a successor.
    fn report_copy_success(&mut self, count: usize, generation: u64) {
        self.sound(SoundCue::Copy);
        self.notify(
            Severity::Success,
            format!("{count} messages copied successfully!"),
        );
        self.emit(ModeEvent::Copied { count });
        if generation == self.generation && self.state.is_active() {
            self.exit();
        }
    }

    // ===== Event-loop integration =====

    /// Advance time-driven work; the host calls this each turn of its
    /// event loop.
    ///
    /// Drains the mutation feed (arming the debounced rescan only while a
    /// session is active), runs a due rescan, and completes any pending
    /// clipboard write.
    pub fn tick(&mut self, now: Instant) {
        let mutated = self
            .subscription
            .feed()
            .map(|feed| feed.poll())
            .unwrap_or(false);
        if mutated && self.state.is_active() {
            self.rescan.arm(now);
        }

        if self.rescan.fire_if_due(now) && self.state.is_active() {
            debug!("Debounced affordance rescan");
            self.synchronizer.scan(self.surface.as_mut(), &self.state);
        }

        self.poll_pending_export();
    }

    fn poll_pending_export(&mut self) {
        let Some(pending) = self.pending_export.take() else {
            return;
        };
        match pending.write.poll() {
            None => {
                // Still in flight; put it back for the next tick.
                self.pending_export = Some(pending);
            }
            Some(Ok(())) => self.report_copy_success(pending.count, pending.generation),
            Some(Err(primary)) => {
                debug!(%primary, "Primary clipboard write failed, trying fallback");
                let _ = self.run_fallback(&pending.text, pending.count, pending.generation);
            }
        }
    }

    // ===== Broadcast helpers =====

    fn emit(&mut self, event: ModeEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    fn notify(&mut self, severity: Severity, text: impl Into<String>) {
        self.emit(ModeEvent::Notified {
            severity,
            text: text.into(),
        });
    }

    fn sound(&mut self, cue: SoundCue) {
        if self.config.enable_sounds {
            self.emit(ModeEvent::Sound(cue));
        }
    }
}

impl std::fmt::Debug for ModeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeController")
            .field("active", &self.state.is_active())
            .field("selected", &self.state.selected_count())
            .field("generation", &self.generation)
            .field("pending_export", &self.pending_export.is_some())
            .field("pending_preview", &self.pending_preview.is_some())
            .finish_non_exhaustive()
    }
}
