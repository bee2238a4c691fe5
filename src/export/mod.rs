//! Clipboard export.
//!
//! Two write paths, per the platform reality that clipboard access can be
//! flaky: a primary asynchronous write (system clipboard on a worker
//! thread, outcome delivered through a channel and polled from the single
//! control thread) and a synchronous fallback that pipes the text to the
//! first available platform clipboard utility. Neither path panics past
//! this module; failures surface as [`ClipboardError`] values.

use crate::model::ClipboardError;
use std::io::Write as _;
use std::process::{Command, Stdio};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

// ===== Clipboard port =====

/// Clipboard abstraction the mode controller writes through.
///
/// `begin_write` is fire-and-forget: it returns a [`PendingWrite`] whose
/// completion is observed later by polling, so the caller's thread never
/// blocks on the platform clipboard. `write_sync` is the legacy-style
/// fallback used when the primary path is unavailable or rejects.
pub trait Clipboard {
    /// Start an asynchronous write of `text` to the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error only when the write could not even be started;
    /// failures of the write itself arrive through the pending handle.
    fn begin_write(&mut self, text: String) -> Result<PendingWrite, ClipboardError>;

    /// Synchronous fallback write.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying mechanism failed or none was
    /// available.
    fn write_sync(&mut self, text: &str) -> Result<(), ClipboardError>;
}

// ===== PendingWrite =====

/// Handle to an in-flight primary clipboard write.
///
/// There is no cancellation: dropping the handle abandons the outcome but
/// does not stop the write. That race is accepted - the outcome only ever
/// reports clipboard success or failure, never mutates selection state.
#[derive(Debug)]
pub struct PendingWrite {
    rx: Receiver<Result<(), ClipboardError>>,
}

impl PendingWrite {
    /// Create a connected completion/handle pair.
    ///
    /// The write side calls [`WriteCompletion::complete`] exactly once.
    pub fn channel() -> (WriteCompletion, PendingWrite) {
        let (tx, rx) = channel();
        (WriteCompletion { tx }, PendingWrite { rx })
    }

    /// Non-blocking completion check.
    ///
    /// `None` while the write is still in flight. A writer that vanished
    /// without reporting reads as [`ClipboardError::Abandoned`].
    pub fn poll(&self) -> Option<Result<(), ClipboardError>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ClipboardError::Abandoned)),
        }
    }
}

/// Write-side half of a [`PendingWrite`].
#[derive(Debug)]
pub struct WriteCompletion {
    tx: Sender<Result<(), ClipboardError>>,
}

impl WriteCompletion {
    /// Report the write outcome. A dropped handle is tolerated silently.
    pub fn complete(self, outcome: Result<(), ClipboardError>) {
        let _ = self.tx.send(outcome);
    }
}

// ===== SystemClipboard =====

/// Production clipboard: arboard primary, external-utility fallback.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Create a system clipboard port.
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn begin_write(&mut self, text: String) -> Result<PendingWrite, ClipboardError> {
        let (completion, pending) = PendingWrite::channel();

        std::thread::Builder::new()
            .name("selcopy-clipboard".to_string())
            .spawn(move || {
                let outcome = match arboard::Clipboard::new() {
                    Ok(mut clipboard) => clipboard
                        .set_text(text)
                        .map_err(|e| ClipboardError::WriteFailed(e.to_string())),
                    Err(e) => Err(ClipboardError::Unavailable(e.to_string())),
                };
                completion.complete(outcome);
            })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        Ok(pending)
    }

    fn write_sync(&mut self, text: &str) -> Result<(), ClipboardError> {
        fallback_copy(text)
    }
}

/// Platform clipboard utilities tried by the fallback path, in order.
const FALLBACK_UTILITIES: [(&str, &[&str]); 4] = [
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
];

/// Pipe `text` into the first clipboard utility that can be spawned.
fn fallback_copy(text: &str) -> Result<(), ClipboardError> {
    for (utility, args) in FALLBACK_UTILITIES {
        let mut child = match Command::new(utility)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            // Utility not installed; try the next one.
            Err(_) => continue,
        };

        if let Some(mut stdin) = child.stdin.take() {
            if stdin.write_all(text.as_bytes()).is_err() {
                let _ = child.kill();
                let _ = child.wait();
                continue;
            }
            // Dropping stdin closes the pipe so the utility can finish.
        }

        return match child.wait() {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(ClipboardError::WriteFailed(format!(
                "{utility} exited with {status}"
            ))),
            Err(e) => Err(ClipboardError::WriteFailed(e.to_string())),
        };
    }

    Err(ClipboardError::NoFallbackUtility)
}

// ===== Tests =====
