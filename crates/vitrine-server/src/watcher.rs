//! File watching for content reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Content file was created or modified
    ContentChanged(PathBuf),

    /// File was deleted
    Removed(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::ContentChanged(path) | Self::Removed(path) => path,
        }
    }
}

/// File watcher for detecting content changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// Returns the watcher and a channel to receive events. Paths that do not
    /// exist are skipped.
    pub fn new(
        paths: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        std::thread::spawn(move || {
            // Editors write files in bursts
            let mut debouncer = Debouncer::new(Duration::from_millis(100));

            loop {
                let received = match debouncer.timeout(Instant::now()) {
                    Some(wait) => match sync_rx.recv_timeout(wait) {
                        Ok(event) => Some(event),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => return,
                    },
                    None => match sync_rx.recv() {
                        Ok(event) => Some(event),
                        Err(_) => return,
                    },
                };

                if let Some(event) = received {
                    for path in &event.paths {
                        if let Some(e) = classify_event(path, &event.kind) {
                            debouncer.push(e, Instant::now());
                        }
                    }
                }

                for e in debouncer.flush(Instant::now()) {
                    if async_tx.blocking_send(e).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Holds classified events until no new one has arrived for `window`.
///
/// Only the latest event per path is kept.
struct Debouncer {
    window: Duration,
    pending: Vec<WatchEvent>,
    deadline: Option<Instant>,
}

impl Debouncer {
    fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Vec::new(),
            deadline: None,
        }
    }

    fn push(&mut self, event: WatchEvent, now: Instant) {
        self.pending.retain(|e| e.path() != event.path());
        self.pending.push(event);
        self.deadline = Some(now + self.window);
    }

    /// Time left until pending events are due, `None` when nothing is pending.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Drain pending events once the window has elapsed.
    fn flush(&mut self, now: Instant) -> Vec<WatchEvent> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                std::mem::take(&mut self.pending)
            }
            _ => Vec::new(),
        }
    }
}

/// Whether a file can hold a content entry.
fn is_content_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md" | "mdx" | "yaml" | "yml")
    )
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::event::CreateKind;
    use notify::EventKind;

    match kind {
        EventKind::Remove(_) => Some(WatchEvent::Removed(path.to_path_buf())),
        // A moved-in directory may hold content without per-file events
        EventKind::Create(CreateKind::Folder) => {
            Some(WatchEvent::ContentChanged(path.to_path_buf()))
        }
        EventKind::Create(_) | EventKind::Modify(_) if is_content_file(path) => {
            Some(WatchEvent::ContentChanged(path.to_path_buf()))
        }
        _ => None,
    }
}
