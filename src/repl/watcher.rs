use crossbeam_channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Watches one options file and sends change events to a channel.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save by writing a new file and renaming it over the old one still
/// trigger a reload.
pub struct OptionsWatcher {
    watcher: RecommendedWatcher,
    path: Option<PathBuf>,
}

impl OptionsWatcher {
    /// Create a watcher that sends events to the provided channel
    pub fn new(tx: Sender<notify::Result<Event>>) -> notify::Result<Self> {
        let watcher = notify::recommended_watcher(move |res| {
            // Receiver dropped means the REPL is gone
            let _ = tx.send(res);
        })?;

        Ok(Self {
            watcher,
            path: None,
        })
    }

    /// Watch `path`, replacing any file watched before
    pub fn watch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<()> {
        let path = path.as_ref().to_path_buf();
        if let Some(old) = self.path.take() {
            let _ = self.watcher.unwatch(parent_dir(&old));
        }
        self.watcher
            .watch(parent_dir(&path), RecursiveMode::NonRecursive)?;
        self.path = Some(path);
        Ok(())
    }

    /// The file currently watched
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether an event is a write to the watched file
    pub fn concerns(&self, event: &Event) -> bool {
        let Some(name) = self.path.as_ref().and_then(|p| p.file_name()) else {
            return false;
        };
        matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
            && event.paths.iter().any(|p| p.file_name() == Some(name))
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
