use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Gallery of past captures, sorted most recent first. Entries are only
/// admitted for files that actually exist on disk.
#[derive(Debug, Default)]
pub struct ScreenshotHistory {
    entries: Vec<ScreenshotEntry>,
}

impl ScreenshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScreenshotEntry] {
        &self.entries
    }

    /// Record a written screenshot. Silently skipped when the file cannot be
    /// stat'ed, so a failed export never shows up in the gallery.
    pub fn add(&mut self, path: &Path) {
        let Ok(metadata) = fs::metadata(path) else {
            warn!(path = %path.display(), "not recording missing screenshot");
            return;
        };
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        // Re-adding a known path refreshes its entry instead of duplicating it,
        // so recording a capture after a directory rescan lists it once.
        self.entries.retain(|entry| entry.path != path);
        self.entries.push(ScreenshotEntry {
            path: path.to_path_buf(),
            modified,
        });
        self.entries.sort_by(|a, b| b.modified.cmp(&a.modified));
    }

    /// Rebuild the gallery by scanning the screenshot directory for files
    /// named by this application.
    pub fn load(&mut self, dir: &Path) {
        self.entries.clear();
        let Ok(read_dir) = fs::read_dir(dir) else {
            debug!(dir = %dir.display(), "screenshot directory not readable");
            return;
        };
        for entry in read_dir.filter_map(Result::ok) {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with("LinShot") || name.starts_with("Screenshot") {
                self.add(&entry.path());
            }
        }
    }
}
