use std::path::{Path, PathBuf};

use dashmap::DashMap;

/// Resolves the duration in seconds of a video file on disk.
///
/// The cache never probes a path twice; implementations only see files that
/// exist at resolution time.
pub trait DurationProbe: Send + Sync {
    fn probe(&self, path: &Path) -> Option<i32>;
}

/// Probe that never resolves a duration. Durations then come only from the
/// persisted `video_duration` column.
pub struct NoProbe;

impl DurationProbe for NoProbe {
    fn probe(&self, _path: &Path) -> Option<i32> {
        None
    }
}

/// Process-wide cache mapping an answer-video path to its duration.
///
/// Unbounded and never evicted; entries live for the process lifetime.
/// Missing files are cached as `None` without invoking the probe.
pub struct DurationCache {
    base_dir: PathBuf,
    probe: Box<dyn DurationProbe>,
    cache: DashMap<String, Option<i32>>,
}

impl DurationCache {
    pub fn new(base_dir: impl Into<PathBuf>, probe: Box<dyn DurationProbe>) -> Self {
        Self {
            base_dir: base_dir.into(),
            probe,
            cache: DashMap::new(),
        }
    }

    /// Look up or compute the duration for `video_path`.
    ///
    /// Paths stored as `uploads/<name>` and bare `<name>` both resolve
    /// against the configured upload directory.
    pub fn resolve(&self, video_path: &str) -> Option<i32> {
        if let Some(hit) = self.cache.get(video_path) {
            return *hit;
        }

        let relative = video_path.strip_prefix("uploads/").unwrap_or(video_path);
        let full = self.base_dir.join(relative);

        let value = if full.is_file() {
            self.probe.probe(&full)
        } else {
            None
        };

        self.cache.insert(video_path.to_string(), value);
        value
    }
}
