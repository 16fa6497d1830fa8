use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::config::ScanSettings;

fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Recursively collect every audio file under `root`.
///
/// Sibling order follows the OS directory listing; callers that need a
/// stable order sort afterwards. Unreadable entries are skipped with a
/// diagnostic rather than aborting the walk.
pub fn collect_files(root: &Path, settings: &ScanSettings) -> Vec<PathBuf> {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    let mut walker = WalkDir::new(root).follow_links(settings.follow_links);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_audio_file(path, &exts) {
            files.push(path.to_path_buf());
        }
    }
    files
}
