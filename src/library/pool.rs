use std::path::{Path, PathBuf};
use std::sync::{Mutex, mpsc};
use std::thread;

use tracing::debug;

use crate::probe::MediaProbe;

use super::extract::{TrackMetadata, extract};

/// Drain `paths` through a fixed-size pool of probing workers.
///
/// Paths are staged on an mpsc channel whose receiver is shared behind a
/// mutex, so each worker pops exactly one pending path at a time; a hung
/// probe stalls only its own slot. Results are sorted by path so output
/// does not depend on directory listing order or worker timing.
pub fn extract_all(
    probe: &dyn MediaProbe,
    root: &Path,
    paths: Vec<PathBuf>,
    workers: usize,
) -> Vec<TrackMetadata> {
    let total = paths.len();
    let workers = workers.clamp(1, total.max(1));

    let (path_tx, path_rx) = mpsc::channel::<PathBuf>();
    for path in paths {
        // The receiver is alive until the workers finish; send cannot fail.
        let _ = path_tx.send(path);
    }
    drop(path_tx);
    let path_rx = Mutex::new(path_rx);

    let (track_tx, track_rx) = mpsc::channel::<TrackMetadata>();

    thread::scope(|s| {
        for _ in 0..workers {
            let track_tx = track_tx.clone();
            let path_rx = &path_rx;
            s.spawn(move || {
                loop {
                    // Every path is queued up front, so recv never waits on
                    // a producer: it pops the next path or reports empty.
                    let next = match path_rx.lock() {
                        Ok(rx) => rx.recv(),
                        Err(_) => break,
                    };
                    let Ok(path) = next else { break };
                    if let Some(track) = extract(probe, root, &path) {
                        let _ = track_tx.send(track);
                    }
                }
            });
        }
    });
    drop(track_tx);

    let mut tracks: Vec<TrackMetadata> = track_rx.into_iter().collect();
    tracks.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("extracted {} of {} files", tracks.len(), total);
    tracks
}
