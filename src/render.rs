//! Rendering of scanned tracks: pretty text blocks and JSON.

use std::fs;
use std::path::Path;

use crate::library::TrackMetadata;

/// Render one track as the fixed five-line block.
///
/// Absent tag fields keep their placeholder slot (`<artist>`, `<album>`)
/// and absent numeric fields render as `<unknown>`, so every block has
/// the same shape.
pub fn pretty_block(track: &TrackMetadata) -> String {
    let artist = track.artist.as_deref().unwrap_or("<artist>");
    let album = track.album.as_deref().unwrap_or("<album>");
    let bit_rate = track
        .bit_rate
        .map(|v| format!("{v:.1} kbps"))
        .unwrap_or_else(|| "<unknown>".to_string());
    let sample_rate = track
        .sample_rate
        .map(|v| format!("{v:.1} kHz"))
        .unwrap_or_else(|| "<unknown>".to_string());

    format!(
        "{} ({})\n{} - {}\nCodec: {}\nBitrate: {}\nSample Rate: {}",
        track.title, track.extension, artist, album, track.codec_name, bit_rate, sample_rate
    )
}

/// Join every block with one blank line between records.
pub fn pretty_report(tracks: &[TrackMetadata]) -> String {
    tracks
        .iter()
        .map(pretty_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Serialize the full ordered collection as an indented JSON array.
pub fn json_report(tracks: &[TrackMetadata]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tracks)
}

/// Write the pretty report to `path` in a single shot.
pub fn write_log(path: &Path, tracks: &[TrackMetadata]) -> std::io::Result<()> {
    let mut report = pretty_report(tracks);
    report.push('\n');
    fs::write(path, report)
}
