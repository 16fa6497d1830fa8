use std::path::{Component, Path};

use serde::Serialize;
use tracing::warn;

use crate::probe::MediaProbe;

/// One scanned track. Built once per successfully probed file and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct TrackMetadata {
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    pub extension: String,
    pub codec_name: String,
    /// kbps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<f64>,
    /// kHz.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,
}

/// Infer title/artist/album from the path's position under the scan root.
///
/// The file stem is the title, its parent directory the album, the
/// directory above that the artist. The rule is depth-relative: scanning
/// an album folder directly simply leaves artist (and album) out.
fn path_tags(root: &Path, path: &Path) -> (String, Option<String>, Option<String>) {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut dirs: Vec<&str> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(os) => os.to_str(),
            _ => None,
        })
        .collect();
    dirs.pop(); // the file itself

    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let album = dirs.last().map(|s| s.to_string());
    let artist = dirs
        .len()
        .checked_sub(2)
        .map(|i| dirs[i].to_string());

    (title, artist, album)
}

/// Probe one file and build its record.
///
/// Any probe failure is logged and swallowed: a single bad file must
/// never abort the scan, it just contributes no record.
pub fn extract(probe: &dyn MediaProbe, root: &Path, path: &Path) -> Option<TrackMetadata> {
    let streams = match probe.probe(path) {
        Ok(streams) => streams,
        Err(e) => {
            warn!("skipping {}: {e}", path.display());
            return None;
        }
    };

    let audio = streams.iter().find(|s| s.is_audio());
    let (title, artist, album) = path_tags(root, path);
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();

    Some(TrackMetadata {
        path: path.to_string_lossy().into_owned(),
        title,
        artist,
        album,
        extension,
        codec_name: audio
            .and_then(|s| s.codec_name.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        bit_rate: audio.and_then(|s| s.bit_rate).map(|b| b as f64 / 1000.0),
        sample_rate: audio
            .and_then(|s| s.sample_rate)
            .map(|r| f64::from(r) / 1000.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{MediaStream, ProbeError};

    struct StubProbe(Vec<MediaStream>);

    impl MediaProbe for StubProbe {
        fn probe(&self, _path: &Path) -> Result<Vec<MediaStream>, ProbeError> {
            Ok(self.0.clone())
        }
    }

    struct FailProbe;

    impl MediaProbe for FailProbe {
        fn probe(&self, path: &Path) -> Result<Vec<MediaStream>, ProbeError> {
            Err(ProbeError::Unreadable(path.display().to_string()))
        }
    }

    fn audio_stream() -> MediaStream {
        MediaStream {
            codec_type: "audio".to_string(),
            codec_name: Some("mp3".to_string()),
            bit_rate: Some(320_000),
            sample_rate: Some(44_100),
        }
    }

    #[test]
    fn path_tags_at_depth_three_yields_artist_album_title() {
        let (title, artist, album) = path_tags(
            Path::new("/music"),
            Path::new("/music/Artist/Album/Track.mp3"),
        );
        assert_eq!(title, "Track");
        assert_eq!(artist.as_deref(), Some("Artist"));
        assert_eq!(album.as_deref(), Some("Album"));
    }

    #[test]
    fn path_tags_at_depth_two_yields_album_only() {
        let (title, artist, album) =
            path_tags(Path::new("/music"), Path::new("/music/Album/Track.mp3"));
        assert_eq!(title, "Track");
        assert_eq!(artist, None);
        assert_eq!(album.as_deref(), Some("Album"));
    }

    #[test]
    fn path_tags_at_depth_one_yields_title_only() {
        let (title, artist, album) =
            path_tags(Path::new("/music"), Path::new("/music/Track.mp3"));
        assert_eq!(title, "Track");
        assert_eq!(artist, None);
        assert_eq!(album, None);
    }

    #[test]
    fn path_tags_at_depth_four_uses_the_two_nearest_directories() {
        let (_, artist, album) = path_tags(
            Path::new("/music"),
            Path::new("/music/Rock/Artist/Album/Track.mp3"),
        );
        assert_eq!(artist.as_deref(), Some("Artist"));
        assert_eq!(album.as_deref(), Some("Album"));
    }

    #[test]
    fn extract_converts_probe_units_to_kbps_and_khz() {
        let probe = StubProbe(vec![audio_stream()]);
        let track = extract(
            &probe,
            Path::new("/music"),
            Path::new("/music/Artist/Album/Track.MP3"),
        )
        .unwrap();

        assert_eq!(track.title, "Track");
        assert_eq!(track.extension, ".mp3");
        assert_eq!(track.codec_name, "mp3");
        assert_eq!(track.bit_rate, Some(320.0));
        assert_eq!(track.sample_rate, Some(44.1));
    }

    #[test]
    fn extract_picks_the_audio_stream_among_several() {
        let video = MediaStream {
            codec_type: "video".to_string(),
            codec_name: Some("mjpeg".to_string()),
            ..MediaStream::default()
        };
        let probe = StubProbe(vec![video, audio_stream()]);
        let track = extract(&probe, Path::new("/m"), Path::new("/m/a.mp3")).unwrap();
        assert_eq!(track.codec_name, "mp3");
    }

    #[test]
    fn extract_without_audio_stream_reports_unknown_codec() {
        let probe = StubProbe(Vec::new());
        let track = extract(&probe, Path::new("/m"), Path::new("/m/a.wma")).unwrap();
        assert_eq!(track.codec_name, "Unknown");
        assert_eq!(track.bit_rate, None);
        assert_eq!(track.sample_rate, None);
    }

    #[test]
    fn extract_leaves_unreported_numeric_fields_absent() {
        let stream = MediaStream {
            codec_type: "audio".to_string(),
            codec_name: Some("vorbis".to_string()),
            bit_rate: None,
            sample_rate: Some(48_000),
        };
        let probe = StubProbe(vec![stream]);
        let track = extract(&probe, Path::new("/m"), Path::new("/m/a.ogg")).unwrap();
        assert_eq!(track.bit_rate, None);
        assert_eq!(track.sample_rate, Some(48.0));
    }

    #[test]
    fn extract_yields_nothing_on_probe_failure() {
        assert!(extract(&FailProbe, Path::new("/m"), Path::new("/m/bad.mp3")).is_none());
    }
}
