use std::path::Path;

use lofty::file::FileType;
use lofty::prelude::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;

use super::{MediaProbe, MediaStream, ProbeError};

/// Default probe backend: reads stream properties in-process with lofty.
///
/// Lofty exposes the single audio stream of a file through its
/// properties, so a successful read always yields exactly one stream.
pub struct LoftyProbe;

impl LoftyProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoftyProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Map lofty's container type onto an ffprobe-style codec name.
fn codec_name(file_type: FileType) -> Option<&'static str> {
    match file_type {
        FileType::Mpeg => Some("mp3"),
        FileType::Flac => Some("flac"),
        FileType::Vorbis => Some("vorbis"),
        FileType::Opus => Some("opus"),
        FileType::Aac | FileType::Mp4 => Some("aac"),
        FileType::Wav | FileType::Aiff => Some("pcm"),
        FileType::WavPack => Some("wavpack"),
        FileType::Ape => Some("ape"),
        FileType::Speex => Some("speex"),
        FileType::Mpc => Some("musepack"),
        _ => None,
    }
}

impl MediaProbe for LoftyProbe {
    fn probe(&self, path: &Path) -> Result<Vec<MediaStream>, ProbeError> {
        let tagged = Probe::open(path)
            .map_err(|e| ProbeError::Unreadable(e.to_string()))?
            .read()
            .map_err(|e| ProbeError::Unreadable(e.to_string()))?;

        let props = tagged.properties();

        Ok(vec![MediaStream {
            codec_type: "audio".to_string(),
            codec_name: codec_name(tagged.file_type()).map(str::to_string),
            // lofty reports kbps, the stream model carries bps.
            bit_rate: props.audio_bitrate().map(|kbps| u64::from(kbps) * 1000),
            sample_rate: props.sample_rate(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// A canonical 16-bit stereo PCM WAV header plus one second of silence.
    fn wav_bytes(sample_rate: u32) -> Vec<u8> {
        let channels: u16 = 2;
        let bits: u16 = 16;
        let block_align = channels * (bits / 8);
        let byte_rate = sample_rate * u32::from(block_align);
        let data_len = byte_rate; // one second

        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&channels.to_le_bytes());
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&byte_rate.to_le_bytes());
        out.extend_from_slice(&block_align.to_le_bytes());
        out.extend_from_slice(&bits.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        out.resize(out.len() + data_len as usize, 0);
        out
    }

    #[test]
    fn probe_reads_pcm_wav_properties() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        fs::write(&path, wav_bytes(44_100)).unwrap();

        let streams = LoftyProbe::new().probe(&path).unwrap();
        assert_eq!(streams.len(), 1);
        assert!(streams[0].is_audio());
        assert_eq!(streams[0].codec_name.as_deref(), Some("pcm"));
        assert_eq!(streams[0].sample_rate, Some(44_100));
    }

    #[test]
    fn probe_missing_file_fails() {
        let err = LoftyProbe::new()
            .probe(Path::new("/nonexistent/track.mp3"))
            .unwrap_err();
        assert!(matches!(err, ProbeError::Unreadable(_)));
    }

    #[test]
    fn probe_garbage_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        fs::write(&path, b"definitely not an mp3").unwrap();

        assert!(LoftyProbe::new().probe(&path).is_err());
    }
}
