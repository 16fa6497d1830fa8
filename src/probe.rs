//! The probing seam between the pipeline and the external media prober.
//!
//! The rest of the crate only ever sees [`MediaStream`] values; whether
//! they come from an in-process lofty read or an `ffprobe` subprocess is
//! decided by configuration.

mod ffprobe;
mod lofty;

pub use self::ffprobe::FfprobeProbe;
pub use self::lofty::LoftyProbe;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// The file could not be opened or decoded as a media container.
    #[error("unsupported or corrupt file: {0}")]
    Unreadable(String),

    /// The probe produced output we could not make sense of.
    #[error("malformed probe output: {0}")]
    Malformed(String),

    /// The external probe binary ran but reported failure.
    #[error("probe tool failed: {0}")]
    Tool(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One media stream as reported by the prober.
///
/// Numeric fields stay in the prober's raw units (bits per second, Hz);
/// absence means the prober did not report the field, never zero.
#[derive(Debug, Clone, Default)]
pub struct MediaStream {
    pub codec_type: String,
    pub codec_name: Option<String>,
    /// Bits per second.
    pub bit_rate: Option<u64>,
    /// Hz.
    pub sample_rate: Option<u32>,
}

impl MediaStream {
    pub fn is_audio(&self) -> bool {
        self.codec_type == "audio"
    }
}

/// A probing backend: given a file path, describe its media streams or
/// fail for that one file.
pub trait MediaProbe: Send + Sync {
    fn probe(&self, path: &Path) -> Result<Vec<MediaStream>, ProbeError>;
}
