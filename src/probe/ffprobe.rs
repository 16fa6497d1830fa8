use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

use super::{MediaProbe, MediaStream, ProbeError};

/// Probe backend that shells out to an `ffprobe` binary and parses its
/// JSON stream listing.
pub struct FfprobeProbe {
    binary: PathBuf,
}

impl FfprobeProbe {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Report {
    #[serde(default)]
    streams: Vec<RawStream>,
}

/// ffprobe emits numeric stream fields as JSON strings.
#[derive(Debug, Deserialize)]
struct RawStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    bit_rate: Option<String>,
    sample_rate: Option<String>,
}

fn parse_report(raw: &[u8]) -> Result<Vec<MediaStream>, ProbeError> {
    let report: Report =
        serde_json::from_slice(raw).map_err(|e| ProbeError::Malformed(e.to_string()))?;

    Ok(report
        .streams
        .into_iter()
        .map(|s| MediaStream {
            codec_type: s.codec_type.unwrap_or_default(),
            codec_name: s.codec_name,
            bit_rate: s.bit_rate.and_then(|v| v.parse().ok()),
            sample_rate: s.sample_rate.and_then(|v| v.parse().ok()),
        })
        .collect())
}

impl MediaProbe for FfprobeProbe {
    fn probe(&self, path: &Path) -> Result<Vec<MediaStream>, ProbeError> {
        let output = Command::new(&self.binary)
            .arg("-v")
            .arg("error")
            .arg("-print_format")
            .arg("json")
            .arg("-show_streams")
            .arg(path)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProbeError::Tool(format!(
                "{} ({})",
                stderr.trim(),
                output.status
            )));
        }

        parse_report(&output.stdout)
    }
}
