use std::path::PathBuf;

use thiserror::Error;

/// Rejected command line. The message doubles as the usage text.
#[derive(Debug, PartialEq, Eq, Error)]
#[error("Usage: vivace <music_directory> [-p | -o]")]
pub struct UsageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// JSON array on stdout (default).
    Json,
    /// Pretty text blocks on stdout.
    Pretty,
    /// Pretty text blocks written to the configured log file.
    LogFile,
}

#[derive(Debug)]
pub struct Args {
    pub root: PathBuf,
    pub mode: OutputMode,
}

impl Args {
    /// Parse everything after argv[0].
    pub fn parse<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let root = match args.next() {
            Some(a) if !a.starts_with('-') => PathBuf::from(a),
            _ => return Err(UsageError),
        };

        let mode = match args.next().as_deref() {
            None => OutputMode::Json,
            Some("-p") => OutputMode::Pretty,
            Some("-o") => OutputMode::LogFile,
            Some(_) => return Err(UsageError),
        };

        if args.next().is_some() {
            return Err(UsageError);
        }

        Ok(Args { root, mode })
    }
}
