use std::env;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod library;
mod probe;
mod render;

use cli::{Args, OutputMode};
use crate::config::{ProbeBackend, Settings};
use probe::{FfprobeProbe, LoftyProbe, MediaProbe};

fn main() -> anyhow::Result<()> {
    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    // Diagnostics go to stderr so the JSON mode keeps a clean stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load().context("failed to load configuration")?;
    settings.validate().map_err(anyhow::Error::msg)?;

    if !args.root.is_dir() {
        anyhow::bail!("{} is not a readable directory", args.root.display());
    }

    let probe: Box<dyn MediaProbe> = match settings.probe.backend {
        ProbeBackend::Lofty => Box::new(LoftyProbe::new()),
        ProbeBackend::Ffprobe => Box::new(FfprobeProbe::new(&settings.probe.ffprobe_path)),
    };

    let paths = library::collect_files(&args.root, &settings.scan);
    let tracks = library::extract_all(probe.as_ref(), &args.root, paths, settings.scan.workers);

    match args.mode {
        OutputMode::Pretty => println!("{}", render::pretty_report(&tracks)),
        OutputMode::Json => {
            let json = render::json_report(&tracks).context("failed to serialize metadata")?;
            println!("{json}");
        }
        OutputMode::LogFile => {
            render::write_log(&settings.output.log_file, &tracks).with_context(|| {
                format!("failed to write {}", settings.output.log_file.display())
            })?;
        }
    }

    Ok(())
}
