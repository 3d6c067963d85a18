use std::io;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber. `RUST_LOG` wins over the verbosity flags.
///
/// With `log_file`, output goes to a daily-rolling file next to it
/// (`picturepulse.log` rotates to `picturepulse.<date>`); otherwise to stderr.
pub fn init(verbose: u8, quiet: bool, log_file: Option<&Path>) -> io::Result<()> {
    let default_directives = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn,picturepulse=info",
            1 => "warn,picturepulse=debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let registry = Registry::default().with(filter);

    match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            std::fs::create_dir_all(dir)?;
            let prefix = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("picturepulse");
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, prefix);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(appender))
                .init();
        }
        None => {
            registry
                .with(fmt::layer().with_target(false).with_writer(io::stderr))
                .init();
        }
    }
    Ok(())
}
