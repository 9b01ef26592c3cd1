//! Tracing subscriber setup.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use petcare_core::PetCareConfig;

/// Log file name, created next to the data file in TUI mode.
pub(crate) const LOG_FILE: &str = "petcare.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LogTarget {
    /// One-shot commands log to stderr.
    Stderr,
    /// The terminal UI owns the screen, so logs go to a file.
    File(PathBuf),
}

/// Filter directive for the given target.
///
/// `--verbose` always means `debug`. Otherwise `log_level` (from the file
/// or `PETCARE_LOG`) applies to both targets; when unset the log file gets
/// `info` and stderr stays at `warn`.
pub(crate) fn filter_directive(config: &PetCareConfig, verbose: bool, target: &LogTarget) -> String {
    if verbose {
        return "debug".to_string();
    }
    match (&config.log_level, target) {
        (Some(level), _) => level.clone(),
        (None, LogTarget::File(_)) => "info".to_string(),
        (None, LogTarget::Stderr) => "warn".to_string(),
    }
}

pub(crate) fn init_tracing(config: &PetCareConfig, verbose: bool, target: LogTarget) -> anyhow::Result<()> {
    let directive = filter_directive(config, verbose, &target);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    }
    .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        let file = LogTarget::File(PathBuf::from("data").join(LOG_FILE));
        let unset = PetCareConfig::default();
        assert_eq!(filter_directive(&unset, false, &LogTarget::Stderr), "warn");
        assert_eq!(filter_directive(&unset, false, &file), "info");

        let config = PetCareConfig {
            log_level: Some("petcare_core=trace".to_string()),
            ..PetCareConfig::default()
        };
        assert_eq!(
            filter_directive(&config, false, &LogTarget::Stderr),
            "petcare_core=trace"
        );
        assert_eq!(filter_directive(&config, false, &file), "petcare_core=trace");
        assert_eq!(filter_directive(&config, true, &file), "debug");
        assert_eq!(filter_directive(&config, true, &LogTarget::Stderr), "debug");
    }
}
