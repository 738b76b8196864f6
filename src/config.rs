//! Command-line configuration and log setup.

use std::{fs::File, path::PathBuf, time::Duration};

use clap::{builder::TypedValueParser as _, Parser};
use color_eyre::eyre::Result;
use env_logger::{Builder, Env, Target};

use crate::grid::{Grid, DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Default delay between satisfying a level and loading the next one.
pub const DEFAULT_ADVANCE_DELAY_MS: u64 = 1500;

/// Runtime configuration parsed from the command line.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about)]
pub struct Config {
    /// Directory scanned for `.pbpack` level packs.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub levels_dir: PathBuf,
    /// Number of grid columns every level must have.
    #[arg(
        long,
        value_name = "COLUMNS",
        default_value_t = DEFAULT_COLUMNS,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    pub columns: usize,
    /// Number of grid rows every level must have.
    #[arg(
        long,
        value_name = "ROWS",
        default_value_t = DEFAULT_ROWS,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    pub rows: usize,
    /// Milliseconds the solved level stays on screen before the next one loads.
    #[arg(
        long = "advance-delay-ms",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_ADVANCE_DELAY_MS,
        value_parser = clap::value_parser!(u64).range(0..=60_000)
    )]
    pub advance_delay_ms: u64,
    /// File that receives log records. Logging is disabled when omitted.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels_dir: PathBuf::from("."),
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            advance_delay_ms: DEFAULT_ADVANCE_DELAY_MS,
            log_file: None,
        }
    }
}

impl Config {
    /// Returns the grid every level is loaded onto.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        Grid::new(self.columns, self.rows)
    }

    /// Returns the victory cooldown before advancing.
    #[must_use]
    pub const fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    /// Routes `log` records to the configured file.
    ///
    /// The terminal belongs to the user interface, so nothing is logged unless a log file was
    /// given. The `RUST_LOG` variable filters records and defaults to `info`.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`] if the log file cannot be created
    /// - [`log::SetLoggerError`] if a logger was already installed
    pub fn init_logging(&self) -> Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };

        let file = File::create(path)?;
        Builder::from_env(Env::default().default_filter_or("info"))
            .target(Target::Pipe(Box::new(file)))
            .try_init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::try_parse_from(["pushbox"]).expect("defaults should parse");

        assert_eq!(config, Config::default());
        assert_eq!(config.grid(), Grid::new(10, 10));
        assert_eq!(config.advance_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config::try_parse_from([
            "pushbox",
            "--levels-dir",
            "levels",
            "--columns",
            "8",
            "--rows",
            "6",
            "--advance-delay-ms",
            "250",
        ])
        .expect("custom values should parse");

        assert_eq!(config.levels_dir, PathBuf::from("levels"));
        assert_eq!(config.grid(), Grid::new(8, 6));
        assert_eq!(config.advance_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_config_rejects_zero_columns() {
        assert!(Config::try_parse_from(["pushbox", "--columns", "0"]).is_err());
    }

    #[test]
    fn test_config_rejects_long_delay() {
        assert!(Config::try_parse_from(["pushbox", "--advance-delay-ms", "60001"]).is_err());
    }

    #[test]
    fn test_init_logging_without_file_is_noop() {
        assert!(Config::default().init_logging().is_ok());
    }
}
