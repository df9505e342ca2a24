//! Session configuration resolved from command-line arguments.

use std::io;

use chrono::{Local, NaiveDate};
use crossterm::tty::IsTty;
use thiserror::Error;

use crate::cli::{Cli, ColorChoice};
use crate::navigator::DEFAULT_TASK_DATE;

/// Prompt shown when none is configured.
pub const DEFAULT_PROMPT: &str = "Enter a command: ";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid --date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Settings for one console session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub task_date: String,
    pub prompt: String,
    pub color: bool,
    pub echo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            task_date: DEFAULT_TASK_DATE.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            color: false,
            echo: false,
        }
    }
}

/// Validate a `YYYY-MM-DD` date and return it normalised.
pub fn parse_task_date(value: &str) -> Result<String, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|source| ConfigError::InvalidDate {
            value: value.to_string(),
            source,
        })
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let task_date = match (&cli.date, cli.today) {
            (Some(date), _) => parse_task_date(date)?,
            (None, true) => Local::now().date_naive().format("%Y-%m-%d").to_string(),
            (None, false) => DEFAULT_TASK_DATE.to_string(),
        };
        let color = match cli.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_tty(),
        };
        Ok(Config {
            task_date,
            prompt: cli.prompt.clone().unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            color,
            echo: cli.echo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = Config::from_cli(&Cli::parse_from(["tb", "--color", "never"])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_date_and_prompt() {
        let cli = Cli::parse_from(["tb", "--date", "2024-02-03", "--prompt", "> ", "--echo"]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.task_date, "2024-02-03");
        assert_eq!(config.prompt, "> ");
        assert!(config.echo);
    }

    #[test]
    fn test_today_uses_local_date() {
        let config = Config::from_cli(&Cli::parse_from(["tb", "--today"])).unwrap();
        assert_eq!(config.task_date, Local::now().date_naive().to_string());
    }

    #[test]
    fn test_invalid_date() {
        let err = parse_task_date("tomorrow").unwrap_err();
        assert_eq!(err.to_string(), "invalid --date 'tomorrow', expected YYYY-MM-DD");
    }

    #[test]
    fn test_always_color() {
        let config = Config::from_cli(&Cli::parse_from(["tb", "--color", "always"])).unwrap();
        assert!(config.color);
    }
}
