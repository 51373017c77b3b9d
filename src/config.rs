use crate::error::{RallyError, RtResult};
use crate::score::Player;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "match")]
    pub match_opts: MatchOptions,
    pub analytics: AnalyticsParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    #[arg(long, default_value = "Player A")]
    pub name_a: String,
    #[arg(long, default_value = "Player B")]
    pub name_b: String,
    #[arg(long, default_value = "A")]
    pub first_server: Player,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            name_a: "Player A".to_string(),
            name_b: "Player B".to_string(),
            first_server: Player::A,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsParams {
    /// Patterns seen fewer times than this are left out of the filtered views.
    #[arg(long, default_value_t = 5)]
    pub min_occurrences: u32,
    #[arg(long, default_value_t = 5)]
    pub top: usize,
    #[arg(long, default_value_t = false)]
    pub exclude_serve: bool,
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            min_occurrences: 5,
            top: 5,
            exclude_serve: false,
        }
    }
}

impl AnalyticsParams {
    pub fn include_serve(&self) -> bool {
        !self.exclude_serve
    }

    pub fn merge_from_cli(&mut self, cli: &AnalyticsParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(min_occurrences, "min_occurrences");
        update_if_present!(top, "top");
        update_if_present!(exclude_serve, "exclude_serve");
    }
}

impl MatchOptions {
    pub fn merge_from_cli(&mut self, cli: &MatchOptions, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(name_a, "name_a");
        update_if_present!(name_b, "name_b");
        update_if_present!(first_server, "first_server");
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RtResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RallyError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
