//! Optional TOML configuration for table parameters.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to override:
//!
//! ```toml
//! big_blind = 2
//! preflop_open_units = 3
//! postflop_open_pot_divisor = 2
//! ```

use std::fs;

use densedeck_engine::table::TableConfig;
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub seats: usize,
    pub starting_stack: u32,
    pub big_blind: u32,
    pub preflop_open_units: u32,
    pub postflop_open_pot_divisor: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        let t = TableConfig::default();
        Self {
            seats: t.seat_count,
            starting_stack: t.starting_stack,
            big_blind: t.big_blind,
            preflop_open_units: t.preflop_open_units,
            postflop_open_pot_divisor: t.postflop_open_pot_divisor,
        }
    }
}

impl CliConfig {
    pub fn load(path: Option<&str>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("failed to read {}: {}", path, e)))?;
        let cfg: CliConfig = toml::from_str(&text)
            .map_err(|e| CliError::Config(format!("failed to parse {}: {}", path, e)))?;
        if !(2..=4).contains(&cfg.seats) {
            return Err(CliError::Config(format!(
                "seats must be 2-4, got {}",
                cfg.seats
            )));
        }
        if cfg.big_blind == 0 {
            return Err(CliError::Config("big_blind must be positive".to_string()));
        }
        Ok(cfg)
    }

    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            seat_count: self.seats,
            starting_stack: self.starting_stack,
            big_blind: self.big_blind,
            preflop_open_units: self.preflop_open_units,
            postflop_open_pot_divisor: self.postflop_open_pot_divisor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_table_defaults() {
        let cfg = CliConfig::default();
        assert_eq!(cfg.table_config(), TableConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let mut f = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(f, "big_blind = 2\nstarting_stack = 200").expect("write");
        let cfg = CliConfig::load(Some(f.path().to_str().expect("path"))).expect("load");
        assert_eq!(cfg.big_blind, 2);
        assert_eq!(cfg.starting_stack, 200);
        assert_eq!(cfg.seats, 4);
    }

    #[test]
    fn rejects_zero_big_blind() {
        let mut f = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(f, "big_blind = 0").expect("write");
        assert!(matches!(
            CliConfig::load(Some(f.path().to_str().expect("path"))),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        assert!(matches!(
            CliConfig::load(Some("/nonexistent/densedeck.toml")),
            Err(CliError::Config(_))
        ));
    }
}
