//! TOML configuration for the CLI.

use crate::report::LengthUnit;
use anyhow::{Context, Result};
use minbox_kernel::BoxOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a config file can set. Command-line flags win over it.
///
/// ```toml
/// accuracy = "high"
/// show_preview = true
/// units = "mm"
/// display_units = "cm"
///
/// [preview_style]
/// opacity = 0.25
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Kernel options.
    #[serde(flatten)]
    pub options: BoxOptions,
    /// Unit the input geometry is in.
    pub units: LengthUnit,
    /// Unit to report in; defaults to `units`.
    pub display_units: Option<LengthUnit>,
}

impl CliConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid minbox config")
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minbox_kernel::CalculationAccuracy;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(CliConfig::from_toml_str("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_full_config() {
        let cfg = CliConfig::from_toml_str(
            r#"
            accuracy = "low"
            create_solid = true
            units = "in"
            display_units = "mm"

            [preview_style]
            opacity = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(cfg.options.accuracy, CalculationAccuracy::Low);
        assert!(cfg.options.create_solid);
        assert!(!cfg.options.show_preview);
        assert_eq!(cfg.units, LengthUnit::Inch);
        assert_eq!(cfg.display_units, Some(LengthUnit::Millimeter));
        assert_eq!(cfg.options.preview_style.opacity, 0.25);
        assert_eq!(cfg.options.preview_style.color, [240, 150, 50, 255]);
    }

    #[test]
    fn test_unknown_accuracy_rejected() {
        assert!(CliConfig::from_toml_str("accuracy = \"extreme\"").is_err());
    }
}
