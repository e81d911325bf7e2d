//! Options for reading time-series field files.

use serde::{Deserialize, Serialize};

use crate::error::{AdcircError, AdcircResult};

/// Sentinel ADCIRC writes for nodes that are dry at a timestep.
pub const DEFAULT_DRY_VALUE: f64 = -99999.0;

/// Value substituted for dry entries in a filled view.
pub const DEFAULT_FILL_VALUE: f64 = 0.0;

/// Options controlling dry-value masking in [`read_field`](crate::read_field).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Build a dry mask alongside the raw values.
    pub mask_dry_values: bool,

    /// Values exactly equal to this are marked dry.
    pub dry_value: f64,

    /// Value reported for dry entries by filled accessors.
    pub fill_value: f64,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            mask_dry_values: false,
            dry_value: DEFAULT_DRY_VALUE,
            fill_value: DEFAULT_FILL_VALUE,
        }
    }
}

impl FieldOptions {
    /// Options with dry masking turned on and default sentinel/fill values.
    pub fn masked() -> Self {
        Self {
            mask_dry_values: true,
            ..Default::default()
        }
    }

    pub fn with_dry_masking(mut self, enabled: bool) -> Self {
        self.mask_dry_values = enabled;
        self
    }

    pub fn with_dry_value(mut self, dry_value: f64) -> Self {
        self.dry_value = dry_value;
        self
    }

    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = fill_value;
        self
    }

    /// Parse options from YAML text. Missing keys take their defaults.
    pub fn from_yaml_str(text: &str) -> AdcircResult<Self> {
        let options: Self = serde_yaml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Validate the options.
    ///
    /// Dry detection is exact equality, so a NaN sentinel would never match.
    pub fn validate(&self) -> AdcircResult<()> {
        if self.mask_dry_values && self.dry_value.is_nan() {
            return Err(AdcircError::InvalidConfig(
                "dry_value must not be NaN when masking dry values".to_string(),
            ));
        }
        Ok(())
    }
}
