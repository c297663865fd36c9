use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default fly-to curvature preference (≈ √2).
///
/// Larger values zoom further out while panning; smaller values keep the
/// camera closer to the ground and pan more.
pub const DEFAULT_RHO: f64 = 1.414;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidRho { value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "Config parse error: {err}"),
            ConfigError::InvalidRho { value } => {
                write!(f, "rho must be finite and positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tuning for fly-to curves.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyToConfig {
    /// Curvature preference, see [`DEFAULT_RHO`].
    pub rho: f64,
}

impl Default for FlyToConfig {
    fn default() -> Self {
        Self { rho: DEFAULT_RHO }
    }
}

impl FlyToConfig {
    pub fn new(rho: f64) -> Result<Self, ConfigError> {
        Self { rho }.validated()
    }

    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: FlyToConfig = serde_json::from_str(payload).map_err(ConfigError::Parse)?;
        config.validated()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let payload = fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&payload)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !self.rho.is_finite() || self.rho <= 0.0 {
            return Err(ConfigError::InvalidRho { value: self.rho });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DEFAULT_RHO, FlyToConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_root_two() {
        assert_eq!(FlyToConfig::default(), FlyToConfig { rho: DEFAULT_RHO });
        assert!((DEFAULT_RHO - std::f64::consts::SQRT_2).abs() < 1e-3);
    }

    #[test]
    fn rejects_non_positive_rho() {
        assert!(matches!(
            FlyToConfig::new(0.0),
            Err(ConfigError::InvalidRho { .. })
        ));
        assert!(matches!(
            FlyToConfig::new(-1.0),
            Err(ConfigError::InvalidRho { .. })
        ));
        assert!(matches!(
            FlyToConfig::new(f64::NAN),
            Err(ConfigError::InvalidRho { .. })
        ));
        assert_eq!(FlyToConfig::new(2.0).unwrap().rho, 2.0);
    }

    #[test]
    fn json_missing_field_uses_default() {
        let cfg = FlyToConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, FlyToConfig::default());

        let cfg = FlyToConfig::from_json_str(r#"{"rho": 2.5}"#).unwrap();
        assert_eq!(cfg.rho, 2.5);
    }

    #[test]
    fn json_errors_are_classified() {
        assert!(matches!(
            FlyToConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            FlyToConfig::from_json_str(r#"{"rho": -3.0}"#),
            Err(ConfigError::InvalidRho { value }) if value == -3.0
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = FlyToConfig::load("/definitely/not/here/flyto.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
