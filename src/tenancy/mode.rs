use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Process-wide legacy-row policy. Chosen once at startup from
/// configuration and immutable for the process lifetime; flipping it
/// requires a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementMode {
    /// Pre-isolation behavior: no tenant scoping on reads.
    Off,
    /// Tenant-scoped reads with a warned fallback to null-tenant legacy rows.
    Soft,
    /// Tenant-scoped reads only; legacy rows are invisible.
    Strict,
}

impl EnforcementMode {
    pub fn is_strict(self) -> bool {
        matches!(self, EnforcementMode::Strict)
    }

    pub fn is_soft(self) -> bool {
        matches!(self, EnforcementMode::Soft)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnforcementMode::Off => "off",
            EnforcementMode::Soft => "soft",
            EnforcementMode::Strict => "strict",
        }
    }
}

/// Raw value that did not parse. Config turns this into a boot failure;
/// there is deliberately no permissive default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedMode(pub String);

impl std::fmt::Display for UnrecognizedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized enforcement mode '{}'", self.0)
    }
}

impl std::error::Error for UnrecognizedMode {}

impl FromStr for EnforcementMode {
    type Err = UnrecognizedMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(EnforcementMode::Off),
            "soft" => Ok(EnforcementMode::Soft),
            "strict" => Ok(EnforcementMode::Strict),
            _ => Err(UnrecognizedMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes() {
        assert_eq!("off".parse::<EnforcementMode>().unwrap(), EnforcementMode::Off);
        assert_eq!("soft".parse::<EnforcementMode>().unwrap(), EnforcementMode::Soft);
        assert_eq!("strict".parse::<EnforcementMode>().unwrap(), EnforcementMode::Strict);
        assert_eq!(" Strict ".parse::<EnforcementMode>().unwrap(), EnforcementMode::Strict);
    }

    #[test]
    fn rejects_unknown_modes() {
        assert!("".parse::<EnforcementMode>().is_err());
        assert!("on".parse::<EnforcementMode>().is_err());
        assert!("permissive".parse::<EnforcementMode>().is_err());
    }

    #[test]
    fn predicates() {
        assert!(EnforcementMode::Strict.is_strict());
        assert!(!EnforcementMode::Strict.is_soft());
        assert!(EnforcementMode::Soft.is_soft());
        assert!(!EnforcementMode::Off.is_soft());
        assert!(!EnforcementMode::Off.is_strict());
    }
}
