//! Benchmark size profiles for common use cases.
//!
//! Profiles provide sensible dataset sizes and replicate counts so that a
//! quick smoke run and a full measurement need no hand-tuned flags.

use std::fmt;
use std::str::FromStr;

/// Benchmark size profiles.
///
/// Each profile pre-configures the table shape and the number of timed
/// invocations per (strategy, input) cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Smoke run.
    ///
    /// - Rows: 1,000 markers
    /// - Genotype columns: 100
    /// - Replicates: 3
    Quick,

    /// Standard measurement (default).
    ///
    /// - Rows: 10,000 markers
    /// - Genotype columns: 1,000
    /// - Replicates: 5
    #[default]
    Standard,

    /// Large table, more replicates.
    ///
    /// - Rows: 100,000 markers
    /// - Genotype columns: 1,000
    /// - Replicates: 10
    Full,
}

impl Profile {
    /// Returns the number of marker rows for this profile.
    pub fn rows(&self) -> usize {
        match self {
            Profile::Quick => 1_000,
            Profile::Standard => 10_000,
            Profile::Full => 100_000,
        }
    }

    /// Returns the number of genotype columns for this profile.
    pub fn genotype_columns(&self) -> usize {
        match self {
            Profile::Quick => 100,
            Profile::Standard | Profile::Full => 1_000,
        }
    }

    /// Returns the timed invocations per cell for this profile.
    pub fn replicates(&self) -> usize {
        match self {
            Profile::Quick => 3,
            Profile::Standard => 5,
            Profile::Full => 10,
        }
    }

    /// Returns all available profile names.
    pub fn variants() -> &'static [&'static str] {
        &["quick", "standard", "full"]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Quick => write!(f, "quick"),
            Profile::Standard => write!(f, "standard"),
            Profile::Full => write!(f, "full"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quick" | "smoke" => Ok(Profile::Quick),
            "standard" | "default" => Ok(Profile::Standard),
            "full" => Ok(Profile::Full),
            _ => Err(format!(
                "Unknown profile '{}'. Valid options: {}",
                s,
                Profile::variants().join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let standard = Profile::default();
        assert_eq!(standard, Profile::Standard);
        assert_eq!(standard.rows(), 10_000);
        assert_eq!(standard.genotype_columns(), 1_000);
        assert_eq!(standard.replicates(), 5);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(Profile::from_str("quick").unwrap(), Profile::Quick);
        assert_eq!(Profile::from_str("STANDARD").unwrap(), Profile::Standard);
        assert_eq!(Profile::from_str("full").unwrap(), Profile::Full);
        assert!(Profile::from_str("invalid").is_err());
    }

    #[test]
    fn test_profile_display_roundtrip() {
        for name in Profile::variants() {
            assert_eq!(Profile::from_str(name).unwrap().to_string(), *name);
        }
    }
}
