//! Minification profiles
//!
//! A profile is a named preset for the pipeline settings:
//! - `safe`: comments only, indentation and line numbers kept
//! - `balanced`: each language's default pipeline (recommended)
//! - `aggressive`: every action including operator spacing
//!
//! # Examples
//!
//! ```
//! use src_slim::config::{Profile, ProfileType};
//!
//! let profile = Profile::new(ProfileType::Safe);
//! assert_eq!(profile.name, "safe");
//! assert_eq!(profile.pipeline.keep_line_parity, Some(true));
//!
//! assert!(Profile::get("aggressive").is_some());
//! assert!(Profile::get("extreme").is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::action::{ActionKind, IndentPolicy};
use crate::file::PipelineSettings;

/// Profile identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    /// Comments only; layout and line numbers untouched
    Safe,
    /// Language defaults (recommended)
    #[default]
    Balanced,
    /// Every action, including operator spacing
    Aggressive,
}

impl FromStr for ProfileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "safe" => Ok(Self::Safe),
            "balanced" => Ok(Self::Balanced),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(format!("Unknown profile: {}", s)),
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ProfileType {
    /// Every profile, mildest first
    pub const ALL: [ProfileType; 3] = [Self::Safe, Self::Balanced, Self::Aggressive];

    /// Get profile name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }

    /// Get profile description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Safe => "Strip comments only, keep layout and line numbers",
            Self::Balanced => "Comments, whitespace and blank lines (recommended)",
            Self::Aggressive => "Everything in balanced plus spacing around punctuation",
        }
    }
}

/// A named pipeline preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Profile type
    pub profile_type: ProfileType,
    /// Profile name
    pub name: String,
    /// Profile description
    pub description: String,
    /// Settings applied on top of language defaults
    pub pipeline: PipelineSettings,
    /// Caveats shown by `init`
    pub notes: Vec<String>,
}

impl Profile {
    /// Create the preset for `profile_type`.
    pub fn new(profile_type: ProfileType) -> Self {
        let (pipeline, notes) = match profile_type {
            ProfileType::Safe => (
                PipelineSettings {
                    actions: Some(vec![ActionKind::Comments]),
                    indentation: Some(IndentPolicy::Preserve),
                    keep_line_parity: Some(true),
                },
                vec!["Line numbers in stack traces still match the sources".to_string()],
            ),
            ProfileType::Balanced => (PipelineSettings::default(), Vec::new()),
            ProfileType::Aggressive => (
                PipelineSettings {
                    actions: Some(ActionKind::ALL.to_vec()),
                    indentation: Some(IndentPolicy::Strip),
                    keep_line_parity: Some(false),
                },
                vec![
                    "Indentation is removed except where a language needs it".to_string(),
                    "Spacing is only tightened for languages that declare safe punctuation"
                        .to_string(),
                ],
            ),
        };
        Self {
            profile_type,
            name: profile_type.name().to_string(),
            description: profile_type.description().to_string(),
            pipeline,
            notes,
        }
    }

    /// Get a profile by name, case-insensitive.
    pub fn get(name: &str) -> Option<Self> {
        name.parse::<ProfileType>().ok().map(Self::new)
    }

    /// Names of every profile.
    pub fn names() -> Vec<&'static str> {
        ProfileType::ALL.iter().map(ProfileType::name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_type_parses_case_insensitively() {
        assert_eq!("SAFE".parse::<ProfileType>(), Ok(ProfileType::Safe));
        assert_eq!("Balanced".parse::<ProfileType>(), Ok(ProfileType::Balanced));
        assert!("minimal".parse::<ProfileType>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for name in Profile::names() {
            assert_eq!(Profile::get(name).unwrap().name, name);
        }
    }

    #[test]
    fn test_balanced_uses_language_defaults() {
        assert_eq!(
            Profile::new(ProfileType::Balanced).pipeline,
            PipelineSettings::default()
        );
    }

    #[test]
    fn test_aggressive_runs_every_action() {
        let profile = Profile::new(ProfileType::Aggressive);
        assert_eq!(profile.pipeline.actions.as_deref(), Some(&ActionKind::ALL[..]));
        assert!(!profile.notes.is_empty());
    }

    #[test]
    fn test_safe_keeps_lines() {
        let profile = Profile::new(ProfileType::Safe);
        assert_eq!(profile.pipeline.actions, Some(vec![ActionKind::Comments]));
        assert_eq!(profile.pipeline.indentation, Some(IndentPolicy::Preserve));
    }
}
