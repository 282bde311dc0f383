//! User preferences and profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Theme mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light mode theme.
    Light,
    /// Dark mode theme (default).
    #[default]
    Dark,
    /// Follow system theme preference.
    System,
}

impl ThemeMode {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(DomainError::InvalidIdentifier(other.to_string())),
        }
    }
}

/// The local user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
}

impl UserProfile {
    /// Creates a profile with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new("Local User", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_mode_parse() {
        assert_eq!("LIGHT".parse::<ThemeMode>().ok(), Some(ThemeMode::Light));
        assert!("purple".parse::<ThemeMode>().is_err());
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn theme_mode_serializes_lowercase() {
        let json = serde_json::to_string(&ThemeMode::System).unwrap();
        assert_eq!(json, "\"system\"");
    }

    #[test]
    fn default_profile() {
        let profile = UserProfile::default();
        assert_eq!(profile.name, "Local User");
        assert!(profile.email.is_empty());
    }
}
