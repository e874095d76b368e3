//! Platform identifiers used by `key<Platform>` tags

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating systems a document can target.
///
/// Tags are written the way they appear in documents: `<Windows>`, `<Linux>`,
/// `<Darwin>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Windows,
    Linux,
    Darwin,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Linux, Platform::Darwin];

    /// Detect the host platform at compile time. `None` on anything outside
    /// the supported set.
    pub const fn current() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Platform::Windows)
        } else if cfg!(target_os = "linux") {
            Some(Platform::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Platform::Darwin)
        } else {
            None
        }
    }

    /// Returns the tag spelling
    pub const fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::Darwin => "Darwin",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!(
                "unknown platform '{}', expected one of: {}",
                s,
                Self::ALL.map(|p| p.as_str()).join(", ")
            )
        })
    }
}
