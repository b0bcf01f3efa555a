//! Supported platforms and their built-in label schemas.
//!
//! Each platform has its own classifier/vectorizer pair trained on that
//! platform's message style. The set is closed: an unrecognised name is a
//! configuration error rather than a fallback to some default platform.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, LabelSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Roblox,
    TikTok,
    CharacterAi,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Roblox, Platform::TikTok, Platform::CharacterAi];

    /// Stable identifier, also the artifact file stem (`<id>_classifier.json`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roblox => "roblox",
            Self::TikTok => "tiktok",
            Self::CharacterAi => "characterai",
        }
    }

    /// Name as shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Roblox => "Roblox",
            Self::TikTok => "TikTok",
            Self::CharacterAi => "Character.ai",
        }
    }

    /// Label names the platform's stock classifier was trained with.
    pub fn default_labels(&self) -> &'static [&'static str] {
        match self {
            Self::Roblox => &["Adult (18+)", "Teen (13–17)", "Child (0–12)"],
            Self::TikTok => &["Not Minor (18+)", "Minor (under 18)"],
            Self::CharacterAi => &["Adult", "Minor"],
        }
    }

    pub fn default_schema(&self) -> LabelSchema {
        LabelSchema::from_static(self.default_labels())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    /// Case-insensitive; ignores `.`, `-`, `_` and spaces so that
    /// `Character.ai`, `character-ai` and `characterai` all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "roblox" => Ok(Self::Roblox),
            "tiktok" => Ok(Self::TikTok),
            "characterai" => Ok(Self::CharacterAi),
            _ => Err(CoreError::UnknownPlatform(s.to_string())),
        }
    }
}
