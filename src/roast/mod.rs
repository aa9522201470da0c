//! Roast domain types
//!
//! The user-selectable options (intensity and language), the staged upload,
//! and the structured critique returned by the model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How harsh the persona should be
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoastIntensity {
    Mild,
    #[default]
    Spicy,
    ScorchedEarth,
}

impl RoastIntensity {
    pub const ALL: [RoastIntensity; 3] = [
        RoastIntensity::Mild,
        RoastIntensity::Spicy,
        RoastIntensity::ScorchedEarth,
    ];

    /// Display label shown next to the selector
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (RoastIntensity::Mild, Language::English) => "Simmer",
            (RoastIntensity::Mild, Language::Hindi) => "Halka Phulka",
            (RoastIntensity::Spicy, Language::English) => "Flame Grill",
            (RoastIntensity::Spicy, Language::Hindi) => "Masaledaar",
            (RoastIntensity::ScorchedEarth, Language::English) => "Incinerate",
            (RoastIntensity::ScorchedEarth, Language::Hindi) => "Satyanaash",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RoastIntensity::Mild => "🍲",
            RoastIntensity::Spicy => "🔥",
            RoastIntensity::ScorchedEarth => "☢️",
        }
    }
}

impl fmt::Display for RoastIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoastIntensity::Mild => "mild",
            RoastIntensity::Spicy => "spicy",
            RoastIntensity::ScorchedEarth => "scorched-earth",
        })
    }
}

impl FromStr for RoastIntensity {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "mild" | "simmer" => Ok(RoastIntensity::Mild),
            "spicy" | "flame-grill" => Ok(RoastIntensity::Spicy),
            "scorched-earth" | "incinerate" => Ok(RoastIntensity::ScorchedEarth),
            _ => Err(ParseOptionError::Intensity(s.to_string())),
        }
    }
}

/// Output language of the roast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Hindi];

    /// Label of the submit control
    pub fn submit_label(self) -> &'static str {
        match self {
            Language::English => "Roast Me 🔥",
            Language::Hindi => "Jala De Bhai 🔥",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::English => "english",
            Language::Hindi => "hindi",
        })
    }
}

impl FromStr for Language {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hinglish" | "hi" => Ok(Language::Hindi),
            _ => Err(ParseOptionError::Language(s.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseOptionError {
    #[error("Unknown roast intensity '{0}' (expected mild, spicy or scorched-earth)")]
    Intensity(String),

    #[error("Unknown language '{0}' (expected english or hindi)")]
    Language(String),
}

/// The two user-selected options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoastOptions {
    intensity: RoastIntensity,
    language: Language,
}

impl RoastOptions {
    pub fn new(intensity: RoastIntensity, language: Language) -> Self {
        Self {
            intensity,
            language,
        }
    }

    pub fn intensity(&self) -> RoastIntensity {
        self.intensity
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_intensity(&mut self, intensity: RoastIntensity) {
        self.intensity = intensity;
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }
}

/// A validated file, encoded and ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name as selected by the user
    pub name: String,

    /// Standard base64 encoding of the file bytes
    pub base64: String,

    /// MIME type the file was validated against
    pub mime_type: String,

    /// Size of the raw file in bytes
    pub size: u64,
}

/// One themed block of feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoastSection {
    pub title: String,
    /// Bullet points
    pub content: Vec<String>,
}

/// Structured critique returned by the model
///
/// The score is kept exactly as the model produced it; nothing clamps it to
/// 0-100 and nothing checks the section count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastResponse {
    pub one_liner: String,
    pub sections: Vec<RoastSection>,
    pub score: i64,
}
