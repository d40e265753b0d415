//! Difficulty presets and host configuration
//!
//! Read once at startup from an optional JSON blob; never written back.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DIFFICULTY, MAX_FRAME_DT};

/// Difficulty multiplier, always finite and positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Difficulty(f32);

impl Difficulty {
    /// Sanitize a raw multiplier (non-finite or non-positive -> 1.0)
    pub fn new(value: f32) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self(DEFAULT_DIFFICULTY)
        }
    }

    /// Parse a selector value like `"1.5"`; unparsable input means 1.0
    pub fn parse(s: &str) -> Self {
        s.trim()
            .parse::<f32>()
            .map(Self::new)
            .unwrap_or_default()
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(DEFAULT_DIFFICULTY)
    }
}

impl From<f32> for Difficulty {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Difficulty> for f32 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

/// Named difficulty levels offered by the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

impl DifficultyPreset {
    pub const ALL: [DifficultyPreset; 4] = [
        DifficultyPreset::Easy,
        DifficultyPreset::Normal,
        DifficultyPreset::Hard,
        DifficultyPreset::Insane,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
            DifficultyPreset::Insane => "Insane",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "medium" | "med" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            "insane" => Some(DifficultyPreset::Insane),
            _ => None,
        }
    }

    pub fn multiplier(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => 0.75,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Hard => 1.5,
            DifficultyPreset::Insane => 2.0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::new(self.multiplier())
    }
}

/// Host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting difficulty; the selector may change it every frame
    pub difficulty: Difficulty,
    /// Fixed run seed; `None` lets the host pick one
    pub seed: Option<u64>,
    /// Largest frame delta handed to `update` (seconds)
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            seed: None,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Settings {
    /// Create settings from a preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            difficulty: preset.difficulty(),
            ..Self::default()
        }
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if !(settings.max_frame_dt.is_finite() && settings.max_frame_dt > 0.0) {
            log::warn!(
                "Ignoring invalid max_frame_dt {}, using {}",
                settings.max_frame_dt,
                MAX_FRAME_DT
            );
            settings.max_frame_dt = MAX_FRAME_DT;
        }
        Ok(settings)
    }

    /// Parse a JSON config, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings (difficulty {})", settings.difficulty.value());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// DOM id of the optional JSON config element
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ELEMENT_ID: &'static str = "arcade-config";

    /// Load settings from the page's config element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => Self::from_json_or_default(&json),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(Difficulty::parse("1.5").value(), 1.5);
        assert_eq!(Difficulty::parse(" 2 ").value(), 2.0);
        assert_eq!(Difficulty::parse("fast").value(), 1.0);
        assert_eq!(Difficulty::parse("").value(), 1.0);
        assert_eq!(Difficulty::parse("0").value(), 1.0);
        assert_eq!(Difficulty::parse("-3").value(), 1.0);
        assert_eq!(Difficulty::parse("NaN").value(), 1.0);
    }

    #[test]
    fn test_presets() {
        for preset in DifficultyPreset::ALL {
            assert_eq!(DifficultyPreset::from_str(preset.as_str()), Some(preset));
            assert!(preset.multiplier() > 0.0);
        }
        assert_eq!(Settings::from_preset(DifficultyPreset::Hard).difficulty.value(), 1.5);
    }

    #[test]
    fn test_from_json_defaults_missing_fields() {
        let settings = Settings::from_json(r#"{"difficulty": 2.0}"#).unwrap();
        assert_eq!(settings.difficulty.value(), 2.0);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.max_frame_dt, MAX_FRAME_DT);
    }

    #[test]
    fn test_from_json_sanitizes_values() {
        let settings =
            Settings::from_json(r#"{"difficulty": -1, "seed": 9, "max_frame_dt": 0}"#).unwrap();
        assert_eq!(settings.difficulty.value(), 1.0);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.max_frame_dt, MAX_FRAME_DT);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert!(Settings::from_json("{not json").is_err());
        assert_eq!(Settings::from_json_or_default("{not json"), Settings::default());
    }
}
