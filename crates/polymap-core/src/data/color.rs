use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A named entry of the color picker palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetColor {
    pub name: &'static str,
    pub value: &'static str,
}

/// Palette offered by the save form. The first entry is the default color.
pub const PRESET_COLORS: [PresetColor; 10] = [
    PresetColor { name: "Sky Blue", value: "#87CEEB" },
    PresetColor { name: "Mint Green", value: "#98FF98" },
    PresetColor { name: "Light Coral", value: "#F08080" },
    PresetColor { name: "Lavender", value: "#E6E6FA" },
    PresetColor { name: "Peach", value: "#FFE5B4" },
    PresetColor { name: "Light Yellow", value: "#FFFFE0" },
    PresetColor { name: "Light Pink", value: "#FFB6C1" },
    PresetColor { name: "Light Cyan", value: "#E0FFFF" },
    PresetColor { name: "Thistle", value: "#D8BFD8" },
    PresetColor { name: "Wheat", value: "#F5DEB3" },
];

/// Fill and stroke color of a polygon, stored as `#RRGGBB`.
///
/// Deserialization is lenient so older stored data keeps loading;
/// [`Color::parse`] is the strict constructor used by forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Parses a `#RRGGBB` hex color. Surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if Self::is_hex(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidColor(value.to_string()))
        }
    }

    /// Looks up a preset by its display name, case-insensitively.
    pub fn preset(name: &str) -> Option<Self> {
        PRESET_COLORS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| Self(p.value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        Self::is_hex(&self.0)
    }

    fn is_hex(value: &str) -> bool {
        value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(PRESET_COLORS[0].value.to_string())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).or_else(|err| Self::preset(s).ok_or(err))
    }
}
