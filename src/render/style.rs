//! Colors and visual options for the track map

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::comparator::{Competitor, Winner};
use crate::{AnalysisError, Result};

/// `#RRGGBB` color, serialized as its hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub u8, pub u8, pub u8);

impl HexColor {
    pub const fn rgb(self) -> RGBColor {
        RGBColor(self.0, self.1, self.2)
    }
}

impl FromStr for HexColor {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AnalysisError::parse("color", format!("expected #RRGGBB, got '{}'", s));
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(HexColor(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = AnalysisError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Visual options for [`TrackRenderer`](super::TrackRenderer)
///
/// Lengths for the arrow are in track coordinate units; everything else is in
/// pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Track path stroke width
    pub line_width: u32,
    pub background: HexColor,
    pub text_color: HexColor,
    /// Color of minisectors won by the reference (faster) trace
    pub reference_color: HexColor,
    /// Color of minisectors won by the comparison trace
    pub comparison_color: HexColor,
    /// Color of tied minisectors and samples outside the track range
    pub neutral_color: HexColor,
    pub title_font_size: f64,
    pub text_font_size: f64,
    pub arrow_length: f64,
    pub arrow_head_width: f64,
    pub arrow_head_length: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 1200,
            line_width: 5,
            background: HexColor(0x00, 0x00, 0x00),
            text_color: HexColor(0xFF, 0xFF, 0xFF),
            reference_color: HexColor(0xFF, 0x1E, 0x1E),
            comparison_color: HexColor(0x00, 0xFF, 0x00),
            neutral_color: HexColor(0x80, 0x80, 0x80),
            title_font_size: 28.0,
            text_font_size: 17.0,
            arrow_length: 1500.0,
            arrow_head_width: 50.0,
            arrow_head_length: 50.0,
        }
    }
}

impl RenderOptions {
    /// Fixed color of a competitor
    pub fn competitor_color(&self, competitor: Competitor) -> HexColor {
        match competitor {
            Competitor::Reference => self.reference_color,
            Competitor::Comparison => self.comparison_color,
        }
    }

    /// Path color for a sample annotated with `winner`
    pub fn winner_color(&self, winner: Option<Winner>) -> HexColor {
        match winner {
            Some(Winner::Competitor(competitor)) => self.competitor_color(competitor),
            Some(Winner::Tie) | None => self.neutral_color,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 200 || self.height < 200 {
            return Err(AnalysisError::config(
                "render.width/height",
                format!("image must be at least 200x200, got {}x{}", self.width, self.height),
            ));
        }
        if self.line_width == 0 {
            return Err(AnalysisError::config("render.line_width", "must be at least 1"));
        }
        if self.reference_color == self.comparison_color {
            return Err(AnalysisError::config(
                "render.comparison_color",
                "must differ from reference_color",
            ));
        }
        if !(self.arrow_length.is_finite() && self.arrow_length > 0.0) {
            return Err(AnalysisError::config("render.arrow_length", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_and_print() {
        let color: HexColor = "#ff1e1e".parse().unwrap();
        assert_eq!(color, HexColor(0xFF, 0x1E, 0x1E));
        assert_eq!(color.to_string(), "#FF1E1E");
        assert!("ff1e1e".parse::<HexColor>().is_err());
        assert!("#ff1e".parse::<HexColor>().is_err());
        assert!("#gg1e1e".parse::<HexColor>().is_err());
    }

    #[test]
    fn winners_map_to_fixed_colors() {
        let options = RenderOptions::default();
        assert_eq!(
            options.winner_color(Some(Winner::Competitor(Competitor::Reference))),
            options.reference_color
        );
        assert_eq!(
            options.winner_color(Some(Winner::Competitor(Competitor::Comparison))),
            options.comparison_color
        );
        assert_eq!(options.winner_color(Some(Winner::Tie)), options.neutral_color);
        assert_eq!(options.winner_color(None), options.neutral_color);
    }

    #[test]
    fn identical_competitor_colors_are_rejected() {
        let options = RenderOptions {
            comparison_color: RenderOptions::default().reference_color,
            ..RenderOptions::default()
        };
        assert!(matches!(options.validate(), Err(AnalysisError::Config { .. })));
        assert!(RenderOptions::default().validate().is_ok());
    }
}
