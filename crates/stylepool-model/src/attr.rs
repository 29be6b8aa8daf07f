use serde::{Deserialize, Serialize};

use crate::Color;

/// Border line style (subset).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    None,
    Thin,
    Medium,
    Thick,
}

impl Default for BorderStyle {
    fn default() -> Self {
        BorderStyle::None
    }
}

/// Border formatting (subset).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Border {
    #[serde(default)]
    pub top: BorderStyle,
    #[serde(default)]
    pub bottom: BorderStyle,
    #[serde(default)]
    pub left: BorderStyle,
    #[serde(default)]
    pub right: BorderStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Horizontal alignment options (subset).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    General,
    Left,
    Center,
    Right,
}

/// Vertical alignment options (subset).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

/// Identifies the slot a formatting attribute occupies.
///
/// An [`AttrSet`](crate::AttrSet) holds at most one attribute per kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrKind {
    FontName,
    FontSize,
    Bold,
    Italic,
    FontColor,
    FillColor,
    Border,
    HorizontalAlign,
    VerticalAlign,
    WrapText,
    NumberFormat,
    Protected,
}

/// One concrete cell formatting attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attr {
    FontName(String),
    /// Font size in 1/100 points (e.g. 1100 = 11pt).
    FontSize(u16),
    Bold(bool),
    Italic(bool),
    FontColor(Color),
    FillColor(Color),
    Border(Border),
    HorizontalAlign(HorizontalAlignment),
    VerticalAlign(VerticalAlignment),
    WrapText(bool),
    NumberFormat(String),
    Protected(bool),
}

impl Attr {
    /// The slot this attribute occupies.
    pub fn kind(&self) -> AttrKind {
        match self {
            Attr::FontName(_) => AttrKind::FontName,
            Attr::FontSize(_) => AttrKind::FontSize,
            Attr::Bold(_) => AttrKind::Bold,
            Attr::Italic(_) => AttrKind::Italic,
            Attr::FontColor(_) => AttrKind::FontColor,
            Attr::FillColor(_) => AttrKind::FillColor,
            Attr::Border(_) => AttrKind::Border,
            Attr::HorizontalAlign(_) => AttrKind::HorizontalAlign,
            Attr::VerticalAlign(_) => AttrKind::VerticalAlign,
            Attr::WrapText(_) => AttrKind::WrapText,
            Attr::NumberFormat(_) => AttrKind::NumberFormat,
            Attr::Protected(_) => AttrKind::Protected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Attr::FontSize(1100).kind(), AttrKind::FontSize);
        assert_eq!(Attr::Bold(true).kind(), AttrKind::Bold);
        assert_eq!(
            Attr::FillColor(Color::white()).kind(),
            AttrKind::FillColor
        );
        assert_eq!(Attr::Border(Border::default()).kind(), AttrKind::Border);
    }

    #[test]
    fn serde_snake_case_variants() {
        let json = serde_json::to_string(&Attr::FontSize(1200)).unwrap();
        assert_eq!(json, "{\"font_size\":1200}");
        let json = serde_json::to_string(&Attr::HorizontalAlign(HorizontalAlignment::Center)).unwrap();
        assert_eq!(json, "{\"horizontal_align\":\"center\"}");
    }
}
