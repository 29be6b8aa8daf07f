use core::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// An ARGB color.
///
/// Serialized as a `#AARRGGBB` hex string for IPC friendliness.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub argb: u32,
}

impl Color {
    pub const fn new_argb(argb: u32) -> Self {
        Self { argb }
    }

    pub const fn black() -> Self {
        Self { argb: 0xFF000000 }
    }

    pub const fn white() -> Self {
        Self { argb: 0xFFFFFFFF }
    }

    fn to_hex(self) -> String {
        format!("#{:08X}", self.argb)
    }
}

/// Error parsing a `#AARRGGBB` color string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("color must be a #AARRGGBB hex string (missing '#')")]
    MissingHash,
    #[error("color must be a #AARRGGBB hex string (8 hex digits), got {0} digits")]
    BadLength(usize),
    #[error("color contains invalid hex digits")]
    InvalidHex,
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or(ParseColorError::MissingHash)?;
        if hex.len() != 8 {
            return Err(ParseColorError::BadLength(hex.len()));
        }
        let argb = u32::from_str_radix(hex, 16).map_err(|_| ParseColorError::InvalidHex)?;
        Ok(Color { argb })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_roundtrip() {
        let color: Color = "#FF00A1B2".parse().unwrap();
        assert_eq!(color.argb, 0xFF00A1B2);
        assert_eq!(color.to_string(), "#FF00A1B2");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!("FF00A1B2".parse::<Color>(), Err(ParseColorError::MissingHash));
        assert_eq!("#FF00A1".parse::<Color>(), Err(ParseColorError::BadLength(6)));
        assert_eq!("#FF00A1BX".parse::<Color>(), Err(ParseColorError::InvalidHex));
    }

    #[test]
    fn serde_uses_hex_string() {
        let json = serde_json::to_string(&Color::black()).unwrap();
        assert_eq!(json, "\"#FF000000\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::black());
    }
}
