// SPDX-License-Identifier: MPL-2.0

//! Four-character codes as reported by the VA driver

use serde::{Deserialize, Serialize};
use std::fmt;

/// A packed four-character code (`VA_FOURCC('N','V','1','2')`)
///
/// The first character lives in the least significant byte, matching the
/// layout used by `va.h`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FourCC(pub u32);

impl FourCC {
    /// Build a code from its four characters
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// The four characters of the code
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Parse a code from a string of at most four ASCII characters.
    ///
    /// Shorter strings are padded with spaces (`"Y16"` becomes `"Y16 "`).
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || s.len() > 4 || !s.is_ascii() {
            return None;
        }
        let mut bytes = [b' '; 4];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Some(Self::from_bytes(bytes))
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC({}, {:#010x})", self, self.0)
    }
}

impl TryFrom<String> for FourCC {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid fourcc code: {:?}", value))
    }
}

impl From<FourCC> for String {
    fn from(fourcc: FourCC) -> Self {
        fourcc.to_string()
    }
}

pub const NV12: FourCC = FourCC::from_bytes(*b"NV12");
pub const YV12: FourCC = FourCC::from_bytes(*b"YV12");
pub const I420: FourCC = FourCC::from_bytes(*b"I420");
pub const YUY2: FourCC = FourCC::from_bytes(*b"YUY2");
pub const UYVY: FourCC = FourCC::from_bytes(*b"UYVY");
pub const AYUV: FourCC = FourCC::from_bytes(*b"AYUV");
pub const ARGB: FourCC = FourCC::from_bytes(*b"ARGB");
pub const ABGR: FourCC = FourCC::from_bytes(*b"ABGR");
pub const BGRA: FourCC = FourCC::from_bytes(*b"BGRA");
pub const RGBA: FourCC = FourCC::from_bytes(*b"RGBA");
pub const BGRX: FourCC = FourCC::from_bytes(*b"BGRX");
pub const RGBX: FourCC = FourCC::from_bytes(*b"RGBX");
pub const Y800: FourCC = FourCC::from_bytes(*b"Y800");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_va_fourcc_layout() {
        // Values from va.h
        assert_eq!(NV12.0, 0x3231564E);
        assert_eq!(YV12.0, 0x32315659);
        assert_eq!(I420.0, 0x30323449);
        assert_eq!(BGRA.0, 0x41524742);
    }

    #[test]
    fn test_parse_pads_short_codes() {
        assert_eq!(FourCC::parse("Y16").unwrap().to_string(), "Y16 ");
        assert_eq!(FourCC::parse("NV12"), Some(NV12));
        assert_eq!(FourCC::parse(""), None);
        assert_eq!(FourCC::parse("TOOLONG"), None);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&YV12).unwrap();
        assert_eq!(json, "\"YV12\"");
        let back: FourCC = serde_json::from_str(&json).unwrap();
        assert_eq!(back, YV12);
        assert!(serde_json::from_str::<FourCC>("\"ABCDE\"").is_err());
    }

    #[test]
    fn test_display_masks_non_printable() {
        assert_eq!(FourCC(0x0000_4142).to_string(), "BA..");
    }
}
