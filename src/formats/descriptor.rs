// SPDX-License-Identifier: MPL-2.0

//! Raw image format descriptors as returned by the driver

use super::fourcc::FourCC;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte order of a packed pixel (`VA_LSB_FIRST` / `VA_MSB_FIRST`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Lsb,
    Msb,
}

impl ByteOrder {
    /// Raw `va.h` value
    pub fn to_raw(self) -> u32 {
        match self {
            ByteOrder::Lsb => 1,
            ByteOrder::Msb => 2,
        }
    }

    /// Parse a raw `va.h` value
    pub fn from_raw(value: u32) -> Option<Self> {
        match value {
            1 => Some(ByteOrder::Lsb),
            2 => Some(ByteOrder::Msb),
            _ => None,
        }
    }

    /// GStreamer `endianness` field value
    pub fn endianness(self) -> i32 {
        match self {
            ByteOrder::Lsb => 1234,
            ByteOrder::Msb => 4321,
        }
    }
}

/// Driver-reported image format (`VAImageFormat`)
///
/// The channel masks are only meaningful for RGB layouts; drivers leave them
/// zeroed for YUV formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaImageFormat {
    pub fourcc: FourCC,
    #[serde(default)]
    pub byte_order: ByteOrder,
    #[serde(default)]
    pub bits_per_pixel: u32,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub red_mask: u32,
    #[serde(default)]
    pub green_mask: u32,
    #[serde(default)]
    pub blue_mask: u32,
    #[serde(default)]
    pub alpha_mask: u32,
}

impl VaImageFormat {
    /// Descriptor for a YUV layout, which only carries a code and a size
    pub const fn yuv(fourcc: FourCC, bits_per_pixel: u32) -> Self {
        Self {
            fourcc,
            byte_order: ByteOrder::Lsb,
            bits_per_pixel,
            depth: 0,
            red_mask: 0,
            green_mask: 0,
            blue_mask: 0,
            alpha_mask: 0,
        }
    }

    /// Descriptor for a packed RGB layout
    pub const fn rgb(
        fourcc: FourCC,
        byte_order: ByteOrder,
        bits_per_pixel: u32,
        depth: u32,
        masks: [u32; 4],
    ) -> Self {
        Self {
            fourcc,
            byte_order,
            bits_per_pixel,
            depth,
            red_mask: masks[0],
            green_mask: masks[1],
            blue_mask: masks[2],
            alpha_mask: masks[3],
        }
    }

    /// Channel masks in red, green, blue, alpha order
    pub fn masks(&self) -> [u32; 4] {
        [self.red_mask, self.green_mask, self.blue_mask, self.alpha_mask]
    }

    /// Whether the byte order and all channel masks agree with `other`
    pub fn same_rgb_layout(&self, other: &Self) -> bool {
        self.byte_order == other.byte_order && self.masks() == other.masks()
    }
}

/// Per-format flags reported alongside subpicture formats
///
/// Only kept for diagnostics; they do not take part in capability
/// negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubpictureFlags(pub u32);

impl SubpictureFlags {
    /// `VA_SUBPICTURE_CHROMA_KEYING`
    pub const CHROMA_KEYING: u32 = 0x0001;
    /// `VA_SUBPICTURE_GLOBAL_ALPHA`
    pub const GLOBAL_ALPHA: u32 = 0x0002;
    /// `VA_SUBPICTURE_DESTINATION_IS_SCREEN_COORD`
    pub const SCREEN_COORDS: u32 = 0x0004;

    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }
}

impl fmt::Display for SubpictureFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::CHROMA_KEYING) {
            names.push("chroma-keying");
        }
        if self.contains(Self::GLOBAL_ALPHA) {
            names.push("global-alpha");
        }
        if self.contains(Self::SCREEN_COORDS) {
            names.push("screen-coords");
        }
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join("|"))
        }
    }
}
