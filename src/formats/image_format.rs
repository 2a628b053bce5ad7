// SPDX-License-Identifier: GPL-3.0-only

//! Canonical image formats and the driver lookup table

use super::caps::{CapsDescriptor, CapsLayout};
use super::descriptor::{ByteOrder, VaImageFormat};
use super::fourcc::{self, FourCC};
use serde::{Deserialize, Serialize};
use std::fmt;

const MASKS_ARGB: [u32; 4] = [0x00ff0000, 0x0000ff00, 0x000000ff, 0xff000000];
const MASKS_ABGR: [u32; 4] = [0x000000ff, 0x0000ff00, 0x00ff0000, 0xff000000];
const MASKS_XRGB: [u32; 4] = [0x00ff0000, 0x0000ff00, 0x000000ff, 0x00000000];
const MASKS_XBGR: [u32; 4] = [0x000000ff, 0x0000ff00, 0x00ff0000, 0x00000000];

/// Pixel family used to rank formats during negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatFamily {
    Yuv,
    Rgb,
    /// Neither YUV nor RGB (e.g. single channel luma)
    Other,
}

impl fmt::Display for FormatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatFamily::Yuv => write!(f, "YUV"),
            FormatFamily::Rgb => write!(f, "RGB"),
            FormatFamily::Other => write!(f, "other"),
        }
    }
}

/// Image formats recognized by the display layer
///
/// Every variant maps to exactly one entry of a fixed table; the position in
/// that table is the negotiation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    // ===== Planar/Semi-planar YUV 4:2:0 =====
    /// NV12 4:2:0 - Semi-planar YUV (Y plane + interleaved UV)
    NV12,
    /// YV12 4:2:0 - Planar YUV (Y + V + U planes)
    YV12,
    /// I420 4:2:0 - Planar YUV (Y + U + V planes)
    I420,

    // ===== Packed YUV =====
    /// YUY2 4:2:2 - Packed YUV (Y0 U Y1 V byte order)
    YUY2,
    /// UYVY 4:2:2 - Packed YUV (U Y0 V Y1 byte order)
    UYVY,
    /// AYUV 4:4:4 - Packed YUV with alpha
    AYUV,

    // ===== RGB =====
    /// ARGB 32-bit, big-endian packing
    ARGB,
    /// ABGR 32-bit, big-endian packing
    ABGR,
    /// BGRA 32-bit, little-endian packing
    BGRA,
    /// RGBA 32-bit, little-endian packing
    RGBA,
    /// BGRx 32-bit with padding byte
    BGRX,
    /// RGBx 32-bit with padding byte
    RGBX,

    // ===== Other =====
    /// 8-bit luma only
    GRAY8,
}

impl ImageFormat {
    /// All formats in table order (ascending score)
    pub const ALL: [ImageFormat; 13] = [
        ImageFormat::NV12,
        ImageFormat::YV12,
        ImageFormat::I420,
        ImageFormat::YUY2,
        ImageFormat::UYVY,
        ImageFormat::AYUV,
        ImageFormat::ARGB,
        ImageFormat::ABGR,
        ImageFormat::BGRA,
        ImageFormat::RGBA,
        ImageFormat::BGRX,
        ImageFormat::RGBX,
        ImageFormat::GRAY8,
    ];

    /// Canonical driver descriptor for this format
    pub fn va_format(self) -> VaImageFormat {
        match self {
            Self::NV12 => VaImageFormat::yuv(fourcc::NV12, 12),
            Self::YV12 => VaImageFormat::yuv(fourcc::YV12, 12),
            Self::I420 => VaImageFormat::yuv(fourcc::I420, 12),
            Self::YUY2 => VaImageFormat::yuv(fourcc::YUY2, 16),
            Self::UYVY => VaImageFormat::yuv(fourcc::UYVY, 16),
            Self::AYUV => VaImageFormat::yuv(fourcc::AYUV, 32),
            Self::ARGB => VaImageFormat::rgb(fourcc::ARGB, ByteOrder::Msb, 32, 32, MASKS_ARGB),
            Self::ABGR => VaImageFormat::rgb(fourcc::ABGR, ByteOrder::Msb, 32, 32, MASKS_ABGR),
            Self::BGRA => VaImageFormat::rgb(fourcc::BGRA, ByteOrder::Lsb, 32, 32, MASKS_ARGB),
            Self::RGBA => VaImageFormat::rgb(fourcc::RGBA, ByteOrder::Lsb, 32, 32, MASKS_ABGR),
            Self::BGRX => VaImageFormat::rgb(fourcc::BGRX, ByteOrder::Lsb, 32, 24, MASKS_XRGB),
            Self::RGBX => VaImageFormat::rgb(fourcc::RGBX, ByteOrder::Lsb, 32, 24, MASKS_XBGR),
            Self::GRAY8 => VaImageFormat::yuv(fourcc::Y800, 8),
        }
    }

    /// Four-character code of this format
    pub fn fourcc(self) -> FourCC {
        self.va_format().fourcc
    }

    pub fn family(self) -> FormatFamily {
        match self {
            Self::NV12 | Self::YV12 | Self::I420 | Self::YUY2 | Self::UYVY | Self::AYUV => {
                FormatFamily::Yuv
            }
            Self::ARGB | Self::ABGR | Self::BGRA | Self::RGBA | Self::BGRX | Self::RGBX => {
                FormatFamily::Rgb
            }
            Self::GRAY8 => FormatFamily::Other,
        }
    }

    /// Check if this is a YUV format
    pub fn is_yuv(self) -> bool {
        self.family() == FormatFamily::Yuv
    }

    /// Check if this is an RGB format
    pub fn is_rgb(self) -> bool {
        self.family() == FormatFamily::Rgb
    }

    /// Negotiation score (lower = higher priority within a family)
    pub fn score(self) -> u32 {
        match self {
            Self::NV12 => 0,
            Self::YV12 => 1,
            Self::I420 => 2,
            Self::YUY2 => 3,
            Self::UYVY => 4,
            Self::AYUV => 5,
            Self::ARGB => 6,
            Self::ABGR => 7,
            Self::BGRA => 8,
            Self::RGBA => 9,
            Self::BGRX => 10,
            Self::RGBX => 11,
            Self::GRAY8 => 12,
        }
    }

    /// GStreamer `video/x-raw` format name
    pub fn gst_format_name(self) -> &'static str {
        match self {
            Self::NV12 => "NV12",
            Self::YV12 => "YV12",
            Self::I420 => "I420",
            Self::YUY2 => "YUY2",
            Self::UYVY => "UYVY",
            Self::AYUV => "AYUV",
            Self::ARGB => "ARGB",
            Self::ABGR => "ABGR",
            Self::BGRA => "BGRA",
            Self::RGBA => "RGBA",
            Self::BGRX => "BGRx",
            Self::RGBX => "RGBx",
            Self::GRAY8 => "GRAY8",
        }
    }

    /// Parse a format from its name or fourcc (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "NV12" => Some(Self::NV12),
            "YV12" => Some(Self::YV12),
            "I420" | "IYUV" => Some(Self::I420),
            "YUY2" | "YUYV" => Some(Self::YUY2),
            "UYVY" => Some(Self::UYVY),
            "AYUV" => Some(Self::AYUV),
            "ARGB" => Some(Self::ARGB),
            "ABGR" => Some(Self::ABGR),
            "BGRA" => Some(Self::BGRA),
            "RGBA" => Some(Self::RGBA),
            "BGRX" => Some(Self::BGRX),
            "RGBX" => Some(Self::RGBX),
            "GRAY8" | "Y800" | "GREY" | "Y8" => Some(Self::GRAY8),
            _ => None,
        }
    }

    /// Table entry carrying `fourcc`.
    ///
    /// Only the code is compared; use [`identify`] to also check an RGB
    /// layout reported by the driver.
    pub fn from_fourcc(fourcc: FourCC) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.va_format().fourcc == fourcc)
    }

    /// Expand into pipeline-facing capability descriptors.
    ///
    /// A format may be representable by several descriptors; every current
    /// table entry yields exactly one.
    pub fn caps(self) -> Vec<CapsDescriptor> {
        let va = self.va_format();
        let layout = match self.family() {
            FormatFamily::Yuv => CapsLayout::Yuv {
                bits_per_pixel: va.bits_per_pixel,
            },
            FormatFamily::Rgb => CapsLayout::Rgb {
                bits_per_pixel: va.bits_per_pixel,
                depth: va.depth,
                byte_order: va.byte_order,
                masks: va.masks(),
            },
            FormatFamily::Other => CapsLayout::Gray {
                bits_per_pixel: va.bits_per_pixel,
            },
        };
        vec![CapsDescriptor {
            format: self.gst_format_name(),
            fourcc: va.fourcc,
            layout,
        }]
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gst_format_name())
    }
}

/// Map a driver descriptor to a canonical format.
///
/// YUV and luma entries match on the fourcc alone. RGB entries also require
/// the byte order and every channel mask to agree, since drivers reuse the
/// same code for differently packed pixels.
pub fn identify(desc: &VaImageFormat) -> Option<ImageFormat> {
    ImageFormat::ALL.iter().copied().find(|format| {
        let canonical = format.va_format();
        canonical.fourcc == desc.fourcc && (!format.is_rgb() || canonical.same_rgb_layout(desc))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_every_table_entry() {
        for format in ImageFormat::ALL {
            assert_eq!(identify(&format.va_format()), Some(format));
        }
    }

    #[test]
    fn test_identify_yuv_ignores_layout_fields() {
        let mut desc = VaImageFormat::yuv(fourcc::YV12, 12);
        desc.byte_order = ByteOrder::Msb;
        desc.bits_per_pixel = 0;
        assert_eq!(identify(&desc), Some(ImageFormat::YV12));
    }

    #[test]
    fn test_identify_rgb_requires_matching_masks() {
        let mut desc = ImageFormat::BGRA.va_format();
        desc.red_mask = 0x000000ff;
        assert_eq!(identify(&desc), None);

        let mut desc = ImageFormat::BGRA.va_format();
        desc.byte_order = ByteOrder::Msb;
        assert_eq!(identify(&desc), None);
    }

    #[test]
    fn test_identify_unknown_fourcc() {
        let desc = VaImageFormat::yuv(FourCC::from_bytes(*b"P010"), 24);
        assert_eq!(identify(&desc), None);
    }

    #[test]
    fn test_identify_is_deterministic() {
        let inputs = [
            ImageFormat::NV12.va_format(),
            ImageFormat::RGBX.va_format(),
            VaImageFormat::yuv(FourCC::from_bytes(*b"IMC3"), 12),
        ];
        for desc in &inputs {
            let first = identify(desc);
            for _ in 0..8 {
                assert_eq!(identify(desc), first);
            }
        }
    }

    #[test]
    fn test_family_is_exclusive() {
        for format in ImageFormat::ALL {
            assert!(!(format.is_yuv() && format.is_rgb()), "{} is both", format);
        }
        assert!(ImageFormat::YV12.is_yuv());
        assert!(ImageFormat::BGRA.is_rgb());
        assert!(!ImageFormat::GRAY8.is_yuv());
        assert!(!ImageFormat::GRAY8.is_rgb());
    }

    #[test]
    fn test_score_follows_table_order() {
        for (index, format) in ImageFormat::ALL.iter().enumerate() {
            assert_eq!(format.score() as usize, index);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ImageFormat::from_name("i420"), Some(ImageFormat::I420));
        assert_eq!(ImageFormat::from_name("IYUV"), Some(ImageFormat::I420));
        assert_eq!(ImageFormat::from_name("BGRx"), Some(ImageFormat::BGRX));
        assert_eq!(ImageFormat::from_name("MJPG"), None);
    }

    #[test]
    fn test_from_fourcc() {
        for format in ImageFormat::ALL {
            assert_eq!(ImageFormat::from_fourcc(format.fourcc()), Some(format));
        }
        assert_eq!(ImageFormat::from_fourcc(fourcc::Y800), Some(ImageFormat::GRAY8));
        assert_eq!(ImageFormat::from_fourcc(FourCC::from_bytes(*b"P010")), None);
    }

    #[test]
    fn test_caps_round_trip() {
        for format in ImageFormat::ALL {
            let desc = format.va_format();
            let identified = identify(&desc).unwrap();
            let caps = identified.caps();
            assert!(!caps.is_empty());
            assert!(
                caps.iter().any(|c| c.matches(&desc)),
                "no equivalent caps for {}",
                format
            );
        }
    }
}
