// SPDX-License-Identifier: MPL-2.0

//! Pipeline-facing capability descriptors
//!
//! Descriptors render as GStreamer caps strings. With the `gstreamer` cargo
//! feature they also convert into [`gstreamer::Caps`].

use super::descriptor::{ByteOrder, VaImageFormat};
use super::fourcc::FourCC;
use std::fmt;

#[cfg(feature = "gstreamer")]
use gstreamer as gst;

/// Unconstrained size and framerate fields appended to every raw caps entry
const RAW_CAPS_RANGES: &str = "width=(int)[ 1, 2147483647 ], \
    height=(int)[ 1, 2147483647 ], \
    framerate=(fraction)[ 0/1, 2147483647/1 ]";

/// Pixel layout carried by a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapsLayout {
    Yuv {
        bits_per_pixel: u32,
    },
    Rgb {
        bits_per_pixel: u32,
        depth: u32,
        byte_order: ByteOrder,
        /// Red, green, blue, alpha
        masks: [u32; 4],
    },
    Gray {
        bits_per_pixel: u32,
    },
}

/// One negotiable raw video capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapsDescriptor {
    /// GStreamer format name (e.g. "NV12", "BGRx")
    pub format: &'static str,
    /// Driver fourcc this descriptor stands for
    pub fourcc: FourCC,
    pub layout: CapsLayout,
}

impl CapsDescriptor {
    /// Check if this descriptor represents the driver format `desc`
    pub fn matches(&self, desc: &VaImageFormat) -> bool {
        if self.fourcc != desc.fourcc {
            return false;
        }
        match self.layout {
            CapsLayout::Yuv { .. } | CapsLayout::Gray { .. } => true,
            CapsLayout::Rgb {
                byte_order, masks, ..
            } => byte_order == desc.byte_order && masks == desc.masks(),
        }
    }

    /// Format as a GStreamer caps string
    pub fn to_caps_string(&self) -> String {
        format!(
            "video/x-raw, format=(string){}, {}",
            self.format, RAW_CAPS_RANGES
        )
    }

    /// Build the equivalent GStreamer caps.
    ///
    /// GStreamer must have been initialized with `gstreamer::init()`.
    #[cfg(feature = "gstreamer")]
    pub fn to_gst_caps(&self) -> gst::Caps {
        let format = gstreamer_video::VideoFormat::from_string(self.format);
        gstreamer_video::VideoCapsBuilder::new()
            .format(format)
            .build()
    }
}

impl fmt::Display for CapsDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_caps_string())
    }
}

/// Ordered list of capability descriptors, in negotiation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapsSet(Vec<CapsDescriptor>);

impl CapsSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, caps: CapsDescriptor) {
        self.0.push(caps);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CapsDescriptor> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[CapsDescriptor] {
        &self.0
    }

    /// GStreamer format names in order
    pub fn format_names(&self) -> Vec<&'static str> {
        self.0.iter().map(|c| c.format).collect()
    }

    /// Check if any entry represents the driver format `desc`
    pub fn matches(&self, desc: &VaImageFormat) -> bool {
        self.0.iter().any(|c| c.matches(desc))
    }

    /// Merge every entry into one GStreamer caps object, keeping the order.
    ///
    /// GStreamer must have been initialized with `gstreamer::init()`.
    #[cfg(feature = "gstreamer")]
    pub fn to_gst_caps(&self) -> gst::Caps {
        let mut caps = gst::Caps::new_empty();
        {
            let caps_mut = caps.make_mut();
            for entry in &self.0 {
                caps_mut.append(entry.to_gst_caps());
            }
        }
        caps
    }
}

impl FromIterator<CapsDescriptor> for CapsSet {
    fn from_iter<I: IntoIterator<Item = CapsDescriptor>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CapsSet {
    type Item = &'a CapsDescriptor;
    type IntoIter = std::slice::Iter<'a, CapsDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for CapsSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "EMPTY");
        }
        let entries: Vec<String> = self.0.iter().map(|c| c.to_caps_string()).collect();
        write!(f, "{}", entries.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::ImageFormat;

    #[test]
    fn test_caps_string() {
        let caps = ImageFormat::NV12.caps();
        assert!(
            caps[0]
                .to_caps_string()
                .starts_with("video/x-raw, format=(string)NV12, width=(int)[ 1, 2147483647 ]")
        );
    }

    #[test]
    fn test_rgb_descriptor_rejects_other_packing() {
        let caps = ImageFormat::RGBA.caps();
        assert!(caps[0].matches(&ImageFormat::RGBA.va_format()));
        // Same masks, different code
        assert!(!caps[0].matches(&ImageFormat::ABGR.va_format()));
        let mut desc = ImageFormat::RGBA.va_format();
        desc.alpha_mask = 0;
        assert!(!caps[0].matches(&desc));
    }

    #[test]
    fn test_caps_set_order_and_display() {
        let set: CapsSet = [ImageFormat::YV12, ImageFormat::BGRA]
            .iter()
            .flat_map(|f| f.caps())
            .collect();
        assert_eq!(set.format_names(), vec!["YV12", "BGRA"]);
        let rendered = set.to_string();
        let yv12 = rendered.find("YV12").unwrap();
        let bgra = rendered.find("BGRA").unwrap();
        assert!(yv12 < bgra);
        assert_eq!(CapsSet::new().to_string(), "EMPTY");
    }

    #[cfg(feature = "gstreamer")]
    #[test]
    fn test_gst_caps_conversion() {
        gst::init().unwrap();
        let set: CapsSet = [ImageFormat::I420, ImageFormat::BGRX]
            .iter()
            .flat_map(|f| f.caps())
            .collect();
        let caps = set.to_gst_caps();
        assert_eq!(caps.size(), 2);
        let first = caps.structure(0).unwrap();
        assert_eq!(first.get::<&str>("format").unwrap(), "I420");
    }
}
