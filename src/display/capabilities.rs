// SPDX-License-Identifier: MPL-2.0

//! Frozen capability data gathered by discovery

use super::backend::ApiVersion;
use super::profile::{Profile, ProfileSet};
use crate::formats::{CapsSet, ImageFormat};

/// Everything discovery learned about a driver
///
/// Built once and never mutated afterwards; shared between threads behind an
/// `Arc`. After a failed discovery it holds whatever was populated before the
/// failure and [`is_complete`](Self::is_complete) returns false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub(crate) version: Option<ApiVersion>,
    pub(crate) vendor: Option<String>,
    pub(crate) profiles: ProfileSet,
    pub(crate) image_formats: Vec<ImageFormat>,
    pub(crate) subpicture_formats: Vec<ImageFormat>,
    pub(crate) complete: bool,
}

impl Capabilities {
    /// Whether all three queries succeeded
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Driver API version, once initialized
    pub fn api_version(&self) -> Option<ApiVersion> {
        self.version
    }

    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    /// Image formats in negotiation order (YUV first)
    pub fn image_formats(&self) -> &[ImageFormat] {
        &self.image_formats
    }

    /// Subpicture formats in negotiation order (RGB first)
    pub fn subpicture_formats(&self) -> &[ImageFormat] {
        &self.subpicture_formats
    }

    pub fn has_profile(&self, profile: Profile) -> bool {
        self.profiles.contains(profile)
    }

    pub fn has_image_format(&self, format: ImageFormat) -> bool {
        self.image_formats.contains(&format)
    }

    pub fn has_subpicture_format(&self, format: ImageFormat) -> bool {
        self.subpicture_formats.contains(&format)
    }

    /// Image capabilities, expanded from every image format in order
    pub fn image_caps(&self) -> CapsSet {
        formats_to_caps(&self.image_formats)
    }

    /// Subpicture capabilities, expanded from every subpicture format in order
    pub fn subpicture_caps(&self) -> CapsSet {
        formats_to_caps(&self.subpicture_formats)
    }
}

fn formats_to_caps(formats: &[ImageFormat]) -> CapsSet {
    formats.iter().flat_map(|format| format.caps()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_capabilities() {
        let caps = Capabilities::default();
        assert!(!caps.is_complete());
        assert!(!caps.has_profile(Profile::H264_MAIN));
        assert!(!caps.has_image_format(ImageFormat::NV12));
        assert!(caps.image_caps().is_empty());
        assert!(caps.subpicture_caps().is_empty());
    }

    #[test]
    fn test_caps_follow_set_order() {
        let caps = Capabilities {
            image_formats: vec![ImageFormat::YV12, ImageFormat::I420, ImageFormat::BGRA],
            subpicture_formats: vec![ImageFormat::ARGB, ImageFormat::AYUV],
            complete: true,
            ..Default::default()
        };
        assert_eq!(caps.image_caps().format_names(), vec!["YV12", "I420", "BGRA"]);
        assert_eq!(caps.subpicture_caps().format_names(), vec!["ARGB", "AYUV"]);
        assert!(caps.has_subpicture_format(ImageFormat::AYUV));
        assert!(!caps.has_subpicture_format(ImageFormat::YV12));
    }
}
