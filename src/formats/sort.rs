// SPDX-License-Identifier: MPL-2.0

//! Negotiation ordering of capability sets

use super::image_format::{FormatFamily, ImageFormat};
use std::cmp::Ordering;

/// Compare two formats for negotiation order.
///
/// Formats of the preferred family come first, then ties are broken by
/// score (lower first).
pub fn compare_formats(a: ImageFormat, b: ImageFormat, preferred: FormatFamily) -> Ordering {
    let a_preferred = a.family() == preferred;
    let b_preferred = b.family() == preferred;

    b_preferred
        .cmp(&a_preferred)
        .then_with(|| a.score().cmp(&b.score()))
}

/// Sort formats in place into negotiation order (stable)
///
/// Image format lists prefer [`FormatFamily::Yuv`], subpicture lists prefer
/// [`FormatFamily::Rgb`].
pub fn sort_formats(formats: &mut [ImageFormat], preferred: FormatFamily) {
    formats.sort_by(|a, b| compare_formats(*a, *b, preferred));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_negotiation_ordered(formats: &[ImageFormat], preferred: FormatFamily) -> bool {
        formats
            .windows(2)
            .all(|w| compare_formats(w[0], w[1], preferred) != Ordering::Greater)
    }

    #[test]
    fn test_yuv_preferred() {
        let mut formats = vec![
            ImageFormat::BGRA,
            ImageFormat::I420,
            ImageFormat::GRAY8,
            ImageFormat::NV12,
            ImageFormat::ARGB,
            ImageFormat::YV12,
        ];
        sort_formats(&mut formats, FormatFamily::Yuv);
        assert_eq!(
            formats,
            vec![
                ImageFormat::NV12,
                ImageFormat::YV12,
                ImageFormat::I420,
                ImageFormat::ARGB,
                ImageFormat::BGRA,
                ImageFormat::GRAY8,
            ]
        );
    }

    #[test]
    fn test_rgb_preferred() {
        let mut formats = vec![
            ImageFormat::NV12,
            ImageFormat::RGBA,
            ImageFormat::GRAY8,
            ImageFormat::ARGB,
            ImageFormat::AYUV,
        ];
        sort_formats(&mut formats, FormatFamily::Rgb);
        assert_eq!(
            formats,
            vec![
                ImageFormat::ARGB,
                ImageFormat::RGBA,
                ImageFormat::NV12,
                ImageFormat::AYUV,
                ImageFormat::GRAY8,
            ]
        );
    }

    #[test]
    fn test_preferred_family_precedes_everything_else() {
        let mut formats: Vec<ImageFormat> = ImageFormat::ALL.iter().rev().copied().collect();
        sort_formats(&mut formats, FormatFamily::Yuv);
        let first_non_yuv = formats.iter().position(|f| !f.is_yuv()).unwrap();
        assert!(formats[..first_non_yuv].iter().all(|f| f.is_yuv()));
        assert!(formats[first_non_yuv..].iter().all(|f| !f.is_yuv()));
        assert!(is_negotiation_ordered(&formats, FormatFamily::Yuv));
    }

    #[test]
    fn test_sort_keeps_duplicates_adjacent() {
        let mut formats = vec![
            ImageFormat::YV12,
            ImageFormat::BGRA,
            ImageFormat::YV12,
            ImageFormat::I420,
        ];
        sort_formats(&mut formats, FormatFamily::Yuv);
        assert_eq!(
            formats,
            vec![
                ImageFormat::YV12,
                ImageFormat::YV12,
                ImageFormat::I420,
                ImageFormat::BGRA
            ]
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut formats = vec![ImageFormat::RGBX, ImageFormat::UYVY, ImageFormat::NV12];
        sort_formats(&mut formats, FormatFamily::Rgb);
        let once = formats.clone();
        sort_formats(&mut formats, FormatFamily::Rgb);
        assert_eq!(formats, once);
    }
}
