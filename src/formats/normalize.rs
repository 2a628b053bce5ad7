// SPDX-License-Identifier: MPL-2.0

//! Normalization of driver-reported format lists

use super::descriptor::VaImageFormat;
use super::image_format::{ImageFormat, identify};
use tracing::debug;

/// Map raw driver descriptors to canonical formats.
///
/// Unrecognized descriptors are skipped. Mapped formats keep the driver's
/// order and duplicates. If the driver reports exactly one of YV12 and I420,
/// the other one is appended: both are the same planar layout with the
/// chroma planes swapped, and downstream elements may require either.
pub fn normalize(raw: &[VaImageFormat]) -> Vec<ImageFormat> {
    let mut formats = Vec::with_capacity(raw.len() + 1);
    let mut has_yv12 = false;
    let mut has_i420 = false;

    for desc in raw {
        let Some(format) = identify(desc) else {
            debug!(fourcc = %desc.fourcc, "Unsupported driver format");
            continue;
        };

        match format {
            ImageFormat::YV12 => has_yv12 = true,
            ImageFormat::I420 => has_i420 = true,
            _ => {}
        }
        formats.push(format);
    }

    if has_yv12 && !has_i420 {
        debug!("Driver lacks I420, advertising it next to YV12");
        formats.push(ImageFormat::I420);
    } else if has_i420 && !has_yv12 {
        debug!("Driver lacks YV12, advertising it next to I420");
        formats.push(ImageFormat::YV12);
    }

    formats
}

/// Drop repeated formats, keeping the first occurrence of each
pub fn dedup_preserving_order(formats: &mut Vec<ImageFormat>) {
    let mut seen = Vec::with_capacity(formats.len());
    formats.retain(|format| {
        if seen.contains(format) {
            false
        } else {
            seen.push(*format);
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FourCC;

    fn va(formats: &[ImageFormat]) -> Vec<VaImageFormat> {
        formats.iter().map(|f| f.va_format()).collect()
    }

    #[test]
    fn test_yv12_only_synthesizes_i420() {
        let out = normalize(&va(&[ImageFormat::YV12, ImageFormat::BGRA]));
        assert_eq!(
            out,
            vec![ImageFormat::YV12, ImageFormat::BGRA, ImageFormat::I420]
        );
    }

    #[test]
    fn test_i420_only_synthesizes_yv12() {
        let out = normalize(&va(&[ImageFormat::NV12, ImageFormat::I420]));
        assert_eq!(
            out,
            vec![ImageFormat::NV12, ImageFormat::I420, ImageFormat::YV12]
        );
    }

    #[test]
    fn test_both_or_neither_adds_nothing() {
        let both = [ImageFormat::I420, ImageFormat::YV12, ImageFormat::RGBA];
        assert_eq!(normalize(&va(&both)), both.to_vec());

        let neither = [ImageFormat::NV12, ImageFormat::UYVY, ImageFormat::ARGB];
        assert_eq!(normalize(&va(&neither)), neither.to_vec());

        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_unknown_formats_are_skipped() {
        let mut raw = va(&[ImageFormat::NV12]);
        raw.insert(0, VaImageFormat::yuv(FourCC::from_bytes(*b"P010"), 24));
        raw.push(VaImageFormat::yuv(FourCC::from_bytes(*b"IMC3"), 12));
        assert_eq!(normalize(&raw), vec![ImageFormat::NV12]);
    }

    #[test]
    fn test_driver_duplicates_are_preserved() {
        let out = normalize(&va(&[ImageFormat::YV12, ImageFormat::NV12, ImageFormat::YV12]));
        assert_eq!(
            out,
            vec![
                ImageFormat::YV12,
                ImageFormat::NV12,
                ImageFormat::YV12,
                ImageFormat::I420
            ]
        );
    }

    #[test]
    fn test_exactly_one_sibling_always_yields_both() {
        for sibling in [ImageFormat::YV12, ImageFormat::I420] {
            for other in ImageFormat::ALL {
                if matches!(other, ImageFormat::YV12 | ImageFormat::I420) {
                    continue;
                }
                let out = normalize(&va(&[other, sibling, other]));
                assert!(out.contains(&ImageFormat::YV12));
                assert!(out.contains(&ImageFormat::I420));
                assert_eq!(out.len(), 4);
            }
        }
    }

    #[test]
    fn test_dedup_preserving_order() {
        let mut formats = vec![
            ImageFormat::YV12,
            ImageFormat::NV12,
            ImageFormat::YV12,
            ImageFormat::I420,
            ImageFormat::NV12,
        ];
        dedup_preserving_order(&mut formats);
        assert_eq!(
            formats,
            vec![ImageFormat::YV12, ImageFormat::NV12, ImageFormat::I420]
        );
    }
}
