// SPDX-License-Identifier: MPL-2.0

//! Image format registry and capability normalization
//!
//! Drivers report their image and subpicture formats as raw
//! [`VaImageFormat`] descriptors. This module turns those lists into ordered
//! capability sets:
//!
//! ```text
//! driver descriptors ──► normalize ──► identify (registry) ──► sort ──► caps
//! ```
//!
//! # Modules
//!
//! - [`fourcc`]: Four-character codes
//! - [`descriptor`]: Raw driver descriptors
//! - [`image_format`]: Canonical formats, family and score
//! - [`caps`]: Pipeline-facing capability descriptors
//! - [`normalize`]: Mapping of driver lists with YV12/I420 sibling synthesis
//! - [`sort`]: Negotiation order

pub mod caps;
pub mod descriptor;
pub mod fourcc;
pub mod image_format;
pub mod normalize;
pub mod sort;

pub use caps::{CapsDescriptor, CapsLayout, CapsSet};
pub use descriptor::{ByteOrder, SubpictureFlags, VaImageFormat};
pub use fourcc::FourCC;
pub use image_format::{FormatFamily, ImageFormat, identify};
pub use normalize::normalize;
pub use sort::sort_formats;
