// SPDX-License-Identifier: MPL-2.0

//! VA-API display abstraction
//!
//! This library wraps a VA-API native display handle, discovers what the
//! driver supports and normalizes it into ordered, negotiation-ready
//! capability sets.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`display`]: Display session, discovery and capability queries
//! - [`formats`]: Image format registry, normalization and sorting
//! - [`backends`]: Backends that open native display handles
//! - [`config`]: Discovery options
//! - [`errors`]: Driver status codes and display errors
//!
//! # Example
//!
//! ```no_run
//! use vaapi_display::backends::fixture::FixtureBackend;
//! use vaapi_display::{Display, ImageFormat};
//!
//! let display = Display::open(FixtureBackend::from_path("driver.json"))?;
//! if display.has_image_format(ImageFormat::NV12) {
//!     println!("{}", display.image_caps());
//! }
//! # Ok::<(), vaapi_display::DisplayError>(())
//! ```

pub mod backends;
pub mod config;
pub mod display;
pub mod errors;
pub mod formats;

// Re-export commonly used types
pub use config::DiscoveryConfig;
pub use display::{Capabilities, Display, DisplayBackend, NativeDisplay, Profile};
pub use errors::{DiscoveryStage, DisplayError, DisplayResult, VaStatus};
pub use formats::{CapsSet, FormatFamily, ImageFormat, VaImageFormat};
