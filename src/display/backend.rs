// SPDX-License-Identifier: MPL-2.0

//! Collaborator contracts of the display session
//!
//! ```text
//! ┌─────────────────────┐
//! │       Display       │  ← Discovery, capability queries
//! └──────────┬──────────┘
//!            │ open / get / close / lock
//!            ▼
//! ┌─────────────────────┐
//! │   DisplayBackend    │  ← Windowing-system specific (X11, DRM, ...)
//! └──────────┬──────────┘
//!            │ native handle
//!            ▼
//! ┌─────────────────────┐
//! │    NativeDisplay    │  ← VA driver entry points
//! └─────────────────────┘
//! ```

use super::profile::Profile;
use crate::errors::VaResult;
use crate::formats::{SubpictureFlags, VaImageFormat};
use std::fmt;
use std::sync::Arc;

/// Driver API version reported by `vaInitialize()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApiVersion {
    pub major: i32,
    pub minor: i32,
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Native display handle: the VA driver entry points reachable through it
///
/// Every call reports failure through a [`VaStatus`](crate::errors::VaStatus).
/// The display never retries a failed call.
pub trait NativeDisplay: Send + Sync {
    // ===== Connection =====

    /// Initialize the driver connection (`vaInitialize`)
    fn initialize(&self) -> VaResult<ApiVersion>;

    /// Terminate the driver connection (`vaTerminate`)
    ///
    /// Only called after a successful [`initialize`](Self::initialize).
    fn terminate(&self);

    // ===== Queries =====

    /// Supported codec profiles (`vaQueryConfigProfiles`)
    fn query_config_profiles(&self) -> VaResult<Vec<Profile>>;

    /// Supported image formats (`vaQueryImageFormats`)
    fn query_image_formats(&self) -> VaResult<Vec<VaImageFormat>>;

    /// Supported subpicture formats with their flags (`vaQuerySubpictureFormats`)
    fn query_subpicture_formats(&self) -> VaResult<Vec<(VaImageFormat, SubpictureFlags)>>;

    // ===== Metadata =====

    /// Driver vendor string (`vaQueryVendorString`), for diagnostics
    fn vendor_string(&self) -> Option<String> {
        None
    }
}

/// External mutual-exclusion scheme for the native handle
///
/// Backends that share their windowing-system connection with other code
/// provide one of these so [`Display::lock`](super::Display::lock) takes the
/// shared lock instead of the display's own mutex.
pub trait DisplayLock: Send + Sync {
    fn lock(&self);
    fn unlock(&self);
}

/// Windowing-system backend that opens and owns a native display handle
///
/// Only used when the display is constructed with
/// [`Display::open`](super::Display::open); a display built from an existing
/// handle never calls into a backend.
pub trait DisplayBackend: Send + Sync {
    /// Establish the windowing-system connection
    ///
    /// # Returns
    /// * `true` - Connection established
    /// * `false` - Connection failed, the display is not created
    fn open_display(&mut self) -> bool;

    /// Native handle of the opened connection
    ///
    /// # Returns
    /// * `Some(handle)` - The handle to run discovery on
    /// * `None` - No handle available, the display is not created
    fn get_display(&self) -> Option<Arc<dyn NativeDisplay>>;

    /// Release the windowing-system connection
    ///
    /// Called exactly once during teardown, after the driver is terminated.
    fn close_display(&mut self);

    /// Override point for [`Display::lock`](super::Display::lock).
    ///
    /// `None` (the default) selects the display's internal mutex.
    fn display_lock(&self) -> Option<&dyn DisplayLock> {
        None
    }

    /// Backend name used in log output
    fn name(&self) -> &str {
        "backend"
    }
}
