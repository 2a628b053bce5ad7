// SPDX-License-Identifier: MPL-2.0

//! VA display session
//!
//! A [`Display`] wraps one native display handle, runs capability discovery
//! once at construction and answers capability queries afterwards.
//!
//! # Discovery
//!
//! 1. Open the backend connection (only for [`Display::open`])
//! 2. Initialize the driver
//! 3. Query profiles, kept in driver order
//! 4. Query image formats, normalize and sort YUV first
//! 5. Query subpicture formats, normalize and sort RGB first
//!
//! A failing driver call stops discovery. The driver connection is torn down
//! and the caller receives [`DisplayError::Discovery`] holding the partial
//! capabilities; a failed display is never handed out.

pub mod backend;
pub mod capabilities;
pub mod lock;
pub mod profile;
pub mod state;

pub use backend::{ApiVersion, DisplayBackend, DisplayLock, NativeDisplay};
pub use capabilities::Capabilities;
pub use lock::{ConditionLock, DisplayGuard};
pub use profile::{Profile, ProfileSet};
pub use state::DisplayState;

use crate::config::DiscoveryConfig;
use crate::errors::{DiscoveryStage, DisplayError, DisplayResult, VaStatus};
use crate::formats::normalize::dedup_preserving_order;
use crate::formats::{CapsSet, FormatFamily, ImageFormat, VaImageFormat, normalize, sort_formats};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// A populated VA display session
///
/// Only exists in the populated state. Dropping it terminates the driver
/// connection and, if the display opened the handle itself, closes the
/// backend connection.
pub struct Display {
    handle: Arc<dyn NativeDisplay>,
    /// Present when this display opened the handle and must close it
    backend: Option<Box<dyn DisplayBackend>>,
    capabilities: Arc<Capabilities>,
    /// Caller-supplied lock for a display built from an existing handle
    external_lock: Option<Arc<dyn DisplayLock>>,
    mutex: Mutex<()>,
}

impl Display {
    // ===== Construction =====

    /// Create a display from an already opened native handle
    ///
    /// The caller keeps ownership of the handle: teardown terminates the
    /// driver connection but does not close anything else.
    pub fn new_with_handle(handle: Arc<dyn NativeDisplay>) -> DisplayResult<Self> {
        Self::new_with_handle_and_config(handle, &DiscoveryConfig::default())
    }

    /// Same as [`new_with_handle`](Self::new_with_handle) with explicit options
    pub fn new_with_handle_and_config(
        handle: Arc<dyn NativeDisplay>,
        config: &DiscoveryConfig,
    ) -> DisplayResult<Self> {
        info!("Creating display from existing native handle");
        Self::create(handle, None, None, DisplayState::Opening, config)
    }

    /// Same as [`new_with_handle`](Self::new_with_handle), serializing
    /// [`lock`](Self::lock) through `lock` instead of the internal mutex
    ///
    /// For handles whose windowing-system connection is shared with code
    /// that already has its own locking scheme.
    pub fn new_with_handle_and_lock(
        handle: Arc<dyn NativeDisplay>,
        lock: Arc<dyn DisplayLock>,
        config: &DiscoveryConfig,
    ) -> DisplayResult<Self> {
        info!("Creating display from existing native handle with external lock");
        Self::create(handle, None, Some(lock), DisplayState::Opening, config)
    }

    /// Open a native handle through `backend` and create a display owning it
    pub fn open<B: DisplayBackend + 'static>(backend: B) -> DisplayResult<Self> {
        Self::open_with_config(Box::new(backend), &DiscoveryConfig::default())
    }

    /// Same as [`open`](Self::open) with explicit options
    pub fn open_with_config(
        mut backend: Box<dyn DisplayBackend>,
        config: &DiscoveryConfig,
    ) -> DisplayResult<Self> {
        let mut state = DisplayState::Unopened;
        transition(&mut state, DisplayState::Opening);
        info!(backend = backend.name(), "Opening display");

        if !backend.open_display() {
            warn!(backend = backend.name(), "Backend failed to open display");
            transition(&mut state, DisplayState::Failed);
            return Err(DisplayError::OpenFailed(backend.name().to_string()));
        }

        let Some(handle) = backend.get_display() else {
            warn!(backend = backend.name(), "Backend returned no native handle");
            transition(&mut state, DisplayState::Failed);
            backend.close_display();
            return Err(DisplayError::NoHandle);
        };

        Self::create(handle, Some(backend), None, state, config)
    }

    fn create(
        handle: Arc<dyn NativeDisplay>,
        backend: Option<Box<dyn DisplayBackend>>,
        external_lock: Option<Arc<dyn DisplayLock>>,
        mut state: DisplayState,
        config: &DiscoveryConfig,
    ) -> DisplayResult<Self> {
        let mut capabilities = Capabilities::default();
        let result = discover(handle.as_ref(), config, &mut state, &mut capabilities);
        let capabilities = Arc::new(capabilities);

        match result {
            Ok(()) => {
                info!(
                    profiles = capabilities.profiles.len(),
                    image_formats = capabilities.image_formats.len(),
                    subpicture_formats = capabilities.subpicture_formats.len(),
                    "Display ready"
                );
                Ok(Self {
                    handle,
                    backend,
                    capabilities,
                    external_lock,
                    mutex: Mutex::new(()),
                })
            }
            Err((stage, status)) => {
                let initialized = stage != DiscoveryStage::Initialize;
                teardown(handle.as_ref(), initialized, backend);
                transition(&mut state, DisplayState::Destroyed);
                Err(DisplayError::Discovery {
                    stage,
                    status,
                    partial: capabilities,
                })
            }
        }
    }

    // ===== Queries =====

    /// Native display handle
    pub fn handle(&self) -> &Arc<dyn NativeDisplay> {
        &self.handle
    }

    /// Whether this display opened the handle and will close it
    pub fn owns_handle(&self) -> bool {
        self.backend.is_some()
    }

    /// Shared, immutable view of the discovered capabilities
    pub fn capabilities(&self) -> Arc<Capabilities> {
        Arc::clone(&self.capabilities)
    }

    pub fn has_profile(&self, profile: Profile) -> bool {
        self.capabilities.has_profile(profile)
    }

    /// Image capabilities in negotiation order
    pub fn image_caps(&self) -> CapsSet {
        self.capabilities.image_caps()
    }

    pub fn has_image_format(&self, format: ImageFormat) -> bool {
        self.capabilities.has_image_format(format)
    }

    /// Subpicture capabilities in negotiation order
    pub fn subpicture_caps(&self) -> CapsSet {
        self.capabilities.subpicture_caps()
    }

    pub fn has_subpicture_format(&self, format: ImageFormat) -> bool {
        self.capabilities.has_subpicture_format(format)
    }

    // ===== Locking =====

    /// Serialize access to the native handle
    ///
    /// Discovery and the query methods never take this lock. It is meant for
    /// callers issuing driver commands outside this crate. The backend's
    /// [`DisplayLock`] or the one given to
    /// [`new_with_handle_and_lock`](Self::new_with_handle_and_lock) is used
    /// when present, otherwise an internal mutex.
    pub fn lock(&self) -> DisplayGuard<'_> {
        let external = self
            .backend
            .as_ref()
            .and_then(|b| b.display_lock())
            .or(self.external_lock.as_deref());
        match external {
            Some(external) => DisplayGuard::external(external),
            None => DisplayGuard::internal(&self.mutex),
        }
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        let mut state = DisplayState::Populated;
        teardown(self.handle.as_ref(), true, self.backend.take());
        transition(&mut state, DisplayState::Destroyed);
    }
}

impl std::fmt::Debug for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Display")
            .field("owns_handle", &self.owns_handle())
            .field("external_lock", &self.external_lock.is_some())
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

fn transition(state: &mut DisplayState, next: DisplayState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal display transition {} -> {}",
        state,
        next
    );
    debug!(from = %state, to = %next, "Display state change");
    *state = next;
}

fn teardown(
    handle: &dyn NativeDisplay,
    initialized: bool,
    backend: Option<Box<dyn DisplayBackend>>,
) {
    if initialized {
        debug!("Terminating driver connection");
        handle.terminate();
    }
    if let Some(mut backend) = backend {
        debug!(backend = backend.name(), "Closing backend display");
        backend.close_display();
    }
}

fn check<T>(
    stage: DiscoveryStage,
    result: Result<T, VaStatus>,
) -> Result<T, (DiscoveryStage, VaStatus)> {
    result.map_err(|status| {
        warn!(%stage, %status, "Driver call failed");
        (stage, status)
    })
}

/// Run the discovery sequence, filling `caps` as far as it gets.
///
/// On success `state` ends in `Populated`, otherwise in `Failed`.
fn discover(
    handle: &dyn NativeDisplay,
    config: &DiscoveryConfig,
    state: &mut DisplayState,
    caps: &mut Capabilities,
) -> Result<(), (DiscoveryStage, VaStatus)> {
    let result = populate(handle, config, state, caps);
    match result {
        Ok(()) => {
            caps.complete = true;
            transition(state, DisplayState::Populated);
        }
        Err(_) => transition(state, DisplayState::Failed),
    }
    result
}

fn populate(
    handle: &dyn NativeDisplay,
    config: &DiscoveryConfig,
    state: &mut DisplayState,
    caps: &mut Capabilities,
) -> Result<(), (DiscoveryStage, VaStatus)> {
    let version = check(DiscoveryStage::Initialize, handle.initialize())?;
    transition(state, DisplayState::Initialized);
    caps.version = Some(version);
    caps.vendor = handle.vendor_string();
    info!(version = %version, vendor = ?caps.vendor, "VA-API driver initialized");

    // Profiles: driver order, no ranking
    let profiles = check(DiscoveryStage::Profiles, handle.query_config_profiles())?;
    debug!(count = profiles.len(), "Driver profiles");
    for profile in &profiles {
        debug!("  {}", profile);
    }
    caps.profiles = ProfileSet::from(profiles);

    // Image formats: YUV first
    let raw = check(DiscoveryStage::ImageFormats, handle.query_image_formats())?;
    log_raw_formats("image", &raw);
    caps.image_formats = build_format_set(&raw, FormatFamily::Yuv, config);

    // Subpicture formats: RGB first, flags are not part of the negotiation
    let raw = check(
        DiscoveryStage::SubpictureFormats,
        handle.query_subpicture_formats(),
    )?;
    let raw: Vec<VaImageFormat> = raw
        .into_iter()
        .map(|(format, flags)| {
            debug!(fourcc = %format.fourcc, %flags, "Subpicture format flags");
            format
        })
        .collect();
    log_raw_formats("subpicture", &raw);
    caps.subpicture_formats = build_format_set(&raw, FormatFamily::Rgb, config);

    Ok(())
}

fn build_format_set(
    raw: &[VaImageFormat],
    preferred: FormatFamily,
    config: &DiscoveryConfig,
) -> Vec<ImageFormat> {
    let mut formats = normalize(raw);
    if config.dedup_formats {
        dedup_preserving_order(&mut formats);
    }
    sort_formats(&mut formats, preferred);
    formats
}

fn log_raw_formats(kind: &str, raw: &[VaImageFormat]) {
    debug!(kind, count = raw.len(), "Driver formats");
    for format in raw {
        debug!("  {}", format.fourcc);
    }
}
