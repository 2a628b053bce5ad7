// SPDX-License-Identifier: MPL-2.0

//! JSON-driven driver fixtures
//!
//! A [`DriverFixture`] describes what a VA driver answers to the discovery
//! calls, optionally with a failure status injected at any stage:
//!
//! ```json
//! {
//!   "vendor": "Fixture driver",
//!   "version": [1, 20],
//!   "profiles": [6, 7],
//!   "image_formats": [
//!     { "fourcc": "NV12", "bits_per_pixel": 12 },
//!     { "fourcc": "BGRA", "byte_order": "lsb", "bits_per_pixel": 32, "depth": 32,
//!       "red_mask": 16711680, "green_mask": 65280, "blue_mask": 255,
//!       "alpha_mask": 4278190080 }
//!   ],
//!   "subpicture_formats": [
//!     { "format": { "fourcc": "AYUV", "bits_per_pixel": 32 }, "flags": 2 }
//!   ],
//!   "failures": { "subpicture_formats": 1 }
//! }
//! ```
//!
//! [`FixtureDisplay`] serves those answers as a [`NativeDisplay`] and
//! [`FixtureBackend`] opens one as a [`DisplayBackend`].

use crate::display::{ApiVersion, ConditionLock, DisplayBackend, DisplayLock, NativeDisplay, Profile};
use crate::errors::{DiscoveryStage, DisplayResult, VaResult, VaStatus};
use crate::formats::{SubpictureFlags, VaImageFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Subpicture format entry with its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubpictureEntry {
    pub format: VaImageFormat,
    #[serde(default)]
    pub flags: SubpictureFlags,
}

/// Raw `VAStatus` codes to return instead of the fixture data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectedFailures {
    pub initialize: Option<u32>,
    pub profiles: Option<u32>,
    pub image_formats: Option<u32>,
    pub subpicture_formats: Option<u32>,
}

impl InjectedFailures {
    fn slot(&mut self, stage: DiscoveryStage) -> &mut Option<u32> {
        match stage {
            DiscoveryStage::Initialize => &mut self.initialize,
            DiscoveryStage::Profiles => &mut self.profiles,
            DiscoveryStage::ImageFormats => &mut self.image_formats,
            DiscoveryStage::SubpictureFormats => &mut self.subpicture_formats,
        }
    }

    fn check(&self, stage: DiscoveryStage) -> VaResult<()> {
        let raw = match stage {
            DiscoveryStage::Initialize => self.initialize,
            DiscoveryStage::Profiles => self.profiles,
            DiscoveryStage::ImageFormats => self.image_formats,
            DiscoveryStage::SubpictureFormats => self.subpicture_formats,
        };
        raw.map_or(Ok(()), VaStatus::check)
    }
}

/// Scripted answers of a VA driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverFixture {
    pub vendor: Option<String>,
    /// `[major, minor]` reported by initialization
    pub version: [i32; 2],
    pub profiles: Vec<Profile>,
    pub image_formats: Vec<VaImageFormat>,
    pub subpicture_formats: Vec<SubpictureEntry>,
    pub failures: InjectedFailures,
}

impl Default for DriverFixture {
    fn default() -> Self {
        Self {
            vendor: None,
            version: [1, 0],
            profiles: Vec::new(),
            image_formats: Vec::new(),
            subpicture_formats: Vec::new(),
            failures: InjectedFailures::default(),
        }
    }
}

impl DriverFixture {
    /// Driver that initializes and reports nothing
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> DisplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> DisplayResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_version(mut self, major: i32, minor: i32) -> Self {
        self.version = [major, minor];
        self
    }

    pub fn with_profiles(mut self, profiles: Vec<Profile>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_image_formats(mut self, formats: Vec<VaImageFormat>) -> Self {
        self.image_formats = formats;
        self
    }

    /// Subpicture formats, all reported without flags
    pub fn with_subpicture_formats(mut self, formats: Vec<VaImageFormat>) -> Self {
        self.subpicture_formats = formats
            .into_iter()
            .map(|format| SubpictureEntry {
                format,
                flags: SubpictureFlags::default(),
            })
            .collect();
        self
    }

    /// Make the driver call of `stage` fail with `status`
    pub fn fail_at(mut self, stage: DiscoveryStage, status: VaStatus) -> Self {
        *self.failures.slot(stage) = Some(status.to_raw());
        self
    }
}

/// Shared record of the driver and backend calls a fixture received
#[derive(Debug, Default)]
pub struct FixtureStats {
    events: Mutex<Vec<&'static str>>,
}

impl FixtureStats {
    fn record(&self, event: &'static str) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| **e == event).count()
    }

    /// Calls in the order they were made
    pub fn events(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn opens(&self) -> usize {
        self.count("open")
    }

    pub fn closes(&self) -> usize {
        self.count("close")
    }

    pub fn initializes(&self) -> usize {
        self.count("initialize")
    }

    pub fn terminates(&self) -> usize {
        self.count("terminate")
    }
}

/// Native display answering from a [`DriverFixture`]
///
/// Queries made while the driver is not initialized fail with
/// [`VaStatus::InvalidDisplay`], like a real driver would.
#[derive(Debug)]
pub struct FixtureDisplay {
    fixture: DriverFixture,
    initialized: AtomicBool,
    stats: Arc<FixtureStats>,
}

impl FixtureDisplay {
    pub fn new(fixture: DriverFixture) -> Self {
        Self::with_stats(fixture, Arc::new(FixtureStats::default()))
    }

    pub fn with_stats(fixture: DriverFixture, stats: Arc<FixtureStats>) -> Self {
        Self {
            fixture,
            initialized: AtomicBool::new(false),
            stats,
        }
    }

    pub fn from_json_str(json: &str) -> DisplayResult<Self> {
        Ok(Self::new(DriverFixture::from_json_str(json)?))
    }

    pub fn from_json_file(path: &Path) -> DisplayResult<Self> {
        Ok(Self::new(DriverFixture::from_json_file(path)?))
    }

    pub fn fixture(&self) -> &DriverFixture {
        &self.fixture
    }

    pub fn stats(&self) -> Arc<FixtureStats> {
        Arc::clone(&self.stats)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn terminate_count(&self) -> usize {
        self.stats.terminates()
    }

    fn query(&self, stage: DiscoveryStage) -> VaResult<()> {
        if !self.is_initialized() {
            return Err(VaStatus::InvalidDisplay);
        }
        self.fixture.failures.check(stage)
    }
}

impl NativeDisplay for FixtureDisplay {
    fn initialize(&self) -> VaResult<ApiVersion> {
        self.stats.record("initialize");
        self.fixture.failures.check(DiscoveryStage::Initialize)?;
        self.initialized.store(true, Ordering::SeqCst);
        let [major, minor] = self.fixture.version;
        Ok(ApiVersion { major, minor })
    }

    fn terminate(&self) {
        self.stats.record("terminate");
        self.initialized.store(false, Ordering::SeqCst);
    }

    fn query_config_profiles(&self) -> VaResult<Vec<Profile>> {
        self.query(DiscoveryStage::Profiles)?;
        Ok(self.fixture.profiles.clone())
    }

    fn query_image_formats(&self) -> VaResult<Vec<VaImageFormat>> {
        self.query(DiscoveryStage::ImageFormats)?;
        Ok(self.fixture.image_formats.clone())
    }

    fn query_subpicture_formats(&self) -> VaResult<Vec<(VaImageFormat, SubpictureFlags)>> {
        self.query(DiscoveryStage::SubpictureFormats)?;
        Ok(self
            .fixture
            .subpicture_formats
            .iter()
            .map(|entry| (entry.format, entry.flags))
            .collect())
    }

    fn vendor_string(&self) -> Option<String> {
        self.fixture.vendor.clone()
    }
}

#[derive(Debug, Clone)]
enum FixtureSource {
    File(PathBuf),
    Inline(DriverFixture),
}

/// Backend that "opens" a fixture driver
///
/// Fixture files are read when the display is opened, so a missing or
/// malformed file shows up as an open failure.
#[derive(Debug)]
pub struct FixtureBackend {
    source: FixtureSource,
    name: String,
    display: Option<Arc<FixtureDisplay>>,
    stats: Arc<FixtureStats>,
    fail_open: bool,
    no_handle: bool,
    lock: Option<Arc<ConditionLock>>,
}

impl FixtureBackend {
    /// Backend loading the fixture at `path` on open
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("fixture:{}", path.display());
        Self::with_source(FixtureSource::File(path), name)
    }

    pub fn from_fixture(fixture: DriverFixture) -> Self {
        Self::with_source(FixtureSource::Inline(fixture), "fixture".to_string())
    }

    fn with_source(source: FixtureSource, name: String) -> Self {
        Self {
            source,
            name,
            display: None,
            stats: Arc::new(FixtureStats::default()),
            fail_open: false,
            no_handle: false,
            lock: None,
        }
    }

    /// Refuse to open
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Open successfully but hand out no native handle
    pub fn without_handle(mut self) -> Self {
        self.no_handle = true;
        self
    }

    /// Provide a [`ConditionLock`] in place of the display's own mutex
    pub fn with_shared_lock(mut self) -> Self {
        self.lock = Some(Arc::new(ConditionLock::new()));
        self
    }

    pub fn shared_lock(&self) -> Option<Arc<ConditionLock>> {
        self.lock.clone()
    }

    /// Calls received by this backend and the displays it opened
    pub fn stats(&self) -> Arc<FixtureStats> {
        Arc::clone(&self.stats)
    }

    fn load(&self) -> DisplayResult<DriverFixture> {
        match &self.source {
            FixtureSource::File(path) => DriverFixture::from_json_file(path),
            FixtureSource::Inline(fixture) => Ok(fixture.clone()),
        }
    }
}

impl DisplayBackend for FixtureBackend {
    fn open_display(&mut self) -> bool {
        self.stats.record("open");
        if self.fail_open {
            return false;
        }
        match self.load() {
            Ok(fixture) => {
                debug!(backend = %self.name, "Fixture loaded");
                self.display = Some(Arc::new(FixtureDisplay::with_stats(
                    fixture,
                    Arc::clone(&self.stats),
                )));
                true
            }
            Err(e) => {
                warn!(backend = %self.name, error = %e, "Failed to load fixture");
                false
            }
        }
    }

    fn get_display(&self) -> Option<Arc<dyn NativeDisplay>> {
        if self.no_handle {
            return None;
        }
        self.display
            .as_ref()
            .map(|display| Arc::clone(display) as Arc<dyn NativeDisplay>)
    }

    fn close_display(&mut self) {
        self.stats.record("close");
        self.display = None;
    }

    fn display_lock(&self) -> Option<&dyn DisplayLock> {
        self.lock.as_deref().map(|lock| lock as &dyn DisplayLock)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{ByteOrder, ImageFormat, fourcc};

    const FIXTURE_JSON: &str = r#"{
        "vendor": "Fixture driver",
        "version": [1, 20],
        "profiles": [6, 7],
        "image_formats": [
            { "fourcc": "NV12", "bits_per_pixel": 12 },
            { "fourcc": "BGRA", "byte_order": "lsb", "bits_per_pixel": 32, "depth": 32,
              "red_mask": 16711680, "green_mask": 65280, "blue_mask": 255,
              "alpha_mask": 4278190080 }
        ],
        "subpicture_formats": [
            { "format": { "fourcc": "AYUV", "bits_per_pixel": 32 }, "flags": 2 }
        ]
    }"#;

    #[test]
    fn test_parse_fixture() {
        let fixture = DriverFixture::from_json_str(FIXTURE_JSON).unwrap();
        assert_eq!(fixture.vendor.as_deref(), Some("Fixture driver"));
        assert_eq!(fixture.version, [1, 20]);
        assert_eq!(fixture.profiles, vec![Profile::H264_MAIN, Profile::H264_HIGH]);
        assert_eq!(fixture.image_formats[0].fourcc, fourcc::NV12);
        assert_eq!(fixture.image_formats[1], ImageFormat::BGRA.va_format());
        assert_eq!(fixture.image_formats[1].byte_order, ByteOrder::Lsb);
        assert_eq!(
            fixture.subpicture_formats[0].flags,
            SubpictureFlags(SubpictureFlags::GLOBAL_ALPHA)
        );
        assert_eq!(fixture.failures, InjectedFailures::default());
    }

    #[test]
    fn test_bad_fourcc_rejected() {
        let json = r#"{ "image_formats": [ { "fourcc": "TOOLONG" } ] }"#;
        assert!(DriverFixture::from_json_str(json).is_err());
    }

    #[test]
    fn test_queries_require_initialize() {
        let display = FixtureDisplay::from_json_str(FIXTURE_JSON).unwrap();
        assert_eq!(display.query_image_formats(), Err(VaStatus::InvalidDisplay));

        assert_eq!(
            display.initialize(),
            Ok(ApiVersion {
                major: 1,
                minor: 20
            })
        );
        assert_eq!(display.query_image_formats().unwrap().len(), 2);
        display.terminate();
        assert!(!display.is_initialized());
        assert_eq!(display.terminate_count(), 1);
    }

    #[test]
    fn test_injected_failure() {
        let display = FixtureDisplay::new(
            DriverFixture::new().fail_at(DiscoveryStage::Profiles, VaStatus::Other(0x42)),
        );
        display.initialize().unwrap();
        assert_eq!(display.query_config_profiles(), Err(VaStatus::Other(0x42)));
        assert_eq!(display.query_image_formats(), Ok(Vec::new()));
    }

    #[test]
    fn test_zero_failure_status_is_success() {
        let json = r#"{ "failures": { "initialize": 0 } }"#;
        let display = FixtureDisplay::from_json_str(json).unwrap();
        assert!(display.initialize().is_ok());
    }

    #[test]
    fn test_backend_missing_file() {
        let mut backend = FixtureBackend::from_path("/nonexistent/driver.json");
        assert!(!backend.open_display());
        assert!(backend.get_display().is_none());
        assert!(backend.name().starts_with("fixture:"));
    }

    #[test]
    fn test_backend_lifecycle() {
        let mut backend = FixtureBackend::from_fixture(DriverFixture::new());
        assert!(backend.get_display().is_none());
        assert!(backend.open_display());
        assert!(backend.get_display().is_some());
        backend.close_display();
        assert!(backend.get_display().is_none());
        assert_eq!(backend.stats().events(), vec!["open", "close"]);
    }
}
