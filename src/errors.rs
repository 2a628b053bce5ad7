// SPDX-License-Identifier: MPL-2.0

//! Error types for the display layer

use crate::display::Capabilities;
use std::fmt;
use std::sync::Arc;

/// Result type alias for driver calls
pub type VaResult<T> = Result<T, VaStatus>;

/// Result type alias using DisplayError
pub type DisplayResult<T> = Result<T, DisplayError>;

/// Driver status codes (`VAStatus`) other than success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaStatus {
    OperationFailed,
    AllocationFailed,
    InvalidDisplay,
    InvalidConfig,
    InvalidContext,
    InvalidSurface,
    InvalidBuffer,
    InvalidImage,
    InvalidSubpicture,
    AttrNotSupported,
    MaxNumExceeded,
    UnsupportedProfile,
    UnsupportedEntrypoint,
    UnsupportedRtFormat,
    UnsupportedBufferType,
    SurfaceBusy,
    FlagNotSupported,
    InvalidParameter,
    ResolutionNotSupported,
    Unimplemented,
    Unknown,
    /// Any code this crate does not name
    Other(u32),
}

impl VaStatus {
    /// Interpret a raw `VAStatus`; `0` (`VA_STATUS_SUCCESS`) yields `Ok`.
    pub fn check(raw: u32) -> VaResult<()> {
        match raw {
            0 => Ok(()),
            other => Err(Self::from_raw(other)),
        }
    }

    /// Map a non-success raw code
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0x01 => Self::OperationFailed,
            0x02 => Self::AllocationFailed,
            0x03 => Self::InvalidDisplay,
            0x04 => Self::InvalidConfig,
            0x05 => Self::InvalidContext,
            0x06 => Self::InvalidSurface,
            0x07 => Self::InvalidBuffer,
            0x08 => Self::InvalidImage,
            0x09 => Self::InvalidSubpicture,
            0x0a => Self::AttrNotSupported,
            0x0b => Self::MaxNumExceeded,
            0x0c => Self::UnsupportedProfile,
            0x0d => Self::UnsupportedEntrypoint,
            0x0e => Self::UnsupportedRtFormat,
            0x0f => Self::UnsupportedBufferType,
            0x10 => Self::SurfaceBusy,
            0x11 => Self::FlagNotSupported,
            0x12 => Self::InvalidParameter,
            0x13 => Self::ResolutionNotSupported,
            0x14 => Self::Unimplemented,
            0xffff_ffff => Self::Unknown,
            other => Self::Other(other),
        }
    }

    /// Raw `VAStatus` value
    pub fn to_raw(self) -> u32 {
        match self {
            Self::OperationFailed => 0x01,
            Self::AllocationFailed => 0x02,
            Self::InvalidDisplay => 0x03,
            Self::InvalidConfig => 0x04,
            Self::InvalidContext => 0x05,
            Self::InvalidSurface => 0x06,
            Self::InvalidBuffer => 0x07,
            Self::InvalidImage => 0x08,
            Self::InvalidSubpicture => 0x09,
            Self::AttrNotSupported => 0x0a,
            Self::MaxNumExceeded => 0x0b,
            Self::UnsupportedProfile => 0x0c,
            Self::UnsupportedEntrypoint => 0x0d,
            Self::UnsupportedRtFormat => 0x0e,
            Self::UnsupportedBufferType => 0x0f,
            Self::SurfaceBusy => 0x10,
            Self::FlagNotSupported => 0x11,
            Self::InvalidParameter => 0x12,
            Self::ResolutionNotSupported => 0x13,
            Self::Unimplemented => 0x14,
            Self::Unknown => 0xffff_ffff,
            Self::Other(raw) => raw,
        }
    }

    /// Human-readable description (`vaErrorStr`)
    pub fn description(&self) -> &'static str {
        match self {
            Self::OperationFailed => "operation failed",
            Self::AllocationFailed => "resource allocation failed",
            Self::InvalidDisplay => "invalid VADisplay",
            Self::InvalidConfig => "invalid VAConfigID",
            Self::InvalidContext => "invalid VAContextID",
            Self::InvalidSurface => "invalid VASurfaceID",
            Self::InvalidBuffer => "invalid VABufferID",
            Self::InvalidImage => "invalid VAImageID",
            Self::InvalidSubpicture => "invalid VASubpictureID",
            Self::AttrNotSupported => "attribute not supported",
            Self::MaxNumExceeded => "list argument exceeds maximum number",
            Self::UnsupportedProfile => "the requested VAProfile is not supported",
            Self::UnsupportedEntrypoint => "the requested VAEntryPoint is not supported",
            Self::UnsupportedRtFormat => "the requested RT Format is not supported",
            Self::UnsupportedBufferType => "the requested VABufferType is not supported",
            Self::SurfaceBusy => "surface is in use",
            Self::FlagNotSupported => "flag not supported",
            Self::InvalidParameter => "invalid parameter",
            Self::ResolutionNotSupported => "resolution not supported",
            Self::Unimplemented => "the requested function is not implemented",
            Self::Unknown | Self::Other(_) => "unknown libva error",
        }
    }
}

impl fmt::Display for VaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#x})", self.description(), self.to_raw())
    }
}

impl std::error::Error for VaStatus {}

/// Driver call that ended discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryStage {
    /// `vaInitialize()`
    Initialize,
    /// `vaQueryConfigProfiles()`
    Profiles,
    /// `vaQueryImageFormats()`
    ImageFormats,
    /// `vaQuerySubpictureFormats()`
    SubpictureFormats,
}

impl fmt::Display for DiscoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryStage::Initialize => write!(f, "vaInitialize()"),
            DiscoveryStage::Profiles => write!(f, "vaQueryConfigProfiles()"),
            DiscoveryStage::ImageFormats => write!(f, "vaQueryImageFormats()"),
            DiscoveryStage::SubpictureFormats => write!(f, "vaQuerySubpictureFormats()"),
        }
    }
}

/// Display construction errors
#[derive(Debug, Clone)]
pub enum DisplayError {
    /// The backend could not open its windowing-system connection
    OpenFailed(String),
    /// The backend opened but produced no native handle
    NoHandle,
    /// A driver call failed during discovery.
    ///
    /// `partial` holds whatever was populated before the failure. The driver
    /// connection has already been torn down.
    Discovery {
        stage: DiscoveryStage,
        status: VaStatus,
        partial: Arc<Capabilities>,
    },
    /// Configuration could not be loaded
    Config(String),
    /// Fixture or configuration file I/O failed
    Io(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::OpenFailed(msg) => write!(f, "Failed to open display: {}", msg),
            DisplayError::NoHandle => write!(f, "Backend returned no native display handle"),
            DisplayError::Discovery { stage, status, .. } => {
                write!(f, "{} failed: {}", stage, status)
            }
            DisplayError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DisplayError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DisplayError {
    fn from(err: serde_json::Error) -> Self {
        DisplayError::Config(err.to_string())
    }
}
