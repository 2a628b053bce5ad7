// SPDX-License-Identifier: GPL-3.0-only

//! Codec profiles reported by the driver

use serde::{Deserialize, Serialize};
use std::fmt;

/// Driver-defined codec profile identifier (`VAProfile`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(pub i32);

impl Profile {
    pub const NONE: Profile = Profile(-1);
    pub const MPEG2_SIMPLE: Profile = Profile(0);
    pub const MPEG2_MAIN: Profile = Profile(1);
    pub const MPEG4_SIMPLE: Profile = Profile(2);
    pub const MPEG4_ADVANCED_SIMPLE: Profile = Profile(3);
    pub const MPEG4_MAIN: Profile = Profile(4);
    pub const H264_BASELINE: Profile = Profile(5);
    pub const H264_MAIN: Profile = Profile(6);
    pub const H264_HIGH: Profile = Profile(7);
    pub const VC1_SIMPLE: Profile = Profile(8);
    pub const VC1_MAIN: Profile = Profile(9);
    pub const VC1_ADVANCED: Profile = Profile(10);
    pub const H263_BASELINE: Profile = Profile(11);
    pub const JPEG_BASELINE: Profile = Profile(12);
    pub const H264_CONSTRAINED_BASELINE: Profile = Profile(13);
    pub const VP8_VERSION0_3: Profile = Profile(14);
    pub const H264_MULTIVIEW_HIGH: Profile = Profile(15);
    pub const H264_STEREO_HIGH: Profile = Profile(16);
    pub const HEVC_MAIN: Profile = Profile(17);
    pub const HEVC_MAIN10: Profile = Profile(18);
    pub const VP9_PROFILE0: Profile = Profile(19);
    pub const VP9_PROFILE1: Profile = Profile(20);
    pub const VP9_PROFILE2: Profile = Profile(21);
    pub const VP9_PROFILE3: Profile = Profile(22);
    pub const HEVC_MAIN12: Profile = Profile(23);
    pub const HEVC_MAIN422_10: Profile = Profile(24);
    pub const HEVC_MAIN422_12: Profile = Profile(25);
    pub const HEVC_MAIN444: Profile = Profile(26);
    pub const HEVC_MAIN444_10: Profile = Profile(27);
    pub const HEVC_MAIN444_12: Profile = Profile(28);
    pub const AV1_PROFILE0: Profile = Profile(32);
    pub const AV1_PROFILE1: Profile = Profile(33);

    /// `va.h` name of the profile, if known
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            -1 => "VAProfileNone",
            0 => "VAProfileMPEG2Simple",
            1 => "VAProfileMPEG2Main",
            2 => "VAProfileMPEG4Simple",
            3 => "VAProfileMPEG4AdvancedSimple",
            4 => "VAProfileMPEG4Main",
            5 => "VAProfileH264Baseline",
            6 => "VAProfileH264Main",
            7 => "VAProfileH264High",
            8 => "VAProfileVC1Simple",
            9 => "VAProfileVC1Main",
            10 => "VAProfileVC1Advanced",
            11 => "VAProfileH263Baseline",
            12 => "VAProfileJPEGBaseline",
            13 => "VAProfileH264ConstrainedBaseline",
            14 => "VAProfileVP8Version0_3",
            15 => "VAProfileH264MultiviewHigh",
            16 => "VAProfileH264StereoHigh",
            17 => "VAProfileHEVCMain",
            18 => "VAProfileHEVCMain10",
            19 => "VAProfileVP9Profile0",
            20 => "VAProfileVP9Profile1",
            21 => "VAProfileVP9Profile2",
            22 => "VAProfileVP9Profile3",
            23 => "VAProfileHEVCMain12",
            24 => "VAProfileHEVCMain422_10",
            25 => "VAProfileHEVCMain422_12",
            26 => "VAProfileHEVCMain444",
            27 => "VAProfileHEVCMain444_10",
            28 => "VAProfileHEVCMain444_12",
            32 => "VAProfileAV1Profile0",
            33 => "VAProfileAV1Profile1",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "<unknown profile {}>", self.0),
        }
    }
}

/// Profiles in the order the driver reported them.
///
/// Not deduplicated and not ranked; only membership matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSet(Vec<Profile>);

impl ProfileSet {
    pub fn contains(&self, profile: Profile) -> bool {
        self.0.contains(&profile)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Profile> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Profile] {
        &self.0
    }
}

impl From<Vec<Profile>> for ProfileSet {
    fn from(profiles: Vec<Profile>) -> Self {
        Self(profiles)
    }
}

impl<'a> IntoIterator for &'a ProfileSet {
    type Item = &'a Profile;
    type IntoIter = std::slice::Iter<'a, Profile>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_names() {
        assert_eq!(Profile::H264_HIGH.name(), Some("VAProfileH264High"));
        assert_eq!(Profile::AV1_PROFILE0.to_string(), "VAProfileAV1Profile0");
        assert_eq!(Profile(99).name(), None);
        assert_eq!(Profile(99).to_string(), "<unknown profile 99>");
    }

    #[test]
    fn test_profile_set_keeps_driver_order_and_duplicates() {
        let set = ProfileSet::from(vec![
            Profile::H264_MAIN,
            Profile::MPEG2_MAIN,
            Profile::H264_MAIN,
        ]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.as_slice()[1], Profile::MPEG2_MAIN);
        assert!(set.contains(Profile::MPEG2_MAIN));
        assert!(!set.contains(Profile::HEVC_MAIN));
    }
}
