use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
    de,
};

use crate::errors::*;

err_impl! {VersionError,
    #[error("invalid kubernetes version: {0} (expected major.minor)")]
    InvalidVersion(String),
}

// Kubernetes API version that a chart gets rendered against.  Only major.minor matters for the
// matrix; patch versions are rejected rather than silently truncated so that the lookup key is
// never ambiguous.  Serializes as the string "major.minor".
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PlatformVersion {
    major: u32,
    minor: u32,
}

impl PlatformVersion {
    pub fn new(major: u32, minor: u32) -> PlatformVersion {
        PlatformVersion { major, minor }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }
}

impl FromStr for PlatformVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<PlatformVersion> {
        let trimmed = s.trim();
        let stripped = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let Some((major, minor)) = stripped.split_once('.') else {
            return Err(VersionError::invalid_version(s));
        };

        match (parse_component(major), parse_component(minor)) {
            (Some(major), Some(minor)) => Ok(PlatformVersion { major, minor }),
            _ => Err(VersionError::invalid_version(s)),
        }
    }
}

// u32::from_str takes a leading '+', which isn't a valid version
fn parse_component(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Serialize for PlatformVersion {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PlatformVersion {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let s = String::deserialize(de)?;
        s.parse().map_err(de::Error::custom)
    }
}
