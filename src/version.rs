//! Structured module and export versions.
//!
//! An export that declares no version is always reported as the
//! [`Version::EMPTY`] sentinel (`0.0.0`), never as an absent value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `major.minor.micro[.qualifier]` version.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    major: u32,
    minor: u32,
    micro: u32,
    qualifier: Option<String>,
}

impl Version {
    /// The empty-version sentinel, `0.0.0`.
    pub const EMPTY: Version = Version {
        major: 0,
        minor: 0,
        micro: 0,
        qualifier: None,
    };

    /// Create a version without a qualifier.
    pub fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: None,
        }
    }

    /// Create a version with a qualifier.
    pub fn with_qualifier(major: u32, minor: u32, micro: u32, qualifier: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: Some(qualifier.into()),
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn micro(&self) -> u32 {
        self.micro
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, ".{}", qualifier)?;
        }
        Ok(())
    }
}

/// Failure to parse a version string.
#[derive(Debug, Error)]
pub enum ParseVersionError {
    #[error("invalid numeric component in version: {0}")]
    InvalidComponent(String),

    #[error("empty version string")]
    Empty,
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseVersionError::Empty);
        }
        let mut parts = s.splitn(4, '.');
        let mut number = |part: Option<&str>| -> Result<u32, ParseVersionError> {
            match part {
                None => Ok(0),
                Some(p) => p
                    .parse()
                    .map_err(|_| ParseVersionError::InvalidComponent(p.to_string())),
            }
        };
        let major = number(parts.next())?;
        let minor = number(parts.next())?;
        let micro = number(parts.next())?;
        let qualifier = parts.next().map(str::to_string);
        Ok(Self {
            major,
            minor,
            micro,
            qualifier,
        })
    }
}
