//! Work-time event type enum as the single source of truth for event type strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four actions a member can record against their work clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkEventType {
    /// Begin working.
    Start,
    /// Continue working after a hold.
    Resume,
    /// Pause working without ending the session.
    Hold,
    /// Stop working and close the session.
    End,
}

impl WorkEventType {
    /// String representation for storage and wire formats.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Resume => "resume",
            Self::Hold => "hold",
            Self::End => "end",
        }
    }

    /// Whether this event opens a work segment.
    #[must_use]
    pub const fn opens_segment(self) -> bool {
        matches!(self, Self::Start | Self::Resume)
    }
}

impl fmt::Display for WorkEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkEventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "resume" => Ok(Self::Resume),
            "hold" => Ok(Self::Hold),
            "end" => Ok(Self::End),
            _ => Err(UnknownEventType(s.to_string())),
        }
    }
}

impl Serialize for WorkEventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkEventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown event type strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventType(String);

impl UnknownEventType {
    /// The tag that failed to parse.
    pub fn tag(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown work event type: {:?} (expected start, resume, hold or end)",
            self.0
        )
    }
}

impl std::error::Error for UnknownEventType {}
