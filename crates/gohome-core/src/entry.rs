//! Presence entries recorded over a working day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Kind of presence boundary an entry marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Arrived at the company.
    Come,
    /// Left the company.
    Leave,
    /// Left for a short business trip.
    Trip,
}

impl EntryKind {
    /// Canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Come => "come",
            Self::Leave => "leave",
            Self::Trip => "trip",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = UnknownEntryKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "come" => Ok(Self::Come),
            "leave" => Ok(Self::Leave),
            "trip" => Ok(Self::Trip),
            _ => Err(UnknownEntryKind(s.to_string())),
        }
    }
}

impl Serialize for EntryKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntryKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown entry kind strings.
#[derive(Debug, Clone)]
pub struct UnknownEntryKind(String);

impl fmt::Display for UnknownEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entry kind: {}", self.0)
    }
}

impl std::error::Error for UnknownEntryKind {}

/// A single timestamped presence event.
///
/// Entries of a day are expected in chronological order; nothing in this
/// crate sorts them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "DateTime<Tz>: Serialize",
    deserialize = "DateTime<Tz>: Deserialize<'de>"
))]
pub struct Entry<Tz: TimeZone> {
    /// What happened.
    pub kind: EntryKind,
    /// When it happened.
    pub at: DateTime<Tz>,
}

impl<Tz: TimeZone> Entry<Tz> {
    pub const fn new(kind: EntryKind, at: DateTime<Tz>) -> Self {
        Self { kind, at }
    }

    pub const fn come(at: DateTime<Tz>) -> Self {
        Self::new(EntryKind::Come, at)
    }

    pub const fn leave(at: DateTime<Tz>) -> Self {
        Self::new(EntryKind::Leave, at)
    }

    pub const fn trip(at: DateTime<Tz>) -> Self {
        Self::new(EntryKind::Trip, at)
    }
}
