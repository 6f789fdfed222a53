//! # Record Kinds
//!
//! The two inquiry kinds the service accepts. Each kind owns a collection in
//! the Record Store and a fixed list of required submission fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two inquiry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A property inquiry (`properties` collection).
    Property,
    /// A service inquiry (`services` collection).
    Service,
}

const PROPERTY_REQUIRED: &[&str] = &["name", "age", "email", "phone", "property_type", "message"];
const SERVICE_REQUIRED: &[&str] = &["name", "age", "email", "phone", "service_type", "message"];

impl RecordKind {
    /// All kinds, in display order.
    pub const ALL: [RecordKind; 2] = [RecordKind::Property, RecordKind::Service];

    /// Name of the Record Store collection holding this kind.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Property => "properties",
            Self::Service => "services",
        }
    }

    /// Lowercase singular noun used in messages ("property").
    pub fn singular(self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Service => "service",
        }
    }

    /// Lowercase plural noun used in messages ("properties").
    pub fn plural(self) -> &'static str {
        self.collection()
    }

    /// Capitalised singular noun ("Property").
    pub fn title(self) -> &'static str {
        match self {
            Self::Property => "Property",
            Self::Service => "Service",
        }
    }

    /// Path segment of this kind's endpoints under `/api`.
    ///
    /// Note the asymmetry: services live at `/api/service`.
    pub fn api_segment(self) -> &'static str {
        match self {
            Self::Property => "properties",
            Self::Service => "service",
        }
    }

    /// Submission fields that must be present and non-empty, in reporting order.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Property => PROPERTY_REQUIRED,
            Self::Service => SERVICE_REQUIRED,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Error returned when parsing an unknown kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record kind {0:?}; expected \"property\" or \"service\"")]
pub struct UnknownKind(pub String);

impl FromStr for RecordKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "property" | "properties" => Ok(Self::Property),
            "service" | "services" => Ok(Self::Service),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}
