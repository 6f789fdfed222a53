//! # Inquiry Records
//!
//! Stored records and the drafts they are created from. A draft is what the
//! API sends to the Record Store; the store answers with the record, adding
//! the `id` it assigned.
//!
//! Records are never mutated once stored. There is no update path.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{InvalidField, ValidationError};
use crate::field::TextOrNumber;
use crate::id::RecordId;
use crate::kind::RecordKind;
use crate::submission::{FieldValue, Submission};

/// Behaviour shared by both inquiry kinds.
pub trait Inquiry: Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + 'static {
    /// The kind this record type belongs to.
    const KIND: RecordKind;

    /// Insert payload for this kind.
    type Draft: Serialize + Clone + std::fmt::Debug + Send + Sync + 'static;

    /// Validate a submission and build the insert payload, stamping
    /// `created_at` with `now`.
    fn draft_from_submission(
        submission: &Submission,
        now: DateTime<Utc>,
    ) -> Result<Self::Draft, ValidationError>;

    /// Store-assigned identifier.
    fn id(&self) -> &RecordId;

    /// Insertion timestamp.
    fn created_at(&self) -> DateTime<Utc>;
}

/// A stored property inquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PropertyInquiry {
    /// Store-assigned identifier.
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub id: RecordId,
    /// Submitter name.
    pub name: String,
    /// Submitter age.
    pub age: i64,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Kind of property asked about.
    pub property_type: String,
    /// Requested bedroom count, if given.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub bedrooms: Option<TextOrNumber>,
    /// Requested room count, if given.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub rooms: Option<TextOrNumber>,
    /// Free-text message.
    pub message: String,
    /// Server time at insertion.
    #[serde(with = "crate::record::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a property inquiry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPropertyInquiry {
    /// Submitter name.
    pub name: String,
    /// Submitter age.
    pub age: i64,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Kind of property asked about.
    pub property_type: String,
    /// Requested bedroom count, if given.
    pub bedrooms: Option<TextOrNumber>,
    /// Requested room count, if given.
    pub rooms: Option<TextOrNumber>,
    /// Free-text message.
    pub message: String,
    /// Server time at insertion.
    pub created_at: DateTime<Utc>,
}

/// A stored service inquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceInquiry {
    /// Store-assigned identifier.
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub id: RecordId,
    /// Submitter name.
    pub name: String,
    /// Submitter age.
    pub age: i64,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Kind of service asked about.
    pub service_type: String,
    /// Beauty treatment, if given.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub beauty_type: Option<TextOrNumber>,
    /// Free-text message.
    pub message: String,
    /// Server time at insertion.
    #[serde(with = "crate::record::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a service inquiry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewServiceInquiry {
    /// Submitter name.
    pub name: String,
    /// Submitter age.
    pub age: i64,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Kind of service asked about.
    pub service_type: String,
    /// Beauty treatment, if given.
    pub beauty_type: Option<TextOrNumber>,
    /// Free-text message.
    pub message: String,
    /// Server time at insertion.
    pub created_at: DateTime<Utc>,
}

/// Fields every kind requires, validated.
struct CommonFields {
    name: String,
    age: i64,
    email: String,
    phone: String,
    type_field: String,
    message: String,
}

/// Missing-field check first (reporting every missing field), then value checks.
fn validate_common(
    kind: RecordKind,
    submission: &Submission,
    optional: &[&str],
) -> Result<CommonFields, ValidationError> {
    let missing = submission.missing_fields(kind.required_fields());
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let mut invalid = Vec::new();
    for name in kind.required_fields().iter().chain(optional) {
        if let FieldValue::Invalid(reason) = submission.field(name) {
            invalid.push(InvalidField {
                field: (*name).to_string(),
                reason: reason.to_string(),
            });
        }
    }
    let age = match submission.integer("age") {
        Ok(age) => Some(age),
        Err(reason) => {
            if !invalid.iter().any(|f| f.field == "age") {
                invalid.push(InvalidField {
                    field: "age".to_string(),
                    reason,
                });
            }
            None
        }
    };

    match age {
        Some(age) if invalid.is_empty() => Ok(CommonFields {
            name: required_text(submission, "name"),
            age,
            email: required_text(submission, "email"),
            phone: required_text(submission, "phone"),
            type_field: required_text(
                submission,
                match kind {
                    RecordKind::Property => "property_type",
                    RecordKind::Service => "service_type",
                },
            ),
            message: required_text(submission, "message"),
        }),
        _ => Err(ValidationError::InvalidFields(invalid)),
    }
}

// Only called after validate_common has proven presence.
fn required_text(submission: &Submission, name: &str) -> String {
    match submission.field(name) {
        FieldValue::Text(s) => s,
        FieldValue::Missing | FieldValue::Invalid(_) => String::new(),
    }
}

// Numbers stay numbers so a numeric column receives the value unchanged.
fn optional_value(submission: &Submission, name: &str) -> Option<TextOrNumber> {
    match (submission.field(name), submission.as_map().get(name)) {
        (FieldValue::Text(_), Some(serde_json::Value::Number(n))) => {
            Some(TextOrNumber::Number(n.clone()))
        }
        (FieldValue::Text(s), _) => Some(TextOrNumber::Text(s)),
        (FieldValue::Missing | FieldValue::Invalid(_), _) => None,
    }
}

impl Inquiry for PropertyInquiry {
    const KIND: RecordKind = RecordKind::Property;
    type Draft = NewPropertyInquiry;

    fn draft_from_submission(
        submission: &Submission,
        now: DateTime<Utc>,
    ) -> Result<NewPropertyInquiry, ValidationError> {
        let common = validate_common(Self::KIND, submission, &["bedrooms", "rooms"])?;
        Ok(NewPropertyInquiry {
            name: common.name,
            age: common.age,
            email: common.email,
            phone: common.phone,
            property_type: common.type_field,
            bedrooms: optional_value(submission, "bedrooms"),
            rooms: optional_value(submission, "rooms"),
            message: common.message,
            created_at: now,
        })
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Inquiry for ServiceInquiry {
    const KIND: RecordKind = RecordKind::Service;
    type Draft = NewServiceInquiry;

    fn draft_from_submission(
        submission: &Submission,
        now: DateTime<Utc>,
    ) -> Result<NewServiceInquiry, ValidationError> {
        let common = validate_common(Self::KIND, submission, &["beauty_type"])?;
        Ok(NewServiceInquiry {
            name: common.name,
            age: common.age,
            email: common.email,
            phone: common.phone,
            service_type: common.type_field,
            beauty_type: optional_value(submission, "beauty_type"),
            message: common.message,
            created_at: now,
        })
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Serde adapter for `created_at`.
///
/// Serializes RFC 3339. Deserializes RFC 3339 with any offset, or a naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` timestamp taken as UTC (what a
/// `timestamp without time zone` column returns).
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as RFC 3339.
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339())
    }

    /// Deserialize from RFC 3339 or a naive UTC timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parse a timestamp string using the rules above.
    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
    }
}
