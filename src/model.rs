//! Identity registry records shared by the parsers and the exporter.
//!
//! The shapes mirror the registry data model: a [`UniqueIdentity`] aggregates
//! the per-source [`Identity`] entries that were matched to the same person,
//! plus the [`Enrollment`]s linking it to organizations.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

/// Start of an enrollment period when the source does not provide one.
pub fn default_start_date() -> NaiveDateTime {
    period_bound(1900)
}

/// End of an enrollment period when the source does not provide one.
pub fn default_end_date() -> NaiveDateTime {
    period_bound(2100)
}

fn period_bound(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .expect("valid period bound")
        .and_time(NaiveTime::MIN)
}

/// A name-keyed organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub name: String,
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A single identity as found in one data source.
///
/// Every field but `source` is optional; absent values serialize as explicit
/// `null`s so consumers see a stable shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub source: String,
    pub uuid: Option<String>,
}

impl Identity {
    /// Identity produced by a parser: no registry id yet.
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        username: Option<String>,
        source: &str,
        uuid: &str,
    ) -> Self {
        Self {
            id: None,
            name,
            email,
            username,
            source: source.to_string(),
            uuid: Some(uuid.to_string()),
        }
    }
}

/// Enrollment of a unique identity in an organization, time-bounded.
///
/// Serializes with the organization flattened to its name and the period
/// bounds as ISO-8601 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    pub uuid: String,
    #[serde(serialize_with = "organization_name")]
    pub organization: Organization,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Enrollment {
    /// Missing period bounds fall back to the default period,
    /// 1900-01-01 .. 2100-01-01.
    pub fn new(
        uuid: &str,
        organization: Organization,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            uuid: uuid.to_string(),
            organization,
            start: start.unwrap_or_else(default_start_date),
            end: end.unwrap_or_else(default_end_date),
        }
    }
}

fn organization_name<S>(organization: &Organization, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&organization.name)
}

/// A unique identity aggregating per-source identities and enrollments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueIdentity {
    pub uuid: String,
    pub identities: Vec<Identity>,
    pub enrollments: Vec<Enrollment>,
}

impl UniqueIdentity {
    pub fn new(uuid: &str) -> Self {
        Self {
            uuid: uuid.to_string(),
            identities: Vec::new(),
            enrollments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn given_no_period_when_creating_enrollment_then_uses_default_bounds() {
        let rol = Enrollment::new("John Smith", Organization::new("Example"), None, None);

        assert_eq!(rol.start, naive(1900, 1, 1));
        assert_eq!(rol.end, naive(2100, 1, 1));
    }

    #[test]
    fn given_partial_period_when_creating_enrollment_then_fills_missing_bound() {
        let rol = Enrollment::new(
            "John Smith",
            Organization::new("Example"),
            Some(naive(1999, 1, 1)),
            None,
        );

        assert_eq!(rol.start, naive(1999, 1, 1));
        assert_eq!(rol.end, naive(2100, 1, 1));
    }

    #[test]
    fn given_enrollment_when_serializing_then_flattens_organization_name() {
        let rol = Enrollment::new(
            "John Smith",
            Organization::new("Example"),
            Some(naive(1999, 1, 1)),
            Some(naive(2001, 1, 1)),
        );

        let value = serde_json::to_value(&rol).unwrap();

        assert_eq!(value["uuid"], "John Smith");
        assert_eq!(value["organization"], "Example");
        assert_eq!(value["start"], "1999-01-01T00:00:00");
        assert_eq!(value["end"], "2001-01-01T00:00:00");
    }

    #[test]
    fn given_identity_when_serializing_then_absent_fields_are_null() {
        let identity = Identity::new(None, None, Some("jsmith".into()), "scm", "jsmith");

        let value = serde_json::to_value(&identity).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 6);
        assert!(value["id"].is_null());
        assert!(value["name"].is_null());
        assert!(value["email"].is_null());
        assert_eq!(value["username"], "jsmith");
        assert_eq!(value["source"], "scm");
        assert_eq!(value["uuid"], "jsmith");
    }
}
