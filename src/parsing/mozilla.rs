//! Parser for Mozillians community-directory export files.
//!
//! The export is a JSON document whose top level carries a `results` array
//! of member objects. Every member maps to one unique identity keyed by the
//! member username, enrolled in the [`MOZILLIANS_ORG`] organization. Besides
//! the base identity, members contribute one extra identity per IRC nick
//! that differs from the username and one per alternate email address.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use tracing::debug;

use crate::errors::{Error, Result};
use crate::model::{Enrollment, Identity, Organization, UniqueIdentity};

/// Organization every parsed identity is enrolled in.
pub const MOZILLIANS_ORG: &str = "Mozillians";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug)]
pub struct MozilliansParser {
    identities: Vec<UniqueIdentity>,
    organizations: Vec<Organization>,
}

impl MozilliansParser {
    /// Parse `stream`, tagging every identity with `source`.
    pub fn new(stream: &str, source: &str) -> Result<Self> {
        if stream.is_empty() {
            return Err(Error::InvalidFormat("stream cannot be empty".to_string()));
        }

        let json = load_json(stream)?;
        let identities = parse_identities(&json, source)?;

        Ok(Self {
            identities,
            organizations: vec![Organization::new(MOZILLIANS_ORG)],
        })
    }

    /// Parsed unique identities, sorted by uuid.
    pub fn identities(&self) -> &[UniqueIdentity] {
        &self.identities
    }

    /// Parsed organizations.
    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn into_parts(self) -> (Vec<UniqueIdentity>, Vec<Organization>) {
        (self.identities, self.organizations)
    }
}

fn load_json(stream: &str) -> Result<Value> {
    serde_json::from_str(stream)
        .map_err(|e| Error::InvalidFormat(format!("invalid json format. {e}")))
}

fn parse_identities(json: &Value, source: &str) -> Result<Vec<UniqueIdentity>> {
    let results = json
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| attribute_not_found("results"))?;

    let mut uidentities = Vec::with_capacity(results.len());
    for mozillian in results {
        uidentities.push(parse_mozillian(mozillian, source)?);
    }
    uidentities.sort_by(|a, b| a.uuid.cmp(&b.uuid));

    debug!(count = uidentities.len(), "parsed mozillians identities");

    Ok(uidentities)
}

fn parse_mozillian(mozillian: &Value, source: &str) -> Result<UniqueIdentity> {
    let name = clean_string(required(mozillian, "full_name")?);
    let username = clean_string(required(mozillian, "username")?)
        .ok_or_else(|| Error::InvalidFormat("username cannot be empty".to_string()))?;
    let email = optional_string(mozillian, "email");

    // The username doubles as the unique identity key.
    let uuid = username.clone();
    let mut uid = UniqueIdentity::new(&uuid);

    uid.identities.push(Identity::new(
        name.clone(),
        email.clone(),
        Some(username.clone()),
        source,
        &uuid,
    ));

    if let Some(ircname) = optional_string(mozillian, "ircname") {
        if ircname != username {
            uid.identities.push(Identity::new(
                name.clone(),
                email.clone(),
                Some(ircname),
                source,
                &uuid,
            ));
        }
    }

    if let Some(alternates) = mozillian.get("alternate_emails").and_then(Value::as_array) {
        for alternate in alternates {
            if let Some(alternate) = clean_string(alternate) {
                uid.identities.push(Identity::new(
                    name.clone(),
                    Some(alternate),
                    Some(username.clone()),
                    source,
                    &uuid,
                ));
            }
        }
    }

    let start = enrollment_start(mozillian)?;
    uid.enrollments.push(Enrollment::new(
        &uuid,
        Organization::new(MOZILLIANS_ORG),
        start,
        None,
    ));

    Ok(uid)
}

/// Membership date, when the member recorded one.
fn enrollment_start(mozillian: &Value) -> Result<Option<NaiveDateTime>> {
    let Some(date) = optional_string(mozillian, "date_mozillian") else {
        return Ok(None);
    };

    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
        .map_err(|e| Error::InvalidFormat(format!("invalid date format. {e}")))?;

    Ok(Some(date.and_time(NaiveTime::MIN)))
}

fn required<'a>(mozillian: &'a Value, attr: &str) -> Result<&'a Value> {
    mozillian.get(attr).ok_or_else(|| attribute_not_found(attr))
}

fn optional_string(mozillian: &Value, attr: &str) -> Option<String> {
    mozillian.get(attr).and_then(clean_string)
}

/// String content of a JSON value; empty strings and non-strings are absent.
fn clean_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn attribute_not_found(attr: &str) -> Error {
    Error::InvalidFormat(format!("Attribute {attr} not found"))
}
