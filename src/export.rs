//! SortingHat identities export document.
//!
//! The document is a single JSON object with exactly five top-level keys:
//!
//! ```json
//! {
//!     "blacklist": [],
//!     "organizations": { "<name>": {} },
//!     "source": "<label>",
//!     "time": "<ISO-8601 timestamp>",
//!     "uidentities": { "<uuid>": { ... } }
//! }
//! ```
//!
//! Object keys are ordered lexicographically at every level and the output
//! is pretty-printed with 4-space indentation, so identical input always
//! yields byte-identical output (modulo the `time` stamp).

use chrono::Utc;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use tracing::debug;

use crate::errors::Result;
use crate::model::{Organization, UniqueIdentity};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Serialize the export document for `uidentities` and `organizations`.
///
/// The returned string carries no trailing newline; writers append exactly
/// one when emitting the document.
pub fn to_json(
    uidentities: &[UniqueIdentity],
    organizations: &[Organization],
    source: &str,
) -> Result<String> {
    let document = export_document(uidentities, organizations, source)?;

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Build the export document. The `time` field is stamped at call time.
pub fn export_document(
    uidentities: &[UniqueIdentity],
    organizations: &[Organization],
    source: &str,
) -> Result<Value> {
    let orgs: Map<String, Value> = organizations
        .iter()
        .map(|org| (org.name.clone(), Value::Object(Map::new())))
        .collect();

    let mut uids = Map::new();
    for uid in uidentities {
        uids.insert(uid.uuid.clone(), uidentity_value(uid)?);
    }

    debug!(
        source,
        uidentities = uids.len(),
        organizations = orgs.len(),
        "built export document"
    );

    let mut document = Map::new();
    document.insert(
        "time".to_string(),
        Value::String(Utc::now().format(TIME_FORMAT).to_string()),
    );
    document.insert("source".to_string(), Value::String(source.to_string()));
    document.insert("blacklist".to_string(), Value::Array(Vec::new()));
    document.insert("organizations".to_string(), Value::Object(orgs));
    document.insert("uidentities".to_string(), Value::Object(uids));

    Ok(Value::Object(document))
}

/// One `uidentities` entry: scalar fields plus the identities (sorted by
/// username) and the enrollments (source order preserved).
fn uidentity_value(uid: &UniqueIdentity) -> Result<Value> {
    let mut identities = uid.identities.clone();
    identities.sort_by(|a, b| a.username.cmp(&b.username));

    let mut object = Map::new();
    object.insert("uuid".to_string(), Value::String(uid.uuid.clone()));
    object.insert("profile".to_string(), Value::Null);
    object.insert("identities".to_string(), serde_json::to_value(&identities)?);
    object.insert(
        "enrollments".to_string(),
        serde_json::to_value(&uid.enrollments)?,
    );

    Ok(Value::Object(object))
}
