use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Endpoint results ────────────────────────────────────────────────────────

/// Result of the `GET /contacts` endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListContactsResult {
    /// Total number of contacts matching the query, across all pages.
    #[serde(default, deserialize_with = "de::int_or_zero")]
    pub total: i64,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// Result of the `GET /contacts/{id}` endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetContactResult {
    pub contact: Contact,
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A Mautic contact, built from the normalized response tree.
///
/// Every field except `id` is optional at the mapping layer: the API returns
/// sparse records for newly created or system-created contacts. Numeric
/// fields that arrive as null map to 0, matching the upstream behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    #[serde(default, with = "crate::datetime::optional", skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::int_or_zero")]
    pub created_by: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user: Option<String>,
    #[serde(default, with = "crate::datetime::optional", skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::int_or_zero")]
    pub modified_by: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by_user: Option<String>,
    #[serde(default, deserialize_with = "de::int_or_zero")]
    pub points: i64,
    #[serde(default, with = "crate::datetime::optional", skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::datetime::optional", skip_serializing_if = "Option::is_none")]
    pub date_identified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "de::bool_or_false")]
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_profile_image: Option<String>,
    /// Flat alias-to-value view of the custom fields. Every alias present in
    /// `fields` has an entry here, possibly null-valued.
    #[serde(default)]
    pub all_fields: IndexMap<String, Option<String>>,
    /// Rich metadata view of the same custom-field set.
    #[serde(default)]
    pub fields: Vec<ContactField>,
    #[serde(default)]
    pub ip_addresses: Vec<IpAddress>,
    /// Not yet mapped to a typed model; carried through as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Value>,
    /// Not yet mapped to a typed model; carried through as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
}

/// Metadata for one custom field of a contact.
///
/// `alias` is unique within one contact's field list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactField {
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub label: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub alias: String,
    #[serde(rename = "type", default, deserialize_with = "de::string_or_empty")]
    pub field_type: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Display position. The API sends this as a quoted digit string.
    #[serde(default, deserialize_with = "de::int_or_zero")]
    pub field_order: i64,
}

/// One IP address a contact was seen from, with its geolocation details.
///
/// The address itself is promoted from the map key it arrives under; the
/// remaining attributes come from the nested details object.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddress {
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    #[serde(default, deserialize_with = "de::float_or_zero")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "de::float_or_zero")]
    pub longitude: f64,
}

// ─── Scalar coercion ─────────────────────────────────────────────────────────

/// Lenient scalar deserializers for the irregular leaf values the API emits:
/// integers as quoted digit strings, nulls where a number or string is
/// documented. Anything outside those shapes is a type mismatch.
mod de {
    use serde::{Deserialize, Deserializer, de::Error};
    use serde_json::Value;

    fn kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }

    pub fn int_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| Error::custom(format!("expected an integer, got {}", n))),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| Error::custom(format!("expected an integer, got '{}'", s))),
            Some(other) => Err(Error::custom(format!(
                "expected an integer, got {}",
                kind(&other)
            ))),
        }
    }

    pub fn float_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(0.0),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| Error::custom(format!("expected a number, got {}", n))),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| Error::custom(format!("expected a number, got '{}'", s))),
            Some(other) => Err(Error::custom(format!(
                "expected a number, got {}",
                kind(&other)
            ))),
        }
    }

    pub fn bool_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
    }

    pub fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(Error::custom(format!(
                "expected a string, got {}",
                kind(&other)
            ))),
        }
    }
}
