//! Structural rewrites that turn raw Mautic responses into the canonical
//! shape the model binding expects.
//!
//! The API mixes legacy and current naming, nests per-instance custom fields
//! under group keys, and stores collections as objects keyed by value. Each
//! rewrite below runs in place on the decoded tree. A step is a no-op when
//! its input key is absent (or explicitly null), and fails with a
//! [`ParseErrorKind::MalformedResponse`](crate::error::ParseErrorKind) error
//! when a present value has the wrong node kind.
//!
//! Step order matters: [`promote_all_fields`] must run before
//! [`flatten_field_groups`], otherwise the flat `all` map would be mistaken
//! for a field group and its values treated as field-metadata objects.

use serde_json::{Map, Value};

use crate::error::ParseError;

/// Rewrite a `GET /contacts` response tree into canonical shape.
///
/// Renames the legacy `leads` collection key to `contacts`, then runs the
/// per-contact pipeline on every element.
pub fn normalize_list_contacts(root: &mut Value) -> Result<(), ParseError> {
    let tree = match root {
        Value::Object(tree) => tree,
        other => {
            return Err(ParseError::malformed(format!(
                "expected response root to be an object, found {}",
                node_kind(other)
            )));
        }
    };

    rename_key(tree, "leads", "contacts");

    let contacts = match tree.get_mut("contacts") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(contacts)) => contacts,
        Some(other) => {
            return Err(ParseError::malformed(format!(
                "expected 'contacts' to be an array, found {}",
                node_kind(other)
            )));
        }
    };

    for (i, contact) in contacts.iter_mut().enumerate() {
        match contact {
            Value::Object(contact) => {
                normalize_contact(contact).map_err(|e| e.with_path(format!("contacts[{}]", i)))?;
            }
            other => {
                return Err(ParseError::malformed(format!(
                    "expected contact to be an object, found {}",
                    node_kind(other)
                ))
                .with_path(format!("contacts[{}]", i)));
            }
        }
    }

    Ok(())
}

/// Rewrite a `GET /contacts/{id}` response tree into canonical shape.
///
/// Renames the legacy `lead` key to `contact`, then runs the per-contact
/// pipeline on the embedded object.
pub fn normalize_get_contact(root: &mut Value) -> Result<(), ParseError> {
    let tree = match root {
        Value::Object(tree) => tree,
        other => {
            return Err(ParseError::malformed(format!(
                "expected response root to be an object, found {}",
                node_kind(other)
            )));
        }
    };

    rename_key(tree, "lead", "contact");

    match get_object_mut(tree, "contact")? {
        Some(contact) => normalize_contact(contact).map_err(|e| e.with_path("contact")),
        None => Ok(()),
    }
}

/// Run the ordered per-contact rewrites.
pub fn normalize_contact(contact: &mut Map<String, Value>) -> Result<(), ParseError> {
    promote_all_fields(contact)?;
    flatten_field_groups(contact)?;
    rename_field_order(contact)?;
    flatten_ip_addresses(contact)?;
    Ok(())
}

/// Move the flat `all` map out of the `fields` object and re-insert it as the
/// top-level `allFields` key.
///
/// The `all` entry shares a parent with the field groups but has a completely
/// different shape (alias to value, no metadata), so it is split off before
/// the groups are flattened.
pub fn promote_all_fields(contact: &mut Map<String, Value>) -> Result<(), ParseError> {
    let all = match get_object_mut(contact, "fields")? {
        Some(fields) => fields.shift_remove("all"),
        None => None,
    };
    if let Some(all) = all {
        contact.insert("allFields".to_string(), all);
    }
    Ok(())
}

/// Collapse the named field groups under `fields` into a single flat list of
/// field-metadata objects.
///
/// A group is either an object mapping alias to metadata, or an empty array,
/// which the API uses as a degenerate empty-object marker. A non-empty array
/// in group position is a format violation.
pub fn flatten_field_groups(contact: &mut Map<String, Value>) -> Result<(), ParseError> {
    let Some(groups) = take_object(contact, "fields")? else {
        return Ok(());
    };

    let mut fields = Vec::new();
    for (group_name, node) in groups {
        match node {
            Value::Object(group) => fields.extend(group.into_iter().map(|(_, field)| field)),
            Value::Array(items) if items.is_empty() => {}
            Value::Array(items) => {
                return Err(ParseError::malformed(format!(
                    "expected field group '{}' to be empty, found {} entries",
                    group_name,
                    items.len()
                )));
            }
            other => {
                return Err(ParseError::malformed(format!(
                    "expected field group '{}' to be an object, found {}",
                    group_name,
                    node_kind(&other)
                )));
            }
        }
    }

    contact.insert("fields".to_string(), Value::Array(fields));
    Ok(())
}

/// Rename the snake_case `field_order` key inside each flattened field to
/// `fieldOrder`, consistent with the rest of the schema.
pub fn rename_field_order(contact: &mut Map<String, Value>) -> Result<(), ParseError> {
    let fields = match contact.get_mut("fields") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(fields)) => fields,
        Some(other) => {
            return Err(ParseError::malformed(format!(
                "expected 'fields' to be an array, found {}",
                node_kind(other)
            )));
        }
    };

    for field in fields {
        match field {
            Value::Object(field) => rename_key(field, "field_order", "fieldOrder"),
            other => {
                return Err(ParseError::malformed(format!(
                    "expected contact field to be an object, found {}",
                    node_kind(other)
                )));
            }
        }
    }

    Ok(())
}

/// Turn the `ipAddresses` object, keyed by IP-address literal, into a flat
/// list of detail objects, each augmented with an `ipAddress` key holding its
/// original outer key.
pub fn flatten_ip_addresses(contact: &mut Map<String, Value>) -> Result<(), ParseError> {
    let Some(entries) = take_object(contact, "ipAddresses")? else {
        return Ok(());
    };

    let mut addresses = Vec::with_capacity(entries.len());
    for (ip, node) in entries {
        let mut wrapper = match node {
            Value::Object(wrapper) => wrapper,
            other => {
                return Err(ParseError::malformed(format!(
                    "expected entry for IP address '{}' to be an object, found {}",
                    ip,
                    node_kind(&other)
                )));
            }
        };
        let Some(Value::Object(mut details)) = wrapper.shift_remove("ipDetails") else {
            return Err(ParseError::malformed(format!(
                "expected an 'ipDetails' object for IP address '{}'",
                ip
            )));
        };
        details.insert("ipAddress".to_string(), Value::String(ip));
        addresses.push(Value::Object(details));
    }

    contact.insert("ipAddresses".to_string(), Value::Array(addresses));
    Ok(())
}

/// Rename `from` to `to`, keeping the value and appending at the tail.
/// No-op when `from` is absent.
fn rename_key(map: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = map.shift_remove(from) {
        map.insert(to.to_string(), value);
    }
}

/// Borrow `map[key]` as an object. Absent keys and explicit nulls read as
/// `None`; any other node kind is a malformed response.
fn get_object_mut<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> Result<Option<&'a mut Map<String, Value>>, ParseError> {
    match map.get_mut(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(obj)) => Ok(Some(obj)),
        Some(other) => Err(ParseError::malformed(format!(
            "expected '{}' to be an object, found {}",
            key,
            node_kind(other)
        ))),
    }
}

/// Remove `map[key]` and return it as an owned object, with the same
/// absent/null/wrong-kind handling as [`get_object_mut`]. The caller is
/// expected to re-insert the rewritten value under the same key.
fn take_object(
    map: &mut Map<String, Value>,
    key: &str,
) -> Result<Option<Map<String, Value>>, ParseError> {
    match map.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(_)) => {}
        Some(other) => {
            return Err(ParseError::malformed(format!(
                "expected '{}' to be an object, found {}",
                key,
                node_kind(other)
            )));
        }
    }
    match map.shift_remove(key) {
        Some(Value::Object(obj)) => Ok(Some(obj)),
        _ => Ok(None),
    }
}

fn node_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
