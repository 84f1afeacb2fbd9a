use mautic::normalize::{flatten_field_groups, flatten_ip_addresses, normalize_contact};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn arb_alias() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn arb_field(alias: String) -> Value {
    json!({
        "id": "1",
        "alias": alias,
        "group": "g",
        "field_order": "1"
    })
}

/// A field group: either the empty-array marker or an alias-keyed object.
fn arb_group() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!([])),
        btree_map(arb_alias(), Just(()), 0..6).prop_map(|aliases| {
            let mut group = Map::new();
            for (alias, _) in aliases {
                group.insert(alias.clone(), arb_field(alias));
            }
            Value::Object(group)
        }),
    ]
}

fn arb_groups() -> impl Strategy<Value = Vec<(String, Value)>> {
    btree_map(arb_alias(), arb_group(), 0..5)
        .prop_map(|groups| groups.into_iter().collect())
}

fn group_size(node: &Value) -> usize {
    node.as_object().map(|group| group.len()).unwrap_or(0)
}

proptest! {
    /// Flattening conserves the field count: the output length equals the
    /// sum of the non-empty group sizes.
    #[test]
    fn flattening_conserves_field_count(groups in arb_groups()) {
        let expected: usize = groups.iter().map(|(_, g)| group_size(g)).sum();

        let mut fields = Map::new();
        for (name, group) in groups {
            fields.insert(name, group);
        }
        let mut contact = Map::new();
        contact.insert("id".to_string(), json!(1));
        contact.insert("fields".to_string(), Value::Object(fields));

        flatten_field_groups(&mut contact).expect("flatten should succeed");
        let flattened = contact
            .get("fields")
            .and_then(Value::as_array)
            .expect("fields should be an array");
        prop_assert_eq!(flattened.len(), expected);
    }

    /// IP flattening is a bijection: one output entry per input key, each
    /// carrying its source key as the ipAddress value, in input order.
    #[test]
    fn ip_flattening_preserves_keys(cities in vec("[A-Za-z ]{1,12}", 0..6)) {
        let mut entries = Map::new();
        for (i, city) in cities.iter().enumerate() {
            entries.insert(
                format!("10.0.0.{}", i),
                json!({"ipDetails": {"city": city}}),
            );
        }
        let keys: Vec<String> = entries.keys().cloned().collect();

        let mut contact = Map::new();
        contact.insert("id".to_string(), json!(1));
        contact.insert("ipAddresses".to_string(), Value::Object(entries));

        flatten_ip_addresses(&mut contact).expect("flatten should succeed");
        let flattened = contact
            .get("ipAddresses")
            .and_then(Value::as_array)
            .expect("ipAddresses should be an array");

        prop_assert_eq!(flattened.len(), keys.len());
        for (entry, key) in flattened.iter().zip(&keys) {
            prop_assert_eq!(entry.get("ipAddress").and_then(Value::as_str), Some(key.as_str()));
        }
    }

    /// When the groups are drawn from the flat map's aliases, every
    /// flattened alias has an entry in the promoted allFields map.
    #[test]
    fn aliases_stay_consistent_with_the_flat_view(aliases in btree_map(arb_alias(), Just(()), 0..8)) {
        let mut all = Map::new();
        let mut core = Map::new();
        for (alias, _) in aliases {
            all.insert(alias.clone(), json!("x"));
            core.insert(alias.clone(), arb_field(alias));
        }
        let mut fields = Map::new();
        fields.insert("core".to_string(), Value::Object(core));
        fields.insert("all".to_string(), Value::Object(all));
        let mut contact = Map::new();
        contact.insert("id".to_string(), json!(1));
        contact.insert("fields".to_string(), Value::Object(fields));

        normalize_contact(&mut contact).expect("normalize should succeed");

        let all_fields = contact
            .get("allFields")
            .and_then(Value::as_object)
            .expect("allFields should be an object");
        let flattened = contact
            .get("fields")
            .and_then(Value::as_array)
            .expect("fields should be an array");
        for field in flattened {
            let alias = field.get("alias").and_then(Value::as_str).expect("alias");
            prop_assert!(all_fields.contains_key(alias), "alias '{}' missing", alias);
        }
    }
}
