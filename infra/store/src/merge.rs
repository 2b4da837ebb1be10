//! JSON-level merge rules shared by the repositories.
//!
//! Entity updates are shallow: a supplied field replaces the stored field
//! wholesale, arrays and objects included. Singleton updates go one level
//! deeper: a supplied object merges field-by-field into a stored object
//! instead of replacing it.

use serde_json::{Map, Value};

/// Shallow-merges `patch` over `base`. The `id` key is never applied;
/// identity is assigned once at creation and stays immutable.
pub(crate) fn merge_entity(base: &mut Value, patch: Map<String, Value>) {
    let Value::Object(fields) = base else {
        return;
    };

    for (key, value) in patch {
        if key == "id" {
            continue;
        }
        fields.insert(key, value);
    }
}

/// Merges `patch` over `base`, one level deep: when both sides hold an
/// object under the same key, the inner fields merge instead of the whole
/// record being replaced. Everything else replaces wholesale.
pub(crate) fn merge_section(base: &mut Value, patch: Map<String, Value>) {
    let Value::Object(fields) = base else {
        return;
    };

    for (key, value) in patch {
        match (fields.get_mut(&key), value) {
            (Some(Value::Object(current)), Value::Object(incoming)) => {
                for (inner_key, inner_value) in incoming {
                    current.insert(inner_key, inner_value);
                }
            },
            (_, value) => {
                fields.insert(key, value);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn entity_merge_replaces_top_level_fields() {
        let mut base = json!({"id": "a1", "title": "old", "tags": ["x", "y"]});
        merge_entity(&mut base, object(json!({"title": "new", "tags": ["z"]})));

        assert_eq!(base, json!({"id": "a1", "title": "new", "tags": ["z"]}));
    }

    #[test]
    fn entity_merge_never_touches_id() {
        let mut base = json!({"id": "a1", "title": "old"});
        merge_entity(&mut base, object(json!({"id": "evil", "title": "new"})));

        assert_eq!(base["id"], "a1");
        assert_eq!(base["title"], "new");
    }

    #[test]
    fn entity_merge_keeps_absent_fields() {
        let mut base = json!({"id": "a1", "title": "old", "copies": 3});
        merge_entity(&mut base, object(json!({"title": "new"})));

        assert_eq!(base["copies"], 3);
    }

    #[test]
    fn section_merge_goes_one_level_deep() {
        let mut base = json!({
            "rooms": {"title": "Rooms", "subtitle": "Sleep well"},
            "dining": {"title": "Dining", "subtitle": "Eat well"}
        });
        merge_section(&mut base, object(json!({"dining": {"title": "Taste"}})));

        assert_eq!(base["dining"]["title"], "Taste");
        assert_eq!(base["dining"]["subtitle"], "Eat well");
        assert_eq!(base["rooms"]["title"], "Rooms");
    }

    #[test]
    fn section_merge_replaces_scalars_wholesale() {
        let mut base = json!({"siteName": "Veranda", "tagline": "old"});
        merge_section(&mut base, object(json!({"tagline": "new"})));

        assert_eq!(base, json!({"siteName": "Veranda", "tagline": "new"}));
    }

    #[test]
    fn section_merge_object_over_scalar_replaces() {
        let mut base = json!({"contact": "none"});
        merge_section(&mut base, object(json!({"contact": {"phone": "1"}})));

        assert_eq!(base["contact"], json!({"phone": "1"}));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashMap;

        fn flat_fields() -> impl Strategy<Value = HashMap<String, i64>> {
            prop::collection::hash_map("[a-z]{1,6}", any::<i64>(), 0..8)
        }

        fn as_map(fields: &HashMap<String, i64>) -> Map<String, Value> {
            fields.iter().map(|(k, v)| (k.clone(), json!(v))).collect()
        }

        proptest! {
            #[test]
            fn entity_merge_is_union_with_patch_precedence(
                base_fields in flat_fields(),
                patch_fields in flat_fields(),
            ) {
                let mut base_map = as_map(&base_fields);
                base_map.insert("id".to_owned(), json!("stable"));
                let mut base = Value::Object(base_map);

                let mut patch = as_map(&patch_fields);
                patch.insert("id".to_owned(), json!("forged"));

                merge_entity(&mut base, patch);

                prop_assert_eq!(&base["id"], &json!("stable"));
                for (key, value) in &patch_fields {
                    prop_assert_eq!(&base[key], &json!(value));
                }
                for (key, value) in &base_fields {
                    if !patch_fields.contains_key(key) {
                        prop_assert_eq!(&base[key], &json!(value));
                    }
                }
            }

            #[test]
            fn section_merge_unions_sub_records(
                base_inner in flat_fields(),
                patch_inner in flat_fields(),
            ) {
                let mut base = json!({"section": as_map(&base_inner)});
                let patch =
                    Map::from_iter([("section".to_owned(), Value::Object(as_map(&patch_inner)))]);

                merge_section(&mut base, patch);

                for (key, value) in &patch_inner {
                    prop_assert_eq!(&base["section"][key], &json!(value));
                }
                for (key, value) in &base_inner {
                    if !patch_inner.contains_key(key) {
                        prop_assert_eq!(&base["section"][key], &json!(value));
                    }
                }
            }
        }
    }
}
