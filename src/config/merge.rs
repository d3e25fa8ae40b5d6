//! Configuration merge logic
//!
//! Deep merge with:
//! - Objects: deep-merge by key
//! - Everything else: override (second wins)

use serde_json::Value;

/// Deep merge two JSON trees.
///
/// Merge semantics:
/// - Objects: deep-merge by key (recursive)
/// - Scalars, arrays, null, and mixed pairings: overlay wins entirely
///
/// Keys absent from the overlay keep their base value. Only mappings are
/// ever merged; when the two sides diverge in type the overlay replaces the
/// base, including an overlay scalar replacing a base sub-tree.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        // Both objects: deep merge
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        // Any other case: overlay wins
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_override() {
        let base = json!({"message": "default"});
        let overlay = json!({"message": "custom"});
        let result = deep_merge(base, overlay);
        assert_eq!(result["message"], "custom");
    }

    #[test]
    fn test_object_deep_merge() {
        let base = json!({
            "twitter": {
                "consumer": {
                    "key": null,
                    "secret": null
                }
            }
        });
        let overlay = json!({
            "twitter": {
                "consumer": {
                    "key": "abc"
                }
            }
        });
        let result = deep_merge(base, overlay);

        // key should be overridden
        assert_eq!(result["twitter"]["consumer"]["key"], "abc");
        // secret should be preserved
        assert!(result["twitter"]["consumer"]["secret"].is_null());
    }

    #[test]
    fn test_add_new_key() {
        let base = json!({"a": 1});
        let overlay = json!({"b": 2});
        let result = deep_merge(base, overlay);

        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 2);
    }

    #[test]
    fn test_null_override() {
        let base = json!({"value": "set"});
        let overlay = json!({"value": null});
        let result = deep_merge(base, overlay);

        assert!(result["value"].is_null());
    }

    #[test]
    fn test_scalar_replaces_subtree() {
        let base = json!({"twitter": {"consumer": {"key": "abc"}}});
        let overlay = json!({"twitter": "off"});
        let result = deep_merge(base, overlay);

        assert_eq!(result["twitter"], "off");
    }

    #[test]
    fn test_subtree_replaces_scalar() {
        let base = json!({"twitter": "off"});
        let overlay = json!({"twitter": {"message": "hi"}});
        let result = deep_merge(base, overlay);

        assert_eq!(result["twitter"]["message"], "hi");
    }

    #[test]
    fn test_empty_overlay_is_identity() {
        let base = json!({"twitter": {"message": "hi", "consumer": {"key": null}}});
        let result = deep_merge(base.clone(), json!({}));
        assert_eq!(result, base);
    }

    #[test]
    fn test_self_merge_is_idempotent() {
        let tree = json!({"twitter": {"message": "hi", "consumer": {"key": "abc"}}});
        let result = deep_merge(tree.clone(), tree.clone());
        assert_eq!(result, tree);
    }

    #[test]
    fn test_nested_deep_merge() {
        let base = json!({
            "level1": {
                "level2": {
                    "a": 1,
                    "b": 2
                }
            }
        });
        let overlay = json!({
            "level1": {
                "level2": {
                    "b": 3,
                    "c": 4
                }
            }
        });
        let result = deep_merge(base, overlay);

        assert_eq!(result["level1"]["level2"]["a"], 1);
        assert_eq!(result["level1"]["level2"]["b"], 3);
        assert_eq!(result["level1"]["level2"]["c"], 4);
    }
}
