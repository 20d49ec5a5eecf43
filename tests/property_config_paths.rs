use confkit::{ConfigNode, ConfigStore, ConfigValue};
use proptest::prelude::*;

/// Build `{p0: {p1: {... {pn: leaf}}}}` as YAML text.
fn nested_document(path: &[String], leaf: i64) -> String {
    let mut value = ConfigValue::Int(leaf);
    for segment in path.iter().rev() {
        let mut node = ConfigNode::new();
        node.insert(segment.clone(), value);
        value = ConfigValue::Mapping(node);
    }
    serde_yaml::to_string(&value).unwrap()
}

fn segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_]{0,7}", 1..6)
}

proptest! {
    /// Property: every path written into a document resolves to its value
    #[test]
    fn prop_present_paths_resolve(path in segments(), leaf in any::<i64>()) {
        let store = ConfigStore::from_yaml_str(&nested_document(&path, leaf));
        let key = path.join(".");

        prop_assert_eq!(store.get(&key), Some(&ConfigValue::Int(leaf)));
        prop_assert_eq!(store.get_int(&key), leaf);
    }

    /// Property: descending past a scalar, or through a missing segment,
    /// resolves to nothing
    #[test]
    fn prop_untraversable_paths_are_absent(
        path in segments(),
        extra in "[a-z]{1,4}",
        leaf in any::<i64>(),
    ) {
        let store = ConfigStore::from_yaml_str(&nested_document(&path, leaf));

        let past_leaf = format!("{}.{extra}", path.join("."));
        prop_assert_eq!(store.get(&past_leaf), None);

        let mut detour = path.clone();
        detour.insert(0, format!("{}_x", path[0]));
        prop_assert_eq!(store.get(&detour.join(".")), None);
        prop_assert_eq!(store.get_int(&detour.join(".")), 0);
    }

    /// Property: integer strings coerce to the integer they spell
    #[test]
    fn prop_int_strings_coerce(n in any::<i64>()) {
        let store = ConfigStore::from_yaml_str(&format!("n: '{n}'\n"));
        prop_assert_eq!(store.get_int("n"), n);
    }
}
