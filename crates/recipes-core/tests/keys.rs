use recipes_core::keys;

#[test]
fn recipe_key_round_trips_to_id() {
    let id = keys::new_id();
    let key = keys::recipe(&id);
    assert_eq!(key, format!("{id}.json"));
    assert_eq!(keys::recipe_id(&key), Some(id.as_str()));
}

#[test]
fn generated_ids_are_unique_and_valid() {
    let a = keys::new_id();
    let b = keys::new_id();
    assert_ne!(a, b);
    assert!(keys::is_valid_id(&a));
    assert!(keys::is_valid_id(&b));
}

#[test]
fn non_recipe_keys_are_ignored() {
    assert_eq!(keys::recipe_id("notes.txt"), None);
    assert_eq!(keys::recipe_id(".json"), None);
    assert_eq!(keys::recipe_id("nested/abc.json"), None);
    assert_eq!(keys::recipe_id(".hidden.json"), None);
    assert_eq!(keys::recipe_id("abc.json.tmp"), None);
}

#[test]
fn path_like_ids_are_rejected() {
    for id in ["", "..", "../etc/passwd", "a/b", "a\\b", ".env", "köttbullar"] {
        assert!(keys::validate_id(id).is_err(), "{id:?} should be rejected");
    }
    assert_eq!(keys::validate_id("pasta_01-a").unwrap(), "pasta_01-a");
}
