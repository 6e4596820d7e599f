use cardpack_core::config::NamingMode;
use cardpack_core::naming::{AssetNamer, is_back_file, sanitize_file_name};
use std::path::Path;

#[test]
fn sanitize_strips_and_lowercases() {
    assert_eq!(sanitize_file_name("My Card #1.png"), "my_card_1.png");
    assert_eq!(sanitize_file_name("Foo-Bar.JPEG"), "foo-bar.png");
    assert_eq!(sanitize_file_name("plain"), "plain.png");
    assert_eq!(sanitize_file_name("we!rd (copy).jpg"), "werd_copy.png");
}

#[test]
fn sanitize_is_idempotent() {
    for name in ["my_card_1.png", "foo-bar.png", "a.png"] {
        assert_eq!(sanitize_file_name(name), name);
    }
}

#[test]
fn back_detection_is_case_insensitive() {
    assert!(is_back_file(Path::new("images/back.png")));
    assert!(is_back_file(Path::new("images/Back.PNG")));
    assert!(is_back_file(Path::new("BACK.jpeg")));
    assert!(!is_back_file(Path::new("backside.png")));
    assert!(!is_back_file(Path::new("back.old.png")));
}

#[test]
fn id_policy_counts_from_start_id() {
    let mut namer = AssetNamer::new(NamingMode::Id, 5);
    assert_eq!(namer.assign("whatever.png"), "5");
    assert_eq!(namer.assign("other.jpg"), "6");
    assert_eq!(namer.assign("more.png"), "7");
    // ID policy keeps no name mapping
    assert!(namer.records().is_empty());
}

#[test]
fn distinct_sources_may_collide_after_sanitizing() {
    // Collisions silently overwrite; both assignments yield the same base name.
    assert_eq!(sanitize_file_name("My Card.png"), "my_card.png");
    assert_eq!(sanitize_file_name("my card.png"), "my_card.png");
    let mut namer = AssetNamer::new(NamingMode::Name, 1);
    assert_eq!(namer.assign("My Card.png"), "my_card");
    assert_eq!(namer.assign("my card.png"), "my_card");
    assert_eq!(namer.records().len(), 2);
}

#[test]
fn name_policy_records_mapping() {
    let mut namer = AssetNamer::new(NamingMode::Name, 1);
    assert_eq!(namer.assign("My Card #1.png"), "my_card_1");
    assert_eq!(namer.assign("Ace of Spades.jpg"), "ace_of_spades");
    let records = namer.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].original, "My Card #1.png");
    assert_eq!(records[0].clean_name, "my_card_1");
}
