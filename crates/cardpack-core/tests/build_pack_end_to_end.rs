use cardpack_core::config::{NamingMode, PackConfig};
use cardpack_core::model::{CANVAS_HEIGHT, CANVAS_WIDTH, ImageOutcome};
use cardpack_core::pipeline::build_pack;
use image::{Rgba, RgbaImage};
use std::fs;
use std::path::Path;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    let mut img = RgbaImage::new(w, h);
    for p in img.pixels_mut() {
        *p = Rgba(rgba);
    }
    img
}

fn bordered_card(w: u32, h: u32, border: u32, rgba: [u8; 4]) -> RgbaImage {
    let mut img = RgbaImage::new(w, h);
    for y in border..h - border {
        for x in border..w - border {
            img.put_pixel(x, y, Rgba(rgba));
        }
    }
    img
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn id_mode_with_back_produces_textures_and_descriptors() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    solid(300, 200, [0, 0, 255, 255])
        .save(images.join("back.png"))
        .unwrap();
    bordered_card(100, 100, 20, [255, 0, 0, 255])
        .save(images.join("card1.png"))
        .unwrap();

    let out = dir.path().join("pack");
    let cfg = PackConfig::builder()
        .mode(NamingMode::Id)
        .start_id(5)
        .autofit(false)
        .output_dir(&out)
        .build();
    let report = build_pack(&images, &cfg, None).unwrap();

    assert!(report.back_written);
    assert_eq!(report.textures, vec!["5".to_string()]);
    assert_eq!(report.written(), 2);
    assert_eq!(report.failed(), 0);

    let textures = out.join("assets/card/textures/item");
    let back = image::open(textures.join("back.png")).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
    let front = image::open(textures.join("5.png")).unwrap().to_rgba8();
    assert_eq!(front.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
    // 60x60 cropped content scaled by min(650/60, 900/60) -> 650x650 centered
    assert_eq!(*front.get_pixel(325, 450), Rgba([255, 0, 0, 255]));
    assert_eq!(front.get_pixel(325, 124)[3], 0);
    assert_eq!(front.get_pixel(325, 125)[3], 255);

    let item = read_json(&out.join("assets/card/items/5.json"));
    assert_eq!(item["model"]["model"], "card:item/5");
    let model = read_json(&out.join("assets/card/models/item/5.json"));
    assert_eq!(model["textures"]["0"], "card:item/back");
    assert_eq!(model["textures"]["1"], "card:item/5");

    let manifest = read_json(&out.join("pack.mcmeta"));
    assert_eq!(manifest["pack"]["pack_format"], 46);
}

#[test]
fn name_mode_sanitizes_and_collapses_back_slot() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    solid(64, 64, [10, 20, 30, 255])
        .save(images.join("My Card #1.png"))
        .unwrap();

    let out = dir.path().join("pack");
    let cfg = PackConfig::builder()
        .mode(NamingMode::Name)
        .output_dir(&out)
        .build();
    let report = build_pack(&images, &cfg, None).unwrap();

    assert!(!report.back_written);
    assert_eq!(report.textures, vec!["my_card_1".to_string()]);
    assert_eq!(report.name_map.len(), 1);
    assert_eq!(report.name_map[0].original, "My Card #1.png");

    assert!(out.join("assets/card/textures/item/my_card_1.png").exists());
    let model = read_json(&out.join("assets/card/models/item/my_card_1.json"));
    // no back texture produced, both slots point at the item's own texture
    assert_eq!(model["textures"]["0"], "card:item/my_card_1");
    assert_eq!(model["textures"]["1"], "card:item/my_card_1");
    assert!(out.join("assets/card/items/my_card_1.json").exists());
}

#[test]
fn colliding_sanitized_names_overwrite_one_texture() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    solid(32, 32, [200, 0, 0, 255])
        .save(images.join("My Card.png"))
        .unwrap();
    solid(32, 32, [0, 200, 0, 255])
        .save(images.join("my card.png"))
        .unwrap();

    let out = dir.path().join("pack");
    let cfg = PackConfig::builder()
        .mode(NamingMode::Name)
        .output_dir(&out)
        .build();
    let report = build_pack(&images, &cfg, None).unwrap();

    // both sources process and write, to the same name
    assert_eq!(report.written(), 2);
    assert_eq!(
        report.textures,
        vec!["my_card".to_string(), "my_card".to_string()]
    );
    assert_eq!(report.name_map.len(), 2);

    let textures: Vec<_> = fs::read_dir(out.join("assets/card/textures/item"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name())
        .collect();
    assert_eq!(textures, vec!["my_card.png"]);
    let items: Vec<_> = fs::read_dir(out.join("assets/card/items"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name())
        .collect();
    assert_eq!(items, vec!["my_card.json"]);
    assert!(out.join("assets/card/models/item/my_card.json").exists());
}

#[test]
fn back_routing_ignores_case_and_skips_naming() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    solid(40, 40, [1, 1, 1, 255])
        .save(images.join("Back.PNG"))
        .unwrap();
    solid(40, 40, [2, 2, 2, 255])
        .save(images.join("ace.png"))
        .unwrap();

    let out = dir.path().join("pack");
    let cfg = PackConfig::builder()
        .mode(NamingMode::Id)
        .start_id(1)
        .output_dir(&out)
        .build();
    let report = build_pack(&images, &cfg, None).unwrap();

    assert!(report.back_written);
    // the back file consumed no ID
    assert_eq!(report.textures, vec!["1".to_string()]);
    assert!(out.join("assets/card/textures/item/back.png").exists());
    // no descriptors are generated for the back texture itself
    assert!(!out.join("assets/card/items/back.json").exists());
}

#[test]
fn one_bad_image_does_not_abort_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("aaa.png"), b"not a png at all").unwrap();
    solid(32, 32, [5, 6, 7, 255])
        .save(images.join("card.png"))
        .unwrap();

    let out = dir.path().join("pack");
    let cfg = PackConfig::builder()
        .mode(NamingMode::Id)
        .start_id(1)
        .output_dir(&out)
        .build();
    let report = build_pack(&images, &cfg, None).unwrap();

    assert_eq!(report.failed(), 1);
    // the failed image consumed no ID, so the good one gets start_id
    assert_eq!(report.textures, vec!["1".to_string()]);
    let failed: Vec<_> = report
        .results
        .iter()
        .filter(|r| matches!(r.outcome, ImageOutcome::Failed { .. }))
        .collect();
    assert_eq!(failed[0].source, "aaa.png");
    assert!(out.join("assets/card/textures/item/1.png").exists());
}

#[test]
fn enumeration_order_is_lexicographic_for_id_assignment() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    for name in ["zeta.png", "alpha.png", "mid.png"] {
        solid(16, 16, [9, 9, 9, 255]).save(images.join(name)).unwrap();
    }

    let out = dir.path().join("pack");
    let cfg = PackConfig::builder()
        .mode(NamingMode::Id)
        .start_id(10)
        .output_dir(&out)
        .build();
    let report = build_pack(&images, &cfg, None).unwrap();

    let order: Vec<(&str, &str)> = report
        .results
        .iter()
        .filter_map(|r| match &r.outcome {
            ImageOutcome::Written { name } => Some((r.source.as_str(), name.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(
        order,
        vec![("alpha.png", "10"), ("mid.png", "11"), ("zeta.png", "12")]
    );
}

#[test]
fn empty_namespace_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = PackConfig::builder()
        .namespace("")
        .output_dir(dir.path().join("pack"))
        .build();
    assert!(build_pack(&dir.path().join("images"), &cfg, None).is_err());
}
