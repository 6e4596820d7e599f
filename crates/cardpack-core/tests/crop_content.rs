use cardpack_core::model::Rect;
use cardpack_core::pipeline::{content_rect, crop_to_content};
use image::{Rgba, RgbaImage};

fn bordered(w: u32, h: u32, border: u32) -> RgbaImage {
    let mut img = RgbaImage::new(w, h);
    for y in border..h - border {
        for x in border..w - border {
            img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
        }
    }
    img
}

#[test]
fn bounding_rect_excludes_transparent_border() {
    let img = bordered(100, 100, 20);
    let r = content_rect(&img);
    assert_eq!(r, Rect::new(20, 20, 60, 60));
    let cropped = crop_to_content(&img);
    assert_eq!(cropped.dimensions(), (60, 60));
    assert_eq!(*cropped.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
}

#[test]
fn crop_is_idempotent() {
    let img = bordered(50, 40, 5);
    let once = crop_to_content(&img);
    let twice = crop_to_content(&once);
    assert_eq!(once, twice);
}

#[test]
fn single_opaque_pixel_crops_to_one_by_one() {
    let mut img = RgbaImage::new(30, 30);
    img.put_pixel(7, 11, Rgba([0, 255, 0, 1]));
    let r = content_rect(&img);
    assert_eq!(r, Rect::new(7, 11, 1, 1));
}

#[test]
fn fully_transparent_image_passes_through_unchanged() {
    let img = RgbaImage::new(12, 8);
    let r = content_rect(&img);
    assert_eq!(r, Rect::new(0, 0, 12, 8));
    assert_eq!(crop_to_content(&img), img);
}

#[test]
fn fully_opaque_image_is_not_cropped() {
    let mut img = RgbaImage::new(10, 10);
    for p in img.pixels_mut() {
        *p = Rgba([1, 2, 3, 255]);
    }
    assert_eq!(crop_to_content(&img), img);
}
