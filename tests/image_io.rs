use pixcanvas::*;

use std::path::PathBuf;

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tmp(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pixcanvas_{}_{}", std::process::id(), name))
}

fn scene() -> Bitmap {
    let mut canvas = Canvas::new(Bitmap::new(12, 9));
    canvas.draw_rect(&Rect::from_ltrb(1.0, 1.0, 8.0, 6.0), &mut Paint::new(Color::rgb(0.2, 0.4, 0.6)));
    let mut b = PathBuilder::new();
    b.add_circle(Point::new(8.0, 5.0), 3.0, PathDirection::Clockwise);
    canvas.draw_path(&b.build(), &mut Paint::new(Color::rgb(1.0, 0.5, 0.0)));
    canvas.into_bitmap()
}

#[test]
fn png_round_trip() {
    setup();
    let bm = scene();
    let f = tmp("round_trip.png");
    write_bitmap(&bm, &f).unwrap();
    let back = read_bitmap(&f).unwrap();
    assert_eq!(back.width(), bm.width());
    assert_eq!(back.height(), bm.height());
    // opaque and fully transparent pixels survive exactly
    assert_eq!(back.pixels(), bm.pixels());
    assert!(img_diff(&f, &f).unwrap());
    let _ = std::fs::remove_file(&f);
}

#[test]
fn diff_finds_changes() {
    setup();
    let a = tmp("diff_a.png");
    let b = tmp("diff_b.png");
    let c = tmp("diff_c.png");
    let bm = scene();
    write_bitmap(&bm, &a).unwrap();
    let mut other = bm.clone();
    other[(0, 0)] = Pixel(0xFF00_0000);
    write_bitmap(&other, &b).unwrap();
    write_bitmap(&Bitmap::new(3, 3), &c).unwrap();
    assert!(!img_diff(&a, &b).unwrap());
    assert!(!img_diff(&a, &c).unwrap());
    for f in [a, b, c].iter() {
        let _ = std::fs::remove_file(f);
    }
}

#[test]
fn translucent_pixels_are_unpremultiplied() {
    setup();
    let mut bm = Bitmap::new(1, 1);
    bm.fill(Color::new(1.0, 0.0, 0.0, 0.5).to_pixel());
    let f = tmp("translucent.png");
    write_bitmap(&bm, &f).unwrap();
    let back = read_bitmap(&f).unwrap();
    assert_eq!(back[(0, 0)], bm[(0, 0)]);
    assert_eq!(bm[(0, 0)].to_rgba8(), [255, 0, 0, 128]);
    let _ = std::fs::remove_file(&f);
}

#[test]
fn missing_file_is_an_error() {
    setup();
    let r = read_bitmap(tmp("does_not_exist.png"));
    assert!(r.is_err());
}
