// End-to-end tests that drive the built binary
use calstrip::compositor::{pick_offset, strip_color, NUM_STRIPS, STRIP_HEIGHT};
use image::{ImageFormat, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn calstrip(args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_calstrip"))
        .args(args)
        .output()
        .expect("failed to launch calstrip")
}

fn calstrip_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_calstrip"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to launch calstrip")
}

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([(x * 20) as u8, (y * 9) as u8, 128, 255]))
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_png_gets_mirrored_strips() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let source = gradient(8, 10);
    source.save(&input).unwrap();

    let out = calstrip(&[OsStr::new("--seed"), OsStr::new("11"), input.as_os_str()]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["Width: 8 Height: 10 Format: png"]);

    let output = dir.path().join("photo_46.png");
    let result = image::open(&output).unwrap().to_rgba8();
    assert_eq!(result.dimensions(), (8, 46));

    let offset = pick_offset(&mut StdRng::seed_from_u64(11));
    let region = STRIP_HEIGHT * NUM_STRIPS;
    for i in 0..NUM_STRIPS {
        let color = strip_color(i, offset);
        for dy in 0..STRIP_HEIGHT {
            assert_eq!(*result.get_pixel(0, i * STRIP_HEIGHT + dy), color);
            assert_eq!(*result.get_pixel(7, 10 + region + i * STRIP_HEIGHT + dy), color);
        }
    }
    for y in 0..10 {
        for x in 0..8 {
            assert_eq!(result.get_pixel(x, y + region), source.get_pixel(x, y));
        }
    }
}

#[test]
fn test_jpeg_and_gif_keep_their_format() {
    let dir = tempdir().unwrap();
    for (name, format, expected) in [
        ("pic.jpg", ImageFormat::Jpeg, "pic_52.jpg"),
        ("anim.gif", ImageFormat::Gif, "anim_52.gif"),
    ] {
        let input = dir.path().join(name);
        let source = image::DynamicImage::ImageRgba8(gradient(16, 16));
        match format {
            // JPEG has no alpha channel.
            ImageFormat::Jpeg => source.to_rgb8().save_with_format(&input, format).unwrap(),
            _ => source.save_with_format(&input, format).unwrap(),
        }

        let out = calstrip(&[input.as_os_str()]);
        assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

        let bytes = fs::read(dir.path().join(expected)).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), format);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 52));
    }
}

#[test]
fn test_missing_path_exits_one_without_output() {
    let dir = tempdir().unwrap();
    let out = calstrip(&[dir.path().join("ghost.png").as_os_str()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("path does not exist"));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn test_no_argument_prints_usage() {
    let out = calstrip(&[]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn test_unsupported_format_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("legacy.bmp");
    fs::write(&input, b"BM\0\0\0\0\0\0\0\0\0\0\0\0\0\0").unwrap();

    let out = calstrip(&[input.as_os_str()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unsupported image format: bmp"));
    assert_eq!(entries(dir.path()), vec!["legacy.bmp".to_string()]);
}

#[test]
fn test_existing_output_is_overwritten() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("shot.png");
    gradient(4, 4).save(&input).unwrap();
    let output = dir.path().join("shot_40.png");
    fs::write(&output, b"stale").unwrap();

    let out = calstrip(&[input.as_os_str()]);

    assert!(out.status.success());
    let result = image::open(&output).unwrap();
    assert_eq!((result.width(), result.height()), (4, 40));
}

#[test]
fn test_extra_arguments_are_ignored() {
    let dir = tempdir().unwrap();
    gradient(5, 2).save(dir.path().join("a.png")).unwrap();

    let out = calstrip_in(dir.path(), &["a.png", "extra", "more"]);

    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        entries(dir.path()),
        vec!["a.png".to_string(), "a_38.png".to_string()]
    );
}

#[test]
fn test_hyphenated_missing_path_exits_one() {
    let dir = tempdir().unwrap();
    let out = calstrip_in(dir.path(), &["-nofile.png"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("path does not exist"));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn test_bad_option_value_exits_one() {
    let dir = tempdir().unwrap();
    gradient(2, 2).save(dir.path().join("a.png")).unwrap();

    let out = calstrip_in(dir.path(), &["--seed", "not-a-number", "a.png"]);

    assert_eq!(out.status.code(), Some(1));
    assert_eq!(entries(dir.path()), vec!["a.png".to_string()]);
}

#[test]
fn test_help_still_succeeds() {
    let out = calstrip(&[OsStr::new("--help")]);

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("IMAGE"));
}
