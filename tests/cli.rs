use assert_cmd::prelude::*;
use image::Rgba;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;
use tilebrot::{Formula, RenderConfig, TileAddress, TileRenderer};

fn cli() -> Command {
    Command::cargo_bin("tilebrot").unwrap()
}

#[test]
fn writes_the_root_tile_as_png() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("root.png");

    cli().arg("--output").arg(&output).assert().success();

    let tile = image::open(&output).unwrap().to_rgba();
    assert_eq!(tile.dimensions(), (256, 256));
    assert_eq!(*tile.get_pixel(128, 128), Rgba([191, 64, 64, 255]));
}

#[test]
fn renders_the_requested_tile() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("tile.png");

    cli()
        .args(&["--tile", "/3/2/5.png", "--formula", "mandelbox"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let expected = TileRenderer::new(RenderConfig::with_formula(Formula::Mandelbox))
        .render(&TileAddress::new(3, 2, 5).unwrap());
    let written = image::open(&output).unwrap().to_rgba();
    assert!(written.into_raw() == expected.into_raw());
}

#[test]
fn rejects_tiles_outside_the_grid() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("never.png");

    cli()
        .args(&["--tile", "1/2/0"])
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the 2x2 grid").from_utf8());
    assert!(!output.exists());
}

#[test]
fn rejects_malformed_tiles() {
    let dir = tempdir().unwrap();

    cli()
        .args(&["--tile", "1/-1/0"])
        .arg("--output")
        .arg(dir.path().join("never.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse tile address").from_utf8());
}

#[test]
fn rejects_unknown_formulas() {
    let dir = tempdir().unwrap();

    cli()
        .args(&["--formula", "julia"])
        .arg("--output")
        .arg(dir.path().join("never.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown formula").from_utf8());
}

#[test]
fn requires_an_output_file() {
    cli().assert().failure();
}
