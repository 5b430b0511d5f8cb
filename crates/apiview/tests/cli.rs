mod common;

use std::fs;

use common::{GEO_FIXTURE, run_cli, scratch_path};
use insta::assert_snapshot;
use serde_json::Value;

#[test]
fn renders_text_listing() {
    let (stdout, stderr, success) = run_cli(&[GEO_FIXTURE, "--color", "never"]);
    assert!(success, "CLI should succeed: {stderr}");
    assert_snapshot!(stdout, @r"
    /// Plane geometry helpers.
    pub mod geo {
        pub trait serde::ser::Serialize
        /// A point in the plane.
        #[derive(Clone, Debug)]
        pub struct Point {
            /// Horizontal offset.
            pub x: f64,
            pub y: f64,
        }
        impl Point {
            /// Creates a point.
            pub const fn new(x: f64, y: f64) -> Self
        }
        impl Display for Point {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result
        }
        pub enum Shape {
            Circle(f64),
            Polygon {
                points: Vec<Point>,
            },
        }
        pub trait Area {
            fn area(&self) -> f64
        }
        /// Euclidean distance.
        ///
        /// Returns `0.0` for equal points.
        #[must_use]
        pub fn distance(a: &Point, b: &Point) -> f64
        pub const ORIGIN_X: f64 = 0.0;
    }
    pub module std::collections {}
    pub mod geo::shapes {
        pub use geo::Point;
        pub type Polyline = Vec<Point>;
    }
    ");
}

#[test]
fn json_output_carries_package_metadata() {
    let (stdout, stderr, success) = run_cli(&[GEO_FIXTURE, "--format", "json"]);
    assert!(success, "CLI should succeed: {stderr}");

    let file: Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(file["PackageName"], "geo");
    assert_eq!(file["PackageVersion"], "0.3.1");
    assert_eq!(file["Language"], "Rust");

    let lines = file["ReviewLines"].as_array().expect("line array");
    assert_eq!(lines[0]["RelatedToLine"], "geo");
    assert!(lines[0].get("LineId").is_none());
    assert_eq!(lines[1]["LineId"], "geo");

    let ids: Vec<&str> = lines[1]["Children"]
        .as_array()
        .expect("module children")
        .iter()
        .filter_map(|line| line["LineId"].as_str())
        .collect();
    assert!(ids.contains(&"serde::ser::Serialize.reexport"), "{ids:?}");
    assert!(ids.contains(&"geo::Point"), "{ids:?}");
    assert!(ids.contains(&"geo::Point.impl.Display"), "{ids:?}");
}

#[test]
fn no_docs_leaves_out_doc_comments() {
    let (stdout, stderr, success) = run_cli(&[GEO_FIXTURE, "--no-docs", "--color", "never"]);
    assert!(success, "CLI should succeed: {stderr}");
    assert!(!stdout.contains("///"), "{stdout}");
    assert!(stdout.starts_with("pub mod geo {\n"), "{stdout}");
}

#[test]
fn output_is_deterministic() {
    let first = run_cli(&[GEO_FIXTURE, "--format", "json"]);
    let second = run_cli(&[GEO_FIXTURE, "--format", "json"]);
    assert!(first.2);
    assert_eq!(first, second);
}

#[test]
fn output_flag_writes_file() {
    let target = scratch_path("geo.txt");
    let target_str = target.to_str().expect("utf-8 temp path");
    let (stdout, stderr, success) = run_cli(&[GEO_FIXTURE, "-o", target_str]);
    assert!(success, "CLI should succeed: {stderr}");
    assert!(stdout.is_empty());

    let written = fs::read_to_string(&target).expect("output file");
    fs::remove_file(&target).ok();
    assert!(written.starts_with("/// Plane geometry helpers.\npub mod geo {\n"), "{written}");
    assert!(!written.contains('\u{1b}'), "files are written without colors");
}

#[test]
fn max_depth_cuts_off_nested_types() {
    let (stdout, stderr, success) =
        run_cli(&[GEO_FIXTURE, "--max-depth", "1", "--color", "never"]);
    assert!(success, "CLI should succeed: {stderr}");
    assert!(stdout.contains("points: Vec<unknown>,"), "{stdout}");
    assert!(stdout.contains("pub x: f64,"), "{stdout}");
}

#[test]
fn help_shows_usage() {
    let (stdout, stderr, success) = run_cli(&["--help"]);
    assert!(success, "Help should succeed");
    assert!(stderr.is_empty());
    assert!(stdout.contains("Usage: rust-apiview"), "{stdout}");
    assert!(stdout.contains("--max-depth <N>"), "{stdout}");
}

#[test]
fn missing_input_fails() {
    let (stdout, stderr, success) = run_cli(&["does/not/exist.json"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("failed to read does/not/exist.json"), "{stderr}");
}

#[test]
fn malformed_json_fails() {
    let input = scratch_path("malformed.json");
    fs::write(&input, "{ not json").expect("write fixture");
    let (_, stderr, success) = run_cli(&[input.to_str().expect("utf-8 temp path")]);
    fs::remove_file(&input).ok();
    assert!(!success);
    assert!(stderr.starts_with("failed to load "), "{stderr}");
}

#[test]
fn unknown_format_is_rejected() {
    let (_, stderr, success) = run_cli(&[GEO_FIXTURE, "--format", "yaml"]);
    assert!(!success);
    assert!(stderr.contains("invalid format 'yaml'"), "{stderr}");
}
