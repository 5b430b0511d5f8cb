use std::path::PathBuf;

pub const GEO_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/geo.json");

pub fn run_cli(args: &[&str]) -> (String, String, bool) {
    match rust_apiview::run_cli(args) {
        Ok(stdout) => (stdout, String::new(), true),
        Err(stderr) => (String::new(), stderr, false),
    }
}

/// A path in the system temp dir that is unique to this process and `name`.
pub fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rust-apiview-{}-{name}", std::process::id()))
}
