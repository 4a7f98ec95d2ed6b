//! CLI behaviour: run the built binary against temp trees and check exit status and output.

use flate2::read::GzDecoder;
use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn bin_path() -> &'static str {
    env!("CARGO_BIN_EXE_tocsv")
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tocsv")
}

fn read_rows(path: &Path) -> BTreeSet<String> {
    let bytes = fs::read(path).expect("read output");
    let mut text = String::new();
    GzDecoder::new(bytes.as_slice())
        .read_to_string(&mut text)
        .expect("gunzip output");
    text.lines().map(str::to_string).collect()
}

fn setup_dump(contents: &str) -> (TempDir, String, String) {
    let td = TempDir::new().expect("tempdir");
    let input = td.path().join("dump");
    fs::create_dir_all(&input).expect("input dir");
    fs::write(input.join("part-0000"), contents).expect("write dump");
    let output = td.path().join("stars.csv.gz");
    (
        td,
        input.to_string_lossy().to_string(),
        output.to_string_lossy().to_string(),
    )
}

#[test]
fn converts_with_short_and_alias_flags() {
    let (_td, input, output) = setup_dump(concat!(
        r#"{"Ts":{"N":"100"},"Stars":{"N":"5"},"Repo":{"S":"alpha"}}"#,
        "\n",
        r#"{"Ts":{"N":"200"},"Stars":{"N":"7"},"Repo":{"S":"beta"}}"#,
        "\n",
    ));

    let out = run_cli(&["--id", &input, "--of", &output, "--nw", "2"]);
    assert!(out.status.success(), "convert failed: {:?}", out);
    let expected: BTreeSet<String> = ["alpha,100,5", "beta,200,7"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(read_rows(Path::new(&output)), expected);

    fs::remove_file(&output).expect("remove output");
    let out = run_cli(&["-i", &input, "-o", &output]);
    assert!(out.status.success(), "convert failed: {:?}", out);
    assert_eq!(read_rows(Path::new(&output)), expected);
}

#[test]
fn missing_required_flags_prints_usage_and_fails() {
    let (_td, input, output) = setup_dump("");

    let out = run_cli(&["--id", &input]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage"), "stderr: {}", stderr);

    let out = run_cli(&["--of", &output]);
    assert!(!out.status.success());
    assert!(!Path::new(&output).exists());
}

#[test]
fn non_numeric_timestamp_exits_non_zero() {
    let (_td, input, output) = setup_dump(
        r#"{"Ts":{"N":"abc"},"Stars":{"N":"5"},"Repo":{"S":"alpha"}}"#,
    );

    let out = run_cli(&["-i", &input, "-o", &output]);
    assert!(!out.status.success(), "expected failure: {:?}", out);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("abc"), "stderr: {}", stderr);
    assert!(!Path::new(&output).exists());
}

#[test]
fn config_file_in_input_dir_is_applied() {
    let (_td, input, output) = setup_dump(concat!(
        r#"{"Ts":{"N":"1"},"Stars":{"N":"1"},"Repo":{"S":"kept"}}"#,
        "\n",
    ));
    let input_path = Path::new(&input);
    fs::write(input_path.join("notes.md"), "# not a dump").expect("write notes");
    fs::write(
        input_path.join(".tocsv.toml"),
        "[settings]\nworkers = 1\nexclude = [\"*.md\"]\n",
    )
    .expect("write config");

    let out = run_cli(&["-i", &input, "-o", &output]);
    assert!(out.status.success(), "convert failed: {:?}", out);
    assert_eq!(
        read_rows(Path::new(&output)),
        BTreeSet::from(["kept,1,1".to_string()])
    );
}

#[cfg(unix)]
#[test]
fn walk_error_exits_non_zero() {
    let (_td, input, output) = setup_dump(
        r#"{"Ts":{"N":"1"},"Stars":{"N":"1"},"Repo":{"S":"alpha"}}"#,
    );
    let input_path = Path::new(&input);
    fs::create_dir_all(input_path.join("a")).expect("subdir");
    std::os::unix::fs::symlink(input_path.join("a"), input_path.join("a/loop")).expect("symlink");

    let out = run_cli(&["-i", &input, "-o", &output, "--follow-links"]);
    assert!(!out.status.success(), "expected failure: {:?}", out);
    assert!(!Path::new(&output).exists());
    assert!(!Path::new(&format!("{output}.tmp")).exists());
}
