use std::process::Command;

use assert_cmd::prelude::*;
use rstest::rstest;

use crate::internal_prelude::*;

/// Completion scripts go to stdout and don't need a readable configuration.
#[rstest]
fn completions_ignore_broken_config(
    #[values("bash", "elvish", "fish", "powershell", "zsh")] shell: &str,
) -> Result<()> {
    let output = Command::cargo_bin("pidtree")?
        .args(["--config", "/this/path/does/not/exist.yml", "completions", shell])
        .output()
        .wrap_err(format!("Failed to generate {shell} completions"))?;

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("pidtree"));

    Ok(())
}

#[test]
fn completions_are_written_to_directory() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let output = Command::cargo_bin("pidtree")?
        .arg("completions")
        .arg("zsh")
        .arg(directory.path())
        .output()?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(directory.path().join("_pidtree").is_file());

    Ok(())
}
