use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use assert_cmd::prelude::*;
use tempfile::TempDir;

use crate::internal_prelude::*;

mod completions;
mod find;

/// A temporary directory holding a config file and the fixture listing it points to.
/// Everything is removed once this is dropped.
pub struct TestConfig {
    directory: TempDir,
}

impl TestConfig {
    fn new(content: &str) -> Result<Self> {
        let config = TestConfig {
            directory: tempfile::tempdir()?,
        };
        let mut file = File::create(config.path())?;
        file.write_all(content.as_bytes())?;

        Ok(config)
    }

    pub fn path(&self) -> PathBuf {
        self.directory.path().join("pidtree.yml")
    }

    pub fn listing_path(&self) -> PathBuf {
        self.directory.path().join("listing.txt")
    }
}

/// Write a configuration file that uses the platform's default listing command.
pub fn default_config() -> Result<TestConfig> {
    TestConfig::new("listing: {}\n")
}

/// Write a configuration file whose listing command prints the given listing.
pub fn fixture_config(listing: &str) -> Result<TestConfig> {
    let config = TestConfig::new("")?;
    std::fs::write(config.listing_path(), listing)?;

    let listing_path = config.listing_path().to_string_lossy().into_owned();
    write_command(&config, &["cat", &listing_path])?;

    Ok(config)
}

/// Write a configuration file with a custom listing command.
pub fn config_with_command(command: &[&str]) -> Result<TestConfig> {
    let config = TestConfig::new("")?;
    write_command(&config, command)?;

    Ok(config)
}

fn write_command(config: &TestConfig, command: &[&str]) -> Result<()> {
    let mut file = File::create(config.path())?;
    writeln!(file, "listing:")?;
    writeln!(file, "  command: {}", serde_json::to_string(command)?)?;
    writeln!(file, "  format: table")?;

    Ok(())
}

/// Run the `pidtree` binary with the given arguments and capture its output.
pub fn run_pidtree(config: &TestConfig, args: &[&str]) -> Result<Output> {
    Command::cargo_bin("pidtree")?
        .arg("--config")
        .arg(config.path())
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .wrap_err(format!("Failed to run pidtree with {args:?}"))
}

#[test]
fn fixture_files_are_removed_on_drop() -> Result<()> {
    let config = fixture_config("PPID PID STAT COMMAND\n")?;
    let (config_path, listing_path) = (config.path(), config.listing_path());
    assert!(config_path.is_file());
    assert!(listing_path.is_file());

    drop(config);
    assert!(!config_path.exists());
    assert!(!listing_path.exists());

    Ok(())
}
