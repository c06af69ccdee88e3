use pidtree_lib::ProcessRow;
use pretty_assertions::assert_eq;

use super::*;

const OUT_OF_ORDER_LISTING: &str = "  PPID   PID STAT COMMAND\n\
                                    \x20  200   300 S    grandchild\n\
                                    \x20  100   200 S    child proc\n\
                                    \x20    1   400 S    unrelated\n";

fn parse_rows(stdout: &[u8]) -> Result<Vec<ProcessRow>> {
    serde_json::from_slice(stdout).wrap_err("Output isn't a valid JSON list of rows")
}

/// The `pidtree` process itself is a child of the test process.
#[test]
fn find_own_children() -> Result<()> {
    better_panic::install();
    let config = default_config()?;
    let test_pid = std::process::id().to_string();

    let output = run_pidtree(&config, &["find", &test_pid, "--json"])?;
    assert!(output.status.success(), "{output:?}");

    let rows = parse_rows(&output.stdout)?;
    rows.iter()
        .find(|row| row.ppid == test_pid)
        .ok_or_else(|| eyre!("pidtree isn't listed as child of the test: {rows:#?}"))?;

    Ok(())
}

#[test]
fn single_pass_table() -> Result<()> {
    let config = fixture_config(OUT_OF_ORDER_LISTING)?;

    let output = run_pidtree(&config, &["find", "100"])?;
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("child proc"), "{stdout}");
    assert!(!stdout.contains("grandchild"), "{stdout}");

    Ok(())
}

#[test]
fn fixed_point_json() -> Result<()> {
    let config = fixture_config(OUT_OF_ORDER_LISTING)?;

    let output = run_pidtree(&config, &["find", "100", "--json", "--traversal", "fixed-point"])?;
    assert!(output.status.success(), "{output:?}");

    let rows = parse_rows(&output.stdout)?;
    assert_eq!(
        rows,
        vec![
            ProcessRow::new("200", "300", "S", "grandchild"),
            ProcessRow::new("100", "200", "S", "child proc"),
        ]
    );

    Ok(())
}

#[test]
fn no_descendants() -> Result<()> {
    let config = fixture_config(OUT_OF_ORDER_LISTING)?;

    let output = run_pidtree(&config, &["find", "4242", "--json"])?;
    assert!(output.status.success(), "{output:?}");
    assert_eq!(parse_rows(&output.stdout)?, Vec::new());

    let output = run_pidtree(&config, &["find", "4242"])?;
    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn failing_listing_command() -> Result<()> {
    let config = config_with_command(&["sh", "-c", "echo 'permission denied' >&2; exit 2"])?;

    let output = run_pidtree(&config, &["find", "1"])?;
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to find descendants of process 1"), "{stderr}");
    assert!(stderr.contains("permission denied"), "{stderr}");

    Ok(())
}
