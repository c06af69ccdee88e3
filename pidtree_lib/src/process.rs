use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single line of a process listing, normalized across platforms.
///
/// All fields are kept as the strings the operating system reported.
/// `stat` may be empty on platforms that don't report a process state.
#[derive(PartialEq, Eq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProcessRow {
    #[serde(rename = "COMMAND")]
    pub command: String,
    #[serde(rename = "PPID")]
    pub ppid: String,
    #[serde(rename = "PID")]
    pub pid: String,
    #[serde(rename = "STAT")]
    pub stat: String,
}

impl ProcessRow {
    pub fn new(ppid: &str, pid: &str, stat: &str, command: &str) -> Self {
        ProcessRow {
            command: command.to_owned(),
            ppid: ppid.to_owned(),
            pid: pid.to_owned(),
            stat: stat.to_owned(),
        }
    }
}

/// The normalized decimal representation of a process id.
///
/// Listings report pids as text, so the root of a query is compared in that same form.
/// Leading zeros are stripped, which means `"0100"` and `100` are the same pid.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Pid(String);

impl Pid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Pid {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits = input.trim();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidPid(input.to_owned()));
        }

        let normalized = digits.trim_start_matches('0');
        if normalized.is_empty() {
            return Ok(Pid("0".to_owned()));
        }

        Ok(Pid(normalized.to_owned()))
    }
}

macro_rules! pid_from_unsigned {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Pid {
                fn from(pid: $int) -> Self {
                    Pid(pid.to_string())
                }
            }
        )*
    };
}

pid_from_unsigned!(u16, u32, u64, usize);

macro_rules! pid_try_from_signed {
    ($($int:ty),*) => {
        $(
            impl TryFrom<$int> for Pid {
                type Error = Error;

                fn try_from(pid: $int) -> Result<Self, Self::Error> {
                    if pid < 0 {
                        return Err(Error::InvalidPid(pid.to_string()));
                    }
                    Ok(Pid(pid.to_string()))
                }
            }
        )*
    };
}

// Bare integer literals default to `i32`.
pid_try_from_signed!(i32, i64);

impl TryFrom<&str> for Pid {
    type Error = Error;

    fn try_from(pid: &str) -> Result<Self, Self::Error> {
        pid.parse()
    }
}

impl TryFrom<String> for Pid {
    type Error = Error;

    fn try_from(pid: String) -> Result<Self, Self::Error> {
        pid.parse()
    }
}

impl From<&Pid> for Pid {
    fn from(pid: &Pid) -> Self {
        pid.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("100", "100")]
    #[case(" 42\n", "42")]
    #[case("0100", "100")]
    #[case("0", "0")]
    #[case("000", "0")]
    fn pid_from_str(#[case] input: &str, #[case] expected: &str) {
        let pid: Pid = input.parse().expect("pid should parse");
        assert_eq!(pid.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("-1")]
    #[case("12a")]
    #[case("1 2")]
    fn invalid_pid_from_str(#[case] input: &str) {
        let result = input.parse::<Pid>();
        assert!(matches!(result, Err(Error::InvalidPid(_))));
    }

    #[test]
    fn number_and_string_pids_match() {
        assert_eq!(Pid::from(100u32), "100".parse::<Pid>().unwrap());
        assert_eq!(Pid::from(100usize).to_string(), "100");
    }

    #[rstest]
    #[case::literal(Pid::try_from(100), "100")]
    #[case::long(Pid::try_from(100i64), "100")]
    #[case::zero(Pid::try_from(0), "0")]
    #[case::text(Pid::try_from("0100"), "100")]
    #[case::owned_text(Pid::try_from(" 100 ".to_owned()), "100")]
    fn pid_try_from(#[case] pid: Result<Pid, Error>, #[case] expected: &str) {
        assert_eq!(pid.unwrap().as_str(), expected);
    }

    #[rstest]
    #[case::negative(Pid::try_from(-1))]
    #[case::negative_long(Pid::try_from(i64::MIN))]
    #[case::text(Pid::try_from("init"))]
    fn invalid_pid_try_from(#[case] pid: Result<Pid, Error>) {
        assert!(matches!(pid, Err(Error::InvalidPid(_))));
    }

    /// The upper-case keys are part of the output contract.
    #[test]
    fn row_serializes_with_column_names() {
        let row = ProcessRow::new("100", "200", "R", "node");
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"COMMAND": "node", "PPID": "100", "PID": "200", "STAT": "R"})
        );
    }
}
