use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shellexpand::tilde;

use crate::error::Error;
use crate::internal_prelude::*;
use crate::parser::ListingFormat;
use crate::tree::Traversal;

/// The environment variable that can be set to overwrite pidtree's config path.
pub const PIDTREE_CONFIG_PATH_ENV: &str = "PIDTREE_CONFIG_PATH";

/// Settings for listing the process table and walking it.
#[derive(PartialEq, Eq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct Listing {
    /// The command that prints the process table, as an argv vector.
    ///
    /// Unix default:
    /// `["ps", "-A", "-o", "ppid,pid,stat,comm"]`
    ///
    /// Windows default:
    /// `["powershell", "-NoProfile", "-NonInteractive", "-Command", "... | ConvertTo-Csv -NoTypeInformation"]`
    ///
    /// Custom commands must print a header line and one process per line.
    pub command: Option<Vec<String>>,
    /// The format the listing command prints.
    /// Defaults to the format of the platform's default command.
    pub format: Option<ListingFormat>,
    /// How descendants are searched for in the listing.
    #[serde(default = "Default::default")]
    pub traversal: Traversal,
}

/// The struct representation of a full configuration.
#[derive(PartialEq, Eq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "Default::default")]
    pub listing: Listing,
}

/// Get the default config directory.
/// If no config can be found, fallback to the current directory.
pub fn configuration_directories() -> Vec<PathBuf> {
    if let Some(config_dir) = dirs::config_dir() {
        vec![config_dir.join("pidtree"), PathBuf::from(".")]
    } else {
        vec![PathBuf::from(".")]
    }
}

/// Little helper which expands a given path's `~` characters to a fully qualified path.
pub fn expand_home(old_path: &Path) -> PathBuf {
    PathBuf::from(tilde(&old_path.to_string_lossy()).into_owned())
}

impl Settings {
    /// Try to read existing config files, while using default values for non-existing fields.
    /// If successful, this will return a full config as well as a boolean on whether we found
    /// an existing configuration file or not.
    ///
    /// The default local config locations depends on the current target.
    pub fn read(from_file: &Option<PathBuf>) -> Result<(Settings, bool), Error> {
        // If no explicit path is provided, we look for the PIDTREE_CONFIG_PATH env variable.
        let from_file = from_file
            .clone()
            .or_else(|| std::env::var(PIDTREE_CONFIG_PATH_ENV).map(PathBuf::from).ok());

        // Load the config from a very specific file path
        if let Some(path) = &from_file {
            let path = expand_home(path);
            return Ok((Self::read_file(&path)?, true));
        };

        info!("Parsing config files");

        for directory in configuration_directories() {
            let path = directory.join("pidtree.yml");
            info!("Checking path: {path:?}");

            if path.exists() && path.is_file() {
                info!("Found config file at: {path:?}");
                return Ok((Self::read_file(&path)?, true));
            }
        }

        info!("No config file found. Use default config.");
        Ok((Settings::default(), false))
    }

    fn read_file(path: &Path) -> Result<Settings, Error> {
        let file = File::open(path)
            .map_err(|err| Error::IoPathError(path.to_path_buf(), "opening config file", err))?;
        let reader = BufReader::new(file);

        serde_yaml::from_reader(reader).map_err(|err| Error::ConfigDeserialization(err.to_string()))
    }
}
