#![doc = include_str!("../README.md")]

pub(crate) mod internal_prelude {
    #![allow(unused_imports)]
    pub use tracing::{debug, error, info, trace, warn};
}

pub mod error;
pub mod listing;
pub mod parser;
pub mod process;
pub mod query;
#[cfg(feature = "settings")]
pub mod settings;
pub mod tree;

pub use error::{Error, Result};
pub use listing::{ListingCommand, ListingFormat};
pub use process::{Pid, ProcessRow};
#[cfg(feature = "async")]
pub use query::find_descendants_async;
pub use query::{find_descendants, find_descendants_with, QueryOptions};
#[cfg(feature = "settings")]
pub use settings::Settings;
pub use tree::{descendants, Traversal};

pub mod prelude {
    pub use super::error::{Error, Result};
    pub use super::listing::{ListingCommand, ListingFormat};
    pub use super::process::{Pid, ProcessRow};
    #[cfg(feature = "async")]
    pub use super::query::find_descendants_async;
    pub use super::query::{find_descendants, find_descendants_with, QueryOptions};
    #[cfg(feature = "settings")]
    pub use super::settings::Settings;
    pub use super::tree::Traversal;
}
