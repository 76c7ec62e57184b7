//! CLI command implementations.

pub mod common;
pub mod db;
pub mod layout;
pub mod subtemplates;
pub mod version;
