//! CLI subcommand implementations.

pub mod events;
pub mod history;
pub mod import;
pub mod members;
pub mod record;
pub mod status;
pub mod summary;
pub mod util;
