//! Command implementations.

pub mod batch;
pub mod config;
pub mod locate;
pub mod resolve;
pub mod utils;

pub use batch::execute as batch_execute;
pub use config::execute as config_execute;
pub use locate::execute as locate_execute;
pub use resolve::execute as resolve_execute;
