pub mod config;
pub mod roster;
pub mod task;

pub use config::*;
pub use roster::*;
pub use task::*;
