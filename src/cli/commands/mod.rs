//! CLI command implementations

pub mod clear;
pub mod config;
pub mod debug;
pub mod ensure;

pub use clear::execute as clear;
pub use config::execute as config;
pub use debug::execute as debug;
pub use ensure::execute as ensure;
