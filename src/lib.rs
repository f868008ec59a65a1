pub mod clock;
pub mod config;
pub mod fetch;
pub mod process;
pub mod summary;
