//! Command implementations for the XBL stats CLI

pub mod build;
pub mod fetch;


pub use build::{handle_build, BuildParams};
pub use fetch::handle_fetch;
