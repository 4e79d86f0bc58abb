//! I/O adapters for playground assembly.

pub mod config;
pub mod copy;
pub mod esy;
pub mod git;
pub mod lookup;
pub mod manifest;
pub mod process;
