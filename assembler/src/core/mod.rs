//! Pure logic for playground assembly. No I/O.
//!
//! Everything here works on strings and paths handed in by the caller, so it
//! can be tested without subprocesses or a real playground checkout.

pub mod layout;
pub mod manifest;
pub mod shell_output;
pub mod template;
