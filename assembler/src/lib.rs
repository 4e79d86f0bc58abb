//! Assembles the browser playground's staging directory.
//!
//! The playground is a static site served from `_build/`. Assembling it means
//! gathering pieces produced elsewhere: the playground's own sources, the
//! project's examples, the native build output, and the installed dependency
//! tree, then stamping `index.html` with the project version and commit.
//!
//! - **[`core`]**: Pure logic (candidate selection, manifest parsing,
//!   placeholder substitution, path layout). No I/O.
//! - **[`io`]**: Side-effecting adapters (subprocesses, git, the package
//!   manager, directory copies, config).
//!
//! [`assemble`] runs the pipeline over the capability traits in [`io`], so
//! it can be driven by fakes in tests.

pub mod assemble;
pub mod core;
pub mod error;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
