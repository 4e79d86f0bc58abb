//! Literal placeholder substitution for the staged `index.html`.
//!
//! This is plain substring replacement. There is no escaping and no
//! template syntax beyond the two exact tokens.

pub const VERSION_TOKEN: &str = "{#VERSION}";
pub const COMMIT_TOKEN: &str = "{#COMMIT}";

/// Values stamped into the playground page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub version: String,
    pub commit: String,
}

/// Replace every occurrence of the version token, then the commit token.
pub fn apply_stamp(text: &str, stamp: &Stamp) -> String {
    text.replace(VERSION_TOKEN, &stamp.version)
        .replace(COMMIT_TOKEN, &stamp.commit)
}
