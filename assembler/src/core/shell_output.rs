//! Interpreting stdout captured from external tools.

use std::path::PathBuf;

use crate::error::AssembleError;

/// Pick the executable from `where`/`which -a` output.
///
/// Candidates are one per line. When the tool reports several, the last one
/// wins.
pub fn last_candidate(output: &str) -> Option<&str> {
    output
        .trim()
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
}

/// Turn the package manager's `echo $<var>` output into the artifact folder.
///
/// An undefined variable echoes an empty line; that is an error rather than
/// an empty path, which would otherwise resolve against the working
/// directory during the copy. On Unix the path keeps its raw bytes, so a
/// folder whose name is not UTF-8 is still found.
pub fn artifact_folder(output: &[u8], var: &str) -> Result<PathBuf, AssembleError> {
    let trimmed = output.trim_ascii();
    if trimmed.is_empty() {
        return Err(AssembleError::EmptyArtifactFolder {
            var: var.to_string(),
        });
    }
    path_from_bytes(trimmed, var)
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8], _var: &str) -> Result<PathBuf, AssembleError> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Ok(PathBuf::from(OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8], var: &str) -> Result<PathBuf, AssembleError> {
    std::str::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|_| AssembleError::NonUtf8ArtifactFolder {
            var: var.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_last_of_several_candidates() {
        let output = "C:\\tools\\esy.cmd\r\nC:\\Users\\dev\\npm\\esy\r\nC:\\Users\\dev\\npm\\esy.cmd\r\n";
        assert_eq!(last_candidate(output), Some("C:\\Users\\dev\\npm\\esy.cmd"));
    }

    #[test]
    fn selects_single_candidate() {
        assert_eq!(last_candidate("/usr/local/bin/esy\n"), Some("/usr/local/bin/esy"));
    }

    #[test]
    fn ignores_surrounding_blank_lines() {
        let output = "\n  /opt/esy/bin/esy\n/usr/bin/esy  \n\n";
        assert_eq!(last_candidate(output), Some("/usr/bin/esy"));
    }

    #[test]
    fn no_candidates_in_blank_output() {
        assert_eq!(last_candidate(""), None);
        assert_eq!(last_candidate(" \n\t\n"), None);
    }

    #[test]
    fn artifact_folder_is_trimmed() {
        let folder = artifact_folder(b"  /home/dev/.esy/3/b/revery-1.0/bin\n", "cur__bin")
            .expect("folder");
        assert_eq!(folder, PathBuf::from("/home/dev/.esy/3/b/revery-1.0/bin"));
    }

    #[test]
    fn empty_artifact_output_names_the_variable() {
        let err = artifact_folder(b"\n", "cur__bin").unwrap_err();
        assert!(matches!(
            &err,
            AssembleError::EmptyArtifactFolder { var } if var == "cur__bin"
        ));
        assert!(err.to_string().contains("$cur__bin"));
    }

    #[cfg(unix)]
    #[test]
    fn artifact_folder_keeps_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let folder = artifact_folder(b"/tmp/caf\xe9/bin\n", "cur__bin").expect("folder");
        assert_eq!(folder.as_os_str().as_bytes(), b"/tmp/caf\xe9/bin");
    }
}
