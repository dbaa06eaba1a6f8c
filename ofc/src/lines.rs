use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::{FilterError, FilterResult};
use crate::rules::{RuleSet, WildcardMode};

/// Reads every line of a newline-delimited file.
///
/// Line endings (`\n` or `\r\n`) are stripped; nothing else is. Blank lines
/// come back as empty strings.
pub fn read_lines(path: &Path) -> FilterResult<Vec<String>> {
    let file = File::open(path).map_err(|e| FilterError::read_file(path, e))?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FilterError::read_file(path, e))?;

    debug!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Reads rule files in order and concatenates them into one RuleSet
pub fn read_rules<P: AsRef<Path>>(paths: &[P], mode: WildcardMode) -> FilterResult<RuleSet> {
    let mut raw = Vec::new();
    for path in paths {
        raw.extend(read_lines(path.as_ref())?);
    }
    Ok(RuleSet::new(raw, mode))
}

/// Writes one entry per line, each terminated by `\n`.
///
/// The content goes to a temporary file next to `path` which is then renamed
/// over it, so a failure at any point leaves no partial output behind.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> FilterResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| FilterError::write_file(path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        for line in lines {
            writeln!(writer, "{}", line.as_ref()).map_err(|e| FilterError::write_file(path, e))?;
        }
        writer
            .flush()
            .map_err(|e| FilterError::write_file(path, e))?;
    }

    tmp.persist(path)
        .map_err(|e| FilterError::write_file(path, e.error))?;

    debug!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_lines_keeps_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("domains.txt");
        fs::write(&path, "a.com\n\nb.com\r\n  padded  \nlast").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["a.com", "", "b.com", "  padded  ", "last"]);
    }

    #[test]
    fn test_read_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        assert!(read_lines(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = read_lines(&path).unwrap_err();
        assert!(matches!(err, FilterError::ReadFile { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_read_rules_from_several_files() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("deny.txt");
        let second = dir.path().join("scope.txt");
        fs::write(&first, "*.example.com\n").unwrap();
        fs::write(&second, "admin/*\n  exact.org  \n").unwrap();

        let rules = read_rules(&[&first, &second], WildcardMode::Strict).unwrap();
        assert_eq!(rules.len(), 3);
        assert!(rules.matches_any("www.example.com"));
        assert!(rules.matches_any("admin/panel"));
        assert!(rules.matches_any("exact.org"));

        let missing = dir.path().join("missing.txt");
        assert!(read_rules(&[&first, &missing], WildcardMode::Strict).is_err());

        let none: [&Path; 0] = [];
        assert!(read_rules(&none, WildcardMode::Loose).unwrap().is_empty());
    }

    #[test]
    fn test_write_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_lines(&path, &["a.com", "", "c.org"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a.com\n\nc.org\n");

        // Overwrites existing content
        write_lines(&path, &["only.com"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "only.com\n");

        let empty: [&str; 0] = [];
        write_lines(&path, &empty).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_write_into_missing_directory_leaves_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.txt");

        let err = write_lines(&path, &["a.com"]).unwrap_err();
        assert!(matches!(err, FilterError::WriteFile { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_persist_cleans_up_temp_file() {
        let dir = tempdir().unwrap();
        // A directory in the way makes the final rename fail
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "x").unwrap();

        assert!(write_lines(&path, &["a.com"]).is_err());

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("taken")]);
    }
}
