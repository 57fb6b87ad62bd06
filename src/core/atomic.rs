//! Atomic file writes shared by document and dictionary saves

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Write `chunks` to a temp file next to `path`, then rename it over `path`.
pub fn write_atomic<'a, I>(path: &Path, chunks: I) -> io::Result<()>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(parent)?;

    for chunk in chunks {
        temp_file.write_all(chunk)?;
    }
    temp_file.flush()?;

    // Data must reach the disk before the rename makes it visible.
    temp_file.as_file().sync_all()?;

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old contents that are longer").unwrap();

        write_atomic(&path, [b"new ".as_slice(), b"text".as_slice()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new text");
    }

    #[test]
    fn test_write_atomic_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.txt");
        assert!(write_atomic(&path, [b"x".as_slice()]).is_err());
    }
}
