//! Application execution for typeahead.
//!
//! The terminal front end is the only mode; it refuses to start when stdin
//! or stdout is not a terminal.

mod tui;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

pub use tui::run_terminal_mode;

/// Validate and canonicalize a file path, blocking device files and pipes.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let canonical = match path.canonicalize() {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // File doesn't exist yet - validate the parent directory
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => std::env::current_dir()
                    .map_err(|_| "Cannot determine current directory")?,
            };
            let canonical_parent = parent
                .canonicalize()
                .map_err(|_| "Invalid parent directory")?;
            match path.file_name() {
                Some(filename) => canonical_parent.join(filename),
                None => return Err("Invalid file path: missing filename".into()),
            }
        }
        Err(e) => return Err(format!("Invalid path: {}", e).into()),
    };

    // Block special file types that could hang the editor
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if let Ok(metadata) = std::fs::metadata(&canonical) {
            let ft = metadata.file_type();
            if ft.is_char_device() || ft.is_block_device() {
                return Err("Cannot open device files".into());
            }
            if ft.is_fifo() {
                return Err("Cannot open FIFO/named pipe files".into());
            }
            if ft.is_socket() {
                return Err("Cannot open socket files".into());
            }
        }
    }

    Ok(canonical)
}

/// True when both ends of the session are a terminal
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}
