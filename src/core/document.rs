//! Document: the edited text, its caret and file metadata
//!
//! Text lives in a ropey [`Rope`]; the caret is a character index into it.
//! Lines end at `\n`. A `\r\n` pair is one line ending: the caret never
//! stops between its two chars and edits remove it as a unit.

use std::fs;
use std::path::{Path, PathBuf};

use ropey::Rope;
use thiserror::Error;
use tracing::info;

use crate::core::atomic::write_atomic;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("no file name set")]
    Untitled,
}

#[derive(Debug, Default)]
pub struct Document {
    rope: Rope,
    /// Caret as a character index
    caret: usize,
    pub path: Option<PathBuf>,
    /// Dirty flag (true if there are unsaved changes)
    pub modified: bool,
    /// Bumped on every text change
    pub version: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(content: impl AsRef<str>) -> Self {
        Self {
            rope: Rope::from_str(content.as_ref()),
            ..Self::default()
        }
    }

    /// Load a document from a file. Invalid UTF-8 is replaced lossily.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let io = |source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(io)?;
        if !metadata.is_file() {
            return Err(DocumentError::NotAFile(path.to_path_buf()));
        }
        let bytes = fs::read(path).map_err(io)?;
        let rope = match std::str::from_utf8(&bytes) {
            Ok(text) => Rope::from_str(text),
            Err(_) => Rope::from_str(&String::from_utf8_lossy(&bytes)),
        };

        info!(path = %path.display(), "opened document");
        Ok(Self {
            rope,
            path: Some(path.to_path_buf()),
            ..Self::default()
        })
    }

    /// Save to the current path
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let path = self.path.clone().ok_or(DocumentError::Untitled)?;
        write_atomic(&path, self.rope.chunks().map(str::as_bytes)).map_err(|source| {
            DocumentError::Io {
                path: path.clone(),
                source,
            }
        })?;
        self.modified = false;
        info!(path = %path.display(), "saved document");
        Ok(())
    }

    /// Save to `path` and adopt it as the document path
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let previous = self.path.replace(path.as_ref().to_path_buf());
        let result = self.save();
        if result.is_err() {
            self.path = previous;
        }
        result
    }

    /// File name shown in the title and status lines
    pub fn display_name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    // ==================== Content Access ====================

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Length in characters
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Zero-based (line, column) of the caret
    pub fn caret_line_col(&self) -> (usize, usize) {
        let line = self.rope.char_to_line(self.caret);
        (line, self.caret - self.rope.line_to_char(line))
    }

    /// Characters in `line`, without the line break
    fn line_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    /// True when `at` starts a `\r\n` pair
    fn is_crlf_at(&self, at: usize) -> bool {
        at + 1 < self.rope.len_chars()
            && self.rope.char(at) == '\r'
            && self.rope.char(at + 1) == '\n'
    }

    // ==================== Editing ====================

    fn changed(&mut self) {
        self.modified = true;
        self.version += 1;
    }

    pub fn insert_char(&mut self, c: char) {
        self.rope.insert_char(self.caret, c);
        self.caret += 1;
        self.changed();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the caret
    pub fn backspace(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let start = if self.caret >= 2 && self.is_crlf_at(self.caret - 2) {
            self.caret - 2
        } else {
            self.caret - 1
        };
        self.rope.remove(start..self.caret);
        self.caret = start;
        self.changed();
        true
    }

    /// Delete the character under the caret
    pub fn delete(&mut self) -> bool {
        if self.caret >= self.rope.len_chars() {
            return false;
        }
        let width = if self.is_crlf_at(self.caret) { 2 } else { 1 };
        self.rope.remove(self.caret..self.caret + width);
        self.changed();
        true
    }

    /// Replace the whole text and place the caret (clamped)
    pub fn replace_text_and_move_caret(&mut self, text: &str, caret: usize) {
        self.rope = Rope::from_str(text);
        self.caret = caret.min(self.rope.len_chars());
        self.changed();
    }

    // ==================== Caret Movement ====================

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.rope.len_chars());
    }

    pub fn move_left(&mut self) {
        if self.caret >= 2 && self.is_crlf_at(self.caret - 2) {
            self.caret -= 2;
        } else {
            self.caret = self.caret.saturating_sub(1);
        }
    }

    pub fn move_right(&mut self) {
        let step = if self.is_crlf_at(self.caret) { 2 } else { 1 };
        self.caret = (self.caret + step).min(self.rope.len_chars());
    }

    /// Place the caret at (line, column), clamped to the text
    pub fn set_caret_line_col(&mut self, line: usize, column: usize) {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.caret = self.rope.line_to_char(line) + column.min(self.line_len(line));
    }

    /// Move `delta` lines, keeping the column where the target line allows
    pub fn move_lines(&mut self, delta: isize) {
        let (line, column) = self.caret_line_col();
        self.set_caret_line_col(line.saturating_add_signed(delta), column);
    }

    pub fn move_up(&mut self) {
        self.move_lines(-1);
    }

    pub fn move_down(&mut self) {
        self.move_lines(1);
    }

    pub fn move_home(&mut self) {
        let (line, _) = self.caret_line_col();
        self.caret = self.rope.line_to_char(line);
    }

    pub fn move_end(&mut self) {
        let (line, _) = self.caret_line_col();
        self.caret = self.rope.line_to_char(line) + self.line_len(line);
    }
}
