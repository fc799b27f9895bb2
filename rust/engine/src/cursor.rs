//! Forward-only line cursor over one hand history file.
//!
//! The cursor starts before the first line; [`LineCursor::next_line`] must be
//! called once to position it on line 0. Lines are stored without their line
//! terminator, and a leading UTF-8 BOM is stripped from the file.

use std::path::Path;

use crate::errors::ParseError;

#[derive(Debug)]
pub struct LineCursor {
    file_name: String,
    lines: Vec<String>,
    pos: Option<usize>,
}

impl LineCursor {
    /// Reads the whole file. Invalid UTF-8 sequences are replaced rather than
    /// rejected.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_text(&file_name, &String::from_utf8_lossy(&bytes)))
    }

    pub fn from_text(file_name: &str, text: &str) -> Self {
        let mut text = text.to_string();
        strip_utf8_bom(&mut text);
        Self {
            file_name: file_name.to_string(),
            lines: text.lines().map(str::to_string).collect(),
            pos: None,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Advances to the next line. Returns `false` once input is exhausted.
    pub fn next_line(&mut self) -> bool {
        let next = self.pos.map_or(0, |p| p + 1);
        self.pos = Some(next.min(self.lines.len()));
        next < self.lines.len()
    }

    /// Current line, empty before the first advance and after the end.
    pub fn current(&self) -> &str {
        self.pos
            .and_then(|p| self.lines.get(p))
            .map_or("", String::as_str)
    }

    pub fn line_index(&self) -> usize {
        self.pos.unwrap_or(0)
    }

    pub fn is_eof(&self) -> bool {
        self.pos.is_some_and(|p| p >= self.lines.len())
    }

    /// The line after the current one, without advancing.
    pub fn peek(&self) -> Option<&str> {
        let next = self.pos.map_or(0, |p| p + 1);
        self.lines.get(next).map(String::as_str)
    }

    pub fn starts_with(&self, literal: &str) -> bool {
        self.current().starts_with(literal)
    }

    pub fn ends_with(&self, literal: &str) -> bool {
        self.current().trim_end().ends_with(literal)
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.current().contains(literal)
    }

    /// The first of `literals` found in the current line.
    pub fn contains_any<'a>(&self, literals: &[&'a str]) -> Option<&'a str> {
        let line = self.current();
        literals.iter().copied().find(|l| line.contains(l))
    }

    pub fn find(&self, literal: &str) -> Option<usize> {
        self.current().find(literal)
    }

    /// Advances until the current line satisfies `pred`. Returns `false` at
    /// end of input. A current line that already matches is kept.
    pub fn seek(&mut self, pred: impl Fn(&str) -> bool) -> bool {
        if self.pos.is_some() && !self.is_eof() && pred(self.current()) {
            return true;
        }
        while self.next_line() {
            if pred(self.current()) {
                return true;
            }
        }
        false
    }
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
