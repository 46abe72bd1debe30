// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source text handed to the front end.

use std::fs;
use std::io;
use std::path::Path;

/// A named source text. End of text is the end of `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a whole file. The name is the path as given.
    pub fn read(path: impl AsRef<Path>) -> io::Result<SourceFile> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Ok(SourceFile::new(path.display().to_string(), text))
    }
}
