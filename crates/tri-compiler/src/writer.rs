// SPDX-License-Identifier: (MIT OR Apache-2.0)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::codegen::TargetCode;
use crate::CompileError;

/// Writes the binary and text renderings of generated code to two files.
#[derive(Debug, Clone)]
pub struct TargetCodeWriter {
    pub binary_path: PathBuf,
    pub text_path: PathBuf,
}

impl TargetCodeWriter {
    pub fn new(binary_path: impl Into<PathBuf>, text_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            text_path: text_path.into(),
        }
    }

    pub fn write(&self, code: &dyn TargetCode) -> Result<(), CompileError> {
        write_file(&self.binary_path, &code.to_binary())?;
        write_file(&self.text_path, code.to_text().as_bytes())?;
        info!(
            binary = %self.binary_path.display(),
            text = %self.text_path.display(),
            "wrote target code"
        );
        Ok(())
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), CompileError> {
    fs::write(path, contents).map_err(|source| CompileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl TargetCode for Fixed {
        fn to_binary(&self) -> Vec<u8> {
            vec![0, 1, 2]
        }

        fn to_text(&self) -> String {
            "text\n".to_string()
        }
    }

    #[test]
    fn writes_both_renderings() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TargetCodeWriter::new(dir.path().join("out.bin"), dir.path().join("out.txt"));

        writer.write(&Fixed).unwrap();

        assert_eq!(fs::read(dir.path().join("out.bin")).unwrap(), vec![0, 1, 2]);
        assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "text\n");
    }

    #[test]
    fn unwritable_path_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("out.bin");
        let writer = TargetCodeWriter::new(&missing, dir.path().join("out.txt"));

        match writer.write(&Fixed) {
            Err(CompileError::Write { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected write error, got {other:?}"),
        }
    }
}
