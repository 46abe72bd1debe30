// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Infrastructure failures of a compilation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::Phase;

/// Failures outside the source program itself. Errors in the program are
/// diagnostics, except that `Halted` records which phase stopped.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("compilation stopped after {phase} with {errors} error(s)")]
    Halted { phase: Phase, errors: usize },
}
