// Copyright (C) 2025 the mapfn authors. All rights reserved.

use std::io;

use thiserror::Error;

/// Failure modes of the executable-memory allocator.
///
/// Faults raised by executing the bytes themselves (illegal instructions,
/// bad calling conventions) are deliberately absent: they happen past the
/// allocator's contract and are never caught or masked here.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// The operating system refused the executable mapping, e.g. under
    /// resource exhaustion or an executable-memory policy.
    #[error("executable mapping failed: {0}")]
    Allocation(#[from] io::Error),

    /// A zero-length region was requested. Rejected before asking the OS
    /// for anything.
    #[error("cannot allocate an empty executable region")]
    EmptyCode,
}
