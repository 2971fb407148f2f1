// Copyright (C) 2025 the mapfn authors. All rights reserved.

use static_assertions::assert_eq_size;

use crate::{error::MemoryError, region::ExecutableRegion};

/// The fixed signature every compiled function is invoked with: no
/// arguments, a 32-bit signed integer left in the return register.
type RawEntryPoint = extern "C" fn() -> i32;

assert_eq_size!(RawEntryPoint, *const u8);

/// Machine code copied into an owned [`ExecutableRegion`], callable
/// through [`CompiledFunction::invoke`].
///
/// The region lives exactly as long as this struct and is unmapped when
/// it drops.
pub struct CompiledFunction {
    region: ExecutableRegion,
    code_length: usize,
}

impl CompiledFunction {
    /// Maps an executable region of at least `code.len()` bytes and
    /// copies `code` into it starting at offset 0.
    ///
    /// The bytes are taken as-is: nothing here decodes, validates, or
    /// relocates them. Empty `code` is rejected with
    /// [`MemoryError::EmptyCode`].
    pub fn allocate_and_fill(
        code: &[u8],
    ) -> Result<CompiledFunction, MemoryError> {
        let mut region = ExecutableRegion::of_size(code.len())?;
        region.as_slice_mut()[..code.len()].copy_from_slice(code);
        Ok(CompiledFunction {
            region,
            code_length: code.len(),
        })
    }

    /// Base address of the mapping, i.e. the entry point.
    pub fn address(&self) -> *const u8 {
        self.region.start()
    }

    /// The bytes this function was built from.
    pub fn code(&self) -> &[u8] {
        &self.region.as_slice()[..self.code_length]
    }

    /// Jumps to the start of the region and returns whatever the code
    /// leaves in the 32-bit return register.
    ///
    /// This is the one place the type system's guarantees are suspended:
    /// the base address is reinterpreted as a [`RawEntryPoint`] and
    /// called.
    ///
    /// # Safety
    ///
    /// The bytes passed to [`CompiledFunction::allocate_and_fill`] must be
    /// a valid sequence of native machine instructions for the host
    /// processor that respects the C calling convention for a
    /// zero-argument function returning an `i32`, ending in a return.
    /// Anything else is undefined behavior at the point of the call, and
    /// detecting it is explicitly not this crate's job.
    pub unsafe fn invoke(&self) -> i32 {
        let entry: RawEntryPoint =
            std::mem::transmute(self.region.start() as *const u8);
        entry()
    }
}
