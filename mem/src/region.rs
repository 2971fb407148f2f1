// Copyright (C) 2025 the mapfn authors. All rights reserved.

use std::{io, ptr, slice};

use crate::{error::MemoryError, platform};

/// A private, anonymous memory mapping with read, write, and execute
/// permission, unmapped on drop.
///
/// The requested length is rounded up to a whole number of pages, so
/// [`ExecutableRegion::len`] may exceed what was asked for. The region is
/// never resized.
pub struct ExecutableRegion {
    start: *mut u8,
    length: usize,
}

impl ExecutableRegion {
    /// Maps a fresh region of at least `length` bytes.
    ///
    /// Fails with [`MemoryError::EmptyCode`] when `length` is zero and
    /// with [`MemoryError::Allocation`] when the OS rejects the mapping.
    pub fn of_size(length: usize) -> Result<ExecutableRegion, MemoryError> {
        if length == 0 {
            return Err(MemoryError::EmptyCode);
        }
        unsafe {
            let page_size = {
                let result = libc::sysconf(libc::_SC_PAGESIZE);
                if result == -1 {
                    Err(io::Error::last_os_error())
                } else {
                    Ok(result as usize)
                }
            }?;
            let aligned_length = (length + page_size - 1) & !(page_size - 1);
            let start = libc::mmap(
                ptr::null_mut(),
                aligned_length,
                libc::PROT_READ | libc::PROT_WRITE | libc::PROT_EXEC,
                platform::anonymous_flags(),
                -1,
                0,
            );
            if start == libc::MAP_FAILED {
                return Err(io::Error::last_os_error().into());
            }
            tracing::debug!(
                requested = length,
                mapped = aligned_length,
                address = ?start,
                "mapped executable region"
            );
            Ok(ExecutableRegion {
                start: start as *mut u8,
                length: aligned_length,
            })
        }
    }

    pub fn start(&self) -> *mut u8 {
        self.start
    }

    /// Length of the mapping in bytes, after page rounding.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.start, self.length) }
    }

    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.start, self.length) }
    }
}

impl Drop for ExecutableRegion {
    fn drop(&mut self) {
        // munmap can only fail on a bad address/length pair, which would
        // mean this struct was constructed incorrectly.
        unsafe {
            libc::munmap(self.start as *mut libc::c_void, self.length);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_length_up_to_page_size() {
        let region = ExecutableRegion::of_size(1)
            .expect("mapping one byte should succeed");
        let page_size =
            unsafe { libc::sysconf(libc::_SC_PAGESIZE) } as usize;
        assert!(!region.start().is_null());
        assert_eq!(page_size, region.len());
    }

    #[test]
    fn zero_length_is_rejected_before_mapping() {
        assert!(matches!(
            ExecutableRegion::of_size(0),
            Err(MemoryError::EmptyCode)
        ));
    }

    #[test]
    fn writes_are_readable_back() {
        let mut region = ExecutableRegion::of_size(16)
            .expect("mapping should succeed");
        for (i, byte) in region.as_slice_mut()[..4].iter_mut().enumerate() {
            *byte = i as u8;
        }
        assert_eq!(&[0, 1, 2, 3], &region.as_slice()[..4]);
    }

    #[test]
    fn successive_regions_do_not_overlap() {
        let first = ExecutableRegion::of_size(64)
            .expect("mapping should succeed");
        let second = ExecutableRegion::of_size(64)
            .expect("mapping should succeed");

        let first_range =
            first.start() as usize..first.start() as usize + first.len();
        let second_range =
            second.start() as usize..second.start() as usize + second.len();
        assert!(
            first_range.end <= second_range.start
                || second_range.end <= first_range.start
        );
    }
}
