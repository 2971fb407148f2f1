// Copyright (C) 2025 the mapfn authors. All rights reserved.

//! The one platform difference in this crate: what an anonymous private
//! mapping is called. BSD-derived systems (including macOS) spell it
//! `MAP_ANON`, and macOS additionally wants `MAP_JIT` before it will hand
//! out memory that is writable and executable at once. Everything else
//! uses `MAP_ANONYMOUS`.

use libc::c_int;

/// Flags for a private, anonymous, JIT-capable mapping on this platform.
#[cfg(target_os = "macos")]
pub fn anonymous_flags() -> c_int {
    libc::MAP_JIT | libc::MAP_ANON | libc::MAP_PRIVATE
}

/// Flags for a private, anonymous mapping on this platform.
#[cfg(not(target_os = "macos"))]
pub fn anonymous_flags() -> c_int {
    libc::MAP_ANONYMOUS | libc::MAP_PRIVATE
}
