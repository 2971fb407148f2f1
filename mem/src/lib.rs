// Copyright (C) 2025 the mapfn authors. All rights reserved.

pub mod entry;
pub mod error;
pub mod platform;
pub mod region;
pub mod snippets;

pub use entry::CompiledFunction;
pub use error::MemoryError;
pub use region::ExecutableRegion;
