// Copyright (C) 2025 the mapfn authors. All rights reserved.

use std::io;

use anyhow::Context;
use mapfn_mem::{snippets, CompiledFunction};

/// Fixed-bytes variant: maps a hand-assembled "return 42" and calls it.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let function =
        CompiledFunction::allocate_and_fill(&snippets::load_return(42))
            .context("allocating executable memory")?;
    println!("buffer starts at {:p}", function.address());

    // The snippet is known-good code for this architecture.
    let result = unsafe { function.invoke() };
    println!("return is {result}");

    Ok(())
}
