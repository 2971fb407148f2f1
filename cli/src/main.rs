// Copyright (C) 2025 the mapfn authors. All rights reserved.

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use mapfn_cli::input::{self, TokenReader};
use mapfn_mem::CompiledFunction;

/// Builds callable functions out of machine-code bytes read from stdin.
///
/// For each named function, reads a decimal byte count and then that many
/// two-character hexadecimal byte tokens, maps them into executable
/// memory, and invokes the result.
#[derive(Parser)]
#[command(name = "mapfn", version)]
struct Args {
    /// Names of the functions to read, in order.
    #[arg(default_values_t = [
        String::from("a"),
        String::from("b"),
        String::from("mul_a_b"),
    ])]
    names: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdin = io::stdin();
    let mut tokens = TokenReader::new(stdin.lock());
    let mut stdout = io::stdout();

    for name in &args.names {
        let code = input::read_function(name, &mut tokens, &mut stdout)
            .with_context(|| format!("reading bytes for {name}"))?;
        tracing::debug!(%name, bytes = code.len(), "read function body");

        let function = CompiledFunction::allocate_and_fill(&code)
            .with_context(|| {
                format!("allocating executable memory for {name}")
            })?;
        writeln!(
            stdout,
            "buffer for {name} starts at {:p}",
            function.address()
        )?;

        // The user's bytes run as-is; if they are not a valid function of
        // the expected signature, the fault happens here.
        let result = unsafe { function.invoke() };
        writeln!(stdout, "return of {name} is {result}")?;
    }

    Ok(())
}
