//! ep3gen CLI binary entry point
//!
//! This is a thin wrapper that calls the library's `run_cli()` function.

use anyhow::Result;
use ep3gen_cli::run_cli;

fn main() -> Result<()> {
    run_cli()
}
