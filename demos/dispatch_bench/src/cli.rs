use anyhow::{ensure, Result};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "dispatch_bench")]
#[command(about = "Measure the average cost of dispatching one event")]
pub struct BenchArgs {
    /// Events dispatched per iteration
    #[arg(long, default_value = "100000")]
    pub iterations: u32,

    /// Warmup iterations, discarded from the report
    #[arg(long, default_value = "4")]
    pub warmup: u32,

    /// Measured iterations
    #[arg(long, default_value = "4")]
    pub measurement: u32,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl BenchArgs {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.iterations > 0, "--iterations must be at least 1");
        ensure!(self.measurement > 0, "--measurement must be at least 1");
        Ok(())
    }
}
