//! Dispatch throughput benchmark
//!
//! Registers one listener and measures the average time of `EventBus::call`
//! over warmup and measurement iterations.

mod bench;
mod cli;
mod logger;

use anyhow::Result;
use clap::Parser;
use tinyevents_core::EventBus;

use crate::bench::{run_iteration, BenchListener, BenchReport};
use crate::cli::BenchArgs;

fn main() -> Result<()> {
    let args = BenchArgs::parse();
    logger::init_logger(args.verbose);
    tracing::debug!("bench args: {:?}", args);
    args.validate()?;

    let mut bus = EventBus::new();
    bus.register(BenchListener);

    for iteration in 1..=args.warmup {
        let sample = run_iteration(&mut bus, args.iterations)?;
        tracing::info!(
            "warmup {}/{}: {:.3} ns/op",
            iteration,
            args.warmup,
            sample.nanos_per_call()
        );
    }

    let mut report = BenchReport::default();
    for iteration in 1..=args.measurement {
        let sample = run_iteration(&mut bus, args.iterations)?;
        tracing::info!(
            "iteration {}/{}: {:.3} ns/op",
            iteration,
            args.measurement,
            sample.nanos_per_call()
        );
        report.push(sample);
    }

    if let (Some(mean), Some((min, max))) =
        (report.mean_nanos_per_call(), report.range_nanos_per_call())
    {
        println!(
            "call: {:.3} ns/op (min {:.3}, max {:.3}) over {} x {} calls",
            mean,
            min,
            max,
            report.samples().len(),
            args.iterations
        );
    }

    Ok(())
}
