//! Benchmark event, listener and timing helpers

use anyhow::{bail, Result};
use std::hint::black_box;
use std::time::{Duration, Instant};
use tinyevents_core::{Event, EventBus, Handler, HandlerResult};

/// Event dispatched by the benchmark; `sink` absorbs the listener's work
#[derive(Debug, Default)]
pub struct BenchEvent {
    pub sink: u64,
}

impl Event for BenchEvent {}

/// Listener doing a small, non-foldable amount of work per event
pub struct BenchListener;

impl Handler<BenchEvent> for BenchListener {
    fn handle(&mut self, event: &mut BenchEvent) -> HandlerResult {
        let parsed: u32 = black_box("123").parse()?;
        event.sink = event.sink.wrapping_add(u64::from(parsed.count_ones()));
        Ok(())
    }

    fn name(&self) -> &str {
        "bench listener"
    }
}

/// Timing of one iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub calls: u32,
    pub elapsed: Duration,
}

impl Sample {
    pub fn nanos_per_call(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / f64::from(self.calls.max(1))
    }
}

/// Dispatch `calls` fresh events and time the whole batch
pub fn run_iteration(bus: &mut EventBus, calls: u32) -> Result<Sample> {
    let start = Instant::now();
    for _ in 0..calls {
        let mut event = BenchEvent::default();
        let dispatch = bus.call(&mut event);
        if !dispatch.is_clean() {
            bail!("benchmark listener failed during dispatch");
        }
        black_box(event.sink);
    }
    Ok(Sample {
        calls,
        elapsed: start.elapsed(),
    })
}

/// Measured samples and their summary
#[derive(Debug, Default)]
pub struct BenchReport {
    samples: Vec<Sample>,
}

impl BenchReport {
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Average cost of one call over every measured call
    pub fn mean_nanos_per_call(&self) -> Option<f64> {
        let calls: u64 = self.samples.iter().map(|s| u64::from(s.calls)).sum();
        if calls == 0 {
            return None;
        }
        let nanos: u128 = self.samples.iter().map(|s| s.elapsed.as_nanos()).sum();
        Some(nanos as f64 / calls as f64)
    }

    /// Fastest and slowest iteration, per call
    pub fn range_nanos_per_call(&self) -> Option<(f64, f64)> {
        let mut per_call = self.samples.iter().map(Sample::nanos_per_call);
        let first = per_call.next()?;
        Some(per_call.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(calls: u32, nanos: u64) -> Sample {
        Sample {
            calls,
            elapsed: Duration::from_nanos(nanos),
        }
    }

    #[test]
    fn test_listener_counts_bits() {
        let mut event = BenchEvent::default();
        BenchListener.handle(&mut event).unwrap();
        // 123 = 0b111_1011
        assert_eq!(event.sink, 6);
    }

    #[test]
    fn test_run_iteration_dispatches_every_call() {
        let mut bus = EventBus::new();
        bus.register(BenchListener);
        let sample = run_iteration(&mut bus, 25).unwrap();
        assert_eq!(sample.calls, 25);
    }

    #[test]
    fn test_run_iteration_fails_on_dirty_dispatch() {
        let mut bus = EventBus::new().with_error_handler(|_| {});
        bus.register(tinyevents_core::fallible(|_: &mut BenchEvent| -> HandlerResult {
            Err("broken".into())
        }));
        assert!(run_iteration(&mut bus, 3).is_err());
    }

    #[test]
    fn test_empty_report() {
        let report = BenchReport::default();
        assert!(report.mean_nanos_per_call().is_none());
        assert!(report.range_nanos_per_call().is_none());
    }

    #[test]
    fn test_report_summary() {
        let mut report = BenchReport::default();
        report.push(sample(10, 1_000));
        report.push(sample(10, 3_000));

        assert_eq!(report.samples().len(), 2);
        assert_eq!(report.mean_nanos_per_call(), Some(200.0));
        assert_eq!(report.range_nanos_per_call(), Some((100.0, 300.0)));
        assert_eq!(report.samples()[0].nanos_per_call(), 100.0);
    }
}
