//! Per-decision resource sampling.
//!
//! A search is wrapped by [`measure`], which samples wall-clock time, the
//! calling thread's CPU time and the process resident set before and after
//! the call. Sampling is best effort: a probe that cannot read a value
//! reports `None` and the corresponding figure is recorded as zero.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::time::{Duration, Instant};

/// Cost of a single AI decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceStats {
    /// CPU time consumed by the deciding thread
    pub cpu_time: Duration,
    /// Change in resident memory across the call, in KB (may be negative)
    pub memory_delta_kb: i64,
    /// Wall-clock time from request to chosen move
    pub time_to_move: Duration,
}

impl ResourceStats {
    pub fn cpu_time_ms(&self) -> f64 {
        self.cpu_time.as_secs_f64() * 1000.0
    }

    pub fn time_to_move_ms(&self) -> f64 {
        self.time_to_move.as_secs_f64() * 1000.0
    }
}

/// Source of platform resource readings.
pub trait ResourceProbe {
    /// CPU time used so far by the calling thread.
    fn thread_cpu_time(&mut self) -> Option<Duration>;

    /// Resident set size of the process, in KB.
    fn resident_memory_kb(&mut self) -> Option<u64>;
}

/// Reads `/proc`. Every reading is `None` where procfs is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcfsProbe;

impl ProcfsProbe {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceProbe for ProcfsProbe {
    fn thread_cpu_time(&mut self) -> Option<Duration> {
        // Format: "<ns on cpu> <ns waiting> <timeslices>"
        let contents = fs::read_to_string("/proc/thread-self/schedstat").ok()?;
        let nanos = contents.split_whitespace().next()?.parse::<u64>().ok()?;
        Some(Duration::from_nanos(nanos))
    }

    fn resident_memory_kb(&mut self) -> Option<u64> {
        let contents = fs::read_to_string("/proc/self/status").ok()?;
        parse_vm_rss_kb(&contents)
    }
}

/// Extract the `VmRSS` figure from the contents of `/proc/self/status`.
fn parse_vm_rss_kb(status: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        // Format: "VmRSS:    12345 kB"
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse().ok())
}

/// Probe that replays scripted readings, for tests.
///
/// Each call pops the next value of its queue; an exhausted queue reads
/// as `None`.
#[derive(Debug, Clone, Default)]
pub struct FakeProbe {
    cpu: VecDeque<Duration>,
    memory: VecDeque<u64>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cpu(mut self, readings: impl IntoIterator<Item = Duration>) -> Self {
        self.cpu.extend(readings);
        self
    }

    pub fn with_memory(mut self, readings_kb: impl IntoIterator<Item = u64>) -> Self {
        self.memory.extend(readings_kb);
        self
    }
}

impl ResourceProbe for FakeProbe {
    fn thread_cpu_time(&mut self) -> Option<Duration> {
        self.cpu.pop_front()
    }

    fn resident_memory_kb(&mut self) -> Option<u64> {
        self.memory.pop_front()
    }
}

/// Run `f` and report what it cost.
pub fn measure<P, T, F>(probe: &mut P, f: F) -> (T, ResourceStats)
where
    P: ResourceProbe + ?Sized,
    F: FnOnce() -> T,
{
    let memory_before = probe.resident_memory_kb();
    let cpu_before = probe.thread_cpu_time();
    let start = Instant::now();

    let value = f();

    let time_to_move = start.elapsed();
    let cpu_after = probe.thread_cpu_time();
    let memory_after = probe.resident_memory_kb();

    let cpu_time = match (cpu_before, cpu_after) {
        (Some(before), Some(after)) => after.saturating_sub(before),
        _ => Duration::ZERO,
    };
    let memory_delta_kb = match (memory_before, memory_after) {
        (Some(before), Some(after)) => after as i64 - before as i64,
        _ => 0,
    };

    (
        value,
        ResourceStats {
            cpu_time,
            memory_delta_kb,
            time_to_move,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_uses_probe_deltas() {
        let mut probe = FakeProbe::new()
            .with_cpu([Duration::from_millis(10), Duration::from_millis(25)])
            .with_memory([1000, 1240]);

        let (value, stats) = measure(&mut probe, || 7);

        assert_eq!(value, 7);
        assert_eq!(stats.cpu_time, Duration::from_millis(15));
        assert_eq!(stats.memory_delta_kb, 240);
    }

    #[test]
    fn test_memory_delta_can_be_negative() {
        let mut probe = FakeProbe::new().with_memory([2048, 1024]);
        let ((), stats) = measure(&mut probe, || ());
        assert_eq!(stats.memory_delta_kb, -1024);
    }

    #[test]
    fn test_missing_readings_record_zero() {
        let mut probe = FakeProbe::new();
        let ((), stats) = measure(&mut probe, || ());
        assert_eq!(stats.cpu_time, Duration::ZERO);
        assert_eq!(stats.memory_delta_kb, 0);
    }

    #[test]
    fn test_wall_clock_covers_the_call() {
        let mut probe = FakeProbe::new();
        let ((), stats) = measure(&mut probe, || std::thread::sleep(Duration::from_millis(5)));
        assert!(stats.time_to_move >= Duration::from_millis(5));
    }

    #[test]
    fn test_parse_vm_rss() {
        let status = "Name:\tarena\nVmPeak:\t  9000 kB\nVmRSS:\t   12345 kB\nThreads:\t1\n";
        assert_eq!(parse_vm_rss_kb(status), Some(12345));
        assert_eq!(parse_vm_rss_kb("Name:\tarena\n"), None);
    }

    #[test]
    fn test_procfs_probe_reads_on_linux() {
        let mut probe = ProcfsProbe::new();
        if cfg!(target_os = "linux") {
            assert!(probe.resident_memory_kb().is_some());
        }
    }

    #[test]
    fn test_millisecond_accessors() {
        let stats = ResourceStats {
            cpu_time: Duration::from_micros(1500),
            memory_delta_kb: 0,
            time_to_move: Duration::from_millis(3),
        };
        assert!((stats.cpu_time_ms() - 1.5).abs() < 1e-9);
        assert!((stats.time_to_move_ms() - 3.0).abs() < 1e-9);
    }
}
