use std::time::Instant;

use crate::use_cases::dto::HealthReport;

#[derive(Clone)]
pub struct HealthCheckUseCase {
	started_at: Instant,
}

impl HealthCheckUseCase {
	pub fn new(started_at: Instant) -> Self {
		Self { started_at }
	}

	pub fn execute(&self) -> HealthReport {
		HealthReport {
			uptime_secs: self.started_at.elapsed().as_secs_f64(),
			rss_bytes:   resident_set_bytes(),
		}
	}
}

/// Resident set size from procfs; `None` where procfs is unavailable.
fn resident_set_bytes() -> Option<u64> {
	let status = std::fs::read_to_string("/proc/self/status").ok()?;
	parse_vm_rss(&status)
}

fn parse_vm_rss(status: &str) -> Option<u64> {
	let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
	let kib: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
	Some(kib * 1024)
}
