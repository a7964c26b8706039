use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

use crate::domain::payment::Processor;

/// Minimum spacing between polls of a single processor's health endpoint,
/// per the upstream's own rate limit (at most 1 call / 5s / endpoint).
pub const MIN_POLL_INTERVAL_MS: i64 = 5_000;

const MIN_REPORTED_SLOWNESS_MS: u64 = 1_000;

#[derive(Debug, Default)]
struct HealthSnapshot {
	failing: AtomicBool,
	min_response_time_ms: AtomicU64,
}

impl HealthSnapshot {
	fn load(&self) -> (bool, u64) {
		(
			self.failing.load(Ordering::Relaxed),
			self.min_response_time_ms.load(Ordering::Relaxed),
		)
	}
}

/// Process-lifetime, owned health state for both upstream processors.
///
/// Fields are read/written independently with atomics; stale reads across
/// the two fields of a single processor are acceptable (§5 of the design:
/// "Correctness does not require linearizability across the two fields").
pub struct HealthMonitor {
	default: HealthSnapshot,
	fallback: HealthSnapshot,
	last_poll_at_ms: AtomicI64,
}

impl Default for HealthMonitor {
	fn default() -> Self {
		Self {
			default: HealthSnapshot::default(),
			fallback: HealthSnapshot::default(),
			last_poll_at_ms: AtomicI64::new(0),
		}
	}
}

impl HealthMonitor {
	pub fn new() -> Self {
		Self::default()
	}

	fn snapshot(&self, processor: Processor) -> &HealthSnapshot {
		match processor {
			Processor::Default => &self.default,
			Processor::Fallback => &self.fallback,
		}
	}

	/// Adopt a freshly polled health reading for one processor.
	pub fn adopt(&self, processor: Processor, failing: bool, min_response_time_ms: u64) {
		let snap = self.snapshot(processor);
		snap.failing.store(failing, Ordering::Relaxed);
		snap.min_response_time_ms
			.store(min_response_time_ms, Ordering::Relaxed);
	}

	/// Mark a processor failing immediately, from an in-band failure report.
	pub fn report_failure(&self, processor: Processor) {
		self.snapshot(processor).failing.store(true, Ordering::Relaxed);
	}

	/// Record an observed slow response, from an in-band timeout.
	pub fn report_slowness(&self, processor: Processor) {
		let snap = self.snapshot(processor);
		let current = snap.min_response_time_ms.load(Ordering::Relaxed);
		snap.min_response_time_ms
			.store(current.max(MIN_REPORTED_SLOWNESS_MS), Ordering::Relaxed);
	}

	/// Prefer default unless default is failing and fallback is healthy.
	/// Tie-break: if both are failing, still prefer default.
	pub fn should_use_default(&self) -> bool {
		let (default_failing, _) = self.default.load();
		let (fallback_failing, _) = self.fallback.load();
		!default_failing || fallback_failing
	}

	/// Returns `true` (and claims the slot) if enough time has elapsed since
	/// the last poll to issue another round of health checks, honoring the
	/// upstream rate limit even if the poller's own schedule fires early.
	pub fn try_begin_poll(&self, now_ms: i64) -> bool {
		let last = self.last_poll_at_ms.load(Ordering::Relaxed);
		if now_ms - last < MIN_POLL_INTERVAL_MS {
			return false;
		}
		self.last_poll_at_ms
			.compare_exchange(last, now_ms, Ordering::Relaxed, Ordering::Relaxed)
			.is_ok()
	}
}
