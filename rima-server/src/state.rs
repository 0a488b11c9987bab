//! Shared application state.
//!
//! `AppState` is cloned into every axum handler through the `State`
//! extractor. The provider registry inside the service is read-only after
//! startup; the only mutable state is request accounting.

use parking_lot::Mutex;
use rima_core::RhymeService;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

/// The three request operations, for accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Transliterate,
    StressTail,
    DetectRhyme,
}

/// Shared application state, available in every handler.
#[derive(Clone)]
pub struct AppState {
    /// Request operations over the startup-built provider registry.
    pub service: Arc<RhymeService>,
    /// Backend name reported by `/status`.
    pub backend: &'static str,
    /// Rolling per-operation request metrics.
    pub metrics: Arc<Mutex<RequestMetrics>>,
}

impl AppState {
    pub fn new(service: RhymeService, backend: &'static str) -> Self {
        Self {
            service: Arc::new(service),
            backend,
            metrics: Arc::new(Mutex::new(RequestMetrics::default())),
        }
    }

    pub fn record(&self, op: Operation, started: Instant, ok: bool) {
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.metrics.lock().record(op, elapsed_ms, ok);
    }

    pub fn metrics_snapshot(&self) -> RequestMetricsSnapshot {
        self.metrics.lock().snapshot()
    }
}

#[derive(Debug, Default)]
pub struct RequestMetrics {
    transliterate: StageWindow,
    stress_tail: StageWindow,
    detect_rhyme: StageWindow,
}

impl RequestMetrics {
    pub fn record(&mut self, op: Operation, elapsed_ms: f64, ok: bool) {
        let window = match op {
            Operation::Transliterate => &mut self.transliterate,
            Operation::StressTail => &mut self.stress_tail,
            Operation::DetectRhyme => &mut self.detect_rhyme,
        };
        window.record(elapsed_ms, ok);
    }

    pub fn snapshot(&self) -> RequestMetricsSnapshot {
        RequestMetricsSnapshot {
            transliterate: self.transliterate.snapshot(),
            stress_tail: self.stress_tail.snapshot(),
            detect_rhyme: self.detect_rhyme.snapshot(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RequestMetricsSnapshot {
    pub transliterate: StageSnapshot,
    pub stress_tail: StageSnapshot,
    pub detect_rhyme: StageSnapshot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StageSnapshot {
    pub count: usize,
    pub errors: usize,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub max_ms: f64,
}

/// Latency samples kept per operation.
const WINDOW_CAP: usize = 512;

/// Rolling latency window for one operation. `count`, `errors`, `sum_ms`
/// and `max_ms` cover every request since startup; percentiles cover the
/// last `WINDOW_CAP` requests.
#[derive(Debug, Default)]
struct StageWindow {
    samples: VecDeque<f64>,
    count: usize,
    errors: usize,
    sum_ms: f64,
    max_ms: f64,
}

impl StageWindow {
    fn record(&mut self, elapsed_ms: f64, ok: bool) {
        let sample = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
        if self.samples.len() == WINDOW_CAP {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.count += 1;
        self.errors += usize::from(!ok);
        self.sum_ms += sample;
        self.max_ms = self.max_ms.max(sample);
    }

    fn snapshot(&self) -> StageSnapshot {
        if self.count == 0 {
            return StageSnapshot::default();
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        StageSnapshot {
            count: self.count,
            errors: self.errors,
            mean_ms: self.sum_ms / self.count as f64,
            p50_ms: nearest_rank(&sorted, 0.50),
            p95_ms: nearest_rank(&sorted, 0.95),
            max_ms: self.max_ms,
        }
    }
}

/// Value at rank `round((n - 1) * p)` of an ascending, non-empty slice.
fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len().saturating_sub(1);
    let idx = (last as f64 * p).round() as usize;
    sorted.get(idx.min(last)).copied().unwrap_or(0.0)
}
