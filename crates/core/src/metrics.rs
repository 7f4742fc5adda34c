//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Automation runs (skipped, completed, failed)
//! - Folder resolution (reused vs created)
//! - Delivery link write-back failures

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Automation
// =============================================================================

/// Automation runs total by outcome.
pub static AUTOMATION_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kickoff_automation_runs_total", "Total automation runs"),
        &["outcome"], // "skipped", "completed", "failed"
    )
    .unwrap()
});

/// Failed delivery link write-backs. These do not fail the run.
pub static WRITE_BACK_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "kickoff_write_back_failures_total",
        "Delivery link updates rejected by the record store",
    )
    .unwrap()
});

// =============================================================================
// Provisioning
// =============================================================================

/// Folders resolved by find-or-create.
pub static FOLDERS_RESOLVED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "kickoff_folders_resolved_total",
            "Folders resolved during provisioning",
        ),
        &["action"], // "reused", "created"
    )
    .unwrap()
});

/// Duration of a successful provisioning run in seconds.
pub static PROVISION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "kickoff_provision_duration_seconds",
            "Duration of folder tree provisioning",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["category"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(AUTOMATION_RUNS.clone()),
        Box::new(WRITE_BACK_FAILURES.clone()),
        Box::new(FOLDERS_RESOLVED.clone()),
        Box::new(PROVISION_DURATION.clone()),
    ]
}
