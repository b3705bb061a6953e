// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-decider
//!
//! Small demo domains built on the public API, shared by the integration and
//! property suites.
//!
//! # Design Principles
//! - All test data is deterministic (no `Utc::now()`)
//! - Fixtures are the only place that defines domain types and components
//! - Components are pure; the in-memory stores are the only mutable state

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

pub mod counter;
pub mod memory;
pub mod order_workflow;
pub mod restaurant;

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// Install a test subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Shared buffer a scoped subscriber writes formatted log lines into
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a scoped subscriber and return what it logged at debug and above
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().expect("log buffer poisoned")).into_owned();
    (value, logs)
}
