// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subscriber setup for binaries embedding the engine.
//!
//! The library only emits `tracing` events; nothing is printed until a
//! subscriber is installed. Logs go to stderr so stdout stays free for
//! results.

use tracing::Level;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Default filter directive: engine events at `level`, dependencies at warn.
pub fn default_directive(level: Level) -> String {
    format!("folio={},warn", level.as_str().to_lowercase())
}

/// Install a global subscriber. `RUST_LOG` overrides `level` when set.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_logging(level: Level, json_output: bool) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    if json_output {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_timer(SystemTime)
            .with_target(true)
            .with_thread_names(true);

        Registry::default().with(env_filter).with(fmt_layer).try_init().is_ok()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(SystemTime)
            .with_target(true)
            .with_thread_ids(false);

        Registry::default().with(env_filter).with(fmt_layer).try_init().is_ok()
    }
}
