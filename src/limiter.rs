// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window admission controller for the quote extension endpoint.
//!
//! Each client identifier owns one window entry holding a request count
//! and an absolute reset time. The window resets entirely at its
//! boundary (fixed window, not sliding). Expired entries are swept
//! lazily inside the same critical section as the check, so no
//! background cleanup task is needed and the map stays bounded by the
//! set of identifiers active within one window.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::debug;

/// Decision for a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// Request is allowed
    Allowed {
        /// Remaining requests in the current window
        remaining: u32,
    },
    /// Request is over quota for the current window
    Denied {
        /// Whole seconds until the window resets; always >= 1
        retry_after_secs: u64,
    },
}

impl AdmissionDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AdmissionDecision::Allowed { .. })
    }
}

/// Per-identifier window state.
#[derive(Debug)]
struct WindowEntry {
    /// Requests counted in the current window
    count: u32,
    /// Absolute time at which the window resets
    reset_at: Instant,
}

/// Thread-safe fixed-window rate limiter.
///
/// One lock covers the whole map; the expiry sweep and the
/// read-modify-write on an identifier's entry run in a single critical
/// section, so concurrent checks for the same identifier can never
/// admit more than `max_requests` per window.
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether a request from `identifier` is admitted right now.
    pub async fn check_limit(&self, identifier: &str) -> AdmissionDecision {
        self.check_limit_at(identifier, Instant::now()).await
    }

    /// Admission check against an explicit timestamp. Exposed so window
    /// expiry can be exercised in tests without sleeping.
    pub(crate) async fn check_limit_at(&self, identifier: &str, now: Instant) -> AdmissionDecision {
        let window = self.config.window_duration();
        let mut entries = self.entries.lock().await;

        // Opportunistic sweep; correctness relies only on the
        // per-identifier check below.
        entries.retain(|_, entry| entry.reset_at > now);

        match entries.get_mut(identifier) {
            // First request in a window (fresh identifier, or its entry
            // was just swept).
            None => {
                entries.insert(
                    identifier.to_string(),
                    WindowEntry {
                        count: 1,
                        reset_at: now + window,
                    },
                );
                AdmissionDecision::Allowed {
                    remaining: self.config.max_requests.saturating_sub(1),
                }
            }
            Some(entry) if entry.count < self.config.max_requests => {
                entry.count += 1;
                AdmissionDecision::Allowed {
                    remaining: self.config.max_requests - entry.count,
                }
            }
            Some(entry) => {
                let retry_after_secs = retry_after_secs(entry.reset_at, now);
                debug!(identifier, retry_after_secs, "admission denied");
                AdmissionDecision::Denied { retry_after_secs }
            }
        }
    }

    /// Number of identifiers currently tracked.
    pub async fn tracked(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Wipe all state. Test harness use only.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

/// Whole seconds until `reset_at`, rounded up and clamped to at least 1
/// so a `Retry-After` of 0 is never reported even under clock skew.
fn retry_after_secs(reset_at: Instant, now: Instant) -> u64 {
    let remaining_ms = reset_at.saturating_duration_since(now).as_millis() as u64;
    remaining_ms.div_ceil(1000).max(1)
}
