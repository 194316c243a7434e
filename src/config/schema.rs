//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! fall back to defaults for any missing field.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// Resend and registration behavior.
    pub responder: ResponderConfig,

    /// Escalation channel settings.
    pub escalation: EscalationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Responder loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Interval between resend cycles in milliseconds.
    pub resend_interval_ms: u64,

    /// Register matcher responses carrying a non-normal status for resend.
    pub register_abnormal_matcher_responses: bool,

    /// Send a single escalation when a failed write is also short.
    pub collapse_write_escalations: bool,
}

impl ResponderConfig {
    pub fn resend_interval(&self) -> Duration {
        Duration::from_millis(self.resend_interval_ms)
    }
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            resend_interval_ms: 100,
            register_abnormal_matcher_responses: true,
            collapse_write_escalations: false,
        }
    }
}

/// What to do with an escalation when the supervisor is not keeping up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Wait for room; stalls the responder loop.
    #[default]
    Block,
    /// Drop the escalation and keep going.
    DropNewest,
}

/// Escalation channel configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EscalationConfig {
    /// Channel capacity.
    pub capacity: usize,

    /// Behavior when the channel is full.
    pub overflow: OverflowPolicy,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            overflow: OverflowPolicy::Block,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
