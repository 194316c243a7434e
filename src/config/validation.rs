//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, capacity > 0)
//! - Check addresses and log levels parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Config → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::Config;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("responder.resend_interval_ms must be greater than zero")]
    ZeroResendInterval,

    #[error("escalation.capacity must be greater than zero")]
    ZeroEscalationCapacity,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    BadMetricsAddress(String),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.responder.resend_interval_ms == 0 {
        errors.push(ValidationError::ZeroResendInterval);
    }

    if config.escalation.capacity == 0 {
        errors.push(ValidationError::ZeroEscalationCapacity);
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadMetricsAddress(obs.metrics_address.clone()));
    }

    if !LOG_LEVELS.contains(&obs.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(obs.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
