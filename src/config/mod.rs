//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Config (validated, immutable)
//!     → handed to the responder and observability at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a running responder is never reconfigured
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{Config, EscalationConfig, ObservabilityConfig, OverflowPolicy, ResponderConfig};
