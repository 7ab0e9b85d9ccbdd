//! Authentication Service Library
//!
//! Issues and validates signed, time-bounded bearer tokens (HS256 compact
//! tokens) and resolves usernames into stored credential records through a
//! lookup port.
//!
//! # Modules
//!
//! - `config` - Service configuration (signing secret, token lifetime)
//! - `crypto` - Signing key derivation and the token codec
//! - `errors` - Error types
//! - `models` - Principals, credential records, validation outcomes
//! - `observability` - Metrics and log correlation helpers
//! - `repositories` - Credential lookup port
//! - `services` - Token issuance/validation service and login flow

pub mod config;
pub mod crypto;
pub mod errors;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod services;
