//! Common utilities and types shared across the authentication crates.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for compact-token structural utilities (size limit, segments, header)
pub mod jwt;
