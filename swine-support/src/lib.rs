//! # Swine Support
//!
//! Shared utilities for the Swine crates.
//!
//! This crate provides:
//! - Type-name rendering for error messages
//! - Record dumps used by the entities' `Display` impls

pub mod rendering;
