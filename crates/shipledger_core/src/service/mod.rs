//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep dispatch layers decoupled from storage details.

pub mod ship_service;
