//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate identity resolution and repository calls into use-case APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod favorite_service;
