//! Core use-case services.
//!
//! # Responsibility
//! - Put durable storage in front of the in-memory rotation session.
//! - Serve the role-scoped house directory from an external source.

pub mod house_service;
pub mod rotation_service;
