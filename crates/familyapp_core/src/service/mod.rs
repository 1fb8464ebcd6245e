//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw form input into validated records before they reach the store.
//! - Keep UI/FFI layers decoupled from record construction details.

pub mod family_service;
