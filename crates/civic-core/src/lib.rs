//! # civic-core
//!
//! Core types and error types for Civic Desk.
//!
//! This crate provides the foundational types shared across all Civic crates:
//! - Entity structs for tickets, technicians, availability, and history
//! - Ticket status enum with state machine transitions
//! - Department enum covering the fixed set of city departments
//! - Calendar date helpers (canonical ISO plus the legacy `DD-MM-YYYY` edge)
//! - Cross-cutting error types
//! - Outcome types returned to the orchestrating agent layer

pub mod dates;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
