//! Repository modules implementing operations for all Civic Desk entities.
//!
//! Each module adds methods to `CivicService` via `impl CivicService` blocks.

pub mod assignment;
pub mod history;
pub mod reschedule;
pub mod technician;
pub mod ticket;
