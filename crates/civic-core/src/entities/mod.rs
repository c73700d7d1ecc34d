//! Entity structs for Civic Desk domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod history;
mod technician;
mod ticket;

pub use history::{HistoryEntry, HistoryRecord};
pub use technician::{AvailableTechnician, Technician, TechnicianAvailability, TechnicianSnapshot};
pub use ticket::{Ticket, TicketDetails};
