mod technician;
mod ticket;

pub use technician::TechnicianCommands;
pub use ticket::TicketCommands;
