pub mod assign;
pub mod call;
pub mod dispatch;
pub mod init;
pub mod reschedule;
pub mod schema;
pub mod shared;
pub mod technician;
pub mod ticket;
