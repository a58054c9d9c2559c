pub mod body;
pub mod error;
pub mod gravity;
pub mod time;
