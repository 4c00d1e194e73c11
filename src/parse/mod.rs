mod error;
mod slots;

pub use error::Error;
pub use slots::{available_slots, Slot};
