//! iCalendar text writing.

mod escape;
mod writer;

pub use escape::{encode_caret, escape_text};
pub use writer::{write, write_all, write_to};
