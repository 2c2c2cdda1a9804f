//! Shared helpers.

pub mod fs;
pub mod html;
mod plural;
pub mod slug;

pub use plural::plural_count;
