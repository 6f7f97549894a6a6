//! CLI command handling

pub mod inspect;
pub mod output;
pub mod stability;

pub use inspect::*;
pub use output::*;
pub use stability::*;
