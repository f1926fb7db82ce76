//! CLI command implementations.

mod build;
mod export;
mod inspect;

pub use build::build;
pub use export::export;
pub use inspect::inspect;
