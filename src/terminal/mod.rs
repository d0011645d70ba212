//! Terminal output: escape sequence assembly for the host.

mod output;

pub use output::OutputBuffer;
