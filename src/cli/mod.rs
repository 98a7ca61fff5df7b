//! Command-line interface module.

mod args;
pub mod inspect;
pub mod recolor;

pub use args::{Cli, Commands};
