//! Context loading from files supplied on the command line.

mod loader;

pub use loader::load_context;
