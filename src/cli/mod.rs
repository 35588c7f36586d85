mod commands;

pub use commands::extract;
