pub mod error;
pub mod formatters;
