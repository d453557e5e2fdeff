//! Shared helpers.

pub mod encoding;

pub use encoding::read_utf8;
