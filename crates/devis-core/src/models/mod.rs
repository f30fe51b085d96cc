//! Data models shared by the parser, the drafting layer and the bindings.

pub mod client;
pub mod config;
pub mod document;
pub mod intent;
