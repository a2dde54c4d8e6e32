// src/session/mod.rs
pub mod controller;
pub mod selector;

pub use controller::{Session, SessionConfig};
pub use selector::{list_sections, select};
