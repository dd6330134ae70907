//! Domain models for design storage.

pub mod design;
