//! Domain types shared between the grade portal client crates.
//!
//! Everything here is pure: no network, no terminal, no runtime.

pub mod domain;
pub mod error;
pub mod grades;
pub mod protocol;
pub mod rut;
