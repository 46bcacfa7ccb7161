//! Document and bundle domain entities.

pub mod model;

pub use model::{Bundle, SecureDocument};
