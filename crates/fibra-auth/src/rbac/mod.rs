//! Role-based access control.

pub mod matrix;

pub use matrix::{accessible_modules, can_access, permission};
