//! Route handlers organized by resource

pub mod athletes;
pub mod health;
