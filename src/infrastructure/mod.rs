//! # Infrastructure Layer
//!
//! Adapters for persistence and the remote inventory boundary.

pub mod persistence;
pub mod remote;
