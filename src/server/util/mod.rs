//! Utility functions and helpers for server operations.
//!
//! This module provides reusable helpers used across services and controllers, such as
//! deriving a firm's logo URL from its website.

pub mod logo;

#[cfg(test)]
pub mod test;
