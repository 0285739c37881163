//! Test fixture modules for database record creation.
//!
//! This module contains fixture utilities for creating test data during test execution
//! (Phase 2 of the test architecture).
//!
//! - `firm` - Firm records and in-memory firm models

pub mod firm;
