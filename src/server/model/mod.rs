//! Server application models and type definitions.
//!
//! This module contains the application state shared by HTTP handlers and the scheduler,
//! plus the in-flight records the core services pass around: matchup sessions and
//! rating outcomes.

pub mod app;
pub mod rating;
pub mod session;
