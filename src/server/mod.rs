//! Server application core modules.
//!
//! This module contains all server-side functionality for the ranker: HTTP routing, firm
//! persistence, matchup session issuance, vote admission control, the Elo rating engine,
//! admin firm management and scheduled maintenance.

pub mod admission;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod session;
pub mod startup;
pub mod util;
