//! Database repositories.
//!
//! Repositories are generic over [`sea_orm::ConnectionTrait`] so the same queries run against
//! a pooled connection or inside a transaction.

pub mod firm;
