//! Request helpers shared by controllers: the caller's origin key for rate limiting and the
//! admin secret check.

pub mod admin;
pub mod origin;
