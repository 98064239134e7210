//! Domain models for Vantage.
//!
//! These are the core types shared across all crates.

pub mod actor;
pub mod contact;
pub mod deal;
pub mod dealer;
pub mod lead;
pub mod product;
pub mod quote;
pub mod role;
pub mod subsidiary;
pub mod task;
pub mod user;
