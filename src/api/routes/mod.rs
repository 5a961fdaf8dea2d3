//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod page;
pub mod regions;
pub mod selection;
