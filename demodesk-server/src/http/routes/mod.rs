//! Route handlers organized by resource

pub mod root;
pub mod health;
pub mod demo_requests;
pub mod metrics;
pub mod diagnostics;
