//! Ports Layer
//!
//! Driving port (inbound) only: the filter has no driven dependencies.

pub mod inbound;

pub use inbound::MembershipFilter;
