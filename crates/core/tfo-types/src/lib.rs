//! Core types for tfo.
//!
//! This crate provides the types exchanged with the identity service:
//! - [`Compartment`] - One compartment record as returned by a list call
//! - [`ListCompartmentsRequest`] / [`ListCompartmentsResponse`] - One page of a list call
//! - [`ClientConfig`] - Endpoint, credentials and timeout settings for a client
//! - [`format_sdk_time`] - Canonical string form of service timestamps

pub mod compartment;
pub mod config;
pub mod request;
pub mod time;

pub use compartment::*;
pub use config::*;
pub use request::*;
pub use time::*;
