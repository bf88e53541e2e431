//! Trait seams for tfo.
//!
//! - [`IdentityClient`] - Remote list client for compartments
//! - [`ResourceData`] - Terraform-style resource state that values are written into
//! - [`ResourceReader`] - The get/set-data/void steps of a data source read

pub mod client;
pub mod state;

pub use client::*;
pub use state::*;
