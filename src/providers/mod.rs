//! Typed argument structs for the provider resources the stacks declare.
//!
//! Field names are the Terraform argument names; serde emits them as-is.

pub mod aws;
