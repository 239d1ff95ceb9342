//! Core domain types and utilities for paygate.
//!
//! This crate provides the foundational types shared by the identity,
//! billing, and gate crates: the rootcause-based `Result` alias, the
//! session identifier handed out by the host, the resolved user
//! `Identity`, and the `DeploymentMode` selected once at startup.

pub mod error;
pub mod id;
pub mod identity;
pub mod mode;

pub use error::Result;
pub use id::SessionId;
pub use identity::Identity;
pub use mode::DeploymentMode;
