//! Shared test utilities for envforge integration tests.
//!
//! This module provides:
//! - `TestRepo` for building an isolated GitOps repository on disk
//! - Builder patterns for creating environment data and change sets

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestRepo;
