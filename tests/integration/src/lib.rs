//! Integration test utilities for the presence bridge
//!
//! This crate provides an in-process fake of the remote presence API and token/metadata
//! fixtures. The in-memory port fakes are re-exported from `bridge_runtime::test_support`.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

pub use bridge_runtime::test_support::{FakeFactory, FakeHost, FakePresenceApi};
