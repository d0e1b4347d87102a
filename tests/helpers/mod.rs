//! Test helpers module
//!
//! This module provides utilities and helpers for testing the FarmLive crate.
//! It includes mock servers for the external APIs and test context setup.

#![allow(dead_code)]

pub mod translator_mock;
pub mod gemini_mock;
pub mod test_context;

pub use translator_mock::*;
pub use gemini_mock::*;
pub use test_context::*;
