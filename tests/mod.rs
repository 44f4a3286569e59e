//! Test suite for Milestonenest
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
