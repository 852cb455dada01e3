//! Integration test suites.

mod keyboard;
mod persistence;
mod rendering;
