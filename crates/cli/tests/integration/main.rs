//! CLI integration tests.
//!
//! The site tooling is replaced by `/bin/sh` scripts, so these run on Unix only.

#![cfg(unix)]

mod common;

mod build_tests;
mod generate_tests;
