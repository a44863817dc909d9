//! Shared utilities.
//!
//! Common utilities used across the crate including hashing, environment flags
//! and test helpers.

pub mod hash;


/// Returns true when the environment variable is set to exactly `1`.
pub fn env_flag(name: &str) -> bool {
  std::env::var(name).is_ok_and(|value| value == "1")
}
