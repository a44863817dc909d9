//! apiref-lib: Core types and logic for apiref
//!
//! This crate decides when OpenAPI reference pages need regenerating and
//! drives the external docs tooling:
//! - `SiteConfig`: the specs of a docs site and the commands that build it
//! - `Cache`: per-spec content hash of the last successful generation
//! - `decide`: the regeneration policy for one spec
//! - `generate`: runs the generator for the specs that need it
//! - `pipeline`: the install, generate, sync, build, serve sequence

pub mod cache;
pub mod config;
pub mod consts;
pub mod decide;
pub mod events;
pub mod generate;
pub mod pipeline;
pub mod process;
pub mod sync;
pub mod util;
