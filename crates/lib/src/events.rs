//! Progress events emitted while generating and building.
//!
//! The library never prints. Callers receive events through a [`Reporter`]
//! and decide how to present them.

use crate::cache::CacheError;
use crate::decide::Decision;
use crate::generate::SpecResult;
use crate::pipeline::Step;

#[derive(Debug)]
pub enum Event<'a> {
  /// The cache file could not be used and an empty cache was substituted.
  CacheUnreadable(&'a CacheError),
  Decision { spec: &'a str, decision: &'a Decision },
  SpecFinished(&'a SpecResult),
  StepStarted(Step),
  StepSkipped { step: Step, reason: &'a str },
}

pub trait Reporter {
  fn report(&self, event: &Event<'_>);
}

/// Discards every event.
pub struct Silent;

impl Reporter for Silent {
  fn report(&self, _event: &Event<'_>) {}
}
