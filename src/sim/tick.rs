//! Per-tick driver: physics step followed by one full search pass
//!
//! Reseeding, kicks and progress reporting live here so the search core
//! stays a pure function of body state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, ArenaConfig};
use super::body::Body;
use crate::error::Result;
use crate::results::{Durable, FoundRecord, ResultLog};
use crate::search::{AddressDeriver, BitString, Candidate, MatchChecker, SearchOutcome, extract};

/// Input collected between ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Points where the user clicked
    pub kicks: Vec<DVec2>,
}

/// What a tick produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Search pass exhausted without a match
    Continue,
    /// Match found and logged; the run is over. Repeated on every later
    /// tick of a finished session.
    Found(FoundRecord),
}

/// First candidate of a tick, for progress display
#[derive(Debug, Clone)]
pub struct Progress<'a> {
    pub iteration: u64,
    pub candidate: &'a Candidate,
    pub address: &'a str,
}

/// A body as seen by a renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyView {
    pub pos: DVec2,
    pub radius: f64,
    pub speed_nibble: u8,
}

impl From<&Body> for BodyView {
    fn from(body: &Body) -> Self {
        Self {
            pos: body.pos,
            radius: body.radius,
            speed_nibble: body.speed_nibble(),
        }
    }
}

/// Read-only state for display collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub bodies: Vec<BodyView>,
    pub iteration: u64,
    pub score: u64,
    pub velocity_range: (f64, f64),
    pub target: String,
    pub found: bool,
}

/// Simulation plus search, advanced one tick at a time
pub struct Session<D: AddressDeriver, W: Durable> {
    pub arena: Arena,
    checker: MatchChecker<D>,
    results: ResultLog<W>,
    reseed_interval: u64,
    /// Completed ticks
    pub iteration: u64,
    /// Kicks that hit a body
    pub score: u64,
    found: Option<FoundRecord>,
}

impl<D: AddressDeriver, W: Durable> Session<D, W> {
    pub fn new(arena: Arena, checker: MatchChecker<D>, results: ResultLog<W>, reseed_interval: u64) -> Self {
        Self {
            arena,
            checker,
            results,
            reseed_interval: reseed_interval.max(1),
            iteration: 0,
            score: 0,
            found: None,
        }
    }

    /// Convenience constructor from arena parameters
    pub fn with_config(
        config: ArenaConfig,
        seed: u64,
        checker: MatchChecker<D>,
        results: ResultLog<W>,
        reseed_interval: u64,
    ) -> Self {
        Self::new(Arena::new(config, seed), checker, results, reseed_interval)
    }

    pub fn is_found(&self) -> bool {
        self.found.is_some()
    }

    /// The logged match, once there is one
    pub fn found(&self) -> Option<&FoundRecord> {
        self.found.as_ref()
    }

    pub fn results(&self) -> &ResultLog<W> {
        &self.results
    }

    /// Current fingerprint of the arena
    pub fn fingerprint(&self) -> BitString {
        extract(&self.arena.bodies)
    }

    /// Run one tick: reseed if due, apply kicks, advance, search
    ///
    /// Once a match has been logged the session is finished: further calls
    /// return the same `Found` record without advancing or touching the log.
    pub fn tick(
        &mut self,
        input: &TickInput,
        observer: Option<&mut dyn FnMut(&Progress<'_>)>,
    ) -> Result<TickOutcome> {
        if let Some(record) = &self.found {
            return Ok(TickOutcome::Found(record.clone()));
        }

        if self.iteration > 0 && self.iteration.is_multiple_of(self.reseed_interval) {
            self.arena.reseed();
        }

        for &point in &input.kicks {
            if self.arena.apply_kick(point) {
                self.score += 1;
            }
        }

        self.arena.advance();
        let fingerprint = self.fingerprint();

        let iteration = self.iteration;
        let outcome = match observer {
            Some(observe) => {
                let mut forward = |candidate: &Candidate, address: &str| {
                    observe(&Progress {
                        iteration,
                        candidate,
                        address,
                    });
                };
                self.checker.search(&fingerprint, Some(&mut forward))?
            }
            None => self.checker.search(&fingerprint, None)?,
        };

        let result = match outcome {
            SearchOutcome::Exhausted { .. } => TickOutcome::Continue,
            SearchOutcome::Found(found) => {
                let record = FoundRecord::from_match(&found, iteration);
                // The match only counts once it is on disk
                self.results.append(&record)?;
                log::info!("{record}");
                log::info!("FOUND at tick {} loop {}", iteration, found.index);
                self.found = Some(record.clone());
                TickOutcome::Found(record)
            }
        };

        self.iteration += 1;
        Ok(result)
    }

    /// Display state for a renderer
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            bodies: self.arena.bodies.iter().map(BodyView::from).collect(),
            iteration: self.iteration,
            score: self.score,
            velocity_range: self.arena.config.velocity_range,
            target: self.checker.target().to_string(),
            found: self.found.is_some(),
        }
    }
}
