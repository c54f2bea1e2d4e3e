//! Test-support backend with canned answers.
//!
//! Real backends evaluate scenario predicates against the match context;
//! that machinery lives outside this crate. [`FixedBackend`] answers from
//! a fixed candidate table instead, which is all the dispatch logic needs
//! for its own tests and benchmarks.

use std::time::Instant;

use crate::backend::{Backend, Scenario, ScoreVector, SCORE_DIMENSIONS};
use crate::context::MatchContext;
use crate::http::{Request, Response};

/// A [`Backend`] answering every context from a fixed candidate table.
#[derive(Debug, Clone, Default)]
pub struct FixedBackend {
    name: String,
    candidates: Vec<(Scenario, ScoreVector)>,
    default: Option<Scenario>,
    cors_enabled: bool,
}

impl FixedBackend {
    pub fn new(name: impl Into<String>) -> Self {
        FixedBackend {
            name: name.into(),
            candidates: Vec::new(),
            default: None,
            cors_enabled: false,
        }
    }

    /// Add a candidate scenario reported for every context.
    pub fn with_candidate(mut self, name: &str, score: [u32; SCORE_DIMENSIONS]) -> Self {
        self.candidates
            .push((Scenario::new(name), ScoreVector::new(score)));
        self
    }

    /// Declare the backend's default scenario.
    pub fn with_default(mut self, name: &str) -> Self {
        self.default = Some(Scenario::new(name));
        self
    }

    /// Opt this backend into CORS preflight handling.
    pub fn with_cors(mut self) -> Self {
        self.cors_enabled = true;
        self
    }
}

impl Backend for FixedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn matching_scenarios(&self, _context: &MatchContext) -> Vec<(Scenario, ScoreVector)> {
        self.candidates.clone()
    }

    fn default_scenario(&self, _context: &MatchContext) -> Option<Scenario> {
        self.default.clone()
    }

    fn is_cors_enabled(&self) -> bool {
        self.cors_enabled
    }

    fn build_response(
        &self,
        _request: &Request,
        _started_at: Instant,
        scenario: &Scenario,
        _context: &MatchContext,
    ) -> Response {
        let mut response = Response::new(200);
        response.set_header("x-effigy-backend", self.name.clone());
        response.set_header("x-effigy-scenario", scenario.name());
        response.set_body(format!("{}#{}", self.name, scenario.name()));
        response
    }
}
