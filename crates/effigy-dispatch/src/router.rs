//! Scenario routing across the configured backend set.
//!
//! The router aggregates candidate scenarios from every backend, selects
//! the winner by score, falls back to the first declared default, and
//! reports an explicit not-found when nothing is available.

use std::sync::Arc;

use tracing::{debug, error};

use crate::backend::{Backend, Scenario, ScoreVector};
use crate::context::MatchContext;

/// One (backend, scenario, score) triple produced during routing.
///
/// Ephemeral: constructed during a single [`route`] call and handed to
/// the caller, which invokes the winning backend's response building
/// itself.
#[derive(Clone)]
pub struct Candidate {
    pub backend: Arc<dyn Backend>,
    pub scenario: Scenario,
    pub score: ScoreVector,
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("backend", &self.backend.name())
            .field("scenario", &self.scenario)
            .field("score", &self.score)
            .finish()
    }
}

/// The request matched no scenario and no backend declared a default.
///
/// Always recoverable: callers typically map it to a 404-class response.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("no scenario matched the request")]
pub struct NoMatch;

/// Routing outcome: a winner, or an explicit not-found.
#[derive(Debug)]
pub enum RouteResult {
    Matched(Candidate),
    NotFound,
}

impl RouteResult {
    pub fn is_matched(&self) -> bool {
        matches!(self, RouteResult::Matched(_))
    }

    /// Adapt to `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<Candidate, NoMatch> {
        match self {
            RouteResult::Matched(candidate) => Ok(candidate),
            RouteResult::NotFound => Err(NoMatch),
        }
    }
}

/// Pick the scenario that handles this context.
///
/// Backends are consulted in declaration order. If any real candidates
/// exist, the winner is the lexicographic-maximum [`ScoreVector`]; exact
/// ties resolve deterministically to the first-seen candidate (earliest
/// declared backend, earliest scenario within it) and callers must not
/// rely on richer tie semantics. With no real candidates, the first
/// declared default wins, carrying [`ScoreVector::ZERO`]. With neither,
/// the result is [`RouteResult::NotFound`] — an expected outcome for the
/// request, never fatal to the server.
///
/// Routing the same context against an unchanged backend set always
/// yields the same winner.
pub fn route(context: &MatchContext, backends: &[Arc<dyn Backend>]) -> RouteResult {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut defaults: Vec<Candidate> = Vec::new();

    for backend in backends {
        for (scenario, score) in backend.matching_scenarios(context) {
            candidates.push(Candidate {
                backend: Arc::clone(backend),
                scenario,
                score,
            });
        }
        if let Some(scenario) = backend.default_scenario(context) {
            defaults.push(Candidate {
                backend: Arc::clone(backend),
                scenario,
                score: ScoreVector::ZERO,
            });
        }
    }

    // Replace the running best only on a strictly greater score, so exact
    // ties keep the first-seen candidate.
    let picked = candidates
        .into_iter()
        .reduce(|best, next| if next.score > best.score { next } else { best });

    if let Some(winner) = picked {
        debug!(
            "scenario picked: {}#{} (score {})",
            winner.backend.name(),
            winner.scenario.name(),
            winner.score
        );
        return RouteResult::Matched(winner);
    }

    if let Some(fallback) = defaults.into_iter().next() {
        debug!(
            "scenario defaulted: {}#{}",
            fallback.backend.name(),
            fallback.scenario.name()
        );
        return RouteResult::Matched(fallback);
    }

    error!("no scenarios matched request");
    RouteResult::NotFound
}
