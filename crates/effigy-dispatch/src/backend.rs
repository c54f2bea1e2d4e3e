//! The backend collaborator interface.
//!
//! A backend is an independently configured mock unit owning an ordered
//! set of scenarios and, optionally, one default scenario. How a backend
//! evaluates its predicates is its own business; the dispatch core only
//! consumes the narrow [`Backend`] trait.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::context::MatchContext;
use crate::http::{Request, Response};

/// Number of match dimensions in a [`ScoreVector`]: method, path,
/// headers, params, body.
pub const SCORE_DIMENSIONS: usize = 5;

/// Match-quality score for one candidate scenario.
///
/// Positions run from most significant (index 0) to least significant;
/// vectors compare lexicographically, so a higher leading element wins
/// regardless of trailing elements. The fixed length is part of the type:
/// every backend produces vectors of the same shape, and deserializing a
/// wrong-length array fails at configuration time rather than during
/// dispatch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ScoreVector([u32; SCORE_DIMENSIONS]);

impl ScoreVector {
    /// The lowest possible score, carried by default scenarios. It can
    /// never outrank a real candidate, only fill the gap when none exists.
    pub const ZERO: ScoreVector = ScoreVector([0; SCORE_DIMENSIONS]);

    pub const fn new(dimensions: [u32; SCORE_DIMENSIONS]) -> Self {
        ScoreVector(dimensions)
    }

    pub fn as_array(&self) -> &[u32; SCORE_DIMENSIONS] {
        &self.0
    }
}

impl std::fmt::Display for ScoreVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, dimension) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dimension}")?;
        }
        write!(f, "]")
    }
}

impl From<[u32; SCORE_DIMENSIONS]> for ScoreVector {
    fn from(dimensions: [u32; SCORE_DIMENSIONS]) -> Self {
        ScoreVector(dimensions)
    }
}

/// A named response-producing rule owned by a backend.
///
/// Opaque to the dispatch core beyond its identity; the owning backend
/// resolves it back to its definition when building the response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scenario {
    name: String,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Scenario { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// The contract every mock backend satisfies.
///
/// Backends are constructed once before serving begins and treated as
/// read-only for the process lifetime: every method takes `&self`, so
/// dispatch cannot mutate backend state. Implementations must be
/// `Send + Sync` because the backend set is shared across concurrently
/// executing dispatches.
pub trait Backend: Send + Sync {
    /// Backend name for logging and diagnostics.
    fn name(&self) -> &str;

    /// Candidate scenarios for this context, each with its score vector.
    /// Zero candidates means nothing in this backend matched.
    fn matching_scenarios(&self, context: &MatchContext) -> Vec<(Scenario, ScoreVector)>;

    /// The designated fallback scenario, if this backend declares one.
    fn default_scenario(&self, context: &MatchContext) -> Option<Scenario>;

    /// Whether this backend opts into CORS preflight handling.
    fn is_cors_enabled(&self) -> bool;

    /// Build the response for a scenario this core selected. Invoked by
    /// the caller after dispatch, never by the dispatch core itself.
    fn build_response(
        &self,
        request: &Request,
        started_at: Instant,
        scenario: &Scenario,
        context: &MatchContext,
    ) -> Response;
}
