//! Scenario dispatch core for the Effigy programmable HTTP mock server.
//!
//! Given one incoming request and an ordered set of mock backends, this
//! crate decides which single scenario handles it: `OPTIONS` requests
//! short-circuit to the CORS preflight responder when any backend enables
//! CORS; everything else is classified (JSON, then XML, then plain text)
//! into a [`MatchContext`] and routed to the highest-scoring scenario,
//! with first-declared-default fallback. Transport, scenario definition,
//! and response templating live behind the [`Backend`] trait; nothing
//! here performs I/O.

// ===== HTTP boundary types =====
pub mod http;

// ===== Request classification =====
pub mod body;
pub mod context;

// ===== Backend contract and scenario routing =====
pub mod backend;
pub mod router;

// ===== Dispatch entry points =====
pub mod cors;
pub mod dispatch;

// Test-support backends, also used by the benches
pub mod testing;

// Re-export the working set at the crate root
pub use backend::{Backend, Scenario, ScoreVector, SCORE_DIMENSIONS};
pub use body::{classify, BodyKind, BodyValue};
pub use context::MatchContext;
pub use cors::{preflight, ALLOWED_METHODS, PREFLIGHT_METHOD};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use http::{Multimap, Request, RequestBuilder, Response};
pub use router::{route, Candidate, NoMatch, RouteResult};
