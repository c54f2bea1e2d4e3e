//! Request dispatch: the single entry point a server front-end calls per
//! request.
//!
//! Each dispatch either answers a CORS preflight directly, or builds a
//! [`MatchContext`] and routes it. The dispatcher never builds scenario
//! responses itself; a matched outcome hands the caller everything needed
//! to invoke [`Backend::build_response`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::backend::Backend;
use crate::context::MatchContext;
use crate::cors::{self, PREFLIGHT_METHOD};
use crate::http::{Request, Response};
use crate::router::{route, Candidate, RouteResult};

/// Outcome of dispatching a single request.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A CORS preflight answered directly; matching never ran.
    Preflight(Response),
    /// A winning scenario, plus the context the backend needs to build
    /// its response.
    Matched {
        candidate: Candidate,
        context: MatchContext,
    },
    /// No scenario and no default anywhere. The caller picks the failure
    /// response policy.
    NoMatch,
}

impl DispatchOutcome {
    /// Whether a scenario was selected.
    pub fn is_matched(&self) -> bool {
        matches!(self, DispatchOutcome::Matched { .. })
    }
}

/// Owns the backend set and dispatches requests against it.
///
/// Built once before serving begins and shared read-only across
/// concurrent requests (typically behind an `Arc`). Backend declaration
/// order is part of the contract: it drives candidate collection order,
/// tie-breaking, and default fallback.
pub struct Dispatcher {
    backends: Vec<Arc<dyn Backend>>,
    dispatch_count: AtomicU64,
}

impl Dispatcher {
    /// Create a dispatcher over the given backends, in declaration order.
    pub fn new(backends: Vec<Arc<dyn Backend>>) -> Self {
        info!("all backends initialized");
        Dispatcher {
            backends,
            dispatch_count: AtomicU64::new(0),
        }
    }

    /// Convenience constructor for the common single-backend setup.
    pub fn single(backend: Arc<dyn Backend>) -> Self {
        Self::new(vec![backend])
    }

    /// The configured backends, in declaration order.
    pub fn backends(&self) -> &[Arc<dyn Backend>] {
        &self.backends
    }

    /// Whether any backend opts into CORS preflight handling.
    pub fn is_cors_enabled(&self) -> bool {
        self.backends.iter().any(|backend| backend.is_cors_enabled())
    }

    /// Get dispatch count
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count.load(Ordering::SeqCst)
    }

    /// Dispatch one request.
    ///
    /// `OPTIONS` requests short-circuit to the preflight responder when
    /// any backend enables CORS; they never reach the router. Everything
    /// else is classified into a [`MatchContext`] and routed.
    pub fn dispatch(&self, request: &Request) -> DispatchOutcome {
        self.dispatch_count.fetch_add(1, Ordering::SeqCst);

        if request.method() == PREFLIGHT_METHOD && self.is_cors_enabled() {
            return DispatchOutcome::Preflight(cors::preflight(request));
        }

        let context = MatchContext::from_request(request);
        match route(&context, &self.backends) {
            RouteResult::Matched(candidate) => DispatchOutcome::Matched { candidate, context },
            RouteResult::NotFound => DispatchOutcome::NoMatch,
        }
    }
}
