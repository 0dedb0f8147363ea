//! Dashboard state types

use crate::models::{Scope, Waybill};
use crate::source::FetchError;
use crate::view::Outcome;
use std::fmt;

/// Lifecycle of the dashboard's data
#[derive(Clone, PartialEq, Debug)]
pub enum Phase {
    /// Nothing requested yet (or unmounted)
    Idle,
    /// A fetch is in flight
    Loading,
    /// The latest fetch succeeded
    Ready,
    /// The latest fetch failed; no snapshot is held
    Failed(FetchError),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Addressable views: every namespace, or a single one
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Route {
    All,
    Namespace(String),
}

impl Route {
    /// Route for an optional namespace parameter; empty means all
    pub fn from_namespace(namespace: Option<&str>) -> Self {
        match Scope::from_namespace(namespace) {
            Scope::All => Route::All,
            Scope::Namespace(ns) => Route::Namespace(ns),
        }
    }

    /// Fetch scope backing this route
    pub fn scope(&self) -> Scope {
        match self {
            Route::All => Scope::All,
            Route::Namespace(ns) => Scope::Namespace(ns.clone()),
        }
    }

    pub fn display_mode(&self) -> DisplayMode {
        match self {
            Route::All => DisplayMode::List,
            Route::Namespace(_) => DisplayMode::Single,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::All => write!(f, "all namespaces"),
            Route::Namespace(ns) => write!(f, "{}", ns),
        }
    }
}

/// How rows are laid out
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DisplayMode {
    List,
    Single,
}

/// Restricts visible rows to one outcome bucket
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OutcomeFilter {
    #[default]
    All,
    Only(Outcome),
}

impl OutcomeFilter {
    pub fn matches(&self, waybill: &Waybill) -> bool {
        match self {
            OutcomeFilter::All => true,
            OutcomeFilter::Only(outcome) => Outcome::of(waybill) == *outcome,
        }
    }

    /// All -> pending -> failure -> warning -> success -> All
    pub fn next(self) -> Self {
        match self {
            OutcomeFilter::All => OutcomeFilter::Only(Outcome::Pending),
            OutcomeFilter::Only(Outcome::Pending) => OutcomeFilter::Only(Outcome::Failure),
            OutcomeFilter::Only(Outcome::Failure) => OutcomeFilter::Only(Outcome::Warning),
            OutcomeFilter::Only(Outcome::Warning) => OutcomeFilter::Only(Outcome::Success),
            OutcomeFilter::Only(Outcome::Success) => OutcomeFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OutcomeFilter::All => "all",
            OutcomeFilter::Only(outcome) => outcome.as_str(),
        }
    }
}

/// Per-outcome counts over the whole snapshot
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, serde::Serialize)]
pub struct Summary {
    pub total: usize,
    pub pending: usize,
    pub failure: usize,
    pub warning: usize,
    pub success: usize,
}

impl Summary {
    pub fn of(waybills: &[Waybill]) -> Self {
        let mut summary = Summary {
            total: waybills.len(),
            ..Default::default()
        };
        for waybill in waybills {
            match Outcome::of(waybill) {
                Outcome::Pending => summary.pending += 1,
                Outcome::Failure => summary.failure += 1,
                Outcome::Warning => summary.warning += 1,
                Outcome::Success => summary.success += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_filter_cycle_returns_to_all() {
        let mut filter = OutcomeFilter::All;
        let mut seen = Vec::new();
        for _ in 0..5 {
            filter = filter.next();
            seen.push(filter.label());
        }
        assert_eq!(seen, vec!["pending", "failure", "warning", "success", "all"]);
    }

    #[test]
    fn test_route_scope_and_mode() {
        assert_eq!(Route::from_namespace(Some("")), Route::All);
        let route = Route::from_namespace(Some("foo"));
        assert_eq!(route.scope(), Scope::Namespace("foo".to_string()));
        assert_eq!(route.display_mode(), DisplayMode::Single);
        assert_eq!(Route::All.display_mode(), DisplayMode::List);
    }
}
