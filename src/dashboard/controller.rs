//! Dashboard controller
//!
//! Owns the route, the current snapshot and the per-namespace expansion
//! state, and decides which fetch results are allowed to land. Every
//! `refresh` bumps a generation counter; a result is applied only when it
//! carries the current generation and the controller is still loading.

use super::fetch::{FetchOutcome, FetchTicket};
use super::state::{DisplayMode, OutcomeFilter, Phase, Route, Summary};
use crate::models::{Snapshot, Waybill};
use crate::search::{FuzzyIndex, SearchOptions};
use crate::source::FetchError;
use crate::view::{self, ViewContext, WaybillViewModel};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::AbortHandle;

struct InFlight {
    generation: u64,
    rx: oneshot::Receiver<FetchOutcome>,
    abort: Option<AbortHandle>,
}

pub struct DashboardController {
    route: Route,
    phase: Phase,
    generation: u64,
    inflight: Option<InFlight>,
    snapshot: Option<Snapshot>,
    index: Option<FuzzyIndex>,
    search_options: SearchOptions,
    query: String,
    outcome_filter: OutcomeFilter,
    /// Explicit toggles; namespaces not present use the route default
    expansion: HashMap<String, bool>,
    /// Indices into the snapshot, in display order
    visible: Vec<usize>,
}

impl DashboardController {
    pub fn new(route: Route) -> Self {
        Self::with_search_options(route, SearchOptions::default())
    }

    pub fn with_search_options(route: Route, search_options: SearchOptions) -> Self {
        Self {
            route,
            phase: Phase::Idle,
            generation: 0,
            inflight: None,
            snapshot: None,
            index: None,
            search_options,
            query: String::new(),
            outcome_filter: OutcomeFilter::All,
            expansion: HashMap::new(),
            visible: Vec::new(),
        }
    }

    // --- Lifecycle ---

    /// Start a fetch for the current route
    ///
    /// Any fetch still in flight is cancelled and its result will be
    /// discarded. The previous snapshot stays visible until the new one
    /// lands.
    pub fn refresh(&mut self) -> FetchTicket {
        self.cancel_inflight();
        self.generation += 1;

        let (tx, rx) = oneshot::channel();
        self.inflight = Some(InFlight {
            generation: self.generation,
            rx,
            abort: None,
        });
        self.phase = Phase::Loading;

        let scope = self.route.scope();
        tracing::debug!("Refreshing {} (generation {})", scope, self.generation);

        FetchTicket {
            generation: self.generation,
            scope,
            tx,
        }
    }

    /// Attach the task running the current fetch so it can be aborted
    pub fn track_task(&mut self, generation: u64, handle: AbortHandle) {
        match self.inflight.as_mut() {
            Some(inflight) if inflight.generation == generation => {
                inflight.abort = Some(handle);
            }
            _ => handle.abort(),
        }
    }

    /// Check the in-flight fetch without blocking. Returns `true` if state changed.
    pub fn poll(&mut self) -> bool {
        let Some(inflight) = self.inflight.as_mut() else {
            return false;
        };
        let generation = inflight.generation;

        match inflight.rx.try_recv() {
            Ok(outcome) => {
                self.inflight = None;
                self.complete(generation, outcome)
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => {
                self.inflight = None;
                self.complete(
                    generation,
                    Err(FetchError::network("fetch ended without a result")),
                )
            }
        }
    }

    /// Apply a fetch result
    ///
    /// Results from a superseded generation, or arriving when nothing is
    /// loading, are dropped and `false` is returned.
    pub fn complete(&mut self, generation: u64, outcome: FetchOutcome) -> bool {
        if generation != self.generation || !self.phase.is_loading() {
            tracing::debug!(
                "Discarding result of generation {} (current {}, {:?})",
                generation,
                self.generation,
                self.phase
            );
            return false;
        }
        if self
            .inflight
            .as_ref()
            .is_some_and(|inflight| inflight.generation == generation)
        {
            self.inflight = None;
        }

        match outcome {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(err) => {
                tracing::warn!("Fetch for {} failed: {}", self.route, err);
                self.snapshot = None;
                self.index = None;
                self.visible.clear();
                self.phase = Phase::Failed(err);
            }
        }
        true
    }

    /// Switch to another view. Returns a ticket if a fetch is needed.
    ///
    /// Query, outcome filter and expansion state are reset.
    pub fn navigate(&mut self, route: Route) -> Option<FetchTicket> {
        if route == self.route && self.phase != Phase::Idle {
            return None;
        }
        tracing::debug!("Navigating from {} to {}", self.route, route);

        self.route = route;
        self.query.clear();
        self.outcome_filter = OutcomeFilter::All;
        self.expansion.clear();
        self.snapshot = None;
        self.index = None;
        self.visible.clear();
        Some(self.refresh())
    }

    /// Tear down: any pending result will be ignored
    pub fn unmount(&mut self) {
        self.cancel_inflight();
        self.generation += 1;
        self.phase = Phase::Idle;
        self.snapshot = None;
        self.index = None;
        self.visible.clear();
        tracing::debug!("Dashboard unmounted at generation {}", self.generation);
    }

    // --- User input ---

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute_visible();
    }

    pub fn set_outcome_filter(&mut self, filter: OutcomeFilter) {
        self.outcome_filter = filter;
        self.recompute_visible();
    }

    pub fn cycle_outcome_filter(&mut self) -> OutcomeFilter {
        self.set_outcome_filter(self.outcome_filter.next());
        self.outcome_filter
    }

    /// Flip the expansion of one namespace. Returns the new state.
    pub fn toggle(&mut self, namespace: &str) -> bool {
        let expanded = !self.is_expanded(namespace);
        self.expansion.insert(namespace.to_string(), expanded);
        expanded
    }

    /// Expand or collapse every namespace in the current snapshot
    pub fn set_all_expanded(&mut self, expanded: bool) {
        if let Some(snapshot) = &self.snapshot {
            for waybill in &snapshot.waybills {
                self.expansion
                    .insert(waybill.namespace().to_string(), expanded);
            }
        }
    }

    // --- Accessors ---

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn outcome_filter(&self) -> OutcomeFilter {
        self.outcome_filter
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.route.display_mode()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_expanded(&self, namespace: &str) -> bool {
        self.expansion
            .get(namespace)
            .copied()
            .unwrap_or(self.display_mode() == DisplayMode::Single)
    }

    /// Waybills after query and outcome filter, in display order
    pub fn visible(&self) -> Vec<&Waybill> {
        match &self.snapshot {
            Some(snapshot) => self
                .visible
                .iter()
                .filter_map(|&i| snapshot.waybills.get(i))
                .collect(),
            None => Vec::new(),
        }
    }

    /// View models for the visible Waybills
    pub fn rows(&self, now: DateTime<Utc>) -> Vec<WaybillViewModel> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };
        let ctx = ViewContext {
            diff_url_format: &snapshot.diff_url_format,
            now,
        };
        self.visible()
            .into_iter()
            .map(|waybill| view::derive(waybill, self.is_expanded(waybill.namespace()), &ctx))
            .collect()
    }

    /// Outcome counts over the whole snapshot, ignoring query and filter
    pub fn summary(&self) -> Summary {
        self.snapshot
            .as_ref()
            .map(|snapshot| Summary::of(&snapshot.waybills))
            .unwrap_or_default()
    }

    // --- Internals ---

    fn cancel_inflight(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            tracing::debug!("Cancelling fetch generation {}", inflight.generation);
            if let Some(handle) = inflight.abort {
                handle.abort();
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let format = &snapshot.diff_url_format;
        if !format.is_empty() && !format.contains("%s") {
            tracing::warn!(
                "DiffURLFormat {:?} has no %s placeholder, commit links disabled",
                format
            );
        }

        let mut seen = HashSet::new();
        for waybill in &snapshot.waybills {
            if !seen.insert(waybill.namespace()) {
                tracing::warn!(
                    "Namespace {} has more than one Waybill in the snapshot",
                    waybill.namespace()
                );
            }
        }
        self.expansion.retain(|ns, _| seen.contains(ns.as_str()));

        tracing::debug!(
            "Snapshot for {} ready with {} Waybill(s)",
            snapshot.scope,
            snapshot.len()
        );
        self.index = Some(FuzzyIndex::build(&snapshot.waybills, self.search_options));
        self.snapshot = Some(snapshot);
        self.phase = Phase::Ready;
        self.recompute_visible();
    }

    fn recompute_visible(&mut self) {
        self.visible = match (&self.snapshot, &self.index) {
            (Some(snapshot), Some(index)) => index
                .search(&self.query)
                .into_iter()
                .map(|hit| hit.index)
                .filter(|&i| {
                    snapshot
                        .waybills
                        .get(i)
                        .is_some_and(|waybill| self.outcome_filter.matches(waybill))
                })
                .collect(),
            _ => Vec::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Scope, WaybillStatus, WaybillStatusRun};
    use chrono::TimeZone;

    fn waybill(ns: &str, success: Option<bool>) -> Waybill {
        let mut wb = Waybill::default();
        wb.metadata.name = "main".to_string();
        wb.metadata.namespace = ns.to_string();
        if let Some(success) = success {
            wb.status = WaybillStatus {
                last_run: Some(WaybillStatusRun {
                    success,
                    ..Default::default()
                }),
            };
        }
        wb
    }

    fn snapshot(waybills: Vec<Waybill>) -> Snapshot {
        Snapshot {
            scope: Scope::All,
            waybills,
            diff_url_format: String::new(),
            fetched_at: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    fn namespaces(controller: &DashboardController) -> Vec<&str> {
        controller
            .visible()
            .into_iter()
            .map(|wb| wb.namespace())
            .collect()
    }

    #[test]
    fn test_refresh_enters_loading() {
        let mut controller = DashboardController::new(Route::All);
        assert_eq!(controller.phase(), &Phase::Idle);
        let ticket = controller.refresh();
        assert_eq!(ticket.generation, 1);
        assert_eq!(ticket.scope, Scope::All);
        assert!(controller.phase().is_loading());
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut controller = DashboardController::new(Route::All);
        let first = controller.refresh();
        let second = controller.refresh();

        assert!(!controller.complete(first.generation, Ok(snapshot(vec![waybill("a", None)]))));
        assert!(controller.phase().is_loading());

        assert!(controller.complete(second.generation, Ok(snapshot(vec![waybill("b", None)]))));
        assert_eq!(namespaces(&controller), vec!["b"]);
    }

    #[test]
    fn test_poll_receives_sent_result() {
        let mut controller = DashboardController::new(Route::All);
        let ticket = controller.refresh();
        assert!(!controller.poll());

        assert!(ticket.send(Ok(snapshot(vec![waybill("a", Some(true))]))));
        assert!(controller.poll());
        assert_eq!(controller.phase(), &Phase::Ready);
        assert!(!controller.poll());
    }

    #[test]
    fn test_superseded_ticket_has_no_receiver() {
        let mut controller = DashboardController::new(Route::All);
        let first = controller.refresh();
        let _second = controller.refresh();
        assert!(!first.send(Ok(snapshot(vec![]))));
    }

    #[test]
    fn test_dropped_ticket_fails_fetch() {
        let mut controller = DashboardController::new(Route::All);
        drop(controller.refresh());
        assert!(controller.poll());
        assert!(matches!(controller.phase(), Phase::Failed(FetchError::Network { .. })));
    }

    #[test]
    fn test_failure_clears_snapshot() {
        let mut controller = DashboardController::new(Route::All);
        let ticket = controller.refresh();
        controller.complete(ticket.generation, Ok(snapshot(vec![waybill("a", None)])));

        let ticket = controller.refresh();
        // previous rows stay while reloading
        assert_eq!(controller.visible().len(), 1);
        controller.complete(
            ticket.generation,
            Err(FetchError::Http {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        assert!(controller.visible().is_empty());
        assert!(controller.snapshot().is_none());
        assert_eq!(controller.phase().error().and_then(|e| e.status()), Some(500));
    }

    #[test]
    fn test_unmount_ignores_pending_result() {
        let mut controller = DashboardController::new(Route::All);
        let ticket = controller.refresh();
        controller.unmount();
        assert!(!ticket.send(Ok(snapshot(vec![waybill("a", None)]))));
        assert!(!controller.complete(1, Ok(snapshot(vec![waybill("a", None)]))));
        assert_eq!(controller.phase(), &Phase::Idle);
    }

    #[test]
    fn test_toggle_is_per_namespace() {
        let mut controller = DashboardController::new(Route::All);
        let ticket = controller.refresh();
        controller.complete(
            ticket.generation,
            Ok(snapshot(vec![waybill("a", None), waybill("b", None)])),
        );

        assert!(!controller.is_expanded("a"));
        assert!(controller.toggle("a"));
        assert!(controller.is_expanded("a"));
        assert!(!controller.is_expanded("b"));
        assert!(!controller.toggle("a"));
    }

    #[test]
    fn test_expansion_survives_refresh_but_not_navigation() {
        let mut controller = DashboardController::new(Route::All);
        let ticket = controller.refresh();
        controller.complete(ticket.generation, Ok(snapshot(vec![waybill("a", None)])));
        controller.toggle("a");
        controller.set_query("a");

        let ticket = controller.refresh();
        controller.complete(ticket.generation, Ok(snapshot(vec![waybill("a", None)])));
        assert!(controller.is_expanded("a"));
        assert_eq!(controller.query(), "a");

        let ticket = controller.navigate(Route::Namespace("a".to_string()));
        assert!(ticket.is_some());
        assert_eq!(controller.query(), "");
        // single view defaults to expanded
        assert!(controller.is_expanded("a"));
        assert!(controller.navigate(Route::Namespace("a".to_string())).is_none());
    }

    #[test]
    fn test_outcome_filter_and_summary() {
        let mut controller = DashboardController::new(Route::All);
        let ticket = controller.refresh();
        controller.complete(
            ticket.generation,
            Ok(snapshot(vec![
                waybill("a", Some(true)),
                waybill("b", Some(false)),
                waybill("c", None),
            ])),
        );

        controller.set_outcome_filter(OutcomeFilter::Only(crate::view::Outcome::Failure));
        assert_eq!(namespaces(&controller), vec!["b"]);

        let summary = controller.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.success, 1);
        assert_eq!(summary.failure, 1);
        assert_eq!(summary.pending, 1);
    }

    #[tokio::test]
    async fn test_tracked_task_aborted_on_refresh() {
        let mut controller = DashboardController::new(Route::All);
        let ticket = controller.refresh();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            drop(ticket);
        });
        controller.track_task(1, handle.abort_handle());

        let _next = controller.refresh();
        let err = handle.await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
