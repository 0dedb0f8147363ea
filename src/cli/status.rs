//! Headless `status` command
//!
//! Drives the same [`DashboardController`] as the TUI for a single fetch and
//! prints the result as text or JSON.

use crate::dashboard::{DashboardController, OutcomeFilter, Phase, Route, Summary, spawn_fetch};
use crate::search::SearchOptions;
use crate::source::StatusSource;
use crate::view::{Outcome, OutputLineKind, WaybillViewModel};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use std::sync::Arc;

/// Output format for `ka9s status`
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options for one status run
#[derive(Debug, Clone)]
pub struct StatusOptions {
    pub route: Route,
    pub query: Option<String>,
    pub outcome: Option<Outcome>,
    /// Show run details for every Waybill, not only in namespace view
    pub expand: bool,
    pub search: SearchOptions,
}

/// Fetch once and return the settled controller
pub async fn fetch_status(
    source: Arc<dyn StatusSource>,
    options: &StatusOptions,
) -> DashboardController {
    let mut controller =
        DashboardController::with_search_options(options.route.clone(), options.search);

    let ticket = controller.refresh();
    let generation = ticket.generation;
    let handle = spawn_fetch(source, ticket);
    controller.track_task(generation, handle.abort_handle());

    if let Err(e) = handle.await {
        tracing::warn!("Fetch task did not finish: {}", e);
    }
    controller.poll();

    if let Some(query) = &options.query {
        controller.set_query(query.as_str());
    }
    if let Some(outcome) = options.outcome {
        controller.set_outcome_filter(OutcomeFilter::Only(outcome));
    }
    if options.expand {
        controller.set_all_expanded(true);
    }
    controller
}

/// Run the status command, returning whether the fetch succeeded
pub async fn run_status(
    source: Arc<dyn StatusSource>,
    options: StatusOptions,
    format: OutputFormat,
) -> Result<bool> {
    let controller = fetch_status(source, &options).await;

    if let Phase::Failed(err) = controller.phase() {
        eprintln!("Error: {}", err);
        return Ok(false);
    }

    let now = Utc::now();
    let rendered = match format {
        OutputFormat::Text => render_text(&controller, now),
        OutputFormat::Json => render_json(&controller, now)?,
    };
    print!("{}", rendered);
    Ok(true)
}

#[derive(Serialize)]
struct StatusReport<'a> {
    scope: String,
    query: &'a str,
    filter: &'static str,
    summary: Summary,
    waybills: Vec<WaybillViewModel>,
}

/// JSON document with summary and visible Waybills
pub fn render_json(controller: &DashboardController, now: DateTime<Utc>) -> Result<String> {
    let report = StatusReport {
        scope: controller.route().scope().to_string(),
        query: controller.query(),
        filter: controller.outcome_filter().label(),
        summary: controller.summary(),
        waybills: controller.rows(now),
    };
    let mut json =
        serde_json::to_string_pretty(&report).context("Failed to serialize status report")?;
    json.push('\n');
    Ok(json)
}

/// Plain text listing, one line per Waybill plus details when expanded
pub fn render_text(controller: &DashboardController, now: DateTime<Utc>) -> String {
    let summary = controller.summary();
    let rows = controller.rows(now);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}: {} Waybill(s), {} success, {} warning, {} failure, {} pending",
        controller.route(),
        summary.total,
        summary.success,
        summary.warning,
        summary.failure,
        summary.pending
    );

    if rows.is_empty() {
        let _ = writeln!(out, "No Waybills match.");
        return out;
    }

    for row in &rows {
        write_row(&mut out, row);
    }
    out
}

fn write_row(out: &mut String, row: &WaybillViewModel) {
    let badges: Vec<String> = row.badges.iter().map(|b| b.label()).collect();
    let last_run = match &row.detail {
        None => "never run",
        Some(detail) => detail
            .finished
            .as_ref()
            .or(detail.started.as_ref())
            .map(|ts| ts.relative.as_str())
            .unwrap_or("-"),
    };

    let _ = write!(out, "[{}] {}/{}", row.outcome.as_str(), row.namespace, row.name);
    if !badges.is_empty() {
        let _ = write!(out, "  {}", badges.join(", "));
    }
    let _ = writeln!(out, "  {}", last_run);

    if !row.expanded {
        return;
    }
    let Some(detail) = &row.detail else {
        let _ = writeln!(out, "    This Waybill has not been run yet.");
        return;
    };

    let _ = writeln!(out, "    type:     {}", detail.run_type);
    match &detail.commit_link {
        Some(link) => {
            let _ = writeln!(out, "    commit:   {} ({})", detail.commit, link);
        }
        None => {
            let _ = writeln!(out, "    commit:   {}", detail.commit);
        }
    }
    if let Some(started) = &detail.started {
        let _ = writeln!(out, "    started:  {} ({})", started.absolute, started.relative);
    }
    if let Some(finished) = &detail.finished {
        let _ = writeln!(
            out,
            "    finished: {} ({})",
            finished.absolute, finished.relative
        );
    }
    if let Some(duration) = &detail.duration {
        let _ = writeln!(out, "    duration: {}", duration);
    }
    let _ = writeln!(out, "    command:  {}", detail.command);
    if let Some(error) = &detail.error_message {
        let _ = writeln!(out, "    error:    {}", error);
    }
    let _ = writeln!(out, "    output:");
    for (kind, line) in detail.output_lines() {
        let marker = match kind {
            OutputLineKind::Warning => "!",
            OutputLineKind::Error => "x",
            _ => " ",
        };
        let _ = writeln!(out, "    {} {}", marker, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Waybill, WaybillStatus, WaybillStatusRun};
    use crate::source::MemoryStatusSource;
    use chrono::TimeZone;

    fn waybill(ns: &str, run: Option<WaybillStatusRun>) -> Waybill {
        let mut wb = Waybill::default();
        wb.metadata.name = "main".to_string();
        wb.metadata.namespace = ns.to_string();
        wb.status = WaybillStatus { last_run: run };
        wb
    }

    fn options(route: Route) -> StatusOptions {
        StatusOptions {
            route,
            query: None,
            outcome: None,
            expand: false,
            search: SearchOptions::default(),
        }
    }

    #[tokio::test]
    async fn test_render_text_list() {
        let source = MemoryStatusSource::new(
            vec![
                waybill(
                    "billing",
                    Some(WaybillStatusRun {
                        success: false,
                        ..Default::default()
                    }),
                ),
                waybill("payments", None),
            ],
            "",
        );
        let controller = fetch_status(Arc::new(source), &options(Route::All)).await;
        let now = Utc.timestamp_opt(0, 0).unwrap();

        insta::assert_snapshot!(render_text(&controller, now), @r"
        all namespaces: 2 Waybill(s), 0 success, 0 warning, 1 failure, 1 pending
        [failure] billing/main  -
        [pending] payments/main  never run
        ");
    }

    #[tokio::test]
    async fn test_render_text_single_expanded() {
        let started = Utc.timestamp_opt(100, 0).unwrap();
        let finished = Utc.timestamp_opt(103, 0).unwrap();
        let run = WaybillStatusRun {
            run_type: "Scheduled run".to_string(),
            command: "kubectl apply".to_string(),
            commit: "abc123".to_string(),
            started: Some(started),
            finished: Some(finished),
            output: "Warning: deprecated\ndeployment.apps/api configured".to_string(),
            success: true,
            ..Default::default()
        };
        let source =
            MemoryStatusSource::new(vec![waybill("payments", Some(run))], "https://git/c/%s");
        let controller = fetch_status(
            Arc::new(source),
            &options(Route::Namespace("payments".to_string())),
        )
        .await;
        let now = Utc.timestamp_opt(163, 0).unwrap();

        insta::assert_snapshot!(render_text(&controller, now), @r"
        payments: 1 Waybill(s), 0 success, 1 warning, 0 failure, 0 pending
        [warning] payments/main  1 minute ago
            type:     Scheduled run
            commit:   abc123 (https://git/c/abc123)
            started:  1970-01-01 00:01:40 +0000 UTC (1 minute ago)
            finished: 1970-01-01 00:01:43 +0000 UTC (1 minute ago)
            duration: 3 sec
            command:  kubectl apply
            output:
            ! Warning: deprecated
              deployment.apps/api configured
        ");
    }

    #[tokio::test]
    async fn test_query_and_filter_applied() {
        let source = MemoryStatusSource::new(
            vec![waybill("payments", None), waybill("billing", None)],
            "",
        );
        let mut opts = options(Route::All);
        opts.query = Some("paym".to_string());
        let controller = fetch_status(Arc::new(source), &opts).await;
        assert_eq!(controller.visible().len(), 1);

        let json = render_json(&controller, Utc::now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["query"], "paym");
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["waybills"][0]["namespace"], "payments");
    }
}
