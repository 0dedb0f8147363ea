//! Waybill view model
//!
//! A pure projection from one Waybill (plus its expansion flag) to everything
//! a renderer needs: status color, badges and the last-run detail block.
//! Nothing here performs I/O or reads the clock; `now` comes in through
//! [`ViewContext`].

mod format;
mod output;

pub use format::{commit_link, format_absolute, format_latency, format_relative};
pub use output::{OutputLineKind, classify_output_line, has_warnings};

use crate::models::{Waybill, WaybillStatusRun};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Three-state color of a Waybill row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusColor {
    Success,
    Failure,
    /// Never run
    Neutral,
}

impl StatusColor {
    pub fn of(waybill: &Waybill) -> Self {
        match waybill.last_run() {
            None => StatusColor::Neutral,
            Some(run) if run.success => StatusColor::Success,
            Some(_) => StatusColor::Failure,
        }
    }
}

/// Outcome bucket of the last run
///
/// Refines [`StatusColor`] by splitting successful runs whose output carries
/// kubectl warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Pending,
    Failure,
    Warning,
    Success,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [
        Outcome::Pending,
        Outcome::Failure,
        Outcome::Warning,
        Outcome::Success,
    ];

    pub fn of(waybill: &Waybill) -> Self {
        match waybill.last_run() {
            None => Outcome::Pending,
            Some(run) if !run.success => Outcome::Failure,
            Some(run) if has_warnings(&run.output) => Outcome::Warning,
            Some(_) => Outcome::Success,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pending => "pending",
            Outcome::Failure => "failure",
            Outcome::Warning => "warning",
            Outcome::Success => "success",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Outcome::ALL
            .into_iter()
            .find(|outcome| outcome.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Flag shown next to the namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Badge {
    DryRun,
    Prune,
    AutoApply,
    RunInterval(String),
}

impl Badge {
    pub fn label(&self) -> String {
        match self {
            Badge::DryRun => "DRY RUN".to_string(),
            Badge::Prune => "PRUNE".to_string(),
            Badge::AutoApply => "AUTO APPLY".to_string(),
            Badge::RunInterval(secs) => format!("INTERVAL {}s", secs),
        }
    }

    /// Badges for a Waybill, in display order
    pub fn for_waybill(waybill: &Waybill) -> Vec<Badge> {
        let spec = &waybill.spec;
        let mut badges = Vec::new();
        if spec.dry_run {
            badges.push(Badge::DryRun);
        }
        if spec.prune == Some(true) {
            badges.push(Badge::Prune);
        }
        if spec.auto_apply == Some(true) {
            badges.push(Badge::AutoApply);
        }
        // "0" is kept: any non-empty interval is shown
        if let Some(interval) = spec.run_interval.as_deref().filter(|s| !s.is_empty()) {
            badges.push(Badge::RunInterval(interval.to_string()));
        }
        badges
    }
}

/// A run timestamp in both display forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    pub absolute: String,
    pub relative: String,
}

impl Timestamp {
    fn new(ts: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            absolute: format_absolute(ts),
            relative: format_relative(ts, now),
        }
    }
}

/// Last-run detail block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunDetail {
    pub run_type: String,
    pub commit: String,
    pub commit_link: Option<String>,
    pub started: Option<Timestamp>,
    pub finished: Option<Timestamp>,
    pub duration: Option<String>,
    /// Verbatim
    pub command: String,
    /// Verbatim; never truncated or re-wrapped
    pub output: String,
    /// Only set for failed runs (may still be empty)
    pub error_message: Option<String>,
    pub has_warnings: bool,
}

impl RunDetail {
    fn new(run: &WaybillStatusRun, ctx: &ViewContext<'_>) -> Self {
        let duration = match (run.started, run.finished) {
            (Some(started), Some(finished)) => Some(format_latency(started, finished)),
            _ => None,
        };

        Self {
            run_type: run.run_type.clone(),
            commit: run.commit.clone(),
            commit_link: commit_link(ctx.diff_url_format, &run.commit),
            started: run.started.map(|ts| Timestamp::new(ts, ctx.now)),
            finished: run.finished.map(|ts| Timestamp::new(ts, ctx.now)),
            duration,
            command: run.command.clone(),
            output: run.output.clone(),
            error_message: if run.success {
                None
            } else {
                Some(run.error_message.clone().unwrap_or_default())
            },
            has_warnings: has_warnings(&run.output),
        }
    }

    /// Output lines paired with their kind, text untouched
    pub fn output_lines(&self) -> impl Iterator<Item = (OutputLineKind, &str)> {
        self.output
            .split('\n')
            .map(|line| (classify_output_line(line), line))
    }
}

/// Inputs to [`derive`] that do not belong to the Waybill itself
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    /// Snapshot-wide diff link template
    pub diff_url_format: &'a str,
    pub now: DateTime<Utc>,
}

/// Everything needed to render one Waybill row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaybillViewModel {
    pub namespace: String,
    pub name: String,
    pub status_color: StatusColor,
    pub outcome: Outcome,
    pub badges: Vec<Badge>,
    pub expanded: bool,
    /// `None` when the Waybill has never run
    pub detail: Option<RunDetail>,
}

/// Project `waybill` into a renderable view model
pub fn derive(waybill: &Waybill, expanded: bool, ctx: &ViewContext<'_>) -> WaybillViewModel {
    WaybillViewModel {
        namespace: waybill.metadata.namespace.clone(),
        name: waybill.metadata.name.clone(),
        status_color: StatusColor::of(waybill),
        outcome: Outcome::of(waybill),
        badges: Badge::for_waybill(waybill),
        expanded,
        detail: waybill.last_run().map(|run| RunDetail::new(run, ctx)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WaybillStatus;

    fn with_run(success: bool, output: &str) -> Waybill {
        Waybill {
            status: WaybillStatus {
                last_run: Some(WaybillStatusRun {
                    success,
                    output: output.to_string(),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_outcome_buckets() {
        assert_eq!(Outcome::of(&Waybill::default()), Outcome::Pending);
        assert_eq!(Outcome::of(&with_run(false, "")), Outcome::Failure);
        assert_eq!(
            Outcome::of(&with_run(true, "Warning: deprecated")),
            Outcome::Warning
        );
        assert_eq!(Outcome::of(&with_run(true, "ok")), Outcome::Success);
        // a warning does not hide a failure
        assert_eq!(
            Outcome::of(&with_run(false, "Warning: deprecated")),
            Outcome::Failure
        );
    }

    #[test]
    fn test_outcome_parse() {
        assert_eq!(Outcome::parse("Failure"), Some(Outcome::Failure));
        assert_eq!(Outcome::parse(" pending "), Some(Outcome::Pending));
        assert_eq!(Outcome::parse("broken"), None);
    }

    #[test]
    fn test_error_message_only_on_failure() {
        let ctx = ViewContext {
            diff_url_format: "",
            now: Utc::now(),
        };
        let mut failed = with_run(false, "");
        let view = derive(&failed, false, &ctx);
        assert_eq!(view.detail.unwrap().error_message.as_deref(), Some(""));

        if let Some(run) = failed.status.last_run.as_mut() {
            run.success = true;
            run.error_message = Some("stale".to_string());
        }
        let view = derive(&failed, false, &ctx);
        assert_eq!(view.detail.unwrap().error_message, None);
    }
}
