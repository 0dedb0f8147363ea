//! Header view rendering

use crate::dashboard::{DashboardController, OutcomeFilter, Phase, Route};
use crate::tui::theme::Theme;
use crate::view::{Outcome, format_relative};
use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Height of the header including borders
pub const HEADER_HEIGHT: u16 = 5;

/// Render the header: source, route, outcome counts, search and filter
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    controller: &DashboardController,
    source_label: &str,
    now: DateTime<Utc>,
    theme: &Theme,
    no_icons: bool,
) {
    let route = controller.route();
    let is_all = matches!(route, Route::All);

    let state = match controller.phase() {
        Phase::Idle => "idle".to_string(),
        Phase::Loading => "refreshing...".to_string(),
        Phase::Ready => controller
            .snapshot()
            .map(|s| format!("updated {}", format_relative(s.fetched_at, now)))
            .unwrap_or_default(),
        Phase::Failed(_) => "failed".to_string(),
    };

    let source_line = Line::from(vec![
        Span::styled("Source: ", theme.label_style()),
        Span::raw(source_label.to_string()),
        Span::raw("  "),
        Span::styled(format!("[{}]", state), theme.label_style()),
    ]);

    let route_line = Line::from(vec![
        Span::styled("View:   ", theme.label_style()),
        Span::styled(route.to_string(), theme.header_route_style(is_all)),
    ]);

    let summary = controller.summary();
    let mut counts = vec![
        Span::styled("Total:  ", theme.label_style()),
        Span::raw(summary.total.to_string()),
    ];
    for (outcome, count) in [
        (Outcome::Success, summary.success),
        (Outcome::Warning, summary.warning),
        (Outcome::Failure, summary.failure),
        (Outcome::Pending, summary.pending),
    ] {
        counts.push(Span::raw("  "));
        counts.push(Span::styled(
            format!("{}:{}", outcome_label(outcome, no_icons), count),
            theme.outcome_style(outcome),
        ));
    }

    let mut filters = Vec::new();
    if !controller.query().is_empty() {
        filters.push(format!("search='{}'", controller.query()));
    }
    let outcome_filter = controller.outcome_filter();
    if outcome_filter != OutcomeFilter::All {
        filters.push(format!("outcome={}", outcome_filter.label()));
    }
    if !filters.is_empty() {
        counts.push(Span::raw("  "));
        counts.push(Span::styled(
            format!(
                "[{}] ({}/{} shown)",
                filters.join(" "),
                controller.visible().len(),
                summary.total
            ),
            Style::default().fg(theme.header_filter),
        ));
    }

    let header = Paragraph::new(vec![source_line, route_line, Line::from(counts)])
        .block(Block::default().borders(Borders::ALL).title(" ka9s "));
    f.render_widget(header, area);
}

/// Outcome marker for counts and rows
pub fn outcome_label(outcome: Outcome, no_icons: bool) -> &'static str {
    match (outcome, no_icons) {
        (Outcome::Success, false) => "✓",
        (Outcome::Warning, false) => "⚠",
        (Outcome::Failure, false) => "✗",
        (Outcome::Pending, false) => "○",
        (outcome, true) => outcome.as_str(),
    }
}
