//! Waybill list rendering
//!
//! One collapsible panel per visible Waybill. A collapsed panel is a single
//! line; an expanded one adds the last-run detail block with the apply
//! output shown verbatim, colored per line.

use super::header::outcome_label;
use super::helpers::{
    create_themed_block, render_empty_state, render_error_state, render_loading_state,
    update_scroll_offset,
};
use crate::dashboard::{DashboardController, Phase};
use crate::tui::theme::Theme;
use crate::view::{RunDetail, WaybillViewModel};
use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

const INDENT: &str = "    ";

/// Render the list area for the controller's current phase
pub fn render_waybill_list(
    f: &mut Frame,
    area: Rect,
    controller: &DashboardController,
    selected_index: usize,
    scroll_offset: &mut usize,
    now: DateTime<Utc>,
    theme: &Theme,
    no_icons: bool,
) {
    match controller.phase() {
        Phase::Failed(err) => {
            render_error_state(f, area, err, theme);
            return;
        }
        Phase::Idle => {
            render_empty_state(
                f,
                area,
                " Waybills ",
                "Nothing loaded yet",
                "Press r to load Waybill status",
                theme,
            );
            return;
        }
        Phase::Loading if controller.snapshot().is_none() => {
            let message = format!("Loading Waybills for {}...", controller.route());
            render_loading_state(f, area, " Waybills ", &message, theme);
            return;
        }
        Phase::Loading | Phase::Ready => {}
    }

    let rows = controller.rows(now);
    if rows.is_empty() {
        let nothing_fetched = controller.snapshot().is_none_or(|s| s.is_empty());
        if nothing_fetched {
            render_empty_state(
                f,
                area,
                " Waybills ",
                "No Waybills found",
                "kube-applier reports no Waybills for this view",
                theme,
            );
        } else {
            render_empty_state(
                f,
                area,
                " Waybills ",
                "No Waybills match the current search or outcome filter",
                "Press Esc to clear",
                theme,
            );
        }
        return;
    }

    let mut lines = Vec::new();
    let mut selected_span = (0, 0);
    for (i, row) in rows.iter().enumerate() {
        let start = lines.len();
        lines.extend(waybill_lines(row, i == selected_index, theme, no_icons));
        if i == selected_index {
            selected_span = (start, lines.len());
        }
    }

    let inner_height = area.height.saturating_sub(2) as usize;
    update_scroll_offset(
        selected_span.0,
        selected_span.1,
        inner_height,
        scroll_offset,
        1,
    );

    let title = format!(" Waybills ({}) ", rows.len());
    let paragraph = Paragraph::new(lines)
        .block(create_themed_block(&title, theme))
        .scroll((scroll_row(*scroll_offset), 0));
    f.render_widget(paragraph, area);
}

/// Paragraph scroll row; ratatui addresses at most `u16::MAX` lines
fn scroll_row(offset: usize) -> u16 {
    u16::try_from(offset).unwrap_or(u16::MAX)
}

/// Lines for one Waybill panel
pub fn waybill_lines(
    row: &WaybillViewModel,
    selected: bool,
    theme: &Theme,
    no_icons: bool,
) -> Vec<Line<'static>> {
    let mut lines = vec![summary_line(row, selected, theme, no_icons)];
    if !row.expanded {
        return lines;
    }

    match &row.detail {
        None => lines.push(Line::from(Span::styled(
            format!("{}This Waybill has not been run yet.", INDENT),
            Style::default().fg(theme.text_secondary),
        ))),
        Some(detail) => lines.extend(detail_lines(detail, theme)),
    }
    lines.push(Line::from(""));
    lines
}

fn summary_line(
    row: &WaybillViewModel,
    selected: bool,
    theme: &Theme,
    no_icons: bool,
) -> Line<'static> {
    let caret = match (row.expanded, no_icons) {
        (true, false) => "▾",
        (false, false) => "▸",
        (true, true) => "-",
        (false, true) => "+",
    };
    let status = if no_icons {
        format!("[{}]", outcome_label(row.outcome, true))
    } else {
        "●".to_string()
    };

    let mut spans = vec![
        Span::raw(format!("{} ", caret)),
        Span::styled(status, theme.status_style(row.status_color)),
        Span::raw(" "),
        Span::styled(
            format!("{}/{}", row.namespace, row.name),
            theme.status_style(row.status_color),
        ),
    ];

    for badge in &row.badges {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", badge.label()), theme.badge_style()));
    }

    let last_run = match &row.detail {
        None => "never run".to_string(),
        Some(detail) => detail
            .finished
            .as_ref()
            .or(detail.started.as_ref())
            .map(|ts| ts.relative.clone())
            .unwrap_or_default(),
    };
    if !last_run.is_empty() {
        spans.push(Span::styled(
            format!("  {}", last_run),
            Style::default().fg(theme.text_secondary),
        ));
    }

    let line = Line::from(spans);
    if selected {
        line.style(theme.table_selected_style())
    } else {
        line
    }
}

fn field(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}{:<10}", INDENT, label), theme.label_style()),
        Span::raw(value),
    ])
}

fn detail_lines(detail: &RunDetail, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![field("Type:", detail.run_type.clone(), theme)];

    let mut commit = field("Commit:", detail.commit.clone(), theme);
    if let Some(link) = &detail.commit_link {
        commit.spans.push(Span::raw("  "));
        commit.spans.push(Span::styled(link.clone(), theme.link_style()));
    }
    lines.push(commit);

    if let Some(started) = &detail.started {
        lines.push(field(
            "Started:",
            format!("{} ({})", started.absolute, started.relative),
            theme,
        ));
    }
    if let Some(finished) = &detail.finished {
        lines.push(field(
            "Finished:",
            format!("{} ({})", finished.absolute, finished.relative),
            theme,
        ));
    }
    if let Some(duration) = &detail.duration {
        lines.push(field("Duration:", duration.clone(), theme));
    }
    lines.push(field("Command:", detail.command.clone(), theme));

    if let Some(error) = &detail.error_message {
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<10}", INDENT, "Error:"), theme.label_style()),
            Span::styled(error.clone(), theme.message_style(true)),
        ]));
    }

    lines.push(Line::from(Span::styled(
        format!("{}Output:", INDENT),
        theme.label_style(),
    )));
    for (kind, text) in detail.output_lines() {
        lines.push(Line::from(vec![
            Span::raw(format!("{}  ", INDENT)),
            Span::styled(text.to_string(), theme.output_line_style(kind)),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Badge, Outcome, StatusColor};

    fn row(expanded: bool) -> WaybillViewModel {
        WaybillViewModel {
            namespace: "payments".to_string(),
            name: "main".to_string(),
            status_color: StatusColor::Neutral,
            outcome: Outcome::Pending,
            badges: vec![Badge::DryRun],
            expanded,
            detail: None,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_collapsed_row_is_one_line() {
        let lines = waybill_lines(&row(false), false, &Theme::default(), true);
        assert_eq!(lines.len(), 1);
        assert_eq!(text(&lines[0]), "+ [pending] payments/main  DRY RUN   never run");
    }

    #[test]
    fn test_scroll_row_saturates() {
        assert_eq!(scroll_row(0), 0);
        assert_eq!(scroll_row(1234), 1234);
        assert_eq!(scroll_row(65_535), u16::MAX);
        assert_eq!(scroll_row(65_536), u16::MAX);
        assert_eq!(scroll_row(200_000), u16::MAX);
    }

    #[test]
    fn test_expanded_never_run_row() {
        let lines = waybill_lines(&row(true), false, &Theme::default(), true);
        assert_eq!(lines.len(), 3);
        assert!(text(&lines[1]).contains("has not been run yet"));
    }
}
