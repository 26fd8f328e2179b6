//! Contract table rendering
//!
//! Builds the header and row lines for whatever column set the view holds.

use crate::model::columns::ColumnDefinition;
use crate::model::contract::{Contract, ContractStatus};
use crate::model::sort::SortConfig;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow before cells are truncated
pub const MAX_COLUMN_WIDTH: usize = 50;

const SEPARATOR: &str = " │ ";

/// Room kept in every header for a sort arrow
const ARROW_WIDTH: usize = 2;

/// Truncate to a display width, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if width >= 3 {
        out.push_str("...");
    }
    out
}

/// Truncate and pad to exactly `width` display columns
pub fn fit(text: &str, width: usize) -> String {
    let truncated = truncate(text, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

pub fn status_color(status: ContractStatus) -> Color {
    match status {
        ContractStatus::Active => Color::Green,
        ContractStatus::Pending => Color::Yellow,
        ContractStatus::Draft => Color::Gray,
        ContractStatus::Processing => Color::Cyan,
        ContractStatus::Uploaded => Color::Blue,
    }
}

/// Column widths fitting the header and every cell, capped at `MAX_COLUMN_WIDTH`
pub fn column_widths(columns: &[&ColumnDefinition], rows: &[&Contract]) -> Vec<usize> {
    columns
        .iter()
        .map(|column| {
            let header = column.label.width() + ARROW_WIDTH;
            let cells = rows
                .iter()
                .map(|c| c.cell_text(&column.id).width())
                .max()
                .unwrap_or(0);
            header.max(cells).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Header line; the cursor column is underlined and the sorted one has an arrow
pub fn header_line(
    columns: &[&ColumnDefinition],
    widths: &[usize],
    sort: Option<&SortConfig>,
    cursor: usize,
) -> Line<'static> {
    let mut spans = vec![Span::raw("   ")];

    for (i, column) in columns.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(10);
        let arrow = match sort {
            Some(s) if s.key == column.id => format!(" {}", s.direction.arrow()),
            _ => String::new(),
        };
        let label = truncate(&column.label, width.saturating_sub(arrow.width()));
        let text = fit(&format!("{}{}", label, arrow), width);

        let mut style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        if i == cursor {
            style = style.add_modifier(Modifier::UNDERLINED).fg(Color::Yellow);
        }
        spans.push(Span::styled(text, style));
        spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
    }

    Line::from(spans)
}

/// Separator under the header
pub fn rule_line(widths: &[usize]) -> Line<'static> {
    let rule: String = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    Line::from(Span::styled(
        format!("   {}", rule),
        Style::default().fg(Color::DarkGray),
    ))
}

/// One table row with the expand gutter in front and the open gutter at the end
pub fn row_line(
    contract: &Contract,
    columns: &[&ColumnDefinition],
    widths: &[usize],
    expanded: bool,
) -> Line<'static> {
    let gutter = if expanded { "▾ " } else { "▸ " };
    let mut spans = vec![Span::styled(gutter, Style::default().fg(Color::DarkGray))];

    for (i, column) in columns.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(10);
        let text = fit(&contract.cell_text(&column.id), width);
        let style = match column.id.as_str() {
            "status" => Style::default().fg(status_color(contract.status)),
            "name" => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(Color::White),
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
    }

    spans.push(Span::styled("↗", Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

/// Indented label/value lines for an expanded row
pub fn detail_lines(details: &[(String, String)]) -> Vec<Line<'static>> {
    if details.is_empty() {
        return vec![Line::from(Span::styled(
            "     No additional details",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let label_width = details
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0)
        .min(24);

    details
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("     {}  ", fit(label, label_width)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(value.clone(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::columns::ColumnSet;
    use crate::model::sample_data::sample_contracts;
    use crate::model::sort::SortConfig;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Service Agreement", 10), "Service...");
        assert_eq!(truncate("契約書の管理", 7), "契約...");
        assert_eq!(fit("ab", 4), "ab  ");
    }

    #[test]
    fn test_widths_fit_content_and_cap() {
        let contracts = sample_contracts();
        let rows: Vec<&Contract> = contracts.iter().collect();
        let columns = ColumnSet::default();
        let visible = columns.visible();
        let widths = column_widths(&visible, &rows);

        assert_eq!(widths.len(), visible.len());
        // "Consulting Agreement - Brightline Partners" is the longest name
        assert_eq!(widths[0], 42);
        assert!(widths.iter().all(|w| *w <= MAX_COLUMN_WIDTH));
    }

    #[test]
    fn test_header_shows_sort_arrow() {
        let columns = ColumnSet::default();
        let visible = columns.visible();
        let widths = vec![20; visible.len()];
        let sort = SortConfig::desc("type");
        let text = line_text(&header_line(&visible, &widths, Some(&sort), 0));
        assert!(text.contains("Type ▼"));
        assert!(!text.contains("Contract Name ▲"));
    }

    #[test]
    fn test_row_line_marks_expansion_and_missing_values() {
        let contracts = sample_contracts();
        let columns = ColumnSet::default();
        let visible = columns.visible();
        let widths = vec![45; visible.len()];

        let collapsed = line_text(&row_line(&contracts[1], &visible, &widths, false));
        assert!(collapsed.starts_with("▸ NDA - Project Phoenix"));
        assert!(collapsed.contains("Feb 19, 2024"));
        assert!(collapsed.contains(" - "));

        let expanded = line_text(&row_line(&contracts[1], &visible, &widths, true));
        assert!(expanded.starts_with("▾ "));
    }
}
