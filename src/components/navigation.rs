//! Navigation bar, status line and key hint bar shared by all pages

use crate::model::ui::{InputMode, Page};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub const APP_TITLE: &str = "Contract Analysis";

pub fn render_nav_bar(frame: &mut Frame, area: Rect, page: Page) {
    let titles: Vec<Line> = Page::tabs()
        .iter()
        .enumerate()
        .map(|(i, p)| Line::from(format!("{} {}", i + 1, p.name())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", APP_TITLE))
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(page.tab_index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Status line: errors take precedence over status messages
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    error: Option<&str>,
    status_message: Option<&str>,
) {
    let line = if let Some(error) = error {
        Line::from(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(status) = status_message {
        Line::from(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn hint(spans: &mut Vec<Span<'static>>, key: &'static str, label: &'static str, color: Color) {
    spans.push(Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(format!("{} ", label)));
}

/// Key hints for the current page and input mode
pub fn help_spans(page: Page, mode: InputMode) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    match mode {
        InputMode::Search => {
            hint(&mut spans, "Esc/Enter", "Done", Color::Yellow);
            hint(&mut spans, "Backspace", "Delete", Color::Cyan);
            return spans;
        }
        InputMode::UploadForm => {
            hint(&mut spans, "Tab", "Next field", Color::Cyan);
            hint(&mut spans, "←/→", "Type", Color::Cyan);
            hint(&mut spans, "Enter", "Upload", Color::Green);
            hint(&mut spans, "Esc", "Stop editing", Color::Yellow);
            return spans;
        }
        InputMode::FeedbackComment => {
            hint(&mut spans, "Enter", "Submit feedback", Color::Green);
            hint(&mut spans, "Esc", "Cancel", Color::Yellow);
            return spans;
        }
        InputMode::Normal => {}
    }

    hint(&mut spans, "q", "Quit", Color::Yellow);
    hint(&mut spans, "1-4/Tab", "Pages", Color::Cyan);

    match page {
        Page::Dashboard => {
            hint(&mut spans, "u", "Upload", Color::Green);
            hint(&mut spans, "c", "Contracts", Color::Green);
            hint(&mut spans, "Enter", "Open recent", Color::Cyan);
        }
        Page::Contracts => {
            hint(&mut spans, "/", "Search", Color::Cyan);
            hint(&mut spans, "f", "Filters", Color::Magenta);
            hint(&mut spans, "C", "Columns", Color::Magenta);
            hint(&mut spans, "h/l s", "Sort", Color::Cyan);
            hint(&mut spans, "Space", "Expand", Color::Cyan);
            hint(&mut spans, "Enter", "Open", Color::Green);
            hint(&mut spans, "x", "Export", Color::Green);
        }
        Page::Upload => {
            hint(&mut spans, "e", "Edit form", Color::Cyan);
            hint(&mut spans, "Enter", "Upload", Color::Green);
            hint(&mut spans, "Esc", "Cancel", Color::Yellow);
        }
        Page::Processing => {
            hint(&mut spans, "d", "Dashboard", Color::Cyan);
            hint(&mut spans, "c", "Contracts", Color::Cyan);
        }
        Page::ContractDetail(_) => {
            hint(&mut spans, "Enter", "Expand term", Color::Cyan);
            hint(&mut spans, "y/n", "Accurate/Inaccurate", Color::Green);
            hint(&mut spans, "Esc", "Back", Color::Yellow);
        }
    }

    hint(&mut spans, "?", "Help", Color::White);
    spans
}

pub fn render_help_bar(frame: &mut Frame, area: Rect, page: Page, mode: InputMode) {
    let paragraph = Paragraph::new(Line::from(help_spans(page, mode)))
        .alignment(ratatui::layout::Alignment::Left);
    frame.render_widget(paragraph, area);
}
