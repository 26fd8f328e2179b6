//! Help dialog component
//!
//! Displays all keyboard shortcuts available in the application.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        // Render scrollbar if content exceeds visible area
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

/// Build the help content with all keyboard shortcuts
pub fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            Style::default().fg(Color::DarkGray),
        )));
    };

    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:12}", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    add_section(&mut lines, "Pages");
    add_shortcut(&mut lines, "1 - 4", "Dashboard / Contracts / Upload / Processing");
    add_shortcut(&mut lines, "Tab", "Next page");
    add_shortcut(&mut lines, "Shift+Tab", "Previous page");
    add_shortcut(&mut lines, "?", "Show this help");
    add_shortcut(&mut lines, "q", "Quit");

    add_section(&mut lines, "Dashboard");
    add_shortcut(&mut lines, "j / k", "Move through recent activity");
    add_shortcut(&mut lines, "Enter", "Open the selected contract");
    add_shortcut(&mut lines, "u", "Upload new contract");
    add_shortcut(&mut lines, "c", "View contracts");
    add_shortcut(&mut lines, "p", "Processing status");

    add_section(&mut lines, "Contract List");
    add_shortcut(&mut lines, "j / k", "Move to next / previous row");
    add_shortcut(&mut lines, "g / G", "Jump to first / last row");
    add_shortcut(&mut lines, "h / l", "Move the column cursor");
    add_shortcut(&mut lines, "s", "Sort by column: asc, desc, off");
    add_shortcut(&mut lines, "o", "Clear sort");
    add_shortcut(&mut lines, "Space", "Expand or collapse row details");
    add_shortcut(&mut lines, "z", "Collapse all expanded rows");
    add_shortcut(&mut lines, "Enter", "Open contract details");
    add_shortcut(&mut lines, "/", "Search by contract name");
    add_shortcut(&mut lines, "t / S / D", "Cycle type / status / upload date filter");
    add_shortcut(&mut lines, "r", "Clear all filters");
    add_shortcut(&mut lines, "f", "Advanced filters");
    add_shortcut(&mut lines, "C", "Customize columns");
    add_shortcut(&mut lines, "x", "Export visible rows to contracts.csv");

    add_section(&mut lines, "Advanced Filters");
    add_shortcut(&mut lines, "a", "Build a condition field by field");
    add_shortcut(&mut lines, "/", "Type a condition: status = Active");
    add_shortcut(&mut lines, "d", "Remove selected condition");
    add_shortcut(&mut lines, "l", "Toggle AND/OR on selected condition");
    add_shortcut(&mut lines, "g", "Toggle group logic");
    add_shortcut(&mut lines, "c", "Clear all conditions");

    add_section(&mut lines, "Contract Detail");
    add_shortcut(&mut lines, "j / k", "Select term");
    add_shortcut(&mut lines, "Enter", "Expand or collapse term");
    add_shortcut(&mut lines, "y / n", "Mark term accurate / inaccurate");
    add_shortcut(&mut lines, "s", "Submit feedback");
    add_shortcut(&mut lines, "Esc", "Back to contracts");

    add_section(&mut lines, "Upload");
    add_shortcut(&mut lines, "e", "Edit the form");
    add_shortcut(&mut lines, "Tab", "Next field");
    add_shortcut(&mut lines, "← / →", "Choose contract type");
    add_shortcut(&mut lines, "Enter", "Upload");
    add_shortcut(&mut lines, "Esc", "Stop editing / Cancel");

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}
