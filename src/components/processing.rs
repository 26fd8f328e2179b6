//! Processing screen
//!
//! Static placeholder shown while a contract would be extracted.

use crate::action::Action;
use crate::component::Component;
use crate::model::ui::Page;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

/// Progress shown on the gauge
pub const PROCESSING_PERCENT: u16 = 33;

#[derive(Default)]
pub struct ProcessingComponent;

impl Component for ProcessingComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('d') | KeyCode::Esc => Some(Action::ShowPage(Page::Dashboard)),
            KeyCode::Char('c') | KeyCode::Enter => Some(Action::ShowPage(Page::Contracts)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            "Processing Your Contract",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let gauge_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(60),
                Constraint::Percentage(20),
            ])
            .split(chunks[1])[1];
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .percent(PROCESSING_PERCENT);
        frame.render_widget(gauge, gauge_area);

        let note = Paragraph::new(Line::from(Span::styled(
            "This may take a few moments. You will be notified once the extraction is complete.",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(note, chunks[3]);

        let links = Paragraph::new(Line::from(vec![
            Span::styled(" d ", Style::default().fg(Color::Black).bg(Color::DarkGray)),
            Span::raw(" Return to Dashboard      "),
            Span::styled(
                " c ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" View Contracts"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(links, chunks[4]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_links_navigate() {
        let mut processing = ProcessingComponent;
        let press = |p: &mut ProcessingComponent, c| {
            p.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
                .unwrap()
        };
        assert_eq!(
            press(&mut processing, 'd'),
            Some(Action::ShowPage(Page::Dashboard))
        );
        assert_eq!(
            press(&mut processing, 'c'),
            Some(Action::ShowPage(Page::Contracts))
        );
    }

    #[test]
    fn test_renders_fixed_progress() {
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                ProcessingComponent.draw(frame, area).unwrap();
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("Processing Your Contract"));
        assert!(screen.contains("33%"));
    }
}
