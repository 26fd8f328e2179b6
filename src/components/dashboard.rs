//! Dashboard screen
//!
//! Greeting, quick links, status counters, recent activity and the
//! notifications panel.

use crate::action::Action;
use crate::component::Component;
use crate::components::table::status_color;
use crate::model::contract::Contract;
use crate::model::domain::{DashboardStats, Notification};
use crate::model::ui::Page;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Number of contracts listed under Recent Activity
pub const RECENT_LIMIT: usize = 3;

/// Data the dashboard renders, borrowed from the App for one frame
pub struct DashboardContext<'a> {
    pub user_name: &'a str,
    /// Where the contracts were loaded from, e.g. "sample data"
    pub source: &'a str,
    pub stats: DashboardStats,
    pub recent: &'a [&'a Contract],
    pub notifications: &'a [Notification],
}

#[derive(Default)]
pub struct DashboardComponent {
    pub list_state: ListState,
    /// Ids shown under Recent Activity, newest first
    recent_ids: Vec<u32>,
}

impl DashboardComponent {
    pub fn set_recent(&mut self, ids: Vec<u32>) {
        self.recent_ids = ids;
        match self.list_state.selected() {
            _ if self.recent_ids.is_empty() => self.list_state.select(None),
            Some(i) if i < self.recent_ids.len() => {}
            _ => self.list_state.select(Some(0)),
        }
    }

    pub fn selected_contract_id(&self) -> Option<u32> {
        self.list_state
            .selected()
            .and_then(|i| self.recent_ids.get(i))
            .copied()
    }

    fn next(&mut self) {
        if self.recent_ids.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < self.recent_ids.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    fn previous(&mut self) {
        if self.recent_ids.is_empty() {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => self.recent_ids.len() - 1,
        };
        self.list_state.select(Some(prev));
    }
}

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.previous();
                None
            }
            KeyCode::Enter => self.selected_contract_id().map(Action::OpenContract),
            KeyCode::Char('u') => Some(Action::ShowPage(Page::Upload)),
            KeyCode::Char('c') => Some(Action::ShowPage(Page::Contracts)),
            KeyCode::Char('p') => Some(Action::ShowPage(Page::Processing)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the dataset, see draw_dashboard
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

pub fn draw_dashboard(
    frame: &mut Frame,
    area: Rect,
    dashboard: &mut DashboardComponent,
    ctx: &DashboardContext,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Greeting
            Constraint::Length(4), // Quick links
            Constraint::Length(4), // Counters
            Constraint::Min(5),    // Recent activity & notifications
        ])
        .split(area);

    let greeting = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Hello, {}", ctx.user_name),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                "What would you like to do today?",
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("  ·  data: {}", ctx.source),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ]);
    frame.render_widget(greeting, chunks[0]);

    render_quick_links(frame, chunks[1]);
    render_counters(frame, chunks[2], ctx.stats);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[3]);
    render_recent(frame, bottom[0], dashboard, ctx.recent);
    render_notifications(frame, bottom[1], ctx.notifications);
}

fn card(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn render_quick_links(frame: &mut Frame, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let links = [
        ("u", "Upload New Contract", "Add a new contract to your collection"),
        ("c", "View Contracts", "Browse and manage your contracts"),
    ];
    for ((key, title, subtitle), rect) in links.iter().zip(halves.iter()) {
        let paragraph = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", key),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", title),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(*subtitle, Style::default().fg(Color::DarkGray))),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, *rect);
    }
}

fn render_counters(frame: &mut Frame, area: Rect, stats: DashboardStats) {
    let thirds = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let counters = [
        ("Active Contracts", stats.active, Color::Green),
        ("Pending Review", stats.pending, Color::Yellow),
        ("Expiring Soon", stats.expiring_soon, Color::Red),
    ];
    for ((label, count, color), rect) in counters.iter().zip(thirds.iter()) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            count.to_string(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )))
        .block(card(label, *color));
        frame.render_widget(paragraph, *rect);
    }
}

fn render_recent(
    frame: &mut Frame,
    area: Rect,
    dashboard: &mut DashboardComponent,
    recent: &[&Contract],
) {
    let items: Vec<ListItem> = recent
        .iter()
        .map(|contract| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        contract.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("{} {}", contract.status_icon(), contract.status),
                        Style::default().fg(status_color(contract.status)),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", contract.cell_text("dateUploaded")),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(card("Recent Activity", Color::Cyan))
        .highlight_style(Style::default().bg(Color::Blue))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, area, &mut dashboard.list_state);
}

fn render_notifications(frame: &mut Frame, area: Rect, notifications: &[Notification]) {
    let block = card("Notifications", Color::Magenta);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            notifications
                .iter()
                .map(|_| Constraint::Length(3))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

    for (notification, rect) in notifications.iter().zip(rows.iter()) {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(1)])
            .split(*rect);

        let status = match notification.progress {
            Some(_) => Span::styled("Processing", Style::default().fg(Color::Cyan)),
            None => Span::styled("Uploaded", Style::default().fg(Color::Green)),
        };
        let text = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(notification.title, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                status,
            ]),
            Line::from(Span::styled(notification.time, Style::default().fg(Color::DarkGray))),
        ]);
        frame.render_widget(text, parts[0]);

        if let Some(percent) = notification.progress {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
                .percent(percent.min(100));
            frame.render_widget(gauge, parts[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::domain::NOTIFICATIONS;
    use crate::model::sample_data::sample_contracts;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(dashboard: &mut DashboardComponent, code: KeyCode) -> Option<Action> {
        dashboard
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_enter_opens_selected_recent_contract() {
        let mut dashboard = DashboardComponent::default();
        dashboard.set_recent(vec![1, 2, 3]);
        assert_eq!(press(&mut dashboard, KeyCode::Enter), Some(Action::OpenContract(1)));

        press(&mut dashboard, KeyCode::Char('k'));
        assert_eq!(press(&mut dashboard, KeyCode::Enter), Some(Action::OpenContract(3)));

        dashboard.set_recent(Vec::new());
        assert_eq!(press(&mut dashboard, KeyCode::Enter), None);
    }

    #[test]
    fn test_quick_links() {
        let mut dashboard = DashboardComponent::default();
        assert_eq!(
            press(&mut dashboard, KeyCode::Char('u')),
            Some(Action::ShowPage(Page::Upload))
        );
        assert_eq!(
            press(&mut dashboard, KeyCode::Char('c')),
            Some(Action::ShowPage(Page::Contracts))
        );
    }

    #[test]
    fn test_renders_greeting_counters_and_recent() {
        let contracts = sample_contracts();
        let recent: Vec<&Contract> = contracts.iter().take(RECENT_LIMIT).collect();
        let ctx = DashboardContext {
            user_name: "John",
            source: "sample data",
            stats: DashboardStats {
                active: 2,
                pending: 1,
                expiring_soon: 0,
            },
            recent: &recent,
            notifications: &NOTIFICATIONS,
        };
        let mut dashboard = DashboardComponent::default();
        dashboard.set_recent(recent.iter().map(|c| c.id).collect());

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_dashboard(frame, area, &mut dashboard, &ctx);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content.iter().map(|cell| cell.symbol()).collect();

        assert!(screen.contains("Hello, John"));
        assert!(screen.contains("data: sample data"));
        assert!(screen.contains("Active Contracts"));
        assert!(screen.contains("Expiring Soon"));
        assert!(screen.contains("NDA - Project Phoenix"));
        assert!(screen.contains("Service Agreement.pdf"));
    }
}
