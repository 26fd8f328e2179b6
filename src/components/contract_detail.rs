//! Contract detail screen
//!
//! Metadata header and an accordion of extracted terms, one open at a time.
//! Each term can be marked accurate or inaccurate; an inaccurate mark asks
//! for a comment before the feedback is submitted.

use crate::action::Action;
use crate::component::Component;
use crate::components::table::status_color;
use crate::model::contract::Contract;
use crate::model::feedback::{FeedbackBook, TermRating};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const COMMENT_PLACEHOLDER: &str = "Please provide details about the inaccuracy...";

#[derive(Default)]
pub struct ContractDetailComponent {
    contract_id: Option<u32>,
    /// Term labels in display order
    pub term_keys: Vec<String>,
    pub selected: usize,
    /// Index of the expanded term, if any
    pub open_term: Option<usize>,
    /// Comment being typed for the selected term
    pub comment: String,
    pub commenting: bool,
}

impl ContractDetailComponent {
    /// Show a contract, collapsing every term
    pub fn open(&mut self, contract: &Contract) {
        self.contract_id = Some(contract.id);
        self.term_keys = contract.terms.keys().cloned().collect();
        self.selected = 0;
        self.open_term = None;
        self.comment.clear();
        self.commenting = false;
    }

    pub fn contract_id(&self) -> Option<u32> {
        self.contract_id
    }

    pub fn selected_term(&self) -> Option<&str> {
        self.term_keys.get(self.selected).map(String::as_str)
    }

    /// Open the selected term, closing any other; opening it again closes it
    pub fn toggle_selected(&mut self) {
        if self.term_keys.is_empty() {
            return;
        }
        self.open_term = if self.open_term == Some(self.selected) {
            None
        } else {
            Some(self.selected)
        };
    }

    pub fn start_comment(&mut self) {
        self.comment.clear();
        self.commenting = true;
    }

    pub fn push_comment(&mut self, c: char) {
        self.comment.push(c);
    }

    pub fn pop_comment(&mut self) {
        self.comment.pop();
    }

    /// Stop editing and hand back the typed comment
    pub fn take_comment(&mut self) -> String {
        self.commenting = false;
        std::mem::take(&mut self.comment)
    }

    pub fn cancel_comment(&mut self) {
        self.commenting = false;
        self.comment.clear();
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.comment.clear();
        self.commenting = false;
    }

    fn rate(&mut self, accurate: bool) -> Option<Action> {
        let term = self.selected_term()?.to_string();
        self.open_term = Some(self.selected);
        Some(Action::RateTerm { term, accurate })
    }
}

impl Component for ContractDetailComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.term_keys.len() {
                    self.select(self.selected + 1);
                }
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.selected > 0 {
                    self.select(self.selected - 1);
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle_selected();
                None
            }
            KeyCode::Char('y') => self.rate(true),
            KeyCode::Char('n') => self.rate(false),
            KeyCode::Char('s') if self.selected_term().is_some() => Some(Action::SubmitFeedback),
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => Some(Action::Back),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the contract and feedback, see draw_with_contract
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

impl ContractDetailComponent {
    pub fn draw_with_contract(
        &self,
        frame: &mut Frame,
        area: Rect,
        contract: Option<&Contract>,
        feedback: &FeedbackBook,
    ) {
        let Some(contract) = contract else {
            let missing = Paragraph::new(Line::from(Span::styled(
                "Contract not found",
                Style::default().fg(Color::Red),
            )));
            frame.render_widget(missing, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(3)])
            .split(area);

        frame.render_widget(Paragraph::new(header_lines(contract)), chunks[0]);

        let tagged = self.term_lines(contract, feedback);
        let anchor = tagged
            .iter()
            .position(|(term, _)| *term == self.selected)
            .unwrap_or(0);
        let lines: Vec<Line> = tagged.into_iter().map(|(_, line)| line).collect();

        // Keep the selected title and its first lines in view
        let height = chunks[1].height.saturating_sub(2) as usize;
        let scroll = (anchor + 4).saturating_sub(height);

        let terms = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll as u16, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Extracted Terms ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(terms, chunks[1]);
    }

    /// Lines of the accordion, each tagged with the index of its term
    fn term_lines(
        &self,
        contract: &Contract,
        feedback: &FeedbackBook,
    ) -> Vec<(usize, Line<'static>)> {
        if self.term_keys.is_empty() {
            return vec![(
                0,
                Line::from(Span::styled(
                    "No extracted terms for this contract",
                    Style::default().fg(Color::DarkGray),
                )),
            )];
        }

        let mut lines = Vec::new();
        for (i, key) in self.term_keys.iter().enumerate() {
            let is_open = self.open_term == Some(i);
            let is_selected = self.selected == i;
            let entry = feedback.get(contract.id, key);

            let mut title_style = Style::default().fg(Color::White);
            if is_selected {
                title_style = title_style.bg(Color::Blue).add_modifier(Modifier::BOLD);
            }
            let mut title = vec![
                Span::styled(
                    if is_open { "▾ " } else { "▸ " },
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(key.clone(), title_style),
            ];
            if let Some(entry) = entry {
                let (mark, color) = match entry.rating {
                    TermRating::Accurate => ("  ✓ accurate", Color::Green),
                    TermRating::Inaccurate => ("  ✗ inaccurate", Color::Red),
                };
                title.push(Span::styled(mark, Style::default().fg(color)));
                if entry.submitted {
                    title.push(Span::styled(
                        " (submitted)",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            lines.push((i, Line::from(title)));

            if !is_open {
                continue;
            }

            let content = contract.terms.get(key).cloned().unwrap_or_default();
            lines.push((i, Line::from(Span::raw(format!("    {}", content)))));
            lines.push((
                i,
                Line::from(vec![
                    Span::styled(
                        "    Is this information accurate?  ",
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        " y ",
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("Yes  "),
                    Span::styled(
                        " n ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("No"),
                ]),
            ));

            let wants_comment =
                entry.is_some_and(|e| e.rating == TermRating::Inaccurate && !e.submitted);
            if wants_comment && is_selected {
                let comment = if self.comment.is_empty() && !self.commenting {
                    Span::styled(COMMENT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
                } else if self.commenting {
                    Span::styled(
                        format!("{}_", self.comment),
                        Style::default().fg(Color::Cyan),
                    )
                } else {
                    Span::raw(self.comment.clone())
                };
                lines.push((i, Line::from(vec![Span::raw("    Comment: "), comment])));
                lines.push((
                    i,
                    Line::from(vec![
                        Span::styled(
                            "    Enter ",
                            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("Submit Feedback"),
                    ]),
                ));
            } else if entry.is_some_and(|e| !e.submitted) {
                lines.push((
                    i,
                    Line::from(vec![
                        Span::styled(
                            "    s ",
                            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("Submit Feedback"),
                    ]),
                ));
            }
            lines.push((i, Line::from("")));
        }
        lines
    }
}

fn header_lines(contract: &Contract) -> Vec<Line<'static>> {
    let muted = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Dashboard › Contracts › {}", contract.name),
            muted,
        )),
        Line::from(Span::styled(
            contract.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                contract.contract_type.to_string(),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled("  ·  ", muted),
            Span::styled(
                format!("{} {}", contract.status_icon(), contract.status),
                Style::default().fg(status_color(contract.status)),
            ),
            Span::styled("  ·  Uploaded ", muted),
            Span::raw(contract.cell_text("dateUploaded")),
        ]),
    ];

    if let Some(value) = contract.field("value") {
        let currency = contract.currency.clone().unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled("Value: ", muted),
            Span::raw(format!("{} {}", value.display(), currency).trim_end().to_string()),
        ]));
    }
    if contract.parties.is_some() {
        lines.push(Line::from(vec![
            Span::styled("Parties: ", muted),
            Span::raw(contract.cell_text("parties")),
        ]));
    }
    if let Some(ref restrictions) = contract.restrictions {
        lines.push(Line::from(vec![
            Span::styled("Restrictions: ", muted),
            Span::raw(restrictions.clone()),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_data::sample_contracts;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(detail: &mut ContractDetailComponent, code: KeyCode) -> Option<Action> {
        detail
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn opened() -> (ContractDetailComponent, Contract) {
        let contract = sample_contracts().remove(0);
        let mut detail = ContractDetailComponent::default();
        detail.open(&contract);
        (detail, contract)
    }

    #[test]
    fn test_terms_listed_in_label_order() {
        let (detail, _) = opened();
        assert_eq!(
            detail.term_keys,
            vec!["Confidentiality", "Effective Date", "Expiration Date", "Governing Law"]
        );
    }

    #[test]
    fn test_only_one_term_open_at_a_time() {
        let (mut detail, _) = opened();
        press(&mut detail, KeyCode::Enter);
        assert_eq!(detail.open_term, Some(0));

        press(&mut detail, KeyCode::Char('j'));
        press(&mut detail, KeyCode::Enter);
        assert_eq!(detail.open_term, Some(1));

        press(&mut detail, KeyCode::Enter);
        assert_eq!(detail.open_term, None);
    }

    #[test]
    fn test_rating_emits_action_for_selected_term() {
        let (mut detail, _) = opened();
        press(&mut detail, KeyCode::Char('j'));
        assert_eq!(
            press(&mut detail, KeyCode::Char('n')),
            Some(Action::RateTerm {
                term: "Effective Date".to_string(),
                accurate: false
            })
        );
        assert_eq!(detail.open_term, Some(1));
        assert_eq!(press(&mut detail, KeyCode::Esc), Some(Action::Back));
    }

    #[test]
    fn test_comment_buffer() {
        let (mut detail, _) = opened();
        detail.start_comment();
        for c in "wrong date".chars() {
            detail.push_comment(c);
        }
        detail.pop_comment();
        assert_eq!(detail.take_comment(), "wrong dat");
        assert!(!detail.commenting);
        assert!(detail.comment.is_empty());
    }

    #[test]
    fn test_renders_open_term_with_comment_prompt() {
        let (mut detail, contract) = opened();
        let mut feedback = FeedbackBook::default();
        feedback.rate(contract.id, "Confidentiality", TermRating::Inaccurate);
        press(&mut detail, KeyCode::Enter);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                detail.draw_with_contract(frame, area, Some(&contract), &feedback);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content.iter().map(|cell| cell.symbol()).collect();

        assert!(screen.contains("Service Agreement - Tech Solutions Inc"));
        assert!(screen.contains("Is this information accurate?"));
        assert!(screen.contains(COMMENT_PLACEHOLDER));
        assert!(screen.contains("✗ inaccurate"));
    }
}
