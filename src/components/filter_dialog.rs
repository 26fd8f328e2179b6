//! Advanced filter dialog
//!
//! Lists the active conditions and builds new ones, either field by field or
//! from the quick `field op value` syntax.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::filter::{
    FilterCondition, FilterField, FilterGroup, FilterNode, FilterOperator, Logic, FILTER_FIELDS,
};
use crate::model::view_state::ViewChange;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterDialogMode {
    /// Browsing the active conditions
    #[default]
    List,
    /// Picking field, operator and value
    Builder,
    /// Typing `field op value`
    Quick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum BuilderFocus {
    #[default]
    Field,
    Operator,
    Value,
}

impl BuilderFocus {
    fn next(self) -> Self {
        match self {
            BuilderFocus::Field => BuilderFocus::Operator,
            BuilderFocus::Operator => BuilderFocus::Value,
            BuilderFocus::Value => BuilderFocus::Field,
        }
    }

    fn previous(self) -> Self {
        match self {
            BuilderFocus::Field => BuilderFocus::Value,
            BuilderFocus::Operator => BuilderFocus::Field,
            BuilderFocus::Value => BuilderFocus::Operator,
        }
    }
}

/// Filter builder dialog
#[derive(Default)]
pub struct FilterDialog {
    pub mode: FilterDialogMode,
    pub selected_index: usize,
    pub list_state: ListState,
    /// Number of entries in the group last shown
    condition_count: usize,
    field_index: usize,
    operator_index: usize,
    focus: BuilderFocus,
    /// Value (builder) or whole condition (quick syntax)
    pub input: String,
    /// Last parse error, shown under the editor
    pub error: Option<String>,
}

impl FilterDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the condition list
    pub fn open(&mut self, group: &FilterGroup) {
        self.mode = FilterDialogMode::List;
        self.error = None;
        self.input.clear();
        self.selected_index = 0;
        self.set_group(group);
    }

    /// Track the group being edited so selection stays in range
    pub fn set_group(&mut self, group: &FilterGroup) {
        self.condition_count = group.conditions.len();
        if self.selected_index >= self.condition_count {
            self.selected_index = self.condition_count.saturating_sub(1);
        }
        if self.condition_count == 0 {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn field(&self) -> FilterField {
        FILTER_FIELDS[self.field_index % FILTER_FIELDS.len()]
    }

    fn operators(&self) -> Vec<FilterOperator> {
        FilterOperator::applicable(self.field().kind)
    }

    fn operator(&self) -> FilterOperator {
        let operators = self.operators();
        operators
            .get(self.operator_index)
            .copied()
            .unwrap_or_default()
    }

    fn start_builder(&mut self) {
        self.mode = FilterDialogMode::Builder;
        self.field_index = 0;
        self.operator_index = 0;
        self.focus = BuilderFocus::Field;
        self.input.clear();
        self.error = None;
    }

    fn start_quick(&mut self) {
        self.mode = FilterDialogMode::Quick;
        self.input.clear();
        self.error = None;
    }

    fn back_to_list(&mut self) {
        self.mode = FilterDialogMode::List;
        self.input.clear();
        self.error = None;
    }

    fn cycle_selection(&mut self, forward: bool) {
        match self.focus {
            BuilderFocus::Field => {
                let count = FILTER_FIELDS.len();
                self.field_index = if forward {
                    (self.field_index + 1) % count
                } else {
                    (self.field_index + count - 1) % count
                };
                self.operator_index = 0;
            }
            BuilderFocus::Operator => {
                let count = self.operators().len().max(1);
                self.operator_index = if forward {
                    (self.operator_index + 1) % count
                } else {
                    (self.operator_index + count - 1) % count
                };
            }
            BuilderFocus::Value => {}
        }
    }

    /// Condition described by the editor, or the reason it is invalid
    pub fn build_condition(&self) -> Result<FilterCondition, String> {
        let value = self.input.trim();
        match self.mode {
            FilterDialogMode::Builder => {
                if value.is_empty() {
                    return Err("Enter a value".to_string());
                }
                FilterCondition::from_parts(self.field().id, self.operator(), value)
            }
            _ => FilterCondition::parse(value),
        }
    }

    fn submit(&mut self) -> Option<Action> {
        match self.build_condition() {
            Ok(condition) => {
                tracing::debug!(%condition, "filter condition added");
                self.back_to_list();
                self.selected_index = self.condition_count;
                Some(Action::View(ViewChange::AddCondition(condition)))
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        let has_selection = self.condition_count > 0;
        match key.code {
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_index + 1 < self.condition_count {
                    self.selected_index += 1;
                    self.list_state.select(Some(self.selected_index));
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.list_state.select(Some(self.selected_index));
                }
                None
            }
            KeyCode::Char('a') | KeyCode::Char('n') => {
                self.start_builder();
                None
            }
            KeyCode::Char('/') | KeyCode::Char(':') => {
                self.start_quick();
                None
            }
            KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete if has_selection => Some(
                Action::View(ViewChange::RemoveCondition(self.selected_index)),
            ),
            KeyCode::Char('l') if has_selection => Some(Action::View(
                ViewChange::ToggleConditionLogic(self.selected_index),
            )),
            KeyCode::Char('g') => Some(Action::View(ViewChange::ToggleGroupLogic)),
            KeyCode::Char('c') => Some(Action::View(ViewChange::ClearFilters)),
            _ => None,
        }
    }

    fn handle_builder_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.back_to_list();
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                None
            }
            KeyCode::Right => {
                self.cycle_selection(true);
                None
            }
            KeyCode::Left => {
                self.cycle_selection(false);
                None
            }
            KeyCode::Char('l') if self.focus != BuilderFocus::Value => {
                self.cycle_selection(true);
                None
            }
            KeyCode::Char('h') if self.focus != BuilderFocus::Value => {
                self.cycle_selection(false);
                None
            }
            KeyCode::Backspace if self.focus == BuilderFocus::Value => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) if self.focus == BuilderFocus::Value => {
                self.input.push(c);
                self.error = None;
                None
            }
            _ => None,
        }
    }

    fn handle_quick_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.back_to_list();
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.error = None;
                None
            }
            _ => None,
        }
    }

    /// Draw the dialog for the given filter group
    pub fn draw_with_group(&mut self, frame: &mut Frame, area: Rect, group: &FilterGroup) {
        self.set_group(group);

        let popup_area = centered_popup(area, 72, 22);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Group logic
                Constraint::Min(4),    // Conditions
                Constraint::Length(5), // Editor
                Constraint::Length(3), // Help
            ])
            .split(popup_area);

        let match_word = match group.logic {
            Logic::And => "ALL",
            Logic::Or => "ANY",
        };
        let header = Paragraph::new(Line::from(vec![
            Span::raw("Match "),
            Span::styled(
                match_word,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" of the following conditions"),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Advanced Filters ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        self.draw_conditions(frame, chunks[1], group);
        self.draw_editor(frame, chunks[2]);

        let help_spans = match self.mode {
            FilterDialogMode::List => vec![
                Span::styled(" a ", Style::default().fg(Color::Green)),
                Span::raw("Add  "),
                Span::styled(" / ", Style::default().fg(Color::Green)),
                Span::raw("Quick  "),
                Span::styled(" d ", Style::default().fg(Color::Red)),
                Span::raw("Remove  "),
                Span::styled(" l/g ", Style::default().fg(Color::Magenta)),
                Span::raw("Logic  "),
                Span::styled(" c ", Style::default().fg(Color::Yellow)),
                Span::raw("Clear  "),
                Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
                Span::raw("Close"),
            ],
            FilterDialogMode::Builder => vec![
                Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
                Span::raw("Next  "),
                Span::styled(" ←/→ ", Style::default().fg(Color::Cyan)),
                Span::raw("Choose  "),
                Span::styled(" Enter ", Style::default().fg(Color::Green)),
                Span::raw("Add  "),
                Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
                Span::raw("Back"),
            ],
            FilterDialogMode::Quick => vec![
                Span::styled(" Enter ", Style::default().fg(Color::Green)),
                Span::raw("Add  "),
                Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
                Span::raw("Back"),
            ],
        };
        let help = Paragraph::new(Line::from(help_spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    fn draw_conditions(&mut self, frame: &mut Frame, area: Rect, group: &FilterGroup) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        if group.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No conditions. Press a to add one.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = group
            .conditions
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let (logic, text) = match node {
                    FilterNode::Condition(c) => {
                        (c.logic.unwrap_or(group.logic), c.to_string())
                    }
                    FilterNode::Group(g) => {
                        (group.logic, format!("({} nested conditions)", g.conditions.len()))
                    }
                };
                let prefix = if i == 0 { "WHERE" } else { logic.label() };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>5} ", prefix),
                        Style::default().fg(Color::Magenta),
                    ),
                    Span::styled(text, Style::default().fg(Color::White)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_editor(&self, frame: &mut Frame, area: Rect) {
        let focused = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let normal = Style::default().fg(Color::White);

        let mut lines = match self.mode {
            FilterDialogMode::List => vec![Line::from(Span::styled(
                "Quick syntax: status = Active, value > 50000, type in NDA, Other",
                Style::default().fg(Color::DarkGray),
            ))],
            FilterDialogMode::Builder => {
                let style_for = |focus: BuilderFocus| {
                    if self.focus == focus {
                        focused
                    } else {
                        normal
                    }
                };
                vec![Line::from(vec![
                    Span::styled(format!(" ‹ {} › ", self.field().label), style_for(BuilderFocus::Field)),
                    Span::raw("  "),
                    Span::styled(
                        format!(" ‹ {} › ", self.operator().label()),
                        style_for(BuilderFocus::Operator),
                    ),
                    Span::raw("  "),
                    Span::styled(format!(" {}_ ", self.input), style_for(BuilderFocus::Value)),
                ])]
            }
            FilterDialogMode::Quick => vec![Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::styled(format!("{}_", self.input), normal),
            ])],
        };

        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let title = match self.mode {
            FilterDialogMode::List => " New Condition ",
            FilterDialogMode::Builder => " Builder ",
            FilterDialogMode::Quick => " Quick Filter ",
        };
        let editor = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(if self.mode == FilterDialogMode::List {
                    Color::DarkGray
                } else {
                    Color::Cyan
                })),
        );
        frame.render_widget(editor, area);
    }
}

impl Component for FilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.mode {
            FilterDialogMode::List => self.handle_list_key(key),
            FilterDialogMode::Builder => self.handle_builder_key(key),
            FilterDialogMode::Quick => self.handle_quick_key(key),
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_group(frame, area, &FilterGroup::default());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::FilterValue;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(dialog: &mut FilterDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(dialog: &mut FilterDialog, text: &str) {
        for c in text.chars() {
            press(dialog, KeyCode::Char(c));
        }
    }

    fn two_conditions() -> FilterGroup {
        FilterGroup::new(Logic::And)
            .with_condition(FilterCondition::equals("status", "Active"))
            .with_condition(FilterCondition::equals("type", "NDA"))
    }

    #[test]
    fn test_builder_adds_condition() {
        let mut dialog = FilterDialog::new();
        dialog.open(&FilterGroup::default());

        press(&mut dialog, KeyCode::Char('a'));
        assert_eq!(dialog.mode, FilterDialogMode::Builder);

        // name -> type -> status
        press(&mut dialog, KeyCode::Right);
        press(&mut dialog, KeyCode::Right);
        press(&mut dialog, KeyCode::Tab);
        press(&mut dialog, KeyCode::Tab);
        type_text(&mut dialog, "Active");

        let action = press(&mut dialog, KeyCode::Enter);
        assert_eq!(
            action,
            Some(Action::View(ViewChange::AddCondition(FilterCondition::equals(
                "status", "Active"
            ))))
        );
        assert_eq!(dialog.mode, FilterDialogMode::List);
    }

    #[test]
    fn test_builder_offers_only_applicable_operators() {
        let mut dialog = FilterDialog::new();
        press(&mut dialog, KeyCode::Char('a'));

        // value field: equals, greater than, less than, between
        for _ in 0..3 {
            press(&mut dialog, KeyCode::Right);
        }
        press(&mut dialog, KeyCode::Tab);
        press(&mut dialog, KeyCode::Right);
        press(&mut dialog, KeyCode::Tab);
        type_text(&mut dialog, "60000");

        let condition = dialog.build_condition().unwrap();
        assert_eq!(condition.field, "value");
        assert_eq!(condition.operator, FilterOperator::GreaterThan);
        assert_eq!(condition.value, FilterValue::Number(60000.0));
    }

    #[test]
    fn test_builder_requires_value() {
        let mut dialog = FilterDialog::new();
        press(&mut dialog, KeyCode::Char('a'));
        assert_eq!(press(&mut dialog, KeyCode::Enter), None);
        assert_eq!(dialog.error.as_deref(), Some("Enter a value"));
        assert_eq!(dialog.mode, FilterDialogMode::Builder);
    }

    #[test]
    fn test_quick_syntax_reports_parse_errors() {
        let mut dialog = FilterDialog::new();
        press(&mut dialog, KeyCode::Char('/'));
        type_text(&mut dialog, "garbage");
        assert_eq!(press(&mut dialog, KeyCode::Enter), None);
        assert!(dialog.error.is_some());

        for _ in 0.."garbage".len() {
            press(&mut dialog, KeyCode::Backspace);
        }
        type_text(&mut dialog, "value between 1000..50000");
        let action = press(&mut dialog, KeyCode::Enter);
        assert!(matches!(action, Some(Action::View(ViewChange::AddCondition(_)))));
    }

    #[test]
    fn test_comparison_values_must_coerce() {
        let mut dialog = FilterDialog::new();
        press(&mut dialog, KeyCode::Char('/'));
        type_text(&mut dialog, "value >= 50000");
        assert_eq!(press(&mut dialog, KeyCode::Enter), None);
        assert!(dialog.error.as_deref().is_some_and(|e| e.contains(">=")));

        let mut dialog = FilterDialog::new();
        press(&mut dialog, KeyCode::Char('a'));
        for _ in 0..3 {
            press(&mut dialog, KeyCode::Right);
        }
        press(&mut dialog, KeyCode::Tab);
        press(&mut dialog, KeyCode::Right);
        press(&mut dialog, KeyCode::Tab);
        type_text(&mut dialog, "lots");
        assert_eq!(press(&mut dialog, KeyCode::Enter), None);
        assert!(dialog.error.as_deref().is_some_and(|e| e.contains("not a number")));
        assert_eq!(dialog.mode, FilterDialogMode::Builder);
    }

    #[test]
    fn test_list_actions_target_selected_condition() {
        let mut dialog = FilterDialog::new();
        dialog.open(&two_conditions());

        press(&mut dialog, KeyCode::Char('j'));
        assert_eq!(
            press(&mut dialog, KeyCode::Char('l')),
            Some(Action::View(ViewChange::ToggleConditionLogic(1)))
        );
        assert_eq!(
            press(&mut dialog, KeyCode::Char('d')),
            Some(Action::View(ViewChange::RemoveCondition(1)))
        );
        assert_eq!(
            press(&mut dialog, KeyCode::Char('g')),
            Some(Action::View(ViewChange::ToggleGroupLogic))
        );
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
    }

    #[test]
    fn test_remove_ignored_without_conditions() {
        let mut dialog = FilterDialog::new();
        dialog.open(&FilterGroup::default());
        assert_eq!(press(&mut dialog, KeyCode::Char('d')), None);
    }

    #[test]
    fn test_draws_conditions_with_logic() {
        let mut dialog = FilterDialog::new();
        let group = two_conditions();
        dialog.open(&group);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                dialog.draw_with_group(frame, area, &group);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content.iter().map(|cell| cell.symbol()).collect();

        assert!(screen.contains("Advanced Filters"));
        assert!(screen.contains("WHERE Status equals Active"));
        assert!(screen.contains("AND Contract Type equals NDA"));
    }
}
