//! Contract list component
//!
//! Search box, active filter summary and the configurable contract table.
//! Owns the list view state; every change goes through `ViewState::reduce`.

use crate::action::Action;
use crate::component::Component;
use crate::components::table;
use crate::model::columns::ColumnSet;
use crate::model::contract::{Contract, ContractStatus, ContractType};
use crate::model::filter::{FilterNode, FilterOperator};
use crate::model::view_state::{expansion_details, ViewChange, ViewState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::collections::BTreeSet;
use std::mem;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub const EMPTY_STATE: &str = "No contracts found. Try adjusting your filters.";

// ═══════════════════════════════════════════════════════════════════════════════
// Contracts Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct ContractsComponent {
    /// Query, filters, sort, columns and expanded rows
    pub view: ViewState,

    /// Selected row among the visible rows
    pub list_state: ListState,

    /// Index into the visible columns used for sorting
    pub column_cursor: usize,

    pub search_mode: bool,
}

impl Default for ContractsComponent {
    fn default() -> Self {
        Self::new(ColumnSet::default())
    }
}

impl ContractsComponent {
    pub fn new(columns: ColumnSet) -> Self {
        Self {
            view: ViewState::new(columns),
            list_state: ListState::default(),
            column_cursor: 0,
            search_mode: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // View State
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a view change, keeping the selected contract when it stays visible
    pub fn apply(&mut self, change: ViewChange, contracts: &[Contract]) {
        let selected_id = self.selected_contract(contracts).map(|c| c.id);
        tracing::debug!(?change, "view change");
        self.view = mem::take(&mut self.view).reduce(change);

        let column_count = self.view.columns.visible().len();
        if self.column_cursor >= column_count {
            self.column_cursor = column_count.saturating_sub(1);
        }

        let rows = self.visible_rows(contracts);
        match selected_id.and_then(|id| rows.iter().position(|c| c.id == id)) {
            Some(index) => self.list_state.select(Some(index)),
            None => self.select_first(contracts),
        }
    }

    pub fn visible_rows<'a>(&self, contracts: &'a [Contract]) -> Vec<&'a Contract> {
        self.view.visible_rows(contracts)
    }

    pub fn selected_contract<'a>(&self, contracts: &'a [Contract]) -> Option<&'a Contract> {
        let index = self.list_state.selected()?;
        self.visible_rows(contracts).get(index).copied()
    }

    /// Id of the column under the cursor
    pub fn cursor_column(&self) -> Option<String> {
        self.view
            .columns
            .visible()
            .get(self.column_cursor)
            .map(|c| c.id.clone())
    }

    /// Current value of the simple `equals` filter on a field
    pub fn simple_filter_value(&self, field: &str) -> Option<String> {
        self.view.filters.conditions.iter().find_map(|node| match node {
            FilterNode::Condition(c) if c.field == field && c.operator == FilterOperator::Equals => {
                Some(c.value.as_text())
            }
            _ => None,
        })
    }

    /// Change that moves the simple filter on `field` to its next option
    ///
    /// Options run none → first → ... → last → none. Upload dates come from
    /// the dataset, newest first.
    pub fn next_simple_filter(&self, field: &str, contracts: &[Contract]) -> ViewChange {
        let options: Vec<String> = match field {
            "type" => ContractType::all().iter().map(|t| t.label().to_string()).collect(),
            "status" => [
                ContractStatus::Active,
                ContractStatus::Pending,
                ContractStatus::Draft,
                ContractStatus::Processing,
                ContractStatus::Uploaded,
            ]
            .iter()
            .map(|s| s.label().to_string())
            .collect(),
            "dateUploaded" => {
                let dates: BTreeSet<_> = contracts.iter().map(|c| c.date_uploaded).collect();
                dates
                    .into_iter()
                    .rev()
                    .map(|d| d.format(ISO_DATE_FORMAT).to_string())
                    .collect()
            }
            _ => Vec::new(),
        };

        let position = self
            .simple_filter_value(field)
            .and_then(|v| options.iter().position(|o| o.eq_ignore_ascii_case(&v)));
        let next = match position {
            None => options.first().cloned(),
            Some(i) => options.get(i + 1).cloned(),
        };

        ViewChange::SetSimpleFilter {
            field: field.to_string(),
            value: next,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next(&mut self, contracts: &[Contract]) {
        let count = self.visible_rows(contracts).len();
        if count == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn previous(&mut self, contracts: &[Contract]) {
        let count = self.visible_rows(contracts).len();
        if count == 0 {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(prev));
    }

    pub fn select_first(&mut self, contracts: &[Contract]) {
        if self.visible_rows(contracts).is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self, contracts: &[Contract]) {
        let count = self.visible_rows(contracts).len();
        if count > 0 {
            self.list_state.select(Some(count - 1));
        }
    }

    pub fn next_column(&mut self) {
        let count = self.view.columns.visible().len();
        if self.column_cursor + 1 < count {
            self.column_cursor += 1;
        }
    }

    pub fn previous_column(&mut self) {
        self.column_cursor = self.column_cursor.saturating_sub(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for ContractsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Rows
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char(' ') => Some(Action::ToggleRowExpanded),
            KeyCode::Char('z') if !self.view.expanded.is_empty() => {
                Some(Action::View(ViewChange::CollapseAll))
            }
            KeyCode::Enter => Some(Action::OpenSelectedContract),

            // Columns & sort
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevColumn),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextColumn),
            KeyCode::Char('s') => Some(Action::SortColumn),
            KeyCode::Char('o') if self.view.sort.is_some() => {
                Some(Action::View(ViewChange::ClearSort))
            }
            KeyCode::Char('C') => Some(Action::OpenColumns),

            // Search & filters
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('f') => Some(Action::OpenFilterBuilder),
            KeyCode::Char('t') => Some(Action::CycleSimpleFilter("type".to_string())),
            KeyCode::Char('S') => Some(Action::CycleSimpleFilter("status".to_string())),
            KeyCode::Char('D') => Some(Action::CycleSimpleFilter("dateUploaded".to_string())),
            KeyCode::Char('r') => Some(Action::View(ViewChange::ClearFilters)),
            KeyCode::Esc if !self.view.query.is_empty() => {
                Some(Action::View(ViewChange::SetQuery(String::new())))
            }

            KeyCode::Char('x') => Some(Action::Export),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::NextItem),
            MouseEventKind::ScrollUp => Some(Action::PrevItem),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the dataset, see draw_contracts_page
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

pub fn draw_contracts_page(
    frame: &mut Frame,
    area: Rect,
    contracts_view: &mut ContractsComponent,
    contracts: &[Contract],
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_search_box(frame, chunks[0], contracts_view);
    render_active_filters(frame, chunks[1], &contracts_view.view);
    render_table(frame, chunks[2], contracts_view, contracts);

    let shown = contracts_view.visible_rows(contracts).len();
    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" Showing {} of {} contracts", shown, contracts.len()),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, chunks[3]);
}

fn render_search_box(frame: &mut Frame, area: Rect, contracts_view: &ContractsComponent) {
    let query = &contracts_view.view.query;
    let content = if contracts_view.search_mode {
        Span::styled(format!("{}_", query), Style::default().fg(Color::Cyan))
    } else if query.is_empty() {
        Span::styled(
            "Press / to search contracts...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(query.clone(), Style::default().fg(Color::White))
    };

    let border = if contracts_view.search_mode {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let paragraph = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(paragraph, area);
}

/// One line summarizing query, conditions and sort
fn render_active_filters(frame: &mut Frame, area: Rect, view: &ViewState) {
    let chip = Style::default().fg(Color::Black).bg(Color::Cyan);
    let mut spans = vec![Span::styled(" Filters: ", Style::default().fg(Color::DarkGray))];

    if !view.has_active_filters() {
        spans.push(Span::styled("none", Style::default().fg(Color::DarkGray)));
    }
    if !view.query.is_empty() {
        spans.push(Span::styled(format!(" name ~ \"{}\" ", view.query), chip));
        spans.push(Span::raw(" "));
    }
    for (i, node) in view.filters.conditions.iter().enumerate() {
        if i > 0 {
            let logic = match node {
                FilterNode::Condition(c) => c.logic.unwrap_or(view.filters.logic),
                FilterNode::Group(_) => view.filters.logic,
            };
            spans.push(Span::styled(
                format!("{} ", logic.label()),
                Style::default().fg(Color::Magenta),
            ));
        }
        let text = match node {
            FilterNode::Condition(c) => c.to_string(),
            FilterNode::Group(g) => format!("({} conditions)", g.conditions.len()),
        };
        spans.push(Span::styled(format!(" {} ", text), chip));
        spans.push(Span::raw(" "));
    }

    if let Some(ref sort) = view.sort {
        let label = view
            .columns
            .get(&sort.key)
            .map(|c| c.label.clone())
            .unwrap_or_else(|| sort.key.clone());
        spans.push(Span::styled(
            format!("  Sort: {} {}", label, sort.direction.arrow()),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    contracts_view: &mut ContractsComponent,
    contracts: &[Contract],
) {
    let rows = contracts_view.visible_rows(contracts);
    let view = &contracts_view.view;
    let columns = view.columns.visible();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Contracts ({}) ", rows.len()))
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let widths = table::column_widths(&columns, &rows);
    let header = Paragraph::new(vec![
        table::header_line(&columns, &widths, view.sort.as_ref(), contracts_view.column_cursor),
        table::rule_line(&widths),
    ]);
    frame.render_widget(header, chunks[0]);

    if rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(EMPTY_STATE, Style::default().fg(Color::Yellow))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|contract| {
            let expanded = view.expanded.is_expanded(contract.id);
            let mut lines = vec![table::row_line(contract, &columns, &widths, expanded)];
            if expanded {
                lines.extend(table::detail_lines(&expansion_details(contract, &view.columns)));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_stateful_widget(list, chunks[1], &mut contracts_view.list_state);
}
