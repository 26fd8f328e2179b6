//! Customize-columns dialog
//!
//! Toggles column visibility. With staging enabled the changes are kept in a
//! draft and only reach the table on confirm; otherwise each toggle applies
//! immediately.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::columns::{ColumnDraft, ColumnSet};
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

#[derive(Default)]
pub struct ColumnsDialog {
    pub selected_index: usize,
    pub list_state: ListState,
    draft: ColumnDraft,
    /// Columns as the table currently shows them
    live: ColumnSet,
    staged: bool,
}

impl ColumnsDialog {
    pub fn open(&mut self, columns: &ColumnSet, staged: bool) {
        self.live = columns.clone();
        self.staged = staged;
        if staged {
            self.draft.begin(columns);
        } else {
            self.draft.discard();
        }
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    /// Columns as shown in the dialog, including staged changes
    pub fn current(&self) -> &ColumnSet {
        self.draft.columns().unwrap_or(&self.live)
    }

    fn selected_id(&self) -> Option<String> {
        self.current()
            .toggleable()
            .get(self.selected_index)
            .map(|c| c.id.clone())
    }

    fn select_next(&mut self) {
        let count = self.current().toggleable().len();
        if self.selected_index + 1 < count {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn toggle_selected(&mut self) -> Option<Action> {
        let id = self.selected_id()?;
        if self.staged {
            self.draft.toggle(&id);
            None
        } else {
            self.live.toggle(&id);
            Some(Action::View(ViewChange::ToggleColumn(id)))
        }
    }
}

impl Component for ColumnsDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.draft.discard();
                Some(Action::CloseModal)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Enter => match self.draft.commit() {
                Some(columns) => Some(Action::ApplyColumns(columns)),
                None => Some(Action::CloseModal),
            },
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let rows = self.current().toggleable().len() as u16;
        let popup_area = centered_popup(area, 50, (rows + 8).max(12));
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(popup_area);

        let current = self.current();
        let mut items: Vec<ListItem> = current
            .toggleable()
            .iter()
            .map(|column| {
                let (mark, style) = if column.visible {
                    ("[x] ", Style::default().fg(Color::Green))
                } else {
                    ("[ ] ", Style::default().fg(Color::DarkGray))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(column.label.clone(), Style::default().fg(Color::White)),
                ]))
            })
            .collect();

        if current.protect_status {
            items.push(ListItem::new(Line::from(Span::styled(
                "    Status is always shown",
                Style::default().fg(Color::DarkGray),
            ))));
        }

        let title = if self.staged && self.current() != &self.live {
            " Customize Columns (unsaved) "
        } else {
            " Customize Columns "
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let confirm = if self.staged { "Apply  " } else { "Done  " };
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Space ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle  "),
            Span::styled(" Enter ", Style::default().fg(Color::Green)),
            Span::raw(confirm),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut ColumnsDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_staged_toggles_apply_on_confirm() {
        let columns = ColumnSet::default();
        let mut dialog = ColumnsDialog::default();
        dialog.open(&columns, true);

        // name, type, dateUploaded, currency
        for _ in 0..3 {
            press(&mut dialog, KeyCode::Char('j'));
        }
        assert_eq!(press(&mut dialog, KeyCode::Char(' ')), None);
        assert!(dialog.current().is_visible("currency"));

        match press(&mut dialog, KeyCode::Enter) {
            Some(Action::ApplyColumns(applied)) => {
                assert!(applied.is_visible("currency"));
                assert!(!columns.is_visible("currency"));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_cancel_discards_staged_changes() {
        let columns = ColumnSet::default();
        let mut dialog = ColumnsDialog::default();
        dialog.open(&columns, true);
        press(&mut dialog, KeyCode::Char(' '));
        assert!(!dialog.current().is_visible("name"));

        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
        assert!(dialog.current().is_visible("name"));
    }

    #[test]
    fn test_unstaged_toggles_apply_immediately() {
        let mut dialog = ColumnsDialog::default();
        dialog.open(&ColumnSet::default(), false);
        assert_eq!(
            press(&mut dialog, KeyCode::Char(' ')),
            Some(Action::View(ViewChange::ToggleColumn("name".to_string())))
        );
        assert!(!dialog.current().is_visible("name"));
        assert_eq!(press(&mut dialog, KeyCode::Enter), Some(Action::CloseModal));
    }

    #[test]
    fn test_protected_status_is_not_listed() {
        let mut dialog = ColumnsDialog::default();
        dialog.open(&ColumnSet::standard(true), true);
        assert!(dialog
            .current()
            .toggleable()
            .iter()
            .all(|c| c.id != "status"));

        dialog.open(&ColumnSet::standard(false), true);
        assert!(dialog.current().toggleable().iter().any(|c| c.id == "status"));
    }
}
