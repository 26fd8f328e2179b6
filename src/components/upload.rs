//! Upload screen
//!
//! File path, optional name and contract type. Submitting only validates the
//! form and confirms; nothing is stored.

use crate::action::Action;
use crate::component::Component;
use crate::model::upload::{upload_type_options, UploadField, UploadForm};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct UploadComponent {
    pub form: UploadForm,
    /// Key presses go into the focused field
    pub editing: bool,
    /// Outcome of the last submit: Ok(confirmation) or Err(reason)
    pub outcome: Option<Result<String, String>>,
}

impl UploadComponent {
    /// Validate the form; on success it is cleared
    pub fn submit(&mut self) -> Result<&'static str, String> {
        self.editing = false;
        let result = self.form.submit();
        self.outcome = Some(result.clone().map(str::to_string));
        result
    }

    pub fn reset(&mut self) {
        *self = UploadComponent::default();
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::StopEditingUpload),
            KeyCode::Enter => Some(Action::SubmitUpload),
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus = self.form.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus = self.form.focus.previous();
                None
            }
            KeyCode::Right if self.form.focus == UploadField::ContractType => {
                self.form.cycle_type(true);
                None
            }
            KeyCode::Left if self.form.focus == UploadField::ContractType => {
                self.form.cycle_type(false);
                None
            }
            KeyCode::Backspace => {
                self.form.backspace();
                None
            }
            KeyCode::Char(c) => {
                self.form.input_char(c);
                self.outcome = None;
                None
            }
            _ => None,
        }
    }
}

impl Component for UploadComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing {
            return Ok(self.handle_editing_key(key));
        }

        let action = match key.code {
            KeyCode::Char('e') | KeyCode::Char('i') => Some(Action::EditUploadForm),
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.form.focus = self.form.focus.next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.form.focus = self.form.focus.previous();
                None
            }
            KeyCode::Char('l') | KeyCode::Right if self.form.focus == UploadField::ContractType => {
                self.form.cycle_type(true);
                None
            }
            KeyCode::Char('h') | KeyCode::Left if self.form.focus == UploadField::ContractType => {
                self.form.cycle_type(false);
                None
            }
            KeyCode::Enter => Some(Action::SubmitUpload),
            KeyCode::Esc => Some(Action::CancelUpload),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // File
                Constraint::Length(3), // Name
                Constraint::Length(3), // Type
                Constraint::Length(2), // Buttons
                Constraint::Min(1),    // Outcome
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Upload New Contract",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Upload your signed contract to extract key terms and clauses. Supported formats: PDF, DOCX.",
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        frame.render_widget(title, chunks[0]);

        let file_text = if self.form.file_path.is_empty() {
            None
        } else {
            Some(self.form.file_path.clone())
        };
        self.render_field(
            frame,
            chunks[1],
            UploadField::FilePath,
            "File",
            file_text,
            "Path to a .pdf or .docx file",
        );

        let name_text = if self.form.name.is_empty() {
            None
        } else {
            Some(self.form.name.clone())
        };
        self.render_field(
            frame,
            chunks[2],
            UploadField::Name,
            "Contract Name",
            name_text,
            "Optional: Enter contract name",
        );

        let type_text = self.form.type_index.and_then(|i| {
            upload_type_options()
                .get(i)
                .map(|(label, _)| format!("‹ {} ›", label))
        });
        self.render_field(
            frame,
            chunks[3],
            UploadField::ContractType,
            "Contract Type",
            type_text,
            "Select Contract Type (←/→)",
        );

        let buttons = Paragraph::new(Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Upload   "),
            Span::styled(
                " Esc ",
                Style::default().fg(Color::Black).bg(Color::DarkGray),
            ),
            Span::raw(" Cancel"),
        ]));
        frame.render_widget(buttons, chunks[4]);

        let outcome = match &self.outcome {
            Some(Ok(message)) => Line::from(Span::styled(
                format!("✓ {}", message),
                Style::default().fg(Color::Green),
            )),
            Some(Err(message)) => Line::from(Span::styled(
                format!("✗ {}", message),
                Style::default().fg(Color::Red),
            )),
            None if !self.form.file_path.trim().is_empty() => Line::from(Span::styled(
                format!("Selected: {}", self.form.display_name()),
                Style::default().fg(Color::DarkGray),
            )),
            None => Line::from(""),
        };
        frame.render_widget(Paragraph::new(outcome), chunks[5]);

        Ok(())
    }
}

impl UploadComponent {
    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: UploadField,
        label: &str,
        value: Option<String>,
        placeholder: &str,
    ) {
        let focused = self.form.focus == field;
        let border = match (focused, self.editing) {
            (true, true) => Color::Cyan,
            (true, false) => Color::Yellow,
            _ => Color::DarkGray,
        };

        let content = match value {
            Some(text) if focused && self.editing && field != UploadField::ContractType => {
                Span::styled(format!("{}_", text), Style::default().fg(Color::White))
            }
            Some(text) => Span::styled(text, Style::default().fg(Color::White)),
            None if focused && self.editing && field != UploadField::ContractType => {
                Span::styled("_", Style::default().fg(Color::White))
            }
            None => Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
        };

        let paragraph = Paragraph::new(Line::from(content)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", label))
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::contract::ContractType;
    use crate::model::upload::{MISSING_FILE, UPLOAD_SUCCESS};
    use crossterm::event::KeyModifiers;

    fn press(upload: &mut UploadComponent, code: KeyCode) -> Option<Action> {
        upload
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(upload: &mut UploadComponent, text: &str) {
        for c in text.chars() {
            press(upload, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_editing_fills_fields() {
        let mut upload = UploadComponent::default();
        assert_eq!(press(&mut upload, KeyCode::Char('e')), Some(Action::EditUploadForm));
        upload.editing = true;

        type_text(&mut upload, "lease.pdf");
        press(&mut upload, KeyCode::Tab);
        type_text(&mut upload, "Office Lease");
        press(&mut upload, KeyCode::Tab);
        press(&mut upload, KeyCode::Right);
        press(&mut upload, KeyCode::Right);

        assert_eq!(upload.form.file_path, "lease.pdf");
        assert_eq!(upload.form.name, "Office Lease");
        assert_eq!(upload.form.selected_type(), Some(ContractType::ServiceAgreement));
        assert_eq!(press(&mut upload, KeyCode::Esc), Some(Action::StopEditingUpload));
    }

    #[test]
    fn test_submit_without_file_reports_error() {
        let mut upload = UploadComponent::default();
        assert_eq!(upload.submit(), Err(MISSING_FILE.to_string()));
        assert_eq!(upload.outcome, Some(Err(MISSING_FILE.to_string())));
    }

    #[test]
    fn test_successful_submit_resets_form() {
        let mut upload = UploadComponent::default();
        upload.editing = true;
        type_text(&mut upload, "nda.docx");
        assert_eq!(press(&mut upload, KeyCode::Enter), Some(Action::SubmitUpload));

        assert_eq!(upload.submit(), Ok(UPLOAD_SUCCESS));
        assert!(upload.form.file_path.is_empty());
        assert!(!upload.editing);
    }

    #[test]
    fn test_letters_are_typed_while_editing() {
        let mut upload = UploadComponent::default();
        upload.editing = true;
        // 'e' and 'j' would be shortcuts outside editing
        type_text(&mut upload, "je.pdf");
        assert_eq!(upload.form.file_path, "je.pdf");
    }
}
