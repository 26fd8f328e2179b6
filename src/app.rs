//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App coordinates between components and the loaded contracts; filtering,
//! sorting and feedback rules live in the model layer.

use crate::action::Action;
use crate::component::Component;
use crate::components::dashboard::RECENT_LIMIT;
use crate::components::{
    calculate_main_layout, draw_contracts_page, draw_dashboard, render_help_bar, render_nav_bar,
    render_status_bar, ColumnsDialog, ContractDetailComponent, ContractsComponent,
    DashboardComponent, DashboardContext, FilterDialog, HelpDialog, ProcessingComponent,
    QuitDialog, UploadComponent,
};
use crate::config::Config;
use crate::model::columns::ColumnSet;
use crate::model::domain::{DomainState, NOTIFICATIONS};
use crate::model::feedback::TermRating;
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::{InputMode, Page};
use crate::model::view_state::ViewChange;
use crate::services::export_to_file;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Screen shown in the main area
    pub page: Page,

    /// Which text input, if any, captures key presses
    pub input_mode: InputMode,

    /// Domain state (contracts and feedback)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    pub config: Config,

    /// Directory the spreadsheet export is written to
    pub export_dir: PathBuf,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub dashboard: DashboardComponent,
    pub contracts: ContractsComponent,
    pub upload: UploadComponent,
    pub processing: ProcessingComponent,
    pub detail: ContractDetailComponent,
    pub filter_dialog: FilterDialog,
    pub columns_dialog: ColumnsDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(domain: DomainState, config: Config, export_dir: PathBuf) -> App {
        let columns = ColumnSet::for_dataset(&domain.contracts, config.protect_status_column);
        let mut contracts = ContractsComponent::new(columns);
        contracts.select_first(&domain.contracts);

        App {
            page: Page::Dashboard,
            input_mode: InputMode::Normal,
            domain,
            modals: ModalStack::new(),
            config,
            export_dir,
            should_quit: false,
            error: None,
            status_message: None,
            dashboard: DashboardComponent::default(),
            contracts,
            upload: UploadComponent::default(),
            processing: ProcessingComponent,
            detail: ContractDetailComponent::default(),
            filter_dialog: FilterDialog::new(),
            columns_dialog: ColumnsDialog::default(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.error = None;
        self.status_message = Some(message.into());
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = None;
        self.error = Some(message.into());
    }

    fn show_page(&mut self, page: Page) {
        tracing::debug!(page = page.name(), "show page");
        self.page = page;
        self.input_mode = InputMode::Normal;
        self.contracts.search_mode = false;
        self.upload.editing = false;
        self.detail.cancel_comment();
    }

    fn open_contract(&mut self, id: u32) {
        let Some(contract) = self.domain.find(id) else {
            self.set_error(format!("Contract {} not found", id));
            return;
        };
        self.detail.open(contract);
        self.show_page(Page::ContractDetail(id));
    }

    fn apply_view(&mut self, change: ViewChange) {
        self.contracts.apply(change, &self.domain.contracts);
        if self.modals.top() == Some(&Modal::FilterBuilder) {
            self.filter_dialog.set_group(&self.contracts.view.filters);
        }
    }

    fn export_visible_rows(&mut self) {
        let rows = self.contracts.visible_rows(&self.domain.contracts);
        let count = rows.len();
        match export_to_file(&rows, &self.contracts.view.columns, &self.export_dir) {
            Ok(path) => {
                self.set_status(format!("Exported {} contracts to {}", count, path.display()));
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.set_error(format!("Export failed: {:#}", e));
            }
        }
    }

    fn rate_term(&mut self, term: &str, accurate: bool) {
        let Some(id) = self.detail.contract_id() else {
            return;
        };
        let rating = if accurate {
            TermRating::Accurate
        } else {
            TermRating::Inaccurate
        };
        self.domain.feedback.rate(id, term, rating);

        if self.domain.feedback.wants_comment(id, term) {
            self.detail.start_comment();
            self.input_mode = InputMode::FeedbackComment;
            self.status_message = None;
        } else {
            self.detail.cancel_comment();
            self.input_mode = InputMode::Normal;
            self.set_status(format!("Marked '{}' as accurate", term));
        }
    }

    fn submit_feedback(&mut self) {
        let (Some(id), Some(term)) = (
            self.detail.contract_id(),
            self.detail.selected_term().map(str::to_string),
        ) else {
            return;
        };

        if self.detail.commenting {
            let comment = self.detail.take_comment();
            self.domain.feedback.set_comment(id, &term, &comment);
        }
        self.input_mode = InputMode::Normal;

        match self.domain.feedback.submit(id, &term) {
            Ok(message) => {
                tracing::info!(contract = id, term = %term, "feedback submitted");
                self.set_status(message);
            }
            Err(e) => self.set_error(e),
        }
    }

    fn submit_upload(&mut self) {
        self.input_mode = InputMode::Normal;
        match self.upload.submit() {
            Ok(message) => {
                self.set_status(message);
            }
            Err(e) => self.set_error(e),
        }
    }

    /// Keys handled before the page sees them
    fn handle_global_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::ForceQuit);
        }
        if self.input_mode != InputMode::Normal || !self.modals.is_empty() {
            return None;
        }

        match key.code {
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('1') => Some(Action::ShowPage(Page::Dashboard)),
            KeyCode::Char('2') => Some(Action::ShowPage(Page::Contracts)),
            KeyCode::Char('3') => Some(Action::ShowPage(Page::Upload)),
            KeyCode::Char('4') => Some(Action::ShowPage(Page::Processing)),
            KeyCode::Tab if self.page != Page::Upload => Some(Action::NextPage),
            KeyCode::BackTab if self.page != Page::Upload => Some(Action::PrevPage),
            _ => None,
        }
    }

    fn handle_page_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.page {
            Page::Dashboard => self.dashboard.handle_key_event(key),
            Page::Contracts => self.contracts.handle_key_event(key),
            Page::Upload => self.upload.handle_key_event(key),
            Page::Processing => self.processing.handle_key_event(key),
            Page::ContractDetail(_) => self.detail.handle_key_event(key),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(action) = self.handle_global_key_event(key) {
            return Ok(Some(action));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        match self.input_mode {
            InputMode::Search => self.handle_search_key_event(key),
            InputMode::FeedbackComment => self.handle_comment_key_event(key),
            InputMode::UploadForm | InputMode::Normal => self.handle_page_key_event(key),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        match self.page {
            Page::Contracts => self.contracts.handle_mouse_event(mouse),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            tracing::trace!(%action, "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::ShowPage(page) => self.show_page(page),
            Action::NextPage => self.show_page(self.page.next_tab()),
            Action::PrevPage => self.show_page(self.page.previous_tab()),
            Action::Back => self.show_page(Page::Contracts),
            Action::NextItem => self.contracts.next(&self.domain.contracts),
            Action::PrevItem => self.contracts.previous(&self.domain.contracts),
            Action::FirstItem => self.contracts.select_first(&self.domain.contracts),
            Action::LastItem => self.contracts.select_last(&self.domain.contracts),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => {
                self.contracts.search_mode = true;
                self.input_mode = InputMode::Search;
            }
            Action::ExitSearchMode => {
                self.contracts.search_mode = false;
                self.input_mode = InputMode::Normal;
            }

            // ─────────────────────────────────────────────────────────────────
            // Contract List
            // ─────────────────────────────────────────────────────────────────
            Action::View(change) => self.apply_view(change),
            Action::NextColumn => self.contracts.next_column(),
            Action::PrevColumn => self.contracts.previous_column(),
            Action::SortColumn => {
                if let Some(column) = self.contracts.cursor_column() {
                    self.apply_view(ViewChange::SortBy(column));
                }
            }
            Action::ToggleRowExpanded => {
                if let Some(id) = self
                    .contracts
                    .selected_contract(&self.domain.contracts)
                    .map(|c| c.id)
                {
                    self.apply_view(ViewChange::ToggleExpanded(id));
                }
            }
            Action::OpenSelectedContract => {
                if let Some(id) = self
                    .contracts
                    .selected_contract(&self.domain.contracts)
                    .map(|c| c.id)
                {
                    self.open_contract(id);
                }
            }
            Action::OpenContract(id) => self.open_contract(id),
            Action::CycleSimpleFilter(field) => {
                let change = self.contracts.next_simple_filter(&field, &self.domain.contracts);
                self.apply_view(change);
            }
            Action::Export => self.export_visible_rows(),
            Action::OpenFilterBuilder => {
                self.filter_dialog.open(&self.contracts.view.filters);
                self.modals.push(Modal::FilterBuilder);
            }
            Action::OpenColumns => {
                self.columns_dialog
                    .open(&self.contracts.view.columns, self.config.stage_column_changes);
                self.modals.push(Modal::Columns);
            }
            Action::ApplyColumns(columns) => {
                self.apply_view(ViewChange::ReplaceColumns(columns));
                self.modals.pop();
                self.set_status("Columns updated");
            }

            // ─────────────────────────────────────────────────────────────────
            // Term Feedback
            // ─────────────────────────────────────────────────────────────────
            Action::RateTerm { term, accurate } => self.rate_term(&term, accurate),
            Action::CommentInput(c) => self.detail.push_comment(c),
            Action::CommentBackspace => self.detail.pop_comment(),
            Action::SubmitFeedback => self.submit_feedback(),
            Action::CancelComment => {
                self.detail.cancel_comment();
                self.input_mode = InputMode::Normal;
            }

            // ─────────────────────────────────────────────────────────────────
            // Upload
            // ─────────────────────────────────────────────────────────────────
            Action::EditUploadForm => {
                self.upload.editing = true;
                self.input_mode = InputMode::UploadForm;
            }
            Action::StopEditingUpload => {
                self.upload.editing = false;
                self.input_mode = InputMode::Normal;
            }
            Action::SubmitUpload => self.submit_upload(),
            Action::CancelUpload => {
                self.upload.reset();
                self.show_page(Page::Dashboard);
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let has_status = self.error.is_some() || self.status_message.is_some();
        let layout = calculate_main_layout(area, has_status);

        render_nav_bar(frame, layout.nav, self.page);

        match self.page {
            Page::Dashboard => {
                let today = Local::now().date_naive();
                let stats = self.domain.stats(today);
                let recent = self.domain.recent(RECENT_LIMIT);
                let source = self.domain.source.describe();
                self.dashboard.set_recent(recent.iter().map(|c| c.id).collect());
                let ctx = DashboardContext {
                    user_name: &self.config.user_name,
                    source: &source,
                    stats,
                    recent: &recent,
                    notifications: &NOTIFICATIONS,
                };
                draw_dashboard(frame, layout.body, &mut self.dashboard, &ctx);
            }
            Page::Contracts => {
                let contracts = &self.domain.contracts;
                draw_contracts_page(frame, layout.body, &mut self.contracts, contracts);
            }
            Page::Upload => self.upload.draw(frame, layout.body)?,
            Page::Processing => self.processing.draw(frame, layout.body)?,
            Page::ContractDetail(id) => {
                self.detail.draw_with_contract(
                    frame,
                    layout.body,
                    self.domain.find(id),
                    &self.domain.feedback,
                );
            }
        }

        if let Some(status_area) = layout.status {
            render_status_bar(
                frame,
                status_area,
                self.error.as_deref(),
                self.status_message.as_deref(),
            );
        }
        render_help_bar(frame, layout.help, self.page, self.input_mode);

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }

        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help { .. } => {
                let action = self.help_dialog.handle_key_event(key)?;
                if let Some(Modal::Help { scroll_offset }) = self.modals.top_mut() {
                    *scroll_offset = self.help_dialog.scroll_offset;
                }
                Ok(action)
            }
            Modal::FilterBuilder => self.filter_dialog.handle_key_event(key),
            Modal::Columns => self.columns_dialog.handle_key_event(key),
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::View(ViewChange::QueryBackspace)),
            KeyCode::Char(c) => Some(Action::View(ViewChange::QueryInput(c))),
            _ => None,
        };
        Ok(action)
    }

    fn handle_comment_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CancelComment),
            KeyCode::Enter => Some(Action::SubmitFeedback),
            KeyCode::Backspace => Some(Action::CommentBackspace),
            KeyCode::Char(c) => Some(Action::CommentInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
            Modal::FilterBuilder => {
                self.filter_dialog
                    .draw_with_group(frame, area, &self.contracts.view.filters);
            }
            Modal::Columns => self.columns_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}
