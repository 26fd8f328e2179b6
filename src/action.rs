//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::columns::ColumnSet;
use crate::model::ui::Page;
use crate::model::view_state::ViewChange;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Switch to a page
    ShowPage(Page),
    /// Move to the next navigation tab
    NextPage,
    /// Move to the previous navigation tab
    PrevPage,
    /// Leave the detail page for the contract list
    Back,
    /// Move to next item in list
    NextItem,
    /// Move to previous item in list
    PrevItem,
    /// Jump to first item
    FirstItem,
    /// Jump to last item
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode
    EnterSearchMode,
    /// Exit search mode
    ExitSearchMode,

    // ─────────────────────────────────────────────────────────────────────────
    // Contract List
    // ─────────────────────────────────────────────────────────────────────────
    /// Apply a change to the contract list view state
    View(ViewChange),
    /// Move the column cursor right
    NextColumn,
    /// Move the column cursor left
    PrevColumn,
    /// Cycle the sort of the column under the cursor
    SortColumn,
    /// Expand or collapse the selected row
    ToggleRowExpanded,
    /// Open the detail page for the selected row
    OpenSelectedContract,
    /// Open the detail page for a contract id
    OpenContract(u32),
    /// Cycle the simple filter on a field through its options
    CycleSimpleFilter(String),
    /// Write the visible rows to a spreadsheet
    Export,
    /// Open the filter builder dialog
    OpenFilterBuilder,
    /// Open the customize-columns dialog
    OpenColumns,
    /// Replace the column set and close the dialog
    ApplyColumns(ColumnSet),

    // ─────────────────────────────────────────────────────────────────────────
    // Term Feedback
    // ─────────────────────────────────────────────────────────────────────────
    /// Mark the focused term accurate or inaccurate
    RateTerm { term: String, accurate: bool },
    /// Add character to the feedback comment
    CommentInput(char),
    /// Remove last character from the feedback comment
    CommentBackspace,
    /// Submit feedback for the focused term
    SubmitFeedback,
    /// Stop editing the feedback comment
    CancelComment,

    // ─────────────────────────────────────────────────────────────────────────
    // Upload
    // ─────────────────────────────────────────────────────────────────────────
    /// Start typing into the upload form
    EditUploadForm,
    /// Stop typing into the upload form
    StopEditingUpload,
    /// Validate and submit the upload form
    SubmitUpload,
    /// Reset the upload form and return to the dashboard
    CancelUpload,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::ShowPage(page) => write!(f, "ShowPage({})", page.name()),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::Back => write!(f, "Back"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::View(change) => write!(f, "View({:?})", change),
            Action::NextColumn => write!(f, "NextColumn"),
            Action::PrevColumn => write!(f, "PrevColumn"),
            Action::SortColumn => write!(f, "SortColumn"),
            Action::ToggleRowExpanded => write!(f, "ToggleRowExpanded"),
            Action::OpenSelectedContract => write!(f, "OpenSelectedContract"),
            Action::OpenContract(id) => write!(f, "OpenContract({})", id),
            Action::CycleSimpleFilter(field) => write!(f, "CycleSimpleFilter({})", field),
            Action::Export => write!(f, "Export"),
            Action::OpenFilterBuilder => write!(f, "OpenFilterBuilder"),
            Action::OpenColumns => write!(f, "OpenColumns"),
            Action::ApplyColumns(_) => write!(f, "ApplyColumns"),
            Action::RateTerm { term, accurate } => write!(f, "RateTerm({}, {})", term, accurate),
            Action::CommentInput(c) => write!(f, "CommentInput('{}')", c),
            Action::CommentBackspace => write!(f, "CommentBackspace"),
            Action::SubmitFeedback => write!(f, "SubmitFeedback"),
            Action::CancelComment => write!(f, "CancelComment"),
            Action::EditUploadForm => write!(f, "EditUploadForm"),
            Action::StopEditingUpload => write!(f, "StopEditingUpload"),
            Action::SubmitUpload => write!(f, "SubmitUpload"),
            Action::CancelUpload => write!(f, "CancelUpload"),
        }
    }
}
