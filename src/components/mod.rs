//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod columns_dialog;
pub mod contract_detail;
pub mod contracts;
pub mod dashboard;
pub mod filter_dialog;
pub mod help_dialog;
pub mod layout;
pub mod navigation;
pub mod processing;
pub mod quit_dialog;
pub mod table;
pub mod upload;

pub use columns_dialog::ColumnsDialog;
pub use contract_detail::ContractDetailComponent;
pub use contracts::{draw_contracts_page, ContractsComponent};
pub use dashboard::{draw_dashboard, DashboardComponent, DashboardContext};
pub use filter_dialog::FilterDialog;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use navigation::{render_help_bar, render_nav_bar, render_status_bar};
pub use processing::ProcessingComponent;
pub use quit_dialog::QuitDialog;
pub use upload::UploadComponent;
