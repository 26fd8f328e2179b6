//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `Contract` records and typed field access
//! - Filtering, sorting and column visibility
//! - `ViewState` - the reducer-driven contract list state
//! - `DomainState` - loaded contracts and session feedback
//! - `ModalStack` - Modal overlay management

pub mod columns;
pub mod contract;
pub mod domain;
pub mod feedback;
pub mod filter;
pub mod modal;
pub mod sample_data;
pub mod sort;
pub mod ui;
pub mod upload;
pub mod view_state;
