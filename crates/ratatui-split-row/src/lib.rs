//! A ratatui form row split into three independently-typed sub-rows.
//!
//! This crate re-exports `ratatui-split-row-core`; enable the `crossterm` feature for the event
//! bridge and `tracing` for debug spans around focus, value and render activity.
pub use ratatui_split_row_core::cell;
pub use ratatui_split_row_core::fields;
pub use ratatui_split_row_core::focus;
pub use ratatui_split_row_core::form;
pub use ratatui_split_row_core::input;
pub use ratatui_split_row_core::keymap;
pub use ratatui_split_row_core::render;
pub use ratatui_split_row_core::row;
pub use ratatui_split_row_core::slot;
pub use ratatui_split_row_core::split_row;
pub use ratatui_split_row_core::subscription;
pub use ratatui_split_row_core::theme;
pub use ratatui_split_row_core::validation;
pub use ratatui_split_row_core::value;

#[cfg(feature = "crossterm")]
pub use ratatui_split_row_core::crossterm_input;

pub use ratatui_split_row_core::cell::SplitRowAction;
pub use ratatui_split_row_core::cell::SplitRowCell;
pub use ratatui_split_row_core::split_row::SplitRow;
pub use ratatui_split_row_core::split_row::SplitRowOptions;
pub use ratatui_split_row_core::value::TriValue;
