//! `ratatui-split-row-core` provides a form row split into three independently-typed sub-rows.
//!
//! A [`split_row::SplitRow`] owns a left, center and right child row and keeps them in sync with
//! one aggregate [`value::TriValue`]. Editing a child republishes the aggregate; assigning the
//! aggregate pushes each field back into its child.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime and no callbacks into your code: child notifications are queued and handled
//!   before each public mutating call returns.
//! - Editing sessions are app-controlled: the row records [`form::EditingEvent`]s and the caller
//!   forwards them to its form with [`split_row::SplitRow::dispatch_editing`].
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-split-row`.
//!
//! Useful entry points:
//! - [`split_row::SplitRow`]: the controller holding the children and the aggregate value.
//! - [`cell::SplitRowCell`]: the view; layout, focus traversal, input routing and rendering.
//! - [`row::FormRow`] / [`row::RowCell`]: implement these to put your own rows in a slot.
//! - [`fields`]: ready-made text, checkbox and stepper rows.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod render;

pub mod input;
pub mod keymap;

pub mod slot;
pub mod subscription;
pub mod validation;
pub mod value;

pub mod form;
pub mod row;

pub mod cell;
pub mod fields;
pub mod focus;
pub mod split_row;
