//! Immutable sheet state and its reducer
//!
//! The record set is replaced wholesale on load; edits are copy-on-write
//! against the current snapshot, so Reset is a plain restore of the
//! last-loaded records.

use serde::{Deserialize, Serialize};

use crate::model::SheetRecord;
use maint_types::FilterMode;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetState {
    /// Records as loaded; untouched by edits
    pub original: Vec<SheetRecord>,
    /// Records with edits applied
    pub current: Vec<SheetRecord>,
    pub filter_mode: FilterMode,
    pub search: String,
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Replace both snapshots with freshly loaded records
    Load(Vec<SheetRecord>),
    /// Overwrite one cell; `row` is the 1-based source position
    EditCell {
        row: u32,
        column: String,
        value: String,
    },
    SetFilter(FilterMode),
    SetSearch(String),
    /// Revert to the last-loaded snapshot and clear filter/search
    Reset,
}

pub fn reduce(state: &SheetState, action: Action) -> SheetState {
    match action {
        Action::Load(records) => SheetState {
            original: records.clone(),
            current: records,
            filter_mode: state.filter_mode,
            search: state.search.clone(),
        },
        Action::EditCell { row, column, value } => {
            let mut next = state.clone();
            let idx = row.saturating_sub(1) as usize;
            if let Some(record) = next.current.get_mut(idx) {
                record.set(&column, value);
            }
            next
        }
        Action::SetFilter(mode) => SheetState {
            filter_mode: mode,
            ..state.clone()
        },
        Action::SetSearch(text) => SheetState {
            search: text,
            ..state.clone()
        },
        Action::Reset => SheetState {
            original: state.original.clone(),
            current: state.original.clone(),
            filter_mode: FilterMode::All,
            search: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vehicle: &str) -> SheetRecord {
        SheetRecord::new(vec![("Vehicle".to_string(), vehicle.to_string())])
    }

    #[test]
    fn test_edit_is_copy_on_write() {
        let state = reduce(&SheetState::default(), Action::Load(vec![record("a 1")]));
        let edited = reduce(
            &state,
            Action::EditCell {
                row: 1,
                column: "Vehicle".to_string(),
                value: "b 2".to_string(),
            },
        );
        assert_eq!(edited.current[0].get("Vehicle"), Some("b 2"));
        // original snapshot untouched in both states
        assert_eq!(edited.original[0].get("Vehicle"), Some("a 1"));
        assert_eq!(state.current[0].get("Vehicle"), Some("a 1"));
    }

    #[test]
    fn test_edit_out_of_range_is_a_no_op() {
        let state = reduce(&SheetState::default(), Action::Load(vec![record("a 1")]));
        let next = reduce(
            &state,
            Action::EditCell {
                row: 5,
                column: "Vehicle".to_string(),
                value: "x".to_string(),
            },
        );
        assert_eq!(next.current, state.current);
    }

    #[test]
    fn test_reset_restores_snapshot_and_clears_view() {
        let mut state = reduce(&SheetState::default(), Action::Load(vec![record("a 1")]));
        state = reduce(
            &state,
            Action::EditCell {
                row: 1,
                column: "Vehicle".to_string(),
                value: "b 2".to_string(),
            },
        );
        state = reduce(&state, Action::SetFilter(FilterMode::Delayed));
        state = reduce(&state, Action::SetSearch("abc".to_string()));
        let reset = reduce(&state, Action::Reset);
        assert_eq!(reset.current[0].get("Vehicle"), Some("a 1"));
        assert_eq!(reset.filter_mode, FilterMode::All);
        assert!(reset.search.is_empty());
    }
}
