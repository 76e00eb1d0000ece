//! View-state machine — explicit state plus pure transitions.
//!
//! The reference behavior kept the current screen, the selected category, and
//! the edit form in ambient mutable fields, and dropped a submitted edit
//! after logging it. Here the whole view state is a single immutable value,
//! transitions are pure `(state, event) -> state` functions, and a submitted
//! edit surfaces as a [`Command`] the caller must execute against the store —
//! it is never silently discarded.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::facility::{FacilityDraft, FacilityEdit};

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Which view is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  Dashboard,
  /// Detail list for one equipment code.
  FacilityList(String),
  LegalInspection,
  Analysis,
}

// ─── State ───────────────────────────────────────────────────────────────────

/// An in-progress edit of one facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
  pub facility_id: Uuid,
  pub draft:       FacilityDraft,
}

/// The complete view state. Transitions return a new value; nothing mutates
/// in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
  pub screen:  Screen,
  pub editing: Option<EditBuffer>,
}

impl Default for ViewState {
  fn default() -> Self {
    Self {
      screen:  Screen::Dashboard,
      editing: None,
    }
  }
}

// ─── Events and commands ─────────────────────────────────────────────────────

/// One field of the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
  FacilityName(String),
  InstallLocation(String),
  Manager(String),
  Remarks(String),
  LastInspectionDate(NaiveDate),
  NextInspectionDate(NaiveDate),
}

/// Everything the presentation layer can ask of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
  BackToDashboard,
  SelectEquipment(String),
  OpenLegalInspection,
  OpenAnalysis,
  BeginEdit(Uuid),
  UpdateDraft(DraftField),
  CancelEdit,
  SubmitEdit,
}

/// Effect requested by a transition. The state machine itself never touches
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  PersistEdit(FacilityEdit),
}

// ─── Transition ──────────────────────────────────────────────────────────────

/// Apply `event` to `state`.
///
/// Navigating between screens discards any in-progress edit. `SubmitEdit`
/// with a draft that changes nothing is a plain cancel; a non-empty draft
/// yields [`Command::PersistEdit`].
pub fn transition(state: ViewState, event: ViewEvent) -> (ViewState, Option<Command>) {
  let ViewState { screen, editing } = state;

  match event {
    ViewEvent::BackToDashboard => (
      ViewState { screen: Screen::Dashboard, editing: None },
      None,
    ),
    ViewEvent::SelectEquipment(code) => (
      ViewState { screen: Screen::FacilityList(code), editing: None },
      None,
    ),
    ViewEvent::OpenLegalInspection => (
      ViewState { screen: Screen::LegalInspection, editing: None },
      None,
    ),
    ViewEvent::OpenAnalysis => (
      ViewState { screen: Screen::Analysis, editing: None },
      None,
    ),

    ViewEvent::BeginEdit(facility_id) => (
      ViewState {
        screen,
        editing: Some(EditBuffer {
          facility_id,
          draft: FacilityDraft::default(),
        }),
      },
      None,
    ),

    ViewEvent::UpdateDraft(field) => {
      let editing = editing.map(|mut buffer| {
        apply_field(&mut buffer.draft, field);
        buffer
      });
      (ViewState { screen, editing }, None)
    }

    ViewEvent::CancelEdit => (ViewState { screen, editing: None }, None),

    ViewEvent::SubmitEdit => {
      let command = editing
        .filter(|buffer| !buffer.draft.is_empty())
        .map(|buffer| {
          Command::PersistEdit(FacilityEdit {
            facility_id: buffer.facility_id,
            draft:       buffer.draft,
          })
        });
      (ViewState { screen, editing: None }, command)
    }
  }
}

fn apply_field(draft: &mut FacilityDraft, field: DraftField) {
  match field {
    DraftField::FacilityName(v) => draft.facility_name = Some(v),
    DraftField::InstallLocation(v) => draft.install_location = Some(v),
    DraftField::Manager(v) => draft.manager = Some(v),
    DraftField::Remarks(v) => draft.original_remarks = Some(v),
    DraftField::LastInspectionDate(v) => draft.last_inspection_date = Some(v),
    DraftField::NextInspectionDate(v) => draft.next_inspection_date = Some(v),
  }
}

#[cfg(test)]
mod tests {
  use crate::testutil::date;

  use super::*;

  #[test]
  fn navigation_switches_screens() {
    let state = ViewState::default();
    assert_eq!(state.screen, Screen::Dashboard);

    let (state, cmd) = transition(state, ViewEvent::SelectEquipment("AH".into()));
    assert_eq!(state.screen, Screen::FacilityList("AH".into()));
    assert!(cmd.is_none());

    let (state, _) = transition(state, ViewEvent::OpenLegalInspection);
    assert_eq!(state.screen, Screen::LegalInspection);

    let (state, _) = transition(state, ViewEvent::OpenAnalysis);
    assert_eq!(state.screen, Screen::Analysis);

    let (state, _) = transition(state, ViewEvent::BackToDashboard);
    assert_eq!(state.screen, Screen::Dashboard);
  }

  #[test]
  fn navigation_discards_in_progress_edit() {
    let id = Uuid::new_v4();
    let (state, _) = transition(ViewState::default(), ViewEvent::BeginEdit(id));
    assert!(state.editing.is_some());

    let (state, cmd) = transition(state, ViewEvent::OpenAnalysis);
    assert!(state.editing.is_none(), "edit dropped on navigation");
    assert!(cmd.is_none(), "and not persisted");
  }

  #[test]
  fn submit_with_changes_yields_persist_command() {
    let id = Uuid::new_v4();
    let (state, _) = transition(ViewState::default(), ViewEvent::BeginEdit(id));
    let (state, _) = transition(
      state,
      ViewEvent::UpdateDraft(DraftField::Manager("Park".into())),
    );
    let (state, _) = transition(
      state,
      ViewEvent::UpdateDraft(DraftField::NextInspectionDate(date(2024, 9, 1))),
    );

    let (state, cmd) = transition(state, ViewEvent::SubmitEdit);
    assert!(state.editing.is_none());

    let Some(Command::PersistEdit(edit)) = cmd else {
      panic!("expected a persist command");
    };
    assert_eq!(edit.facility_id, id);
    assert_eq!(edit.draft.manager.as_deref(), Some("Park"));
    assert_eq!(edit.draft.next_inspection_date, Some(date(2024, 9, 1)));
    assert!(edit.draft.facility_name.is_none());
  }

  #[test]
  fn submit_with_empty_draft_is_a_cancel() {
    let id = Uuid::new_v4();
    let (state, _) = transition(ViewState::default(), ViewEvent::BeginEdit(id));
    let (state, cmd) = transition(state, ViewEvent::SubmitEdit);
    assert!(state.editing.is_none());
    assert!(cmd.is_none());
  }

  #[test]
  fn submit_without_an_edit_is_a_no_op() {
    let (state, cmd) = transition(ViewState::default(), ViewEvent::SubmitEdit);
    assert!(state.editing.is_none());
    assert!(cmd.is_none());
    assert_eq!(state.screen, Screen::Dashboard);
  }

  #[test]
  fn update_draft_without_an_edit_is_ignored() {
    let (state, cmd) = transition(
      ViewState::default(),
      ViewEvent::UpdateDraft(DraftField::Manager("Lee".into())),
    );
    assert!(state.editing.is_none());
    assert!(cmd.is_none());
  }

  #[test]
  fn cancel_clears_the_buffer() {
    let id = Uuid::new_v4();
    let (state, _) = transition(ViewState::default(), ViewEvent::BeginEdit(id));
    let (state, _) = transition(
      state,
      ViewEvent::UpdateDraft(DraftField::FacilityName("AHU-1".into())),
    );
    let (state, cmd) = transition(state, ViewEvent::CancelEdit);
    assert!(state.editing.is_none());
    assert!(cmd.is_none());
  }
}
