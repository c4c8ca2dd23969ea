//! # Availability Grid State Machine
//!
//! Pure reducer behind the weekly availability view. The frontend hook
//! feeds it events (clicks, fetch results, navigation) and performs the
//! side effects it asks for; nothing in here touches the network or the
//! clock.
//!
//! ```text
//! Loading -> Ready -> Selecting -> Submitting -> Loading -> Ready
//!                        |   ^
//!                        v   |
//!                  ConfirmingDelete -> Submitting
//! ```

use crate::endpoints;
use crate::grid::{CellKey, GridProjection, WeekGrid};
use crate::policy::Role;
use crate::request::{RequestDescriptor, RequestToken};
use crate::validation::ValidationError;
use crate::week::{WeekStart, WeekWindow};
use crate::{
    ApiError, AvailabilityCell, AvailabilityDeleteRequest, AvailabilityRequest, Category,
    CategoryId, TimeSlot, TimeSlotId, UserBookingRequest,
};
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    /// Admin assign or change
    AssignCategory,
    /// User booking confirmation
    ConfirmBooking,
}

/// The cell being edited, booked or deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub date: NaiveDate,
    pub time_slot_id: TimeSlotId,
    pub category_id: Option<CategoryId>,
    pub category: Option<Category>,
    /// An availability record already exists for the cell
    pub has_existing: bool,
}

impl Selection {
    pub fn key(&self) -> CellKey {
        CellKey {
            date: self.date,
            time_slot_id: self.time_slot_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridMutation {
    Assign {
        request: AvailabilityRequest,
        is_change: bool,
    },
    Delete(AvailabilityDeleteRequest),
    Book(UserBookingRequest),
}

impl GridMutation {
    pub fn descriptor(&self) -> Result<RequestDescriptor, ApiError> {
        match self {
            GridMutation::Assign { request, .. } => endpoints::save_availability(request),
            GridMutation::Delete(request) => endpoints::delete_availability(request),
            GridMutation::Book(request) => endpoints::book_slot(request),
        }
    }

    /// Toast text used when the server sent no message of its own
    pub fn success_message(&self) -> &'static str {
        match self {
            GridMutation::Assign {
                is_change: false, ..
            } => "Category assigned.",
            GridMutation::Assign { is_change: true, .. } => "Category updated.",
            GridMutation::Delete(_) => "Assignment removed.",
            GridMutation::Book(_) => "Slot booked.",
        }
    }

    pub fn key(&self) -> CellKey {
        let (date, time_slot_id) = match self {
            GridMutation::Assign { request, .. } => (request.date, request.time_slot),
            GridMutation::Delete(request) => (request.date, request.time_slot),
            GridMutation::Book(request) => (request.date, request.time_slot),
        };
        CellKey { date, time_slot_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridPhase {
    Loading,
    Ready,
    Selecting {
        selection: Selection,
        modal: ModalKind,
    },
    ConfirmingDelete {
        selection: Selection,
    },
    Submitting {
        mutation: GridMutation,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    ReferenceLoaded {
        slots: Vec<TimeSlot>,
        categories: Vec<Category>,
    },
    ReferenceFailed(ApiError),
    AvailabilityRequested {
        token: RequestToken,
        window: WeekWindow,
    },
    AvailabilityLoaded {
        token: RequestToken,
        window: WeekWindow,
        records: Vec<AvailabilityCell>,
    },
    AvailabilityFailed {
        token: RequestToken,
        error: ApiError,
    },
    Navigate(i64),
    GoToWeekContaining(NaiveDate),
    CellClicked {
        key: CellKey,
        now: NaiveDateTime,
    },
    CategoryChosen(Option<CategoryId>),
    DeleteRequested,
    DeleteCancelled,
    ModalClosed,
    SubmitRejected(ValidationError),
    SubmitStarted {
        token: RequestToken,
        mutation: GridMutation,
    },
    SubmitFinished {
        token: RequestToken,
        succeeded: bool,
    },
    FilterChanged(Option<CategoryId>),
    RoleChanged(Role),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridMachine {
    role: Role,
    week_start: WeekStart,
    window: WeekWindow,
    slots: Vec<TimeSlot>,
    categories: Vec<Category>,
    reference_loaded: bool,
    grid: Option<WeekGrid>,
    phase: GridPhase,
    filter: Option<CategoryId>,
    reference_error: Option<ApiError>,
    availability_error: Option<ApiError>,
    modal_error: Option<ValidationError>,
    pending_availability: Option<RequestToken>,
    pending_submit: Option<RequestToken>,
    /// Bumped after every successful mutation to request a re-fetch
    revision: u64,
}

impl GridMachine {
    pub fn new(role: Role, today: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            role,
            week_start,
            window: WeekWindow::containing(today, week_start),
            slots: Vec::new(),
            categories: Vec::new(),
            reference_loaded: false,
            grid: None,
            phase: GridPhase::Loading,
            filter: None,
            reference_error: None,
            availability_error: None,
            modal_error: None,
            pending_availability: None,
            pending_submit: None,
            revision: 0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn window(&self) -> WeekWindow {
        self.window
    }

    pub fn phase(&self) -> &GridPhase {
        &self.phase
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn reference_loaded(&self) -> bool {
        self.reference_loaded
    }

    /// Grid for the visible window, if one has been fetched
    pub fn grid(&self) -> Option<&WeekGrid> {
        self.grid
            .as_ref()
            .filter(|grid| *grid.window() == self.window)
    }

    pub fn filter(&self) -> Option<CategoryId> {
        self.filter
    }

    pub fn projection(&self) -> Option<GridProjection> {
        self.grid().map(|grid| grid.project(self.filter))
    }

    /// The failure to show above the grid, reference data first
    pub fn load_error(&self) -> Option<&ApiError> {
        self.reference_error
            .as_ref()
            .or(self.availability_error.as_ref())
    }

    /// Time slots or categories could not be fetched
    pub fn reference_error(&self) -> Option<&ApiError> {
        self.reference_error.as_ref()
    }

    /// The last availability fetch for this machine failed
    pub fn availability_error(&self) -> Option<&ApiError> {
        self.availability_error.as_ref()
    }

    pub fn modal_error(&self) -> Option<&ValidationError> {
        self.modal_error.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, GridPhase::Loading)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, GridPhase::Submitting { .. })
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.phase {
            GridPhase::Selecting { selection, .. } | GridPhase::ConfirmingDelete { selection } => {
                Some(selection)
            }
            _ => None,
        }
    }

    pub fn open_modal(&self) -> Option<ModalKind> {
        match &self.phase {
            GridPhase::Selecting { modal, .. } => Some(*modal),
            _ => None,
        }
    }

    /// The selection awaiting the second delete confirmation
    pub fn delete_confirmation(&self) -> Option<&Selection> {
        match &self.phase {
            GridPhase::ConfirmingDelete { selection } => Some(selection),
            _ => None,
        }
    }

    /// The mutation the open modal would submit, or `None` when nothing
    /// is open
    pub fn pending_submission(&self) -> Option<Result<GridMutation, ValidationError>> {
        match &self.phase {
            GridPhase::Selecting {
                selection,
                modal: ModalKind::AssignCategory,
            } => Some(
                selection
                    .category_id
                    .map(|category| GridMutation::Assign {
                        request: AvailabilityRequest {
                            date: selection.date,
                            time_slot: selection.time_slot_id,
                            category,
                        },
                        is_change: selection.has_existing,
                    })
                    .ok_or(ValidationError::CategoryNotSelected),
            ),
            GridPhase::Selecting {
                selection,
                modal: ModalKind::ConfirmBooking,
            } => Some(
                selection
                    .category_id
                    .map(|category_id| {
                        GridMutation::Book(UserBookingRequest {
                            date: selection.date,
                            time_slot: selection.time_slot_id,
                            category_id,
                        })
                    })
                    .ok_or(ValidationError::CategoryNotSelected),
            ),
            GridPhase::ConfirmingDelete { selection } => {
                Some(Ok(GridMutation::Delete(AvailabilityDeleteRequest {
                    date: selection.date,
                    time_slot: selection.time_slot_id,
                })))
            }
            _ => None,
        }
    }

    pub fn apply(&mut self, event: GridEvent) {
        match event {
            GridEvent::ReferenceLoaded { slots, categories } => {
                log::debug!(
                    "reference data loaded: {} slots, {} categories",
                    slots.len(),
                    categories.len()
                );
                self.slots = slots;
                self.categories = categories;
                self.reference_loaded = true;
                if let Some(grid) = self.grid.take() {
                    let records = grid.records().cloned().collect();
                    self.grid = Some(WeekGrid::build(*grid.window(), &self.slots, records));
                }
                self.settle();
            }
            GridEvent::ReferenceFailed(error) => {
                log::warn!("reference data failed to load: {}", error);
                self.reference_error = Some(error);
                self.reference_loaded = true;
                self.settle();
            }
            GridEvent::AvailabilityRequested { token, window } => {
                if window != self.window {
                    return;
                }
                self.pending_availability = Some(token);
                if !self.is_submitting() {
                    self.phase = GridPhase::Loading;
                }
            }
            GridEvent::AvailabilityLoaded {
                token,
                window,
                records,
            } => {
                if self.pending_availability != Some(token) || window != self.window {
                    log::debug!("dropping availability #{} for {}", token.sequence(), window.label());
                    return;
                }
                self.pending_availability = None;
                self.availability_error = None;
                self.grid = Some(WeekGrid::build(window, &self.slots, records));
                self.settle();
            }
            GridEvent::AvailabilityFailed { token, error } => {
                if self.pending_availability != Some(token) {
                    return;
                }
                self.pending_availability = None;
                log::warn!("availability for {} failed: {}", self.window.label(), error);
                // without records every cell state is unknown, so no grid
                // is shown and nothing is clickable for this window
                self.availability_error = Some(error);
                self.settle();
            }
            GridEvent::Navigate(weeks) => {
                if weeks != 0 {
                    self.move_to(self.window.shift(weeks));
                }
            }
            GridEvent::GoToWeekContaining(date) => {
                if !self.window.contains(date) {
                    self.move_to(WeekWindow::containing(date, self.week_start));
                }
            }
            GridEvent::CellClicked { key, now } => self.click(key, now),
            GridEvent::CategoryChosen(category_id) => {
                let category = category_id.and_then(|id| self.category(id).cloned());
                if let GridPhase::Selecting {
                    selection,
                    modal: ModalKind::AssignCategory,
                } = &mut self.phase
                {
                    selection.category_id = category_id;
                    selection.category = category;
                    self.modal_error = None;
                }
            }
            GridEvent::DeleteRequested => {
                if let GridPhase::Selecting {
                    selection,
                    modal: ModalKind::AssignCategory,
                } = &self.phase
                {
                    if selection.has_existing {
                        self.phase = GridPhase::ConfirmingDelete {
                            selection: selection.clone(),
                        };
                    }
                }
            }
            GridEvent::DeleteCancelled => {
                if let GridPhase::ConfirmingDelete { selection } = &self.phase {
                    self.phase = GridPhase::Selecting {
                        selection: selection.clone(),
                        modal: ModalKind::AssignCategory,
                    };
                }
            }
            GridEvent::ModalClosed => {
                if matches!(
                    self.phase,
                    GridPhase::Selecting { .. } | GridPhase::ConfirmingDelete { .. }
                ) {
                    self.phase = GridPhase::Ready;
                    self.modal_error = None;
                }
            }
            GridEvent::SubmitRejected(error) => {
                if self.selection().is_some() {
                    self.modal_error = Some(error);
                }
            }
            GridEvent::SubmitStarted { token, mutation } => {
                if self.selection().is_some() {
                    log::debug!("submitting {:?}", mutation);
                    self.pending_submit = Some(token);
                    self.modal_error = None;
                    self.phase = GridPhase::Submitting { mutation };
                }
            }
            GridEvent::SubmitFinished { token, succeeded } => {
                if self.pending_submit != Some(token) {
                    return;
                }
                self.pending_submit = None;
                if succeeded {
                    self.revision += 1;
                }
                if self.is_submitting() {
                    self.phase = if succeeded {
                        GridPhase::Loading
                    } else {
                        GridPhase::Ready
                    };
                }
            }
            GridEvent::FilterChanged(filter) => {
                self.filter = filter;
            }
            GridEvent::RoleChanged(role) => {
                if role != self.role {
                    self.role = role;
                    if self.selection().is_some() {
                        self.phase = GridPhase::Ready;
                    }
                }
            }
        }
    }

    fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    fn move_to(&mut self, window: WeekWindow) {
        log::debug!("showing week {}", window.label());
        self.window = window;
        // any in-flight availability belongs to the old window
        self.pending_availability = None;
        self.modal_error = None;
        if !self.is_submitting() {
            self.phase = GridPhase::Loading;
        }
    }

    fn settle(&mut self) {
        if self.is_loading()
            && self.reference_loaded
            && self.pending_availability.is_none()
            && (self.grid().is_some() || self.load_error().is_some())
        {
            self.phase = GridPhase::Ready;
        }
    }

    fn click(&mut self, key: CellKey, now: NaiveDateTime) {
        if self.phase != GridPhase::Ready {
            return;
        }
        let Some(grid) = self.grid() else {
            return;
        };
        let Some(slot) = grid.slot(key.time_slot_id) else {
            return;
        };
        let view = grid.cell_view(key.date, slot, self.role, now);
        let capabilities = view.capabilities;

        let modal = if capabilities.can_edit_category() {
            ModalKind::AssignCategory
        } else if capabilities.can_book.is_allowed() {
            ModalKind::ConfirmBooking
        } else {
            return;
        };

        let category = view.state.category().cloned();
        let selection = Selection {
            date: key.date,
            time_slot_id: key.time_slot_id,
            category_id: category.as_ref().map(|category| category.id),
            category,
            has_existing: capabilities.can_delete.is_allowed(),
        };
        self.modal_error = None;
        self.phase = GridPhase::Selecting { selection, modal };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestTracker;
    use crate::AvailabilityStatus;
    use chrono::NaiveTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn now() -> NaiveDateTime {
        date(19).and_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap())
    }

    fn slot() -> TimeSlot {
        TimeSlot {
            id: 1,
            start_time: "09:00:00".to_string(),
            end_time: "12:00:00".to_string(),
        }
    }

    fn yoga() -> Category {
        Category {
            id: 5,
            name: "Yoga".to_string(),
        }
    }

    fn key(d: u32) -> CellKey {
        CellKey {
            date: date(d),
            time_slot_id: 1,
        }
    }

    fn assigned(d: u32, category: Category) -> AvailabilityCell {
        AvailabilityCell {
            date: date(d),
            time_slot: slot(),
            category: Some(category),
            status: AvailabilityStatus::Available,
            user: None,
            is_self_booked: false,
        }
    }

    /// Machine with reference data and one availability fetch applied
    fn ready(role: Role, records: Vec<AvailabilityCell>) -> (GridMachine, RequestTracker) {
        let mut machine = GridMachine::new(role, date(21), WeekStart::Monday);
        let mut tracker = RequestTracker::default();
        machine.apply(GridEvent::ReferenceLoaded {
            slots: vec![slot()],
            categories: vec![yoga()],
        });
        fetch(&mut machine, &mut tracker, records);
        assert_eq!(machine.phase(), &GridPhase::Ready);
        (machine, tracker)
    }

    fn fetch(machine: &mut GridMachine, tracker: &mut RequestTracker, records: Vec<AvailabilityCell>) {
        let token = tracker.issue();
        let window = machine.window();
        machine.apply(GridEvent::AvailabilityRequested { token, window });
        machine.apply(GridEvent::AvailabilityLoaded {
            token,
            window,
            records,
        });
    }

    #[test]
    fn test_loading_until_reference_and_availability_arrive() {
        let mut machine = GridMachine::new(Role::Admin, date(21), WeekStart::Monday);
        let mut tracker = RequestTracker::default();
        fetch(&mut machine, &mut tracker, Vec::new());
        assert!(machine.is_loading());
        machine.apply(GridEvent::ReferenceLoaded {
            slots: vec![slot()],
            categories: vec![],
        });
        assert_eq!(machine.phase(), &GridPhase::Ready);
        assert_eq!(machine.grid().unwrap().slots().len(), 1);
    }

    #[test]
    fn test_non_admin_click_on_unconfigured_cell_changes_nothing() {
        let (mut machine, _) = ready(Role::User, Vec::new());
        let before = machine.clone();
        machine.apply(GridEvent::CellClicked { key: key(22), now: now() });
        assert_eq!(machine, before);
    }

    #[test]
    fn test_user_click_on_assigned_cell_opens_booking() {
        let (mut machine, _) = ready(Role::User, vec![assigned(22, yoga())]);
        machine.apply(GridEvent::CellClicked { key: key(22), now: now() });
        assert_eq!(machine.open_modal(), Some(ModalKind::ConfirmBooking));
        let mutation = machine.pending_submission().unwrap().unwrap();
        assert_eq!(
            mutation,
            GridMutation::Book(UserBookingRequest {
                date: date(22),
                time_slot: 1,
                category_id: 5
            })
        );
    }

    #[test]
    fn test_past_cell_click_is_ignored() {
        let (mut machine, _) = ready(Role::Admin, Vec::new());
        let later = date(22).and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        machine.apply(GridEvent::CellClicked { key: key(20), now: later });
        assert_eq!(machine.phase(), &GridPhase::Ready);
        machine.apply(GridEvent::CellClicked { key: key(22), now: later });
        assert_eq!(machine.phase(), &GridPhase::Ready);
    }

    #[test]
    fn test_assign_requires_a_category() {
        let (mut machine, _) = ready(Role::Admin, Vec::new());
        machine.apply(GridEvent::CellClicked { key: key(23), now: now() });
        assert_eq!(machine.open_modal(), Some(ModalKind::AssignCategory));
        assert_eq!(
            machine.pending_submission(),
            Some(Err(ValidationError::CategoryNotSelected))
        );
        machine.apply(GridEvent::SubmitRejected(ValidationError::CategoryNotSelected));
        assert_eq!(machine.modal_error(), Some(&ValidationError::CategoryNotSelected));

        machine.apply(GridEvent::CategoryChosen(Some(5)));
        assert!(machine.modal_error().is_none());
        assert_eq!(machine.selection().unwrap().category, Some(yoga()));
    }

    #[test]
    fn test_successful_assign_refetches_and_shows_new_category() {
        let (mut machine, mut tracker) = ready(Role::Admin, Vec::new());
        machine.apply(GridEvent::CellClicked { key: key(23), now: now() });
        machine.apply(GridEvent::CategoryChosen(Some(5)));
        let mutation = machine.pending_submission().unwrap().unwrap();
        assert!(matches!(mutation, GridMutation::Assign { is_change: false, .. }));

        let submit = tracker.issue();
        machine.apply(GridEvent::SubmitStarted { token: submit, mutation });
        assert!(machine.is_submitting());
        machine.apply(GridEvent::SubmitFinished { token: submit, succeeded: true });
        assert!(machine.is_loading());
        assert_eq!(machine.revision(), 1);

        fetch(&mut machine, &mut tracker, vec![assigned(23, yoga())]);
        let grid = machine.grid().unwrap();
        assert_eq!(grid.cell_state(&key(23)).category(), Some(&yoga()));
        assert_eq!(grid.record_count(), 1);
    }

    #[test]
    fn test_failed_submit_keeps_grid() {
        let (mut machine, mut tracker) = ready(Role::Admin, vec![assigned(23, yoga())]);
        let before = machine.grid().cloned();
        machine.apply(GridEvent::CellClicked { key: key(23), now: now() });
        let mutation = machine.pending_submission().unwrap().unwrap();
        assert!(matches!(mutation, GridMutation::Assign { is_change: true, .. }));

        let token = tracker.issue();
        machine.apply(GridEvent::SubmitStarted { token, mutation });
        machine.apply(GridEvent::SubmitFinished { token, succeeded: false });
        assert_eq!(machine.phase(), &GridPhase::Ready);
        assert_eq!(machine.revision(), 0);
        assert_eq!(machine.grid().cloned(), before);
    }

    #[test]
    fn test_delete_needs_two_confirmations() {
        let (mut machine, _) = ready(Role::Admin, vec![assigned(23, yoga())]);
        machine.apply(GridEvent::CellClicked { key: key(23), now: now() });

        // the modal on its own never yields a delete
        assert!(!matches!(
            machine.pending_submission(),
            Some(Ok(GridMutation::Delete(_)))
        ));

        machine.apply(GridEvent::DeleteRequested);
        assert!(machine.delete_confirmation().is_some());
        assert!(matches!(
            machine.pending_submission(),
            Some(Ok(GridMutation::Delete(_)))
        ));

        machine.apply(GridEvent::DeleteCancelled);
        assert!(machine.delete_confirmation().is_none());
        assert_eq!(machine.open_modal(), Some(ModalKind::AssignCategory));
    }

    #[test]
    fn test_delete_unavailable_on_unconfigured_cell() {
        let (mut machine, _) = ready(Role::Admin, Vec::new());
        machine.apply(GridEvent::CellClicked { key: key(23), now: now() });
        machine.apply(GridEvent::DeleteRequested);
        assert!(machine.delete_confirmation().is_none());
    }

    #[test]
    fn test_navigation_drops_in_flight_availability() {
        let (mut machine, mut tracker) = ready(Role::Admin, Vec::new());
        let old_window = machine.window();
        let stale = tracker.issue();
        machine.apply(GridEvent::AvailabilityRequested {
            token: stale,
            window: old_window,
        });

        machine.apply(GridEvent::Navigate(1));
        assert_eq!(machine.window(), old_window.next());
        assert!(machine.is_loading());
        assert!(machine.grid().is_none());

        machine.apply(GridEvent::AvailabilityLoaded {
            token: stale,
            window: old_window,
            records: vec![assigned(23, yoga())],
        });
        assert!(machine.is_loading());

        fetch(&mut machine, &mut tracker, Vec::new());
        assert_eq!(machine.phase(), &GridPhase::Ready);

        machine.apply(GridEvent::Navigate(-1));
        assert_eq!(machine.window(), old_window);
    }

    #[test]
    fn test_stale_token_never_overwrites_newer_result() {
        let (mut machine, mut tracker) = ready(Role::Admin, Vec::new());
        let window = machine.window();
        let older = tracker.issue();
        machine.apply(GridEvent::AvailabilityRequested { token: older, window });
        let newer = tracker.issue();
        machine.apply(GridEvent::AvailabilityRequested { token: newer, window });

        machine.apply(GridEvent::AvailabilityLoaded {
            token: newer,
            window,
            records: vec![assigned(23, yoga())],
        });
        machine.apply(GridEvent::AvailabilityLoaded {
            token: older,
            window,
            records: Vec::new(),
        });
        assert_eq!(machine.grid().unwrap().record_count(), 1);
    }

    #[test]
    fn test_availability_failure_keeps_reference_data() {
        let (mut machine, mut tracker) = ready(Role::Admin, vec![assigned(23, yoga())]);
        let token = tracker.issue();
        let window = machine.window();
        machine.apply(GridEvent::AvailabilityRequested { token, window });
        machine.apply(GridEvent::AvailabilityFailed {
            token,
            error: ApiError::Transport("offline".to_string()),
        });
        assert_eq!(machine.phase(), &GridPhase::Ready);
        assert!(machine.load_error().is_some());
        assert_eq!(machine.categories().len(), 1);
        assert_eq!(machine.grid().unwrap().record_count(), 1);
    }

    #[test]
    fn test_failed_first_fetch_leaves_cells_unknown() {
        let mut machine = GridMachine::new(Role::Admin, date(21), WeekStart::Monday);
        let mut tracker = RequestTracker::default();
        machine.apply(GridEvent::ReferenceLoaded {
            slots: vec![slot()],
            categories: vec![yoga()],
        });
        let token = tracker.issue();
        let window = machine.window();
        machine.apply(GridEvent::AvailabilityRequested { token, window });
        machine.apply(GridEvent::AvailabilityFailed {
            token,
            error: ApiError::Transport("offline".to_string()),
        });

        assert_eq!(machine.phase(), &GridPhase::Ready);
        assert!(machine.availability_error().is_some());
        assert!(machine.grid().is_none());
        assert!(machine.projection().is_none());

        machine.apply(GridEvent::CellClicked { key: key(22), now: now() });
        assert_eq!(machine.open_modal(), None);
        assert_eq!(machine.phase(), &GridPhase::Ready);
        assert_eq!(machine.pending_submission(), None);
    }

    #[test]
    fn test_reference_failure_outlives_availability_load() {
        let mut machine = GridMachine::new(Role::Admin, date(21), WeekStart::Monday);
        let mut tracker = RequestTracker::default();
        machine.apply(GridEvent::ReferenceFailed(ApiError::Http {
            status: 500,
            message: None,
        }));
        fetch(&mut machine, &mut tracker, vec![assigned(23, yoga())]);

        assert_eq!(machine.phase(), &GridPhase::Ready);
        assert!(machine.availability_error().is_none());
        assert!(machine.reference_error().is_some());
        assert_eq!(machine.load_error(), machine.reference_error());
    }

    #[test]
    fn test_this_week_returns_to_today() {
        let (mut machine, _) = ready(Role::User, Vec::new());
        let home = machine.window();
        machine.apply(GridEvent::Navigate(3));
        machine.apply(GridEvent::GoToWeekContaining(date(21)));
        assert_eq!(machine.window(), home);
    }

    #[test]
    fn test_filter_does_not_touch_records() {
        let (mut machine, _) = ready(Role::Admin, vec![assigned(23, yoga())]);
        machine.apply(GridEvent::FilterChanged(Some(99)));
        let projection = machine.projection().unwrap();
        assert!(projection.dates.is_empty());
        assert_eq!(machine.grid().unwrap().record_count(), 1);
    }
}
