//! Merge of the sparse availability list into a 7 x N weekly grid.

use crate::policy::{cell_capabilities, CellCapabilities, Role};
use crate::time_format::parse_clock;
use crate::week::WeekWindow;
use crate::{AvailabilityCell, Category, CategoryId, TimeSlot, TimeSlotId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identity of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    pub date: NaiveDate,
    pub time_slot_id: TimeSlotId,
}

/// Server state of one cell as the grid sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState {
    /// No availability record exists
    Unconfigured,
    Available {
        category: Option<Category>,
    },
    Booked {
        category: Option<Category>,
        booked_by: Option<String>,
        is_self_booked: bool,
    },
}

impl CellState {
    fn from_record(record: Option<&AvailabilityCell>) -> Self {
        match record {
            None => CellState::Unconfigured,
            Some(record) if record.is_booked() => CellState::Booked {
                category: record.category.clone(),
                booked_by: record.user.as_ref().map(|user| user.display_name().to_string()),
                is_self_booked: record.is_self_booked,
            },
            Some(record) => CellState::Available {
                category: record.category.clone(),
            },
        }
    }

    pub fn category(&self) -> Option<&Category> {
        match self {
            CellState::Unconfigured => None,
            CellState::Available { category } | CellState::Booked { category, .. } => {
                category.as_ref()
            }
        }
    }
}

/// Visual treatment of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTone {
    Unconfigured,
    Available,
    Booked,
    SelfBooked,
    Past,
}

impl CellTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            CellTone::Unconfigured => "cell-unconfigured",
            CellTone::Available => "cell-available",
            CellTone::Booked => "cell-booked",
            CellTone::SelfBooked => "cell-self-booked",
            CellTone::Past => "cell-past",
        }
    }
}

/// Everything a renderer needs for one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub key: CellKey,
    pub state: CellState,
    pub label: String,
    pub detail: Option<String>,
    pub tone: CellTone,
    pub is_past: bool,
    pub capabilities: CellCapabilities,
}

impl CellView {
    pub fn is_actionable(&self) -> bool {
        self.capabilities.is_actionable()
    }
}

/// A slot is locked when its date is before today, or it is today and
/// its start time has already passed.
pub fn is_locked(date: NaiveDate, slot: &TimeSlot, now: NaiveDateTime) -> bool {
    let today = now.date();
    if date < today {
        return true;
    }
    if date > today {
        return false;
    }
    match parse_clock(&slot.start_time) {
        Some(start) => start <= now.time(),
        None => false,
    }
}

/// Dates and slots left visible by the category filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridProjection {
    pub dates: Vec<NaiveDate>,
    pub slots: Vec<TimeSlot>,
}

/// Availability for one week, keyed by (date, slot)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    window: WeekWindow,
    slots: Vec<TimeSlot>,
    cells: HashMap<CellKey, AvailabilityCell>,
}

impl WeekGrid {
    /// Build the grid from a freshly fetched availability list.
    ///
    /// Records outside the window are ignored. When the server returns
    /// more than one record for a key, the first one wins.
    pub fn build(window: WeekWindow, slots: &[TimeSlot], records: Vec<AvailabilityCell>) -> Self {
        let mut slots = slots.to_vec();
        slots.sort_by(|a, b| {
            match (parse_clock(&a.start_time), parse_clock(&b.start_time)) {
                (Some(a_start), Some(b_start)) => a_start.cmp(&b_start),
                _ => a.start_time.cmp(&b.start_time),
            }
            .then(a.id.cmp(&b.id))
        });

        let mut cells = HashMap::with_capacity(records.len());
        for record in records {
            if !window.contains(record.date) {
                log::debug!("ignoring availability for {} outside {}", record.date, window.label());
                continue;
            }
            let key = record.key();
            if cells.contains_key(&key) {
                log::warn!(
                    "duplicate availability record for {} slot {}, keeping the first",
                    key.date,
                    key.time_slot_id
                );
                continue;
            }
            cells.insert(key, record);
        }

        Self {
            window,
            slots,
            cells,
        }
    }

    pub fn window(&self) -> &WeekWindow {
        &self.window
    }

    /// Slots ordered by start time
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn slot(&self, id: TimeSlotId) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn record(&self, key: &CellKey) -> Option<&AvailabilityCell> {
        self.cells.get(key)
    }

    pub fn records(&self) -> impl Iterator<Item = &AvailabilityCell> {
        self.cells.values()
    }

    pub fn record_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell_state(&self, key: &CellKey) -> CellState {
        CellState::from_record(self.record(key))
    }

    /// Presentation of one cell for `role` at wall-clock `now`
    pub fn cell_view(&self, date: NaiveDate, slot: &TimeSlot, role: Role, now: NaiveDateTime) -> CellView {
        let key = CellKey {
            date,
            time_slot_id: slot.id,
        };
        let state = self.cell_state(&key);
        let is_past = is_locked(date, slot, now);
        let capabilities = cell_capabilities(role, &state, is_past);

        let (label, detail, tone) = match &state {
            CellState::Unconfigured => {
                let label = if role == Role::Admin && !is_past { "Add" } else { "\u{2014}" };
                (label.to_string(), None, CellTone::Unconfigured)
            }
            CellState::Available { category } => (
                category_name(category.as_ref()),
                None,
                CellTone::Available,
            ),
            CellState::Booked {
                category,
                booked_by,
                is_self_booked,
            } => {
                let detail = if *is_self_booked {
                    Some("Booked by you".to_string())
                } else if role == Role::Admin {
                    Some(match booked_by {
                        Some(name) => format!("Booked by {}", name),
                        None => "Booked".to_string(),
                    })
                } else {
                    Some("Booked".to_string())
                };
                let tone = if *is_self_booked {
                    CellTone::SelfBooked
                } else {
                    CellTone::Booked
                };
                (category_name(category.as_ref()), detail, tone)
            }
        };

        CellView {
            key,
            state,
            label,
            detail,
            tone: if is_past { CellTone::Past } else { tone },
            is_past,
            capabilities,
        }
    }

    /// Narrow the displayed dates and slots to those holding at least one
    /// cell assigned `filter`. The underlying records are untouched.
    pub fn project(&self, filter: Option<CategoryId>) -> GridProjection {
        let Some(category_id) = filter else {
            return GridProjection {
                dates: self.window.days().to_vec(),
                slots: self.slots.clone(),
            };
        };

        let matches = |record: &AvailabilityCell| {
            record
                .category
                .as_ref()
                .is_some_and(|category| category.id == category_id)
        };

        let dates = self
            .window
            .days()
            .iter()
            .copied()
            .filter(|date| self.cells.values().any(|r| r.date == *date && matches(r)))
            .collect();
        let slots = self
            .slots
            .iter()
            .filter(|slot| {
                self.cells
                    .values()
                    .any(|r| r.time_slot.id == slot.id && matches(r))
            })
            .cloned()
            .collect();

        GridProjection { dates, slots }
    }
}

fn category_name(category: Option<&Category>) -> String {
    category
        .map(|category| category.name.clone())
        .unwrap_or_else(|| "Uncategorized".to_string())
}
