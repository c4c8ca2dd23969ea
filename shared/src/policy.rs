//! Role capability table for grid cells.
//!
//! Capabilities are advisory: they decide which controls render and which
//! clicks open a modal. The server still enforces its own rules.

use crate::grid::CellState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn from_is_admin(is_admin: bool) -> Self {
        if is_admin {
            Role::Admin
        } else {
            Role::User
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Capability {
    Allowed,
    #[default]
    Denied,
}

impl Capability {
    pub const fn from_bool(allowed: bool) -> Self {
        if allowed {
            Capability::Allowed
        } else {
            Capability::Denied
        }
    }

    pub const fn is_allowed(self) -> bool {
        matches!(self, Capability::Allowed)
    }
}

/// What the current user may do with one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellCapabilities {
    pub can_assign: Capability,
    pub can_change: Capability,
    pub can_delete: Capability,
    pub can_book: Capability,
}

impl CellCapabilities {
    pub const NONE: Self = Self {
        can_assign: Capability::Denied,
        can_change: Capability::Denied,
        can_delete: Capability::Denied,
        can_book: Capability::Denied,
    };

    pub fn is_actionable(&self) -> bool {
        self.can_assign.is_allowed()
            || self.can_change.is_allowed()
            || self.can_delete.is_allowed()
            || self.can_book.is_allowed()
    }

    /// Assign and change share one modal and one endpoint
    pub fn can_edit_category(&self) -> bool {
        self.can_assign.is_allowed() || self.can_change.is_allowed()
    }
}

/// Look up the capabilities of `role` on a cell in `state`.
///
/// | state          | admin            | user |
/// |----------------|------------------|------|
/// | past           | none             | none |
/// | unconfigured   | assign           | none |
/// | available      | change, delete   | book |
/// | booked         | none             | none |
pub fn cell_capabilities(role: Role, state: &CellState, is_past: bool) -> CellCapabilities {
    if is_past {
        return CellCapabilities::NONE;
    }

    match (role, state) {
        (Role::Admin, CellState::Unconfigured) => CellCapabilities {
            can_assign: Capability::Allowed,
            ..CellCapabilities::NONE
        },
        (Role::Admin, CellState::Available { .. }) => CellCapabilities {
            can_change: Capability::Allowed,
            can_delete: Capability::Allowed,
            ..CellCapabilities::NONE
        },
        (Role::User, CellState::Available { category }) => CellCapabilities {
            can_book: Capability::from_bool(category.is_some()),
            ..CellCapabilities::NONE
        },
        (_, CellState::Booked { .. }) | (Role::User, CellState::Unconfigured) => {
            CellCapabilities::NONE
        }
    }
}
