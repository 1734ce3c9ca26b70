//! Visibility state machine for items.
//!
//! ```text
//!            soft_delete
//!   Active ──────────────▶ Deleted
//!          ◀──────────────
//!              restore
//! ```
//!
//! Both storage backends run these guards inside their atomic unit.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{ItemError, ItemResult};
use crate::models::Item;

/// Which partition of the catalog an item (or a listing) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Visibility {
    Active,
    Deleted,
}

impl Visibility {
    pub fn of(item: &Item) -> Self {
        if item.is_deleted {
            Visibility::Deleted
        } else {
            Visibility::Active
        }
    }

    pub fn is_deleted(self) -> bool {
        matches!(self, Visibility::Deleted)
    }

    pub fn contains(self, item: &Item) -> bool {
        Visibility::of(item) == self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Transition {
    SoftDelete,
    Restore,
}

impl Transition {
    /// Check the transition against the item's current state and flip the flag.
    ///
    /// The item is left untouched on error.
    pub fn apply(self, item: &mut Item) -> ItemResult<()> {
        match (self, Visibility::of(item)) {
            (Transition::SoftDelete, Visibility::Active) => item.is_deleted = true,
            (Transition::SoftDelete, Visibility::Deleted) => {
                return Err(ItemError::NotFound(item.id));
            }
            (Transition::Restore, Visibility::Deleted) => item.is_deleted = false,
            (Transition::Restore, Visibility::Active) => {
                return Err(ItemError::NotDeleted(item.id));
            }
        }
        Ok(())
    }

    /// Visibility the item has after a successful transition
    pub fn target(self) -> Visibility {
        match self {
            Transition::SoftDelete => Visibility::Deleted,
            Transition::Restore => Visibility::Active,
        }
    }
}

/// Deleted items are invisible to reads and updates
pub fn ensure_active(item: &Item) -> ItemResult<()> {
    if item.is_deleted {
        return Err(ItemError::NotFound(item.id));
    }
    Ok(())
}
