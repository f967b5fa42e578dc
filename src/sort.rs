//! Sort direction state for the two sortable bar charts.
//!
//! Each metric has its own two-state machine. Both start out descending and
//! only change through [`SortState::toggle`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Quantity,
    Revenue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    /// Caption for the sort control ("Sort Ascending" / "Sort Descending").
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Ascending => "Sort Ascending",
            Self::Descending => "Sort Descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    quantity: SortDirection,
    revenue: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self, metric: Metric) -> SortDirection {
        match metric {
            Metric::Quantity => self.quantity,
            Metric::Revenue => self.revenue,
        }
    }

    /// Flip the direction for `metric` and return the new direction.
    pub fn toggle(&mut self, metric: Metric) -> SortDirection {
        let slot = match metric {
            Metric::Quantity => &mut self.quantity,
            Metric::Revenue => &mut self.revenue,
        };
        let direction = slot.toggled();
        *slot = direction;
        tracing::debug!(?metric, %direction, "sort direction toggled");
        direction
    }
}
