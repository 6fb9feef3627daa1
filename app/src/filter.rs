//! Client-side view over the cached rows.
//!
//! Both selectors must match; list order is preserved. Nothing here touches
//! state, so the view is recomputed on every render.

use crate::types::{Category, Todo};
use std::str::FromStr;

/// Completion selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every row
    #[default]
    All,
    /// Rows not yet completed
    Active,
    /// Completed rows
    Completed,
}

impl StatusFilter {
    /// Whether `todo` passes
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown status '{other}' (expected all, active or completed)")),
        }
    }
}

/// Category selector
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,
    /// Exactly this category
    Only(Category),
}

impl CategoryFilter {
    /// Whether `todo` passes
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => &todo.category == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        match value.as_str() {
            "" => Err("category filter needs a value".to_string()),
            "all" => Ok(Self::All),
            _ => Ok(Self::Only(Category::from(value))),
        }
    }
}

/// Both selectors together
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Completion selector
    pub status: StatusFilter,
    /// Category selector
    pub category: CategoryFilter,
}

impl TodoFilter {
    /// Whether `todo` passes both selectors
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        self.status.matches(todo) && self.category.matches(todo)
    }
}

/// Rows passing `filter`, in their original order
#[must_use]
pub fn visible<'a>(todos: &'a [Todo], filter: &TodoFilter) -> Vec<&'a Todo> {
    todos.iter().filter(|todo| filter.matches(todo)).collect()
}

/// Totals shown under the list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    /// All rows
    pub total: usize,
    /// Not completed
    pub active: usize,
    /// Completed
    pub completed: usize,
}

/// Count rows by completion
#[must_use]
pub fn counts(todos: &[Todo]) -> Counts {
    let completed = todos.iter().filter(|todo| todo.completed).count();
    Counts {
        total: todos.len(),
        active: todos.len() - completed,
        completed,
    }
}
