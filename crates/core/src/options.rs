//! Selectable filter values shown by the filter panel.

use serde::Serialize;

/// One selectable value of a filter, with its display label.
///
/// The empty `value` is the "no filter" entry of each list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// All option lists, grouped the way the filter panel renders them.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub franchises: &'static [FilterOption],
    pub roles: &'static [FilterOption],
    pub eras: &'static [FilterOption],
}

impl FilterOptions {
    pub fn all() -> Self {
        Self {
            franchises: crate::franchise::FRANCHISE_OPTIONS,
            roles: crate::role::ROLE_OPTIONS,
            eras: crate::era::ERA_OPTIONS,
        }
    }
}

pub(crate) const fn option(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption { value, label }
}
