//! Search criteria composed into a single filter for [`TodoStore::list`].
//!
//! [`TodoStore::list`]: crate::store::TodoStore::list

use chrono::{DateTime, Utc};

use crate::item::Item;

/// One constraint on the items returned by a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
  /// Case-sensitive substring of `todo`.
  TitleContains(String),
  PriorityEquals(i32),
  /// Exact instant, not a range.
  DueDateEquals(DateTime<Utc>),
}

impl Criterion {
  pub fn matches(&self, item: &Item) -> bool {
    match self {
      Self::TitleContains(needle) => item.todo.contains(needle.as_str()),
      Self::PriorityEquals(p) => item.priority == *p,
      Self::DueDateEquals(d) => item.due_date == Some(*d),
    }
  }
}

/// The conjunction of zero or more [`Criterion`]s.
///
/// An empty filter matches every item. There is no OR and no negation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
  criteria: Vec<Criterion>,
}

impl ItemFilter {
  pub fn criteria(&self) -> &[Criterion] { &self.criteria }

  pub fn is_empty(&self) -> bool { self.criteria.is_empty() }

  /// Reference semantics for stores: every criterion must hold.
  pub fn matches(&self, item: &Item) -> bool {
    self.criteria.iter().all(|c| c.matches(item))
  }
}

/// Build a filter from independently optional search parameters.
///
/// An empty `title` counts as not supplied.
pub fn compose_filter(
  title: Option<&str>,
  priority: Option<i32>,
  due_date: Option<DateTime<Utc>>,
) -> ItemFilter {
  let mut criteria = Vec::with_capacity(3);

  if let Some(t) = title.filter(|t| !t.is_empty()) {
    criteria.push(Criterion::TitleContains(t.to_owned()));
  }
  if let Some(p) = priority {
    criteria.push(Criterion::PriorityEquals(p));
  }
  if let Some(d) = due_date {
    criteria.push(Criterion::DueDateEquals(d));
  }

  ItemFilter { criteria }
}
