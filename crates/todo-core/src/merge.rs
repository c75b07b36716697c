//! Field-by-field merge of an [`ItemPatch`] onto a stored [`Item`].

use crate::item::{Item, ItemPatch};

/// Moves each listed patch field onto the target when it is present.
///
/// `required` fields hold a plain value on [`Item`]; `optional` fields hold an
/// `Option` on both sides; `skip` fields are never copied. The expansion
/// destructures the patch without `..`, so a field added to [`ItemPatch`] but
/// missing from these lists is a compile error.
macro_rules! merge_fields {
  (
    $target:ident <- $patch:expr;
    skip: [$($skip:ident),* $(,)?];
    required: [$($req:ident),* $(,)?];
    optional: [$($opt:ident),* $(,)?] $(;)?
  ) => {{
    let ItemPatch { $($skip: _,)* $($req,)* $($opt,)* } = $patch;
    $(
      if let Some(value) = $req {
        $target.$req = value;
      }
    )*
    $(
      if let Some(value) = $opt {
        $target.$opt = Some(value);
      }
    )*
  }};
}

/// Apply `patch` to `existing`, returning the merged record.
///
/// Presence is decided per field, never by truthiness. The identifier always
/// comes from `existing`. No value is validated. Persisting the result is the
/// caller's job.
pub fn merge(existing: Item, patch: ItemPatch) -> Item {
  let mut merged = existing;

  merge_fields! {
    merged <- patch;
    skip: [id];
    required: [todo, completed, user_id, priority];
    optional: [
      due_date,
      latitude,
      longitude,
      weather_condition,
      temperature,
      category_id,
      category,
    ];
  }

  merged
}
