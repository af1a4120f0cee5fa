use std::collections::HashSet;

use hearth_core::Entity;

/// Remove every record whose id is in `ids`. Returns whether anything was removed.
pub(crate) fn remove_by_ids<T: Entity>(items: &mut Vec<T>, ids: &HashSet<T::Id>) -> bool {
    let before = items.len();
    items.retain(|item| !ids.contains(item.id()));
    items.len() != before
}
