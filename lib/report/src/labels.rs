use surrosel_core::SelectionSet;

/// Label given to entities no selection picked
pub const UNSELECTED_LABEL: &str = "none";

/// Per-entity label naming every selection that picked it
///
/// Labels are sorted and joined with `&` (e.g. `hierarchical&user`), used to
/// colour a projection plot.
pub fn surrogate_labels(selections: &SelectionSet, population_len: usize) -> Vec<String> {
    let mut picked: Vec<Vec<&str>> = vec![Vec::new(); population_len];
    for (label, selection) in selections {
        for index in selection.subset.iter() {
            if let Some(entry) = picked.get_mut(index) {
                entry.push(label.as_str());
            }
        }
    }

    picked
        .into_iter()
        .map(|mut names| {
            if names.is_empty() {
                UNSELECTED_LABEL.to_string()
            } else {
                names.sort_unstable();
                names.join("&")
            }
        })
        .collect()
}
