/// Extract a recipe id from a location fragment such as `#47746`.
///
/// Returns `None` for an empty fragment.
pub fn recipe_id_from_fragment(fragment: &str) -> Option<String> {
    let id = fragment.trim().trim_start_matches('#').trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
