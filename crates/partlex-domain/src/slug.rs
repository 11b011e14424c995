//! Category-key slugification

/// Slugify a category label into a lookup key.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single hyphen and trims leading/trailing hyphens. This is the join
/// function between a target's category labels and an attribute's
/// `category_applicability` set.
///
/// # Examples
///
/// ```
/// use partlex_domain::slugify;
///
/// assert_eq!(slugify("Belysning / Blinkers"), "belysning-blinkers");
/// assert_eq!(slugify("Moped - MC"), "moped-mc");
/// ```
pub fn slugify(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_hyphen = false;

    for ch in label.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    out
}
