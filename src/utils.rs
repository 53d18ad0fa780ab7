//! Text folding helpers shared by the vocabulary normalizer.

/// Lowercase a claimed vaccine name, trim it, and collapse whitespace runs
/// into single spaces. All vocabulary lookups compare folded forms.
pub fn fold_name<T: AsRef<str>>(text: T) -> String {
    let mut folded = String::new();
    let mut pending_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            pending_space = !folded.is_empty();
        } else {
            if pending_space {
                folded.push(' ');
                pending_space = false;
            }
            folded.extend(ch.to_lowercase());
        }
    }
    folded
}
