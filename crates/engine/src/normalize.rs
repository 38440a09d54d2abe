/// Folds text into the canonical comparable form: lower-cased, every
/// non-alphanumeric character replaced by a space, whitespace runs collapsed,
/// leading and trailing space trimmed. Queries and catalog patterns go
/// through the same fold before scoring.
pub fn normalize(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for ch in text.chars() {
        for lower in ch.to_lowercase() {
            if lower.is_alphanumeric() {
                folded.push(lower);
            } else {
                folded.push(' ');
            }
        }
    }
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
