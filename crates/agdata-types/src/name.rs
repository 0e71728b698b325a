use crate::error::TypeError;

/// Returns `true` if `name` is empty or consists only of whitespace.
pub fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

/// Check that a record name may be persisted.
///
/// A name is valid when it contains at least one non-whitespace character.
/// Names are otherwise taken verbatim: no trimming, no case folding.
pub fn validate_name(name: &str) -> Result<(), TypeError> {
    if is_blank(name) {
        return Err(TypeError::BlankName);
    }
    Ok(())
}
