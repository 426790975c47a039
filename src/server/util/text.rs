//! Text cleanup for values copied out of EVE API payloads.

/// Removes markup tags from a string, keeping the text between them.
///
/// Corporation titles may carry EVE client formatting such as `<color=0xff00ff00>Director</color>`.
/// Anything from `<` to the next `>` is dropped; an unterminated `<` is kept as text.
pub fn strip_tags(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find('<') {
        match rest[start..].find('>') {
            Some(end) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + end + 1..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out.trim().to_string()
}
