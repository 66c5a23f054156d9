//! CSS Identifiers — casing conversions between authored and configured names.
//! Spec: <https://www.w3.org/TR/CSS2/syndata.html#value-def-identifier>

/// Convert a dashed identifier into camel case.
///
/// `large-tablet` becomes `largeTablet`; identifiers without dashes are returned unchanged.
/// Empty segments (doubled dashes) are dropped.
pub fn camelize(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (index, segment) in ident.trim().split('-').enumerate() {
        if index == 0 {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Convert a camel-cased identifier into lowercase dashed form.
///
/// `largeTablet` becomes `large-tablet`. Already-dashed input is only lowercased.
pub fn kebab_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (index, letter) in ident.trim().char_indices() {
        if letter.is_ascii_uppercase() {
            if index > 0 && !out.ends_with('-') {
                out.push('-');
            }
            out.push(letter.to_ascii_lowercase());
        } else {
            out.push(letter);
        }
    }
    out
}
