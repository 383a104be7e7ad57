//! Case folding shared by pattern compilation and lookup.

/// Append the lower-case UTF-8 form of `input` to `out`.
///
/// ASCII bytes take a fast path. Other characters map to exactly one
/// character: the first of their Unicode lower-case form, so `İ` folds to `i`
/// rather than `i` plus a combining dot.
pub fn fold_case_into(input: &str, out: &mut Vec<u8>) {
    if input.is_ascii() {
        out.extend(input.bytes().map(|b| b.to_ascii_lowercase()));
        return;
    }

    let mut utf8 = [0u8; 4];
    for c in input.chars() {
        let lower = c.to_lowercase().next().unwrap_or(c);
        out.extend_from_slice(lower.encode_utf8(&mut utf8).as_bytes());
    }
}

/// Owned lower-case form of `input`.
pub fn fold_case(input: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    fold_case_into(input, &mut out);
    out
}
