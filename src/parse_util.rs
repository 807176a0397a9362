/// Takes the next character from the slice. If none is found, the slice is left as-is.
pub const fn take_1(bytes: &[u8]) -> (Option<u8>, &[u8]) {
    let [b, bytes @ ..] = bytes else {
        return (None, bytes);
    };

    (Some(*b), bytes)
}

/// Like `take_1`, but doesn't consume the token
pub fn peek_1(bytes: &[u8]) -> Option<u8> {
    let [b, _bytes @ ..] = bytes else { return None };

    Some(*b)
}

/// Takes an optional sign. Returns `true` if the sign was `-`.
pub fn take_sign(bytes: &[u8]) -> (bool, &[u8]) {
    match peek_1(bytes) {
        Some(b'-') => (true, take_1(bytes).1),
        Some(b'+') => (false, take_1(bytes).1),
        _ => (false, bytes),
    }
}

/// Takes a `0x` or `0X` prefix, if there is one.
pub fn take_hex_prefix(bytes: &[u8]) -> (bool, &[u8]) {
    match bytes.strip_prefix(b"0x").or_else(|| bytes.strip_prefix(b"0X")) {
        Some(rest) => (true, rest),
        None => (false, bytes),
    }
}

/// Advance the slice for as long as `P` holds. Returns `None` if not even the first byte
/// satisfies `P`, in which case `bytes` is left as-is.
pub fn take_while_fn<P>(p: P, bytes: &[u8]) -> (Option<&[u8]>, &[u8])
where
    P: Fn(u8) -> bool,
{
    let i = bytes.iter().position(|&b| !p(b)).unwrap_or(bytes.len());

    if i == 0 {
        return (None, bytes);
    }

    let (res, bytes) = bytes.split_at(i);

    (Some(res), bytes)
}

/// Value of a run of digits in `radix`, saturating at `i64::MAX`.
///
/// Every byte is expected to be a valid digit for `radix`.
pub fn digits_value(digits: &[u8], radix: u32) -> i64 {
    digits.iter().fold(0i64, |n, &b| {
        let d = (b as char).to_digit(radix).unwrap_or(0) as i64;

        n.saturating_mul(radix as i64).saturating_add(d)
    })
}
