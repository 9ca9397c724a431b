use std::borrow::Cow;

/// Canonicalizes line endings: every `\r\n` and every lone `\r` becomes `\n`.
///
/// No other byte is touched. Input without a carriage return is returned
/// borrowed.
pub fn normalize(bytes: &[u8]) -> Cow<'_, [u8]> {
    let Some(first) = memchr::memchr(b'\r', bytes) else {
        return Cow::Borrowed(bytes);
    };

    let mut out = Vec::with_capacity(bytes.len());
    out.extend_from_slice(&bytes[..first]);
    let mut start = first;
    while let Some(rel) = memchr::memchr(b'\r', &bytes[start..]) {
        let cr = start + rel;
        out.extend_from_slice(&bytes[start..cr]);
        out.push(b'\n');
        // CR LF collapses to a single LF
        start = if bytes.get(cr + 1) == Some(&b'\n') {
            cr + 2
        } else {
            cr + 1
        };
    }
    out.extend_from_slice(&bytes[start..]);
    Cow::Owned(out)
}

/// Byte equality of two buffers after line-ending normalization.
pub fn normalized_eq(a: &[u8], b: &[u8]) -> bool {
    normalize(a) == normalize(b)
}
