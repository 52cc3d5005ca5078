//! NUL escaping for self-delimiting string payloads.
//!
//! Every `0x00` in the data is written as `0x00 0xFF` and the payload ends
//! with a lone `0x00`. A terminator (`0x00` followed by anything but `0xFF`)
//! sorts below an escaped NUL, which sorts below any other continuation, so
//! a string always sorts before every longer string it is a prefix of:
//!
//! ```text
//! ""      -> 00
//! "\0"    -> 00 FF 00
//! "a"     -> 61 00
//! ```

use std::borrow::Cow;

use crate::error::KeyError;

const NUL: u8 = 0x00;
const ESCAPE: u8 = 0xFF;

/// Appends `data` to `dst` with NULs escaped and a trailing terminator.
pub(crate) fn escape_into(dst: &mut Vec<u8>, data: &[u8]) {
    dst.reserve(escaped_len(data));
    let mut parts = data.split(|&b| b == NUL);
    if let Some(first) = parts.next() {
        dst.extend_from_slice(first);
    }
    for part in parts {
        dst.extend_from_slice(&[NUL, ESCAPE]);
        dst.extend_from_slice(part);
    }
    dst.push(NUL);
}

/// Number of bytes [`escape_into`] writes for `data`.
#[must_use]
pub(crate) fn escaped_len(data: &[u8]) -> usize {
    data.len() + data.iter().filter(|&&b| b == NUL).count() + 1
}

/// Reads an escaped payload from the front of `src`.
///
/// Returns the unescaped bytes and the input after the terminator. The
/// payload is borrowed from `src` when it contains no escaped NULs.
///
/// # Errors
///
/// Returns [`KeyError::UnexpectedEndOfInput`] when `src` ends before an
/// unescaped terminator.
pub(crate) fn unescape(src: &[u8]) -> Result<(Cow<'_, [u8]>, &[u8]), KeyError> {
    let mut owned: Option<Vec<u8>> = None;
    let mut start = 0;
    loop {
        let Some(offset) = src[start..].iter().position(|&b| b == NUL) else {
            return Err(KeyError::UnexpectedEndOfInput);
        };
        let i = start + offset;

        if src.get(i + 1) == Some(&ESCAPE) {
            // Keep the NUL itself, drop the escape byte.
            owned.get_or_insert_with(Vec::new).extend_from_slice(&src[start..=i]);
            start = i + 2;
            continue;
        }

        let rest = &src[i + 1..];
        let value = match owned {
            None => Cow::Borrowed(&src[..i]),
            Some(mut buf) => {
                buf.extend_from_slice(&src[start..i]);
                Cow::Owned(buf)
            }
        };
        return Ok((value, rest));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn escaped(data: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        escape_into(&mut buf, data);
        buf
    }

    #[test]
    fn escape_known_forms() {
        assert_eq!(escaped(b""), [0x00]);
        assert_eq!(escaped(b"foo"), b"foo\x00");
        assert_eq!(escaped(b"\x00"), [0x00, 0xFF, 0x00]);
        assert_eq!(escaped(b"\x00\x00"), [0x00, 0xFF, 0x00, 0xFF, 0x00]);
        assert_eq!(escaped(b"a\x00b"), [b'a', 0x00, 0xFF, b'b', 0x00]);
        assert_eq!(escaped(b"\xff"), [0xFF, 0x00]);
    }

    #[test]
    fn escaped_len_matches_output() {
        for data in [&b""[..], b"abc", b"\x00", b"\x00\xff\x00", b"x\x00\x00y"] {
            assert_eq!(escaped_len(data), escaped(data).len(), "for {data:?}");
        }
    }

    #[test]
    fn unescape_borrows_without_escapes() {
        let (value, rest) = unescape(b"foo\x00tail").unwrap();
        assert!(matches!(value, Cow::Borrowed(_)));
        assert_eq!(&*value, b"foo");
        assert_eq!(rest, b"tail");
    }

    #[test]
    fn unescape_embedded_nuls() {
        for data in [&b"\x00"[..], b"\x00\x00", b"\x00\xff", b"\xff", b"\x00\x00\xff\xff", b"f\x00\x00oo"] {
            let mut buf = escaped(data);
            buf.extend_from_slice(b"rest");
            let (value, rest) = unescape(&buf).unwrap();
            assert_eq!(&*value, data);
            assert_eq!(rest, b"rest");
        }
    }

    #[test]
    fn unescape_missing_terminator() {
        assert_eq!(unescape(b""), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(unescape(b"foo"), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(unescape(b"\x00\xffa"), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(unescape(b"\x00\xff"), Err(KeyError::UnexpectedEndOfInput));
    }

    #[test]
    fn prefix_sorts_first() {
        let ordered: [&[u8]; 6] = [b"", b"\x00", b"\x00\x00", b"\x00a", b"a", b"a\x00"];
        for pair in ordered.windows(2) {
            assert!(escaped(pair[0]) < escaped(pair[1]), "{:?} !< {:?}", pair[0], pair[1]);
        }
    }
}
