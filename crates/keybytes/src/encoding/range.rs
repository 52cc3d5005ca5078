//! Range bounds for prefix scans.

/// Returns the smallest key that sorts after every key starting with
/// `prefix`, for use as the exclusive end of a range scan.
///
/// Trailing `0xFF` bytes cannot be incremented and are dropped before the
/// last remaining byte is bumped. Returns `None` when the prefix is empty or
/// all `0xFF`: such a scan has no upper bound.
///
/// # Example
///
/// ```
/// use keybytes::encoding::range::prefix_end;
/// use keybytes::encoding::scalar::append_string;
///
/// let mut prefix = Vec::new();
/// append_string(&mut prefix, "tenant-a");
///
/// let end = prefix_end(&prefix).unwrap();
/// assert!(prefix < end);
/// assert_eq!(prefix_end(&[0x01, 0xFF]), Some(vec![0x02]));
/// assert_eq!(prefix_end(&[0xFF, 0xFF]), None);
/// ```
#[must_use]
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let last = prefix.iter().rposition(|&b| b != 0xFF)?;
    let mut end = prefix[..=last].to_vec();
    end[last] += 1;
    Some(end)
}
