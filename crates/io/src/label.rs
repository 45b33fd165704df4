//! Spreadsheet-style vertex labels.

/// Returns the bijective base-26 label of a 1-based index.
///
/// `1 -> "A"`, `26 -> "Z"`, `27 -> "AA"`, `702 -> "ZZ"`, `703 -> "AAA"`.
/// Index 0 has no label and yields an empty string.
pub fn vertex_label(index: usize) -> String {
    let mut n = index;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
