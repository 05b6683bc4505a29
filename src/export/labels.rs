//! Table letters, seat position labels and sheet column codes.

/// Base-26 letter code for a 0-based index: `A … Z, AA, AB, …`.
///
/// Used both for table labels and for spreadsheet column references.
pub fn letter_code(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        // rem < 26, so the sum stays inside 'A'..='Z'
        #[allow(clippy::cast_possible_truncation)]
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Inverse of [`letter_code`]; `None` if `code` is empty or not all letters.
pub fn letter_index(code: &str) -> Option<usize> {
    if code.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for ch in code.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = usize::from(ch.to_ascii_uppercase() as u8 - b'A') + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    Some(n - 1)
}

/// Label of a seat within its table.
///
/// One seat is just "Seat"; two are "Left"/"Right"; three add "Middle";
/// larger tables number their seats from 1.
pub fn seat_label(seats_per_table: usize, seat: usize) -> String {
    match (seats_per_table, seat) {
        (1, _) => "Seat".to_string(),
        (2, 0) | (3, 0) => "Left".to_string(),
        (2, _) | (3, 2) => "Right".to_string(),
        (3, _) => "Middle".to_string(),
        (_, k) => format!("Seat {}", k + 1),
    }
}

/// A1-style cell reference for 0-based coordinates.
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", letter_code(col), row + 1)
}

/// Splits an A1-style reference into 0-based `(row, col)`.
pub fn parse_cell_ref(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    let col = letter_index(letters)?;
    let row = digits.parse::<usize>().ok()?.checked_sub(1)?;
    Some((row, col))
}
