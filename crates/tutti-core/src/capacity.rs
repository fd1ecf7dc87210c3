//! Growing a section's rows to fit its members.

/// Row length appended when a section has no usable last row.
pub const DEFAULT_ROW_LENGTH: u32 = 5;

/// Return row lengths whose total is at least `member_count`.
///
/// Missing capacity is added as extra rows copying the last row's length,
/// or [`DEFAULT_ROW_LENGTH`] when there are no rows or the last one is empty.
pub fn ensure_enough_seats(row_settings: &[u32], member_count: usize) -> Vec<u32> {
    let mut rows = row_settings.to_vec();
    let mut capacity: usize = rows.iter().map(|&n| n as usize).sum();

    while capacity < member_count {
        let length = match rows.last() {
            Some(&last) if last > 0 => last,
            _ => DEFAULT_ROW_LENGTH,
        };
        rows.push(length);
        capacity += length as usize;
    }

    rows
}
