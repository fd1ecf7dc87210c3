//! Seat label text rules.
//!
//! Every output format goes through these functions so exported charts
//! wrap and place names exactly like the editor preview.

use tutti_core::options::SeatLabelStyle;

/// Label font size relative to the seat size.
pub const FONT_SCALE: f32 = 0.375;

/// Average glyph advance relative to the font size.
pub const GLYPH_WIDTH: f32 = 0.6;

/// Baseline-to-baseline distance relative to the font size.
pub const LINE_HEIGHT: f32 = 1.2;

/// Maximum number of wrapped lines for full names.
pub const MAX_LINES: usize = 3;

const ELLIPSIS: char = '…';

/// Label font size for a seat of `seat_size` pixels.
pub fn font_size(seat_size: f32) -> f32 {
    seat_size * FONT_SCALE
}

/// Characters that fit on one line of a label, never fewer than four.
pub fn max_line_chars(seat_size: f32, font_size: f32) -> usize {
    let fit = (seat_size * 1.6 / (font_size * GLYPH_WIDTH)).floor();
    if fit.is_finite() && fit > 4.0 {
        fit as usize
    } else {
        4
    }
}

/// Uppercased first letters of up to three name parts.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(3)
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Word-wrap `name` into at most [`MAX_LINES`] lines of `max_chars` characters.
///
/// Words longer than a line are broken. When the name does not fit, the
/// last line ends with an ellipsis.
pub fn wrap_name(name: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in name.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() <= max_chars {
            current.push(' ');
            current.extend(word.iter());
            continue;
        }
        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
        }

        while word.len() > max_chars {
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        current = word.into_iter().collect();
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > MAX_LINES {
        lines.truncate(MAX_LINES);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            chars.truncate(max_chars.saturating_sub(1));
            while chars.last() == Some(&' ') {
                chars.pop();
            }
            chars.push(ELLIPSIS);
            *last = chars.into_iter().collect();
        }
    }

    lines
}

/// Label lines for a member name in the given style.
pub fn label_lines(name: &str, style: SeatLabelStyle, seat_size: f32) -> Vec<String> {
    match style {
        SeatLabelStyle::Initials => {
            let initials = initials(name);
            if initials.is_empty() {
                Vec::new()
            } else {
                vec![initials]
            }
        }
        SeatLabelStyle::Full => wrap_name(name, max_line_chars(seat_size, font_size(seat_size))),
    }
}

/// Estimated `(width, height)` of a text block.
pub fn text_extent(lines: &[String], font_size: f32) -> (f32, f32) {
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    (
        longest as f32 * font_size * GLYPH_WIDTH,
        lines.len() as f32 * font_size * LINE_HEIGHT,
    )
}

/// Move a label centre so its text block stays inside the canvas.
pub fn clamp_label_center(
    center: (f32, f32),
    extent: (f32, f32),
    canvas: (f32, f32),
) -> (f32, f32) {
    (
        clamp_axis(center.0, extent.0 / 2.0, canvas.0),
        clamp_axis(center.1, extent.1 / 2.0, canvas.1),
    )
}

fn clamp_axis(center: f32, half: f32, length: f32) -> f32 {
    if half * 2.0 >= length {
        length / 2.0
    } else {
        center.clamp(half, length - half)
    }
}
