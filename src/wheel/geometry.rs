use std::{borrow::Cow, f64::consts::TAU, num::NonZeroUsize};

use ratatui::text::Span;

use super::{Choices, Color};

const ELLIPSIS: char = '…';

#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    pub index: usize,
    /// Start angle in the unrotated frame, clockwise from the pointer.
    pub start: f64,
    pub end: f64,
    pub color: Color,
    pub label: String,
    pub highlighted: bool,
}

impl Sector {
    pub fn middle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

pub fn sector_width(count: NonZeroUsize) -> f64 {
    TAU / count.get() as f64
}

/// The sectors of `choices` in the wheel's own frame. Rotation is applied
/// when drawing.
pub fn sectors(choices: &Choices, winner: Option<usize>) -> Vec<Sector> {
    let Some(count) = NonZeroUsize::new(choices.len()) else {
        return Vec::new();
    };
    let width = sector_width(count);
    choices
        .iter()
        .enumerate()
        .map(|(index, (label, color))| Sector {
            index,
            start: index as f64 * width,
            end: (index + 1) as f64 * width,
            color: *color,
            label: label.clone(),
            highlighted: winner == Some(index),
        })
        .collect()
}

/// Index of the sector that stops under the pointer after the wheel has
/// turned by `final_angle`.
pub fn winner_index(final_angle: f64, count: NonZeroUsize) -> usize {
    let r = final_angle.rem_euclid(TAU);
    let n = count.get();
    (((TAU - r) / TAU) * n as f64).floor() as usize % n
}

/// Index of the sector visible at `screen_angle` (clockwise from the pointer)
/// when the wheel is rotated by `angle`.
pub fn sector_at(screen_angle: f64, angle: f64, count: NonZeroUsize) -> usize {
    let local = (screen_angle - angle).rem_euclid(TAU);
    (local / sector_width(count)).floor() as usize % count.get()
}

/// Shortens `text` to at most `max_width` columns. A shortened label is the
/// longest prefix that still fits together with the ellipsis.
pub fn truncate_label(text: &str, max_width: usize) -> Cow<'_, str> {
    if width(text) <= max_width {
        return Cow::Borrowed(text);
    }
    let budget = max_width.saturating_sub(width(&ELLIPSIS.to_string()));
    let mut end = 0;
    for (i, c) in text.char_indices() {
        let next = i + c.len_utf8();
        if width(&text[..next]) > budget {
            break;
        }
        end = next;
    }
    Cow::Owned(format!("{}{ELLIPSIS}", &text[..end]))
}

pub fn width(text: &str) -> usize {
    Span::raw(text).width()
}
