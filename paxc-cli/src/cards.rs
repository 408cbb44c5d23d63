//! Plain-text rendering of time slot cards.

use paxc_types::{bar_fill, format_time_slot};

use crate::controller::SlotCard;

const BAR_WIDTH: usize = 20;

/// Formats a count with thousands separators.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut ret = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        ret.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            ret.push(',');
        }
        ret.push(c);
    }
    ret
}

pub fn render_bar(count: i64) -> String {
    let filled = (bar_fill(count) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// One line per card: time, count, bar, and how busy it is.
pub fn render_card(card: &SlotCard) -> String {
    format!("{:<12} {:>7} [{}] {}",
            format_time_slot(&card.time_slot),
            group_thousands(card.count),
            render_bar(card.count),
            card.level.label())
}
