//! Scrolling marquee of upcoming holidays.

use holiday_core::UpcomingHoliday;

const SEPARATOR: &str = "   ✦   ";

/// One loop of ticker text, ending in a separator so it can repeat seamlessly.
pub fn ticker_text(upcoming: &[UpcomingHoliday]) -> String {
    if upcoming.is_empty() {
        return format!("No more holidays this year{}", SEPARATOR);
    }

    upcoming
        .iter()
        .map(|h| format!("{} {}: {} ({}){}", h.emoji, h.country, h.name, h.days_label(), SEPARATOR))
        .collect()
}

/// `width` characters of `text` starting at `offset`, wrapping around.
pub fn window(text: &str, offset: usize, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    let start = offset % chars.len();
    chars.iter().cycle().skip(start).take(width).collect()
}
