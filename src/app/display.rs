use crate::app::star_input::{StarInput, StarSlot};
use crate::core::aggregate::ReviewSummary;
use crate::domain::model::Rating;

/// Average rating rounded to one decimal, or `N/A` for a venue without reviews.
pub fn format_average(summary: &ReviewSummary) -> String {
    if summary.is_empty() {
        return "N/A".to_string();
    }
    format!("{:.1}", summary.average_rating)
}

pub fn star_glyphs(rating: Rating) -> String {
    StarInput::from(rating)
        .slots()
        .iter()
        .map(|slot| match slot {
            StarSlot::Full => '★',
            StarSlot::Half => '⯨',
            StarSlot::Empty => '☆',
        })
        .collect()
}
