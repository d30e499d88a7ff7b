// Helpers the screens share: search, rating input, review drafts, formatting.

pub mod display;
pub mod review_draft;
pub mod search;
pub mod star_input;
