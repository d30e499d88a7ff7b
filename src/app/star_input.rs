use crate::domain::model::Rating;
use crate::utils::error::{Result, VenueError};

pub const STAR_COUNT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarSlot {
    Empty,
    Half,
    Full,
}

/// Five-star input with half-star resolution.
///
/// The state is a count of lit half stars (0..=10), so the slots are always a
/// run of full stars, at most one half star, then empty stars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarInput {
    half_steps: u8,
}

impl StarInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a tap on star `star` (1-based).
    ///
    /// Tapping a star selects it in full. Tapping the last full star again
    /// drops it to a half star, and a further tap makes it full again.
    pub fn tap(&mut self, star: u8) -> Result<()> {
        if !(1..=STAR_COUNT).contains(&star) {
            return Err(VenueError::ValidationError {
                message: format!("Star {} is outside 1..={}", star, STAR_COUNT),
            });
        }

        let full = star * 2;
        self.half_steps = if self.half_steps == full { full - 1 } else { full };
        Ok(())
    }

    pub fn clear(&mut self) {
        self.half_steps = 0;
    }

    /// The selected rating, or `None` when no star is lit.
    pub fn value(&self) -> Option<Rating> {
        if self.half_steps == 0 {
            return None;
        }
        Rating::from_half_steps(self.half_steps).ok()
    }

    pub fn slots(&self) -> [StarSlot; STAR_COUNT as usize] {
        let mut slots = [StarSlot::Empty; STAR_COUNT as usize];
        for (index, slot) in slots.iter_mut().enumerate() {
            let full_at = (index as u8 + 1) * 2;
            *slot = if self.half_steps >= full_at {
                StarSlot::Full
            } else if self.half_steps + 1 == full_at {
                StarSlot::Half
            } else {
                StarSlot::Empty
            };
        }
        slots
    }
}

impl From<Rating> for StarInput {
    fn from(rating: Rating) -> Self {
        Self {
            half_steps: rating.half_steps(),
        }
    }
}
