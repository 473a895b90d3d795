//! Occupancy - Bounded guest and room counters for booking searches

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

pub const MIN_ADULTS: u8 = 1;
pub const MAX_ADULTS: u8 = 10;
pub const MAX_CHILDREN: u8 = 6;
pub const MIN_ROOMS: u8 = 1;
pub const MAX_ROOMS: u8 = 5;

/// Guests and rooms. Every room needs at least one adult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOccupancy")]
pub struct Occupancy {
    adults: u8,
    children: u8,
    rooms: u8,
}

impl Occupancy {
    pub fn new(adults: u8, children: u8, rooms: u8) -> Result<Self, DomainError> {
        if !(MIN_ADULTS..=MAX_ADULTS).contains(&adults) {
            return Err(DomainError::Validation(format!(
                "adults must be between {} and {}, got {}",
                MIN_ADULTS, MAX_ADULTS, adults
            )));
        }
        if children > MAX_CHILDREN {
            return Err(DomainError::Validation(format!(
                "children must be at most {}, got {}",
                MAX_CHILDREN, children
            )));
        }
        if !(MIN_ROOMS..=MAX_ROOMS).contains(&rooms) {
            return Err(DomainError::Validation(format!(
                "rooms must be between {} and {}, got {}",
                MIN_ROOMS, MAX_ROOMS, rooms
            )));
        }
        if rooms > adults {
            return Err(DomainError::Validation(format!(
                "{} rooms need at least {} adults",
                rooms, rooms
            )));
        }

        Ok(Self {
            adults,
            children,
            rooms,
        })
    }

    pub fn adults(&self) -> u8 {
        self.adults
    }

    pub fn children(&self) -> u8 {
        self.children
    }

    pub fn rooms(&self) -> u8 {
        self.rooms
    }

    pub fn guests(&self) -> u8 {
        self.adults + self.children
    }

    // Each counter saturates at its bounds and reports whether it moved.

    pub fn increment_adults(&mut self) -> bool {
        step_up(&mut self.adults, MAX_ADULTS)
    }

    /// Dropping below the room count takes a room away too
    pub fn decrement_adults(&mut self) -> bool {
        let changed = step_down(&mut self.adults, MIN_ADULTS);
        if self.rooms > self.adults {
            self.rooms = self.adults;
        }
        changed
    }

    pub fn increment_children(&mut self) -> bool {
        step_up(&mut self.children, MAX_CHILDREN)
    }

    pub fn decrement_children(&mut self) -> bool {
        step_down(&mut self.children, 0)
    }

    pub fn increment_rooms(&mut self) -> bool {
        step_up(&mut self.rooms, MAX_ROOMS.min(self.adults))
    }

    pub fn decrement_rooms(&mut self) -> bool {
        step_down(&mut self.rooms, MIN_ROOMS)
    }
}

/// Unchecked wire form; deserialization goes through `Occupancy::new`
#[derive(Deserialize)]
struct RawOccupancy {
    adults: u8,
    children: u8,
    rooms: u8,
}

impl TryFrom<RawOccupancy> for Occupancy {
    type Error = DomainError;

    fn try_from(raw: RawOccupancy) -> Result<Self, Self::Error> {
        Occupancy::new(raw.adults, raw.children, raw.rooms)
    }
}

impl Default for Occupancy {
    fn default() -> Self {
        Self {
            adults: 2,
            children: 0,
            rooms: 1,
        }
    }
}

fn step_up(value: &mut u8, max: u8) -> bool {
    if *value >= max {
        return false;
    }
    *value += 1;
    true
}

fn step_down(value: &mut u8, min: u8) -> bool {
    if *value <= min {
        return false;
    }
    *value -= 1;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_occupancy() {
        let occupancy = Occupancy::default();
        assert_eq!(occupancy.adults(), 2);
        assert_eq!(occupancy.children(), 0);
        assert_eq!(occupancy.rooms(), 1);
        assert_eq!(occupancy.guests(), 2);
    }

    #[test]
    fn test_counters_saturate() {
        let mut occupancy = Occupancy::new(1, 0, 1).unwrap();
        assert!(!occupancy.decrement_adults());
        assert!(!occupancy.decrement_children());
        assert!(!occupancy.decrement_rooms());
        assert_eq!(occupancy.adults(), 1);

        let mut occupancy = Occupancy::new(MAX_ADULTS, MAX_CHILDREN, MAX_ROOMS).unwrap();
        assert!(!occupancy.increment_adults());
        assert!(!occupancy.increment_children());
        assert!(!occupancy.increment_rooms());
    }

    #[test]
    fn test_rooms_never_exceed_adults() {
        let mut occupancy = Occupancy::new(2, 0, 2).unwrap();
        assert!(!occupancy.increment_rooms());

        assert!(occupancy.decrement_adults());
        assert_eq!(occupancy.adults(), 1);
        assert_eq!(occupancy.rooms(), 1);
    }

    #[test]
    fn test_deserialize_checks_bounds() {
        let occupancy: Occupancy =
            serde_json::from_str(r#"{"adults":3,"children":1,"rooms":2}"#).unwrap();
        assert_eq!(occupancy, Occupancy::new(3, 1, 2).unwrap());

        assert!(serde_json::from_str::<Occupancy>(r#"{"adults":1,"children":0,"rooms":4}"#).is_err());
        assert!(serde_json::from_str::<Occupancy>(r#"{"adults":0,"children":0,"rooms":1}"#).is_err());
    }

    #[test]
    fn test_new_rejects_out_of_bounds() {
        assert!(matches!(
            Occupancy::new(0, 0, 1),
            Err(DomainError::Validation(_))
        ));
        assert!(Occupancy::new(2, MAX_CHILDREN + 1, 1).is_err());
        assert!(Occupancy::new(2, 0, 0).is_err());
        assert!(Occupancy::new(2, 0, 3).is_err());
    }
}
