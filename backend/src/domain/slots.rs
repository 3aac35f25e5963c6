//! Offered mentoring slots.
//!
//! A slot is a UTC instant. Mentors offer an ordered, duplicate-free set of
//! slots; every slot is truncated to the whole minute when it enters the set
//! so that two picks of the same calendar minute collapse into one.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::Error;

/// A bookable UTC instant.
pub type Slot = DateTime<Utc>;

/// Truncate a slot to the start of its minute.
pub fn normalise_slot(slot: Slot) -> Slot {
    slot.with_second(0)
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(slot)
}

/// Build a slot from a calendar date and a 24-hour `HH:MM` time string.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use mentorship::domain::slot_at;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date");
/// let slot = slot_at(date, "09:30").expect("valid time");
/// assert_eq!(slot.to_rfc3339(), "2025-01-10T09:30:00+00:00");
/// ```
pub fn slot_at(date: NaiveDate, time: &str) -> Result<Slot, Error> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| {
        Error::validation_failed(format!("slot time must be formatted as HH:MM, got {time:?}"))
    })?;
    Ok(Utc.from_utc_datetime(&date.and_time(parsed)))
}

/// Ordered, duplicate-free set of offered slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Slot>", into = "Vec<Slot>")]
pub struct OfferedSlots(Vec<Slot>);

impl OfferedSlots {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a slot, returning `false` when the minute is already offered.
    pub fn insert(&mut self, slot: Slot) -> bool {
        let slot = normalise_slot(slot);
        match self.0.binary_search(&slot) {
            Ok(_) => false,
            Err(position) => {
                self.0.insert(position, slot);
                true
            }
        }
    }

    /// Remove a slot by value.
    pub fn remove(&mut self, slot: &Slot) -> bool {
        let slot = normalise_slot(*slot);
        match self.0.binary_search(&slot) {
            Ok(position) => {
                self.0.remove(position);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove the slot shown at `index`, if any.
    pub fn remove_at(&mut self, index: usize) -> Option<Slot> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Whether the set offers `slot`.
    pub fn contains(&self, slot: &Slot) -> bool {
        self.0.binary_search(&normalise_slot(*slot)).is_ok()
    }

    /// Add every slot of `other`.
    pub fn extend(&mut self, other: &Self) {
        for slot in other.iter() {
            self.insert(*slot);
        }
    }

    /// Iterate slots in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.0.iter()
    }

    /// Borrow the slots as an ascending slice.
    pub fn as_slice(&self) -> &[Slot] {
        &self.0
    }

    /// Number of offered slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no slot is offered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove every slot.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<Vec<Slot>> for OfferedSlots {
    fn from(value: Vec<Slot>) -> Self {
        value.into_iter().collect()
    }
}

impl From<OfferedSlots> for Vec<Slot> {
    fn from(value: OfferedSlots) -> Self {
        value.0
    }
}

impl FromIterator<Slot> for OfferedSlots {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut slots = Self::new();
        for slot in iter {
            slots.insert(slot);
        }
        slots
    }
}

impl<'a> IntoIterator for &'a OfferedSlots {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
