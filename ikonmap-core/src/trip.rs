//! Ephemeral trip state: the user's resort selections and planned days.
//!
//! Updates never mutate in place; each one yields a new [`Trip`] value so the
//! presentation layer can swap it in atomically.

use serde::{Deserialize, Serialize};

/// Upper bound the planner UI offers for a single resort entry.
pub const MAX_ENTRY_DAYS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripEntry {
    pub resort_id: String,
    pub days: u32,
}

impl TripEntry {
    #[must_use]
    pub fn new(resort_id: impl Into<String>, days: u32) -> Self {
        Self {
            resort_id: resort_id.into(),
            days,
        }
    }
}

/// At most one entry per resort id; entry order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TripEntry>", into = "Vec<TripEntry>")]
pub struct Trip {
    entries: Vec<TripEntry>,
}

impl Trip {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trip from raw entries; later duplicates replace earlier ones.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = TripEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::new(), |trip, entry| trip.with_days(entry.resort_id, entry.days))
    }

    /// Add `resort_id` or replace its day count.
    #[must_use]
    pub fn with_days(&self, resort_id: impl Into<String>, days: u32) -> Self {
        let resort_id = resort_id.into();
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|e| e.resort_id == resort_id) {
            Some(existing) => existing.days = days,
            None => entries.push(TripEntry { resort_id, days }),
        }
        Self { entries }
    }

    #[must_use]
    pub fn without(&self, resort_id: &str) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| e.resort_id != resort_id)
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::new()
    }

    #[must_use]
    pub fn entries(&self) -> &[TripEntry] {
        &self.entries
    }

    #[must_use]
    pub fn days_for(&self, resort_id: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.resort_id == resort_id)
            .map(|e| e.days)
    }

    #[must_use]
    pub fn contains(&self, resort_id: &str) -> bool {
        self.days_for(resort_id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<TripEntry>> for Trip {
    fn from(entries: Vec<TripEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Trip> for Vec<TripEntry> {
    fn from(trip: Trip) -> Self {
        trip.entries
    }
}

/// Clamp a day count typed into the planner to `1..=max`.
#[must_use]
pub fn clamp_days(requested: u32, max: u32) -> u32 {
    requested.clamp(1, max.max(1))
}
