use crate::allowance::{PassAllowance, PassType};
use crate::regions::INDIVIDUAL_GROUP;
use serde::{Deserialize, Serialize};
use url::form_urlencoded::byte_serialize;

/// A resort on the pass, loaded once from the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resort {
    pub id: String,
    pub name: String,
    /// Affiliation, either "Individual" or a named collective.
    pub group: String,
    pub macro_region: String,
    pub country: String,
    pub color_group: String,
    pub full_pass_days: PassAllowance,
    pub base_pass_days: PassAllowance,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub reservation_required: bool,
    #[serde(default)]
    pub blackout_dates: Option<String>,
    #[serde(default)]
    pub full_pass_only: bool,
    /// Key of the pooled allowance this resort draws from, if any.
    #[serde(default)]
    pub day_bank_group: Option<String>,
    #[serde(default)]
    pub powderhounds_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Resort {
    #[must_use]
    pub const fn pass_days(&self, pass: PassType) -> &PassAllowance {
        match pass {
            PassType::Full => &self.full_pass_days,
            PassType::Base => &self.base_pass_days,
        }
    }

    /// Day-bank key, treating an empty string the same as no bank.
    #[must_use]
    pub fn day_bank(&self) -> Option<&str> {
        self.day_bank_group.as_deref().filter(|group| !group.is_empty())
    }

    #[must_use]
    pub fn is_individual(&self) -> bool {
        self.group == INDIVIDUAL_GROUP
    }

    #[must_use]
    pub fn has_blackout_dates(&self) -> bool {
        self.blackout_dates
            .as_deref()
            .is_some_and(|dates| !dates.trim().is_empty())
    }

    #[must_use]
    pub fn has_notes(&self) -> bool {
        !self.notes.trim().is_empty()
    }

    /// External review link; falls back to a search for the resort name.
    #[must_use]
    pub fn review_url(&self) -> String {
        if let Some(url) = self.powderhounds_url.as_deref().filter(|u| !u.is_empty()) {
            return url.to_string();
        }
        let query = format!("powderhounds {} ski resort", self.name);
        let encoded: String = byte_serialize(query.as_bytes()).collect();
        format!("https://www.google.com/search?q={encoded}&btnI")
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{banked, resort};
    use super::*;
    use crate::allowance::DayLimit;

    #[test]
    fn deserializes_catalog_record() {
        let json = r#"{
            "id": "alta",
            "name": "Alta",
            "group": "Alta & Snowbird",
            "macroRegion": "USA",
            "country": "USA",
            "colorGroup": "USA - Rockies",
            "fullPassDays": "7 (shared)",
            "basePassDays": "N/A",
            "latitude": 40.5884,
            "longitude": -111.6386,
            "isNew": false,
            "notes": "Skiers only.",
            "reservationRequired": false,
            "blackoutDates": "",
            "fullPassOnly": true,
            "dayBankGroup": "Alta & Snowbird",
            "powderhoundsUrl": null
        }"#;
        let resort: Resort = serde_json::from_str(json).unwrap();
        assert_eq!(resort.pass_days(PassType::Full).limit(), DayLimit::Days(7));
        assert!(!resort.pass_days(PassType::Base).is_available());
        assert_eq!(resort.day_bank(), Some("Alta & Snowbird"));
        assert!(!resort.has_blackout_dates());
        assert!(resort.image_url.is_none());
    }

    #[test]
    fn empty_bank_key_counts_as_individual() {
        let mut r = banked("a", "A", "X", "7", "5");
        assert_eq!(r.day_bank(), Some("X"));
        r.day_bank_group = Some(String::new());
        assert_eq!(r.day_bank(), None);
    }

    #[test]
    fn review_url_prefers_catalog_link() {
        let mut r = resort("big-sky", "Big Sky", "7", "5");
        assert_eq!(
            r.review_url(),
            "https://www.google.com/search?q=powderhounds+Big+Sky+ski+resort&btnI"
        );
        r.powderhounds_url = Some("https://www.powderhounds.com/USA/Montana/Big-Sky.aspx".into());
        assert!(r.review_url().starts_with("https://www.powderhounds.com"));
    }

    #[test]
    fn review_search_escapes_reserved_characters() {
        let r = resort("alta", "Alta & Snowbird/Utah", "7", "5");
        assert_eq!(
            r.review_url(),
            "https://www.google.com/search?q=powderhounds+Alta+%26+Snowbird%2FUtah+ski+resort&btnI"
        );
    }
}
