//! Static region, colour-group and day-bank metadata used by filters and legends.

/// Affiliation value for resorts that are not part of a collective.
pub const INDIVIDUAL_GROUP: &str = "Individual";

/// Fallback swatch for colour groups missing from [`COLOR_GROUPS`].
pub const FALLBACK_COLOR: &str = "#666666";

/// Macro regions in display order.
pub const MACRO_REGIONS: [&str; 6] = [
    "Europe",
    "USA",
    "Canada",
    "South America",
    "Oceania",
    "Asia",
];

/// Colour group name and its hex swatch, in legend order.
pub const COLOR_GROUPS: [(&str, &str); 15] = [
    ("Alps - France/Andorra", "#4361EE"),
    ("Alps - Switzerland/Austria", "#E63946"),
    ("Alps - Italy (Dolomites)", "#2EC4B6"),
    ("Alps - Italy (Valle d'Aosta)", "#57CC99"),
    ("USA - West", "#F4A261"),
    ("USA - Pacific NW & Alaska", "#9B5DE5"),
    ("USA - Rockies", "#3A86FF"),
    ("USA - Midwest", "#FB8500"),
    ("USA - East", "#00B4D8"),
    ("Canada - West", "#FF006E"),
    ("Canada - East", "#C77DFF"),
    ("South America", "#80B918"),
    ("Australia / New Zealand", "#06D6A0"),
    ("Japan", "#EF476F"),
    ("Asia - Other", "#FFD166"),
];

#[must_use]
pub fn color_for(color_group: &str) -> &'static str {
    COLOR_GROUPS
        .iter()
        .find(|(name, _)| *name == color_group)
        .map_or(FALLBACK_COLOR, |&(_, hex)| hex)
}

/// Descriptor for a known pooled-allowance group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBankDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub resort_count: usize,
    pub full_days: &'static str,
    pub base_days: &'static str,
}

pub const DAY_BANK_GROUPS: [DayBankDescriptor; 6] = [
    DayBankDescriptor {
        key: "Dolomiti Superski",
        label: "Dolomiti Superski",
        resort_count: 12,
        full_days: "7 shared",
        base_days: "5 shared",
    },
    DayBankDescriptor {
        key: "Valle d'Aosta",
        label: "Valle d'Aosta",
        resort_count: 5,
        full_days: "7 shared",
        base_days: "5 shared",
    },
    DayBankDescriptor {
        key: "Aspen Snowmass",
        label: "Aspen Snowmass",
        resort_count: 4,
        full_days: "7 shared",
        base_days: "N/A",
    },
    DayBankDescriptor {
        key: "Alta & Snowbird",
        label: "Alta & Snowbird",
        resort_count: 2,
        full_days: "7 shared",
        base_days: "N/A",
    },
    DayBankDescriptor {
        key: "SkiBig3",
        label: "SkiBig3",
        resort_count: 3,
        full_days: "7 shared",
        base_days: "5 shared",
    },
    DayBankDescriptor {
        key: "NZ Super Pass",
        label: "NZ Super Pass",
        resort_count: 3,
        full_days: "7 shared",
        base_days: "5 shared",
    },
];

#[must_use]
pub fn day_bank_descriptor(key: &str) -> Option<&'static DayBankDescriptor> {
    DAY_BANK_GROUPS.iter().find(|d| d.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_groups_resolve_to_their_swatch() {
        assert_eq!(color_for("Japan"), "#EF476F");
        assert_eq!(color_for("Antarctica"), FALLBACK_COLOR);
    }

    #[test]
    fn descriptors_are_addressable_by_key() {
        let bank = day_bank_descriptor("SkiBig3").expect("SkiBig3 is known");
        assert_eq!(bank.resort_count, 3);
        assert!(day_bank_descriptor("Epic Local").is_none());
    }
}
