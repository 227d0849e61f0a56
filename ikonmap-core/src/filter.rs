//! Sidebar filtering of the resort list.
//!
//! Categories combine with AND; selections inside one category combine with OR.
//! An empty selection set means the category is inactive.

use crate::allowance::PassType;
use crate::catalog::Catalog;
use crate::resort::Resort;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Day-bank selection, with a sentinel for resorts that have their own allowance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBankFilter {
    Individual,
    Group(String),
}

impl DayBankFilter {
    fn matches(&self, resort: &Resort) -> bool {
        match self {
            Self::Individual => resort.day_bank().is_none(),
            Self::Group(group) => resort.day_bank() == Some(group.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassTierFilter {
    #[default]
    All,
    FullOnly,
    BaseIncluded,
}

impl PassTierFilter {
    const fn required_tier(self) -> Option<PassType> {
        match self {
            Self::All => None,
            Self::FullOnly => Some(PassType::Full),
            Self::BaseIncluded => Some(PassType::Base),
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::FullOnly => "full-only",
            Self::BaseIncluded => "base-included",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "full-only" => Self::FullOnly,
            "base-included" => Self::BaseIncluded,
            _ => Self::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    pub search: String,
    pub macro_regions: BTreeSet<String>,
    pub color_groups: BTreeSet<String>,
    pub day_bank_groups: BTreeSet<DayBankFilter>,
    pub pass_tier: PassTierFilter,
    pub new_only: bool,
    pub no_blackouts: bool,
}

impl Filters {
    #[must_use]
    pub fn has_active(&self) -> bool {
        !self.search.is_empty()
            || !self.macro_regions.is_empty()
            || !self.color_groups.is_empty()
            || !self.day_bank_groups.is_empty()
            || self.pass_tier != PassTierFilter::All
            || self.new_only
            || self.no_blackouts
    }

    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_region(&self, region: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.macro_regions, region.to_string());
        next
    }

    #[must_use]
    pub fn toggle_color_group(&self, group: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.color_groups, group.to_string());
        next
    }

    #[must_use]
    pub fn toggle_day_bank(&self, bank: DayBankFilter) -> Self {
        let mut next = self.clone();
        toggle(&mut next.day_bank_groups, bank);
        next
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, item: T) {
    if !set.remove(&item) {
        set.insert(item);
    }
}

fn matches_search(resort: &Resort, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    [
        &resort.name,
        &resort.country,
        &resort.group,
        &resort.color_group,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[must_use]
pub fn matches_filters(resort: &Resort, filters: &Filters) -> bool {
    if !matches_search(resort, &filters.search) {
        return false;
    }
    if !filters.macro_regions.is_empty() && !filters.macro_regions.contains(&resort.macro_region) {
        return false;
    }
    if !filters.color_groups.is_empty() && !filters.color_groups.contains(&resort.color_group) {
        return false;
    }
    if !filters.day_bank_groups.is_empty()
        && !filters.day_bank_groups.iter().any(|bank| bank.matches(resort))
    {
        return false;
    }
    if filters.new_only && !resort.is_new {
        return false;
    }
    if filters.no_blackouts && resort.has_blackout_dates() {
        return false;
    }
    if let Some(tier) = filters.pass_tier.required_tier()
        && !resort.pass_days(tier).is_available()
    {
        return false;
    }
    true
}

/// Resorts passing `filters`, in catalog order.
#[must_use]
pub fn apply_filters<'a>(catalog: &'a Catalog, filters: &Filters) -> Vec<&'a Resort> {
    catalog
        .resorts()
        .iter()
        .filter(|resort| matches_filters(resort, filters))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resort::fixtures::{banked, resort};

    fn catalog() -> Catalog {
        let mut niseko = resort("niseko", "Niseko United", "7", "5");
        niseko.macro_region = "Asia".into();
        niseko.country = "Japan".into();
        niseko.color_group = "Japan".into();
        niseko.is_new = true;
        let mut steamboat = resort("steamboat", "Steamboat", "Unlimited", "Unlimited*");
        steamboat.blackout_dates = Some("Dec 26-31".into());
        Catalog::from_resorts(vec![
            steamboat,
            niseko,
            resort("jackson", "Jackson Hole", "7", "N/A"),
            banked("alta", "Alta", "Alta & Snowbird", "7 (shared)", "N/A"),
        ])
        .unwrap()
    }

    fn ids(catalog: &Catalog, filters: &Filters) -> Vec<String> {
        apply_filters(catalog, filters)
            .into_iter()
            .map(|r| r.id.clone())
            .collect()
    }

    #[test]
    fn default_filters_keep_catalog_order() {
        let cat = catalog();
        assert_eq!(
            ids(&cat, &Filters::default()),
            ["steamboat", "niseko", "jackson", "alta"]
        );
        assert!(!Filters::default().has_active());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let cat = catalog();
        assert_eq!(ids(&cat, &Filters::default().with_search("JAPAN")), ["niseko"]);
        assert_eq!(ids(&cat, &Filters::default().with_search("snowbird")), ["alta"]);
        assert!(ids(&cat, &Filters::default().with_search("zzz")).is_empty());
    }

    #[test]
    fn categories_and_together_and_or_within() {
        let cat = catalog();
        let filters = Filters::default().toggle_region("Asia").toggle_region("USA");
        assert_eq!(ids(&cat, &filters).len(), 4);
        let filters = filters.toggle_region("USA");
        assert_eq!(ids(&cat, &filters), ["niseko"]);
        let filters = Filters {
            new_only: true,
            ..Filters::default().toggle_region("USA")
        };
        assert!(ids(&cat, &filters).is_empty());
    }

    #[test]
    fn day_bank_sentinel_selects_individual_resorts() {
        let cat = catalog();
        let individual = Filters::default().toggle_day_bank(DayBankFilter::Individual);
        assert_eq!(ids(&cat, &individual), ["steamboat", "niseko", "jackson"]);
        let banked = Filters::default().toggle_day_bank(DayBankFilter::Group("Alta & Snowbird".into()));
        assert_eq!(ids(&cat, &banked), ["alta"]);
        let both = individual.toggle_day_bank(DayBankFilter::Group("Alta & Snowbird".into()));
        assert_eq!(ids(&cat, &both).len(), 4);
        assert!(both.toggle_day_bank(DayBankFilter::Individual).day_bank_groups.len() == 1);
    }

    #[test]
    fn pass_tier_and_blackouts() {
        let cat = catalog();
        let base = Filters {
            pass_tier: PassTierFilter::BaseIncluded,
            ..Filters::default()
        };
        assert_eq!(ids(&cat, &base), ["steamboat", "niseko"]);
        let clean = Filters {
            no_blackouts: true,
            ..base
        };
        assert_eq!(ids(&cat, &clean), ["niseko"]);
        assert!(clean.has_active());
        assert!(!clean.cleared().has_active());
    }

    #[test]
    fn pass_tier_keys_round_trip() {
        for tier in [
            PassTierFilter::All,
            PassTierFilter::FullOnly,
            PassTierFilter::BaseIncluded,
        ] {
            assert_eq!(PassTierFilter::from_key(tier.key()), tier);
        }
        assert_eq!(PassTierFilter::from_key("bogus"), PassTierFilter::All);
    }
}
