//! Trip accounting: per-resort and per-day-bank usage against pass allowances.

use crate::allowance::{
    DayLimit, PassType, is_available_on_pass, resort_allowance, usage_percent,
};
use crate::catalog::Catalog;
use crate::resort::Resort;
use crate::trip::Trip;
use serde::Serialize;
use std::collections::BTreeMap;

/// Usage of a resort with its own allowance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResortStatus {
    pub resort: Resort,
    pub days: u32,
    pub allowance: DayLimit,
    pub exceeded: bool,
    pub not_on_pass: bool,
}

impl ResortStatus {
    #[must_use]
    pub fn usage_percent(&self) -> Option<f64> {
        if self.not_on_pass {
            return None;
        }
        usage_percent(self.days, self.allowance)
    }
}

/// A bank member and the days planned there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankMember {
    pub resort: Resort,
    pub days: u32,
}

/// Usage of a pooled allowance shared by several resorts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedBankStatus {
    pub group: String,
    pub allowance: DayLimit,
    pub used_days: u32,
    pub exceeded: bool,
    /// The bank's raw allowance marks it as excluded from this tier.
    /// Informational only: `exceeded` already fires for any planned day.
    pub not_on_pass: bool,
    /// Members present in the trip, sorted by name.
    pub resorts: Vec<BankMember>,
}

impl SharedBankStatus {
    #[must_use]
    pub fn usage_percent(&self) -> Option<f64> {
        usage_percent(self.used_days, self.allowance)
    }

    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        self.allowance.remaining(self.used_days)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TripSummary {
    pub total_days: u32,
    pub individual_resorts: Vec<ResortStatus>,
    pub shared_banks: Vec<SharedBankStatus>,
    pub has_any_exceeded: bool,
}

impl TripSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individual_resorts.is_empty() && self.shared_banks.is_empty()
    }
}

/// Aggregate `trip` against `catalog` for the selected pass tier.
///
/// Entries whose resort id is not in the catalog are dropped. Individual
/// resorts are sorted by name; banks are ordered by group key.
#[must_use]
pub fn compute_trip_summary(trip: &Trip, pass: PassType, catalog: &Catalog) -> TripSummary {
    let mut individual_resorts = Vec::new();
    let mut banks: BTreeMap<&str, Vec<BankMember>> = BTreeMap::new();

    for entry in trip.entries() {
        let Some(resort) = catalog.get(&entry.resort_id) else {
            log::debug!("dropping trip entry for unknown resort `{}`", entry.resort_id);
            continue;
        };
        match resort.day_bank() {
            Some(group) => banks.entry(group).or_default().push(BankMember {
                resort: resort.clone(),
                days: entry.days,
            }),
            None => individual_resorts.push(resort_status(resort, entry.days, pass)),
        }
    }

    individual_resorts.sort_by(|a, b| a.resort.name.cmp(&b.resort.name));

    let shared_banks: Vec<SharedBankStatus> = banks
        .into_iter()
        .map(|(group, members)| bank_status(group, members, pass))
        .collect();

    let individual_days = individual_resorts
        .iter()
        .fold(0_u32, |sum, r| sum.saturating_add(r.days));
    let total_days = shared_banks
        .iter()
        .fold(individual_days, |sum, b| sum.saturating_add(b.used_days));

    let has_any_exceeded = individual_resorts
        .iter()
        .any(|r| r.exceeded || r.not_on_pass)
        || shared_banks.iter().any(|b| b.exceeded);

    TripSummary {
        total_days,
        individual_resorts,
        shared_banks,
        has_any_exceeded,
    }
}

fn resort_status(resort: &Resort, days: u32, pass: PassType) -> ResortStatus {
    let allowance = resort_allowance(resort, pass);
    let not_on_pass = !is_available_on_pass(resort, pass);
    ResortStatus {
        resort: resort.clone(),
        days,
        allowance,
        exceeded: !not_on_pass && allowance.exceeded_by(days),
        not_on_pass,
    }
}

fn bank_status(group: &str, mut members: Vec<BankMember>, pass: PassType) -> SharedBankStatus {
    members.sort_by(|a, b| a.resort.name.cmp(&b.resort.name));
    let used_days = members
        .iter()
        .fold(0_u32, |sum, m| sum.saturating_add(m.days));
    // Members of one bank carry identical allowance strings, so any member will do.
    let (allowance, not_on_pass) = members.first().map_or((DayLimit::Days(0), false), |m| {
        (
            resort_allowance(&m.resort, pass),
            !is_available_on_pass(&m.resort, pass),
        )
    });
    SharedBankStatus {
        group: group.to_string(),
        allowance,
        used_days,
        exceeded: allowance.exceeded_by(used_days),
        not_on_pass,
        resorts: members,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resort::fixtures::{banked, resort};

    fn catalog() -> Catalog {
        Catalog::from_resorts(vec![
            resort("taos", "Taos", "7", "5"),
            resort("steamboat", "Steamboat", "Unlimited", "Unlimited*"),
            resort("jackson", "Jackson Hole", "7", "N/A"),
            banked("a", "Resort A", "X", "7 (shared)", "5 (shared)"),
            banked("b", "Resort B", "X", "7 (shared)", "5 (shared)"),
            banked("alta", "Alta", "Alta & Snowbird", "7 (shared)", "N/A"),
        ])
        .unwrap()
    }

    #[test]
    fn shared_bank_pools_member_days() {
        let trip = Trip::new().with_days("a", 4).with_days("b", 4);
        let summary = compute_trip_summary(&trip, PassType::Full, &catalog());
        assert_eq!(summary.shared_banks.len(), 1);
        let bank = &summary.shared_banks[0];
        assert_eq!(bank.group, "X");
        assert_eq!(bank.used_days, 8);
        assert_eq!(bank.allowance, DayLimit::Days(7));
        assert!(bank.exceeded);
        assert_eq!(bank.remaining(), Some(0));
        assert_eq!(summary.total_days, 8);
        assert!(summary.has_any_exceeded);
        assert!(summary.individual_resorts.is_empty());
    }

    #[test]
    fn individual_order_is_case_sensitive() {
        let catalog = Catalog::from_resorts(vec![
            resort("alpha", "alpha", "7", "5"),
            resort("zermatt", "Zermatt", "7", "5"),
            resort("big", "Big Sky", "7", "5"),
        ])
        .unwrap();
        let trip = Trip::new()
            .with_days("alpha", 1)
            .with_days("zermatt", 1)
            .with_days("big", 1);
        let summary = compute_trip_summary(&trip, PassType::Full, &catalog);
        let names: Vec<&str> = summary
            .individual_resorts
            .iter()
            .map(|r| r.resort.name.as_str())
            .collect();
        assert_eq!(names, vec!["Big Sky", "Zermatt", "alpha"]);
    }

    #[test]
    fn bank_members_are_sorted_with_their_days() {
        let trip = Trip::new().with_days("b", 1).with_days("a", 2);
        let summary = compute_trip_summary(&trip, PassType::Base, &catalog());
        let bank = &summary.shared_banks[0];
        let names: Vec<(&str, u32)> = bank
            .resorts
            .iter()
            .map(|m| (m.resort.name.as_str(), m.days))
            .collect();
        assert_eq!(names, [("Resort A", 2), ("Resort B", 1)]);
        assert_eq!(bank.allowance, DayLimit::Days(5));
        assert!(!bank.exceeded);
    }

    #[test]
    fn not_on_pass_is_not_double_flagged() {
        let trip = Trip::new().with_days("jackson", 3);
        let summary = compute_trip_summary(&trip, PassType::Base, &catalog());
        let status = &summary.individual_resorts[0];
        assert!(status.not_on_pass);
        assert!(!status.exceeded);
        assert!(summary.has_any_exceeded);
        assert_eq!(status.usage_percent(), None);
    }

    #[test]
    fn limit_boundary_and_unlimited() {
        let trip = Trip::new().with_days("taos", 7).with_days("steamboat", 40);
        let summary = compute_trip_summary(&trip, PassType::Full, &catalog());
        assert!(summary.individual_resorts.iter().all(|r| !r.exceeded));
        assert!(!summary.has_any_exceeded);

        let over = compute_trip_summary(&trip.with_days("taos", 8), PassType::Full, &catalog());
        let taos = over
            .individual_resorts
            .iter()
            .find(|r| r.resort.id == "taos")
            .unwrap();
        assert!(taos.exceeded);
        assert!(over.has_any_exceeded);
    }

    #[test]
    fn individual_results_sorted_by_name() {
        let trip = Trip::new()
            .with_days("taos", 1)
            .with_days("steamboat", 1)
            .with_days("jackson", 1);
        let summary = compute_trip_summary(&trip, PassType::Full, &catalog());
        let names: Vec<&str> = summary
            .individual_resorts
            .iter()
            .map(|r| r.resort.name.as_str())
            .collect();
        assert_eq!(names, ["Jackson Hole", "Steamboat", "Taos"]);
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let trip = Trip::new().with_days("vail", 3).with_days("taos", 2);
        let summary = compute_trip_summary(&trip, PassType::Full, &catalog());
        assert_eq!(summary.total_days, 2);
        assert_eq!(summary.individual_resorts.len(), 1);
    }

    #[test]
    fn bank_without_tier_access_reports_exceeded_and_not_on_pass() {
        let trip = Trip::new().with_days("alta", 1);
        let summary = compute_trip_summary(&trip, PassType::Base, &catalog());
        let bank = &summary.shared_banks[0];
        assert_eq!(bank.allowance, DayLimit::Days(0));
        assert!(bank.exceeded);
        assert!(bank.not_on_pass);
        assert!(summary.has_any_exceeded);
    }

    #[test]
    fn empty_trip_yields_empty_summary() {
        let summary = compute_trip_summary(&Trip::new(), PassType::Full, &catalog());
        assert_eq!(summary, TripSummary::default());
        assert!(summary.is_empty());
    }

    #[test]
    fn summary_is_idempotent() {
        let trip = Trip::new()
            .with_days("a", 3)
            .with_days("taos", 9)
            .with_days("alta", 2);
        let cat = catalog();
        let first = compute_trip_summary(&trip, PassType::Full, &cat);
        let second = compute_trip_summary(&trip, PassType::Full, &cat);
        assert_eq!(first, second);
        assert_eq!(first.total_days, 14);
    }
}
