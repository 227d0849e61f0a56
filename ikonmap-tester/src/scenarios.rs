//! Built-in accounting scenarios run against a loaded catalog.

use colored::Colorize;
use ikonmap_core::{
    Catalog, DayLimit, PassType, Trip, Viewport, compute_trip_summary, is_available_on_pass,
    lng_lat_to_pixel, parse_day_limit, resort_allowance,
};
use serde::Serialize;
use std::time::{Duration, Instant};

const CONTAINER_SIZES: [(f64, f64); 3] = [(1280.0, 720.0), (375.0, 812.0), (1.0, 1.0)];

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub checks_run: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

mod duration_serde {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }
}

/// Collects pass/fail outcomes while a scenario runs.
#[derive(Debug, Default)]
pub struct Checks {
    run: usize,
    failures: Vec<String>,
}

impl Checks {
    fn check(&mut self, ok: bool, describe: impl FnOnce() -> String) {
        self.run += 1;
        if !ok {
            self.failures.push(describe());
        }
    }
}

#[derive(Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    run: fn(&Catalog, &mut Checks),
}

impl Scenario {
    #[must_use]
    pub fn run(&self, catalog: &Catalog, verbose: bool) -> ScenarioResult {
        if verbose {
            eprintln!("🧪 Running scenario: {}", self.key.bright_white());
        }
        let start = Instant::now();
        let mut checks = Checks::default();
        (self.run)(catalog, &mut checks);
        ScenarioResult {
            scenario_name: self.key.to_string(),
            passed: checks.failures.is_empty(),
            checks_run: checks.run,
            failures: checks.failures,
            duration: start.elapsed(),
        }
    }
}

const SCENARIOS: [Scenario; 10] = [
    Scenario {
        key: "allowance-parsing",
        description: "Allowance strings parse to the documented day limits",
        run: allowance_parsing,
    },
    Scenario {
        key: "pass-availability",
        description: "Availability is false exactly for N/A or empty allowances",
        run: pass_availability,
    },
    Scenario {
        key: "within-allowance",
        description: "Planning up to the allowance (or any days when unlimited) never exceeds",
        run: within_allowance,
    },
    Scenario {
        key: "over-allowance",
        description: "One day past a finite allowance is flagged as exceeded",
        run: over_allowance,
    },
    Scenario {
        key: "not-on-pass",
        description: "Resorts missing from a tier are flagged not-on-pass, never exceeded",
        run: not_on_pass,
    },
    Scenario {
        key: "shared-bank-pooling",
        description: "Bank members draw from one pooled allowance",
        run: shared_bank_pooling,
    },
    Scenario {
        key: "stale-entries",
        description: "Trip entries for unknown resorts are dropped",
        run: stale_entries,
    },
    Scenario {
        key: "idempotent-summary",
        description: "Summaries are pure: same trip, same result, totals add up",
        run: idempotent_summary,
    },
    Scenario {
        key: "projection-centre",
        description: "A resort at the viewport centre projects to the container midpoint",
        run: projection_centre,
    },
    Scenario {
        key: "catalog-audit",
        description: "Catalog has no data bugs the accounting engine relies on",
        run: catalog_audit,
    },
];

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description)).collect()
}

#[must_use]
pub fn get_scenario(key: &str) -> Option<Scenario> {
    SCENARIOS.iter().find(|s| s.key == key).copied()
}

/// Expand the `--scenarios` selection; `all` adds every built-in scenario.
#[must_use]
pub fn expand_scenarios(selection: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = selection.iter().filter(|s| *s != "all").cloned().collect();
    if selection.iter().any(|s| s == "all") {
        for scenario in &SCENARIOS {
            if !keys.iter().any(|k| k == scenario.key) {
                keys.push(scenario.key.to_string());
            }
        }
    }
    keys
}

fn allowance_parsing(_catalog: &Catalog, checks: &mut Checks) {
    let cases = [
        ("7", DayLimit::Days(7)),
        ("7 (shared)", DayLimit::Days(7)),
        ("5 (combined)", DayLimit::Days(5)),
        ("Unlimited", DayLimit::Unlimited),
        ("Unlimited*", DayLimit::Unlimited),
        ("N/A", DayLimit::Days(0)),
        ("", DayLimit::Days(0)),
        ("TBD", DayLimit::Days(0)),
    ];
    for (raw, expected) in cases {
        let parsed = parse_day_limit(raw);
        checks.check(parsed == expected, || {
            format!("`{raw}` parsed to {parsed}, expected {expected}")
        });
    }
}

fn pass_availability(catalog: &Catalog, checks: &mut Checks) {
    for resort in catalog.resorts() {
        for pass in PassType::ALL {
            let raw = resort.pass_days(pass).raw();
            let expected = !(raw == "N/A" || raw.is_empty());
            checks.check(is_available_on_pass(resort, pass) == expected, || {
                format!("{} {pass}: availability disagrees with `{raw}`", resort.id)
            });
        }
    }
}

fn within_allowance(catalog: &Catalog, checks: &mut Checks) {
    for resort in catalog.resorts().iter().filter(|r| r.day_bank().is_none()) {
        for pass in PassType::ALL {
            if !is_available_on_pass(resort, pass) {
                continue;
            }
            let days = match resort_allowance(resort, pass) {
                DayLimit::Days(0) => continue,
                DayLimit::Days(limit) => limit,
                DayLimit::Unlimited => 365,
            };
            let trip = Trip::new().with_days(resort.id.clone(), days);
            let summary = compute_trip_summary(&trip, pass, catalog);
            checks.check(!summary.has_any_exceeded, || {
                format!("{} {pass}: {days} day(s) flagged as exceeded", resort.id)
            });
        }
    }
}

fn over_allowance(catalog: &Catalog, checks: &mut Checks) {
    for resort in catalog.resorts().iter().filter(|r| r.day_bank().is_none()) {
        for pass in PassType::ALL {
            if !is_available_on_pass(resort, pass) {
                continue;
            }
            let DayLimit::Days(limit) = resort_allowance(resort, pass) else {
                continue;
            };
            let trip = Trip::new().with_days(resort.id.clone(), limit.saturating_add(1));
            let summary = compute_trip_summary(&trip, pass, catalog);
            let exceeded = summary
                .individual_resorts
                .first()
                .is_some_and(|status| status.exceeded);
            checks.check(exceeded && summary.has_any_exceeded, || {
                format!("{} {pass}: {} day(s) not flagged", resort.id, limit + 1)
            });
        }
    }
}

fn not_on_pass(catalog: &Catalog, checks: &mut Checks) {
    for resort in catalog.resorts().iter().filter(|r| r.day_bank().is_none()) {
        for pass in PassType::ALL {
            if is_available_on_pass(resort, pass) {
                continue;
            }
            let trip = Trip::new().with_days(resort.id.clone(), 1);
            let summary = compute_trip_summary(&trip, pass, catalog);
            let flags = summary
                .individual_resorts
                .first()
                .map(|status| (status.not_on_pass, status.exceeded));
            checks.check(flags == Some((true, false)) && summary.has_any_exceeded, || {
                format!("{} {pass}: expected not-on-pass only, got {flags:?}", resort.id)
            });
        }
    }
}

fn shared_bank_pooling(catalog: &Catalog, checks: &mut Checks) {
    for group in catalog.day_banks().groups() {
        let members: Vec<&str> = catalog.bank_members(group).map(|r| r.id.as_str()).collect();
        let Some(first) = catalog.bank_members(group).next() else {
            continue;
        };
        for pass in PassType::ALL {
            if !is_available_on_pass(first, pass) {
                continue;
            }
            let DayLimit::Days(allowance) = resort_allowance(first, pass) else {
                continue;
            };
            let Some(trip) = spread_days(&members, allowance) else {
                continue;
            };
            let summary = compute_trip_summary(&trip, pass, catalog);
            let bank = summary.shared_banks.iter().find(|b| b.group == group);
            checks.check(
                bank.is_some_and(|b| b.used_days == allowance && !b.exceeded)
                    && summary.total_days == allowance,
                || format!("{group} {pass}: {allowance} pooled day(s) misreported"),
            );

            let over = trip.with_days(members[0], trip.days_for(members[0]).unwrap_or(0) + 1);
            let summary = compute_trip_summary(&over, pass, catalog);
            let bank = summary.shared_banks.iter().find(|b| b.group == group);
            checks.check(
                bank.is_some_and(|b| b.used_days == allowance + 1 && b.exceeded)
                    && summary.has_any_exceeded,
                || format!("{group} {pass}: one day over the pool not flagged"),
            );
        }
    }
}

/// One day per member with the remainder on the first; `None` when the pool is too small.
fn spread_days(members: &[&str], total: u32) -> Option<Trip> {
    let count = u32::try_from(members.len()).ok()?;
    if count == 0 || total < count {
        return None;
    }
    let trip = members
        .iter()
        .fold(Trip::new(), |trip, id| trip.with_days(*id, 1));
    Some(trip.with_days(members[0], total - count + 1))
}

fn stale_entries(catalog: &Catalog, checks: &mut Checks) {
    let Some(resort) = catalog.resorts().first() else {
        return;
    };
    let trip = Trip::new()
        .with_days("no-such-resort", 9)
        .with_days(resort.id.clone(), 1);
    for pass in PassType::ALL {
        let summary = compute_trip_summary(&trip, pass, catalog);
        let counted = summary.individual_resorts.len()
            + summary
                .shared_banks
                .iter()
                .map(|b| b.resorts.len())
                .sum::<usize>();
        checks.check(counted == 1 && summary.total_days == 1, || {
            format!("{pass}: unknown resort id leaked into the summary")
        });
    }
    let empty = compute_trip_summary(&Trip::new(), PassType::Full, catalog);
    checks.check(
        empty.is_empty() && empty.total_days == 0 && !empty.has_any_exceeded,
        || "empty trip produced a non-empty summary".to_string(),
    );
}

fn idempotent_summary(catalog: &Catalog, checks: &mut Checks) {
    let trip = catalog
        .resorts()
        .iter()
        .fold(Trip::new(), |trip, r| trip.with_days(r.id.clone(), 1));
    let expected_total = u32::try_from(catalog.len()).unwrap_or(u32::MAX);
    for pass in PassType::ALL {
        let first = compute_trip_summary(&trip, pass, catalog);
        let second = compute_trip_summary(&trip, pass, catalog);
        checks.check(first == second, || format!("{pass}: summaries differ"));
        checks.check(first.total_days == expected_total, || {
            format!(
                "{pass}: total {} does not match {expected_total} planned day(s)",
                first.total_days
            )
        });
        let sorted = first
            .individual_resorts
            .windows(2)
            .all(|w| w[0].resort.name <= w[1].resort.name);
        checks.check(sorted, || format!("{pass}: individual resorts not sorted by name"));
    }
}

fn projection_centre(catalog: &Catalog, checks: &mut Checks) {
    for resort in catalog.resorts() {
        let viewport = Viewport::focused_on(resort.latitude, resort.longitude, 10.0);
        for (w, h) in CONTAINER_SIZES {
            let p = lng_lat_to_pixel(resort.longitude, resort.latitude, &viewport, w, h);
            checks.check(
                (p.x - w / 2.0).abs() < 1e-6 && (p.y - h / 2.0).abs() < 1e-6,
                || format!("{} at {w}x{h}: projected to ({:.3}, {:.3})", resort.id, p.x, p.y),
            );
        }
    }
}

fn catalog_audit(catalog: &Catalog, checks: &mut Checks) {
    let issues = catalog.audit();
    checks.check(issues.is_empty(), || {
        let listed: Vec<String> = issues.iter().map(ToString::to_string).collect();
        format!("{} issue(s): {}", issues.len(), listed.join("; "))
    });
}
