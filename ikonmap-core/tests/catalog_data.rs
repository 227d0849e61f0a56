use ikonmap_core::{
    AllowanceShape, Catalog, DAY_BANK_GROUPS, DayLimit, MACRO_REGIONS, PassType, Trip,
    color_for, compute_trip_summary, is_available_on_pass, lng_lat_to_pixel, regions,
    resort_allowance,
};

const CATALOG_JSON: &str = include_str!("../../ikonmap-web/static/data/resorts.json");

fn catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON).expect("embedded catalog parses")
}

#[test]
fn embedded_catalog_has_no_data_bugs() {
    let catalog = catalog();
    assert!(catalog.len() >= 50, "catalog unexpectedly small");
    let issues = catalog.audit();
    assert!(issues.is_empty(), "catalog issues: {issues:#?}");
}

#[test]
fn every_allowance_uses_a_known_shape() {
    for resort in catalog().resorts() {
        for pass in PassType::ALL {
            let shape = resort.pass_days(pass).shape();
            assert_ne!(
                shape,
                AllowanceShape::Unrecognised,
                "{} {pass}: {}",
                resort.id,
                resort.pass_days(pass)
            );
        }
    }
}

#[test]
fn availability_matches_raw_marker_for_every_resort() {
    for resort in catalog().resorts() {
        for pass in PassType::ALL {
            let raw = resort.pass_days(pass).raw();
            assert_eq!(
                is_available_on_pass(resort, pass),
                !(raw == "N/A" || raw.is_empty()),
                "{} {pass}",
                resort.id
            );
        }
    }
}

#[test]
fn regions_and_colours_are_all_known() {
    for resort in catalog().resorts() {
        assert!(
            MACRO_REGIONS.contains(&resort.macro_region.as_str()),
            "{} has unknown region {}",
            resort.id,
            resort.macro_region
        );
        assert_ne!(
            color_for(&resort.color_group),
            regions::FALLBACK_COLOR,
            "{} has unknown colour group {}",
            resort.id,
            resort.color_group
        );
    }
}

#[test]
fn catalog_banks_are_known_descriptors() {
    let catalog = catalog();
    for group in catalog.day_banks().groups() {
        let descriptor = regions::day_bank_descriptor(group)
            .unwrap_or_else(|| panic!("unknown day bank {group}"));
        let members = catalog.bank_members(group).count();
        assert!(members >= 2 && members <= descriptor.resort_count);
    }
    assert!(DAY_BANK_GROUPS.iter().all(|d| !d.label.is_empty()));
}

#[test]
fn within_limit_or_unlimited_never_exceeds() {
    let catalog = catalog();
    for resort in catalog.resorts().iter().filter(|r| r.day_bank().is_none()) {
        for pass in PassType::ALL {
            if !is_available_on_pass(resort, pass) {
                continue;
            }
            let allowance = resort_allowance(resort, pass);
            let days = allowance.days().unwrap_or(365);
            let trip = Trip::new().with_days(resort.id.clone(), days);
            let summary = compute_trip_summary(&trip, pass, &catalog);
            assert!(!summary.individual_resorts[0].exceeded, "{}", resort.id);

            if let DayLimit::Days(limit) = allowance {
                let trip = trip.with_days(resort.id.clone(), limit + 1);
                let summary = compute_trip_summary(&trip, pass, &catalog);
                assert!(summary.individual_resorts[0].exceeded, "{}", resort.id);
            }
        }
    }
}

#[test]
fn skibig3_pools_days_across_members() {
    let catalog = catalog();
    let trip = Trip::new()
        .with_days("banff-sunshine", 3)
        .with_days("lake-louise", 2)
        .with_days("revelstoke", 2);
    let summary = compute_trip_summary(&trip, PassType::Base, &catalog);
    assert_eq!(summary.total_days, 7);
    assert_eq!(summary.shared_banks.len(), 1);
    let bank = &summary.shared_banks[0];
    assert_eq!(bank.group, "SkiBig3");
    assert_eq!(bank.used_days, 5);
    assert_eq!(bank.allowance, DayLimit::Days(5));
    assert!(!bank.exceeded);
    assert!(!summary.has_any_exceeded);

    let over = compute_trip_summary(
        &trip.with_days("mt-norquay", 1),
        PassType::Base,
        &catalog,
    );
    assert!(over.shared_banks[0].exceeded);
    assert!(over.has_any_exceeded);
}

#[test]
fn aspen_bank_is_not_on_base_pass() {
    let catalog = catalog();
    let trip = Trip::new().with_days("snowmass", 2);
    let summary = compute_trip_summary(&trip, PassType::Base, &catalog);
    let bank = &summary.shared_banks[0];
    assert!(bank.not_on_pass);
    assert!(bank.exceeded);
    let full = compute_trip_summary(&trip, PassType::Full, &catalog);
    assert!(!full.has_any_exceeded);
}

#[test]
fn every_resort_projects_to_a_finite_pixel() {
    let viewport = ikonmap_core::MapConfig::default().initial_viewport;
    for resort in catalog().resorts() {
        let p = lng_lat_to_pixel(resort.longitude, resort.latitude, &viewport, 1280.0, 720.0);
        assert!(p.x.is_finite() && p.y.is_finite(), "{}", resort.id);
    }
}
