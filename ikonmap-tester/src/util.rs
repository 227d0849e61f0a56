use anyhow::{Context, Result, bail};
use ikonmap_core::Trip;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse `id=days,id=days` into a trip. A repeated id keeps its last value.
pub fn parse_trip(input: &str) -> Result<Trip> {
    let mut trip = Trip::new();
    for token in split_csv(input) {
        let Some((id, days)) = token.split_once('=') else {
            bail!("trip entry `{token}` is not of the form id=days");
        };
        let id = id.trim();
        if id.is_empty() {
            bail!("trip entry `{token}` has no resort id");
        }
        let days: u32 = days
            .trim()
            .parse()
            .with_context(|| format!("invalid day count in `{token}`"))?;
        if days == 0 {
            bail!("trip entry `{token}` must plan at least one day");
        }
        trip = trip.with_days(id, days);
    }
    Ok(trip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" alpha, ,beta,  gamma ");
        assert_eq!(parts, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn parses_entries_and_replaces_duplicates() {
        let trip = parse_trip("alta=3, taos = 2,alta=4").unwrap();
        assert_eq!(trip.len(), 2);
        assert_eq!(trip.days_for("alta"), Some(4));
        assert_eq!(trip.days_for("taos"), Some(2));
        assert!(parse_trip("").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(parse_trip("alta").is_err());
        assert!(parse_trip("=3").is_err());
        assert!(parse_trip("alta=three").is_err());
        assert!(parse_trip("alta=0").is_err());
        assert!(parse_trip("alta=-1").is_err());
    }
}
