//! Immutable resort catalog with the lookup indices built once at load time.

use crate::allowance::{AllowanceShape, PassType};
use crate::resort::Resort;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

/// Errors raised while ingesting catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON could not be parsed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate resort id `{0}`")]
    DuplicateId(String),
}

/// Group key to member positions, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBankIndex {
    members: BTreeMap<String, Vec<usize>>,
}

impl DayBankIndex {
    fn build(resorts: &[Resort]) -> Self {
        let mut members: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, resort) in resorts.iter().enumerate() {
            if let Some(group) = resort.day_bank() {
                members.entry(group.to_string()).or_default().push(idx);
            }
        }
        Self { members }
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    #[must_use]
    pub fn positions(&self, group: &str) -> &[usize] {
        self.members.get(group).map_or(&[][..], Vec::as_slice)
    }
}

/// The ordered, read-only resort table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    resorts: Vec<Resort>,
    by_id: HashMap<String, usize>,
    banks: DayBankIndex,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] when two records share an id.
    pub fn from_resorts(resorts: Vec<Resort>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(resorts.len());
        for (idx, resort) in resorts.iter().enumerate() {
            if by_id.insert(resort.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(resort.id.clone()));
            }
        }
        let banks = DayBankIndex::build(&resorts);
        Ok(Self {
            resorts,
            by_id,
            banks,
        })
    }

    /// Parse a JSON array of resort records.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or ids repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let resorts: Vec<Resort> = serde_json::from_str(json)?;
        Self::from_resorts(resorts)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Resort> {
        self.by_id.get(id).map(|&idx| &self.resorts[idx])
    }

    #[must_use]
    pub fn resorts(&self) -> &[Resort] {
        &self.resorts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resorts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resorts.is_empty()
    }

    #[must_use]
    pub const fn day_banks(&self) -> &DayBankIndex {
        &self.banks
    }

    /// All resorts drawing from `group`, in catalog order.
    pub fn bank_members<'a>(&'a self, group: &str) -> impl Iterator<Item = &'a Resort> + 'a {
        self.banks
            .positions(group)
            .iter()
            .map(move |&idx| &self.resorts[idx])
    }

    /// Other members of `resort`'s day bank; empty for individual allowances.
    #[must_use]
    pub fn bank_siblings(&self, resort: &Resort) -> Vec<&Resort> {
        resort.day_bank().map_or_else(Vec::new, |group| {
            self.bank_members(group)
                .filter(|other| other.id != resort.id)
                .collect()
        })
    }

    /// Check the data invariants the accounting engine relies on.
    #[must_use]
    pub fn audit(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        self.audit_allowances(&mut issues);
        self.audit_banks(&mut issues);
        self.audit_coordinates(&mut issues);
        self.audit_names(&mut issues);
        for issue in &issues {
            log::warn!("catalog issue: {issue}");
        }
        issues
    }

    fn audit_allowances(&self, issues: &mut Vec<CatalogIssue>) {
        for resort in &self.resorts {
            for pass in PassType::ALL {
                let allowance = resort.pass_days(pass);
                if allowance.shape() == AllowanceShape::Unrecognised {
                    issues.push(CatalogIssue::UnrecognisedAllowance {
                        resort_id: resort.id.clone(),
                        pass,
                        raw: allowance.raw().to_string(),
                    });
                }
            }
        }
    }

    fn audit_banks(&self, issues: &mut Vec<CatalogIssue>) {
        for group in self.banks.groups() {
            let members: Vec<&Resort> = self.bank_members(group).collect();
            let [first, rest @ ..] = members.as_slice() else {
                continue;
            };
            if rest.is_empty() {
                issues.push(CatalogIssue::SingletonBank {
                    group: group.to_string(),
                    resort_id: first.id.clone(),
                });
            }
            for other in rest {
                for pass in PassType::ALL {
                    let expected = first.pass_days(pass).raw();
                    let found = other.pass_days(pass).raw();
                    if expected != found {
                        issues.push(CatalogIssue::SharedAllowanceMismatch {
                            group: group.to_string(),
                            pass,
                            resort_id: other.id.clone(),
                            expected: expected.to_string(),
                            found: found.to_string(),
                        });
                    }
                }
            }
        }
    }

    fn audit_coordinates(&self, issues: &mut Vec<CatalogIssue>) {
        for resort in &self.resorts {
            let lat_ok = resort.latitude.is_finite() && resort.latitude.abs() < 90.0;
            let lng_ok = resort.longitude.is_finite() && resort.longitude.abs() <= 180.0;
            if !(lat_ok && lng_ok) {
                issues.push(CatalogIssue::CoordinatesOutOfRange {
                    resort_id: resort.id.clone(),
                    latitude: resort.latitude,
                    longitude: resort.longitude,
                });
            }
        }
    }

    fn audit_names(&self, issues: &mut Vec<CatalogIssue>) {
        let mut seen = HashSet::new();
        for resort in &self.resorts {
            if !seen.insert(resort.name.as_str()) {
                issues.push(CatalogIssue::DuplicateName {
                    name: resort.name.clone(),
                });
            }
        }
    }
}

/// A data bug found by [`Catalog::audit`].
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogIssue {
    #[error("{resort_id}: {pass} allowance `{raw}` is not a recognised shape")]
    UnrecognisedAllowance {
        resort_id: String,
        pass: PassType,
        raw: String,
    },
    #[error("{resort_id}: {pass} allowance `{found}` differs from `{expected}` in bank {group}")]
    SharedAllowanceMismatch {
        group: String,
        pass: PassType,
        resort_id: String,
        expected: String,
        found: String,
    },
    #[error("bank {group} has a single member ({resort_id})")]
    SingletonBank { group: String, resort_id: String },
    #[error("{resort_id}: coordinates ({latitude}, {longitude}) are outside the projectable range")]
    CoordinatesOutOfRange {
        resort_id: String,
        latitude: f64,
        longitude: f64,
    },
    #[error("resort name `{name}` appears more than once")]
    DuplicateName { name: String },
}
