//! Immutable value sets: named bundles of codes keyed by coding system.
//!
//! Value sets are the leaves of the criterion language. A record matches a
//! value set when at least one of its codings is a member. Membership is
//! exact enumeration; there is no wildcard or hierarchical expansion, so a
//! set must list every code it intends to match.

use pathway_core::{Coding, CodingSystem};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::BitOr;

/// A named, versioned bundle of codes across one or more coding systems.
///
/// Immutable after construction; compose with `|` to take unions:
///
/// ```
/// use pathway_valuesets::labs::HBA1C_LABORATORY_TEST;
/// use pathway_valuesets::conditions::DIABETES;
///
/// let either = &*DIABETES | &*HBA1C_LABORATORY_TEST;
/// assert_eq!(either.name(), "Diabetes or HbA1c Laboratory Test");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSet {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expansion_version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    codes: BTreeMap<CodingSystem, BTreeSet<String>>,
}

impl ValueSet {
    /// Start building a value set with the given display name.
    pub fn builder(name: impl Into<String>) -> ValueSetBuilder {
        ValueSetBuilder {
            name: name.into(),
            oid: None,
            expansion_version: None,
            codes: BTreeMap::new(),
        }
    }

    /// The empty value set: matches nothing, identity for union.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            oid: None,
            expansion_version: None,
            codes: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oid(&self) -> Option<&str> {
        self.oid.as_deref()
    }

    pub fn expansion_version(&self) -> Option<&str> {
        self.expansion_version.as_deref()
    }

    /// Membership test for a (system, code) pair.
    pub fn contains(&self, system: CodingSystem, code: &str) -> bool {
        self.codes
            .get(&system)
            .is_some_and(|values| values.contains(code))
    }

    /// Membership test for a raw record coding. Unknown coding systems never
    /// match.
    pub fn contains_coding(&self, coding: &Coding) -> bool {
        coding
            .coding_system()
            .is_some_and(|system| self.contains(system, &coding.code))
    }

    /// The recognized systems with non-empty code sets.
    pub fn systems(&self) -> BTreeSet<CodingSystem> {
        self.codes
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(system, _)| *system)
            .collect()
    }

    /// The codes declared for one system.
    pub fn codes_for(&self, system: CodingSystem) -> Option<&BTreeSet<String>> {
        self.codes.get(&system)
    }

    /// True when no system has any codes; an empty set never matches.
    pub fn is_empty(&self) -> bool {
        self.codes.values().all(BTreeSet::is_empty)
    }

    /// Union of two value sets: per-system element-wise union, named
    /// "A or B". The empty set is the identity and self-union keeps the
    /// original name.
    pub fn union(&self, other: &ValueSet) -> ValueSet {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut codes = self.codes.clone();
        for (system, values) in &other.codes {
            codes.entry(*system).or_default().extend(values.iter().cloned());
        }
        let name = if self.name == other.name {
            self.name.clone()
        } else {
            format!("{} or {}", self.name, other.name)
        };
        ValueSet {
            name,
            // Composite sets have no single authority.
            oid: None,
            expansion_version: None,
            codes,
        }
    }

    /// Per-system set intersection; the composite keeps no oid.
    pub fn intersection(&self, other: &ValueSet) -> ValueSet {
        let mut codes = BTreeMap::new();
        for (system, values) in &self.codes {
            if let Some(other_values) = other.codes.get(system) {
                let common: BTreeSet<String> =
                    values.intersection(other_values).cloned().collect();
                if !common.is_empty() {
                    codes.insert(*system, common);
                }
            }
        }
        ValueSet {
            name: format!("{} and {}", self.name, other.name),
            oid: None,
            expansion_version: None,
            codes,
        }
    }
}

impl BitOr for &ValueSet {
    type Output = ValueSet;

    fn bitor(self, rhs: &ValueSet) -> ValueSet {
        self.union(rhs)
    }
}

impl BitOr for ValueSet {
    type Output = ValueSet;

    fn bitor(self, rhs: ValueSet) -> ValueSet {
        self.union(&rhs)
    }
}

/// Builder for `ValueSet`; the only way to construct a non-empty one.
#[derive(Debug, Clone)]
pub struct ValueSetBuilder {
    name: String,
    oid: Option<String>,
    expansion_version: Option<String>,
    codes: BTreeMap<CodingSystem, BTreeSet<String>>,
}

impl ValueSetBuilder {
    pub fn oid(mut self, oid: impl Into<String>) -> Self {
        self.oid = Some(oid.into());
        self
    }

    pub fn expansion_version(mut self, version: impl Into<String>) -> Self {
        self.expansion_version = Some(version.into());
        self
    }

    /// Add codes under one system; repeated calls accumulate.
    pub fn codes<I, S>(mut self, system: CodingSystem, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.codes
            .entry(system)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> ValueSet {
        ValueSet {
            name: self.name,
            oid: self.oid,
            expansion_version: self.expansion_version,
            codes: self.codes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_a() -> ValueSet {
        ValueSet::builder("A")
            .codes(CodingSystem::Loinc, ["1111-1", "2222-2"])
            .codes(CodingSystem::Cpt, ["99213"])
            .build()
    }

    fn set_b() -> ValueSet {
        ValueSet::builder("B")
            .codes(CodingSystem::Loinc, ["2222-2", "3333-3"])
            .build()
    }

    #[test]
    fn test_contains() {
        let a = set_a();
        assert!(a.contains(CodingSystem::Loinc, "1111-1"));
        assert!(!a.contains(CodingSystem::Loinc, "9999-9"));
        assert!(!a.contains(CodingSystem::SnomedCt, "1111-1"));
    }

    #[test]
    fn test_contains_coding_unknown_system() {
        let a = set_a();
        assert!(a.contains_coding(&Coding::new("loinc", "1111-1")));
        assert!(!a.contains_coding(&Coding::new("NOTASYSTEM", "1111-1")));
    }

    #[test]
    fn test_union_name_and_membership() {
        let composite = &set_a() | &set_b();
        assert_eq!(composite.name(), "A or B");
        assert!(composite.contains(CodingSystem::Loinc, "1111-1"));
        assert!(composite.contains(CodingSystem::Loinc, "3333-3"));
        assert!(composite.contains(CodingSystem::Cpt, "99213"));
    }

    #[test]
    fn test_union_commutative_membership() {
        let ab = &set_a() | &set_b();
        let ba = &set_b() | &set_a();
        assert_eq!(ab.codes, ba.codes);
    }

    #[test]
    fn test_union_associative() {
        let c = ValueSet::builder("C")
            .codes(CodingSystem::SnomedCt, ["44054006"])
            .build();
        let left = &(&set_a() | &set_b()) | &c;
        let right = &set_a() | &(&set_b() | &c);
        assert_eq!(left.codes, right.codes);
    }

    #[test]
    fn test_union_idempotent() {
        let a = set_a();
        let doubled = &a | &a;
        assert_eq!(doubled, a);
    }

    #[test]
    fn test_empty_is_identity() {
        let a = set_a();
        assert_eq!(&a | &ValueSet::empty(), a);
        assert_eq!(&ValueSet::empty() | &a, a);
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(!ValueSet::empty().contains(CodingSystem::Loinc, "1111-1"));
    }

    #[test]
    fn test_intersection_per_system() {
        let common = set_a().intersection(&set_b());
        assert!(common.contains(CodingSystem::Loinc, "2222-2"));
        assert!(!common.contains(CodingSystem::Loinc, "1111-1"));
        assert!(!common.contains(CodingSystem::Cpt, "99213"));
    }

    #[test]
    fn test_systems_reports_non_empty_only() {
        let systems = set_a().systems();
        assert!(systems.contains(&CodingSystem::Loinc));
        assert!(systems.contains(&CodingSystem::Cpt));
        assert!(!systems.contains(&CodingSystem::SnomedCt));
    }

    #[test]
    fn test_serde_roundtrip() {
        let a = set_a();
        let json = serde_json::to_string(&a).unwrap();
        let back: ValueSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
