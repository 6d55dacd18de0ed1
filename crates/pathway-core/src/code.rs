//! Coding systems and record codings.
//!
//! A clinical record carries zero or more `Coding` triples. The `system`
//! component on a record is kept as the raw string supplied by the host so
//! that unknown systems flow through untouched; they simply never match a
//! value set.

use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Coding systems recognized by the value-set layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CodingSystem {
    Cpt,
    Cvx,
    Hcpcs,
    Icd10Cm,
    Icd10Pcs,
    Icd9Cm,
    Loinc,
    RxNorm,
    SnomedCt,
    Cdt,
    Fdb,
    Ndc,
    CdcRec,
    Sop,
    AdministrativeGender,
    Internal,
    Canvas,
}

impl CodingSystem {
    /// Returns the canonical string form of the system.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodingSystem::Cpt => "CPT",
            CodingSystem::Cvx => "CVX",
            CodingSystem::Hcpcs => "HCPCS",
            CodingSystem::Icd10Cm => "ICD10CM",
            CodingSystem::Icd10Pcs => "ICD10PCS",
            CodingSystem::Icd9Cm => "ICD9CM",
            CodingSystem::Loinc => "LOINC",
            CodingSystem::RxNorm => "RXNORM",
            CodingSystem::SnomedCt => "SNOMEDCT",
            CodingSystem::Cdt => "CDT",
            CodingSystem::Fdb => "FDB",
            CodingSystem::Ndc => "NDC",
            CodingSystem::CdcRec => "CDCREC",
            CodingSystem::Sop => "SOP",
            CodingSystem::AdministrativeGender => "AdministrativeGender",
            CodingSystem::Internal => "INTERNAL",
            CodingSystem::Canvas => "CANVAS",
        }
    }

    /// All recognized systems, in canonical order.
    pub fn all() -> &'static [CodingSystem] {
        &[
            CodingSystem::Cpt,
            CodingSystem::Cvx,
            CodingSystem::Hcpcs,
            CodingSystem::Icd10Cm,
            CodingSystem::Icd10Pcs,
            CodingSystem::Icd9Cm,
            CodingSystem::Loinc,
            CodingSystem::RxNorm,
            CodingSystem::SnomedCt,
            CodingSystem::Cdt,
            CodingSystem::Fdb,
            CodingSystem::Ndc,
            CodingSystem::CdcRec,
            CodingSystem::Sop,
            CodingSystem::AdministrativeGender,
            CodingSystem::Internal,
            CodingSystem::Canvas,
        ]
    }
}

impl fmt::Display for CodingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CodingSystem {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CPT" => Ok(CodingSystem::Cpt),
            "CVX" => Ok(CodingSystem::Cvx),
            // Both spellings appear in upstream record dumps.
            "HCPCS" | "HCPCSLEVELII" => Ok(CodingSystem::Hcpcs),
            "ICD10CM" | "ICD-10-CM" => Ok(CodingSystem::Icd10Cm),
            "ICD10PCS" | "ICD-10-PCS" => Ok(CodingSystem::Icd10Pcs),
            "ICD9CM" | "ICD-9-CM" => Ok(CodingSystem::Icd9Cm),
            "LOINC" => Ok(CodingSystem::Loinc),
            "RXNORM" => Ok(CodingSystem::RxNorm),
            "SNOMEDCT" | "SNOMED-CT" | "SNOMED" => Ok(CodingSystem::SnomedCt),
            "CDT" => Ok(CodingSystem::Cdt),
            "FDB" => Ok(CodingSystem::Fdb),
            "NDC" => Ok(CodingSystem::Ndc),
            "CDCREC" => Ok(CodingSystem::CdcRec),
            "SOP" => Ok(CodingSystem::Sop),
            "ADMINISTRATIVEGENDER" => Ok(CodingSystem::AdministrativeGender),
            "INTERNAL" => Ok(CodingSystem::Internal),
            "CANVAS" => Ok(CodingSystem::Canvas),
            _ => Err(CoreError::unknown_coding_system(s)),
        }
    }
}

impl Serialize for CodingSystem {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CodingSystem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CodingSystem::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A (system, code, display) triple attached to a clinical record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    /// Coding system as supplied by the host, e.g. "LOINC" or "ICD10CM".
    pub system: String,
    /// The code value. Referral and imaging report dumps write `value` for
    /// the same field, and some carry both keys.
    pub code: String,
    /// Human-readable display text, when the host provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl<'de> Deserialize<'de> for Coding {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `code` wins when a dump carries both keys; a coding with neither
        // gets an empty code and simply never matches.
        #[derive(Default, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        struct Raw {
            system: String,
            code: Option<String>,
            value: Option<String>,
            display: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Coding {
            system: raw.system,
            code: raw.code.or(raw.value).unwrap_or_default(),
            display: raw.display,
        })
    }
}

impl Coding {
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
            display: None,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// The recognized coding system, if the raw string names one.
    pub fn coding_system(&self) -> Option<CodingSystem> {
        CodingSystem::from_str(&self.system).ok()
    }
}

/// Equality is by (system, code); display text is presentation only.
impl PartialEq for Coding {
    fn eq(&self, other: &Self) -> bool {
        let system_eq = match (self.coding_system(), other.coding_system()) {
            (Some(a), Some(b)) => a == b,
            _ => self.system.eq_ignore_ascii_case(&other.system),
        };
        system_eq && self.code == other.code
    }
}

impl Eq for Coding {}
