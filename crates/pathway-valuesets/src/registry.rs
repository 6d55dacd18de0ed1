//! Name-keyed lookup over every declared value set.
//!
//! Protocol hot-reload and the test harness resolve value sets by display
//! name; the tables themselves stay in their domain modules.

use crate::value_set::ValueSet;
use crate::{
    conditions, encounters, immunizations, instructions, labs, medications, procedures,
    questionnaires,
};
use std::sync::LazyLock;

/// Every value set declared in this crate, in a stable order.
pub fn all() -> Vec<&'static ValueSet> {
    vec![
        LazyLock::force(&conditions::DIABETES),
        LazyLock::force(&conditions::ESSENTIAL_HYPERTENSION),
        LazyLock::force(&conditions::MAJOR_DEPRESSION),
        LazyLock::force(&conditions::PREGNANCY),
        LazyLock::force(&encounters::ANNUAL_WELLNESS_VISIT),
        LazyLock::force(&encounters::HOME_HEALTHCARE_SERVICES),
        LazyLock::force(&encounters::OFFICE_VISIT),
        LazyLock::force(&encounters::PREVENTIVE_CARE_SERVICES_ESTABLISHED),
        LazyLock::force(&encounters::PREVENTIVE_CARE_SERVICES_INITIAL),
        LazyLock::force(&encounters::TELEHEALTH_CONSULTATION),
        LazyLock::force(&encounters::TELEPHONE_VISITS),
        LazyLock::force(&immunizations::INFLUENZA_VACCINE),
        LazyLock::force(&immunizations::PNEUMOCOCCAL_VACCINE),
        LazyLock::force(&instructions::BREAST_CANCER_SCREENING_EDUCATION),
        LazyLock::force(&instructions::TOBACCO_CESSATION_COUNSELING),
        LazyLock::force(&labs::HBA1C_LABORATORY_TEST),
        LazyLock::force(&labs::LDL_CHOLESTEROL),
        LazyLock::force(&labs::SERUM_CREATININE),
        LazyLock::force(&labs::URINE_MICROALBUMIN),
        LazyLock::force(&medications::ANTIDEPRESSANT_MEDICATION),
        LazyLock::force(&medications::INSULIN),
        LazyLock::force(&medications::METFORMIN),
        LazyLock::force(&medications::STATIN_THERAPY),
        LazyLock::force(&procedures::BILATERAL_MASTECTOMY),
        LazyLock::force(&procedures::COLONOSCOPY),
        LazyLock::force(&procedures::HISTORY_OF_BILATERAL_MASTECTOMY),
        LazyLock::force(&procedures::HOSPICE_CARE_AMBULATORY),
        LazyLock::force(&procedures::MAMMOGRAPHY),
        LazyLock::force(&questionnaires::GAD7),
        LazyLock::force(&questionnaires::PHQ2),
        LazyLock::force(&questionnaires::PHQ9),
        LazyLock::force(&questionnaires::TOBACCO_USE_SCREENING),
    ]
}

/// Resolve a value set by display name, case-insensitively.
pub fn lookup(name: &str) -> Option<&'static ValueSet> {
    all()
        .into_iter()
        .find(|vs| vs.name().eq_ignore_ascii_case(name))
}
