//! Structured-interview (questionnaire) value sets.

use crate::value_set::ValueSet;
use pathway_core::CodingSystem;
use std::sync::LazyLock;

pub static PHQ9: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("PHQ-9 Questionnaire")
        .codes(CodingSystem::Loinc, ["44249-1"])
        .codes(CodingSystem::Internal, ["PHQ9"])
        .build()
});

pub static PHQ2: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("PHQ-2 Questionnaire")
        .codes(CodingSystem::Loinc, ["55758-7"])
        .codes(CodingSystem::Internal, ["PHQ2"])
        .build()
});

pub static GAD7: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("GAD-7 Questionnaire")
        .codes(CodingSystem::Loinc, ["69737-5"])
        .codes(CodingSystem::Internal, ["GAD7"])
        .build()
});

pub static TOBACCO_USE_SCREENING: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Tobacco Use Screening")
        .oid("2.16.840.1.113883.3.526.3.1278")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::Loinc, ["39240-7", "68535-4", "68536-2", "72166-2"])
        .build()
});
