//! Patient-instruction value sets.

use crate::value_set::ValueSet;
use pathway_core::CodingSystem;
use std::sync::LazyLock;

pub static BREAST_CANCER_SCREENING_EDUCATION: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Breast Cancer Screening")
        .codes(CodingSystem::SnomedCt, ["171149006", "268547008"])
        .build()
});

pub static TOBACCO_CESSATION_COUNSELING: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Tobacco Use Cessation Counseling")
        .oid("2.16.840.1.113883.3.526.3.509")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::Cpt, ["99406", "99407"])
        .codes(
            CodingSystem::SnomedCt,
            ["171055003", "185795007", "225323000", "225324006", "310429001", "384742004"],
        )
        .build()
});
