//! Immunization value sets.

use crate::value_set::ValueSet;
use pathway_core::CodingSystem;
use std::sync::LazyLock;

pub static INFLUENZA_VACCINE: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Influenza Vaccine")
        .oid("2.16.840.1.113883.3.526.3.1254")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Cvx,
            [
                "88", "135", "140", "141", "144", "149", "150", "155", "158", "161", "166",
                "168", "171", "185", "186", "197", "205",
            ],
        )
        .codes(
            CodingSystem::Cpt,
            [
                "90630", "90653", "90654", "90655", "90656", "90657", "90658", "90661", "90662",
                "90666", "90667", "90668", "90672", "90673", "90674", "90682", "90685", "90686",
                "90687", "90688", "90689", "90694", "90756",
            ],
        )
        .build()
});

pub static PNEUMOCOCCAL_VACCINE: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Pneumococcal Vaccine")
        .oid("2.16.840.1.113883.3.464.1003.110.12.1027")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::Cvx, ["33", "100", "109", "133", "152", "215", "216"])
        .codes(CodingSystem::Cpt, ["90670", "90671", "90677", "90732"])
        .build()
});
