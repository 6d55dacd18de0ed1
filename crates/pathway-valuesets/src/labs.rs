//! Laboratory test value sets. LOINC dominates here.

use crate::value_set::ValueSet;
use pathway_core::CodingSystem;
use std::sync::LazyLock;

pub static HBA1C_LABORATORY_TEST: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("HbA1c Laboratory Test")
        .oid("2.16.840.1.113883.3.464.1003.198.12.1013")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::Loinc, ["17856-6", "4548-4", "4549-2"])
        .build()
});

pub static LDL_CHOLESTEROL: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("LDL Cholesterol")
        .oid("2.16.840.1.113883.3.526.3.1573")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Loinc,
            ["13457-7", "18261-8", "18262-6", "2089-1", "43394-6", "50193-2", "55440-2"],
        )
        .build()
});

pub static SERUM_CREATININE: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Serum Creatinine")
        .codes(CodingSystem::Loinc, ["2160-0", "38483-4"])
        .build()
});

pub static URINE_MICROALBUMIN: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Urine Microalbumin")
        .oid("2.16.840.1.113883.3.464.1003.109.12.1024")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Loinc,
            [
                "11218-5", "13705-9", "14956-7", "14957-5", "14958-3", "14959-1", "1753-3",
                "1754-1", "1755-8", "1757-4", "21059-1", "2887-8", "2888-6", "2889-4", "2890-2",
                "30000-4", "30001-2", "30003-8", "32209-9", "32294-1", "32551-4", "34366-5",
                "40486-3", "43605-5", "43606-3", "43607-1", "44292-1", "47558-2", "49002-9",
                "49023-5", "50209-6", "50561-0", "53121-0", "53525-2", "53530-2", "53531-0",
                "53532-8", "56553-1", "57369-1", "58448-2", "58992-9", "59159-4", "60678-0",
                "63474-1", "76401-9", "77253-3", "77254-1", "89998-9", "9318-7",
            ],
        )
        .build()
});
