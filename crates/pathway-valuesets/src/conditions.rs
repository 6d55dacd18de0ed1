//! Diagnosis value sets.

use crate::value_set::ValueSet;
use pathway_core::CodingSystem;
use std::sync::LazyLock;

pub static DIABETES: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Diabetes")
        .oid("2.16.840.1.113883.3.464.1003.103.12.1001")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Icd10Cm,
            [
                "E10.10", "E10.11", "E10.21", "E10.22", "E10.29", "E10.36", "E10.39", "E10.40",
                "E10.41", "E10.42", "E10.43", "E10.44", "E10.49", "E10.51", "E10.52", "E10.59",
                "E10.610", "E10.618", "E10.620", "E10.621", "E10.622", "E10.628", "E10.630",
                "E10.638", "E10.641", "E10.649", "E10.65", "E10.69", "E10.8", "E10.9", "E11.00",
                "E11.01", "E11.21", "E11.22", "E11.29", "E11.36", "E11.39", "E11.40", "E11.41",
                "E11.42", "E11.43", "E11.44", "E11.49", "E11.51", "E11.52", "E11.59", "E11.610",
                "E11.618", "E11.620", "E11.621", "E11.622", "E11.628", "E11.630", "E11.638",
                "E11.641", "E11.649", "E11.65", "E11.69", "E11.8", "E11.9", "E13.00", "E13.01",
                "E13.10", "E13.11", "E13.21", "E13.22", "E13.29", "E13.36", "E13.39", "E13.40",
                "E13.41", "E13.42", "E13.43", "E13.44", "E13.49", "E13.51", "E13.52", "E13.59",
                "E13.610", "E13.618", "E13.620", "E13.621", "E13.622", "E13.628", "E13.630",
                "E13.638", "E13.641", "E13.649", "E13.65", "E13.69", "E13.8", "E13.9",
            ],
        )
        .codes(
            CodingSystem::SnomedCt,
            [
                "23045005", "28032008", "44054006", "46635009", "190330002", "190368000",
                "190372001", "199230006", "237599002", "237618001", "314893005", "359642000",
                "426875007", "427089005", "443694000", "609567009",
            ],
        )
        .build()
});

pub static ESSENTIAL_HYPERTENSION: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Essential Hypertension")
        .oid("2.16.840.1.113883.3.464.1003.104.12.1011")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::Icd10Cm, ["I10"])
        .codes(
            CodingSystem::SnomedCt,
            ["59621000", "78975002", "1201005", "18416000", "31992008", "48146000"],
        )
        .build()
});

pub static MAJOR_DEPRESSION: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Major Depression")
        .oid("2.16.840.1.113883.3.526.3.1007")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Icd10Cm,
            [
                "F32.0", "F32.1", "F32.2", "F32.3", "F32.4", "F32.5", "F32.9", "F33.0", "F33.1",
                "F33.2", "F33.3", "F33.40", "F33.41", "F33.42", "F33.9",
            ],
        )
        .codes(
            CodingSystem::SnomedCt,
            [
                "14183003", "15193003", "15639000", "18818009", "35489007", "36923009",
                "66344007", "75084000", "76441001", "370143000", "712823008",
            ],
        )
        .build()
});

pub static PREGNANCY: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Pregnancy")
        .oid("2.16.840.1.113883.3.526.3.378")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Icd10Cm,
            ["Z33.1", "Z34.00", "Z34.80", "Z34.90", "O09.90", "O26.821", "O26.822", "O26.823"],
        )
        .codes(CodingSystem::SnomedCt, ["77386006", "72892002", "47200007"])
        .build()
});
