//! Procedure and exam value sets.

use crate::value_set::ValueSet;
use pathway_core::CodingSystem;
use std::sync::LazyLock;

pub static MAMMOGRAPHY: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Mammography")
        .oid("2.16.840.1.113883.3.464.1003.108.12.1018")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Cpt,
            ["77061", "77062", "77063", "77065", "77066", "77067"],
        )
        .codes(CodingSystem::Hcpcs, ["G0202", "G0204", "G0206"])
        .codes(
            CodingSystem::Loinc,
            [
                "24604-1", "24605-8", "24606-6", "24610-8", "26175-0", "26176-8", "26177-6",
                "26287-3", "26289-9", "26291-5", "26346-7", "26347-5", "26348-3", "26349-1",
                "26350-9", "26351-7", "36319-2", "36625-2", "36626-0", "36627-8", "36642-7",
                "36962-9", "37005-6", "37006-4", "37016-3", "37017-1", "37028-8", "37029-6",
                "37030-4", "37038-7", "37052-8", "37053-6", "37539-4", "37542-8", "37543-6",
                "37551-9", "37553-5", "37554-3", "37768-9", "37769-7", "37770-5", "37771-3",
                "37772-1", "37773-9", "37774-7", "37775-4", "38070-9", "38071-7", "38072-5",
                "38090-7", "38091-5", "38807-4", "38820-7", "38854-6", "38855-3", "39150-8",
                "39152-4", "39153-2", "39154-0", "42415-0", "42416-8", "46335-6", "46336-4",
                "46337-2", "46338-0", "46339-8", "46342-2", "46350-5", "46351-3", "46354-7",
                "46355-4", "46356-2", "46380-2", "48475-8", "48492-3", "69150-1", "69251-7",
                "72137-3", "72138-1", "72139-9", "72140-7", "72141-5", "72142-3", "86462-9",
                "86463-7",
            ],
        )
        .codes(
            CodingSystem::SnomedCt,
            [
                "24623002", "71651007", "241055006", "241056007", "241057003", "572701000119102",
            ],
        )
        .build()
});

pub static COLONOSCOPY: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Colonoscopy")
        .oid("2.16.840.1.113883.3.464.1003.108.12.1020")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Cpt,
            [
                "44388", "44389", "44390", "44391", "44392", "44394", "44401", "44402", "44403",
                "44404", "44405", "44406", "44407", "44408", "45378", "45379", "45380", "45381",
                "45382", "45384", "45385", "45386", "45388", "45389", "45390", "45391", "45392",
                "45393", "45398",
            ],
        )
        .codes(
            CodingSystem::SnomedCt,
            [
                "8180007", "12350003", "25732003", "34264006", "73761001", "174158000",
                "235150006", "235151005", "310634005", "443998000", "444783004", "446521004",
                "446745002", "447021001", "709421007", "710293001", "711307001", "713154003",
            ],
        )
        .build()
});

pub static HOSPICE_CARE_AMBULATORY: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Hospice Care Ambulatory")
        .oid("2.16.840.1.113762.1.4.1108.15")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::Cpt, ["99377", "99378"])
        .codes(CodingSystem::Hcpcs, ["G0182", "G9473", "G9474", "G9475", "G9476", "G9477", "G9478", "G9479", "S9126", "T2042", "T2043", "T2044", "T2045", "T2046"])
        .codes(
            CodingSystem::SnomedCt,
            ["170935008", "170936009", "183919006", "183920000", "183921001", "305336008", "305911006", "385763009"],
        )
        .build()
});

pub static BILATERAL_MASTECTOMY: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Bilateral Mastectomy")
        .oid("2.16.840.1.113883.3.464.1003.198.12.1005")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::Icd10Pcs, ["0HTV0ZZ"])
        .codes(
            CodingSystem::SnomedCt,
            [
                "14693006", "14714006", "17086001", "22418005", "27865001", "52314009",
                "59860000", "60633004", "76468001", "287653007", "456903003", "726429001",
                "726435001", "836436008",
            ],
        )
        .build()
});

pub static HISTORY_OF_BILATERAL_MASTECTOMY: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("History of Bilateral Mastectomy")
        .oid("2.16.840.1.113883.3.464.1003.198.12.1068")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::SnomedCt, ["136071000119101", "428529004"])
        .build()
});
