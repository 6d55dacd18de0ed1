//! Encounter and visit value sets, including appointment note types.

use crate::value_set::ValueSet;
use pathway_core::CodingSystem;
use std::sync::LazyLock;

pub static OFFICE_VISIT: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Office Visit")
        .oid("2.16.840.1.113883.3.464.1003.101.12.1001")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Cpt,
            [
                "99201", "99202", "99203", "99204", "99205", "99211", "99212", "99213", "99214",
                "99215",
            ],
        )
        .codes(
            CodingSystem::SnomedCt,
            ["185463005", "185464004", "185465003", "30346009", "3391000175108", "37894004", "439740005"],
        )
        .build()
});

pub static PREVENTIVE_CARE_SERVICES_ESTABLISHED: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Preventive Care Services - Established Office Visit, 18 and Up")
        .oid("2.16.840.1.113883.3.464.1003.101.12.1025")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::Cpt, ["99395", "99396", "99397"])
        .build()
});

pub static PREVENTIVE_CARE_SERVICES_INITIAL: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Preventive Care Services - Initial Office Visit, 18 and Up")
        .oid("2.16.840.1.113883.3.464.1003.101.12.1023")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::Cpt, ["99385", "99386", "99387"])
        .build()
});

pub static ANNUAL_WELLNESS_VISIT: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Annual Wellness Visit")
        .oid("2.16.840.1.113883.3.526.3.1240")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(CodingSystem::Hcpcs, ["G0438", "G0439"])
        .codes(CodingSystem::SnomedCt, ["444971000124105", "456201000124103", "86013001", "90526000"])
        .build()
});

pub static HOME_HEALTHCARE_SERVICES: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Home Healthcare Services")
        .oid("2.16.840.1.113883.3.464.1003.101.12.1016")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Cpt,
            ["99341", "99342", "99343", "99344", "99345", "99347", "99348", "99349", "99350"],
        )
        .codes(CodingSystem::SnomedCt, ["185460008", "185462000", "185466002", "185467006", "185468001", "185470005", "225929007", "315205008", "439708006", "698704008", "704126008"])
        .build()
});

/// Telehealth consultation note types as they appear on appointment records.
pub static TELEHEALTH_CONSULTATION: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Telehealth Consultation")
        .codes(CodingSystem::SnomedCt, ["448337001"])
        .codes(CodingSystem::Internal, ["TELEHEALTH"])
        .build()
});

pub static TELEPHONE_VISITS: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Telephone Visits")
        .oid("2.16.840.1.113883.3.464.1003.101.12.1080")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::Cpt,
            ["98966", "98967", "98968", "99441", "99442", "99443"],
        )
        .codes(CodingSystem::SnomedCt, ["185317003", "314849005", "386472008", "386473003", "386479004"])
        .build()
});
