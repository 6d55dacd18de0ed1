//! Medication value sets, keyed predominantly by RxNorm.
//!
//! These are the single canonical declarations; the migrated corpus carried
//! several byte-identical copies of `Insulin` and `Metformin` and those all
//! collapse here.

use crate::value_set::ValueSet;
use pathway_core::CodingSystem;
use std::sync::LazyLock;

pub static METFORMIN: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Metformin")
        .codes(
            CodingSystem::RxNorm,
            [
                "860974", "860975", "860976", "860977", "860978", "860979", "860980", "860981",
                "860982", "860983", "860984", "860985", "860995", "860996", "860997", "860998",
                "860999", "861000", "861001", "861002", "861003", "861004", "861005", "861006",
                "861007", "861008", "861009", "861010", "861011", "861012", "861014", "861015",
                "861016", "861017", "861018", "861019", "861020", "861021", "861022", "861023",
                "861024", "861025", "861026", "861027", "861730", "861731", "861736", "861740",
                "861743", "861748", "861753", "861760", "861763", "861769", "861783", "861787",
                "861790", "861795", "861806", "861816", "861822",
            ],
        )
        .codes(CodingSystem::Fdb, ["151827", "160275", "170719", "193385"])
        .build()
});

pub static INSULIN: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Insulin")
        .codes(
            CodingSystem::RxNorm,
            [
                "106892", "139825", "1372723", "1372741", "1372744", "1604538", "1604539",
                "1604540", "1604541", "1604543", "1604544", "1650256", "1650260", "1650262",
                "1650264", "1651315", "1652237", "1652238", "1652239", "1652240", "1652241",
                "1652242", "1652639", "1652640", "1652643", "1652644", "1652645", "1652646",
                "1653104", "1653106", "1653196", "1653197", "1653198", "1653200", "1653202",
                "1653203", "1653204", "1653206", "1654060", "1654190", "1654192", "1654341",
                "1654348", "1654355", "1654857", "1654858", "1654862", "1654863", "1654866",
                "1654909", "1654910", "1654911", "1654912", "1727493", "1731314", "1731315",
                "1731316", "1731317", "1736613", "1736859", "1736860", "1736861", "1736862",
                "1736863", "1736864", "1743273", "1860165", "1860166", "1860167", "1860168",
                "1860169", "1860170", "1860171", "1860172", "1862101", "1862102", "1926331",
                "1926332", "1986350", "1986351", "1986352", "1986353", "1986354", "1986355",
                "1986356", "1992165", "1992166", "1992167", "1992168", "1992169", "1992170",
                "1992171", "2002419", "2002420", "2049379", "2049380", "2100028", "2100029",
                "2107519", "2107520", "2107521", "2107522", "2179742", "2179743", "2179744",
                "2179745", "2179746", "2179747", "2179748", "2179749",
            ],
        )
        .codes(CodingSystem::Fdb, ["205830", "217651", "222372", "244483"])
        .build()
});

pub static ANTIDEPRESSANT_MEDICATION: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Antidepressant Medication")
        .oid("2.16.840.1.113883.3.464.1003.196.12.1213")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::RxNorm,
            [
                "103968", "104837", "197363", "197364", "197365", "197366", "198045", "198046",
                "198047", "199283", "200371", "248642", "251201", "283406", "283407", "283672",
                "309313", "309314", "310384", "310385", "310386", "312036", "312242", "312347",
                "313580", "313581", "313582", "313583", "313584", "313585", "313586", "313989",
                "313990", "314111", "314277", "317136", "351249", "351250", "403969", "403970",
                "476809", "476810", "596926", "596930", "596934", "616402", "616403", "721787",
                "790264", "790288", "808744", "808748", "808751", "808753", "861064", "903873",
                "903879", "903884", "903887", "903891", "905168", "993503", "993518", "993536",
                "993541", "993550", "993557", "993567", "993681", "993687", "993691",
            ],
        )
        .build()
});

pub static STATIN_THERAPY: LazyLock<ValueSet> = LazyLock::new(|| {
    ValueSet::builder("Statin Therapy")
        .oid("2.16.840.1.113883.3.464.1003.196.12.1003")
        .expansion_version("eCQM Update 2022-05-05")
        .codes(
            CodingSystem::RxNorm,
            [
                "197904", "198211", "200345", "259255", "310404", "310405", "312961", "312962",
                "314231", "359731", "359732", "404011", "404013", "476345", "476349", "476350",
                "597966", "597971", "597974", "597977", "597980", "597984", "597987", "597990",
                "617310", "617311", "617312", "617314", "757702", "757703", "757704", "757705",
                "859419", "859424", "859747", "859751", "861643", "861648", "861652", "904458",
                "904467", "904475", "904481",
            ],
        )
        .build()
});
