//! 정적 국가 코드 테이블.
//!
//! ISO 3166-1 alpha-2 ↔ alpha-3 매핑과 지역별 국가 집합(alpha-3)을 정의합니다.
//! 프로세스 수명 동안 변경되지 않으며, 항상 [`super::CountryCodeResolver`]를 통해 조회합니다.

/// alpha-2 → alpha-3 매핑 (alpha-3 기준 정렬).
pub(crate) static CODE_MAPPING: &[(&str, &str)] = &[
    ("AF", "AFG"), ("AO", "AGO"), ("AL", "ALB"), ("AD", "AND"), ("AE", "ARE"), ("AR", "ARG"),
    ("AM", "ARM"), ("AU", "AUS"), ("AT", "AUT"), ("AZ", "AZE"), ("BI", "BDI"), ("BE", "BEL"),
    ("BJ", "BEN"), ("BF", "BFA"), ("BD", "BGD"), ("BG", "BGR"), ("BH", "BHR"), ("BA", "BIH"),
    ("BY", "BLR"), ("BR", "BRA"), ("BN", "BRN"), ("BT", "BTN"), ("BW", "BWA"), ("CF", "CAF"),
    ("CA", "CAN"), ("CH", "CHE"), ("CL", "CHL"), ("CN", "CHN"), ("CI", "CIV"), ("CM", "CMR"),
    ("CD", "COD"), ("CG", "COG"), ("CO", "COL"), ("KM", "COM"), ("CV", "CPV"), ("CY", "CYP"),
    ("CZ", "CZE"), ("DE", "DEU"), ("DJ", "DJI"), ("DK", "DNK"), ("DZ", "DZA"), ("EG", "EGY"),
    ("ER", "ERI"), ("ES", "ESP"), ("EE", "EST"), ("ET", "ETH"), ("FI", "FIN"), ("FR", "FRA"),
    ("GA", "GAB"), ("GB", "GBR"), ("GE", "GEO"), ("GH", "GHA"), ("GN", "GIN"), ("GM", "GMB"),
    ("GW", "GNB"), ("GQ", "GNQ"), ("GR", "GRC"), ("HK", "HKG"), ("HR", "HRV"), ("HU", "HUN"),
    ("ID", "IDN"), ("IN", "IND"), ("IE", "IRL"), ("IR", "IRN"), ("IQ", "IRQ"), ("IS", "ISL"),
    ("IL", "ISR"), ("IT", "ITA"), ("JO", "JOR"), ("JP", "JPN"), ("KZ", "KAZ"), ("KE", "KEN"),
    ("KG", "KGZ"), ("KH", "KHM"), ("KR", "KOR"), ("KW", "KWT"), ("LA", "LAO"), ("LB", "LBN"),
    ("LR", "LBR"), ("LY", "LBY"), ("LI", "LIE"), ("LK", "LKA"), ("LS", "LSO"), ("LT", "LTU"),
    ("LU", "LUX"), ("LV", "LVA"), ("MO", "MAC"), ("MA", "MAR"), ("MC", "MCO"), ("MD", "MDA"),
    ("MG", "MDG"), ("MV", "MDV"), ("MX", "MEX"), ("MK", "MKD"), ("ML", "MLI"), ("MT", "MLT"),
    ("MM", "MMR"), ("ME", "MNE"), ("MN", "MNG"), ("MZ", "MOZ"), ("MR", "MRT"), ("MU", "MUS"),
    ("MW", "MWI"), ("MY", "MYS"), ("NA", "NAM"), ("NE", "NER"), ("NG", "NGA"), ("NL", "NLD"),
    ("NO", "NOR"), ("NP", "NPL"), ("NZ", "NZL"), ("OM", "OMN"), ("PK", "PAK"), ("PE", "PER"),
    ("PH", "PHL"), ("PL", "POL"), ("PT", "PRT"), ("PS", "PSE"), ("QA", "QAT"), ("RO", "ROU"),
    ("RU", "RUS"), ("RW", "RWA"), ("SA", "SAU"), ("SD", "SDN"), ("SN", "SEN"), ("SG", "SGP"),
    ("SL", "SLE"), ("SM", "SMR"), ("SO", "SOM"), ("RS", "SRB"), ("SS", "SSD"), ("ST", "STP"),
    ("SK", "SVK"), ("SI", "SVN"), ("SE", "SWE"), ("SZ", "SWZ"), ("SC", "SYC"), ("SY", "SYR"),
    ("TD", "TCD"), ("TG", "TGO"), ("TH", "THA"), ("TJ", "TJK"), ("TM", "TKM"), ("TL", "TLS"),
    ("TN", "TUN"), ("TR", "TUR"), ("TW", "TWN"), ("TZ", "TZA"), ("UG", "UGA"), ("UA", "UKR"),
    ("US", "USA"), ("UZ", "UZB"), ("VA", "VAT"), ("VN", "VNM"), ("YE", "YEM"), ("ZA", "ZAF"),
    ("ZM", "ZMB"), ("ZW", "ZWE"),
];

/// 아프리카 국가 (alpha-3)
pub(crate) static AFRICA: &[&str] = &[
    "DZA", "AGO", "BEN", "BWA", "BFA", "BDI", "CMR", "CPV", "CAF", "TCD",
    "COM", "COG", "COD", "DJI", "EGY", "GNQ", "ERI", "ETH", "GAB", "GMB",
    "GHA", "GIN", "GNB", "CIV", "KEN", "LSO", "LBR", "LBY", "MDG", "MWI",
    "MLI", "MRT", "MUS", "MAR", "MOZ", "NAM", "NER", "NGA", "RWA", "STP",
    "SEN", "SYC", "SLE", "SOM", "ZAF", "SSD", "SDN", "SWZ", "TZA", "TGO",
    "TUN", "UGA", "ZMB", "ZWE",
];

/// 아시아 국가 (alpha-3)
pub(crate) static ASIA: &[&str] = &[
    "AFG", "ARM", "AZE", "BHR", "BGD", "BTN", "BRN", "KHM", "CHN", "CYP",
    "GEO", "HKG", "IND", "IDN", "IRN", "IRQ", "ISR", "JPN", "JOR", "KAZ",
    "KWT", "KGZ", "LAO", "LBN", "MAC", "MYS", "MDV", "MNG", "MMR", "NPL",
    "OMN", "PAK", "PSE", "PHL", "QAT", "SAU", "SGP", "KOR", "LKA", "SYR",
    "TWN", "TJK", "THA", "TLS", "TUR", "TKM", "ARE", "UZB", "VNM", "YEM",
];

/// 유럽 국가 (alpha-3)
pub(crate) static EUROPE: &[&str] = &[
    "ALB", "AND", "AUT", "BLR", "BEL", "BIH", "BGR", "HRV", "CZE", "DNK",
    "EST", "FIN", "FRA", "DEU", "GRC", "HUN", "ISL", "IRL", "ITA", "LVA",
    "LIE", "LTU", "LUX", "MLT", "MDA", "MCO", "MNE", "NLD", "MKD", "NOR",
    "POL", "PRT", "ROU", "RUS", "SMR", "SRB", "SVK", "SVN", "ESP", "SWE",
    "CHE", "UKR", "GBR", "VAT",
];
