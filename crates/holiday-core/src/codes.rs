//! Translation between API country identifiers and map geometry keys.

/// ISO 3166 alpha-2 (API) to alpha-3 (map) for the static country list.
const ISO_PAIRS: [(&str, &str); 15] = [
    ("US", "USA"),
    ("GB", "GBR"),
    ("DE", "DEU"),
    ("FR", "FRA"),
    ("JP", "JPN"),
    ("CA", "CAN"),
    ("AU", "AUS"),
    ("BR", "BRA"),
    ("IN", "IND"),
    ("MX", "MEX"),
    ("IT", "ITA"),
    ("ES", "ESP"),
    ("NL", "NLD"),
    ("PL", "POL"),
    ("SE", "SWE"),
];

/// API country names that the geometry source spells differently.
const NAME_CORRECTIONS: [(&str, &str); 8] = [
    ("United States", "United States of America"),
    ("Bosnia and Herzegovina", "Bosnia and Herz."),
    ("Dominican Republic", "Dominican Rep."),
    ("Central African Republic", "Central African Rep."),
    ("North Macedonia", "Macedonia"),
    ("Eswatini", "eSwatini"),
    ("Solomon Islands", "Solomon Is."),
    ("Faroe Islands", "Faeroe Is."),
];

pub fn alpha3(alpha2: &str) -> Option<&'static str> {
    ISO_PAIRS
        .iter()
        .find(|(two, _)| two.eq_ignore_ascii_case(alpha2))
        .map(|(_, three)| *three)
}

pub fn alpha2(alpha3: &str) -> Option<&'static str> {
    ISO_PAIRS
        .iter()
        .find(|(_, three)| three.eq_ignore_ascii_case(alpha3))
        .map(|(two, _)| *two)
}

/// Name under which the geometry source knows `api_name`.
pub fn geometry_name(api_name: &str) -> &str {
    NAME_CORRECTIONS
        .iter()
        .find(|(api, _)| *api == api_name)
        .map(|(_, geo)| *geo)
        .unwrap_or(api_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_lookup_both_ways() {
        assert_eq!(alpha3("DE"), Some("DEU"));
        assert_eq!(alpha3("gb"), Some("GBR"));
        assert_eq!(alpha2("SWE"), Some("SE"));
        assert_eq!(alpha3("ZZ"), None);
        assert_eq!(alpha2("ZZZ"), None);
    }

    #[test]
    fn test_every_pair_round_trips() {
        for (two, three) in ISO_PAIRS {
            assert_eq!(alpha2(alpha3(two).unwrap()), Some(two));
            assert_eq!(three.len(), 3);
        }
    }

    #[test]
    fn test_name_corrections() {
        assert_eq!(geometry_name("United States"), "United States of America");
        assert_eq!(geometry_name("North Macedonia"), "Macedonia");
        assert_eq!(geometry_name("Germany"), "Germany");
    }
}
