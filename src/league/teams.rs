//! Canonical NFL team abbreviations and the spellings providers use for them.

/// (abbreviation, city, nickname, provider-specific alternate abbreviations)
const TEAMS: &[(&str, &str, &str, &[&str])] = &[
    ("ARI", "Arizona", "Cardinals", &["ARZ"]),
    ("ATL", "Atlanta", "Falcons", &[]),
    ("BAL", "Baltimore", "Ravens", &["BLT"]),
    ("BUF", "Buffalo", "Bills", &[]),
    ("CAR", "Carolina", "Panthers", &[]),
    ("CHI", "Chicago", "Bears", &[]),
    ("CIN", "Cincinnati", "Bengals", &[]),
    ("CLE", "Cleveland", "Browns", &["CLV"]),
    ("DAL", "Dallas", "Cowboys", &[]),
    ("DEN", "Denver", "Broncos", &[]),
    ("DET", "Detroit", "Lions", &[]),
    ("GB", "Green Bay", "Packers", &["GNB"]),
    ("HOU", "Houston", "Texans", &["HST"]),
    ("IND", "Indianapolis", "Colts", &[]),
    ("JAX", "Jacksonville", "Jaguars", &["JAC"]),
    ("KC", "Kansas City", "Chiefs", &["KAN"]),
    ("LV", "Las Vegas", "Raiders", &["LVR", "OAK"]),
    ("LAC", "Los Angeles", "Chargers", &["SD", "SDG"]),
    ("LAR", "Los Angeles", "Rams", &["LA", "STL"]),
    ("MIA", "Miami", "Dolphins", &[]),
    ("MIN", "Minnesota", "Vikings", &[]),
    ("NE", "New England", "Patriots", &["NWE"]),
    ("NO", "New Orleans", "Saints", &["NOR"]),
    ("NYG", "New York", "Giants", &[]),
    ("NYJ", "New York", "Jets", &[]),
    ("PHI", "Philadelphia", "Eagles", &[]),
    ("PIT", "Pittsburgh", "Steelers", &[]),
    ("SF", "San Francisco", "49ers", &["SFO"]),
    ("SEA", "Seattle", "Seahawks", &[]),
    ("TB", "Tampa Bay", "Buccaneers", &["TAM"]),
    ("TEN", "Tennessee", "Titans", &[]),
    ("WAS", "Washington", "Commanders", &["WSH"]),
];

/// All canonical abbreviations in a fixed order
pub fn all_abbreviations() -> impl Iterator<Item = &'static str> {
    TEAMS.iter().map(|(abbr, ..)| *abbr)
}

/// Resolve any provider spelling to the canonical abbreviation.
///
/// Accepts abbreviations, full names ("Kansas City Chiefs"), nicknames
/// ("Chiefs") and unambiguous city names ("Kansas City").
pub fn normalize_team(raw: &str) -> Option<&'static str> {
    let needle = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    if needle.is_empty() {
        return None;
    }

    for (abbr, city, nickname, alternates) in TEAMS {
        if abbr.eq_ignore_ascii_case(&needle)
            || alternates.iter().any(|alt| alt.eq_ignore_ascii_case(&needle))
            || nickname.to_lowercase() == needle
            || format!("{} {}", city, nickname).to_lowercase() == needle
        {
            return Some(*abbr);
        }
    }

    // City names only resolve when a single team plays there
    let mut by_city = TEAMS.iter().filter(|(_, city, ..)| city.to_lowercase() == needle);
    match (by_city.next(), by_city.next()) {
        (Some((abbr, ..)), None) => Some(*abbr),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_two_unique_teams() {
        let mut abbrs: Vec<_> = all_abbreviations().collect();
        abbrs.sort_unstable();
        abbrs.dedup();
        assert_eq!(abbrs.len(), 32);
    }

    #[test]
    fn test_shared_city_is_ambiguous() {
        assert_eq!(normalize_team("Los Angeles"), None);
        assert_eq!(normalize_team("New York"), None);
        assert_eq!(normalize_team("Los Angeles Rams"), Some("LAR"));
    }
}
