//! Fixed set of destinations a trip can be assembled from.

use crate::models::trip::Destination;

/// Most results the creation page lists for one query.
pub const MAX_SEARCH_RESULTS: usize = 5;

const DESTINATIONS: [(&str, &str, &str); 8] = [
    ("1", "Tokyo", "Japan"),
    ("2", "Paris", "France"),
    ("3", "Barcelona", "Spain"),
    ("4", "Kyoto", "Japan"),
    ("5", "London", "United Kingdom"),
    ("6", "Rome", "Italy"),
    ("7", "Lisbon", "Portugal"),
    ("8", "Amsterdam", "Netherlands"),
];

pub fn catalog() -> Vec<Destination> {
    DESTINATIONS
        .iter()
        .map(|(id, name, country)| Destination::new(*id, *name, *country))
        .collect()
}

pub fn find_destination(id: &str) -> Option<Destination> {
    catalog().into_iter().find(|d| d.id == id)
}

/// Case-insensitive substring match on name or country, skipping anything
/// already selected. A blank query matches nothing.
pub fn search(query: &str, selected: &[Destination]) -> Vec<Destination> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    catalog()
        .into_iter()
        .filter(|d| {
            d.name.to_lowercase().contains(&query) || d.country.to_lowercase().contains(&query)
        })
        .filter(|d| !selected.iter().any(|s| s.id == d.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_country_case_insensitively() {
        let names: Vec<_> = search("JAPAN", &[]).into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["Tokyo", "Kyoto"]);
    }

    #[test]
    fn excludes_selected_destinations() {
        let tokyo = find_destination("1").unwrap();
        let names: Vec<_> = search("japan", &[tokyo]).into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["Kyoto"]);
    }

    #[test]
    fn blank_query_matches_nothing() {
        assert!(search("   ", &[]).is_empty());
        assert_eq!(catalog().len(), 8);
        assert!(find_destination("42").is_none());
    }
}
