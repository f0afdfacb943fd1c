//! City-name normalization and "did you mean" suggestions.

use crate::services::weather_client::WeatherClient;
use std::collections::HashSet;

/// Well-known cities checked before asking the geocoding API
pub const COMMON_CITIES: [&str; 30] = [
    "London",
    "New York",
    "Tokyo",
    "Paris",
    "Sydney",
    "Singapore",
    "Dubai",
    "Berlin",
    "Madrid",
    "Rome",
    "Moscow",
    "Beijing",
    "Mumbai",
    "Seoul",
    "Toronto",
    "Los Angeles",
    "Chicago",
    "Miami",
    "Vancouver",
    "Melbourne",
    "Amsterdam",
    "Barcelona",
    "Vienna",
    "San Francisco",
    "Seattle",
    "Hong Kong",
    "Bangkok",
    "Istanbul",
    "Rio de Janeiro",
    "Mexico City",
];

pub const MAX_SUGGESTIONS: usize = 5;
pub const SIMILARITY_CUTOFF: f32 = 0.6;

/// Keep letters, digits, whitespace and hyphens; collapse whitespace runs and
/// trim. `None` and empty input give an empty string.
pub fn sanitize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fuzzy matches against [`COMMON_CITIES`], best first.
///
/// Scores are the matching-characters ratio `2*M/T` over both names, so a
/// fragment such as `York` still finds `New York`. Case-sensitive.
pub fn close_matches(query: &str) -> Vec<String> {
    similar::get_close_matches(query, &COMMON_CITIES, MAX_SUGGESTIONS, SIMILARITY_CUTOFF)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Suggest up to five city names for a query that failed to resolve.
///
/// Local fuzzy matches are returned without touching the network. Only when
/// none match is the provider's geocoding search consulted; any failure
/// there yields an empty list.
pub async fn suggest(query: &str, client: &WeatherClient) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut suggestions = close_matches(query);

    if suggestions.is_empty() {
        match client.search(query).await {
            Ok(candidates) => {
                suggestions.extend(candidates.iter().map(|c| c.display_name()));
            }
            Err(failure) => {
                tracing::warn!(
                    query = %query,
                    code = failure.code,
                    error = %failure.message,
                    "City suggestion lookup failed"
                );
            }
        }
    }

    let mut deduped = dedup_preserving_order(suggestions);
    deduped.truncate(MAX_SUGGESTIONS);
    deduped
}

fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_and_collapses() {
        assert_eq!(sanitize(Some("  New   York!! ")), "New York");
        assert_eq!(sanitize(Some("Winston-Salem")), "Winston-Salem");
        assert_eq!(sanitize(Some("São\tPaulo;")), "São Paulo");
        assert_eq!(sanitize(Some("<script>alert(1)</script>")), "scriptalert1script");
    }

    #[test]
    fn test_sanitize_empty_input() {
        assert_eq!(sanitize(None), "");
        assert_eq!(sanitize(Some("")), "");
        assert_eq!(sanitize(Some(" !?. ")), "");
    }

    #[test]
    fn test_close_matches_typo() {
        assert_eq!(close_matches("Lodon"), vec!["London"]);
        assert_eq!(close_matches("Seatle"), vec!["Seattle"]);
    }

    #[test]
    fn test_close_matches_ordered_by_similarity() {
        assert_eq!(close_matches("Mubai"), vec!["Mumbai", "Dubai", "Miami"]);
    }

    #[test]
    fn test_close_matches_fragment_of_name() {
        assert_eq!(close_matches("York"), vec!["New York"]);
        assert_eq!(close_matches("Francisco"), vec!["San Francisco"]);
    }

    #[test]
    fn test_close_matches_is_case_sensitive() {
        assert!(close_matches("Zzzznotacity").is_empty());
        assert_eq!(close_matches("Paris"), vec!["Paris"]);
    }

    #[test]
    fn test_dedup_preserves_first_occurrence() {
        let names = vec![
            "Springfield, US".to_string(),
            "Springfield, AU".to_string(),
            "Springfield, US".to_string(),
            "springfield, US".to_string(),
        ];
        assert_eq!(
            dedup_preserving_order(names),
            vec!["Springfield, US", "Springfield, AU", "springfield, US"]
        );
    }
}
