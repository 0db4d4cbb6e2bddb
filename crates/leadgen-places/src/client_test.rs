use super::*;

fn test_client(places: &str, geocode: &str) -> GooglePlacesClient {
    GooglePlacesClient::with_base_urls("test-key", 30, "leadgen-test", places, geocode)
        .expect("client construction should not fail")
}

#[test]
fn blank_api_key_is_rejected() {
    let err = GooglePlacesClient::new("  ", 30, "leadgen-test").unwrap_err();
    assert!(matches!(err, PlacesError::MissingApiKey));
    assert!(err.is_configuration());
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = GooglePlacesClient::with_base_urls(
        "test-key",
        30,
        "leadgen-test",
        "not a url",
        DEFAULT_GEOCODE_BASE_URL,
    )
    .unwrap_err();
    assert!(matches!(err, PlacesError::InvalidBaseUrl { .. }));
}

#[test]
fn search_url_keeps_colon_verb() {
    let client = test_client(DEFAULT_PLACES_BASE_URL, DEFAULT_GEOCODE_BASE_URL);
    let url = client.places_url(&["places:searchText"]);
    assert_eq!(
        url.as_str(),
        "https://places.googleapis.com/v1/places:searchText"
    );
}

#[test]
fn base_without_trailing_slash_keeps_version_segment() {
    let client = test_client("https://places.googleapis.com/v1", DEFAULT_GEOCODE_BASE_URL);
    let url = client.places_url(&["places", "ChIJabc"]);
    assert_eq!(url.as_str(), "https://places.googleapis.com/v1/places/ChIJabc");
}

#[test]
fn place_id_slash_is_encoded() {
    let client = test_client(DEFAULT_PLACES_BASE_URL, DEFAULT_GEOCODE_BASE_URL);
    let url = client.places_url(&["places", "a/b"]);
    assert!(url.path().ends_with("/places/a%2Fb"), "got {url}");
}

#[test]
fn geocode_url_encodes_address_and_key() {
    let client = test_client(DEFAULT_PLACES_BASE_URL, DEFAULT_GEOCODE_BASE_URL);
    let url = client.geocode_url("Miami, FL");
    assert!(url.path().ends_with("/geocode/json"), "got {url}");
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("address".to_string(), "Miami, FL".to_string()),
            ("key".to_string(), "test-key".to_string()),
        ]
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let client = test_client(DEFAULT_PLACES_BASE_URL, DEFAULT_GEOCODE_BASE_URL);
    let debug = format!("{client:?}");
    assert!(!debug.contains("test-key"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn long_error_bodies_are_truncated() {
    let body = "x".repeat(MAX_ERROR_BODY_CHARS + 50);
    let cut = truncate_body(&body);
    assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 1);
    assert_eq!(truncate_body("short"), "short");
}
