// Unit tests for the BookSwap match core

use bookswap_match::core::{
    distance::{haversine_distance, optional_distance},
    matching::{is_double_match, matches_wishlist, titles_match},
    scoring::match_score,
};
use bookswap_match::models::TierWeights;

/// Independent reference implementation (spherical law of cosines) used to
/// sanity-check the haversine result without hardcoding kilometer values
fn law_of_cosines_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let delta_lon = (lon2 - lon1).to_radians();
    let central = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lon.cos())
        .clamp(-1.0, 1.0)
        .acos();
    6371.0 * central
}

#[test]
fn test_distance_to_self_is_zero() {
    for &(lat, lon) in &[
        (0.0, 0.0),
        (40.7128, -74.0060),
        (-33.8688, 151.2093),
        (89.9, 179.9),
    ] {
        let d = haversine_distance(lat, lon, lat, lon);
        assert!(d.abs() < 1e-9, "distance to self should be 0, got {}", d);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let d1 = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
    let d2 = haversine_distance(48.8566, 2.3522, 51.5074, -0.1278);
    assert!((d1 - d2).abs() < 1e-9);
}

#[test]
fn test_triangle_inequality_within_epsilon() {
    // London, Paris, Berlin
    let a = (51.5074, -0.1278);
    let b = (48.8566, 2.3522);
    let c = (52.52, 13.405);

    let ab = haversine_distance(a.0, a.1, b.0, b.1);
    let ac = haversine_distance(a.0, a.1, c.0, c.1);
    let cb = haversine_distance(c.0, c.1, b.0, b.1);

    assert!(ab <= ac + cb + 1e-6);
}

#[test]
fn test_distance_against_reference_implementation() {
    // User and candidate owner from neighbouring cities: ~26-28 km apart
    let (lat1, lon1) = (32.31, 34.87);
    let (lat2, lon2) = (32.08, 34.78);

    let haversine = haversine_distance(lat1, lon1, lat2, lon2);
    let reference = law_of_cosines_distance(lat1, lon1, lat2, lon2);

    assert!((haversine - reference).abs() < 0.5, "haversine {} vs reference {}", haversine, reference);
    assert!(haversine > 20.0 && haversine < 35.0, "expected ~26-28 km, got {}", haversine);
}

#[test]
fn test_antipodal_distance() {
    let d = haversine_distance(0.0, 0.0, 0.0, 180.0);
    assert!((d - std::f64::consts::PI * 6371.0).abs() < 1.0);
}

#[test]
fn test_missing_coordinates_mean_unknown_distance() {
    assert_eq!(optional_distance(None, Some((32.08, 34.78))), None);
    assert_eq!(optional_distance(Some((32.31, 34.87)), None), None);
}

#[test]
fn test_wishlist_match_case_insensitive_bidirectional() {
    assert!(titles_match("The Hobbit", "Hobbit"));
    assert!(titles_match("Hobbit", "The Hobbit"));
    assert!(titles_match("THE HOBBIT", "hobbit"));

    let wishlist = vec!["Hobbit".to_string()];
    assert!(matches_wishlist("The Hobbit", &wishlist));

    let wishlist = vec!["The Hobbit".to_string()];
    assert!(matches_wishlist("Hobbit", &wishlist));
}

#[test]
fn test_short_title_does_not_match_inside_word() {
    // Raw substring matching would accept this pair
    assert!(!titles_match("IT", "Fit for a King"));
    assert!(!matches_wishlist("Fit for a King", &["IT".to_string()]));
}

#[test]
fn test_double_match_predicate() {
    let owner_wishlist = vec!["Snow Crash".to_string()];
    let my_library = vec!["Snow Crash".to_string(), "Emma".to_string()];
    assert!(is_double_match(&owner_wishlist, &my_library));
    assert!(!is_double_match(&owner_wishlist, &["Emma".to_string()]));
}

#[test]
fn test_double_match_outscores_close_plain_match() {
    let w = TierWeights::default();
    let far_double = match_score(true, true, Some(500.0), &w);
    let close_plain = match_score(true, false, Some(0.0), &w);

    assert_eq!(far_double, 500.0);
    assert_eq!(close_plain, 100.0);
    assert!(far_double > close_plain);
}

#[test]
fn test_no_match_scores() {
    let w = TierWeights::default();
    assert_eq!(match_score(false, false, Some(0.0), &w), 0.0);
    assert_eq!(match_score(false, false, None, &w), 0.0);
}

#[test]
fn test_unknown_distance_leaves_tier_base() {
    let w = TierWeights::default();
    assert_eq!(match_score(true, false, None, &w), 100.0);
    assert_eq!(match_score(true, true, None, &w), 1000.0);
}
