// Tests for the navigation resolver: total lookups, the default-viewpoint
// rule and nearest-viewpoint selection under both distance metrics.

use tour_core::{
    connection_target, default_viewpoint, haversine_km, nearest_viewpoint, resolve_viewpoint,
    Catalog, GeoPoint, Position,
};

fn scene_site_json() -> &'static str {
    r#"[{
        "id": "fort",
        "name": "Fort",
        "location": {"city": "Delhi", "state": "Delhi", "coordinates": {"lat": 28.6562, "lng": 77.241}},
        "description": "test fort",
        "historical_period": "1638 CE",
        "thumbnail_url": "fort.jpg",
        "coordinate_space": "scene",
        "viewpoints": [
            {"id": "gate", "name": "Gate", "position": [0.0, 0.0, 0.0],
             "connections": [{"to": "court", "label": "Enter", "angle": 0.0}]},
            {"id": "court", "name": "Court", "position": [10.0, 0.0, 0.0]},
            {"id": "tower", "name": "Tower", "position": [-10.0, 0.0, 0.0]}
        ]
    }]"#
}

fn geo_site_json() -> &'static str {
    r#"[{
        "id": "monument",
        "name": "Monument",
        "location": {"city": "Agra", "state": "Uttar Pradesh", "coordinates": {"lat": 27.1751, "lng": 78.0421}},
        "description": "test monument",
        "historical_period": "1632 CE",
        "thumbnail_url": "monument.jpg",
        "coordinate_space": "geographic",
        "viewpoints": [
            {"id": "entrance", "name": "Entrance", "position": {"lat": 27.1730, "lng": 78.0421}},
            {"id": "dome", "name": "Dome", "position": {"lat": 27.1739, "lng": 78.0421}, "is_default": true},
            {"id": "garden", "name": "Garden", "position": {"lat": 27.1736, "lng": 78.0418}}
        ]
    }]"#
}

#[test]
fn resolve_viewpoint_unknown_id_returns_none() {
    let catalog = Catalog::from_json(scene_site_json()).unwrap();
    let site = catalog.site("fort").unwrap();
    assert!(resolve_viewpoint(site, "court").is_some());
    assert!(resolve_viewpoint(site, "unknown-id").is_none());
}

#[test]
fn default_viewpoint_prefers_the_flag_over_list_order() {
    let catalog = Catalog::from_json(geo_site_json()).unwrap();
    let site = catalog.site("monument").unwrap();
    // "dome" carries is_default even though "entrance" is first.
    assert_eq!(default_viewpoint(site).unwrap().id, "dome");
}

#[test]
fn default_viewpoint_falls_back_to_first() {
    let catalog = Catalog::from_json(scene_site_json()).unwrap();
    let site = catalog.site("fort").unwrap();
    assert_eq!(default_viewpoint(site).unwrap().id, "gate");
}

#[test]
fn haversine_matches_known_distance() {
    // Agra to Delhi is roughly 180 km as the crow flies.
    let agra = GeoPoint { lat: 27.1751, lng: 78.0421 };
    let delhi = GeoPoint { lat: 28.6562, lng: 77.241 };
    let d = haversine_km(agra, delhi);
    assert!((175.0..190.0).contains(&d), "got {d} km");
    // Symmetric and zero on itself.
    assert!((haversine_km(delhi, agra) - d).abs() < 1e-9);
    assert!(haversine_km(agra, agra) < 1e-9);
}

#[test]
fn nearest_viewpoint_uses_scene_metric_for_scene_sites() {
    let catalog = Catalog::from_json(scene_site_json()).unwrap();
    let site = catalog.site("fort").unwrap();
    let near_court = Position::Scene([8.0, 0.0, 1.0]);
    assert_eq!(nearest_viewpoint(site, &near_court).unwrap().id, "court");
}

#[test]
fn nearest_viewpoint_uses_haversine_for_geographic_sites() {
    let catalog = Catalog::from_json(geo_site_json()).unwrap();
    let site = catalog.site("monument").unwrap();
    let near_garden = Position::Geographic(GeoPoint { lat: 27.17355, lng: 78.04185 });
    assert_eq!(nearest_viewpoint(site, &near_garden).unwrap().id, "garden");
}

#[test]
fn nearest_viewpoint_tie_breaks_on_catalog_order() {
    // The query sits exactly between "court" (x=10) and "tower" (x=-10);
    // the first candidate in catalog order must win. "gate" at the origin
    // is even closer, so query from a point equidistant to court and tower
    // but far from gate on the z axis.
    let catalog = Catalog::from_json(scene_site_json()).unwrap();
    let site = catalog.site("fort").unwrap();
    let midpoint = Position::Scene([0.0, 0.0, 50.0]);
    // gate is nearest here; shift the query so gate and court tie instead.
    let tie = Position::Scene([5.0, 0.0, 0.0]);
    assert_eq!(nearest_viewpoint(site, &midpoint).unwrap().id, "gate");
    assert_eq!(nearest_viewpoint(site, &tie).unwrap().id, "gate");
}

#[test]
fn nearest_viewpoint_rejects_mismatched_spaces() {
    // Metrics are never mixed within one call: a geographic query against a
    // scene-space site resolves to nothing.
    let catalog = Catalog::from_json(scene_site_json()).unwrap();
    let site = catalog.site("fort").unwrap();
    let geo_query = Position::Geographic(GeoPoint { lat: 28.0, lng: 77.0 });
    assert!(nearest_viewpoint(site, &geo_query).is_none());
}

#[test]
fn connection_traversal_is_directed() {
    let catalog = Catalog::from_json(scene_site_json()).unwrap();
    let site = catalog.site("fort").unwrap();
    let gate = site.viewpoint("gate").unwrap();
    let court = site.viewpoint("court").unwrap();
    assert_eq!(connection_target(site, gate, "court").unwrap().id, "court");
    // No reverse edge was declared, even though the viewpoint exists.
    assert!(connection_target(site, court, "gate").is_none());
    // Edges to viewpoints the edge list does not mention do not resolve.
    assert!(connection_target(site, gate, "tower").is_none());
}
