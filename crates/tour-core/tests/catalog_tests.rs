// Tests for catalog loading and validation, including the built-in
// two-site document.

use tour_core::{Catalog, CatalogError, CoordinateSpace, HotspotContent, ViewerKind};

fn site_json(viewpoints: &str, audio: &str) -> String {
    format!(
        r#"[{{
            "id": "site",
            "name": "Site",
            "location": {{"city": "C", "state": "S", "coordinates": {{"lat": 1.0, "lng": 2.0}}}},
            "description": "d",
            "historical_period": "p",
            "thumbnail_url": "t.jpg",
            "coordinate_space": "scene",
            "viewpoints": {viewpoints}{audio}
        }}]"#
    )
}

#[test]
fn builtin_catalog_loads_both_sites() {
    let catalog = Catalog::builtin().expect("builtin catalog must validate");
    assert_eq!(catalog.sites().len(), 2);

    let taj = catalog.site("taj-mahal").unwrap();
    assert_eq!(taj.coordinate_space, CoordinateSpace::Geographic);
    assert_eq!(taj.viewpoints.len(), 4);
    assert!(taj.supports(ViewerKind::StreetView));
    assert!(!taj.supports(ViewerKind::Panorama));
    assert_eq!(taj.audio_tour.as_ref().unwrap().chapters.len(), 4);

    let fort = catalog.site("red-fort").unwrap();
    assert_eq!(fort.coordinate_space, CoordinateSpace::Scene);
    assert_eq!(fort.viewpoints.len(), 4);
    assert!(fort.supports(ViewerKind::Panorama));
    assert_eq!(fort.audio_tour.as_ref().unwrap().chapters.len(), 5);
}

#[test]
fn builtin_chapters_reference_real_viewpoints() {
    let catalog = Catalog::builtin().unwrap();
    for site in catalog.sites() {
        let Some(tour) = &site.audio_tour else { continue };
        for chapter in &tour.chapters {
            assert!(
                site.viewpoint(&chapter.viewpoint_id).is_some(),
                "{}: chapter {} names unknown viewpoint {}",
                site.id,
                chapter.id,
                chapter.viewpoint_id
            );
        }
    }
}

#[test]
fn builtin_street_view_sites_carry_locators() {
    let catalog = Catalog::builtin().unwrap();
    for site in catalog.sites() {
        if !site.supports(ViewerKind::StreetView) {
            continue;
        }
        for vp in &site.viewpoints {
            assert!(vp.street_view.is_some(), "{}/{} lacks a locator", site.id, vp.id);
        }
    }
}

#[test]
fn site_lookup_is_total() {
    let catalog = Catalog::builtin().unwrap();
    assert!(catalog.site("taj-mahal").is_some());
    assert!(catalog.site("hawa-mahal").is_none());
}

#[test]
fn hotspot_content_parses_as_tagged_variants() {
    let catalog = Catalog::builtin().unwrap();
    let taj = catalog.site("taj-mahal").unwrap();
    let dome = taj.viewpoint("main-dome").unwrap();
    assert!(matches!(
        dome.hotspot("pietra-dura").unwrap().content,
        HotspotContent::Image { .. }
    ));
    let gardens = taj.viewpoint("gardens").unwrap();
    assert!(matches!(
        gardens.hotspot("fountain-sounds").unwrap().content,
        HotspotContent::Audio { .. }
    ));
    let arch = &taj.viewpoint("main-gate").unwrap().hotspots[0];
    match &arch.content {
        HotspotContent::Text { body, details } => {
            assert!(!body.is_empty());
            assert_eq!(details.len(), 3);
        }
        other => panic!("expected text content, got {other:?}"),
    }
    assert_eq!(
        arch.content.summary(),
        "Beautiful verses from the Quran inscribed in marble"
    );
}

#[test]
fn rejects_an_empty_viewpoint_list() {
    let err = Catalog::from_json(&site_json("[]", "")).unwrap_err();
    assert!(matches!(err, CatalogError::NoViewpoints(_)));
}

#[test]
fn rejects_duplicate_viewpoint_ids() {
    let vps = r#"[
        {"id": "a", "name": "A", "position": [0.0, 0.0, 0.0]},
        {"id": "a", "name": "A again", "position": [1.0, 0.0, 0.0]}
    ]"#;
    let err = Catalog::from_json(&site_json(vps, "")).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateViewpoint { .. }));
}

#[test]
fn rejects_more_than_one_default_viewpoint() {
    let vps = r#"[
        {"id": "a", "name": "A", "position": [0.0, 0.0, 0.0], "is_default": true},
        {"id": "b", "name": "B", "position": [1.0, 0.0, 0.0], "is_default": true}
    ]"#;
    let err = Catalog::from_json(&site_json(vps, "")).unwrap_err();
    assert!(matches!(err, CatalogError::MultipleDefaults(_)));
}

#[test]
fn rejects_positions_outside_the_declared_space() {
    // A geographic position inside a scene-space site.
    let vps = r#"[{"id": "a", "name": "A", "position": {"lat": 1.0, "lng": 2.0}}]"#;
    let err = Catalog::from_json(&site_json(vps, "")).unwrap_err();
    assert!(matches!(err, CatalogError::SpaceMismatch { .. }));
}

#[test]
fn rejects_dangling_connection_edges() {
    let vps = r#"[
        {"id": "a", "name": "A", "position": [0.0, 0.0, 0.0],
         "connections": [{"to": "nowhere", "label": "Go", "angle": 0.0}]}
    ]"#;
    let err = Catalog::from_json(&site_json(vps, "")).unwrap_err();
    assert!(matches!(err, CatalogError::DanglingViewpoint { .. }));
}

#[test]
fn rejects_zero_duration_chapters() {
    let vps = r#"[{"id": "a", "name": "A", "position": [0.0, 0.0, 0.0]}]"#;
    let audio = r#",
        "audio_tour": {
            "title": "T", "duration": 0, "narrator": {"name": "N"},
            "chapters": [
                {"id": "c", "title": "C", "audio_url": "u", "duration": 0,
                 "viewpoint_id": "a", "order": 1}
            ]
        }"#;
    let err = Catalog::from_json(&site_json(vps, audio)).unwrap_err();
    assert!(matches!(err, CatalogError::ZeroDurationChapter { .. }));
}

#[test]
fn rejects_non_monotonic_chapter_order() {
    let vps = r#"[{"id": "a", "name": "A", "position": [0.0, 0.0, 0.0]}]"#;
    let audio = r#",
        "audio_tour": {
            "title": "T", "duration": 10, "narrator": {"name": "N"},
            "chapters": [
                {"id": "c1", "title": "C1", "audio_url": "u", "duration": 5,
                 "viewpoint_id": "a", "order": 2},
                {"id": "c2", "title": "C2", "audio_url": "u", "duration": 5,
                 "viewpoint_id": "a", "order": 2}
            ]
        }"#;
    let err = Catalog::from_json(&site_json(vps, audio)).unwrap_err();
    assert!(matches!(err, CatalogError::ChapterOrder(_)));
}

#[test]
fn tolerates_a_dangling_chapter_viewpoint() {
    // The controller keeps the current scene when a chapter's viewpoint is
    // missing, so this is valid catalog data.
    let vps = r#"[{"id": "a", "name": "A", "position": [0.0, 0.0, 0.0]}]"#;
    let audio = r#",
        "audio_tour": {
            "title": "T", "duration": 5, "narrator": {"name": "N"},
            "chapters": [
                {"id": "c", "title": "C", "audio_url": "u", "duration": 5,
                 "viewpoint_id": "gone", "order": 1}
            ]
        }"#;
    assert!(Catalog::from_json(&site_json(vps, audio)).is_ok());
}

#[test]
fn rejects_duplicate_site_ids() {
    let one = site_json(r#"[{"id": "a", "name": "A", "position": [0.0, 0.0, 0.0]}]"#, "");
    // Duplicate the single site object inside the array.
    let body = one.trim_start_matches('[').trim_end_matches(']');
    let doubled = format!("[{body},{body}]");
    let err = Catalog::from_json(&doubled).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateSite(_)));
}

#[test]
fn parse_errors_surface_as_catalog_errors() {
    let err = Catalog::from_json("not json").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
    // Hotspots without a recognised content tag fail to parse.
    let vps = r#"[
        {"id": "a", "name": "A", "position": [0.0, 0.0, 0.0],
         "hotspots": [{"id": "h", "title": "H", "content": {"kind": "video", "url": "u"}}]}
    ]"#;
    assert!(matches!(
        Catalog::from_json(&site_json(vps, "")).unwrap_err(),
        CatalogError::Parse(_)
    ));
}
