//! Navigation resolver: total viewpoint lookups and nearest-viewpoint
//! selection over a site's declared coordinate space.

use glam::Vec3;

use crate::catalog::{GeoPoint, HeritageSite, Position, Viewpoint};
use crate::constants::EARTH_RADIUS_KM;

/// Look a viewpoint up by id. Total: unknown ids resolve to `None` and the
/// caller leaves its current viewpoint unchanged.
pub fn resolve_viewpoint<'a>(site: &'a HeritageSite, id: &str) -> Option<&'a Viewpoint> {
    site.viewpoint(id)
}

/// Entry viewpoint for a site: the `is_default`-flagged one, else the first.
pub fn default_viewpoint(site: &HeritageSite) -> Option<&Viewpoint> {
    site.viewpoints
        .iter()
        .find(|vp| vp.is_default)
        .or_else(|| site.viewpoints.first())
}

/// Resolve a directed navigation edge from `from` to `to_id`, if the edge
/// exists in the catalog.
pub fn connection_target<'a>(
    site: &'a HeritageSite,
    from: &Viewpoint,
    to_id: &str,
) -> Option<&'a Viewpoint> {
    from.connections
        .iter()
        .find(|c| c.to == to_id)
        .and_then(|c| site.viewpoint(&c.to))
}

/// Great-circle distance between two geographic points, in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Straight-line distance between two scene-space points.
pub fn scene_distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}

fn position_distance(a: &Position, b: &Position) -> Option<f64> {
    match (a, b) {
        (Position::Geographic(p), Position::Geographic(q)) => Some(haversine_km(*p, *q)),
        (Position::Scene(p), Position::Scene(q)) => {
            Some(scene_distance(Vec3::from_array(*p), Vec3::from_array(*q)) as f64)
        }
        // Metrics must never be mixed within one call.
        _ => None,
    }
}

/// Nearest viewpoint to a continuous position, using the metric implied by
/// the site's coordinate space. A query in the wrong space resolves to
/// `None` rather than comparing incomparable distances. Exact ties keep the
/// first candidate in catalog order.
pub fn nearest_viewpoint<'a>(site: &'a HeritageSite, query: &Position) -> Option<&'a Viewpoint> {
    if query.space() != site.coordinate_space {
        log::warn!(
            "[nav] nearest-viewpoint query for {} is not in the site's {:?} space",
            site.id,
            site.coordinate_space
        );
        return None;
    }
    let mut best: Option<(&Viewpoint, f64)> = None;
    for vp in &site.viewpoints {
        let Some(d) = position_distance(&vp.position, query) else {
            continue;
        };
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((vp, d)),
        }
    }
    best.map(|(vp, _)| vp)
}
