//! Static site catalog: the read-only table of heritage sites, viewpoints,
//! hotspots and audio tours that every viewer variant navigates over.
//!
//! The catalog is loaded once (from the embedded JSON document or a caller
//! supplied one), validated, and never mutated afterwards. Lookups are total
//! functions returning `Option`; only loading can fail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geographic coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteLocation {
    pub city: String,
    pub state: String,
    pub coordinates: GeoPoint,
}

/// Unit contract for a site's viewpoint positions. Declared per site so the
/// nearest-viewpoint resolver never has to infer a metric from which viewer
/// is active; the two spaces are never mixed within one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    Geographic,
    Scene,
}

/// Viewer variants a site supports; drives data-driven dispatch instead of
/// per-site-id branching in the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerKind {
    Panorama,
    StreetView,
    Scene,
}

/// Percent position of a site's marker on the landing-page mini map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub x_pct: f32,
    pub y_pct: f32,
}

/// A viewpoint position in the site's declared coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Geographic(GeoPoint),
    Scene([f32; 3]),
}

impl Position {
    pub fn space(&self) -> CoordinateSpace {
        match self {
            Position::Geographic(_) => CoordinateSpace::Geographic,
            Position::Scene(_) => CoordinateSpace::Scene,
        }
    }
}

/// Directed navigation edge between two viewpoints of the same site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub to: String,
    pub label: String,
    /// Placement angle of the navigation control, degrees.
    #[serde(default)]
    pub angle: f32,
}

/// Informational content behind a hotspot, resolved to a single tagged
/// variant at the catalog boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HotspotContent {
    Text {
        body: String,
        #[serde(default)]
        details: Vec<String>,
    },
    Image {
        url: String,
        #[serde(default)]
        caption: String,
    },
    Audio {
        url: String,
        #[serde(default)]
        transcript: String,
    },
}

impl HotspotContent {
    /// Primary text shown in the info panel, whatever the variant.
    pub fn summary(&self) -> &str {
        match self {
            HotspotContent::Text { body, .. } => body,
            HotspotContent::Image { caption, .. } => caption,
            HotspotContent::Audio { transcript, .. } => transcript,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: String,
    pub title: String,
    /// Percent position on the panorama overlay, when screen-anchored.
    #[serde(default)]
    pub screen: Option<[f32; 2]>,
    /// World position, when anchored in the site's coordinate space.
    #[serde(default)]
    pub world: Option<[f32; 3]>,
    pub content: HotspotContent,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub position: Position,
    #[serde(default)]
    pub is_default: bool,
    /// Panorama background image locator.
    #[serde(default)]
    pub image: Option<String>,
    /// Opaque embed locator for the external street-view surface.
    #[serde(default)]
    pub street_view: Option<String>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Viewpoint {
    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrator {
    pub name: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioChapter {
    pub id: String,
    pub title: String,
    pub audio_url: String,
    /// Narration length in seconds; always > 0 after validation.
    pub duration: u32,
    /// Viewpoint shown while this chapter plays.
    pub viewpoint_id: String,
    #[serde(default)]
    pub transcript: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTour {
    pub title: String,
    /// Total length in seconds.
    pub duration: u32,
    pub chapters: Vec<AudioChapter>,
    pub narrator: Narrator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeritageSite {
    pub id: String,
    pub name: String,
    pub location: SiteLocation,
    pub description: String,
    pub historical_period: String,
    pub thumbnail_url: String,
    pub coordinate_space: CoordinateSpace,
    #[serde(default)]
    pub viewers: Vec<ViewerKind>,
    pub viewpoints: Vec<Viewpoint>,
    #[serde(default)]
    pub audio_tour: Option<AudioTour>,
    #[serde(default)]
    pub map_marker: Option<MapMarker>,
}

impl HeritageSite {
    pub fn viewpoint(&self, id: &str) -> Option<&Viewpoint> {
        self.viewpoints.iter().find(|vp| vp.id == id)
    }

    pub fn supports(&self, kind: ViewerKind) -> bool {
        self.viewers.contains(&kind)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate site id {0:?}")]
    DuplicateSite(String),
    #[error("site {site:?} has duplicate viewpoint id {viewpoint:?}")]
    DuplicateViewpoint { site: String, viewpoint: String },
    #[error("site {0:?} has no viewpoints")]
    NoViewpoints(String),
    #[error("site {0:?} flags more than one default viewpoint")]
    MultipleDefaults(String),
    #[error("site {site:?} viewpoint {viewpoint:?} position is not in the site's declared space")]
    SpaceMismatch { site: String, viewpoint: String },
    #[error("site {site:?} references unknown viewpoint {reference:?}")]
    DanglingViewpoint { site: String, reference: String },
    #[error("site {site:?} audio chapter {chapter:?} has zero duration")]
    ZeroDurationChapter { site: String, chapter: String },
    #[error("site {0:?} audio chapters are not in monotonic order")]
    ChapterOrder(String),
}

/// The immutable, load-time-constant collection of heritage sites.
#[derive(Debug, Clone)]
pub struct Catalog {
    sites: Vec<HeritageSite>,
}

impl Catalog {
    /// Parse and validate the embedded site catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(crate::BUILTIN_SITES_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let sites: Vec<HeritageSite> = serde_json::from_str(json)?;
        Self::from_sites(sites)
    }

    pub fn from_sites(sites: Vec<HeritageSite>) -> Result<Self, CatalogError> {
        for (i, site) in sites.iter().enumerate() {
            if sites[..i].iter().any(|s| s.id == site.id) {
                return Err(CatalogError::DuplicateSite(site.id.clone()));
            }
            validate_site(site)?;
        }
        log::info!("[catalog] loaded {} sites", sites.len());
        Ok(Self { sites })
    }

    pub fn sites(&self) -> &[HeritageSite] {
        &self.sites
    }

    pub fn site(&self, id: &str) -> Option<&HeritageSite> {
        self.sites.iter().find(|s| s.id == id)
    }
}

fn validate_site(site: &HeritageSite) -> Result<(), CatalogError> {
    if site.viewpoints.is_empty() {
        return Err(CatalogError::NoViewpoints(site.id.clone()));
    }
    if site.viewpoints.iter().filter(|vp| vp.is_default).count() > 1 {
        return Err(CatalogError::MultipleDefaults(site.id.clone()));
    }
    for (i, vp) in site.viewpoints.iter().enumerate() {
        if site.viewpoints[..i].iter().any(|v| v.id == vp.id) {
            return Err(CatalogError::DuplicateViewpoint {
                site: site.id.clone(),
                viewpoint: vp.id.clone(),
            });
        }
        if vp.position.space() != site.coordinate_space {
            return Err(CatalogError::SpaceMismatch {
                site: site.id.clone(),
                viewpoint: vp.id.clone(),
            });
        }
        for conn in &vp.connections {
            if site.viewpoint(&conn.to).is_none() {
                return Err(CatalogError::DanglingViewpoint {
                    site: site.id.clone(),
                    reference: conn.to.clone(),
                });
            }
        }
    }
    if let Some(tour) = &site.audio_tour {
        let mut last_order = None;
        for chapter in &tour.chapters {
            if chapter.duration == 0 {
                return Err(CatalogError::ZeroDurationChapter {
                    site: site.id.clone(),
                    chapter: chapter.id.clone(),
                });
            }
            if last_order.is_some_and(|prev| chapter.order <= prev) {
                return Err(CatalogError::ChapterOrder(site.id.clone()));
            }
            last_order = Some(chapter.order);
            // A chapter's viewpoint_id is allowed to dangle: the controller
            // keeps the current scene and lets narration continue.
        }
    }
    Ok(())
}
