//! Viewer state controller: the single mutable state bag behind every
//! viewer variant, mutated only through `TourEngine` transition methods.
//!
//! Transitions are total: unknown ids and out-of-range indices leave the
//! state unchanged instead of erroring, and no transition can produce a
//! state whose ids do not resolve in the catalog.

use crate::catalog::{AudioTour, Catalog, HeritageSite, Hotspot, Position, Viewpoint};
use crate::nav;
use crate::pano::PanoCamera;
use crate::sequencer::{AudioSequencer, SequencerEvent};

/// Snapshot consumed read-only by the presentation layer. Catalog entities
/// are referenced by id, never copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerState {
    pub site: Option<String>,
    pub viewpoint: Option<String>,
    pub loading: bool,
    pub selected_hotspot: Option<String>,
    pub audio_playing: bool,
    pub chapter: usize,
    /// Set when the background media failed and a placeholder is shown.
    pub media_failed: bool,
}

pub struct TourEngine {
    catalog: Catalog,
    pub state: ViewerState,
    pub camera: PanoCamera,
    sequencer: AudioSequencer,
}

impl TourEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: ViewerState::default(),
            camera: PanoCamera::new(),
            sequencer: AudioSequencer::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sequencer(&self) -> &AudioSequencer {
        &self.sequencer
    }

    pub fn current_site(&self) -> Option<&HeritageSite> {
        self.catalog.site(self.state.site.as_deref()?)
    }

    pub fn current_viewpoint(&self) -> Option<&Viewpoint> {
        self.current_site()?.viewpoint(self.state.viewpoint.as_deref()?)
    }

    pub fn selected_hotspot(&self) -> Option<&Hotspot> {
        self.current_viewpoint()?
            .hotspot(self.state.selected_hotspot.as_deref()?)
    }

    pub fn audio_tour(&self) -> Option<&AudioTour> {
        self.current_site()?.audio_tour.as_ref()
    }

    /// Enter a site at its default viewpoint. Unknown ids leave the state
    /// unchanged. Any running audio tour is stopped, the camera reset.
    pub fn select_site(&mut self, id: &str) -> bool {
        let Some(site) = self.catalog.site(id) else {
            log::warn!("[tour] unknown site {id:?}");
            return false;
        };
        let entry = nav::default_viewpoint(site).map(|vp| vp.id.clone());
        self.state = ViewerState {
            site: Some(site.id.clone()),
            viewpoint: entry,
            loading: true,
            ..ViewerState::default()
        };
        self.sequencer.stop();
        self.camera.reset();
        log::info!("[tour] site {id} selected");
        true
    }

    /// Leave the viewer and return to the landing page.
    pub fn close_site(&mut self) {
        self.state = ViewerState::default();
        self.sequencer.stop();
        self.camera.reset();
    }

    /// Replace the current viewpoint. Always clears the hotspot selection
    /// and resets the camera; no camera state persists across viewpoints.
    pub fn select_viewpoint(&mut self, id: &str) -> bool {
        let Some(site) = self.current_site() else {
            return false;
        };
        if nav::resolve_viewpoint(site, id).is_none() {
            log::warn!("[tour] unknown viewpoint {id:?} in {}", site.id);
            return false;
        }
        self.state.viewpoint = Some(id.to_owned());
        self.state.selected_hotspot = None;
        self.state.loading = true;
        self.state.media_failed = false;
        self.camera.reset();
        true
    }

    /// Follow a directed connection edge from the current viewpoint.
    pub fn follow_connection(&mut self, to_id: &str) -> bool {
        let Some(site) = self.current_site() else {
            return false;
        };
        let Some(from) = self.current_viewpoint() else {
            return false;
        };
        if nav::connection_target(site, from, to_id).is_none() {
            return false;
        }
        self.select_viewpoint(to_id)
    }

    /// Jump to the viewpoint nearest to a continuous position (map-based
    /// viewer). The query must be in the site's declared coordinate space.
    pub fn jump_to_nearest(&mut self, query: &Position) -> bool {
        let Some(site) = self.current_site() else {
            return false;
        };
        let Some(target) = nav::nearest_viewpoint(site, query) else {
            return false;
        };
        let id = target.id.clone();
        self.select_viewpoint(&id)
    }

    /// Idempotent toggle: selecting the already-selected hotspot deselects
    /// it. Ids that do not resolve in the current viewpoint are ignored.
    pub fn toggle_hotspot(&mut self, id: &str) {
        let Some(vp) = self.current_viewpoint() else {
            return;
        };
        if vp.hotspot(id).is_none() {
            return;
        }
        if self.state.selected_hotspot.as_deref() == Some(id) {
            self.state.selected_hotspot = None;
        } else {
            self.state.selected_hotspot = Some(id.to_owned());
        }
    }

    /// Begin (or resume) the audio tour. A stopped tour restarts from
    /// chapter 0 and jumps the scene to that chapter's viewpoint; a paused
    /// one resumes where it left off.
    pub fn start_audio_tour(&mut self) {
        if self.audio_tour().is_none() {
            return;
        }
        self.state.audio_playing = true;
        if self.sequencer.chapter().is_none() {
            self.sequencer.start();
            self.advance_chapter(0);
        }
    }

    /// Suspend playback, keeping chapter and elapsed position.
    pub fn pause_audio_tour(&mut self) {
        self.state.audio_playing = false;
    }

    /// End the tour; the next start plays from the beginning again.
    pub fn stop_audio_tour(&mut self) {
        self.state.audio_playing = false;
        self.state.chapter = 0;
        self.sequencer.stop();
    }

    /// Show chapter `index` and jump to its associated viewpoint when that
    /// viewpoint exists; otherwise narration continues over the current
    /// scene. Out-of-range indices are ignored.
    pub fn advance_chapter(&mut self, index: usize) {
        let Some(site_id) = self.state.site.clone() else {
            return;
        };
        let Some(tour) = self
            .catalog
            .site(&site_id)
            .and_then(|s| s.audio_tour.as_ref())
        else {
            return;
        };
        if !self.sequencer.seek(index, tour) {
            return;
        }
        let viewpoint_id = tour.chapters[index].viewpoint_id.clone();
        self.state.chapter = index;
        self.select_viewpoint(&viewpoint_id);
    }

    /// Manual next-chapter control; no-op at the last chapter.
    pub fn next_chapter(&mut self) {
        let Some(len) = self.audio_tour().map(|t| t.chapters.len()) else {
            return;
        };
        if self.state.chapter + 1 < len {
            self.advance_chapter(self.state.chapter + 1);
        }
    }

    /// Manual previous-chapter control; no-op at the first chapter.
    pub fn previous_chapter(&mut self) {
        if self.state.chapter > 0 {
            self.advance_chapter(self.state.chapter - 1);
        }
    }

    /// Advance the simulated audio clock by one second, applying the
    /// sequencer's chapter-advance or finish effect to the viewer state.
    pub fn tick_audio(&mut self) -> Option<SequencerEvent> {
        if !self.state.audio_playing {
            return None;
        }
        let site_id = self.state.site.clone()?;
        let (event, jump_to) = {
            let tour = self
                .catalog
                .site(&site_id)
                .and_then(|s| s.audio_tour.as_ref())?;
            let event = self.sequencer.tick(tour)?;
            let jump_to = match event {
                SequencerEvent::ChapterStarted(idx) => {
                    Some(tour.chapters[idx].viewpoint_id.clone())
                }
                SequencerEvent::Finished => None,
            };
            (event, jump_to)
        };
        match event {
            SequencerEvent::ChapterStarted(idx) => {
                self.state.chapter = idx;
                if let Some(vp) = jump_to {
                    self.select_viewpoint(&vp);
                }
            }
            SequencerEvent::Finished => {
                self.state.audio_playing = false;
                self.state.chapter = 0;
            }
        }
        Some(event)
    }

    // Panorama gesture forwarding.

    pub fn begin_drag(&mut self, x: f32) {
        self.camera.pointer_down(x);
    }

    pub fn drag_to(&mut self, x: f32) {
        self.camera.pointer_move(x);
    }

    pub fn end_drag(&mut self) {
        self.camera.pointer_up();
    }

    pub fn adjust_zoom(&mut self, delta: f32) {
        self.camera.adjust_zoom(delta);
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    // Loading flag management.

    pub fn media_loaded(&mut self) {
        self.state.loading = false;
    }

    /// Media failure falls back to a placeholder; the loading flag is
    /// cleared either way so the UI never hangs in a loading state.
    pub fn media_load_failed(&mut self) {
        self.state.loading = false;
        self.state.media_failed = true;
    }
}
