//! Interaction state machine: `Idle`, `Drawing`, `Editing(feature)`.

use std::mem;

use expressway_core::error::{ExpresswayError, Result};
use expressway_core::models::{province_label, Coordinate, Feature, FeatureId, Status};
use expressway_core::ports::{FeatureStore, Layer, MapDisplay, Notifier, Severity};
use expressway_geo::validate_coordinate;
use geojson::FeatureCollection;
use serde_json::Value as JsonValue;

use crate::bridge::PersistenceBridge;
use crate::client::HttpFeatureClient;
use crate::markers::{MarkerId, VertexMarker};
use crate::mode::{DrawingDraft, InteractionMode};
use crate::session::EditSession;

/// Property carrying a province's resolved display name
pub const PROVINCE_LABEL_KEY: &str = "label";

/// Opacity of a feature's static layer while its overlay is shown
const HIDDEN_OPACITY: f64 = 0.0;
const VISIBLE_OPACITY: f64 = 1.0;

/// Owns the interaction mode and routes user actions to it
///
/// All mutations happen through `&mut self`, one event at a time. Store calls
/// are awaited in order, so a reload never starts before the save it follows
/// has answered.
pub struct Editor<D: MapDisplay, N: Notifier> {
    display: D,
    notifier: N,
    mode: InteractionMode,
}

impl<D: MapDisplay, N: Notifier> Editor<D, N> {
    pub fn new(display: D, notifier: N) -> Self {
        Self {
            display,
            notifier,
            mode: InteractionMode::Idle,
        }
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.mode {
            InteractionMode::Editing(session) => Some(session),
            _ => None,
        }
    }

    /// Contents of the name-editing control, cleared outside edit mode
    pub fn name_input(&self) -> Option<&str> {
        self.session().map(EditSession::name_input)
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Start editing `feature`, ending whatever mode was active
    ///
    /// On failure the current mode is left untouched.
    pub fn select(&mut self, feature: Feature) -> Result<()> {
        let session = match EditSession::open(feature) {
            Ok(session) => session,
            Err(e) => {
                self.notifier.notify(Severity::Error, format!("Cannot edit feature: {}", e));
                return Err(e);
            }
        };

        self.leave_mode();

        self.display
            .set_layer_opacity(Layer::Feature(session.layer_key().to_string()), HIDDEN_OPACITY);
        self.display.render(Layer::EditOverlay, &session.overlay());

        tracing::info!(
            feature = %session.layer_key(),
            vertices = session.store().len(),
            "Entered edit mode"
        );
        self.notifier.notify(
            Severity::Info,
            format!(
                "Editing {}: drag vertices, click the line to add one, remove to delete",
                session.name_input()
            ),
        );

        self.mode = InteractionMode::Editing(session);
        Ok(())
    }

    /// Leave edit mode without saving
    pub fn exit(&mut self) {
        if matches!(self.mode, InteractionMode::Editing(_)) {
            self.leave_mode();
        }
    }

    pub fn drag_marker(&mut self, id: MarkerId, position: Coordinate) -> Result<()> {
        self.edit(|session| session.drag(id, position))
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> Result<VertexMarker> {
        self.edit(|session| session.remove(id))
    }

    /// Add a vertex on the line segment nearest to `position`
    pub fn insert_point(&mut self, position: Coordinate) -> Result<MarkerId> {
        self.edit(|session| session.insert_near(position))
    }

    pub fn rename(&mut self, name: &str) -> Result<()> {
        self.edit(|session| session.rename(name))
    }

    /// Switch to freehand drawing, ending edit mode if active
    pub fn start_drawing(&mut self) {
        self.leave_mode();
        self.display.clear(Layer::Drawing);
        self.mode = InteractionMode::Drawing(DrawingDraft::default());
        tracing::info!("Entered drawing mode");
        self.notifier
            .notify(Severity::Info, "Click on the map to draw the new expressway".to_string());
    }

    pub fn add_drawing_point(&mut self, point: Coordinate) -> Result<()> {
        let InteractionMode::Drawing(draft) = &mut self.mode else {
            return Err(ExpresswayError::NotDrawing);
        };

        if let Err(e) = validate_coordinate(draft.points().len(), point) {
            self.notifier.notify(Severity::Error, e.to_string());
            return Err(e);
        }

        draft.push(point);
        self.display.render(Layer::Drawing, &draft.preview());
        Ok(())
    }

    pub fn cancel_drawing(&mut self) {
        if matches!(self.mode, InteractionMode::Drawing(_)) {
            self.leave_mode();
        }
    }

    /// Close the drawing and return it as a new feature ready for `add_new`
    ///
    /// An incomplete drawing stays open.
    pub fn finish_drawing(&mut self, name: &str, status: Status) -> Result<Feature> {
        let InteractionMode::Drawing(draft) = &self.mode else {
            return Err(ExpresswayError::NotDrawing);
        };

        let feature = match draft.to_feature(name, status) {
            Ok(feature) => feature,
            Err(e) => {
                self.notifier.notify(Severity::Error, e.to_string());
                return Err(e);
            }
        };

        self.leave_mode();
        Ok(feature)
    }

    /// Persist the feature under edit
    ///
    /// On success the expressway layer is reloaded and the session closes. On
    /// failure the session stays open with all edits so the user can retry.
    pub async fn save<S: FeatureStore + ?Sized>(&mut self, store: &S) -> Result<FeatureId> {
        let (feature, loaded_name) = match &mut self.mode {
            InteractionMode::Editing(session) => {
                session.assign_id_if_absent();
                (session.to_feature(), session.feature().name.clone())
            }
            _ => return Err(ExpresswayError::NoActiveSession),
        };

        self.notifier.notify(Severity::Info, format!("Saving {}...", feature.name));

        match PersistenceBridge::new(store).save(&feature, &loaded_name).await {
            Ok(id) => {
                self.notifier
                    .notify(Severity::Success, format!("{} saved successfully", feature.name));
                if let Err(e) = self.refresh(store).await {
                    tracing::warn!(error = %e, "Reload after save failed");
                }
                self.exit();
                Ok(id)
            }
            Err(e) => {
                self.notifier.notify(Severity::Error, format!("Failed to save: {}", e));
                Err(e)
            }
        }
    }

    /// Submit a new feature; the expressway layer is reloaded either way
    pub async fn add_new<S: FeatureStore + ?Sized>(
        &mut self,
        store: &S,
        draft: Feature,
    ) -> Result<FeatureId> {
        self.notifier.notify(Severity::Info, format!("Adding {}...", draft.name));

        let result = PersistenceBridge::new(store).add(&draft).await;
        match &result {
            Ok(_) => self
                .notifier
                .notify(Severity::Success, format!("{} added successfully", draft.name)),
            Err(e) => self.notifier.notify(Severity::Error, format!("Failed to add: {}", e)),
        }

        if let Err(e) = self.refresh(store).await {
            tracing::warn!(error = %e, "Reload after add failed");
        }
        result
    }

    /// Reload the expressway layer from the store
    pub async fn refresh<S: FeatureStore + ?Sized>(&mut self, store: &S) -> Result<usize> {
        match PersistenceBridge::new(store).reload().await {
            Ok(collection) => {
                self.display.render(Layer::Expressways, &collection);
                Ok(collection.features.len())
            }
            Err(e) => {
                self.notifier
                    .notify(Severity::Error, format!("Failed to load expressways: {}", e));
                Err(e)
            }
        }
    }

    /// Fetch province boundaries from `url` and draw them as the base layer
    ///
    /// Failures are reported and leave any previously drawn provinces alone.
    pub async fn load_provinces(&mut self, client: &HttpFeatureClient, url: &str) -> Result<usize> {
        match client.fetch_collection(url).await {
            Ok(provinces) => Ok(self.show_provinces(provinces)),
            Err(e) => {
                tracing::warn!(%url, error = %e, "Province boundaries unavailable");
                self.notifier
                    .notify(Severity::Error, format!("Failed to load provinces: {}", e));
                Err(e)
            }
        }
    }

    /// Label each province and render the collection, returning its size
    pub fn show_provinces(&mut self, mut provinces: FeatureCollection) -> usize {
        for feature in &mut provinces.features {
            let label = province_label(feature.properties.as_ref()).to_string();
            feature
                .properties
                .get_or_insert_with(Default::default)
                .insert(PROVINCE_LABEL_KEY.to_string(), JsonValue::from(label));
        }

        let count = provinces.features.len();
        self.display.render(Layer::Provinces, &provinces);
        tracing::info!(provinces = count, "Rendered province boundaries");
        count
    }

    /// Apply one edit to the open session and redraw the overlay from scratch
    fn edit<T>(&mut self, op: impl FnOnce(&mut EditSession) -> Result<T>) -> Result<T> {
        let InteractionMode::Editing(session) = &mut self.mode else {
            return Err(ExpresswayError::NoActiveSession);
        };

        match op(session) {
            Ok(value) => {
                debug_assert!(session.markers().is_consistent_with(session.store()));
                self.display.render(Layer::EditOverlay, &session.overlay());
                Ok(value)
            }
            Err(e) => {
                if e.is_local() {
                    tracing::debug!(error = %e, "Edit rejected");
                } else {
                    tracing::warn!(error = %e, "Edit failed");
                }
                self.notifier.notify(Severity::Error, e.to_string());
                Err(e)
            }
        }
    }

    /// Tear down the active mode and return to `Idle`
    fn leave_mode(&mut self) {
        match mem::take(&mut self.mode) {
            InteractionMode::Idle => {}
            InteractionMode::Drawing(draft) => {
                self.display.clear(Layer::Drawing);
                tracing::debug!(points = draft.points().len(), "Left drawing mode");
            }
            InteractionMode::Editing(session) => {
                self.display.clear(Layer::EditOverlay);
                self.display.set_layer_opacity(
                    Layer::Feature(session.layer_key().to_string()),
                    VISIBLE_OPACITY,
                );
                tracing::debug!(feature = %session.layer_key(), "Left edit mode");
            }
        }
    }
}
