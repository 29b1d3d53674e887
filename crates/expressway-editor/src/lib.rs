//! Expressway Editor - Interactive line geometry editing
//!
//! The editor keeps three things consistent while a user reshapes an
//! expressway: the backing coordinate list ([`GeometryStore`]), one handle per
//! vertex ([`MarkerSet`]), and the overlay drawn on the map. An [`Editor`]
//! owns the current [`InteractionMode`] and talks to the outside world only
//! through the ports in `expressway_core::ports`.

pub mod bridge;
pub mod client;
pub mod display;
pub mod editor;
pub mod geometry_store;
pub mod markers;
pub mod mode;
pub mod session;
pub mod status;

pub use bridge::PersistenceBridge;
pub use client::HttpFeatureClient;
pub use display::HeadlessDisplay;
pub use editor::{Editor, PROVINCE_LABEL_KEY};
pub use geometry_store::GeometryStore;
pub use markers::{MarkerId, MarkerSet, VertexMarker};
pub use mode::{DrawingDraft, InteractionMode};
pub use session::EditSession;
pub use status::{Notification, StatusSlot};
