//! Force-directed graph visualization component.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Physics-based node positioning, stabilized before the first frame
//! - Pan, zoom, and node dragging with mouse and keyboard
//! - Hover highlighting and delayed tooltips
//! - Per-node shapes and per-edge colors, dashes and labels
//! - Visibility filtering that hides nodes without removing them from the layout
//!
//! # Example
//!
//! ```ignore
//! use contingency_network::{ForceGraphCanvas, GraphData, Settings, Visibility};
//!
//! let ready = RwSignal::new(false);
//! let visibility = RwSignal::new(Visibility::All);
//!
//! view! {
//!     <ForceGraphCanvas
//!         data=Signal::derive(move || data.clone())
//!         visibility=visibility
//!         settings=Settings::default()
//!         ready=ready
//!         fullscreen=true
//!     />
//! }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
pub use types::{ArrowHeads, EdgeColor, GraphData, GraphLink, GraphNode, NodeShape};
