//! UI components for the network page.

pub mod force_graph;
mod legend;
mod progress_overlay;
mod sidebar;
mod timeline_scrubber;

pub use legend::Legend;
pub use progress_overlay::ProgressOverlay;
pub use sidebar::Sidebar;
pub use timeline_scrubber::TimelineScrubber;
