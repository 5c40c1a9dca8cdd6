pub mod overlay_viewmodel;
pub mod camera_viewmodel;

pub use overlay_viewmodel::{MarkerOutcome, OverlayViewModel, RenderOutcome, RouteOutcome};
pub use camera_viewmodel::{CameraMove, CameraViewModel};
