pub mod coordinates;
pub mod command;

pub use coordinates::{BoundingBox, LatLng};
pub use command::{MarkerSource, MarkerSpec, RouteInput, UpdateCommand};
