mod landmark;
mod route;
pub mod sequence;

pub use landmark::{Landmark, LandmarkUpdate};
pub use route::{sort_newest_first, NewRoute, Route, RouteUpdate, MIN_LANDMARKS};
pub use sequence::Direction;
