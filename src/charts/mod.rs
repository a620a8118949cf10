//! Charts module - state accident maps

mod coords;
mod plotter;
mod renderer;

pub use coords::{normalize_latitude, normalize_longitude, select_state, Accident};
pub use plotter::{MapOutcome, MapPlotter};
pub use renderer::{MapBounds, MapStyle, StaticMapRenderer};
