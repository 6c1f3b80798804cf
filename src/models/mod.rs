mod event;
mod layout;
mod settings;
mod train_state;

pub use event::{Direction, TrainStatus, DepartureTime, TimetableEvent, RawTimetableEntry};
pub use layout::{TrackLayout, StationGeometry};
pub use settings::{MapSettings, ServicePeriod, ViewWindow};
pub use train_state::TrainVisualState;
