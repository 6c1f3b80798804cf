mod canvas;
mod overlay;
mod track;
mod trains;

pub use canvas::TrainMap;
pub use overlay::summary_lines;
pub use trains::train_color;
