use serde::{Deserialize, Serialize};
use super::Direction;

/// Visual state of one train for one clock tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainVisualState {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
    pub is_stopped: bool,
    pub is_active: bool,
    pub is_turning_around: bool,
    pub is_in_depot: bool,
    /// Heading in degrees (0 = towards higher station ids)
    pub rotation: f64,
    /// Position of the docked station along the line, `None` when not docked
    pub current_station_index: Option<usize>,
    pub turnaround_progress: Option<f64>,
}

impl TrainVisualState {
    /// State for a train that has not entered service yet
    #[must_use]
    pub const fn inactive(id: u32, direction: Direction) -> Self {
        Self {
            id,
            x: 0.0,
            y: 0.0,
            direction,
            is_stopped: true,
            is_active: false,
            is_turning_around: false,
            is_in_depot: false,
            rotation: 0.0,
            current_station_index: None,
            turnaround_progress: None,
        }
    }

    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.is_active && !self.is_stopped && !self.is_turning_around && !self.is_in_depot
    }
}
