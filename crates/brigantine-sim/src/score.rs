//! Voyage score bookkeeping.

use brigantine_core::state::ScoreView;

#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub treasure_value: u32,
    pub treasures_collected: u32,
    pub treasures_total: u32,
    pub shots_fired: u32,
}

impl ScoreState {
    pub fn record_treasure(&mut self, value: u32) {
        self.treasure_value += value;
        self.treasures_collected += 1;
    }

    pub fn view(&self, voyage_time_secs: f64) -> ScoreView {
        ScoreView {
            treasure_value: self.treasure_value,
            treasures_collected: self.treasures_collected,
            treasures_total: self.treasures_total,
            shots_fired: self.shots_fired,
            voyage_time_secs,
        }
    }
}
