//! Domain events - Notifications of scenario state changes

mod scenario_events;

pub use scenario_events::ScenarioEvent;
