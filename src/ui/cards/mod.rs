mod overflow_card;
mod placeholder_card;
mod sensor_card;
mod valve_card;

pub use overflow_card::OverflowCard;
pub use placeholder_card::PlaceholderCard;
pub use sensor_card::{SensorCard, SENSOR_CARD_HEIGHT};
pub use valve_card::{ValveCard, VALVE_CARD_HEIGHT};

pub const CARD_WIDTH: u16 = 24;
/// Narrowest card that still shows the whole valve switch.
pub const MIN_CARD_WIDTH: u16 = 14;
pub const PLACEHOLDER_COUNT: usize = 3;
