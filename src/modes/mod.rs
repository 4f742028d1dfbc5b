pub mod human;
pub mod pace;

pub use human::HumanMode;
pub use pace::Pace;
