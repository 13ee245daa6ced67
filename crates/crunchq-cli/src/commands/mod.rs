pub mod caffeine;
pub mod fridge;
pub mod schedule;
