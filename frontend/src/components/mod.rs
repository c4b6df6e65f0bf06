pub mod map_component;
pub mod workout_entry;
