pub mod authority;
pub mod component;
pub mod delta;
pub mod registration_tracker;
pub mod registry;
pub mod replicated_object;
pub mod world_type;
