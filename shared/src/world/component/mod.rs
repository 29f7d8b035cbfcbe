pub mod diff_mask;
pub mod network_transform;
