pub mod scene;
pub mod test_world;

pub use helpers::{deltas, registrations};
pub use local_bus::{LocalBus, LocalNetwork};
pub use scene::SceneMembers;
pub use test_host::TestHost;
pub use test_world::{TestObject, TestWorld};

/// Installs env_logger once for a test binary; repeated calls are ignored
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
