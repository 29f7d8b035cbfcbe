mod policy;
mod replication_module;
mod tick_report;

pub use policy::{ClientPolicy, Recipient, ReplicationPolicy, ServerPolicy};
pub use replication_module::ReplicationModule;
pub use tick_report::TickReport;
