pub mod manager;
pub mod service;
pub mod tracker;

#[cfg(test)]
pub mod testing;

pub use manager::{ImageMount, MountManager};
pub use service::{MountService, SystemMountService};
pub use tracker::{CleanupReport, LoopDevice, MountKind, MountRecord, ResourceTracker};
