pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod mount;
pub mod stage;
pub mod types;
pub mod util;

pub use config::Settings;
pub use error::{Result, StageError};
pub use inventory::{read_inventory, InventoryEntry};
pub use mount::{ImageMount, MountManager, MountService, ResourceTracker, SystemMountService};
pub use stage::{run_stage, FileCopier, RsyncCopier, StagingPipeline};
pub use types::RunMode;
