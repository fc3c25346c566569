pub mod copy;
pub mod discover;
pub mod pipeline;

pub use copy::{FileCopier, RsyncCopier};
pub use pipeline::{run_stage, RowOutcome, StageSummary, StagingPipeline};
