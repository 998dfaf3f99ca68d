//! 수집 및 파이프라인 모듈.

pub mod checkpoint;
pub mod indicator_collect;
pub mod pipeline;

pub use checkpoint::{Checkpoint, CheckpointInfo, CheckpointStatus};
pub use indicator_collect::{parse_observation, Collection, Indicator, IndicatorCollector};
pub use pipeline::{
    assemble_secondary, clean_sources, collect_primary, merge_sources, reconcile, CollectOptions,
};
