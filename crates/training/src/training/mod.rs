//! Training infrastructure: pair statistics and the merge learner.

pub mod counter;
pub mod trainer;

pub use trainer::{MergeLearner, TrainedModel, TrainingConfig, TrainingReport};
