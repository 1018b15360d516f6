pub mod matcher;
pub mod normalize;
pub mod planner;
pub mod segmenter;
pub mod types;
