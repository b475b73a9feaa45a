pub mod pacing;
pub mod progress;
pub mod report;
pub mod segmentation;
