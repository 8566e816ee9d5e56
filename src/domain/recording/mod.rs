//! Recording domain module

mod duration;
mod quality;
mod uri;

pub use duration::Duration;
pub use quality::{QualityPreset, LOW_QUALITY_SAMPLE_RATE};
pub use uri::RecordingUri;
