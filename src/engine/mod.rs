//! The trend intelligence engine: pure, synchronous transforms from raw
//! signals to composite scores, momentum and anomaly flags.

pub mod anomaly;
pub mod composite;
pub mod lifecycle;
pub mod momentum;
pub mod normalize;
pub mod pipeline;
pub mod settings;
pub mod subscores;

pub use anomaly::{detect_anomalies, AnomalyDetectionResult, AnomalyThresholds, SignalSnapshot};
pub use momentum::MomentumAnalysis;
pub use pipeline::{score_batch, score_technology, BatchOutcome, TechnologyInput};
pub use settings::EngineSettings;
