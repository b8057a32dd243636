use crate::engine::momentum::MomentumAnalysis;
use crate::engine::normalize::round_to;
use crate::types::scoring::{CompositeResult, LifecycleStage, ScoreDetails};

const MOVING_THRESHOLD: f64 = 0.3;
const EMERGING_CEILING: f64 = 40.0;
const MATURE_FLOOR: f64 = 60.0;

pub fn lifecycle_stage(composite: f64, momentum: &MomentumAnalysis) -> LifecycleStage {
    if momentum.short_term > MOVING_THRESHOLD {
        if composite < EMERGING_CEILING {
            LifecycleStage::Emerging
        } else {
            LifecycleStage::Growing
        }
    } else if momentum.short_term < -MOVING_THRESHOLD {
        LifecycleStage::Declining
    } else if composite >= MATURE_FLOOR {
        LifecycleStage::Mature
    } else {
        LifecycleStage::Niche
    }
}

/// Completeness discounted by how much history backs the momentum reading.
pub fn score_details(result: &CompositeResult, momentum: &MomentumAnalysis) -> ScoreDetails {
    ScoreDetails {
        completeness: result.completeness,
        confidence: round_to(result.completeness * (0.5 + 0.5 * momentum.confidence), 3),
        lifecycle: lifecycle_stage(result.composite, momentum),
    }
}
