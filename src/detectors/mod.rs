//! Chart-pattern detectors.
//!
//! Each detector is a pure predicate over an immutable series snapshot and
//! its pre-computed indicator bundle. A series shorter than `min_bars()`
//! yields `false` by policy, never an error. Detectors share no mutable
//! state and may be evaluated independently.

pub mod ascending_triangle;
pub mod base_building;
pub mod breakout;
pub mod cup_handle;
pub mod gap_up;
pub mod momentum;
pub mod oversold_bounce;
pub mod pullback_support;
pub mod volume_accumulation;

pub use ascending_triangle::AscendingTriangle;
pub use base_building::BaseBuilding;
pub use breakout::Breakout;
pub use cup_handle::CupHandle;
pub use gap_up::GapUp;
pub use momentum::Momentum;
pub use oversold_bounce::OversoldBounce;
pub use pullback_support::PullbackSupport;
pub use volume_accumulation::VolumeAccumulation;

use crate::indicators::IndicatorSet;
use crate::types::{PatternFlags, PriceSeries};
use std::collections::BTreeSet;

/// Trait for implementing pattern detectors.
pub trait Detector: Send + Sync {
    /// Pattern name used in filters and result flags.
    fn id(&self) -> &'static str;

    /// Minimum number of bars required before the rule can fire.
    fn min_bars(&self) -> usize;

    /// Evaluate the pattern. Must return `false` on insufficient data.
    fn detect(&self, series: &PriceSeries, indicators: &IndicatorSet) -> bool;
}

/// All detectors with their default thresholds.
pub fn all_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(GapUp::default()),
        Box::new(Breakout::default()),
        Box::new(Momentum::default()),
        Box::new(OversoldBounce::default()),
        Box::new(PullbackSupport::default()),
        Box::new(VolumeAccumulation::default()),
        Box::new(BaseBuilding::default()),
        Box::new(CupHandle::default()),
        Box::new(AscendingTriangle::default()),
    ]
}

/// Look up a detector by pattern name.
pub fn detector_for(name: &str) -> Option<Box<dyn Detector>> {
    all_detectors().into_iter().find(|d| d.id() == name)
}

/// Scoring weight for a pattern name, if known.
pub fn pattern_weight(name: &str) -> Option<f64> {
    let weight = match name {
        "gap_up" => 3.0,
        "breakout" => 4.0,
        "momentum" => 3.5,
        "oversold_bounce" => 4.5,
        "pullback_support" => 4.0,
        "volume_accumulation" => 3.5,
        "base_building" => 3.0,
        "cup_handle" => 5.0,
        "ascending_triangle" => 4.5,
        _ => return None,
    };
    Some(weight)
}

/// Run only the requested detectors; unknown names never fire.
pub fn run_detectors(
    requested: &BTreeSet<String>,
    series: &PriceSeries,
    indicators: &IndicatorSet,
) -> PatternFlags {
    let mut flags = PatternFlags::new();
    for name in requested {
        if let Some(detector) = detector_for(name) {
            if detector.detect(series, indicators) {
                flags.insert(detector.id().to_string());
            }
        }
    }
    flags
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
