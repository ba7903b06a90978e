//! Cardiac-cycle morphology profiles
//!
//! A profile partitions one RR interval into the named PQRST segments and
//! gives each a closed-form shape: half-sine lobes for the P and T waves,
//! linear interpolation between knots for the QRS complex and flat levels for
//! the PR segment, ST segment and the diastolic baseline. Phases past the end
//! of the T wave sit on the baseline, so a short RR interval simply truncates
//! the cycle.

use std::f64::consts::PI;

/// Named phase of one cardiac cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardiacSegment {
    PWave,
    PrSegment,
    QrsComplex,
    StSegment,
    TWave,
    Baseline,
}

/// Half-sine lobe `offset + peak * sin(pi * (t - onset) / duration)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineLobe {
    pub onset_s: f64,
    pub duration_s: f64,
    pub peak_mv: f64,
    pub offset_mv: f64,
}

impl SineLobe {
    pub fn end_s(&self) -> f64 {
        self.onset_s + self.duration_s
    }

    fn value_at(&self, t: f64) -> f64 {
        let progress = (t - self.onset_s) / self.duration_s;
        self.offset_mv + self.peak_mv * (progress * PI).sin()
    }
}

/// QRS complex as a polyline through onset, Q, R, S and offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrsComplex {
    /// `(time_s, amplitude_mv)` knots in strictly increasing time
    pub knots: [(f64, f64); 5],
}

impl QrsComplex {
    pub fn onset_s(&self) -> f64 {
        self.knots[0].0
    }

    pub fn offset_s(&self) -> f64 {
        self.knots[4].0
    }

    /// Largest knot amplitude, the R peak
    pub fn r_peak_mv(&self) -> f64 {
        self.knots
            .iter()
            .map(|&(_, v)| v)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn value_at(&self, t: f64) -> f64 {
        for pair in self.knots.windows(2) {
            let (t0, v0) = pair[0];
            let (t1, v1) = pair[1];
            if t < t1 {
                return v0 + (v1 - v0) * (t - t0) / (t1 - t0);
            }
        }
        self.knots[4].1
    }
}

/// Segment boundaries and amplitudes for one morphology
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphologyProfile {
    pub name: &'static str,
    pub baseline_mv: f64,
    pub p_wave: SineLobe,
    pub pr_level_mv: f64,
    pub qrs: QrsComplex,
    pub st_level_mv: f64,
    pub t_wave: SineLobe,
    /// Add slow baseline wander and high-frequency irregularity on top
    pub irregular: bool,
}

impl MorphologyProfile {
    /// Canonical waveform
    pub const NORMAL: MorphologyProfile = MorphologyProfile {
        name: "normal",
        baseline_mv: 0.0,
        p_wave: SineLobe { onset_s: 0.0, duration_s: 0.10, peak_mv: 0.10, offset_mv: 0.0 },
        pr_level_mv: 0.0,
        qrs: QrsComplex {
            knots: [(0.16, 0.0), (0.18, -0.2), (0.20, 1.5), (0.22, -0.3), (0.24, 0.0)],
        },
        st_level_mv: 0.05,
        t_wave: SineLobe { onset_s: 0.38, duration_s: 0.22, peak_mv: 0.20, offset_mv: 0.0 },
        irregular: false,
    };

    /// Alternate morphology: narrower complex, raised isoelectric line
    pub const VARIANT: MorphologyProfile = MorphologyProfile {
        name: "variant",
        baseline_mv: 0.02,
        p_wave: SineLobe { onset_s: 0.0, duration_s: 0.08, peak_mv: 0.12, offset_mv: 0.0 },
        pr_level_mv: 0.02,
        qrs: QrsComplex {
            knots: [(0.12, 0.02), (0.14, -0.15), (0.16, 1.2), (0.18, -0.25), (0.20, 0.02)],
        },
        st_level_mv: 0.02,
        t_wave: SineLobe { onset_s: 0.32, duration_s: 0.20, peak_mv: 0.18, offset_mv: 0.02 },
        irregular: true,
    };

    /// Which segment a phase (seconds into the cycle) falls in
    pub fn segment_at(&self, phase_s: f64) -> CardiacSegment {
        if phase_s < self.p_wave.onset_s {
            CardiacSegment::Baseline
        } else if phase_s < self.p_wave.end_s() {
            CardiacSegment::PWave
        } else if phase_s < self.qrs.onset_s() {
            CardiacSegment::PrSegment
        } else if phase_s < self.qrs.offset_s() {
            CardiacSegment::QrsComplex
        } else if phase_s < self.t_wave.onset_s {
            CardiacSegment::StSegment
        } else if phase_s < self.t_wave.end_s() {
            CardiacSegment::TWave
        } else {
            CardiacSegment::Baseline
        }
    }

    /// Noise-free amplitude at a phase within the cycle
    pub fn shape(&self, phase_s: f64) -> f64 {
        match self.segment_at(phase_s) {
            CardiacSegment::PWave => self.p_wave.value_at(phase_s),
            CardiacSegment::PrSegment => self.pr_level_mv,
            CardiacSegment::QrsComplex => self.qrs.value_at(phase_s),
            CardiacSegment::StSegment => self.st_level_mv,
            CardiacSegment::TWave => self.t_wave.value_at(phase_s),
            CardiacSegment::Baseline => self.baseline_mv,
        }
    }

    /// Phase after which the cycle rests on the baseline
    pub fn active_span_s(&self) -> f64 {
        self.t_wave.end_s()
    }
}
