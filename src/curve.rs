//! Velocity curves: piecewise-linear velocity envelopes over time.

use crate::{prelude::*, time::lerp_round};

/// A time-indexed velocity function, defined by breakpoints and linear in between.
///
/// The curve is only defined between its first and last breakpoints (inclusive); sampling
/// outside that span, or sampling an empty curve, yields `None`.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct VelocityCurve {
    points: Vec<(Time, u7)>,
}

impl VelocityCurve {
    /// Builds a curve from breakpoints in any order.
    ///
    /// When several breakpoints share a time, the last one given wins.
    pub fn new<I: IntoIterator<Item = (Time, u7)>>(points: I) -> VelocityCurve {
        let mut points: Vec<(Time, u7)> = points.into_iter().collect();
        //Stable sort, then keep the last of every run of equal times
        points.sort_by_key(|&(time, _)| time);
        let mut deduped: Vec<(Time, u7)> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.0 == point.0 => *last = point,
                _ => deduped.push(point),
            }
        }
        VelocityCurve { points: deduped }
    }

    /// A flat velocity from `start` to `end`.
    pub fn constant(start: Time, end: Time, vel: u7) -> VelocityCurve {
        VelocityCurve::new(vec![(start, vel), (end, vel)])
    }

    /// A straight ramp from `from` at `start` to `to` at `end`: a crescendo or a diminuendo.
    pub fn linear(start: Time, end: Time, from: u7, to: u7) -> VelocityCurve {
        VelocityCurve::new(vec![(start, from), (end, to)])
    }

    /// Returns this curve with one more breakpoint, replacing any existing one at `time`.
    pub fn with_point(self, time: Time, vel: u7) -> VelocityCurve {
        VelocityCurve::new(self.points.into_iter().chain(Some((time, vel))))
    }

    /// The breakpoints of the curve, sorted by time.
    #[inline]
    pub fn points(&self) -> &[(Time, u7)] {
        &self.points
    }

    /// The first and last times at which the curve is defined.
    pub fn span(&self) -> Option<(Time, Time)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.0, last.0)),
            _ => None,
        }
    }

    /// The velocity of the curve at `time`, if the curve is defined there.
    pub fn sample(&self, time: Time) -> Option<u7> {
        let (start, end) = self.span()?;
        if time < start || time > end {
            return None;
        }
        //Index of the first breakpoint strictly after `time`
        let next = self.points.partition_point(|&(t, _)| t <= time);
        if next == 0 || next == self.points.len() {
            //Exactly on the first point of a single-point curve, or on the last point
            return Some(self.points[next.saturating_sub(1)].1);
        }
        let (t0, v0) = self.points[next - 1];
        let (t1, v1) = self.points[next];
        let vel = lerp_round(
            v0.as_int() as i128,
            v1.as_int() as i128,
            (time - t0).as_raw() as i128,
            (t1 - t0).as_raw() as i128,
        );
        Some(u7::from(vel.max(0).min(127) as u8))
    }
}
