/// Parametric curve contract and the two geometries the configuration
/// surface synthesizes (straight line, waypoint spline)
///
/// Curve positions are offsets from a motion's begin position, so a path
/// built for a motion always starts at the origin.

use glam::DVec3;

/// Samples per spline segment when building the arc-length table
const ARC_SAMPLES_PER_SEGMENT: usize = 64;

/// A parametric 3D curve with a known arc length.
///
/// `position_at` accepts either a normalized parameter in [0, 1] over the
/// curve's arc length, or an unnormalized arc-length distance. Parameters
/// outside the valid range clamp to the nearest endpoint; callers rely on
/// this for lookahead sampling before the start of the curve.
pub trait Curve {
    /// Total arc length of the curve (>= 0)
    fn length(&self) -> f64;

    /// Position at parameter `t`
    fn position_at(&self, t: f64, normalized: bool) -> DVec3;
}

/// Map an unnormalized arc-length distance into [0, 1]
fn normalize_param(t: f64, normalized: bool, length: f64) -> f64 {
    let t = if normalized {
        t
    } else if length > 0.0 {
        t / length
    } else {
        0.0
    };
    t.clamp(0.0, 1.0)
}

/// Straight line segment between two points
#[derive(Debug, Clone, Copy)]
pub struct StraightLine {
    pub from: DVec3,
    pub to: DVec3,
}

impl StraightLine {
    pub fn new(from: DVec3, to: DVec3) -> Self {
        Self { from, to }
    }
}

impl Curve for StraightLine {
    fn length(&self) -> f64 {
        (self.to - self.from).length()
    }

    fn position_at(&self, t: f64, normalized: bool) -> DVec3 {
        let t = normalize_param(t, normalized, self.length());
        self.from.lerp(self.to, t)
    }
}

/// Smooth path through an ordered list of waypoints
///
/// Uses a uniform Catmull-Rom spline with duplicated endpoints, so the
/// path passes through every waypoint. Arc length is approximated with a
/// sampled lookup table; `position_at` with a normalized parameter walks
/// the curve at (approximately) constant speed.
pub struct WaypointPath {
    points: Vec<DVec3>,
    /// Cumulative arc length at each table sample
    arc_table: Vec<f64>,
    length: f64,
}

impl WaypointPath {
    pub fn new(points: Vec<DVec3>) -> Self {
        let mut path = Self {
            points,
            arc_table: Vec::new(),
            length: 0.0,
        };
        path.build_arc_table();
        path
    }

    fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Sample by the uniform spline parameter `u` in [0, 1] across all segments
    fn sample_uniform(&self, u: f64) -> DVec3 {
        match self.points.len() {
            0 => DVec3::ZERO,
            1 => self.points[0],
            _ => {
                let segments = self.segment_count() as f64;
                let scaled = (u.clamp(0.0, 1.0) * segments).min(segments - 1e-9);
                let segment = scaled.floor() as usize;
                let local = scaled - segment as f64;
                self.sample_segment(segment, local)
            }
        }
    }

    /// Catmull-Rom evaluation on one segment, endpoints duplicated
    fn sample_segment(&self, segment: usize, t: f64) -> DVec3 {
        let last = self.points.len() - 1;
        let p0 = self.points[segment.saturating_sub(1)];
        let p1 = self.points[segment];
        let p2 = self.points[(segment + 1).min(last)];
        let p3 = self.points[(segment + 2).min(last)];

        let t2 = t * t;
        let t3 = t2 * t;

        0.5 * ((2.0 * p1)
            + (p2 - p0) * t
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
    }

    fn build_arc_table(&mut self) {
        let samples = ARC_SAMPLES_PER_SEGMENT * self.segment_count().max(1);
        let mut table = Vec::with_capacity(samples + 1);
        table.push(0.0);

        let mut total = 0.0;
        let mut previous = self.sample_uniform(0.0);
        for i in 1..=samples {
            let u = i as f64 / samples as f64;
            let position = self.sample_uniform(u);
            total += (position - previous).length();
            table.push(total);
            previous = position;
        }

        self.arc_table = table;
        self.length = total;
    }

    /// Convert an arc-length fraction into the uniform spline parameter
    fn arc_to_uniform(&self, fraction: f64) -> f64 {
        if self.length <= 0.0 {
            return 0.0;
        }
        let target = fraction.clamp(0.0, 1.0) * self.length;
        let index = self
            .arc_table
            .partition_point(|&len| len < target)
            .clamp(1, self.arc_table.len() - 1);

        let below = self.arc_table[index - 1];
        let above = self.arc_table[index];
        let span = above - below;
        let within = if span > 0.0 { (target - below) / span } else { 0.0 };

        ((index - 1) as f64 + within) / (self.arc_table.len() - 1) as f64
    }
}

impl Curve for WaypointPath {
    fn length(&self) -> f64 {
        self.length
    }

    fn position_at(&self, t: f64, normalized: bool) -> DVec3 {
        let fraction = normalize_param(t, normalized, self.length);
        self.sample_uniform(self.arc_to_uniform(fraction))
    }
}
