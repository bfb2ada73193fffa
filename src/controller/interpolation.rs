use glam::Vec3;

/// `(1 - t) * a + t * b`. Exact at both ends.
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    (1.0 - t) * a + t * b
}

/// Uniform Catmull-Rom blend of four control points; passes through `p1` at
/// `t = 0` and `p2` at `t = 1`.
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + t * (-p0 + p2)
        + t2 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3)
        + t3 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3))
}

/// Moves back and forth between two points, flipping direction every `period` seconds.
#[derive(Debug, Clone)]
pub struct PingPong {
    pub from: Vec3,
    pub to: Vec3,
    pub period: f32,
    t: f32,
    forward: bool,
}

impl PingPong {
    pub fn new(from: Vec3, to: Vec3, period: f32) -> Self {
        Self { from, to, period, t: 0.0, forward: true }
    }

    pub fn timer(&self) -> f32 {
        self.t
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn position(&self) -> Vec3 {
        let s = if self.period > 0.0 { (self.t / self.period).clamp(0.0, 1.0) } else { 1.0 };
        if self.forward {
            lerp(self.from, self.to, s)
        } else {
            lerp(self.to, self.from, s)
        }
    }

    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.t += dt;
        if self.t >= self.period {
            self.t = 0.0;
            self.forward = !self.forward;
        }
        self.position()
    }
}

/// Travels a chain of waypoints with Catmull-Rom segments. Closed paths loop
/// back to the first point; open paths clamp their end tangents and restart.
#[derive(Debug, Clone)]
pub struct SplinePath {
    waypoints: Vec<Vec3>,
    /// Segments per second
    pub speed: f32,
    pub closed: bool,
    segment: usize,
    t: f32,
}

impl SplinePath {
    pub fn new(waypoints: Vec<Vec3>, speed: f32, closed: bool) -> Self {
        Self { waypoints, speed, closed, segment: 0, t: 0.0 }
    }

    pub fn segment(&self) -> usize {
        self.segment
    }

    fn segment_count(&self) -> usize {
        match self.waypoints.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    fn point(&self, index: isize) -> Vec3 {
        let n = self.waypoints.len() as isize;
        let i = if self.closed { index.rem_euclid(n) } else { index.clamp(0, n - 1) };
        self.waypoints[i as usize]
    }

    pub fn position(&self) -> Vec3 {
        match self.waypoints.len() {
            0 => Vec3::ZERO,
            1 => self.waypoints[0],
            _ => {
                let i = self.segment as isize;
                catmull_rom(self.point(i - 1), self.point(i), self.point(i + 1), self.point(i + 2), self.t)
            }
        }
    }

    pub fn advance(&mut self, dt: f32) -> Vec3 {
        let segments = self.segment_count();
        if segments == 0 {
            return self.position();
        }
        self.t += dt * self.speed;
        if !self.t.is_finite() {
            self.t = 0.0;
        }
        let whole = self.t.floor();
        self.t -= whole;
        let skipped = (whole % segments as f32) as usize;
        self.segment = (self.segment + skipped) % segments;
        self.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3, eps: f32) -> bool {
        (a - b).abs().max_element() < eps
    }

    #[test]
    fn test_lerp_endpoints_are_exact() {
        let cases = [
            (Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0)),
            (Vec3::new(-2.5, -10.0, 3.0), Vec3::new(2.5, -5.0, 3.0)),
            (Vec3::new(1e6, -3.25, 0.1), Vec3::new(-7.0, 0.3, 12.5)),
        ];
        for (a, b) in cases {
            assert_eq!(lerp(a, b, 0.0), a);
            assert_eq!(lerp(a, b, 1.0), b);
        }
        assert_eq!(lerp(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0), 0.5), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_catmull_passes_through_inner_points() {
        let p = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(2.0, 1.5, 1.0),
            Vec3::new(3.0, -1.0, 0.0),
        ];
        assert_eq!(catmull_rom(p[0], p[1], p[2], p[3], 0.0), p[1]);
        assert!(close(catmull_rom(p[0], p[1], p[2], p[3], 1.0), p[2], 1e-5));
    }

    #[test]
    fn test_spline_is_continuous_across_segments() {
        let route = vec![
            Vec3::new(-2.5, -10.0, 3.0),
            Vec3::new(2.5, -10.0, 3.0),
            Vec3::new(2.5, -5.0, 3.0),
            Vec3::new(-2.5, -5.0, 3.0),
        ];
        let mut path = SplinePath::new(route, 2.0, true);
        let step = 0.001;
        let mut last = path.position();
        for _ in 0..4000 {
            let next = path.advance(step);
            // at 2 segments/s a 1 ms step moves a few hundredths at most
            assert!((next - last).length() < 0.05, "jump from {:?} to {:?}", last, next);
            last = next;
        }
    }

    #[test]
    fn test_closed_path_wraps_to_start() {
        let route = vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
        let mut path = SplinePath::new(route, 1.0, true);
        path.advance(3.5);
        assert_eq!(path.segment(), 3);
        path.advance(0.5);
        assert_eq!(path.segment(), 0);
        assert!(close(path.position(), Vec3::ZERO, 1e-5));
    }

    #[test]
    fn test_open_path_restarts_after_last_segment() {
        let route = vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)];
        let mut path = SplinePath::new(route, 1.0, false);
        path.advance(1.5);
        assert_eq!(path.segment(), 1);
        path.advance(0.5);
        assert_eq!(path.segment(), 0);
    }

    #[test]
    fn test_ping_pong_flips_at_period() {
        let a = Vec3::new(-6.0, -7.0, 1.0);
        let b = Vec3::new(6.0, -7.0, 1.0);
        let mut pp = PingPong::new(a, b, 1.0);
        assert_eq!(pp.position(), a);
        pp.advance(0.5);
        assert!(pp.is_forward());
        assert_eq!(pp.position(), lerp(a, b, 0.5));
        let at_flip = pp.advance(0.5);
        assert!(!pp.is_forward(), "direction flips once t reaches the period");
        assert_eq!(pp.timer(), 0.0);
        assert_eq!(at_flip, b, "restarts from the far end");
        pp.advance(0.25);
        assert_eq!(pp.position(), lerp(b, a, 0.25));
    }

    #[test]
    fn test_degenerate_paths_do_not_panic() {
        let mut empty = SplinePath::new(Vec::new(), 1.0, true);
        assert_eq!(empty.advance(0.3), Vec3::ZERO);
        let mut single = SplinePath::new(vec![Vec3::ONE], 1.0, false);
        assert_eq!(single.advance(5.0), Vec3::ONE);
    }

    #[test]
    fn test_huge_step_lands_inside_a_segment() {
        let route = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let mut path = SplinePath::new(route, 1.0, true);
        let p = path.advance(1e30);
        assert!(path.segment() < 3);
        assert!(p.is_finite(), "{:?}", p);

        // seven whole segments from the start of a three-segment loop
        let mut path = SplinePath::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], 1.0, true);
        path.advance(7.25);
        assert_eq!(path.segment(), 1);
    }
}
