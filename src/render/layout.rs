//! Pure geometry for the track map: path runs, equal-aspect ranges, arrow

use std::ops::Range;

use crate::comparator::{AnnotatedSample, Winner};

/// Axis-aligned bounding box in track coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of all finite points, `None` if there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points.into_iter().filter(|(x, y)| x.is_finite() && y.is_finite()).fold(
            None,
            |bounds, (x, y)| {
                Some(match bounds {
                    None => Bounds { min_x: x, max_x: x, min_y: y, max_y: y },
                    Some(b) => Bounds {
                        min_x: b.min_x.min(x),
                        max_x: b.max_x.max(x),
                        min_y: b.min_y.min(y),
                        max_y: b.max_y.max(y),
                    },
                })
            },
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }
}

/// Axis ranges that show `bounds` with identical units per pixel on both axes.
///
/// `padding` is a fraction of the larger span added on every side.
pub fn equal_aspect_ranges(
    bounds: &Bounds,
    pixel_width: u32,
    pixel_height: u32,
    padding: f64,
) -> (Range<f64>, Range<f64>) {
    let pixel_width = f64::from(pixel_width.max(1));
    let pixel_height = f64::from(pixel_height.max(1));

    let span = bounds.width().max(bounds.height());
    let pad = if span > 0.0 { span * padding } else { 1.0 };
    let span_x = bounds.width() + 2.0 * pad;
    let span_y = bounds.height() + 2.0 * pad;

    let units_per_pixel = (span_x / pixel_width).max(span_y / pixel_height);
    let half_x = units_per_pixel * pixel_width / 2.0;
    let half_y = units_per_pixel * pixel_height / 2.0;
    let (cx, cy) = bounds.center();

    ((cx - half_x)..(cx + half_x), (cy - half_y)..(cy + half_y))
}

/// Consecutive path segments sharing one winner annotation
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRun {
    pub winner: Option<Winner>,
    pub points: Vec<(f64, f64)>,
}

/// Group the path into polylines of equal color.
///
/// Segment `i -> i + 1` takes the winner of sample `i`, so every run ends on
/// the first point of the next run.
pub fn color_runs(samples: &[AnnotatedSample]) -> Vec<ColorRun> {
    let mut runs: Vec<ColorRun> = Vec::new();
    for pair in samples.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        match runs.last_mut() {
            Some(run) if run.winner == from.winner => run.points.push(to.sample.position()),
            _ => runs.push(ColorRun {
                winner: from.winner,
                points: vec![from.sample.position(), to.sample.position()],
            }),
        }
    }
    runs
}

/// Arrow showing the direction of travel, in track coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionArrow {
    pub tail: (f64, f64),
    pub tip: (f64, f64),
    /// Where the shaft meets the head
    pub head_base: (f64, f64),
    /// Triangle: tip, left corner, right corner
    pub head: [(f64, f64); 3],
    pub label_at: (f64, f64),
}

/// Direction arrow derived from the samples at 20% and 30% of the sequence.
///
/// The arrow starts at the 25% sample, points along the normalized direction
/// and is `length` long including its head. Returns `None` when the direction
/// has no length.
pub fn direction_arrow(
    points: &[(f64, f64)],
    length: f64,
    head_width: f64,
    head_length: f64,
) -> Option<DirectionArrow> {
    let n = points.len();
    if n == 0 {
        return None;
    }
    let (start, end, anchor) = (n / 5, n * 3 / 10, n / 4);

    let dx = points[end].0 - points[start].0;
    let dy = points[end].1 - points[start].1;
    let magnitude = dx.hypot(dy);
    if !magnitude.is_finite() || magnitude == 0.0 {
        return None;
    }
    let (ux, uy) = (dx / magnitude, dy / magnitude);

    let tail = points[anchor];
    let tip = (tail.0 + ux * length, tail.1 + uy * length);
    let head_length = head_length.min(length);
    let head_base = (tip.0 - ux * head_length, tip.1 - uy * head_length);
    let (px, py) = (-uy * head_width / 2.0, ux * head_width / 2.0);
    let head = [tip, (head_base.0 + px, head_base.1 + py), (head_base.0 - px, head_base.1 - py)];
    let label_at = (tail.0 + ux * length * 0.1, tail.1 + uy * length * 0.1);

    Some(DirectionArrow { tail, tip, head_base, head, label_at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::Competitor;
    use crate::types::TraceSample;

    fn annotated(x: f64, winner: Option<Winner>) -> AnnotatedSample {
        AnnotatedSample {
            competitor: Competitor::Reference,
            sample: TraceSample::new(x, x, 0.0, 100.0),
            minisector: Some(1),
            winner,
        }
    }

    #[test]
    fn runs_take_the_color_of_their_starting_sample() {
        let a = Some(Winner::Competitor(Competitor::Reference));
        let b = Some(Winner::Competitor(Competitor::Comparison));
        let samples = [annotated(0.0, a), annotated(1.0, a), annotated(2.0, b), annotated(3.0, b)];

        let runs = color_runs(&samples);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].winner, a);
        assert_eq!(runs[0].points, vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(runs[1].winner, b);
        assert_eq!(runs[1].points, vec![(2.0, 0.0), (3.0, 0.0)]);
    }

    #[test]
    fn fewer_than_two_samples_make_no_runs() {
        assert!(color_runs(&[]).is_empty());
        assert!(color_runs(&[annotated(0.0, None)]).is_empty());
    }

    #[test]
    fn equal_aspect_keeps_units_per_pixel_identical() {
        let bounds = Bounds { min_x: 0.0, max_x: 1000.0, min_y: 0.0, max_y: 200.0 };
        let (x, y) = equal_aspect_ranges(&bounds, 800, 600, 0.05);

        let x_scale = (x.end - x.start) / 800.0;
        let y_scale = (y.end - y.start) / 600.0;
        assert!((x_scale - y_scale).abs() < 1e-9);
        assert!(x.start <= bounds.min_x && x.end >= bounds.max_x);
        assert!(y.start <= bounds.min_y && y.end >= bounds.max_y);
    }

    #[test]
    fn single_point_still_gets_a_visible_range() {
        let bounds = Bounds::from_points([(5.0, 5.0)]).unwrap();
        let (x, y) = equal_aspect_ranges(&bounds, 100, 100, 0.05);
        assert!(x.end > x.start && y.end > y.start);
        assert!(Bounds::from_points(Vec::<(f64, f64)>::new()).is_none());
    }

    #[test]
    fn arrow_follows_direction_of_travel() {
        let points: Vec<(f64, f64)> = (0..100).map(|i| (i as f64 * 10.0, 0.0)).collect();
        let arrow = direction_arrow(&points, 1500.0, 50.0, 50.0).unwrap();

        assert_eq!(arrow.tail, (250.0, 0.0));
        assert!((arrow.tip.0 - 1750.0).abs() < 1e-9 && arrow.tip.1.abs() < 1e-9);
        assert!((arrow.head_base.0 - 1700.0).abs() < 1e-9);
        assert!((arrow.label_at.0 - 400.0).abs() < 1e-9);
        assert!((arrow.head[1].1 - 25.0).abs() < 1e-9);
        assert!((arrow.head[2].1 + 25.0).abs() < 1e-9);
    }

    #[test]
    fn stationary_samples_produce_no_arrow() {
        let points = vec![(3.0, 4.0); 20];
        assert!(direction_arrow(&points, 1500.0, 50.0, 50.0).is_none());
        assert!(direction_arrow(&[], 1500.0, 50.0, 50.0).is_none());
    }
}
