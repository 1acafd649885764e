//! # Track Renderer
//!
//! Draws a [`ComparisonResult`] onto the physical shape of the track and
//! returns the finished image as SVG text. The renderer never touches the
//! filesystem; writing the image out is the host's job.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │        {event} {year} {session}              │
//! │        Fastest Driver per Minisector         │
//! │                                              │
//! │            ╭──── track path ────╮            │
//! │   ┌─────┐  │  ──► Track Direction            │
//! │   │laps │  ╰────────────────────╯            │
//! │   ├─────┤                        ┌────────┐  │
//! │   │stats│                        │ legend │  │
//! │   └─────┘                        └────────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The path is drawn with equal units per pixel on both axes so the track
//! keeps its real proportions.

pub mod layout;
pub mod overlay;
pub mod style;

pub use layout::{
    Bounds, ColorRun, DirectionArrow, color_runs, direction_arrow, equal_aspect_ranges,
};
pub use style::{HexColor, RenderOptions};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info};

use crate::comparator::{ComparisonResult, Competitor};
use crate::types::SessionKey;
use crate::{AnalysisError, Result};

type DrawResult<T, DB> =
    std::result::Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Fraction of the path's larger span left empty around it
const TRACK_PADDING: f64 = 0.05;
/// Pixel margin around the track chart
const CHART_MARGIN: u32 = 20;
const BOX_PADDING: i32 = 10;
const OVERLAY_ALPHA: f64 = 0.7;

/// A finished track map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackImage {
    pub width: u32,
    pub height: u32,
    svg: String,
}

impl TrackImage {
    pub fn as_svg(&self) -> &str {
        &self.svg
    }

    pub fn into_svg(self) -> String {
        self.svg
    }
}

/// Renders comparison results as color-coded track maps
#[derive(Debug, Clone, Default)]
pub struct TrackRenderer {
    options: RenderOptions,
}

impl TrackRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `result` titled with `session`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InsufficientData`] when the result has no samples
    /// - [`AnalysisError::Config`] when the render options are invalid
    /// - [`AnalysisError::Render`] when the drawing backend fails
    pub fn render(&self, result: &ComparisonResult, session: &SessionKey) -> Result<TrackImage> {
        if result.samples.is_empty() {
            return Err(AnalysisError::insufficient_data("no samples to draw"));
        }
        self.options.validate()?;

        let (width, height) = (self.options.width, self.options.height);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            self.draw(&root, result, session).map_err(AnalysisError::render)?;
            root.present().map_err(AnalysisError::render)?;
        }

        info!(
            session = %session,
            samples = result.samples.len(),
            bytes = svg.len(),
            "Rendered minisector track map"
        );
        Ok(TrackImage { width, height, svg })
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        result: &ComparisonResult,
        session: &SessionKey,
    ) -> DrawResult<(), DB> {
        let options = &self.options;
        root.fill(&options.background.rgb())?;

        let title_height = (options.title_font_size * 3.5) as u32;
        let (title_area, body) = root.split_vertically(title_height);
        self.draw_title(&title_area, session)?;
        self.draw_track(&body, result)?;

        let (w, h) = root.dim_in_pixel();
        let (w, h) = (w as i32, h as i32);
        let left = (w as f64 * 0.12) as i32;

        let stats = overlay::stats_lines(result);
        self.draw_text_box(root, &stats, (left, (h as f64 * 0.88) as i32))?;
        let laps = overlay::lap_time_lines(result);
        self.draw_text_box(root, &laps, (left, (h as f64 * 0.75) as i32))?;
        self.draw_legend(root, result, ((w as f64 * 0.95) as i32, (h as f64 * 0.88) as i32))?;
        Ok(())
    }

    fn draw_title<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        session: &SessionKey,
    ) -> DrawResult<(), DB> {
        let (w, h) = area.dim_in_pixel();
        let font_size = self.options.title_font_size;
        let style = FontDesc::new(FontFamily::SansSerif, font_size, FontStyle::Bold)
            .color(&self.options.text_color.rgb())
            .pos(Pos::new(HPos::Center, VPos::Center));
        let line_height = (self.options.title_font_size * 1.3) as i32;
        let center_y = h as i32 / 2;
        let [first, second] = session.caption();
        area.draw(&Text::new(first, (w as i32 / 2, center_y - line_height / 2), style.clone()))?;
        area.draw(&Text::new(second, (w as i32 / 2, center_y + line_height / 2), style))?;
        Ok(())
    }

    fn draw_track<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        result: &ComparisonResult,
    ) -> DrawResult<(), DB> {
        let options = &self.options;
        let points: Vec<(f64, f64)> = result.samples.iter().map(|s| s.sample.position()).collect();
        let Some(bounds) = Bounds::from_points(points.iter().copied()) else {
            debug!("No finite positions, skipping track path");
            return Ok(());
        };

        let (w, h) = area.dim_in_pixel();
        let plot_w = w.saturating_sub(2 * CHART_MARGIN);
        let plot_h = h.saturating_sub(2 * CHART_MARGIN);
        let (x_range, y_range) = equal_aspect_ranges(&bounds, plot_w, plot_h, TRACK_PADDING);

        let mut chart = ChartBuilder::on(area)
            .margin(CHART_MARGIN)
            .build_cartesian_2d(x_range, y_range)?;

        let runs = color_runs(&result.samples);
        debug!(runs = runs.len(), "Drawing track path");
        chart.draw_series(runs.into_iter().map(|run| {
            let color = options.winner_color(run.winner).rgb();
            PathElement::new(run.points, color.stroke_width(options.line_width))
        }))?;

        match direction_arrow(
            &points,
            options.arrow_length,
            options.arrow_head_width,
            options.arrow_head_length,
        ) {
            Some(arrow) => {
                let color = options.text_color.rgb().mix(0.9);
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![arrow.tail, arrow.head_base],
                    color.stroke_width(3),
                )))?;
                chart.draw_series(std::iter::once(Polygon::new(
                    arrow.head.to_vec(),
                    color.filled(),
                )))?;
                let label = FontDesc::new(
                    FontFamily::SansSerif,
                    options.text_font_size,
                    FontStyle::Bold,
                )
                .color(&options.text_color.rgb())
                .pos(Pos::new(HPos::Center, VPos::Center));
                chart.draw_series(std::iter::once(Text::new(
                    "Track Direction",
                    arrow.label_at,
                    label,
                )))?;
            }
            None => debug!("Direction vector has zero length, omitting arrow"),
        }

        Ok(())
    }

    /// Multi-line text on a translucent box; `anchor` is the bottom-left corner.
    fn draw_text_box<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        lines: &[String],
        anchor: (i32, i32),
    ) -> DrawResult<(), DB> {
        let style = self.text_style();
        let line_height = (self.options.text_font_size * 1.4) as i32;

        let mut text_width = 0;
        for line in lines {
            let (width, _) = area.estimate_text_size(line, &style)?;
            text_width = text_width.max(width as i32);
        }
        let box_width = text_width + 2 * BOX_PADDING;
        let box_height = line_height * lines.len() as i32 + 2 * BOX_PADDING;

        let left = anchor.0;
        let top = anchor.1 - box_height;
        area.draw(&Rectangle::new(
            [(left, top), (left + box_width, anchor.1)],
            self.options.background.rgb().mix(OVERLAY_ALPHA).filled(),
        ))?;
        for (i, line) in lines.iter().enumerate() {
            let y = top + BOX_PADDING + line_height * i as i32;
            area.draw(&Text::new(line.as_str(), (left + BOX_PADDING, y), style.clone()))?;
        }
        Ok(())
    }

    /// Color patches labelled "{label} Faster"; `anchor` is the bottom-right corner.
    fn draw_legend<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        result: &ComparisonResult,
        anchor: (i32, i32),
    ) -> DrawResult<(), DB> {
        let mut entries: Vec<(String, RGBColor)> = Competitor::BOTH
            .iter()
            .map(|&c| (overlay::legend_label(result, c), self.options.competitor_color(c).rgb()))
            .collect();
        if result.ties > 0 {
            entries.push(("Tied".to_string(), self.options.neutral_color.rgb()));
        }

        let style = self.text_style();
        let line_height = (self.options.text_font_size * 1.4) as i32;
        let patch = (self.options.text_font_size * 1.6) as i32;

        let mut text_width = 0;
        for (label, _) in &entries {
            let (width, _) = area.estimate_text_size(label, &style)?;
            text_width = text_width.max(width as i32);
        }
        let box_width = patch + BOX_PADDING + text_width + 2 * BOX_PADDING;
        let box_height = line_height * entries.len() as i32 + 2 * BOX_PADDING;
        let (left, top) = (anchor.0 - box_width, anchor.1 - box_height);

        area.draw(&Rectangle::new(
            [(left, top), anchor],
            self.options.background.rgb().mix(OVERLAY_ALPHA).filled(),
        ))?;
        for (i, (label, color)) in entries.iter().enumerate() {
            let y = top + BOX_PADDING + line_height * i as i32;
            let patch_top = y + line_height / 4;
            let patch_left = left + BOX_PADDING;
            area.draw(&Rectangle::new(
                [(patch_left, patch_top), (patch_left + patch, patch_top + line_height / 2)],
                color.filled(),
            ))?;
            area.draw(&Text::new(
                label.as_str(),
                (left + 2 * BOX_PADDING + patch, y),
                style.clone(),
            ))?;
        }
        Ok(())
    }

    fn text_style(&self) -> TextStyle<'static> {
        FontDesc::new(FontFamily::SansSerif, self.options.text_font_size, FontStyle::Normal)
            .color(&self.options.text_color.rgb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::compare;
    use crate::test_utils::{evenly_spaced_trace, split_speed_trace};
    use crate::types::{LapTime, Trace, TraceSample};

    fn session() -> SessionKey {
        SessionKey::qualifying(2023, "Test Grand Prix")
    }

    fn render_split_track(options: RenderOptions) -> TrackImage {
        let (a, b) = split_speed_trace(100, 5000.0);
        let result = compare(&a, &b, 25).unwrap();
        TrackRenderer::new(RenderOptions { arrow_length: 300.0, ..options })
            .render(&result, &session())
            .unwrap()
    }

    #[test]
    fn renders_svg_with_title_overlays_and_legend() {
        let image = render_split_track(RenderOptions::default());
        let svg = image.as_svg();

        assert!(svg.contains("<svg"));
        assert_eq!((image.width, image.height), (2000, 1200));
        assert!(svg.contains("Test Grand Prix 2023 Qualification"));
        assert!(svg.contains("Fastest Driver per Minisector"));
        assert!(svg.contains("Minisector Comparison (25 sectors)"));
        assert!(svg.contains("VER: 13 sectors (52.0%)"));
        assert!(svg.contains("LEC: 12 sectors (48.0%)"));
        assert!(svg.contains("VER: 01:29:708"));
        assert!(svg.contains("Delta: 00:00:138"));
        assert!(svg.contains("VER Faster"));
        assert!(svg.contains("LEC Faster"));
        assert!(svg.contains("Track Direction"));
    }

    #[test]
    fn path_uses_one_fixed_color_per_trace() {
        let options = RenderOptions {
            reference_color: HexColor(0x12, 0x34, 0x56),
            comparison_color: HexColor(0xAB, 0xCD, 0xEF),
            ..RenderOptions::default()
        };
        let svg = render_split_track(options).into_svg().to_ascii_uppercase();

        assert!(svg.contains("#123456"));
        assert!(svg.contains("#ABCDEF"));
    }

    #[test]
    fn empty_result_is_insufficient_data() {
        let (a, b) = split_speed_trace(10, 100.0);
        let mut result = compare(&a, &b, 5).unwrap();
        result.samples.clear();

        let error = TrackRenderer::default().render(&result, &session()).unwrap_err();
        assert!(matches!(error, AnalysisError::InsufficientData { .. }));
    }

    #[test]
    fn invalid_options_are_rejected_before_drawing() {
        let (a, b) = split_speed_trace(10, 100.0);
        let result = compare(&a, &b, 5).unwrap();
        let renderer = TrackRenderer::new(RenderOptions { line_width: 0, ..RenderOptions::default() });
        assert!(matches!(renderer.render(&result, &session()), Err(AnalysisError::Config { .. })));
    }

    #[test]
    fn stationary_traces_render_without_arrow() {
        let samples = |speed| {
            (0..10).map(|i| TraceSample::new(i as f64 * 10.0, 5.0, 5.0, speed)).collect::<Vec<_>>()
        };
        let a = Trace::new("VER", LapTime::from_millis(90_000), samples(250.0));
        let b = Trace::new("LEC", LapTime::from_millis(90_100), samples(240.0));
        let result = compare(&a, &b, 5).unwrap();

        let image = TrackRenderer::default().render(&result, &session()).unwrap();
        assert!(!image.as_svg().contains("Track Direction"));
    }

    #[test]
    fn tied_minisectors_get_a_legend_entry() {
        let a = evenly_spaced_trace("VER", 20, 1000.0, 250.0);
        let b = evenly_spaced_trace("LEC", 20, 1000.0, 250.0);
        let result = compare(&a, &b, 4).unwrap();

        let image = TrackRenderer::default().render(&result, &session()).unwrap();
        assert!(image.as_svg().contains("Tied"));
    }
}
