use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use super::theme::Theme;

pub const TITLE: &str = "Gradient descent curve";
pub const X_TITLE: &str = "Iterations";
pub const Y_TITLE: &str = "Loss";

/// A loss curve ready to be drawn: one `(epoch, loss)` point per epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct LossCurve {
    caption: String,
    points: Vec<(f64, f64)>,
}

impl LossCurve {
    /// Creates a new `LossCurve`.
    ///
    /// # Arguments
    /// * `caption` - Names what the curve belongs to.
    /// * `losses` - The loss of every epoch, in order.
    pub fn new(caption: impl Into<String>, losses: &[f32]) -> Self {
        let points = losses
            .iter()
            .enumerate()
            .map(|(epoch, &loss)| (epoch as f64, loss as f64))
            .collect();

        Self {
            caption: caption.into(),
            points,
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The x axis bounds, never collapsed to a single value.
    pub fn x_bounds(&self) -> [f64; 2] {
        [0., (self.len().saturating_sub(1) as f64).max(1.)]
    }

    /// The y axis bounds, padded when every loss is the same.
    pub fn y_bounds(&self) -> [f64; 2] {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &(_, loss) in self.points.iter().filter(|(_, loss)| loss.is_finite()) {
            min = min.min(loss);
            max = max.max(loss);
        }

        if min > max {
            return [0., 1.];
        }

        if max - min < f64::EPSILON {
            return [min - 0.5, max + 0.5];
        }

        [min, max]
    }
}

/// Splits the screen into the chart and a one line footer.
fn split(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    (rows[0], rows[1])
}

fn labels(bounds: [f64; 2], precision: usize) -> Vec<Span<'static>> {
    let [low, high] = bounds;
    let mid = (low + high) / 2.;

    [low, mid, high]
        .into_iter()
        .map(|v| Span::styled(format!("{v:.precision$}"), Theme::dim()))
        .collect()
}

/// Draws the loss curve over the whole frame.
pub fn draw(f: &mut Frame, curve: &LossCurve) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let (chart_area, footer_area) = split(area);

    let x_bounds = curve.x_bounds();
    let y_bounds = curve.y_bounds();

    let datasets = vec![
        Dataset::default()
            .name(Y_TITLE)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Theme::curve())
            .data(&curve.points),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(Span::styled(TITLE, Theme::title())),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled(X_TITLE, Theme::dim()))
                .style(Theme::dim())
                .bounds(x_bounds)
                .labels(labels(x_bounds, 0)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(Y_TITLE, Theme::dim()))
                .style(Theme::dim())
                .bounds(y_bounds)
                .labels(labels(y_bounds, 3)),
        );

    f.render_widget(chart, chart_area);

    let footer = Line::from(vec![
        Span::styled(curve.caption(), Theme::title()),
        Span::styled(format!("  |  {} epochs  |  q/Esc: quit", curve.len()), Theme::muted()),
    ]);
    f.render_widget(Paragraph::new(footer), footer_area);
}
