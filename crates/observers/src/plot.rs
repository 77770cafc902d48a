//! Plotting observer for viewing simulated traces.
//!
//! See [`PlotObserver`] and [`Plottable`] for usage.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use pendulum_core::Observer;
use pendulum_solvers::advance;

use crate::HistoryPoint;

/// Configuration for rendering a [`PlotObserver`] window.
#[derive(Debug, Clone, Default)]
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    x_label: Option<String>,
}

impl ShowConfig {
    /// Creates a config with no title, no legend, and no axis label.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend labeling each trace by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Labels the x axis.
    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }
}

/// Extracts plottable data from an event.
///
/// Return `None` from [`x`][Plottable::x] to skip the event entirely, or
/// `None` in a trace slot to skip only that trace.
pub trait Plottable<const N: usize> {
    /// The x-axis value for this event, or `None` to skip it.
    fn x(&self) -> Option<f64>;

    /// The y-axis values for each trace.
    fn traces(&self) -> [Option<f64>; N];
}

/// Kinetic, potential, and total energy against time.
impl Plottable<3> for HistoryPoint {
    fn x(&self) -> Option<f64> {
        Some(self.time)
    }

    fn traces(&self) -> [Option<f64>; 3] {
        [Some(self.kinetic), Some(self.potential), Some(self.total)]
    }
}

/// Angle and angular velocity against time, one point per sub-step.
impl Plottable<2> for advance::Event {
    fn x(&self) -> Option<f64> {
        Some(self.state.time)
    }

    fn traces(&self) -> [Option<f64>; 2] {
        [Some(self.state.angle), Some(self.state.angular_velocity)]
    }
}

/// Collects `N` named traces and displays them in an egui window.
///
/// Feed it either as an [`Observer`] of a [`Plottable`] event, through
/// [`extend`](Self::extend) with recorded history points, or point by point
/// with [`record`](Self::record).
///
/// # Example
///
/// ```ignore
/// let mut plot = PlotObserver::<3>::new(["Kinetic", "Potential", "Total"]);
/// plot.extend(simulation.history());
/// plot.show(ShowConfig::new().title("Energy").legend().x_label("t (s)"))?;
/// ```
pub struct PlotObserver<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotObserver<N> {
    /// Creates an observer with the given trace names.
    #[must_use]
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Records one x value across all traces, skipping `None` slots.
    pub fn record(&mut self, x: f64, traces: [Option<f64>; N]) {
        for (points, y) in self.data.iter_mut().zip(traces) {
            if let Some(y) = y {
                points.push([x, y]);
            }
        }
    }

    /// Records every item of a plottable sequence.
    pub fn extend<'a, P, I>(&mut self, items: I)
    where
        P: Plottable<N> + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        for item in items {
            if let Some(x) = item.x() {
                self.record(x, item.traces());
            }
        }
    }

    /// Opens a blocking egui window displaying all collected traces.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let title = config.title.clone().unwrap_or_default();
        let traces: Vec<(String, Vec<[f64; 2]>)> = self.names.into_iter().zip(self.data).collect();

        eframe::run_native(
            &title,
            eframe::NativeOptions::default(),
            Box::new(move |_cc| Ok(Box::new(PlotApp { traces, config }))),
        )
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Lets `&mut PlotObserver` be handed to calls that take an observer by value,
/// so the plot can still be shown afterwards.
impl<const N: usize, E, A> Observer<E, A> for &mut PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

struct PlotApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    config: ShowConfig,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("pendulum_traces");
            if self.config.legend {
                plot = plot.legend(Legend::default());
            }
            if let Some(label) = &self.config.x_label {
                plot = plot.x_axis_label(label.clone());
            }
            plot.show(ui, |plot_ui| {
                for (name, points) in &self.traces {
                    let plot_points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(plot_points).name(name));
                }
            });
        });
    }
}
