//! A small sampling engine for the demo.
//!
//! It recognises a fixed table of functions by name rather than parsing a
//! grammar, keeps one sample cache per curve, and draws through an iced
//! canvas cache.

use graph_viewport::{Engine, Scene, ViewRect};
use iced::widget::canvas::{self, Cache, Frame, Path, Stroke};
use iced::{Color, Point, Renderer, Size};

const FINE_STEP: f64 = 1.0 / 1024.0;
const COARSE_STEP: f64 = 1.0 / 512.0;
/// Views wider than this are sampled with the coarse step.
const COARSE_WIDTH: f64 = 20.0;
const MAX_SAMPLES: usize = 100_000;
const POLAR_TURNS: f64 = 4.0;
const POLAR_STEP: f64 = 0.005;

const COLORS: &[Color] = &[
    Color::from_rgb(0.85, 0.2, 0.2),
    Color::from_rgb(0.2, 0.6, 0.25),
    Color::from_rgb(0.2, 0.35, 0.85),
    Color::from_rgb(0.55, 0.25, 0.7),
    Color::from_rgb(0.95, 0.55, 0.1),
];

type Function = fn(f64) -> f64;

fn identity(x: f64) -> f64 {
    x
}
fn square(x: f64) -> f64 {
    x * x
}
fn cube(x: f64) -> f64 {
    x * x * x
}
fn reciprocal(x: f64) -> f64 {
    1.0 / x
}

const PRESETS: &[(&str, Function)] = &[
    ("x", identity),
    ("x^2", square),
    ("x^3", cube),
    ("1/x", reciprocal),
    ("sin(x)", f64::sin),
    ("cos(x)", f64::cos),
    ("tan(x)", f64::tan),
    ("log(x)", f64::log10),
    ("ln(x)", f64::ln),
    ("sqrt(x)", f64::sqrt),
    ("abs(x)", f64::abs),
    ("e^x", f64::exp),
];

fn lookup(expression: &str) -> Option<Function> {
    let key: String = expression
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    PRESETS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, function)| *function)
}

fn evaluate(function: Function, x: f64) -> Option<f64> {
    let y = function(x);
    y.is_finite().then_some(y)
}

struct Curve {
    function: Function,
    color: Color,
    /// Evenly spaced samples in ascending x.
    samples: Vec<(f64, Option<f64>)>,
}

impl Curve {
    fn covers(&self, start: f64, end: f64) -> bool {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => first.0 <= start && last.0 >= end,
            _ => false,
        }
    }

    fn sample(&mut self, start: f64, end: f64, step: f64) {
        let count = ((end - start) / step).ceil() as usize;
        self.samples = (0..=count)
            .map(|i| {
                let x = start + i as f64 * step;
                (x, evaluate(self.function, x))
            })
            .collect();
    }

    /// Adds one unit of samples on each side.
    fn expand(&mut self, step: f64) {
        let (Some(&(first, _)), Some(&(last, _))) = (self.samples.first(), self.samples.last())
        else {
            return;
        };
        let per_unit = (1.0 / step) as usize;

        let mut grown = Vec::with_capacity(self.samples.len() + 2 * per_unit);
        grown.extend((1..=per_unit).rev().map(|j| {
            let x = first - j as f64 * step;
            (x, evaluate(self.function, x))
        }));
        grown.append(&mut self.samples);
        grown.extend((1..=per_unit).map(|j| {
            let x = last + j as f64 * step;
            (x, evaluate(self.function, x))
        }));
        self.samples = grown;
    }

    fn is_full(&self) -> bool {
        self.samples.is_empty() || self.samples.len() >= MAX_SAMPLES
    }
}

pub struct DemoEngine {
    curves: Vec<Curve>,
    view: ViewRect,
    step: f64,
    polar: bool,
    cache: Cache,
}

impl DemoEngine {
    pub fn new() -> Self {
        Self {
            curves: Vec::new(),
            view: ViewRect::DEFAULT,
            step: FINE_STEP,
            polar: false,
            cache: Cache::new(),
        }
    }

    fn set_step(&mut self, width: f64) {
        let step = if width > COARSE_WIDTH {
            COARSE_STEP
        } else {
            FINE_STEP
        };
        if step != self.step {
            // Cached samples are only valid for the step they were taken at.
            for curve in &mut self.curves {
                curve.samples.clear();
            }
            self.step = step;
        }
    }

    fn draw(&self, frame: &mut Frame, size: Size) {
        let view = self.view;
        let to_screen = |x: f64, y: f64| {
            Point::new(
                ((x - view.x_min) / view.width()) as f32 * size.width,
                size.height - ((y - view.y_min) / view.height()) as f32 * size.height,
            )
        };

        frame.fill_rectangle(Point::ORIGIN, size, Color::WHITE);

        let grid = Stroke::default()
            .with_color(Color::from_rgb(0.8, 0.8, 0.8))
            .with_width(1.0);
        for x in (view.x_min.ceil() as i64)..=(view.x_max.floor() as i64) {
            let x = x as f64;
            frame.stroke(
                &Path::line(to_screen(x, view.y_min), to_screen(x, view.y_max)),
                grid,
            );
        }
        for y in (view.y_min.ceil() as i64)..=(view.y_max.floor() as i64) {
            let y = y as f64;
            frame.stroke(
                &Path::line(to_screen(view.x_min, y), to_screen(view.x_max, y)),
                grid,
            );
        }

        let axis = Stroke::default().with_color(Color::BLACK).with_width(2.0);
        frame.stroke(
            &Path::line(to_screen(view.x_min, 0.0), to_screen(view.x_max, 0.0)),
            axis,
        );
        frame.stroke(
            &Path::line(to_screen(0.0, view.y_min), to_screen(0.0, view.y_max)),
            axis,
        );

        // Values this far outside the view break the line instead of
        // drawing a near-vertical spike across it.
        let y_low = view.y_min - view.height();
        let y_high = view.y_max + view.height();

        for curve in &self.curves {
            let path = Path::new(|builder| {
                let mut pen_down = false;
                let mut plot = |x: f64, y: Option<f64>| match y {
                    Some(y) if (y_low..=y_high).contains(&y) => {
                        let point = to_screen(x, y);
                        if pen_down {
                            builder.line_to(point);
                        } else {
                            builder.move_to(point);
                            pen_down = true;
                        }
                    }
                    _ => pen_down = false,
                };

                if self.polar {
                    let steps = (POLAR_TURNS * std::f64::consts::TAU / POLAR_STEP) as usize;
                    for i in 0..=steps {
                        let theta = i as f64 * POLAR_STEP;
                        match evaluate(curve.function, theta) {
                            Some(r) => plot(r * theta.cos(), Some(r * theta.sin())),
                            None => plot(0.0, None),
                        }
                    }
                } else {
                    curve
                        .samples
                        .iter()
                        .filter(|(x, _)| *x >= view.x_min && *x <= view.x_max)
                        .for_each(|&(x, y)| plot(x, y));
                }
            });
            frame.stroke(&path, Stroke::default().with_color(curve.color).with_width(2.0));
        }
    }
}

impl Engine for DemoEngine {
    fn run(&mut self, view: &ViewRect) {
        self.set_step(view.width());
        self.view = *view;

        let start = view.x_min.floor();
        let end = view.x_max.ceil();
        let step = self.step;
        for curve in &mut self.curves {
            if !curve.covers(start, end) {
                curve.sample(start, end, step);
            }
        }
        self.cache.clear();
    }

    fn reset(&mut self) {
        self.curves.clear();
        self.cache.clear();
    }

    fn initialize(&mut self, expressions: &[String]) -> Vec<bool> {
        expressions
            .iter()
            .map(|expression| match lookup(expression) {
                Some(function) => {
                    let color = COLORS[self.curves.len() % COLORS.len()];
                    self.curves.push(Curve {
                        function,
                        color,
                        samples: Vec::new(),
                    });
                    true
                }
                None => false,
            })
            .collect()
    }

    fn expand_cache(&mut self) -> bool {
        if self.polar {
            return true;
        }
        let step = self.step;
        for curve in self.curves.iter_mut().filter(|c| !c.is_full()) {
            curve.expand(step);
        }
        self.curves.iter().all(Curve::is_full)
    }

    fn toggle_mode(&mut self) {
        self.polar = !self.polar;
        self.cache.clear();
    }
}

impl Scene for DemoEngine {
    fn geometry(&self, renderer: &Renderer, size: Size) -> Vec<canvas::Geometry> {
        vec![self.cache.draw(renderer, size, |frame| self.draw(frame, size))]
    }
}
