mod engine;

use engine::DemoEngine;
use graph_viewport::{
    CoordinateMode, GraphCanvas, GraphController, LoopToken, PointerEvent, SchedulingMode,
    SubscriptionHost, ViewerConfig,
};
use iced::widget::{button, column, row, text, text_input, Column, Container};
use iced::{window, Element, Length, Size, Subscription, Theme};
use std::env;

/// Width reserved for the control panel next to the graph.
const PANEL_WIDTH: f32 = 280.0;
const MARGIN: f32 = 20.0;

pub fn main() {
    // The default wgpu backend leaves canvas artifacts behind when the
    // window is resized quickly.
    unsafe {
        env::set_var("ICED_BACKEND", "tiny_skia");
    }
    tracing_subscriber::fmt::init();

    iced::application(Grapher::new, Grapher::update, Grapher::view)
        .subscription(Grapher::subscription)
        .theme(Theme::GruvboxLight)
        .run()
        .unwrap()
}

#[derive(Debug, Clone)]
enum Message {
    Pointer(PointerEvent),
    Tick(LoopToken),
    ZoomIn,
    ZoomOut,
    ToggleMode,
    InputChanged(usize, String),
    AddInput,
    RemoveInput(usize),
    WindowResized(Size),
}

struct Grapher {
    controller: GraphController<DemoEngine>,
    host: SubscriptionHost,
    inputs: Vec<String>,
}

impl Grapher {
    pub fn new() -> Self {
        let mut grapher = Self {
            controller: GraphController::new(DemoEngine::new(), ViewerConfig::default())
                .unwrap(),
            host: SubscriptionHost::new(),
            inputs: vec!["log(x)".to_string()],
        };
        grapher.apply_inputs();
        grapher
    }

    fn apply_inputs(&mut self) {
        self.controller
            .edit_expressions(&self.inputs, &mut self.host);
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            self.host.subscription().map(Message::Tick),
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
        ])
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Pointer(event) => {
                self.controller.pointer(event, &mut self.host);
            }
            Message::Tick(token) => self.controller.tick(token, &mut self.host),
            Message::ZoomIn => {
                self.controller.zoom_in(&mut self.host);
            }
            Message::ZoomOut => {
                self.controller.zoom_out(&mut self.host);
            }
            Message::ToggleMode => {
                self.controller.toggle_mode(&mut self.host);
            }
            Message::InputChanged(index, value) => {
                if let Some(slot) = self.inputs.get_mut(index) {
                    *slot = value;
                    self.apply_inputs();
                }
            }
            Message::AddInput => {
                self.inputs.push(String::new());
                self.apply_inputs();
            }
            Message::RemoveInput(index) => {
                if index < self.inputs.len() {
                    self.inputs.remove(index);
                    self.apply_inputs();
                }
            }
            Message::WindowResized(size) => {
                let available = (size.width - PANEL_WIDTH).min(size.height) - 2.0 * MARGIN;
                self.controller
                    .resize(f64::from(available), &mut self.host);
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let graph = GraphCanvas::new(self.controller.engine())
            .on_pointer(Message::Pointer)
            .into_element(self.controller.surface_size() as f32);

        let validity = self.controller.validity();
        let inputs = self
            .inputs
            .iter()
            .enumerate()
            .fold(Column::new().spacing(8), |col, (index, value)| {
                let erroneous = validity.is_erroneous(index);
                let input = text_input("f(x)", value)
                    .on_input(move |value| Message::InputChanged(index, value))
                    .style(move |theme: &Theme, status| {
                        let mut style = text_input::default(theme, status);
                        if erroneous {
                            style.border.color = theme.palette().danger;
                            style.border.width = 2.0;
                        }
                        style
                    });
                col.push(row![input, button(text("x")).on_press(Message::RemoveInput(index))].spacing(4))
            });

        let affordance = self.controller.affordance();
        let zoom = row![
            button(text("-")).on_press_maybe(affordance.can_zoom_out.then_some(Message::ZoomOut)),
            button(text("+")).on_press_maybe(affordance.can_zoom_in.then_some(Message::ZoomIn)),
        ]
        .spacing(8);

        let mode_label = match self.controller.coordinate_mode() {
            CoordinateMode::Cartesian => "Switch to polar",
            CoordinateMode::Polar => "Switch to Cartesian",
        };

        let view = self.controller.view();
        let status = match self.controller.mode() {
            SchedulingMode::Idle => "idle",
            SchedulingMode::Continuous => "dragging",
            SchedulingMode::Expanding => "filling cache",
        };

        let panel = column![
            text("Expressions"),
            inputs,
            button(text("Add expression")).on_press(Message::AddInput),
            text(""),
            text("Zoom"),
            zoom,
            button(text(mode_label)).on_press(Message::ToggleMode),
            text(""),
            text(format!("X: [{:.2}, {:.2}]", view.x_min, view.x_max)),
            text(format!("Y: [{:.2}, {:.2}]", view.y_min, view.y_max)),
            text(format!("Scheduler: {status}")),
        ]
        .spacing(10);

        row![
            Container::new(graph).padding(MARGIN),
            Container::new(panel)
                .width(Length::Fixed(PANEL_WIDTH))
                .height(Length::Fill)
                .padding(MARGIN),
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}
