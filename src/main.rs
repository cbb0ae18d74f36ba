use clap::{Parser, ValueEnum};
use control_points::container::DragIntent;
use control_points::control_points_canvas::ControlPointsCanvas;
use control_points::read_state::{default_state_path, load};
use control_points::session::Session;
use control_points::store::{AppAction, StoreState, map_state_to_props};
use control_points::{CalibrationMode, RelativePoint};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{
    Text, button, center, column, container, image, row, scrollable, slider, stack, text,
};
use iced::{Element, Length, Size, Task, Theme, keyboard};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use anyhow::Result;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// control point file, defaults to `<image>.control-points`
    #[arg(short, long)]
    state: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,
    image: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

impl From<ModeArg> for CalibrationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::One => CalibrationMode::OneVanishingPoint,
            ModeArg::Two => CalibrationMode::TwoVanishingPoint,
        }
    }
}

pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    iced::application(ControlPoints::new, ControlPoints::update, ControlPoints::view)
        .theme(ControlPoints::theme)
        .antialiasing(true)
        .centered()
        .subscription(|_state| {
            keyboard::listen().filter_map(|event| {
                let keyboard::Event::KeyReleased { key, modifiers, .. } = event else {
                    return None;
                };

                (|key: keyboard::Key, _modifiers: keyboard::Modifiers| {
                let keyboard::Key::Character(c) = key else {
                    return None;
                };

                let c = c.as_str();

                match c {
                    "1" => Some(Message::ChangeMode(CalibrationMode::OneVanishingPoint)),
                    "2" => Some(Message::ChangeMode(CalibrationMode::TwoVanishingPoint)),
                    "s" => Some(Message::Save),
                    _ => None,
                }
                })(key, modifiers)
            })
        })
        .run()
}

#[derive(Debug, Clone)]
enum Message {
    Save,
    LoadApplicationState {
        store: StoreState,
        image_size: Size<u32>,
    },
    LoadFailed(String),
    ChangeMode(CalibrationMode),
    ControlPointDrag(DragIntent),
    ZoomChanged(f32),
    NoImage,
}

#[derive(Default)]
struct ControlPoints {
    image_state: Option<ImageState>,
}

struct ImageState {
    image_path: PathBuf,
    session: Session,
    initial_mode: Option<CalibrationMode>,
    image_size: Size<f32>,
    zoom: f32,
    status: Option<String>,
}

fn extract_state(state: Result<(StoreState, Size<u32>)>) -> Message {
    match state {
        Ok((store, image_size)) => Message::LoadApplicationState { store, image_size },
        Err(err) => Message::LoadFailed(format!("{err:#}")),
    }
}

impl ControlPoints {
    fn new() -> (Self, Task<Message>) {
        let args = Cli::parse();
        let Some(image_path) = args.image else {
            return (ControlPoints::default(), Task::done(Message::NoImage));
        };
        let state_file = args
            .state
            .unwrap_or_else(|| default_state_path(&image_path));
        info!(
            "image {}, control points {}",
            image_path.display(),
            state_file.display()
        );
        let image_state = ImageState {
            image_path: image_path.clone(),
            session: Session::new(state_file.clone()),
            initial_mode: args.mode.map(Into::into),
            image_size: Size::ZERO,
            zoom: 0.5,
            status: None,
        };
        (
            ControlPoints {
                image_state: Some(image_state),
            },
            Task::perform(load(image_path, state_file), extract_state),
        )
    }

    fn update(&mut self, message: Message) {
        let Some(image_state) = self.image_state.as_mut() else {
            return;
        };
        match message {
            Message::Save => match image_state.session.save() {
                Ok(()) => image_state.status = Some("Saved".to_string()),
                Err(err) => {
                    warn!(
                        "could not save {}: {err}",
                        image_state.session.state_file().display()
                    );
                    image_state.status = Some(format!("Save failed: {err}"));
                }
            },
            Message::LoadApplicationState { store, image_size } => {
                image_state.image_size =
                    Size::new(image_size.width as f32, image_size.height as f32);
                image_state
                    .session
                    .loaded(store, image_state.initial_mode.take());
                image_state.status = None;
            }
            Message::LoadFailed(err) => {
                warn!("could not load {}: {err}", image_state.image_path.display());
                image_state.status = Some(err);
            }
            Message::ChangeMode(mode) => {
                debug!("calibration mode {mode:?}");
                image_state
                    .session
                    .dispatch(AppAction::SetCalibrationMode(mode));
            }
            Message::ControlPointDrag(intent) => {
                // refusals are logged by the session
                let _ = image_state.session.drag(intent);
            }
            Message::ZoomChanged(zoom) => image_state.zoom = zoom,
            Message::NoImage => {}
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let Some(image_state) = self.image_state.as_ref() else {
            return center(text("Pass an image to calibrate: control-points <IMAGE>")).into();
        };

        let width = image_state.image_size.width * image_state.zoom;
        let height = image_state.image_size.height * image_state.zoom;
        let canvas = scrollable(stack!(
            image(&image_state.image_path).width(width).height(height),
            ControlPointsCanvas::new(
                map_state_to_props(image_state.session.store()),
                Message::ControlPointDrag
            )
            .width(width)
            .height(height),
        ))
        .direction(Direction::Both {
            vertical: Scrollbar::default(),
            horizontal: Scrollbar::default(),
        });

        let store = image_state.session.store();
        let mode = match store.calibration_mode {
            CalibrationMode::OneVanishingPoint => text("1 Vanishing Point"),
            CalibrationMode::TwoVanishingPoint => text("2 Vanishing Points"),
        };
        let state_1vp = &store.control_points_states.control_points_state_1vp;
        let point_text = |label: &str, point: RelativePoint| -> Text<'static> {
            text(format!("{label}: {:.3}, {:.3}", point.x, point.y)).size(12)
        };
        let mode_details = match store.calibration_mode {
            CalibrationMode::OneVanishingPoint => column![
                point_text("Principal point", state_1vp.principal_point),
                point_text("Origin", state_1vp.origin),
                point_text("Horizon start", state_1vp.horizon_start),
                point_text("Horizon end", state_1vp.horizon_end),
            ],
            CalibrationMode::TwoVanishingPoint => {
                let state_2vp = &store.control_points_states.control_points_state_2vp;
                column![
                    point_text("Principal point", state_2vp.principal_point),
                    point_text("Origin", state_2vp.origin),
                    text("Vanishing point controls are not implemented").size(12),
                ]
            }
        };

        column!(
            row!(
                container(canvas)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center),
                container(
                    column!(
                        mode,
                        row!(
                            button(text("1 VP").width(Length::Fill).align_x(Horizontal::Center))
                                .on_press(Message::ChangeMode(CalibrationMode::OneVanishingPoint))
                                .width(Length::Fill),
                            button(text("2 VP").width(Length::Fill).align_x(Horizontal::Center))
                                .on_press(Message::ChangeMode(CalibrationMode::TwoVanishingPoint))
                                .width(Length::Fill),
                        )
                        .spacing(5),
                        text(format!("Scale {:.2}x", image_state.zoom)),
                        slider(0.25f32..=1.0f32, image_state.zoom, Message::ZoomChanged)
                            .step(0.05),
                        mode_details.spacing(3),
                        button(
                            text("Save control points")
                                .width(Length::Fill)
                                .align_x(Horizontal::Center)
                        )
                        .on_press(Message::Save)
                        .width(Length::Fill),
                        text(image_state.status.clone().unwrap_or_default()),
                    )
                    .spacing(5)
                )
                .width(300)
                .padding(10)
            )
            .height(Length::Fill)
            .padding(10),
        )
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::TokyoNight
    }
}
