use std::marker::PhantomData;

use handles::horizon_control::HorizonEndpoint;
use iced::{
    Color, Element,
    Length::{self},
    Pixels, Point, Rectangle, Size, Vector,
    advanced::{
        Clipboard, Layout, Shell, Widget,
        graphics::geometry::{self},
        layout, mouse,
        renderer::Style,
        widget::{
            Tree,
            tree::{self},
        },
    },
    event::Status,
    widget::canvas::{self, Event, Fill, Text},
};
use tracing::trace;

use crate::{
    container::{ControlHandle, ControlPointsContainer, ControlPointsProps, DragIntent, ModeControls},
    mapper::Viewport,
};

/// Overlay drawing the calibration control points on top of the image.
///
/// The widget keeps only pointer state; positions come from the props on
/// every view and drags are published as [`DragIntent`] messages.
pub struct ControlPointsCanvas<'a, Message, Theme = iced::Theme, Renderer = iced::Renderer>
where
    Renderer: geometry::Renderer,
{
    width: Length,
    height: Length,
    message_: PhantomData<Message>,
    controls_cache: geometry::Cache<Renderer>,
    renderer_: PhantomData<Renderer>,
    theme_: PhantomData<Theme>,
    props: ControlPointsProps<'a>,
    on_drag: Box<dyn Fn(DragIntent) -> Message + 'a>,
}

impl<'a, M, Theme, Renderer> ControlPointsCanvas<'a, M, Theme, Renderer>
where
    Renderer: geometry::Renderer,
{
    const DEFAULT_SIZE: f32 = 100.0;
    pub fn new(props: ControlPointsProps<'a>, on_drag: impl Fn(DragIntent) -> M + 'a) -> Self {
        ControlPointsCanvas {
            width: Length::Fixed(Self::DEFAULT_SIZE),
            height: Length::Fixed(Self::DEFAULT_SIZE),
            message_: PhantomData,
            controls_cache: geometry::Cache::default(),
            renderer_: PhantomData,
            theme_: PhantomData,
            props,
            on_drag: Box::new(on_drag),
        }
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    fn container(&self, bounds: Rectangle) -> Option<ControlPointsContainer<'a>> {
        let viewport = Viewport::from_bounds(bounds).ok()?;
        Some(ControlPointsContainer::new(viewport, self.props))
    }

    fn update_inner(
        &self,
        state: &mut State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (Status, Option<DragIntent>) {
        let Some(container) = self.container(bounds) else {
            return (Status::Ignored, None);
        };
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let Some(cursor) = cursor.position_over(bounds) else {
                    return (Status::Ignored, None);
                };
                let local = container.viewport().to_local(cursor);
                state.dragging = container.render().hit_test(local.into());
                if let Some(handle) = state.dragging {
                    trace!("grab {handle:?}");
                    (Status::Captured, None)
                } else {
                    (Status::Ignored, None)
                }
            }

            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.dragging.take().is_some() {
                    (Status::Captured, None)
                } else {
                    (Status::Ignored, None)
                }
            }

            Event::Mouse(mouse::Event::CursorMoved { position: _ }) => {
                // a grabbed handle follows the cursor outside the bounds too
                if let Some(handle) = state.dragging {
                    let Some(cursor) = cursor.position() else {
                        return (Status::Ignored, None);
                    };
                    let local = container.viewport().to_local(cursor);
                    return (Status::Captured, Some(container.drag_intent(handle, local)));
                }
                let hovered = cursor.position_over(bounds).and_then(|cursor| {
                    container
                        .render()
                        .hit_test(container.viewport().to_local(cursor).into())
                });
                if hovered != state.hovered {
                    state.hovered = hovered;
                    (Status::Captured, None)
                } else {
                    (Status::Ignored, None)
                }
            }
            _ => (Status::Ignored, None),
        }
    }

    fn draw_inner(
        &self,
        state: &State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Renderer::Geometry> {
        let Some(container) = self.container(bounds) else {
            return Vec::new();
        };
        let controls = container.render();
        let selected = state.dragging.or(state.hovered);

        let controls_geometry = self
            .controls_cache
            .draw(renderer, bounds.size(), |frame| {
                controls
                    .principal_point
                    .draw(frame, selected == Some(ControlHandle::PrincipalPoint));
                controls
                    .origin
                    .draw(frame, selected == Some(ControlHandle::Origin));

                match &controls.mode_controls {
                    ModeControls::OneVanishingPoint { horizon } => {
                        let endpoint = match selected {
                            Some(ControlHandle::HorizonStart) => Some(HorizonEndpoint::Start),
                            Some(ControlHandle::HorizonEnd) => Some(HorizonEndpoint::End),
                            _ => None,
                        };
                        horizon.draw(frame, endpoint);
                    }
                    ModeControls::NotImplemented(mode) => {
                        frame.fill_rectangle(
                            Point::new(8.0, 8.0),
                            Size::new(260.0, 18.0),
                            Fill {
                                style: canvas::Style::Solid(Color::from_rgba(0.3, 0.3, 0.3, 0.9)),
                                ..Fill::default()
                            },
                        );
                        frame.fill_text(Text {
                            content: format!("{mode:?} controls are not implemented"),
                            position: Point::new(12.0, 11.0),
                            color: Color::from_rgba(0.9, 0.5, 0.3, 0.9),
                            size: Pixels(12.0),
                            ..Default::default()
                        });
                    }
                }
            });

        vec![controls_geometry]
    }
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for ControlPointsCanvas<'_, Message, Theme, Renderer>
where
    Renderer: geometry::Renderer,
{
    fn tag(&self) -> tree::Tag {
        struct Tag<T>(T);
        tree::Tag::of::<Tag<State>>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    fn layout(
        &mut self,
        _tree: &mut Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::atomic(limits, self.width, self.height)
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();

        let state = tree.state.downcast_mut::<State>();

        let (event_status, intent) = self.update_inner(state, event, bounds, cursor);
        if let Status::Captured = event_status {
            self.controls_cache.clear();
            shell.capture_event();
            if let Some(intent) = intent {
                shell.publish((self.on_drag)(intent));
            } else {
                shell.request_redraw();
            }
        }
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        _layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<State>();
        match (state.dragging, state.hovered) {
            (Some(_), _) => mouse::Interaction::Grabbing,
            (None, Some(_)) => mouse::Interaction::Grab,
            _ => mouse::Interaction::default(),
        }
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        _style: &Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();

        if bounds.width < 1.0 || bounds.height < 1.0 {
            return;
        }
        let state = tree.state.downcast_ref::<State>();

        renderer.with_translation(Vector::new(bounds.x, bounds.y), |renderer| {
            let layers = self.draw_inner(state, renderer, theme, bounds, cursor);

            for layer in layers {
                renderer.draw_geometry(layer);
            }
        });
    }
}

#[derive(Default, Clone)]
pub struct State {
    pub dragging: Option<ControlHandle>,
    pub hovered: Option<ControlHandle>,
}

impl<'a, Message, Theme, Renderer> From<ControlPointsCanvas<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: 'a + geometry::Renderer,
{
    fn from(
        control_points: ControlPointsCanvas<'a, Message, Theme, Renderer>,
    ) -> Element<'a, Message, Theme, Renderer> {
        Element::new(control_points)
    }
}
