use iced::{
    Color, Point,
    advanced::graphics::geometry,
    widget::canvas::{self, Frame, Stroke},
};

use crate::{HANDLE_RADIUS, handle_color};

const ARM_LENGTH: f32 = 12.0;

/// Crosshair marking the principal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalPointControl {
    pub position: Point,
}

impl PrincipalPointControl {
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    pub fn draw<Renderer>(&self, frame: &mut Frame<Renderer>, selected: bool)
    where
        Renderer: geometry::Renderer,
    {
        let Point { x, y } = self.position;
        let mut builder = canvas::path::Builder::new();
        builder.move_to(Point::new(x - ARM_LENGTH, y));
        builder.line_to(Point::new(x + ARM_LENGTH, y));
        builder.move_to(Point::new(x, y - ARM_LENGTH));
        builder.line_to(Point::new(x, y + ARM_LENGTH));
        builder.circle(self.position, HANDLE_RADIUS);
        let path = builder.build();
        frame.stroke(
            &path,
            Stroke {
                style: canvas::Style::Solid(handle_color(selected)),
                width: 1.5,
                ..Stroke::default()
            },
        );

        let mut builder = canvas::path::Builder::new();
        builder.circle(self.position, 1.5);
        frame.fill(&builder.build(), Color::from_rgba(0.9, 0.3, 0.3, 0.9));
    }
}
