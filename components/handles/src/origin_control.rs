use iced::{
    Color, Pixels, Point,
    advanced::graphics::geometry,
    widget::canvas::{self, Frame, Stroke, Text},
};

use crate::{HANDLE_RADIUS, handle_color};

/// Filled disc marking the 3D origin in the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginControl {
    pub position: Point,
}

impl OriginControl {
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    pub fn draw<Renderer>(&self, frame: &mut Frame<Renderer>, selected: bool)
    where
        Renderer: geometry::Renderer,
    {
        let mut builder = canvas::path::Builder::new();
        builder.circle(self.position, HANDLE_RADIUS);
        let path = builder.build();
        frame.fill(&path, Color::from_rgba(0.3, 0.3, 0.3, 0.6));
        frame.stroke(
            &path,
            Stroke {
                style: canvas::Style::Solid(handle_color(selected)),
                width: 2.0,
                ..Stroke::default()
            },
        );
        frame.fill_text(Text {
            content: "origin".to_string(),
            position: Point::new(self.position.x + 8.0, self.position.y + 4.0),
            color: Color::from_rgba(0.8, 0.8, 0.8, 0.8),
            size: Pixels(10.0),
            ..Default::default()
        });
    }
}
