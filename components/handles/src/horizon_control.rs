use iced::{
    Color, Pixels, Point,
    advanced::graphics::geometry,
    widget::canvas::{self, Frame, Stroke, Text},
};

use crate::{HANDLE_RADIUS, handle_color};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizonEndpoint {
    Start,
    End,
}

/// Horizon line with a draggable handle at each end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonControl {
    pub start: Point,
    pub end: Point,
    pub enabled: bool,
}

impl HorizonControl {
    pub fn new(start: Point, end: Point, enabled: bool) -> Self {
        Self {
            start,
            end,
            enabled,
        }
    }

    pub fn endpoint(&self, endpoint: HorizonEndpoint) -> Point {
        match endpoint {
            HorizonEndpoint::Start => self.start,
            HorizonEndpoint::End => self.end,
        }
    }

    pub fn draw<Renderer>(&self, frame: &mut Frame<Renderer>, selected: Option<HorizonEndpoint>)
    where
        Renderer: geometry::Renderer,
    {
        let alpha = if self.enabled { 0.8 } else { 0.3 };
        let mut builder = canvas::path::Builder::new();
        builder.move_to(self.start);
        builder.line_to(self.end);
        frame.stroke(
            &builder.build(),
            Stroke {
                style: canvas::Style::Solid(Color::from_rgba(0.2, 0.6, 0.9, alpha)),
                width: 1.5,
                ..Stroke::default()
            },
        );

        for endpoint in [HorizonEndpoint::Start, HorizonEndpoint::End] {
            let mut builder = canvas::path::Builder::new();
            builder.circle(self.endpoint(endpoint), HANDLE_RADIUS);
            frame.stroke(
                &builder.build(),
                Stroke {
                    style: canvas::Style::Solid(handle_color(selected == Some(endpoint))),
                    width: 2.0,
                    ..Stroke::default()
                },
            );
        }

        let label = Point::new(self.start.x + 8.0, self.start.y - 16.0);
        frame.fill_text(Text {
            content: "horizon".to_string(),
            position: label,
            color: Color::from_rgba(0.2, 0.6, 0.9, alpha),
            size: Pixels(10.0),
            ..Default::default()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_follow_line_direction() {
        let horizon = HorizonControl::new(Point::new(10.0, 50.0), Point::new(90.0, 40.0), true);
        assert_eq!(horizon.endpoint(HorizonEndpoint::Start), Point::new(10.0, 50.0));
        assert_eq!(horizon.endpoint(HorizonEndpoint::End), Point::new(90.0, 40.0));
    }
}
