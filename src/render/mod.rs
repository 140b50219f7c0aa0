//! Render - the narrow drawing interface models draw through
//!
//! Models never touch a canvas. They hand pixel buffers, vector paths and
//! text to a `DrawTarget`; the browser side (or a test) decides what to do
//! with them. `CommandList` records everything as serializable commands.

use serde::Serialize;

use crate::domain::color::Color;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Segment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    /// Circular arc, angles in radians
    Arc { x: f64, y: f64, r: f64, start: f64, end: f64 },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub segments: Vec<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    pub line_width: f64,
}

impl Path {
    pub fn new() -> Self {
        Self { line_width: 1.0, ..Self::default() }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(Segment::MoveTo { x, y });
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(Segment::LineTo { x, y });
        self
    }

    /// Full circle
    pub fn circle(mut self, x: f64, y: f64, r: f64) -> Self {
        self.segments.push(Segment::Arc { x, y, r, start: 0.0, end: std::f64::consts::TAU });
        self
    }

    pub fn stroke(mut self, color: Color, line_width: f64) -> Self {
        self.stroke = Some(color.css());
        self.line_width = line_width;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color.css());
        self
    }
}

/// Drawing collaborator. Calls return nothing; failures are the target's concern.
pub trait DrawTarget {
    /// Blit a `width x height` ABGR pixel buffer, each pixel scaled to `scale` px
    fn put_pixels(&mut self, width: u32, height: u32, pixels: &[u32], scale: u32);

    fn draw_paths(&mut self, paths: &[Path]);

    /// Centered text at pixel position (x, y)
    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: Color, size: f64);
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawCommand {
    /// Pixel data is not copied; JS reads it through the exported pointer.
    Pixels { width: u32, height: u32, scale: u32 },
    Paths { paths: Vec<Path> },
    Text { text: String, x: f64, y: f64, color: String, size: f64 },
}

/// `DrawTarget` that records commands for later replay
#[derive(Clone, Debug, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn to_json(&self) -> crate::core::Result<String> {
        Ok(serde_json::to_string(&self.commands)?)
    }

    /// Text commands only, handy for asserting on banners and labels
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawTarget for CommandList {
    fn put_pixels(&mut self, width: u32, height: u32, pixels: &[u32], scale: u32) {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        self.commands.push(DrawCommand::Pixels { width, height, scale });
    }

    fn draw_paths(&mut self, paths: &[Path]) {
        if paths.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Paths { paths: paths.to_vec() });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: Color, size: f64) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color: color.css(),
            size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_serializes() {
        let mut list = CommandList::new();
        list.put_pixels(2, 1, &[0, 0], 4);
        list.draw_paths(&[Path::new().move_to(0.0, 0.0).line_to(1.0, 1.0).stroke(Color::RED, 2.0)]);
        list.draw_paths(&[]);
        list.draw_text("GOAL!", 10.0, 20.0, Color::WHITE, 48.0);

        assert_eq!(list.len(), 3);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["GOAL!"]);
        let json = list.to_json().unwrap();
        assert!(json.contains(r#""kind":"pixels""#));
        assert!(json.contains(r#""op":"lineTo""#));
        assert!(json.contains(r#""stroke":"rgb(255,0,0)""#));
    }
}
