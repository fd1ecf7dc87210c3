//! Scene building from laid-out seats.

use tutti_core::model::Member;
use tutti_core::options::LayoutOptions;
use tutti_core::project::Project;
use tutti_core::types::Color;
use tutti_layout::{layout_dimensions, unpositioned_members, Seat};

use crate::labels;
use crate::ExportOptions;

/// Outline width of empty seats relative to the seat size.
const OUTLINE_SCALE: f32 = 0.0625;

/// Opacity of visible implicit seats.
const IMPLICIT_ALPHA: f32 = 0.35;

/// A stroke style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// A filled and/or outlined circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CirclePrimitive {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

/// A block of centered text lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    /// Centre of the text block
    pub center_x: f32,
    pub center_y: f32,
    pub lines: Vec<String>,
    pub font_size: f32,
    pub color: Color,
}

impl TextPrimitive {
    /// Baseline y of each line, top to bottom.
    pub fn baselines(&self) -> impl Iterator<Item = f32> + '_ {
        let line_height = self.font_size * labels::LINE_HEIGHT;
        let top = self.center_y - line_height * self.lines.len() as f32 / 2.0;
        // Baseline sits roughly 0.8 of the font size below the glyph top
        let first = top + (line_height - self.font_size) / 2.0 + self.font_size * 0.8;
        (0..self.lines.len()).map(move |i| first + line_height * i as f32)
    }
}

/// A single drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Circle(CirclePrimitive),
    Text(TextPrimitive),
}

/// Everything an exporter draws, in painting order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub commands: Vec<RenderCommand>,
}

impl Scene {
    pub fn new(width: f32, height: f32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::Circle(circle) => Some(circle),
            RenderCommand::Text(_) => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::Text(text) => Some(text),
            RenderCommand::Circle(_) => None,
        })
    }
}

/// Maps layout coordinates onto the canvas.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl Viewport {
    /// Uniform scale that fits `content` in `canvas`, centered.
    fn fit(content: (f32, f32), canvas: (f32, f32)) -> Self {
        let scale = (canvas.0 / content.0).min(canvas.1 / content.1);
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        Self {
            scale,
            offset_x: (canvas.0 - content.0 * scale) / 2.0,
            offset_y: (canvas.1 - content.1 * scale) / 2.0,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }
}

/// Canvas size for `seats`: the requested size, or the layout dimensions.
pub fn canvas_size(seats: &[Seat], settings: &LayoutOptions, options: &ExportOptions) -> (u32, u32) {
    let [width, height] = layout_dimensions(seats, settings.seat_size);
    (
        options.width.unwrap_or(width.ceil() as u32).max(1),
        options.height.unwrap_or(height.ceil() as u32).max(1),
    )
}

/// Build the drawing for a laid-out project.
///
/// `seats` are expected in display orientation. Implicit seats are drawn
/// only when the project settings ask for them. Free-floating members are
/// drawn at their stored position.
pub fn build_scene(seats: &[Seat], project: &Project, options: &ExportOptions) -> Scene {
    let settings = &project.settings;
    let [content_width, content_height] = layout_dimensions(seats, settings.seat_size);
    let (width, height) = canvas_size(seats, settings, options);
    let canvas = (width as f32, height as f32);
    let viewport = Viewport::fit((content_width as f32, content_height as f32), canvas);

    let mut scene = Scene::new(canvas.0, canvas.1, options.background);
    let seat_size = settings.seat_size as f32;
    let radius = seat_size / 2.0 * viewport.scale;
    let outline = seat_size * OUTLINE_SCALE * viewport.scale;
    let font_size = labels::font_size(seat_size) * viewport.scale;

    let mut labels = Vec::new();
    for seat in seats {
        if seat.implicit && !settings.implicit_seats_visible {
            continue;
        }
        let (cx, cy) = viewport.point(seat.x as f32 + seat_size / 2.0, seat.y as f32 + seat_size / 2.0);
        let occupant = seat.member.as_ref().and_then(|id| project.members.get(id));

        let circle = match (occupant, seat.implicit) {
            (Some(_), _) => CirclePrimitive {
                center_x: cx,
                center_y: cy,
                radius,
                fill: Some(seat.color),
                stroke: None,
            },
            (None, false) => CirclePrimitive {
                center_x: cx,
                center_y: cy,
                radius: radius - outline / 2.0,
                fill: Some(Color::WHITE),
                stroke: Some(Stroke {
                    color: seat.color,
                    width: outline,
                }),
            },
            (None, true) => CirclePrimitive {
                center_x: cx,
                center_y: cy,
                radius: radius - outline / 2.0,
                fill: None,
                stroke: Some(Stroke {
                    color: seat.color.with_alpha(IMPLICIT_ALPHA),
                    width: outline,
                }),
            },
        };
        scene.push(RenderCommand::Circle(circle));

        if let Some(member) = occupant {
            labels.push(label(member, seat.color, (cx, cy), font_size, canvas, settings));
        }
    }

    for member in unpositioned_members(project) {
        let color = project
            .sections
            .get(&member.section)
            .map_or(Color::SECTION_DEFAULT, |s| s.color);
        let (cx, cy) = viewport.point(member.x as f32 + seat_size / 2.0, member.y as f32 + seat_size / 2.0);
        scene.push(RenderCommand::Circle(CirclePrimitive {
            center_x: cx,
            center_y: cy,
            radius,
            fill: Some(color),
            stroke: None,
        }));
        labels.push(label(member, color, (cx, cy), font_size, canvas, settings));
    }

    // Labels paint above every circle
    for text in labels.into_iter().flatten() {
        scene.push(RenderCommand::Text(text));
    }

    tracing::debug!(
        width = canvas.0,
        height = canvas.1,
        commands = scene.commands.len(),
        "built export scene"
    );
    scene
}

fn label(
    member: &Member,
    fill: Color,
    center: (f32, f32),
    font_size: f32,
    canvas: (f32, f32),
    settings: &LayoutOptions,
) -> Option<TextPrimitive> {
    let lines = labels::label_lines(&member.name, settings.seat_name_labels, settings.seat_size as f32);
    if lines.is_empty() {
        return None;
    }
    let extent = labels::text_extent(&lines, font_size);
    let (center_x, center_y) = labels::clamp_label_center(center, extent, canvas);
    Some(TextPrimitive {
        center_x,
        center_y,
        lines,
        font_size,
        color: fill.contrasting_text(),
    })
}
