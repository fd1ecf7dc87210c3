//! PDF export.
//!
//! Writes a single-page document the size of the scene, one point per
//! layout pixel, using pdf-writer.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use tutti_core::types::Color;

use crate::labels::GLYPH_WIDTH;
use crate::scene::{CirclePrimitive, RenderCommand, Scene, TextPrimitive};

/// Bezier control point factor for approximating circles.
const KAPPA: f32 = 0.552_284_8;

/// Serialize a scene as a PDF document.
pub fn export(scene: &Scene) -> Vec<u8> {
    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let font_id = Ref::new(5);

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut content = Content::new();

    // PDF has its origin at the bottom-left; flip to top-left
    content.transform([1.0, 0.0, 0.0, -1.0, 0.0, scene.height]);

    let mut builder = PdfBuilder {
        content: &mut content,
        background: scene.background,
    };
    builder.background(scene);
    for command in &scene.commands {
        match command {
            RenderCommand::Circle(circle) => builder.circle(circle),
            RenderCommand::Text(text) => builder.text(text),
        }
    }

    let content_data = content.finish();

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, scene.width, scene.height));
    page.parent(page_tree_id);
    page.contents(content_id);

    let mut resources = page.resources();
    resources.fonts().pair(Name(b"F1"), font_id);
    resources.finish();
    page.finish();

    pdf.stream(content_id, &content_data);
    pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

    pdf.finish()
}

struct PdfBuilder<'a> {
    content: &'a mut Content,
    background: Color,
}

impl<'a> PdfBuilder<'a> {
    fn background(&mut self, scene: &Scene) {
        if scene.background.a <= 0.0 {
            return;
        }
        let color = flatten(scene.background, Color::WHITE);
        self.content.set_fill_rgb(color.r, color.g, color.b);
        self.content.rect(0.0, 0.0, scene.width, scene.height);
        self.content.fill_nonzero();
    }

    fn circle(&mut self, circle: &CirclePrimitive) {
        if let Some(fill) = circle.fill {
            let color = self.opaque(fill);
            self.content.set_fill_rgb(color.r, color.g, color.b);
            self.draw_circle(circle.center_x, circle.center_y, circle.radius);
            self.content.fill_nonzero();
        }

        if let Some(stroke) = circle.stroke {
            let color = self.opaque(stroke.color);
            self.content.set_stroke_rgb(color.r, color.g, color.b);
            self.content.set_line_width(stroke.width);
            self.draw_circle(circle.center_x, circle.center_y, circle.radius);
            self.content.stroke();
        }
    }

    fn text(&mut self, text: &TextPrimitive) {
        let color = self.opaque(text.color);
        self.content.set_fill_rgb(color.r, color.g, color.b);

        for (line, baseline) in text.lines.iter().zip(text.baselines()) {
            let width = line.chars().count() as f32 * text.font_size * GLYPH_WIDTH;
            self.content.begin_text();
            self.content.set_font(Name(b"F1"), text.font_size);
            // Undo the page flip for glyphs
            self.content
                .set_text_matrix([1.0, 0.0, 0.0, -1.0, text.center_x - width / 2.0, baseline]);
            self.content.show(Str(&latin1(line)));
            self.content.end_text();
        }
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, r: f32) {
        let k = r * KAPPA;

        self.content.move_to(cx + r, cy);
        self.content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
        self.content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
        self.content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
        self.content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
        self.content.close_path();
    }

    /// Blend translucent colors over the page background.
    fn opaque(&self, color: Color) -> Color {
        let backdrop = if self.background.a > 0.0 {
            flatten(self.background, Color::WHITE)
        } else {
            Color::WHITE
        };
        flatten(color, backdrop)
    }
}

fn flatten(color: Color, backdrop: Color) -> Color {
    let a = color.a.clamp(0.0, 1.0);
    Color::rgb(
        color.r * a + backdrop.r * (1.0 - a),
        color.g * a + backdrop.g * (1.0 - a),
        color.b * a + backdrop.b * (1.0 - a),
    )
}

/// Encode text for the standard Helvetica font, replacing what it cannot show.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '…' => 0x85,
            c if (c as u32) < 0x100 => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
