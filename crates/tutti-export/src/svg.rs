//! SVG export.

use tutti_core::types::Color;

use crate::scene::{CirclePrimitive, RenderCommand, Scene, TextPrimitive};

/// Serialize a scene as an SVG document.
pub fn export(scene: &Scene) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
"#,
        scene.width, scene.height, scene.width, scene.height
    ));

    let mut builder = SvgBuilder {
        svg: &mut svg,
        indent: 1,
    };
    builder.background(scene);
    for command in &scene.commands {
        match command {
            RenderCommand::Circle(circle) => builder.circle(circle),
            RenderCommand::Text(text) => builder.text(text),
        }
    }

    svg.push_str("</svg>\n");
    svg
}

struct SvgBuilder<'a> {
    svg: &'a mut String,
    indent: usize,
}

impl<'a> SvgBuilder<'a> {
    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.svg.push_str("  ");
        }
    }

    fn background(&mut self, scene: &Scene) {
        if scene.background.a <= 0.0 {
            return;
        }
        let mut attrs = vec![
            "x=\"0\"".to_string(),
            "y=\"0\"".to_string(),
            format!("width=\"{}\"", scene.width),
            format!("height=\"{}\"", scene.height),
        ];
        push_paint(&mut attrs, "fill", &scene.background);
        self.write_indent();
        self.svg.push_str(&format!("<rect {} />\n", attrs.join(" ")));
    }

    fn circle(&mut self, circle: &CirclePrimitive) {
        let mut attrs = vec![
            format!("cx=\"{}\"", circle.center_x),
            format!("cy=\"{}\"", circle.center_y),
            format!("r=\"{}\"", circle.radius),
        ];

        match &circle.fill {
            Some(color) => push_paint(&mut attrs, "fill", color),
            None => attrs.push("fill=\"none\"".to_string()),
        }

        if let Some(stroke) = &circle.stroke {
            push_paint(&mut attrs, "stroke", &stroke.color);
            attrs.push(format!("stroke-width=\"{}\"", stroke.width));
        }

        self.write_indent();
        self.svg.push_str(&format!("<circle {} />\n", attrs.join(" ")));
    }

    fn text(&mut self, text: &TextPrimitive) {
        self.write_indent();
        self.svg.push_str(&format!(
            "<text text-anchor=\"middle\" fill=\"{}\" font-size=\"{}\" font-family=\"sans-serif\">\n",
            color_to_svg(&text.color),
            text.font_size,
        ));

        self.indent += 1;
        for (line, baseline) in text.lines.iter().zip(text.baselines()) {
            self.write_indent();
            self.svg.push_str(&format!(
                "<tspan x=\"{}\" y=\"{}\">{}</tspan>\n",
                text.center_x,
                baseline,
                escape_xml(line)
            ));
        }
        self.indent -= 1;

        self.write_indent();
        self.svg.push_str("</text>\n");
    }
}

// Helper functions

fn push_paint(attrs: &mut Vec<String>, name: &str, color: &Color) {
    attrs.push(format!("{}=\"{}\"", name, color_to_svg(color)));
    if color.a < 1.0 {
        attrs.push(format!("{}-opacity=\"{}\"", name, color.a));
    }
}

fn color_to_svg(color: &Color) -> String {
    color.to_hex()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
