//! Software rasterizer for PNG and JPEG export.
//!
//! Circles are tessellated with lyon and the triangles filled with edge
//! functions into an RGBA buffer. Label glyphs are not rasterized.

use lyon::geom::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, StrokeOptions, StrokeTessellator,
    StrokeVertex, VertexBuffers,
};
use tutti_core::errors::ExportError;
use tutti_core::types::Color;

use crate::scene::{CirclePrimitive, RenderCommand, Scene, Stroke};

/// A vertex for rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Tessellated triangles.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn append(&mut self, buffers: VertexBuffers<Vertex, u32>) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(buffers.vertices);
        self.indices.extend(buffers.indices.iter().map(|i| i + base));
    }
}

/// Converts circles to meshes.
pub struct Tessellator {
    fill_tessellator: FillTessellator,
    stroke_tessellator: StrokeTessellator,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tessellator {
    pub fn new() -> Self {
        Self {
            fill_tessellator: FillTessellator::new(),
            stroke_tessellator: StrokeTessellator::new(),
        }
    }

    /// Tessellate a circle's fill, then its outline.
    pub fn tessellate_circle(
        &mut self,
        circle: &CirclePrimitive,
        mesh: &mut Mesh,
    ) -> Result<(), ExportError> {
        let path = build_circle_path(circle.center_x, circle.center_y, circle.radius);

        if let Some(fill) = circle.fill {
            self.tessellate_fill(&path, fill, mesh)?;
        }
        if let Some(stroke) = circle.stroke {
            self.tessellate_stroke(&path, &stroke, mesh)?;
        }
        Ok(())
    }

    fn tessellate_fill(&mut self, path: &Path, fill: Color, mesh: &mut Mesh) -> Result<(), ExportError> {
        let color = [fill.r, fill.g, fill.b, fill.a];
        let mut buffers: VertexBuffers<Vertex, u32> = VertexBuffers::new();

        self.fill_tessellator
            .tessellate_path(
                path,
                &FillOptions::default(),
                &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                    Vertex::new(vertex.position().x, vertex.position().y, color)
                }),
            )
            .map_err(|e| ExportError::RenderFailed {
                reason: format!("fill tessellation: {:?}", e),
            })?;

        mesh.append(buffers);
        Ok(())
    }

    fn tessellate_stroke(
        &mut self,
        path: &Path,
        stroke: &Stroke,
        mesh: &mut Mesh,
    ) -> Result<(), ExportError> {
        let color = [stroke.color.r, stroke.color.g, stroke.color.b, stroke.color.a];
        let mut buffers: VertexBuffers<Vertex, u32> = VertexBuffers::new();
        let options = StrokeOptions::default().with_line_width(stroke.width);

        self.stroke_tessellator
            .tessellate_path(
                path,
                &options,
                &mut BuffersBuilder::new(&mut buffers, |vertex: StrokeVertex| {
                    Vertex::new(vertex.position().x, vertex.position().y, color)
                }),
            )
            .map_err(|e| ExportError::RenderFailed {
                reason: format!("stroke tessellation: {:?}", e),
            })?;

        mesh.append(buffers);
        Ok(())
    }
}

fn build_circle_path(cx: f32, cy: f32, radius: f32) -> Path {
    let mut builder = Path::builder();
    builder.add_circle(point(cx, cy), radius.max(0.0), Winding::Positive);
    builder.build()
}

/// RGBA8 software renderer.
pub struct SoftwareRenderer {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    tessellator: Tessellator,
}

impl SoftwareRenderer {
    /// Create a renderer with a transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0; width as usize * height as usize * 4],
            tessellator: Tessellator::new(),
        }
    }

    /// Clear the buffer to a solid color.
    pub fn clear(&mut self, color: Color) {
        let (r, g, b, a) = color.to_rgba8();
        for chunk in self.buffer.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[r, g, b, a]);
        }
    }

    /// Paint a scene over its background.
    pub fn render(&mut self, scene: &Scene) -> Result<&[u8], ExportError> {
        self.clear(scene.background);

        let mut mesh = Mesh::new();
        for command in &scene.commands {
            match command {
                RenderCommand::Circle(circle) => {
                    mesh.clear();
                    self.tessellator.tessellate_circle(circle, &mut mesh)?;
                    self.rasterize_mesh(&mesh);
                }
                RenderCommand::Text(_) => {}
            }
        }

        Ok(&self.buffer)
    }

    fn rasterize_mesh(&mut self, mesh: &Mesh) {
        for triangle in mesh.indices.chunks_exact(3) {
            let v0 = mesh.vertices[triangle[0] as usize];
            let v1 = mesh.vertices[triangle[1] as usize];
            let v2 = mesh.vertices[triangle[2] as usize];
            self.rasterize_triangle(&v0, &v1, &v2);
        }
    }

    /// Rasterize a single triangle using edge functions.
    fn rasterize_triangle(&mut self, v0: &Vertex, v1: &Vertex, v2: &Vertex) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let min_x = v0.position[0].min(v1.position[0]).min(v2.position[0]).max(0.0) as i32;
        let max_x = v0.position[0].max(v1.position[0]).max(v2.position[0]).min(self.width as f32 - 1.0) as i32;
        let min_y = v0.position[1].min(v1.position[1]).min(v2.position[1]).max(0.0) as i32;
        let max_y = v0.position[1].max(v1.position[1]).max(v2.position[1]).min(self.height as f32 - 1.0) as i32;

        let area = edge_function(v0.position, v1.position, v2.position);
        if area.abs() < 0.0001 {
            return;
        }
        let inv_area = 1.0 / area;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = [x as f32 + 0.5, y as f32 + 0.5];

                let w0 = edge_function(v1.position, v2.position, p);
                let w1 = edge_function(v2.position, v0.position, p);
                let w2 = edge_function(v0.position, v1.position, p);

                let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0) || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
                if !inside {
                    continue;
                }

                let (b0, b1, b2) = (w0 * inv_area, w1 * inv_area, w2 * inv_area);
                let mut src = [0.0f32; 4];
                for (channel, value) in src.iter_mut().enumerate() {
                    *value = (v0.color[channel] * b0 + v1.color[channel] * b1 + v2.color[channel] * b2)
                        .clamp(0.0, 1.0);
                }
                self.blend(x as u32, y as u32, src);
            }
        }
    }

    /// Source-over blend of a straight-alpha color into one pixel.
    fn blend(&mut self, x: u32, y: u32, src: [f32; 4]) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let Some(pixel) = self.buffer.get_mut(idx..idx + 4) else {
            return;
        };

        let dst_a = pixel[3] as f32 / 255.0;
        let src_a = src[3];
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        for channel in 0..3 {
            let dst = pixel[channel] as f32 / 255.0;
            let out = (src[channel] * src_a + dst * dst_a * (1.0 - src_a)) / out_a;
            pixel[channel] = (out * 255.0).round() as u8;
        }
        pixel[3] = (out_a * 255.0).round() as u8;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get a reference to the raw pixel buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }
}

/// Edge function for triangle rasterization.
/// Returns positive if point p is to the left of edge (a, b).
#[inline]
fn edge_function(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (p[0] - a[0]) * (b[1] - a[1]) - (p[1] - a[1]) * (b[0] - a[0])
}
