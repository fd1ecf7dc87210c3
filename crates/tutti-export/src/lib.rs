//! Export formats for Tutti seating charts.
//!
//! Supported formats:
//! - SVG (vector, with labels)
//! - PDF (vector, with labels)
//! - PNG and JPEG (raster, seats only)
//!
//! Every format draws the same [`Scene`], built once from the laid-out seats.

pub mod encode;
pub mod labels;
pub mod raster;
pub mod scene;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "pdf")]
pub mod pdf;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tutti_core::errors::ExportError;
use tutti_core::project::Project;
use tutti_core::types::Color;
use tutti_layout::Seat;

pub use raster::SoftwareRenderer;
pub use scene::{build_scene, canvas_size, RenderCommand, Scene};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Svg,
    Pdf,
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            other => Err(ExportError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Export options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Canvas width in pixels; the layout width when unset
    #[serde(default)]
    pub width: Option<u32>,
    /// Canvas height in pixels; the layout height when unset
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub format: ExportFormat,
    /// JPEG quality, 1 to 100
    #[serde(default = "default_quality")]
    pub quality: u8,
    #[serde(default = "default_background")]
    pub background: Color,
}

fn default_quality() -> u8 {
    92
}

fn default_background() -> Color {
    Color::WHITE
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            format: ExportFormat::default(),
            quality: default_quality(),
            background: default_background(),
        }
    }
}

impl ExportOptions {
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Reject zero-sized canvases and out-of-range quality.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.width == Some(0) || self.height == Some(0) {
            return Err(ExportError::InvalidCanvas {
                width: self.width.unwrap_or(0),
                height: self.height.unwrap_or(0),
            });
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ExportError::InvalidQuality {
                quality: self.quality,
            });
        }
        Ok(())
    }
}

/// Export laid-out seats in the format chosen by `options`.
#[tracing::instrument(skip_all, fields(format = %options.format, seats = seats.len()))]
pub fn export(seats: &[Seat], project: &Project, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    options.validate()?;
    let scene = build_scene(seats, project, options);

    match options.format {
        ExportFormat::Svg => export_svg_scene(&scene).map(String::into_bytes),
        ExportFormat::Pdf => export_pdf_scene(&scene),
        ExportFormat::Png => {
            let (pixels, width, height) = rasterize(&scene)?;
            encode::encode_png(&pixels, width, height)
        }
        ExportFormat::Jpeg => {
            let (pixels, width, height) = rasterize(&scene)?;
            encode::encode_jpeg(&pixels, width, height, options.quality)
        }
    }
}

/// Export laid-out seats to an SVG document.
pub fn export_svg(seats: &[Seat], project: &Project, options: &ExportOptions) -> Result<String, ExportError> {
    options.validate()?;
    export_svg_scene(&build_scene(seats, project, options))
}

#[cfg(feature = "svg")]
fn export_svg_scene(scene: &Scene) -> Result<String, ExportError> {
    Ok(svg::export(scene))
}

#[cfg(not(feature = "svg"))]
fn export_svg_scene(_scene: &Scene) -> Result<String, ExportError> {
    Err(ExportError::UnsupportedFormat {
        format: ExportFormat::Svg.to_string(),
    })
}

#[cfg(feature = "pdf")]
fn export_pdf_scene(scene: &Scene) -> Result<Vec<u8>, ExportError> {
    Ok(pdf::export(scene))
}

#[cfg(not(feature = "pdf"))]
fn export_pdf_scene(_scene: &Scene) -> Result<Vec<u8>, ExportError> {
    Err(ExportError::UnsupportedFormat {
        format: ExportFormat::Pdf.to_string(),
    })
}

fn rasterize(scene: &Scene) -> Result<(Vec<u8>, u32, u32), ExportError> {
    let (width, height) = (scene.width.round() as u32, scene.height.round() as u32);
    let mut renderer = SoftwareRenderer::new(width, height);
    let pixels = renderer.render(scene)?.to_vec();
    Ok((pixels, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::tests::quartet;
    use tutti_layout::layout_project;

    #[test]
    fn test_format_from_str() {
        assert_eq!("SVG".parse::<ExportFormat>().unwrap(), ExportFormat::Svg);
        assert_eq!("jpg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert!(matches!(
            "bmp".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_options_deserialize_defaults() {
        let options: ExportOptions = serde_json::from_str(r#"{"format": "jpeg"}"#).unwrap();
        assert_eq!(options.format, ExportFormat::Jpeg);
        assert_eq!(options.quality, 92);
        assert_eq!(options.background, Color::WHITE);
        assert_eq!(options.width, None);
    }

    #[test]
    fn test_options_validate() {
        assert!(ExportOptions::default().validate().is_ok());
        assert!(matches!(
            ExportOptions::default().with_size(0, 10).validate(),
            Err(ExportError::InvalidCanvas { width: 0, height: 10 })
        ));
        assert!(matches!(
            ExportOptions::default().with_quality(101).validate(),
            Err(ExportError::InvalidQuality { quality: 101 })
        ));
    }

    #[test]
    fn test_export_every_format() {
        let project = quartet();
        let seats = layout_project(&project).unwrap();

        let svg = export(&seats, &project, &ExportOptions::default().with_format(ExportFormat::Svg)).unwrap();
        assert!(String::from_utf8(svg).unwrap().contains("<circle"));

        let pdf = export(&seats, &project, &ExportOptions::default().with_format(ExportFormat::Pdf)).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let png = export(&seats, &project, &ExportOptions::default()).unwrap();
        assert!(png.starts_with(&[137, 80, 78, 71]));

        let jpeg = export(&seats, &project, &ExportOptions::default().with_format(ExportFormat::Jpeg)).unwrap();
        assert!(jpeg.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn test_png_uses_requested_size() {
        let project = quartet();
        let seats = layout_project(&project).unwrap();
        let options = ExportOptions::default().with_size(300, 120);
        let png = export(&seats, &project, &options).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 120));
    }

    #[test]
    fn test_export_empty_layout() {
        let project = Project::new();
        let svg = export_svg(&[], &project, &ExportOptions::default()).unwrap();
        assert!(svg.contains("viewBox=\"0 0 32 32\""));
    }
}
