//! Engine state shared by the JavaScript binding.

use tutti_core::errors::TuttiError;
use tutti_core::options::LayoutOptions;
use tutti_core::project::Project;
use tutti_export::{ExportFormat, ExportOptions};
use tutti_layout::{apply_downstage_orientation, layout_dimensions, layout_project, unpositioned_members, Seat};

use crate::types::{DiagnosticJs, DimensionsJs, FreeMemberJs};

/// Holds the last loaded project and its cached layout.
#[derive(Debug, Default)]
pub struct Engine {
    project: Option<Project>,
    last_seats: Option<Vec<Seat>>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Replace the current project with a JSON snapshot.
    ///
    /// Settings embedded in the snapshot replace any set through
    /// [`Engine::set_options`].
    pub fn load_project(&mut self, json: &str) -> Result<(), TuttiError> {
        let project = Project::from_json(json)?;
        project.settings.validate()?;

        for diagnostic in project.diagnostics() {
            tracing::warn!(?diagnostic, "project snapshot is inconsistent");
        }

        self.project = Some(project);
        self.last_seats = None;
        Ok(())
    }

    pub fn set_options(&mut self, options: LayoutOptions) -> Result<(), TuttiError> {
        options.validate()?;
        let project = self.project.as_mut().ok_or(TuttiError::NoProject)?;
        project.settings = options;
        self.last_seats = None;
        Ok(())
    }

    /// Seats in display order, oriented per `downstageTop`.
    ///
    /// The result is cached until the project or its options change.
    pub fn layout(&mut self) -> Result<&[Seat], TuttiError> {
        let project = self.project.as_ref().ok_or(TuttiError::NoProject)?;
        let seats = match self.last_seats.take() {
            Some(seats) => seats,
            None => {
                let seats = layout_project(project)?;
                apply_downstage_orientation(seats, project.settings.downstage_top)
            }
        };
        Ok(self.last_seats.insert(seats).as_slice())
    }

    pub fn dimensions(&mut self) -> Result<DimensionsJs, TuttiError> {
        self.layout()?;
        let (project, seats) = self.current()?;
        let [width, height] = layout_dimensions(seats, project.settings.seat_size);
        Ok(DimensionsJs { width, height })
    }

    pub fn export(&mut self, options: &ExportOptions) -> Result<Vec<u8>, TuttiError> {
        self.layout()?;
        let (project, seats) = self.current()?;
        Ok(tutti_export::export(seats, project, options)?)
    }

    pub fn export_svg(&mut self) -> Result<String, TuttiError> {
        self.layout()?;
        let (project, seats) = self.current()?;
        Ok(tutti_export::export_svg(seats, project, &ExportOptions::default())?)
    }

    /// Export a raster or PDF image; `quality` only affects JPEG.
    pub fn export_image(&mut self, format: &str, quality: Option<u8>) -> Result<Vec<u8>, TuttiError> {
        let format: ExportFormat = format.parse()?;
        let mut options = ExportOptions::default().with_format(format);
        if let Some(quality) = quality {
            options = options.with_quality(quality);
        }
        self.export(&options)
    }

    pub fn diagnostics(&self) -> Result<Vec<DiagnosticJs>, TuttiError> {
        let project = self.project.as_ref().ok_or(TuttiError::NoProject)?;
        Ok(project.diagnostics().into_iter().map(DiagnosticJs::from).collect())
    }

    pub fn free_members(&self) -> Result<Vec<FreeMemberJs>, TuttiError> {
        let project = self.project.as_ref().ok_or(TuttiError::NoProject)?;
        Ok(unpositioned_members(project).into_iter().map(FreeMemberJs::from).collect())
    }

    fn current(&self) -> Result<(&Project, &[Seat]), TuttiError> {
        let project = self.project.as_ref().ok_or(TuttiError::NoProject)?;
        Ok((project, self.last_seats.as_deref().unwrap_or(&[])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutti_core::errors::ExportError;

    const ENSEMBLE: &str = r##"{
        "regions": [{"id": "stage", "name": "Stage", "curvedLayout": false}],
        "sections": [
            {"id": "vn", "name": "Violins", "region": "stage", "rowSettings": [3, 3], "color": "#1d4ed8"},
            {"id": "ghost", "name": "Ghost", "region": "pit", "rowSettings": [2]}
        ],
        "members": [
            {"id": "ada", "name": "Ada Lovelace", "section": "vn", "order": 0},
            {"id": "bo", "name": "Bo Diddley", "section": "vn", "order": 4},
            {"id": "cy", "name": "Cy Twombly", "section": "vn", "order": 4},
            {"id": "free", "name": "Free Agent", "section": "vn", "x": 10, "y": 20}
        ]
    }"##;

    fn loaded() -> Engine {
        let mut engine = Engine::new();
        engine.load_project(ENSEMBLE).unwrap();
        engine
    }

    #[test]
    fn test_engine_new() {
        let engine = Engine::new();
        assert!(engine.project().is_none());
    }

    #[test]
    fn test_requires_project() {
        let mut engine = Engine::new();
        assert!(matches!(engine.layout(), Err(TuttiError::NoProject)));
        assert!(matches!(engine.diagnostics(), Err(TuttiError::NoProject)));
        assert!(matches!(
            engine.set_options(LayoutOptions::default()),
            Err(TuttiError::NoProject)
        ));
    }

    #[test]
    fn test_invalid_json() {
        let mut engine = Engine::new();
        assert!(matches!(engine.load_project("{"), Err(TuttiError::Model(_))));
        assert!(engine.project().is_none());
    }

    #[test]
    fn test_layout_back_rows_first() {
        let mut engine = loaded();
        let seats = engine.layout().unwrap();
        assert_eq!(seats.len(), 6);
        // Downstage at the bottom: the back row is emitted first, at the top
        assert_eq!(seats[0].row, 1);
        assert_eq!(seats[0].y, 0.0);
        assert_eq!(seats[5].row, 0);
        assert_eq!(seats[5].y, 64.0);
    }

    #[test]
    fn test_set_options_invalidates_layout() {
        let mut engine = loaded();
        engine.layout().unwrap();

        let options = LayoutOptions::default().with_downstage_top(true);
        engine.set_options(options).unwrap();
        let seats = engine.layout().unwrap();
        assert_eq!(seats[0].row, 0);
        assert_eq!(seats[0].y, 0.0);
    }

    #[test]
    fn test_rejects_invalid_options() {
        let mut engine = loaded();
        let options = LayoutOptions::default().with_seat_size(0.0);
        assert!(matches!(engine.set_options(options), Err(TuttiError::Layout(_))));
        assert_eq!(engine.project().unwrap().settings.seat_size, 32.0);
    }

    #[test]
    fn test_dimensions() {
        let mut engine = loaded();
        let dims = engine.dimensions().unwrap();
        assert_eq!(dims.width, 160.0);
        assert_eq!(dims.height, 96.0);
    }

    #[test]
    fn test_diagnostics() {
        let engine = loaded();
        let diagnostics = engine.diagnostics().unwrap();
        assert_eq!(diagnostics.len(), 2);

        let orphan = diagnostics.iter().find(|d| d.kind == "orphanedSection").unwrap();
        assert_eq!(orphan.section, "ghost");
        assert_eq!(orphan.region.as_deref(), Some("pit"));

        let duplicate = diagnostics.iter().find(|d| d.kind == "duplicateOrder").unwrap();
        assert_eq!(duplicate.order, Some(4));
        assert_eq!(duplicate.members, vec!["bo", "cy"]);
        assert_eq!(duplicate.message, "Members bo, cy share seat 4 in section vn");
    }

    #[test]
    fn test_free_members() {
        let engine = loaded();
        let free = engine.free_members().unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, "free");
        assert_eq!((free[0].x, free[0].y), (10.0, 20.0));
    }

    #[test]
    fn test_export_svg_and_images() {
        let mut engine = loaded();
        let svg = engine.export_svg().unwrap();
        assert!(svg.contains("viewBox=\"0 0 160 96\""));

        let png = engine.export_image("png", None).unwrap();
        assert!(png.starts_with(&[137, 80, 78, 71]));

        let jpeg = engine.export_image("jpg", Some(60)).unwrap();
        assert!(jpeg.starts_with(&[0xFF, 0xD8]));

        let pdf = engine.export_image("pdf", None).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_rejects_bad_input() {
        let mut engine = loaded();
        assert!(matches!(
            engine.export_image("gif", None),
            Err(TuttiError::Export(ExportError::UnsupportedFormat { .. }))
        ));
        assert!(matches!(
            engine.export_image("jpeg", Some(0)),
            Err(TuttiError::Export(ExportError::InvalidQuality { quality: 0 }))
        ));
    }
}
