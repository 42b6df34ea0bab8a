//! Drawing a particle field onto the terminal grid.
//!
//! The motion engine works in virtual pixels. Each terminal cell stands in
//! for a `width_px × height_px` block, so a particle is drawn in the cell
//! containing its top-left corner.

use mathdrift_core::{Bounds, Vec2};
use mathdrift_motion::ParticleField;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Rect, Size},
    style::{Color, Style},
    widgets::Widget,
};

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width_px: u16,
    pub height_px: u16,
}

impl CellSize {
    pub fn new(width_px: u16, height_px: u16) -> Self {
        Self {
            width_px: width_px.max(1),
            height_px: height_px.max(1),
        }
    }

    /// Pixel bounds covered by a terminal of `size` cells.
    pub fn bounds_for(self, size: Size) -> Bounds {
        Bounds::new(
            f32::from(size.width) * f32::from(self.width_px),
            f32::from(size.height) * f32::from(self.height_px),
        )
    }

    /// Column and row of the cell containing `pos`.
    pub fn cell_of(self, pos: Vec2) -> (u16, u16) {
        let col = (pos.x / f32::from(self.width_px)).floor();
        let row = (pos.y / f32::from(self.height_px)).floor();
        // Float to int casts saturate, so negatives land on 0
        (col as u16, row as u16)
    }
}

/// Floating symbols drawn straight into the buffer, one cell per particle.
///
/// Cells are addressed individually, so a double-width glyph never shifts
/// the glyphs after it on the same row. Particles outside the area are
/// skipped; later particles overwrite earlier ones sharing a cell.
#[derive(Debug, Clone, Copy)]
pub struct SymbolLayer<'a> {
    field: &'a ParticleField,
    cell: CellSize,
    style: Style,
}

impl<'a> SymbolLayer<'a> {
    pub fn new(field: &'a ParticleField, cell: CellSize, color: Color) -> Self {
        Self {
            field,
            cell,
            style: Style::new().fg(color),
        }
    }
}

impl Widget for SymbolLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (glyph, pos) in self.field.iter() {
            let (col, row) = self.cell.cell_of(pos);
            if col >= area.width || row >= area.height {
                continue;
            }
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_char(glyph).set_style(self.style);
            }
        }
    }
}

/// Render the floating symbols across `area`.
pub fn render_symbols(
    frame: &mut Frame,
    area: Rect,
    field: &ParticleField,
    cell: CellSize,
    color: Color,
) {
    frame.render_widget(SymbolLayer::new(field, cell, color), area);
}
