//! Terminal surface built from half-block cells.

use paintfield_core::{Rgb, Rgba};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::surface::{RadialGradient, Surface, Viewport};

/// Logical pixels covered by one terminal column.
pub const CELL_WIDTH: f32 = 8.0;
/// Logical pixels covered by one terminal row.
pub const CELL_HEIGHT: f32 = 16.0;

/// Alpha below which a half-cell counts as unpainted.
const VISIBLE_ALPHA: f32 = 0.01;

/// Upper half block: foreground paints the top half, background the bottom.
const HALF_BLOCK: &str = "▀";

/// Convert a terminal cell to the logical pixel at its center.
pub fn cell_center(column: u16, row: u16) -> (f32, f32) {
    (
        (column as f32 + 0.5) * CELL_WIDTH,
        (row as f32 + 0.5) * CELL_HEIGHT,
    )
}

/// Logical viewport covering a terminal area of `columns` × `rows`.
pub fn viewport_for(columns: u16, rows: u16) -> Viewport {
    Viewport::new(columns as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT, 1.0)
}

/// A surface sampled at half-cell resolution.
///
/// Each terminal row holds two samples stacked vertically. The pixel ratio
/// sets how many sub-samples per axis are averaged into each half-cell.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    columns: u16,
    rows: u16,
    samples: u32,
    /// Half-cell colors, `rows * 2` lines of `columns` entries.
    cells: Vec<Rgba>,
    /// Opaque color that translucent paint is flattened onto.
    backdrop: Rgb,
}

impl Default for CellCanvas {
    fn default() -> Self {
        Self::new(Rgb::new(0, 0, 0))
    }
}

impl CellCanvas {
    pub fn new(backdrop: Rgb) -> Self {
        Self {
            columns: 0,
            rows: 0,
            samples: 1,
            cells: Vec::new(),
            backdrop,
        }
    }

    /// Change the color translucent paint is flattened onto.
    pub fn set_backdrop(&mut self, backdrop: Rgb) {
        self.backdrop = backdrop;
    }

    /// Grid size in terminal cells.
    pub fn grid(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    /// Number of half-cell lines, two per terminal row.
    pub fn half_rows(&self) -> u32 {
        u32::from(self.rows) * 2
    }

    /// Half-cell color, `half_row` counts two per terminal row.
    pub fn half_cell(&self, column: u16, half_row: u32) -> Option<Rgba> {
        if column >= self.columns || half_row >= self.half_rows() {
            return None;
        }
        self.cells
            .get(half_row as usize * self.columns as usize + column as usize)
            .copied()
    }

    /// Number of cells with any visible paint.
    pub fn painted_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.a >= VISIBLE_ALPHA).count()
    }

    /// Build styled lines for the grid.
    pub fn lines(&self) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|row| {
                let spans: Vec<Span> = (0..self.columns)
                    .map(|column| self.render_cell(column, row))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn render_cell(&self, column: u16, row: u16) -> Span<'static> {
        let top = self.half_cell(column, u32::from(row) * 2).unwrap_or_default();
        let bottom = self.half_cell(column, u32::from(row) * 2 + 1).unwrap_or_default();

        if top.a < VISIBLE_ALPHA && bottom.a < VISIBLE_ALPHA {
            return Span::raw(" ");
        }

        let fg: Color = top.flatten(self.backdrop).into();
        let bg: Color = bottom.flatten(self.backdrop).into();
        Span::styled(HALF_BLOCK, Style::new().fg(fg).bg(bg))
    }

    /// Logical size of one half-cell.
    fn half_cell_size() -> (f32, f32) {
        (CELL_WIDTH, CELL_HEIGHT / 2.0)
    }

    /// Average gradient color over a half-cell using `samples²` points.
    fn sample(&self, gradient: &RadialGradient, column: u16, half_row: u32) -> Rgba {
        let (w, h) = Self::half_cell_size();
        let n = self.samples.max(1);
        let step_x = w / n as f32;
        let step_y = h / n as f32;
        let origin_x = column as f32 * w;
        let origin_y = half_row as f32 * h;

        let mut acc = Rgba::TRANSPARENT;
        for sy in 0..n {
            for sx in 0..n {
                let px = origin_x + (sx as f32 + 0.5) * step_x;
                let py = origin_y + (sy as f32 + 0.5) * step_y;
                let c = gradient.color_at_point(px, py);
                acc.r += c.r * c.a;
                acc.g += c.g * c.a;
                acc.b += c.b * c.a;
                acc.a += c.a;
            }
        }
        if acc.a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let count = (n * n) as f32;
        Rgba {
            r: acc.r / acc.a,
            g: acc.g / acc.a,
            b: acc.b / acc.a,
            a: acc.a / count,
        }
    }
}

impl Surface for CellCanvas {
    fn resize(&mut self, viewport: Viewport) {
        self.columns = (viewport.width / CELL_WIDTH).floor() as u16;
        self.rows = (viewport.height / CELL_HEIGHT).floor() as u16;
        self.samples = viewport.pixel_ratio as u32;
        self.cells = vec![Rgba::TRANSPARENT; self.columns as usize * self.rows as usize * 2];
    }

    fn clear(&mut self) {
        self.cells.fill(Rgba::TRANSPARENT);
    }

    fn fill(&mut self, color: Rgba) {
        for cell in &mut self.cells {
            *cell = color.over(*cell);
        }
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        if self.cells.is_empty() || gradient.radius <= 0.0 {
            return;
        }
        let (w, h) = Self::half_cell_size();
        let r = gradient.radius;

        let c0 = ((gradient.cx - r) / w).floor().max(0.0) as u16;
        let c1 = (((gradient.cx + r) / w).ceil().max(0.0) as u16).min(self.columns);
        let h0 = ((gradient.cy - r) / h).floor().max(0.0) as u32;
        let h1 = (((gradient.cy + r) / h).ceil().max(0.0) as u32).min(self.half_rows());

        for half_row in h0..h1 {
            for column in c0..c1 {
                let src = self.sample(gradient, column, half_row);
                if src.a <= 0.0 {
                    continue;
                }
                let idx = half_row as usize * self.columns as usize + column as usize;
                self.cells[idx] = src.over(self.cells[idx]);
            }
        }
    }
}

impl Widget for &CellCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines()).render(area, buf);
    }
}
