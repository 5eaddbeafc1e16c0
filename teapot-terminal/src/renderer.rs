/// Character grid for terminal output
use crossterm::{cursor, style::Print, QueueableCommand};
use std::io::Write;
use teapot_core::{ndc_to_cell, Ndc};

/// On/off cell grid. Row 0 is the bottom of the picture.
pub struct CharGrid {
    columns: usize,
    rows: usize,
    glyph: char,
    cells: Vec<bool>,
}

impl CharGrid {
    pub fn new(columns: usize, rows: usize, glyph: char) -> Self {
        Self {
            columns,
            rows,
            glyph,
            cells: vec![false; columns * rows],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Light the cell under each point; points off the grid are ignored
    pub fn plot(&mut self, points: &[Ndc]) {
        for point in points {
            if let Some((x, y)) = ndc_to_cell(point, self.columns, self.rows) {
                self.cells[y * self.columns + x] = true;
            }
        }
    }

    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.columns + x]
    }

    /// Text lines in print order: the top row (`rows - 1`) first
    pub fn lines(&self) -> Vec<String> {
        (0..self.rows)
            .rev()
            .map(|y| {
                self.cells[y * self.columns..(y + 1) * self.columns]
                    .iter()
                    .map(|&lit| if lit { self.glyph } else { ' ' })
                    .collect()
            })
            .collect()
    }

    /// Queue the grid starting at the top-left corner of the screen
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (line_number, line) in self.lines().into_iter().enumerate() {
            writer.queue(cursor::MoveTo(0, line_number as u16))?;
            writer.queue(Print(line))?;
        }
        Ok(())
    }
}
