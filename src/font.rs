/*
 *  font.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Bitmap fonts: glyph lookup, measuring and text layout
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

//! A font is one packed strip holding every glyph side by side, plus a flat
//! integer table:
//!
//! ```text
//! [count, bitmap_width, height, (code, source_x, width, spacing) * count]
//! ```

use core::fmt;

use arrayvec::ArrayString;
use embedded_graphics::pixelcolor::BinaryColor;
use log::{trace, warn};

use crate::bitplane::BitPlane;
use crate::canvas::Canvas;

const HEADER: usize = 3;
const RECORD: usize = 4;

/// One resolved glyph record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub code: u32,
    pub source_x: i32,
    pub width: i32,
    pub spacing: i32,
}

impl Glyph {
    /// Horizontal cursor advance after drawing this glyph.
    pub fn advance(&self) -> i32 {
        self.width + self.spacing
    }
}

/// Horizontal placement of a text run relative to the x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    table: &'a [i32],
    bitmap: &'a [u8],
}

impl<'a> Font<'a> {
    pub const fn from_static(table: &'a [i32], bitmap: &'a [u8]) -> Self {
        Self { table, bitmap }
    }

    fn header(&self, i: usize) -> usize {
        self.table.get(i).copied().unwrap_or(0).max(0) as usize
    }

    /// Number of glyph records, capped by what the table actually holds.
    pub fn len(&self) -> usize {
        let available = self.table.len().saturating_sub(HEADER) / RECORD;
        self.header(0).min(available)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the glyph strip in pixels, also its row stride.
    pub fn bitmap_width(&self) -> usize {
        self.header(1)
    }

    /// The packed glyph strip.
    pub fn bitmap(&self) -> &'a [u8] {
        self.bitmap
    }

    /// Line height in pixels.
    pub fn height(&self) -> i32 {
        self.header(2) as i32
    }

    pub fn glyph(&self, index: usize) -> Option<Glyph> {
        if index >= self.len() {
            return None;
        }
        let at = HEADER + index * RECORD;
        let rec = self.table.get(at..at + RECORD)?;
        Some(Glyph {
            code: rec[0].max(0) as u32,
            source_x: rec[1],
            width: rec[2],
            spacing: rec[3],
        })
    }

    pub fn glyphs(&self) -> impl Iterator<Item = Glyph> + '_ {
        (0..self.len()).filter_map(|i| self.glyph(i))
    }

    /// Index of the glyph for `c`, scanning the table in order.
    pub fn find_glyph(&self, c: char) -> Option<usize> {
        let code = c as u32;
        self.glyphs().position(|g| g.code == code)
    }

    fn resolve(&self, c: char) -> Option<Glyph> {
        let found = self.find_glyph(c).and_then(|i| self.glyph(i));
        if found.is_none() {
            trace!("no glyph for {:?}, skipped", c);
        }
        found
    }

    /// Pixel width of `text`; characters without a glyph add nothing.
    pub fn measure_width(&self, text: &str) -> i32 {
        text.chars().filter_map(|c| self.resolve(c)).map(|g| g.advance()).sum()
    }

    fn strip(&self) -> BitPlane<&'a [u8]> {
        BitPlane::new(self.bitmap, self.bitmap_width(), self.height() as usize)
    }
}

impl Canvas {
    /// Lay `text` out left to right with its top-left corner at `(x, y)`.
    /// Returns the cursor position after the last glyph.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, font: &Font<'_>, color: BinaryColor) -> i32 {
        let strip = font.strip();
        let stride = font.bitmap_width();
        let height = font.height().max(0) as usize;
        let mut cursor = x;
        for glyph in text.chars().filter_map(|c| font.resolve(c)) {
            if glyph.width > 0 && glyph.source_x >= 0 {
                self.draw_bitmap_region(
                    cursor,
                    y,
                    &strip,
                    stride,
                    glyph.source_x as usize,
                    0,
                    glyph.width as usize,
                    height,
                    color,
                );
            }
            cursor += glyph.advance();
        }
        cursor
    }

    /// Like [`Canvas::draw_text`] with `x` as the left edge, the centre or
    /// the right edge of the run.
    pub fn draw_text_aligned(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        font: &Font<'_>,
        align: Align,
        color: BinaryColor,
    ) -> i32 {
        let left = match align {
            Align::Left => x,
            Align::Center => x - font.measure_width(text) / 2,
            Align::Right => x - font.measure_width(text),
        };
        self.draw_text(left, y, text, font, color)
    }
}

/// Writer that keeps whole chars up to the buffer capacity and drops the
/// rest.
struct Clip<'a, const CAP: usize> {
    text: &'a mut ArrayString<CAP>,
    clipped: bool,
}

impl<const CAP: usize> fmt::Write for Clip<'_, CAP> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.clipped || self.text.try_push(c).is_err() {
                self.clipped = true;
                break;
            }
        }
        Ok(())
    }
}

/// Format a short label into a stack buffer. Output past `CAP` bytes is
/// cut at a char boundary and reported.
pub fn label<const CAP: usize>(args: fmt::Arguments<'_>) -> ArrayString<CAP> {
    let mut text = ArrayString::new();
    let mut clip = Clip { text: &mut text, clipped: false };
    let failed = fmt::write(&mut clip, args).is_err();
    let clipped = clip.clipped;
    if failed {
        warn!("label formatting failed after {:?}", text.as_str());
    } else if clipped {
        warn!("label clipped to {} bytes: {:?}", CAP, text.as_str());
    }
    text
}
