/*
 *  canvas.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Packed 1bpp drawing surface with rotation and inversion
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::bitplane::{BitPlane, packed_len};
use crate::display::error::DisplayError;
use crate::sprite::{Sprite, SpriteInfo};

/// Ink (black on paper).
pub const INK: BinaryColor = BinaryColor::On;
/// Background (paper white).
pub const BACKGROUND: BinaryColor = BinaryColor::Off;

/// Opposite color, used by the opaque blits and rectangle inversion.
#[inline]
pub fn inverse(color: BinaryColor) -> BinaryColor {
    match color {
        BinaryColor::On => BinaryColor::Off,
        BinaryColor::Off => BinaryColor::On,
    }
}

/// Canvas rotation, only 90° increments supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Rotate0 => 0,
            Rotation::Rotate90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::Rotate270 => 270,
        }
    }

    /// Quarter turns swap the logical axes.
    pub fn is_transposed(self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = DisplayError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Rotate0),
            90 => Ok(Rotation::Rotate90),
            180 => Ok(Rotation::Rotate180),
            270 => Ok(Rotation::Rotate270),
            _ => Err(DisplayError::InvalidRotation(degrees)),
        }
    }
}

/// A packed monochrome canvas.
///
/// The width is always a multiple of 8 and the buffer holds exactly
/// `width * height / 8` bytes. A cleared bit is ink unless the canvas is
/// inverted. Every write outside the surface is silently dropped.
#[derive(Debug, Clone)]
pub struct Canvas {
    plane: BitPlane<Vec<u8>>,
    width: i32,
    height: i32,
    rotation: Rotation,
    inverted: bool,
}

/// 1 byte = 8 pixels, so the width is padded up to a multiple of 8
#[inline]
fn aligned_width(width: u32) -> u32 {
    width.div_ceil(8) * 8
}

impl Canvas {
    /// Allocate a canvas cleared to background.
    pub fn new(width: u32, height: u32) -> Self {
        let width = aligned_width(width);
        Self {
            // background is a set bit under the default convention
            plane: BitPlane::filled(width as usize, height as usize, true),
            width: width as i32,
            height: height as i32,
            rotation: Rotation::Rotate0,
            inverted: false,
        }
    }

    /// Off-screen scratch surface for composing fixed-size artwork before it
    /// is copied onto the frame. Always uses the default color convention so
    /// it can be read back as a sprite.
    pub fn scratch(width: u32, height: u32) -> Self {
        Self::new(width, height)
    }

    /// Wrap a caller-supplied buffer. Contents are kept as they are.
    pub fn with_buffer(buffer: Vec<u8>, width: u32, height: u32) -> Result<Self, DisplayError> {
        let width = aligned_width(width);
        let expected = packed_len(width as usize, height as usize);
        if buffer.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: buffer.len() });
        }
        Ok(Self {
            plane: BitPlane::new(buffer, width as usize, height as usize),
            width: width as i32,
            height: height as i32,
            rotation: Rotation::Rotate0,
            inverted: false,
        })
    }

    /// Physical width in pixels (multiple of 8).
    pub fn width(&self) -> u32 { self.width as u32 }

    /// Physical height in pixels.
    pub fn height(&self) -> u32 { self.height as u32 }

    /// Size in the rotated drawing frame.
    pub fn logical_size(&self) -> (u32, u32) {
        if self.rotation.is_transposed() {
            (self.height(), self.width())
        } else {
            (self.width(), self.height())
        }
    }

    pub fn rotation(&self) -> Rotation { self.rotation }

    /// Only affects subsequent drawing.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn is_inverted(&self) -> bool { self.inverted }

    /// Flip the ink/background bit convention for subsequent reads and writes.
    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    /// The packed frame, `width * height / 8` bytes.
    pub fn buffer(&self) -> &[u8] {
        self.plane.bytes()
    }

    /// Raw bit that represents `color` under the current convention.
    #[inline]
    fn stored_bit(&self, color: BinaryColor) -> bool {
        (color == INK) == self.inverted
    }

    /// Set every pixel to `color`.
    pub fn clear(&mut self, color: BinaryColor) {
        let bit = self.stored_bit(color);
        self.plane.fill(bit);
    }

    /// Write a pixel in buffer coordinates, ignoring rotation.
    #[inline]
    pub fn set_pixel_absolute(&mut self, x: i32, y: i32, color: BinaryColor) {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return;
        }
        let bit = self.stored_bit(color);
        self.plane.set(y as usize, x as usize, bit);
    }

    /// Whether the pixel at buffer coordinates currently equals `color`.
    /// Out-of-range reads are `false`.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32, color: BinaryColor) -> bool {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return false;
        }
        self.plane
            .get(y as usize, x as usize)
            .is_some_and(|bit| bit == self.stored_bit(color))
    }

    /// Write a pixel in the rotated drawing frame.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        let (w, h) = (self.width, self.height);
        match self.rotation {
            Rotation::Rotate0 => {
                if x < 0 || x >= w || y < 0 || y >= h {
                    return;
                }
                self.set_pixel_absolute(x, y, color);
            }
            Rotation::Rotate90 => {
                if x < 0 || x >= h || y < 0 || y >= w {
                    return;
                }
                self.set_pixel_absolute(w - y, x, color);
            }
            Rotation::Rotate180 => {
                if x < 0 || x >= w || y < 0 || y >= h {
                    return;
                }
                self.set_pixel_absolute(w - x, h - y, color);
            }
            Rotation::Rotate270 => {
                if x < 0 || x >= h || y < 0 || y >= w {
                    return;
                }
                self.set_pixel_absolute(y, h - x, color);
            }
        }
    }

    /// View the whole canvas as a transparent sprite anchored at (0, 0).
    pub fn as_sprite(&self) -> Sprite<'_> {
        Sprite::new(
            SpriteInfo::new(self.width, self.height, 0, 0),
            self.plane.as_view(),
        )
    }

    /// Buffer rows from the top and from the bottom that hold no ink at all.
    /// Rotation is not applied.
    pub fn blank_rows(&self) -> (u32, u32) {
        let background = self.stored_bit(BACKGROUND);
        let blank = |row: i32| self.plane.row_is(row as usize, background);
        let top = (0..self.height).take_while(|&row| blank(row)).count() as u32;
        let bottom = (0..self.height).rev().take_while(|&row| blank(row)).count() as u32;
        (top, bottom)
    }

    /// Number of ink pixels, mostly for tests and logging.
    pub fn count_ink(&self) -> usize {
        let mut n = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get_pixel(x, y, INK) {
                    n += 1;
                }
            }
        }
        n
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        let (w, h) = self.logical_size();
        Size::new(w, h)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            self.set_pixel(p.x, p.y, c);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Canvas::clear(self, color);
        Ok(())
    }
}
