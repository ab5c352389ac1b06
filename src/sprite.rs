/*
 *  sprite.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Packed sprite descriptors and the blit modes that composite them
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

use embedded_graphics::pixelcolor::BinaryColor;

use crate::bitplane::BitPlane;
use crate::canvas::{Canvas, inverse};

/// Sprite geometry: pixel size and the anchor offset that every blit adds
/// to the caller's destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteInfo {
    pub width: i32,
    pub height: i32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl SpriteInfo {
    pub const fn new(width: i32, height: i32, offset_x: i32, offset_y: i32) -> Self {
        Self { width, height, offset_x, offset_y }
    }

    /// Right edge of the anchored box.
    pub const fn right(&self) -> i32 {
        self.offset_x + self.width
    }

    /// Bottom edge of the anchored box.
    pub const fn bottom(&self) -> i32 {
        self.offset_y + self.height
    }
}

/// A read-only packed bitmap. A cleared bit is ink.
#[derive(Debug, Clone, Copy)]
pub struct Sprite<'a> {
    pub info: SpriteInfo,
    plane: BitPlane<&'a [u8]>,
}

impl<'a> Sprite<'a> {
    pub fn new(info: SpriteInfo, plane: BitPlane<&'a [u8]>) -> Self {
        Self { info, plane }
    }

    pub const fn from_static(info: SpriteInfo, bits: &'a [u8]) -> Self {
        Self {
            info,
            plane: BitPlane::from_static(bits, info.width as usize, info.height as usize),
        }
    }

    /// The packed blob as supplied.
    pub fn bytes(&self) -> &'a [u8] {
        self.plane.into_inner()
    }

    /// Ink at `(row, col)`; anything outside the blob is background.
    #[inline]
    pub fn is_ink(&self, row: i32, col: i32) -> bool {
        self.plane.get(row as usize, col as usize) == Some(false)
    }

    fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (w, h) = (self.info.width, self.info.height);
        (0..h).flat_map(move |row| (0..w).map(move |col| (row, col)))
    }
}

/// A sprite paired with an alpha mask of the same geometry. A set mask bit
/// is opaque.
#[derive(Debug, Clone, Copy)]
pub struct AlphaSprite<'a> {
    pub sprite: Sprite<'a>,
    mask: BitPlane<&'a [u8]>,
}

impl<'a> AlphaSprite<'a> {
    pub const fn from_static(info: SpriteInfo, bits: &'a [u8], mask: &'a [u8]) -> Self {
        Self {
            sprite: Sprite::from_static(info, bits),
            mask: BitPlane::from_static(mask, info.width as usize, info.height as usize),
        }
    }

    pub fn info(&self) -> SpriteInfo {
        self.sprite.info
    }

    pub fn mask_bytes(&self) -> &'a [u8] {
        self.mask.into_inner()
    }

    #[inline]
    pub fn is_opaque(&self, row: i32, col: i32) -> bool {
        self.mask.get(row as usize, col as usize) == Some(true)
    }
}

/// How a whole sprite is laid down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    /// Ink only, existing content shows through.
    Transparent,
    /// Ink plus explicit background over the bounding box.
    Opaque,
    /// Transparent at twice the size.
    Double,
}

impl Canvas {
    /// Transparent blit at `(x + offset_x, y + offset_y)`.
    pub fn draw_sprite(&mut self, x: i32, y: i32, sprite: &Sprite<'_>, color: BinaryColor) {
        let (ox, oy) = (x + sprite.info.offset_x, y + sprite.info.offset_y);
        for (row, col) in sprite.pixels() {
            if sprite.is_ink(row, col) {
                self.set_pixel(ox + col, oy + row, color);
            }
        }
    }

    /// Opaque blit: background bits are written as the inverse color.
    pub fn draw_sprite_opaque(&mut self, x: i32, y: i32, sprite: &Sprite<'_>, color: BinaryColor) {
        let (ox, oy) = (x + sprite.info.offset_x, y + sprite.info.offset_y);
        for (row, col) in sprite.pixels() {
            let c = if sprite.is_ink(row, col) { color } else { inverse(color) };
            self.set_pixel(ox + col, oy + row, c);
        }
    }

    /// Opaque blit restricted to the pixels the mask marks opaque.
    pub fn draw_sprite_alpha(&mut self, x: i32, y: i32, sprite: &AlphaSprite<'_>, color: BinaryColor) {
        let info = sprite.info();
        let (ox, oy) = (x + info.offset_x, y + info.offset_y);
        for (row, col) in sprite.sprite.pixels() {
            if !sprite.is_opaque(row, col) {
                continue;
            }
            let c = if sprite.sprite.is_ink(row, col) { color } else { inverse(color) };
            self.set_pixel(ox + col, oy + row, c);
        }
    }

    /// Transparent blit with every source pixel grown to a 2x2 block.
    pub fn draw_sprite_double(&mut self, x: i32, y: i32, sprite: &Sprite<'_>, color: BinaryColor) {
        let (ox, oy) = (x + sprite.info.offset_x, y + sprite.info.offset_y);
        for (row, col) in sprite.pixels() {
            if sprite.is_ink(row, col) {
                self.draw_vertical_line(ox + col * 2, oy + row * 2, 2, color);
                self.draw_vertical_line(ox + col * 2 + 1, oy + row * 2, 2, color);
            }
        }
    }

    pub fn draw_sprite_blend(
        &mut self,
        x: i32,
        y: i32,
        sprite: &Sprite<'_>,
        blend: Blend,
        color: BinaryColor,
    ) {
        match blend {
            Blend::Transparent => self.draw_sprite(x, y, sprite, color),
            Blend::Opaque => self.draw_sprite_opaque(x, y, sprite, color),
            Blend::Double => self.draw_sprite_double(x, y, sprite, color),
        }
    }

    /// Transparent blit of the `width` x `height` window at
    /// `(src_x, src_y)` of a packed bitmap whose rows are `stride` bits
    /// long. Lands at `(x, y)` exactly, there is no anchor offset.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_bitmap_region(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &BitPlane<&[u8]>,
        stride: usize,
        src_x: usize,
        src_y: usize,
        width: usize,
        height: usize,
        color: BinaryColor,
    ) {
        for j in 0..height {
            for i in 0..width {
                if bitmap.get_strided(stride, src_y + j, src_x + i) == Some(false) {
                    self.set_pixel(x + i as i32, y + j as i32, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BACKGROUND, INK};

    // 4x2: ink on the diagonal-ish pattern
    // row 0: X . . X    row 1: . X X .
    // bits (1 = background): 0110 1001
    const CHECK_BITS: [u8; 1] = [0b0110_1001];
    const CHECK: Sprite<'static> = Sprite::from_static(SpriteInfo::new(4, 2, 0, 0), &CHECK_BITS);

    #[test]
    fn test_transparent_blit_keeps_background() {
        let mut canvas = Canvas::new(8, 4);
        canvas.draw_line(0, 0, 7, 0, INK);
        canvas.draw_sprite(0, 0, &CHECK, INK);
        // row 0 was all ink and stays that way
        for x in 0..8 {
            assert!(canvas.get_pixel(x, 0, INK));
        }
        assert!(canvas.get_pixel(1, 1, INK));
        assert!(!canvas.get_pixel(0, 1, INK));
    }

    #[test]
    fn test_offset_is_added() {
        let info = SpriteInfo::new(4, 2, 3, 1);
        let sprite = Sprite::from_static(info, &CHECK_BITS);
        let mut canvas = Canvas::new(16, 8);
        canvas.draw_sprite(2, 2, &sprite, INK);
        assert!(canvas.get_pixel(5, 3, INK));
        assert!(canvas.get_pixel(8, 3, INK));
        assert!(canvas.get_pixel(6, 4, INK));
        assert_eq!(canvas.count_ink(), 4);
    }

    #[test]
    fn test_opaque_blit_erases_box() {
        let mut canvas = Canvas::new(8, 4);
        canvas.clear(INK);
        canvas.draw_sprite_opaque(0, 0, &CHECK, INK);
        assert!(canvas.get_pixel(0, 0, INK));
        assert!(canvas.get_pixel(1, 0, BACKGROUND));
        assert!(canvas.get_pixel(0, 1, BACKGROUND));
        // outside the box untouched
        assert!(canvas.get_pixel(4, 0, INK));
        assert!(canvas.get_pixel(0, 2, INK));
    }

    #[test]
    fn test_alpha_skips_transparent_mask() {
        // mask: only the left half of each row is opaque
        const MASK: [u8; 1] = [0b1100_1100];
        let sprite = AlphaSprite::from_static(SpriteInfo::new(4, 2, 0, 0), &CHECK_BITS, &MASK);

        let mut canvas = Canvas::new(8, 2);
        canvas.dither_rectangle(0, 0, 8, 1, INK);
        let sentinel = canvas.clone();
        canvas.draw_sprite_alpha(0, 0, &sprite, INK);

        for (row, col) in [(0, 2), (0, 3), (1, 2), (1, 3)] {
            assert_eq!(
                canvas.get_pixel(col, row, INK),
                sentinel.get_pixel(col, row, INK),
                "masked pixel ({col},{row}) changed"
            );
        }
        assert!(canvas.get_pixel(0, 0, INK));
        assert!(canvas.get_pixel(1, 0, BACKGROUND));
        assert!(canvas.get_pixel(1, 1, INK));
    }

    #[test]
    fn test_double_blit_blocks() {
        let mut canvas = Canvas::new(16, 8);
        canvas.draw_sprite_double(0, 0, &CHECK, INK);
        assert_eq!(canvas.count_ink(), 4 * 4);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1), (6, 0), (7, 1), (2, 2), (5, 3)] {
            assert!(canvas.get_pixel(x, y, INK), "({x},{y})");
        }
        assert!(!canvas.get_pixel(2, 0, INK));
    }

    #[test]
    fn test_bitmap_region_window() {
        // strip of two 4x2 glyphs, stride 8
        let bits = [0b0110_1111, 0b1001_0000];
        let plane = BitPlane::new(&bits[..], 8, 2);
        let mut canvas = Canvas::new(8, 4);
        canvas.draw_bitmap_region(1, 1, &plane, 8, 4, 0, 4, 2, INK);
        // second glyph: row 0 empty, row 1 full
        assert_eq!(canvas.count_ink(), 4);
        for x in 1..5 {
            assert!(canvas.get_pixel(x, 2, INK));
        }
    }

    #[test]
    fn test_truncated_blob_draws_nothing_past_end() {
        let info = SpriteInfo::new(8, 4, 0, 0);
        let sprite = Sprite::from_static(info, &[0x00]);
        let mut canvas = Canvas::new(8, 4);
        canvas.draw_sprite(0, 0, &sprite, INK);
        assert_eq!(canvas.count_ink(), 8);
    }

    #[test]
    fn test_info_edges() {
        let info = SpriteInfo::new(36, 22, 2, 4);
        assert_eq!(info.right(), 38);
        assert_eq!(info.bottom(), 26);
    }
}
