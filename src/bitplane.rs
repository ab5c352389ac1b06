/*
 *  bitplane.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Bit-packed monochrome planes shared by canvas, sprites, masks and fonts
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

//! All packing math lives here.
//!
//! Pixels are linearised row-major as `p = row * width + col` and the bit for
//! `p` sits in byte `p / 8` under mask `0x80 >> (p % 8)`. Packing runs on
//! across row boundaries, rows are never padded. This is the layout the asset
//! tooling emits, so it must not change.

/// Number of bytes needed to hold `width * height` packed pixels.
#[inline]
pub const fn packed_len(width: usize, height: usize) -> usize {
    (width * height).div_ceil(8)
}

/// Byte index and bit mask for linear pixel index `p`.
#[inline]
pub const fn locate(p: usize) -> (usize, u8) {
    (p / 8, 0x80 >> (p % 8))
}

/// A packed 1bpp plane of `width` x `height` bits over any byte storage.
///
/// Borrowed planes (`BitPlane<&[u8]>`) describe read-only assets, owned
/// planes (`BitPlane<Vec<u8>>`) back a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPlane<B> {
    bits: B,
    width: usize,
    height: usize,
}

impl<'a> BitPlane<&'a [u8]> {
    /// Wrap a static asset blob. Usable in `const` / `static` items.
    pub const fn from_static(bits: &'a [u8], width: usize, height: usize) -> Self {
        Self { bits, width, height }
    }
}

impl<B> BitPlane<B> {
    pub fn new(bits: B, width: usize, height: usize) -> Self {
        Self { bits, width, height }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn into_inner(self) -> B {
        self.bits
    }
}

impl<B: AsRef<[u8]>> BitPlane<B> {
    pub fn bytes(&self) -> &[u8] {
        self.bits.as_ref()
    }

    /// Raw bit at linear index `p`. `None` when the index runs past the
    /// storage, which happens only with a truncated blob.
    #[inline]
    pub fn bit_at(&self, p: usize) -> Option<bool> {
        let (byte, mask) = locate(p);
        self.bits.as_ref().get(byte).map(|b| b & mask != 0)
    }

    /// Raw bit at `(row, col)`; `None` outside the plane.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.bit_at(row * self.width + col)
    }

    /// Raw bit at `(row, col)` of a plane whose rows are `stride` bits long,
    /// used for windows into a wider bitmap (font strips).
    #[inline]
    pub fn get_strided(&self, stride: usize, row: usize, col: usize) -> Option<bool> {
        self.bit_at(row * stride + col)
    }

    /// True when every bit of `row` equals `value`. Rows past the end
    /// never match.
    pub fn row_is(&self, row: usize, value: bool) -> bool {
        row < self.height && (0..self.width).all(|col| self.get(row, col) == Some(value))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> BitPlane<B> {
    /// Write the raw bit at `(row, col)`. Out-of-range writes are dropped.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if row >= self.height || col >= self.width {
            return;
        }
        let (byte, mask) = locate(row * self.width + col);
        if let Some(b) = self.bits.as_mut().get_mut(byte) {
            if value {
                *b |= mask;
            } else {
                *b &= !mask;
            }
        }
    }

    /// Set or clear every bit of the storage.
    pub fn fill(&mut self, value: bool) {
        self.bits.as_mut().fill(if value { 0xFF } else { 0x00 });
    }
}

impl BitPlane<Vec<u8>> {
    /// Allocate a plane with every bit set to `value`.
    pub fn filled(width: usize, height: usize, value: bool) -> Self {
        let byte = if value { 0xFF } else { 0x00 };
        Self { bits: vec![byte; packed_len(width, height)], width, height }
    }

    pub fn as_view(&self) -> BitPlane<&[u8]> {
        BitPlane { bits: self.bits.as_slice(), width: self.width, height: self.height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_is_msb_first() {
        assert_eq!(locate(0), (0, 0x80));
        assert_eq!(locate(7), (0, 0x01));
        assert_eq!(locate(8), (1, 0x80));
        assert_eq!(locate(13), (1, 0x04));
    }

    #[test]
    fn test_packing_runs_across_rows() {
        // 5 px wide: pixel (row 1, col 3) is p = 8 -> first bit of byte 1
        let bits = [0xFF, 0x7F];
        let plane = BitPlane::new(&bits[..], 5, 3);
        assert_eq!(plane.get(1, 3), Some(false));
        assert_eq!(plane.get(1, 2), Some(true));
        assert_eq!(plane.get(0, 0), Some(true));
    }

    #[test]
    fn test_out_of_range_get() {
        let plane = BitPlane::filled(8, 2, false);
        assert_eq!(plane.get(2, 0), None);
        assert_eq!(plane.get(0, 8), None);
    }

    #[test]
    fn test_truncated_blob_reads_none() {
        let bits = [0x00];
        let plane = BitPlane::new(&bits[..], 8, 4);
        assert_eq!(plane.get(0, 7), Some(false));
        assert_eq!(plane.get(1, 0), None);
    }

    #[test]
    fn test_set_and_clear() {
        let mut plane = BitPlane::filled(16, 2, true);
        plane.set(1, 9, false);
        assert_eq!(plane.bytes(), &[0xFF, 0xFF, 0xFF, 0xBF]);
        plane.set(1, 9, true);
        assert_eq!(plane.bytes(), &[0xFF; 4]);
        // dropped silently
        plane.set(5, 5, false);
        assert_eq!(plane.bytes(), &[0xFF; 4]);
    }

    #[test]
    fn test_strided_window() {
        // two 4x2 glyphs side by side in one 8 px strip
        let bits = [0b1111_0110, 0b1111_1001];
        let plane = BitPlane::new(&bits[..], 8, 2);
        assert_eq!(plane.get_strided(8, 0, 4 + 0), Some(false));
        assert_eq!(plane.get_strided(8, 0, 4 + 1), Some(true));
        assert_eq!(plane.get_strided(8, 1, 4 + 1), Some(false));
    }

    #[test]
    fn test_row_is() {
        let mut plane = BitPlane::filled(8, 3, true);
        plane.set(1, 4, false);
        assert!(plane.row_is(0, true));
        assert!(!plane.row_is(1, true));
        assert!(!plane.row_is(1, false));
        assert!(plane.row_is(2, true));
        assert!(!plane.row_is(3, true));
    }

    #[test]
    fn test_packed_len_rounds_up() {
        assert_eq!(packed_len(5, 3), 2);
        assert_eq!(packed_len(8, 8), 8);
        assert_eq!(packed_len(0, 10), 0);
    }
}
