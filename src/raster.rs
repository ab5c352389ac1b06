/*
 *  raster.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Lines, rectangles, circles, inverted and dithered fills
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

use crate::canvas::{Canvas, inverse};

/// Normalised corners: `(min_x, min_y, max_x, max_y)`.
#[inline]
fn normalise(x0: i32, y0: i32, x1: i32, y1: i32) -> (i32, i32, i32, i32) {
    (x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
}

/// Bresenham circle walk, calls `plot(dx, dy)` once per step of the
/// quadrant sweep with `dx <= 0`.
fn circle_steps(radius: i32, mut plot: impl FnMut(i32, i32)) {
    let mut x_pos = -radius;
    let mut y_pos = 0;
    let mut err = 2 - 2 * radius;
    loop {
        plot(x_pos, y_pos);
        let mut e2 = err;
        if e2 <= y_pos {
            y_pos += 1;
            err += y_pos * 2 + 1;
            if -x_pos == y_pos && e2 <= x_pos {
                e2 = 0;
            }
        }
        if e2 > x_pos {
            x_pos += 1;
            err += x_pos * 2 + 1;
        }
        if x_pos > 0 {
            break;
        }
    }
}

impl Canvas {
    /// Bresenham line, both endpoints inclusive.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: BinaryColor) {
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > dy {
                err += dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// `len` pixels to the right of `(x, y)`.
    pub fn draw_horizontal_line(&mut self, x: i32, y: i32, len: i32, color: BinaryColor) {
        for i in x..x.saturating_add(len) {
            self.set_pixel(i, y, color);
        }
    }

    /// `len` pixels down from `(x, y)`.
    pub fn draw_vertical_line(&mut self, x: i32, y: i32, len: i32, color: BinaryColor) {
        for j in y..y.saturating_add(len) {
            self.set_pixel(x, j, color);
        }
    }

    /// Outline through two opposite corners, both inclusive.
    pub fn draw_rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: BinaryColor) {
        let (min_x, min_y, max_x, max_y) = normalise(x0, y0, x1, y1);
        let w = max_x - min_x + 1;
        let h = max_y - min_y + 1;
        self.draw_horizontal_line(min_x, min_y, w, color);
        self.draw_horizontal_line(min_x, max_y, w, color);
        self.draw_vertical_line(min_x, min_y, h, color);
        self.draw_vertical_line(max_x, min_y, h, color);
    }

    /// One vertical strip per column `min_x..=max_x`, each running from
    /// `min_y` up to but excluding `max_y`.
    pub fn draw_filled_rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: BinaryColor) {
        let (min_x, min_y, max_x, max_y) = normalise(x0, y0, x1, y1);
        for x in min_x..=max_x {
            self.draw_vertical_line(x, min_y, max_y - min_y, color);
        }
    }

    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: BinaryColor) {
        circle_steps(radius, |dx, dy| {
            self.set_pixel(cx - dx, cy + dy, color);
            self.set_pixel(cx + dx, cy + dy, color);
            self.set_pixel(cx + dx, cy - dy, color);
            self.set_pixel(cx - dx, cy - dy, color);
        });
    }

    pub fn draw_filled_circle(&mut self, cx: i32, cy: i32, radius: i32, color: BinaryColor) {
        circle_steps(radius, |dx, dy| {
            self.set_pixel(cx - dx, cy + dy, color);
            self.set_pixel(cx + dx, cy + dy, color);
            self.set_pixel(cx + dx, cy - dy, color);
            self.set_pixel(cx - dx, cy - dy, color);
            self.draw_horizontal_line(cx + dx, cy + dy, 2 * -dx + 1, color);
            self.draw_horizontal_line(cx + dx, cy - dy, 2 * -dx + 1, color);
        });
    }

    /// Flip every pixel of the region in buffer coordinates. Columns run
    /// `min_x..max_x`, rows `min_y..=max_y`. Applying it twice is a no-op.
    pub fn invert_rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (min_x, min_y, max_x, max_y) = normalise(x0, y0, x1, y1);
        for y in min_y..=max_y {
            for x in min_x..max_x {
                let current = if self.get_pixel(x, y, BinaryColor::On) {
                    BinaryColor::On
                } else {
                    BinaryColor::Off
                };
                self.set_pixel_absolute(x, y, inverse(current));
            }
        }
    }

    /// Sparse checkerboard of `color` over the region in buffer
    /// coordinates. A position is skipped when any 4-neighbour already
    /// holds `color`, so no two dots ever touch.
    pub fn dither_rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: BinaryColor) {
        let (min_x, min_y, max_x, max_y) = normalise(x0, y0, x1, y1);
        for y in min_y..=max_y {
            for x in min_x..max_x {
                if (x - min_x + y - min_y) % 2 != 0 {
                    continue;
                }
                let crowded = [(x + 1, y), (x, y + 1), (x - 1, y), (x, y - 1)]
                    .into_iter()
                    .any(|(nx, ny)| self.get_pixel(nx, ny, color));
                if !crowded {
                    self.set_pixel_absolute(x, y, color);
                }
            }
        }
    }

    /// Small solid up-pointing triangle with its base centred on `x`,
    /// sitting on row `y`.
    pub fn draw_arrow_up(&mut self, x: i32, y: i32, size: i32, color: BinaryColor) {
        let sx = x - size / 2;
        for i in 0..size {
            let h = if i > size / 2 { size - i } else { i + 1 };
            self.draw_vertical_line(sx + i, y - h, h, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BACKGROUND, INK, Rotation};

    fn ink_at(canvas: &Canvas) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..canvas.height() as i32 {
            for x in 0..canvas.width() as i32 {
                if canvas.get_pixel(x, y, INK) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_line_includes_endpoints() {
        let mut canvas = Canvas::new(16, 16);
        canvas.draw_line(2, 3, 10, 7, INK);
        assert!(canvas.get_pixel(2, 3, INK));
        assert!(canvas.get_pixel(10, 7, INK));
        assert_eq!(canvas.count_ink(), 9);
    }

    #[test]
    fn test_line_reversed_matches_pixel_count() {
        let mut a = Canvas::new(16, 16);
        let mut b = Canvas::new(16, 16);
        a.draw_line(1, 1, 12, 5, INK);
        b.draw_line(12, 5, 1, 1, INK);
        assert_eq!(a.count_ink(), b.count_ink());
    }

    #[test]
    fn test_single_point_line() {
        let mut canvas = Canvas::new(8, 8);
        canvas.draw_line(4, 4, 4, 4, INK);
        assert_eq!(ink_at(&canvas), vec![(4, 4)]);
    }

    #[test]
    fn test_hline_vline_lengths() {
        let mut canvas = Canvas::new(16, 16);
        canvas.draw_horizontal_line(2, 1, 5, INK);
        canvas.draw_vertical_line(0, 4, 3, INK);
        assert_eq!(canvas.count_ink(), 8);
        assert!(canvas.get_pixel(6, 1, INK));
        assert!(!canvas.get_pixel(7, 1, INK));
        assert!(canvas.get_pixel(0, 6, INK));
        assert!(!canvas.get_pixel(0, 7, INK));
    }

    #[test]
    fn test_rectangle_corner_order_irrelevant() {
        let mut a = Canvas::new(16, 16);
        let mut b = Canvas::new(16, 16);
        a.draw_rectangle(2, 3, 9, 12, INK);
        b.draw_rectangle(9, 12, 2, 3, INK);
        assert_eq!(a.buffer(), b.buffer());
        // perimeter of an 8x10 box
        assert_eq!(a.count_ink(), 2 * 8 + 2 * 10 - 4);
    }

    #[test]
    fn test_filled_rectangle_strips() {
        let mut canvas = Canvas::new(16, 16);
        canvas.draw_filled_rectangle(6, 8, 2, 4, INK);
        // 5 columns, rows 4..8
        assert_eq!(canvas.count_ink(), 5 * 4);
        assert!(canvas.get_pixel(2, 4, INK));
        assert!(canvas.get_pixel(6, 7, INK));
        assert!(!canvas.get_pixel(6, 8, INK));
    }

    #[test]
    fn test_circle_is_symmetric() {
        let mut canvas = Canvas::new(32, 32);
        canvas.draw_circle(16, 16, 6, INK);
        for (x, y) in ink_at(&canvas) {
            assert!(canvas.get_pixel(32 - x, y, INK));
            assert!(canvas.get_pixel(x, 32 - y, INK));
        }
        assert!(canvas.get_pixel(10, 16, INK));
        assert!(canvas.get_pixel(16, 22, INK));
        assert!(!canvas.get_pixel(16, 16, INK));
    }

    #[test]
    fn test_filled_circle_covers_outline() {
        let mut outline = Canvas::new(32, 32);
        let mut filled = Canvas::new(32, 32);
        outline.draw_circle(15, 15, 7, INK);
        filled.draw_filled_circle(15, 15, 7, INK);
        for (x, y) in ink_at(&outline) {
            assert!(filled.get_pixel(x, y, INK));
        }
        assert!(filled.get_pixel(15, 15, INK));
        assert!(filled.count_ink() > outline.count_ink());
    }

    #[test]
    fn test_invert_twice_restores() {
        let mut canvas = Canvas::new(24, 16);
        canvas.draw_line(0, 0, 23, 15, INK);
        canvas.draw_circle(12, 8, 5, INK);
        let before = canvas.buffer().to_vec();
        canvas.invert_rectangle(3, 2, 20, 12);
        assert_ne!(canvas.buffer(), &before[..]);
        canvas.invert_rectangle(20, 12, 3, 2);
        assert_eq!(canvas.buffer(), &before[..]);
    }

    #[test]
    fn test_invert_region_bounds() {
        let mut canvas = Canvas::new(16, 8);
        canvas.invert_rectangle(2, 1, 5, 3);
        // columns 2..5, rows 1..=3
        assert_eq!(canvas.count_ink(), 3 * 3);
        assert!(!canvas.get_pixel(5, 2, INK));
        assert!(canvas.get_pixel(2, 3, INK));
    }

    #[test]
    fn test_invert_uses_buffer_coordinates() {
        let mut canvas = Canvas::new(16, 8);
        canvas.set_rotation(Rotation::Rotate180);
        canvas.invert_rectangle(0, 0, 1, 0);
        assert!(canvas.get_pixel(0, 0, INK));
    }

    #[test]
    fn test_dither_never_touches() {
        let mut canvas = Canvas::new(32, 16);
        canvas.dither_rectangle(0, 0, 31, 15, INK);
        let dots = ink_at(&canvas);
        assert!(!dots.is_empty());
        for (x, y) in dots {
            assert_eq!((x + y) % 2, 0);
            assert!(!canvas.get_pixel(x + 1, y, INK));
            assert!(!canvas.get_pixel(x, y + 1, INK));
        }
    }

    #[test]
    fn test_dither_skips_crowded_spots() {
        let mut canvas = Canvas::new(16, 8);
        canvas.set_pixel(3, 2, INK);
        canvas.dither_rectangle(0, 0, 8, 4, INK);
        // (2,2) and (4,2) are checkerboard spots next to existing ink
        assert!(!canvas.get_pixel(2, 2, INK));
        assert!(!canvas.get_pixel(4, 2, INK));
        assert!(canvas.get_pixel(0, 0, INK));
    }

    #[test]
    fn test_background_erases() {
        let mut canvas = Canvas::new(16, 16);
        canvas.draw_filled_rectangle(0, 0, 15, 16, INK);
        canvas.draw_filled_rectangle(4, 4, 7, 8, BACKGROUND);
        assert_eq!(canvas.count_ink(), 16 * 16 - 4 * 4);
    }

    #[test]
    fn test_arrow_up() {
        let mut canvas = Canvas::new(16, 16);
        canvas.draw_arrow_up(8, 10, 5, INK);
        // column heights 1,2,3,2,1
        assert_eq!(canvas.count_ink(), 9);
        assert!(canvas.get_pixel(8, 7, INK));
        assert!(!canvas.get_pixel(8, 10, INK));
    }
}
