/*
 *  display/error.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for the canvas and panel hand-off
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

use thiserror::Error;

/// Errors surfaced by canvas construction and panel drivers.
///
/// Drawing itself never fails; out-of-range pixels are clipped.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Invalid rotation angle
    #[error("Invalid rotation angle: {0} (must be 0, 90, 180, or 270)")]
    InvalidRotation(u16),

    /// Frame buffer does not match the panel / canvas geometry
    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A frame was written before `init`
    #[error("Panel not initialized")]
    NotInitialized,

    /// Panel geometry does not match the canvas being presented
    #[error("Panel is {panel_width}x{panel_height}, frame is {frame_width}x{frame_height}")]
    GeometryMismatch {
        panel_width: u32,
        panel_height: u32,
        frame_width: u32,
        frame_height: u32,
    },

    /// Writing a frame file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
