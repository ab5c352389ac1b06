/*
 *  display/traits.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Panel driver abstraction and the frame hand-off sequence
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

use log::{debug, info, warn};

use crate::bitplane::packed_len;
use crate::canvas::Canvas;
use crate::display::error::DisplayError;

/// Panel geometry and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelCapabilities {
    /// Physical width in pixels, a multiple of 8
    pub width: u32,

    /// Physical height in pixels
    pub height: u32,

    /// Whether a set bit in the frame is ink
    pub ink_is_set: bool,

    /// Human-readable panel name
    pub name: &'static str,
}

impl PanelCapabilities {
    /// Bytes in one packed frame
    pub fn frame_len(&self) -> usize {
        packed_len(self.width as usize, self.height as usize)
    }
}

/// Consumer of finished 1bpp frames.
///
/// A frame is the canvas buffer as is: row-major, MSB first, continuous
/// across rows. Drivers never see rotation, only the physical layout.
pub trait PanelDriver: Send {
    /// Get panel capabilities
    fn capabilities(&self) -> &PanelCapabilities;

    /// Wake the panel, must precede `write_frame`
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Load one full frame into the panel
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), DisplayError>;

    /// Show the loaded frame
    fn refresh(&mut self) -> Result<(), DisplayError>;

    /// Power down until the next `init`
    fn sleep(&mut self) -> Result<(), DisplayError>;

    /// Get panel dimensions (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }
}

/// Reject a frame whose length does not match the panel.
pub fn check_frame_len(caps: &PanelCapabilities, frame: &[u8]) -> Result<(), DisplayError> {
    let expected = caps.frame_len();
    if frame.len() != expected {
        return Err(DisplayError::BufferSizeMismatch {
            expected,
            actual: frame.len(),
        });
    }
    Ok(())
}

/// Hand a finished canvas to a panel: init, write, refresh, sleep.
///
/// The canvas is only borrowed. If any step after `init` fails the panel
/// is still put to sleep before the error is returned.
pub fn present(canvas: &Canvas, driver: &mut dyn PanelDriver) -> Result<(), DisplayError> {
    let caps = driver.capabilities().clone();
    if caps.width != canvas.width() || caps.height != canvas.height() {
        return Err(DisplayError::GeometryMismatch {
            panel_width: caps.width,
            panel_height: caps.height,
            frame_width: canvas.width(),
            frame_height: canvas.height(),
        });
    }
    if caps.ink_is_set != canvas.is_inverted() {
        warn!(
            "{} expects ink as {} bits, canvas stores {}",
            caps.name,
            if caps.ink_is_set { "set" } else { "cleared" },
            if canvas.is_inverted() { "set" } else { "cleared" },
        );
    }

    debug!("presenting {}x{} frame to {}", caps.width, caps.height, caps.name);
    driver.init()?;

    let shown = driver
        .write_frame(canvas.buffer())
        .and_then(|_| driver.refresh());

    match shown {
        Ok(()) => {
            driver.sleep()?;
            info!("frame shown on {}", caps.name);
            Ok(())
        }
        Err(e) => {
            if let Err(sleep_err) = driver.sleep() {
                warn!("{} did not power down after failure: {}", caps.name, sleep_err);
            }
            Err(e)
        }
    }
}
