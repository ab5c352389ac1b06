/*
 *  display/drivers/pbm.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Panel stand-in that writes each refresh to a binary PBM (P4) file
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

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::display::error::DisplayError;
use crate::display::traits::{check_frame_len, PanelCapabilities, PanelDriver};

/// Writes frames as P4 images. PBM stores black as a set bit, so frames
/// whose ink is a cleared bit are flipped on the way out.
#[derive(Debug)]
pub struct PbmPanel {
    capabilities: PanelCapabilities,
    path: PathBuf,
    frame: Option<Vec<u8>>,
    awake: bool,
}

impl PbmPanel {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            capabilities: PanelCapabilities {
                width,
                height,
                ink_is_set: false,
                name: "pbm",
            },
            path: path.into(),
            frame: None,
            awake: false,
        }
    }

    /// Frames from an inverted canvas already carry ink as set bits.
    pub fn with_ink_set(mut self, ink_is_set: bool) -> Self {
        self.capabilities.ink_is_set = ink_is_set;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encoded P4 image of the loaded frame.
    pub fn encode(&self) -> Option<Vec<u8>> {
        let frame = self.frame.as_ref()?;
        let caps = &self.capabilities;
        let header = format!("P4\n{} {}\n", caps.width, caps.height);
        let mut out = Vec::with_capacity(header.len() + frame.len());
        out.extend_from_slice(header.as_bytes());
        if caps.ink_is_set {
            out.extend_from_slice(frame);
        } else {
            out.extend(frame.iter().map(|b| !b));
        }
        Some(out)
    }
}

impl PanelDriver for PbmPanel {
    fn capabilities(&self) -> &PanelCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.awake = true;
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        if !self.awake {
            return Err(DisplayError::NotInitialized);
        }
        check_frame_len(&self.capabilities, frame)?;
        self.frame = Some(frame.to_vec());
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), DisplayError> {
        if !self.awake {
            return Err(DisplayError::NotInitialized);
        }
        let image = self
            .encode()
            .ok_or_else(|| DisplayError::Other("refresh without a frame".into()))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, &image)?;
        info!("wrote {} bytes to {}", image.len(), self.path.display());
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        debug!("pbm panel asleep");
        self.awake = false;
        self.frame = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, INK};
    use crate::display::traits::present;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("weatherpaint-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_pbm_header_and_polarity() {
        let mut canvas = Canvas::new(16, 2);
        canvas.set_pixel(0, 0, INK);
        let path = temp_path("polarity.pbm");
        let mut panel = PbmPanel::new(&path, 16, 2);

        present(&canvas, &mut panel).unwrap();

        let bytes = fs::read(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert!(bytes.starts_with(b"P4\n16 2\n"));
        let body = &bytes[8..];
        assert_eq!(body.len(), 4);
        // ink pixel is black, everything else white
        assert_eq!(body, &[0x80, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_pbm_inverted_canvas_passes_through() {
        let mut canvas = Canvas::new(8, 1);
        canvas.set_inverted(true);
        canvas.clear(crate::canvas::BACKGROUND);
        canvas.set_pixel(7, 0, INK);
        let mut panel = PbmPanel::new(temp_path("unused.pbm"), 8, 1).with_ink_set(true);
        panel.init().unwrap();
        panel.write_frame(canvas.buffer()).unwrap();
        let image = panel.encode().unwrap();
        assert_eq!(image.last(), Some(&0x01));
    }

    #[test]
    fn test_pbm_refresh_without_init() {
        let mut panel = PbmPanel::new(temp_path("never.pbm"), 8, 1);
        assert!(matches!(panel.refresh(), Err(DisplayError::NotInitialized)));
        assert!(panel.encode().is_none());
    }

    #[test]
    fn test_pbm_unwritable_path() {
        let canvas = Canvas::new(8, 1);
        let blocker = temp_path("blocker");
        fs::write(&blocker, b"x").unwrap();
        let mut panel = PbmPanel::new(blocker.join("frame.pbm"), 8, 1);

        let result = present(&canvas, &mut panel);
        let _ = fs::remove_file(&blocker);
        assert!(matches!(result, Err(DisplayError::Io(_))));
    }
}
