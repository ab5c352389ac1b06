/*
 *  display/drivers/mock.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock panel driver for testing
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

use std::sync::{Arc, Mutex, MutexGuard};

use log::trace;

use crate::display::error::DisplayError;
use crate::display::traits::{check_frame_len, PanelCapabilities, PanelDriver};

/// Panel that keeps the last frame in memory.
///
/// Every call is recorded in a shared state so tests can hold a handle and
/// inspect it after the driver has been moved into `present`.
#[derive(Debug, Clone)]
pub struct MockPanel {
    capabilities: PanelCapabilities,
    state: Arc<Mutex<MockPanelState>>,
}

/// Internal state for the mock panel (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockPanelState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of frames accepted by write_frame()
    pub write_count: usize,

    /// Number of times refresh() was called
    pub refresh_count: usize,

    /// Number of times sleep() was called
    pub sleep_count: usize,

    /// Whether the panel is awake
    pub is_initialized: bool,

    /// Copy of the last accepted frame
    pub last_frame: Option<Vec<u8>>,

    /// Call names in order
    pub calls: Vec<&'static str>,

    /// Simulate failures (for error testing)
    pub simulate_init_failure: bool,
    pub simulate_refresh_failure: bool,
}

impl MockPanel {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            capabilities: PanelCapabilities {
                width,
                height,
                ink_is_set: false,
                name: "mock",
            },
            state: Arc::new(Mutex::new(MockPanelState::default())),
        }
    }

    /// Get shared state handle
    pub fn state(&self) -> Arc<Mutex<MockPanelState>> {
        Arc::clone(&self.state)
    }

    /// Reset all counters
    pub fn reset_state(&self) {
        *self.lock() = MockPanelState::default();
    }

    fn lock(&self) -> MutexGuard<'_, MockPanelState> {
        // a test that panicked mid-assert leaves the counters usable
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PanelDriver for MockPanel {
    fn capabilities(&self) -> &PanelCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();
        state.calls.push("init");
        if state.simulate_init_failure {
            return Err(DisplayError::Other("simulated init failure".into()));
        }
        state.init_count += 1;
        state.is_initialized = true;
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        let mut state = self.lock();
        state.calls.push("write_frame");
        if !state.is_initialized {
            return Err(DisplayError::NotInitialized);
        }
        check_frame_len(&self.capabilities, frame)?;
        state.write_count += 1;
        state.last_frame = Some(frame.to_vec());
        trace!("mock panel took {} bytes", frame.len());
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();
        state.calls.push("refresh");
        if !state.is_initialized {
            return Err(DisplayError::NotInitialized);
        }
        if state.simulate_refresh_failure {
            return Err(DisplayError::Other("simulated refresh failure".into()));
        }
        state.refresh_count += 1;
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();
        state.calls.push("sleep");
        state.sleep_count += 1;
        state.is_initialized = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, INK};
    use crate::display::traits::present;

    #[test]
    fn test_mock_panel_creation() {
        let panel = MockPanel::new(400, 300);
        assert_eq!(panel.dimensions(), (400, 300));
        assert_eq!(panel.capabilities().frame_len(), 15000);
    }

    #[test]
    fn test_mock_panel_write_before_init() {
        let mut panel = MockPanel::new(16, 2);
        assert!(matches!(
            panel.write_frame(&[0u8; 4]),
            Err(DisplayError::NotInitialized)
        ));
    }

    #[test]
    fn test_mock_panel_buffer_size_mismatch() {
        let mut panel = MockPanel::new(16, 2);
        panel.init().unwrap();
        assert!(matches!(
            panel.write_frame(&[0u8; 3]),
            Err(DisplayError::BufferSizeMismatch { expected: 4, actual: 3 })
        ));
        assert!(panel.state().lock().unwrap().last_frame.is_none());
    }

    #[test]
    fn test_mock_panel_present_sequence() {
        let mut canvas = Canvas::new(16, 8);
        canvas.set_pixel(0, 0, INK);
        let mut panel = MockPanel::new(16, 8);
        let state = panel.state();

        present(&canvas, &mut panel).unwrap();

        let state = state.lock().unwrap();
        assert_eq!(state.calls, vec!["init", "write_frame", "refresh", "sleep"]);
        assert_eq!(state.last_frame.as_deref(), Some(canvas.buffer()));
        assert!(!state.is_initialized);
    }

    #[test]
    fn test_mock_panel_geometry_mismatch() {
        let canvas = Canvas::new(16, 8);
        let mut panel = MockPanel::new(24, 8);
        assert!(matches!(
            present(&canvas, &mut panel),
            Err(DisplayError::GeometryMismatch { panel_width: 24, frame_width: 16, .. })
        ));
        assert!(panel.state().lock().unwrap().calls.is_empty());
    }

    #[test]
    fn test_mock_panel_sleeps_after_failure() {
        let canvas = Canvas::new(16, 8);
        let mut panel = MockPanel::new(16, 8);
        panel.state().lock().unwrap().simulate_refresh_failure = true;

        assert!(present(&canvas, &mut panel).is_err());

        let state = panel.state();
        let state = state.lock().unwrap();
        assert_eq!(state.sleep_count, 1);
        assert_eq!(state.refresh_count, 0);
    }

    #[test]
    fn test_mock_panel_init_failure() {
        let canvas = Canvas::new(16, 8);
        let mut panel = MockPanel::new(16, 8);
        panel.state().lock().unwrap().simulate_init_failure = true;

        assert!(present(&canvas, &mut panel).is_err());
        assert_eq!(panel.state().lock().unwrap().write_count, 0);

        panel.reset_state();
        assert!(present(&canvas, &mut panel).is_ok());
        assert_eq!(panel.state().lock().unwrap().init_count, 1);
    }
}
