/*
 *  lib.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  1-bit drawing engine and weather dashboard for e-paper panels
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

// packed storage and the drawing surface
pub mod bitplane;
pub mod canvas;
pub mod raster;
pub mod sprite;
pub mod font;

// artwork and composition
pub mod assets;
pub mod icon;
pub mod spline;
pub mod chart;

// the application side
pub mod weather;
pub mod dashboard;
pub mod config;
pub mod display;

pub use canvas::{BACKGROUND, Canvas, INK, Rotation};
pub use dashboard::{Dashboard, UpdateFailure};
pub use display::{DisplayError, PanelDriver, present};
pub use weather::WeatherRecord;
