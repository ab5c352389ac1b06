/*
 *  main.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Render one dashboard frame from a weather record
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

use anyhow::{Context, Result};
use chrono::Local;
use env_logger::Env;
use log::info;

use weatherpaint::config;
use weatherpaint::display::PbmPanel;
use weatherpaint::{Canvas, Dashboard, WeatherRecord, present};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

fn main() -> Result<()> {
    let (cli, cfg) = config::load()?;

    if cli.dump_config {
        println!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let weather_path = cli
        .weather
        .as_ref()
        .context("--weather is required")?;
    let json = fs::read_to_string(weather_path)
        .with_context(|| format!("reading {}", weather_path.display()))?;
    let record = WeatherRecord::from_json(&json)
        .with_context(|| format!("parsing {}", weather_path.display()))?;
    info!("weather record from {} loaded", record.last_update);

    let now = cli.now.unwrap_or_else(|| Local::now().fixed_offset());

    let (width, height) = cfg.panel_size();
    let mut canvas = Canvas::new(width, height);
    canvas.set_rotation(cfg.rotation());
    canvas.set_inverted(cfg.invert());
    info!(
        "canvas {}x{}, rotated {} deg, inverted {}",
        canvas.width(),
        canvas.height(),
        canvas.rotation().degrees(),
        canvas.is_inverted()
    );

    let mut dashboard = Dashboard::new(cfg.gridlines());
    dashboard.render(&mut canvas, &record, &now);
    if let Some(failure) = cli.failure {
        dashboard.render_failure(&mut canvas, failure);
    }
    info!("frame rendered, {} ink pixels", canvas.count_ink());

    let mut panel = PbmPanel::new(cfg.output_path(), canvas.width(), canvas.height())
        .with_ink_set(canvas.is_inverted());
    present(&canvas, &mut panel)
        .with_context(|| format!("presenting frame to {}", panel.path().display()))?;

    Ok(())
}
