/*
 *  dashboard.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  400x300 weather dashboard layout
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

//! Frame layout, top to bottom:
//!
//! ```text
//!  0..72    3-hourly icons with hour labels
//!  72       separator
//!  73..200  current conditions + today | daily graph
//!  200      separator
//!  201..300 next four days
//! ```

use arrayvec::ArrayString;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use log::debug;

use crate::assets::{self, FONT_LARGE, FONT_MEDIUM, FONT_SMALL};
use crate::canvas::{BACKGROUND, Canvas, INK};
use crate::chart::{Chart, DEFAULT_GRIDLINES, PlotArea, calculate_resolution, precipitation_scale, series_bounds};
use crate::font::{self, Align};
use crate::icon::{ICON_WIDTH, IconComposer, Scale};
use crate::sprite::Sprite;
use crate::weather::{DailyForecast, WeatherRecord};

pub const PANEL_WIDTH: u32 = 400;
pub const PANEL_HEIGHT: u32 = 300;

/// Hours before this are not shown in the 3-hourly strip.
const HOUR_START: u32 = 6;

const SEPARATOR_TOP: i32 = 72;
const SEPARATOR_BOTTOM: i32 = 200;

const SLOTS: i32 = 7;
const SLOT_WIDTH: i32 = 54;
const PX_PER_HOUR: i32 = SLOT_WIDTH / 3;
const STRIP_LEFT: i32 = (PANEL_WIDTH as i32 - SLOTS * SLOT_WIDTH) / 2;
const STRIP_ICON_Y: i32 = 2;
const LABEL_ROW_TOP: i32 = 54;
const LABEL_ROW_BOTTOM: i32 = 70;
const LABEL_Y: i32 = 58;

const CURRENT_ICON: (i32, i32) = (0, 80);
const TEXT_LEFT: i32 = 112;

/// Right of the today text, clear of the graph's value labels.
const TODAY_ICON: (i32, i32) = (180, 136);

const TEMP_PLOT: PlotArea = PlotArea::new(258, 84, 134, 96);
const RAIN_PLOT: PlotArea = PlotArea::new(258, 132, 134, 48);

const FORECAST_DAYS: usize = 4;
const FORECAST_COLUMN: i32 = 100;

const NOTICE_POS: (i32, i32) = (5, 127);

const DAY_NAMES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Upstream failures reported with a notice glyph over the current
/// conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum UpdateFailure {
    Time,
    Connection,
    Weather,
}

impl UpdateFailure {
    pub fn notice(self) -> &'static Sprite<'static> {
        match self {
            UpdateFailure::Time => &assets::NOTIME,
            UpdateFailure::Connection => &assets::NOCONNECTION,
            UpdateFailure::Weather => &assets::NOWEATHER,
        }
    }
}

fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

/// `min|max` label, values already rounded.
fn min_max(min: i32, max: i32) -> ArrayString<24> {
    font::label(format_args!("{min}|{max}"))
}

/// Hours on the graph's x axis, the longer of the two hourly series.
fn graph_hours(record: &WeatherRecord) -> usize {
    record.temperatures_1h.len().max(record.precipitation_1h.len())
}

pub struct Dashboard {
    icons: IconComposer,
    gridlines: u32,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DEFAULT_GRIDLINES)
    }
}

impl Dashboard {
    pub fn new(gridlines: u32) -> Self {
        Self { icons: IconComposer::new(), gridlines: gridlines.max(1) }
    }

    /// Paint the complete frame for `record` as seen at `now`.
    pub fn render(&mut self, canvas: &mut Canvas, record: &WeatherRecord, now: &DateTime<FixedOffset>) {
        let behind = record.hours_behind(now);
        debug!("render dashboard, record {} h behind", behind);

        canvas.clear(BACKGROUND);
        canvas.draw_horizontal_line(0, SEPARATOR_TOP, PANEL_WIDTH as i32, INK);
        canvas.draw_horizontal_line(0, SEPARATOR_BOTTOM, PANEL_WIDTH as i32, INK);

        self.render_strip(canvas, record, behind);
        self.render_current(canvas, record, behind);
        if let Some(today) = record.today() {
            self.render_today(canvas, today);
        }
        self.render_graph(canvas, record);
        self.render_forecasts(canvas, record);
    }

    /// Notice glyph for a failed update, drawn over a rendered frame.
    pub fn render_failure(&self, canvas: &mut Canvas, failure: UpdateFailure) {
        debug!("failure notice {:?}", failure);
        canvas.draw_sprite(NOTICE_POS.0, NOTICE_POS.1, failure.notice(), INK);
    }

    /// Up to seven 3-hourly icons from the first slot at or after 06:00.
    /// The elapsed part of the label row is inverted when the record is
    /// older than the current hour.
    fn render_strip(&mut self, canvas: &mut Canvas, record: &WeatherRecord, behind: u32) {
        let start = record.start.hour();
        let first_hour = start - start % 3;
        let now_hour = start + behind;

        let mut stale_until = None;
        let mut slot = 0;
        for (i, &code) in record.icons_3h.iter().enumerate() {
            if slot >= SLOTS {
                break;
            }
            let hour = first_hour + 3 * i as u32;
            if hour % 24 < HOUR_START {
                continue;
            }
            let x = STRIP_LEFT + slot * SLOT_WIDTH;

            let icon_x = x + SLOT_WIDTH / 2 - ICON_WIDTH as i32 / 2;
            self.icons.render(canvas, code, icon_x, STRIP_ICON_Y, Scale::Single, INK);

            let label = font::label::<8>(format_args!("{:02}:00", hour % 24));
            canvas.draw_vertical_line(x, LABEL_ROW_TOP + 2, LABEL_ROW_BOTTOM - LABEL_ROW_TOP - 2, INK);
            canvas.draw_text(x + 3, LABEL_Y, &label, &FONT_SMALL, INK);

            if behind > 0 && now_hour >= hour {
                let elapsed = (now_hour - hour).min(3) as i32;
                stale_until = Some(x + elapsed * PX_PER_HOUR);
            }
            slot += 1;
        }

        if let Some(x_end) = stale_until {
            debug!("stale marker up to x {}", x_end);
            canvas.invert_rectangle(0, LABEL_ROW_TOP, x_end, LABEL_ROW_BOTTOM);
        }
    }

    /// Large icon, current temperature and the hour it applies to.
    fn render_current(&mut self, canvas: &mut Canvas, record: &WeatherRecord, behind: u32) {
        let index = behind as usize;
        let temperature = record
            .temperatures_1h
            .get(index)
            .copied()
            .filter(|t| t.is_finite())
            .unwrap_or(record.current.temperature);
        let slot = (record.start.hour() % 3 + behind) as usize / 3;
        let icon = record.icons_3h.get(slot).copied().unwrap_or(record.current.icon);

        self.icons.render(canvas, icon, CURRENT_ICON.0, CURRENT_ICON.1, Scale::Double, INK);

        let temp = font::label::<16>(format_args!("{:.1}", temperature));
        let temp_width = FONT_LARGE.measure_width(&temp);
        let end = canvas.draw_text(TEXT_LEFT, 94, &temp, &FONT_LARGE, INK);
        canvas.draw_text(end, 94, "°", &FONT_LARGE, INK);

        let hour = (record.start.hour() + behind) % 24;
        let label = font::label::<8>(format_args!("{hour}:00"));
        canvas.draw_text_aligned(TEXT_LEFT + temp_width / 2, 126, &label, &FONT_SMALL, Align::Center, INK);
    }

    /// Date, today's icon, range and precipitation total.
    fn render_today(&mut self, canvas: &mut Canvas, today: &DailyForecast) {
        let date = font::label::<16>(format_args!(
            "{}, {}. {}",
            day_name(today.date),
            today.date.day(),
            today.date.format("%b")
        ));
        canvas.draw_text(TEXT_LEFT, 80, &date, &FONT_SMALL, INK);

        self.icons.render(canvas, today.icon, TODAY_ICON.0, TODAY_ICON.1, Scale::Single, INK);

        let range = min_max(today.temp_min.round() as i32, today.temp_max.ceil() as i32);
        canvas.draw_text(TEXT_LEFT, 142, &range, &FONT_MEDIUM, INK);

        if (today.precipitation * 10.0).round() >= 1.0 {
            canvas.draw_sprite(TEXT_LEFT, 168, &assets::PRECIPITATION, INK);
            let amount = font::label::<16>(format_args!("{:.1}mm", today.precipitation));
            canvas.draw_text(TEXT_LEFT + 14, 166, &amount, &FONT_MEDIUM, INK);
        }
    }

    /// Hourly temperature curve over precipitation bars.
    fn render_graph(&mut self, canvas: &mut Canvas, record: &WeatherRecord) {
        let (hours, temps): (Vec<f32>, Vec<f32>) = record
            .temperatures_1h
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_finite())
            .map(|(i, &t)| (i as f32, t))
            .unzip();

        let Some((lo, hi)) = series_bounds(&temps) else {
            debug!("no temperatures, graph skipped");
            return;
        };
        let scale = calculate_resolution(lo, hi, self.gridlines);

        // both series and the ticks share one hour axis
        let samples = graph_hours(record);
        let (first, last) = (0.0, (samples.max(2) - 1) as f32);

        if let Some((_, wettest)) = series_bounds(&record.precipitation_1h) {
            let rain = precipitation_scale(wettest, self.gridlines);
            debug!("precipitation scale {:?}", rain);
            Chart::new(RAIN_PLOT)
                .with_span(first, last)
                .draw_bars(canvas, &record.precipitation_1h, &rain, INK);
        }

        let chart = Chart::new(TEMP_PLOT).with_span(first, last);
        chart.draw_grid(canvas, &scale, Some(&FONT_SMALL), INK);
        chart.draw_curve(canvas, &hours, &temps, &scale, INK);

        // hour ticks every six hours along the bottom
        let start = record.start.hour();
        for i in 0..samples as u32 {
            let hour = (start + i) % 24;
            if hour % 6 != 0 {
                continue;
            }
            let x = TEMP_PLOT.x_at(i as f32, first, last);
            let label = font::label::<4>(format_args!("{hour}"));
            canvas.draw_vertical_line(x, TEMP_PLOT.bottom() + 1, 2, INK);
            canvas.draw_text_aligned(x, TEMP_PLOT.bottom() + 5, &label, &FONT_SMALL, Align::Center, INK);
        }
    }

    /// Next four days: icon, `min|max`, weekday.
    fn render_forecasts(&mut self, canvas: &mut Canvas, record: &WeatherRecord) {
        for (i, day) in record.upcoming().take(FORECAST_DAYS).enumerate() {
            let x = i as i32 * FORECAST_COLUMN;
            let centre = x + FORECAST_COLUMN / 2;
            self.icons.render(canvas, day.icon, centre - ICON_WIDTH as i32 / 2, 204, Scale::Single, INK);

            let range = min_max(day.temp_min.round() as i32, day.temp_max.round() as i32);
            canvas.draw_text_aligned(centre, 254, &range, &FONT_MEDIUM, Align::Center, INK);
            canvas.draw_text_aligned(centre, 280, day_name(day.date), &FONT_SMALL, Align::Center, INK);
        }
    }
}
