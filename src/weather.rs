/*
 *  weather.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Validated weather record consumed by the dashboard
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

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::icon::IconCode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub icon: IconCode,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub icon: IconCode,
    pub temp_max: f32,
    pub temp_min: f32,
    /// Daily total in mm.
    #[serde(default)]
    pub precipitation: f32,
}

/// One forecast download. Hourly series start at `start`, the 3-hourly
/// icons at the 3-hour boundary at or before it. `forecasts[0]` is today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub start: DateTime<FixedOffset>,
    pub last_update: DateTime<FixedOffset>,
    pub current: CurrentConditions,
    #[serde(default)]
    pub icons_3h: Vec<IconCode>,
    #[serde(default)]
    pub temperatures_1h: Vec<f32>,
    /// Hourly precipitation in mm.
    #[serde(default)]
    pub precipitation_1h: Vec<f32>,
    #[serde(default)]
    pub forecasts: Vec<DailyForecast>,
}

impl WeatherRecord {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whole clock hours `now` is past `start` on the record's own wall
    /// clock, never negative. Hour boundaries follow the record's offset,
    /// so half-hour zones flip on the local hour.
    pub fn hours_behind(&self, now: &DateTime<FixedOffset>) -> u32 {
        let local_hour = |t: &DateTime<FixedOffset>| t.naive_local().and_utc().timestamp().div_euclid(3600);
        let now = now.with_timezone(self.start.offset());
        (local_hour(&now) - local_hour(&self.start)).max(0) as u32
    }

    pub fn today(&self) -> Option<&DailyForecast> {
        self.forecasts.first()
    }

    /// Forecast days after today.
    pub fn upcoming(&self) -> impl Iterator<Item = &DailyForecast> {
        self.forecasts.iter().skip(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "start": "2026-10-16T09:00:00+02:00",
        "last_update": "2026-10-16T08:47:12+02:00",
        "current": { "icon": 6, "temperature": 11.4 },
        "icons_3h": [3, 6, 106, 101],
        "temperatures_1h": [9.5, 10.1, 11.4],
        "precipitation_1h": [0.0, 0.4, 1.2],
        "forecasts": [
            { "date": "2026-10-16", "icon": 6, "temp_max": 13.2, "temp_min": 7.9, "precipitation": 2.1 },
            { "date": "2026-10-17", "icon": 2, "temp_max": 15.0, "temp_min": 6.0 }
        ]
    }"#;

    #[test]
    fn test_parse_record() {
        let r = WeatherRecord::from_json(RECORD).unwrap();
        assert_eq!(r.current.icon, IconCode(6));
        assert_eq!(r.icons_3h[2], IconCode(106));
        assert_eq!(r.forecasts.len(), 2);
        assert_eq!(r.today().unwrap().precipitation, 2.1);
        // missing precipitation defaults to dry
        assert_eq!(r.upcoming().next().unwrap().precipitation, 0.0);
    }

    #[test]
    fn test_hours_behind() {
        let r = WeatherRecord::from_json(RECORD).unwrap();
        let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
        assert_eq!(r.hours_behind(&at("2026-10-16T08:30:00+02:00")), 0);
        assert_eq!(r.hours_behind(&at("2026-10-16T09:59:00+02:00")), 0);
        assert_eq!(r.hours_behind(&at("2026-10-16T11:05:00+02:00")), 2);
        // same instant in another zone
        assert_eq!(r.hours_behind(&at("2026-10-16T09:05:00+00:00")), 2);
    }

    #[test]
    fn test_hours_behind_half_hour_zone() {
        let mut r = WeatherRecord::from_json(RECORD).unwrap();
        let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
        r.start = at("2026-10-16T09:00:00+05:30");
        assert_eq!(r.hours_behind(&at("2026-10-16T09:40:00+05:30")), 0);
        assert_eq!(r.hours_behind(&at("2026-10-16T10:05:00+05:30")), 1);
        // 09:40 local, still the start hour
        assert_eq!(r.hours_behind(&at("2026-10-16T04:10:00+00:00")), 0);
        assert_eq!(r.hours_behind(&at("2026-10-16T04:35:00+00:00")), 1);
    }

    #[test]
    fn test_missing_series_default_empty() {
        let json = r#"{
            "start": "2026-10-16T09:00:00Z",
            "last_update": "2026-10-16T09:00:00Z",
            "current": { "icon": 1, "temperature": 20.0 }
        }"#;
        let r = WeatherRecord::from_json(json).unwrap();
        assert!(r.icons_3h.is_empty());
        assert!(r.today().is_none());
    }
}
