/*
 *  icon.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather condition codes to layered icon compositions
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

//! An icon is built in a fixed order on a 56x48 scratch canvas:
//! dark cloud backdrop, base sky, precipitation overlay, fog. The inked
//! rows (fog excluded) are then centred vertically and the scratch is
//! copied onto the frame, optionally at twice the size.

use embedded_graphics::pixelcolor::BinaryColor;
use log::debug;

use crate::assets;
use crate::canvas::{BACKGROUND, Canvas, INK};
use crate::sprite::{AlphaSprite, Blend, Sprite, SpriteInfo};

pub const ICON_WIDTH: u32 = 56;
pub const ICON_HEIGHT: u32 = 48;

/// Codes at or above this select the night variant.
const NIGHT_FLAG: u16 = 100;

/// A weather condition code as delivered by the forecast provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct IconCode(pub u16);

impl IconCode {
    pub fn is_night(self) -> bool {
        self.0 >= NIGHT_FLAG
    }

    /// The sky condition with the night flag removed.
    pub fn condition(self) -> u8 {
        (self.0 % NIGHT_FLAG) as u8
    }
}

impl From<u16> for IconCode {
    fn from(code: u16) -> Self {
        IconCode(code)
    }
}

/// Base sky sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Sunny,
    Moon,
    MostlySunny,
    MostlyMoon,
    MostlyCloudy,
    MoonCloudy,
    Cloudy,
}

impl Base {
    pub fn sprite(self) -> &'static Sprite<'static> {
        match self {
            Base::Sunny => &assets::SUNNY,
            Base::Moon => &assets::MOON,
            Base::MostlySunny => &assets::MOSTLY_SUNNY,
            Base::MostlyMoon => &assets::MOSTLY_MOON,
            Base::MostlyCloudy => &assets::MOSTLY_CLOUDY,
            Base::MoonCloudy => &assets::MOON_CLOUDY,
            Base::Cloudy => &assets::CLOUDY,
        }
    }
}

/// Sky class shared by the day and night variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sky {
    Clear,
    MostlyClear,
    MostlyCloudy,
    Cloudy,
}

impl Sky {
    fn base(self, night: bool) -> Base {
        match (self, night) {
            (Sky::Clear, false) => Base::Sunny,
            (Sky::Clear, true) => Base::Moon,
            (Sky::MostlyClear, false) => Base::MostlySunny,
            (Sky::MostlyClear, true) => Base::MostlyMoon,
            (Sky::MostlyCloudy, false) => Base::MostlyCloudy,
            (Sky::MostlyCloudy, true) => Base::MoonCloudy,
            // overcast has no moon to show
            (Sky::Cloudy, _) => Base::Cloudy,
        }
    }
}

/// Precipitation and lightning overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Bolt1,
    Bolt1Rain2,
    Bolt2Rain2,
    Bolt2Rain4,
    Rain1,
    Rain2,
    Rain3,
    Rain4,
    Snow1,
    Snow2,
    Snow3,
    Snow4,
    Rain1Snow1,
    Rain2Snow1,
    Rain2Snow2,
    Rain3Snow3,
}

impl Overlay {
    pub fn sprite(self) -> &'static AlphaSprite<'static> {
        match self {
            Overlay::Bolt1 => &assets::BOLT_1,
            Overlay::Bolt1Rain2 => &assets::BOLT_1_RAIN_2,
            Overlay::Bolt2Rain2 => &assets::BOLT_2_RAIN_2,
            Overlay::Bolt2Rain4 => &assets::BOLT_2_RAIN_4,
            Overlay::Rain1 => &assets::RAIN_1,
            Overlay::Rain2 => &assets::RAIN_2,
            Overlay::Rain3 => &assets::RAIN_3,
            Overlay::Rain4 => &assets::RAIN_4,
            Overlay::Snow1 => &assets::SNOW_1,
            Overlay::Snow2 => &assets::SNOW_2,
            Overlay::Snow3 => &assets::SNOW_3,
            Overlay::Snow4 => &assets::SNOW_4,
            Overlay::Rain1Snow1 => &assets::RAIN_1_SNOW_1,
            Overlay::Rain2Snow1 => &assets::RAIN_2_SNOW_1,
            Overlay::Rain2Snow2 => &assets::RAIN_2_SNOW_2,
            Overlay::Rain3Snow3 => &assets::RAIN_3_SNOW_3,
        }
    }
}

/// Fog bands drawn over the finished icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fog {
    /// High band, opaque.
    High,
    /// Low band, opaque.
    Low,
    /// Both bands, transparent.
    Both,
}

/// Inclusive condition ranges, first match wins.
const SKY_TABLE: &[(u8, u8, Sky)] = &[
    (1, 1, Sky::Clear),
    (26, 28, Sky::Clear),
    (2, 2, Sky::MostlyClear),
    (3, 4, Sky::MostlyCloudy),
    (6, 13, Sky::MostlyCloudy),
    (29, 34, Sky::MostlyCloudy),
    (5, 5, Sky::Cloudy),
    (14, 25, Sky::Cloudy),
    (35, 35, Sky::Cloudy),
];

const DARK_CLOUD_TABLE: &[(u8, u8)] = &[(4, 11), (13, 25), (33, 34)];

const OVERLAY_TABLE: &[(u8, Overlay)] = &[
    (12, Overlay::Bolt1),
    (13, Overlay::Bolt1Rain2),
    (23, Overlay::Bolt1Rain2),
    (24, Overlay::Bolt2Rain2),
    (25, Overlay::Bolt2Rain4),
    (6, Overlay::Rain1),
    (29, Overlay::Rain1),
    (9, Overlay::Rain2),
    (14, Overlay::Rain2),
    (32, Overlay::Rain2),
    (17, Overlay::Rain3),
    (33, Overlay::Rain3),
    (20, Overlay::Rain4),
    (8, Overlay::Snow1),
    (30, Overlay::Snow1),
    (11, Overlay::Snow2),
    (16, Overlay::Snow2),
    (19, Overlay::Snow3),
    (34, Overlay::Snow3),
    (22, Overlay::Snow4),
    (7, Overlay::Rain1Snow1),
    (15, Overlay::Rain1Snow1),
    (31, Overlay::Rain1Snow1),
    (10, Overlay::Rain2Snow1),
    (18, Overlay::Rain2Snow2),
    (21, Overlay::Rain3Snow3),
];

static FOG_HIGH: [Sprite<'static>; 1] = [assets::FOG_TOP];
static FOG_LOW: [Sprite<'static>; 1] = [assets::FOG_BOTTOM];
static FOG_BOTH: [Sprite<'static>; 2] = [assets::FOG_TOP, assets::FOG_BOTTOM];

impl Fog {
    pub fn bands(self) -> &'static [Sprite<'static>] {
        match self {
            Fog::High => &FOG_HIGH,
            Fog::Low => &FOG_LOW,
            Fog::Both => &FOG_BOTH,
        }
    }

    /// A single band blanks what is behind it, the pair lets the sky through.
    pub fn blend(self) -> Blend {
        match self {
            Fog::High | Fog::Low => Blend::Opaque,
            Fog::Both => Blend::Transparent,
        }
    }
}

const FOG_TABLE: &[(u8, Fog)] = &[(26, Fog::High), (27, Fog::Low), (28, Fog::Both)];

fn in_ranges(code: u8, ranges: &[(u8, u8)]) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&code))
}

/// Resources that make up one icon. A pure function of the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPlan {
    pub base: Option<Base>,
    pub dark_cloud: bool,
    pub overlay: Option<Overlay>,
    pub fog: Option<Fog>,
}

impl IconPlan {
    pub fn for_code(code: IconCode) -> Self {
        let condition = code.condition();
        let base = SKY_TABLE
            .iter()
            .find(|&&(lo, hi, _)| (lo..=hi).contains(&condition))
            .map(|&(_, _, sky)| sky.base(code.is_night()));
        let overlay = OVERLAY_TABLE
            .iter()
            .find(|&&(c, _)| c == condition)
            .map(|&(_, o)| o);
        let fog = FOG_TABLE.iter().find(|&&(c, _)| c == condition).map(|&(_, f)| f);
        Self {
            base,
            dark_cloud: in_ranges(condition, DARK_CLOUD_TABLE),
            overlay,
            fog,
        }
    }

    /// Box the backdrop and overlay are aligned against. Without a base
    /// sprite the whole icon frame is used.
    fn anchor(&self) -> SpriteInfo {
        self.base
            .map(|b| b.sprite().info)
            .unwrap_or(SpriteInfo::new(ICON_WIDTH as i32, ICON_HEIGHT as i32, 0, 0))
    }
}

/// Size of the copy onto the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Single,
    Double,
}

/// Owns the off-screen canvas icons are assembled on.
#[derive(Debug)]
pub struct IconComposer {
    scratch: Canvas,
}

impl Default for IconComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl IconComposer {
    pub fn new() -> Self {
        Self { scratch: Canvas::scratch(ICON_WIDTH, ICON_HEIGHT) }
    }

    /// The last composed icon.
    pub fn scratch(&self) -> &Canvas {
        &self.scratch
    }

    /// Assemble `code` on the scratch canvas and return the vertical shift
    /// that centres its inked rows in the frame.
    pub fn compose(&mut self, code: IconCode) -> i32 {
        let plan = IconPlan::for_code(code);
        debug!("icon {} -> {:?}", code.0, plan);

        let canvas = &mut self.scratch;
        canvas.clear(BACKGROUND);

        let anchor = plan.anchor();
        let dark = &assets::CLOUD_DARK.info;
        let right_x = anchor.right() - dark.width;

        if plan.dark_cloud {
            canvas.draw_sprite(right_x, anchor.bottom() - dark.height, &assets::CLOUD_DARK, INK);
        }
        if let Some(base) = plan.base {
            canvas.draw_sprite(0, 0, base.sprite(), INK);
        }
        if let Some(overlay) = plan.overlay {
            canvas.draw_sprite_alpha(right_x, 0, overlay.sprite(), INK);
        }

        let (top, bottom) = canvas.blank_rows();
        let offset_y = (bottom as i32 - top as i32) / 2;

        if let Some(fog) = plan.fog {
            for band in fog.bands() {
                canvas.draw_sprite_blend(0, 0, band, fog.blend(), INK);
            }
        }

        offset_y
    }

    /// Compose `code` and copy it with its frame's top-left at `(x, y)`.
    pub fn render(
        &mut self,
        target: &mut Canvas,
        code: IconCode,
        x: i32,
        y: i32,
        scale: Scale,
        color: BinaryColor,
    ) {
        let offset_y = self.compose(code);
        let icon = self.scratch.as_sprite();
        let (blend, factor) = match scale {
            Scale::Single => (Blend::Transparent, 1),
            Scale::Double => (Blend::Double, 2),
        };
        target.draw_sprite_blend(x, y + offset_y * factor, &icon, blend, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(code: u16) -> IconPlan {
        IconPlan::for_code(IconCode(code))
    }

    #[test]
    fn test_night_flag() {
        assert!(!IconCode(35).is_night());
        assert!(IconCode(100).is_night());
        assert_eq!(IconCode(127).condition(), 27);
    }

    #[test]
    fn test_light_rain_plan() {
        let p = plan(6);
        assert_eq!(p.base, Some(Base::MostlyCloudy));
        assert_eq!(p.overlay, Some(Overlay::Rain1));
        assert_eq!(p.fog, None);
        assert!(p.dark_cloud);
    }

    #[test]
    fn test_night_fog_plan() {
        let p = plan(127);
        assert_eq!(p.base, Some(Base::Moon));
        assert_eq!(p.fog, Some(Fog::Low));
        assert_eq!(p.overlay, None);
        assert!(!p.dark_cloud);
    }

    #[test]
    fn test_base_classes() {
        assert_eq!(plan(1).base, Some(Base::Sunny));
        assert_eq!(plan(2).base, Some(Base::MostlySunny));
        assert_eq!(plan(102).base, Some(Base::MostlyMoon));
        assert_eq!(plan(131).base, Some(Base::MoonCloudy));
        assert_eq!(plan(5).base, Some(Base::Cloudy));
        // overcast stays overcast at night
        assert_eq!(plan(118).base, Some(Base::Cloudy));
        assert_eq!(plan(0).base, None);
        assert_eq!(plan(36).base, None);
    }

    #[test]
    fn test_every_condition_has_one_base() {
        for code in 1..=35u8 {
            let hits = SKY_TABLE
                .iter()
                .filter(|&&(lo, hi, _)| (lo..=hi).contains(&code))
                .count();
            assert_eq!(hits, 1, "condition {code}");
        }
    }

    #[test]
    fn test_dark_cloud_ranges() {
        let dark: Vec<u8> = (0..=40).filter(|&c| plan(c as u16).dark_cloud).collect();
        let expected: Vec<u8> = (4..=11).chain(13..=25).chain([33, 34]).collect();
        assert_eq!(dark, expected);
    }

    #[test]
    fn test_overlay_table() {
        assert_eq!(plan(12).overlay, Some(Overlay::Bolt1));
        assert_eq!(plan(123).overlay, Some(Overlay::Bolt1Rain2));
        assert_eq!(plan(21).overlay, Some(Overlay::Rain3Snow3));
        assert_eq!(plan(1).overlay, None);
        assert_eq!(plan(35).overlay, None);
        // each code appears once
        for (i, (c, _)) in OVERLAY_TABLE.iter().enumerate() {
            assert!(OVERLAY_TABLE[i + 1..].iter().all(|(d, _)| d != c));
        }
    }

    #[test]
    fn test_fog_only_for_fog_codes() {
        for code in 1..=35u16 {
            let expected = match code {
                26 => Some(Fog::High),
                27 => Some(Fog::Low),
                28 => Some(Fog::Both),
                _ => None,
            };
            assert_eq!(plan(code).fog, expected);
        }
    }

    #[test]
    fn test_unknown_code_draws_nothing() {
        let mut composer = IconComposer::new();
        assert_eq!(composer.compose(IconCode(0)), 0);
        assert_eq!(composer.scratch().count_ink(), 0);
        assert_eq!(composer.compose(IconCode(99)), 0);
        assert_eq!(composer.scratch().count_ink(), 0);
    }

    #[test]
    fn test_composition_is_repeatable() {
        let mut composer = IconComposer::new();
        composer.compose(IconCode(18));
        let first = composer.scratch().buffer().to_vec();
        composer.compose(IconCode(1));
        composer.compose(IconCode(18));
        assert_eq!(composer.scratch().buffer(), &first[..]);
    }

    #[test]
    fn test_render_centres_content() {
        let mut composer = IconComposer::new();
        for code in (1..=35u16).chain(101..=135).filter(|c| !(26..=28).contains(&(c % 100))) {
            let mut frame = Canvas::new(ICON_WIDTH, ICON_HEIGHT);
            composer.render(&mut frame, IconCode(code), 0, 0, Scale::Single, INK);
            assert!(frame.count_ink() > 0, "code {code}");
            let (top, bottom) = frame.blank_rows();
            assert!(top.abs_diff(bottom) <= 1, "code {code}: {top} vs {bottom}");
        }
    }

    #[test]
    fn test_fog_does_not_shift_icon() {
        let mut composer = IconComposer::new();
        let clear = composer.compose(IconCode(1));
        let fog = composer.compose(IconCode(27));
        assert_eq!(clear, fog);
    }

    #[test]
    fn test_double_scale_covers_twice_the_area() {
        let mut composer = IconComposer::new();
        let mut single = Canvas::new(ICON_WIDTH, ICON_HEIGHT);
        let mut double = Canvas::new(ICON_WIDTH * 2, ICON_HEIGHT * 2);
        composer.render(&mut single, IconCode(3), 0, 0, Scale::Single, INK);
        composer.render(&mut double, IconCode(3), 0, 0, Scale::Double, INK);
        assert_eq!(double.count_ink(), single.count_ink() * 4);
    }

    fn blank_frame() -> Canvas {
        Canvas::scratch(ICON_WIDTH, ICON_HEIGHT)
    }

    fn assert_same(actual: &Canvas, expected: impl Fn(i32, i32) -> bool, what: &str) {
        for y in 0..ICON_HEIGHT as i32 {
            for x in 0..ICON_WIDTH as i32 {
                assert_eq!(actual.get_pixel(x, y, INK), expected(x, y), "{what} at ({x},{y})");
            }
        }
    }

    #[test]
    fn test_dark_cloud_hugs_base_bottom_right() {
        // overcast: cloudy base spans x 2..54, y 6..36
        let mut composer = IconComposer::new();
        composer.compose(IconCode(5));
        let dark = &assets::CLOUD_DARK;
        let cloudy = &assets::CLOUDY;
        assert_same(
            composer.scratch(),
            |x, y| {
                dark.is_ink(y - 14, x - 18)
                    || cloudy.is_ink(y - cloudy.info.offset_y, x - cloudy.info.offset_x)
            },
            "overcast",
        );
    }

    #[test]
    fn test_overlay_replaces_only_opaque_pixels() {
        let mut composer = IconComposer::new();
        composer.compose(IconCode(6));

        let mut behind = blank_frame();
        behind.draw_sprite(18, 14, &assets::CLOUD_DARK, INK);
        behind.draw_sprite(0, 0, &assets::MOSTLY_CLOUDY, INK);

        let rain = &assets::RAIN_1;
        let (ox, oy) = (18, rain.info().offset_y);
        assert_same(
            composer.scratch(),
            |x, y| {
                if rain.is_opaque(y - oy, x - ox) {
                    rain.sprite.is_ink(y - oy, x - ox)
                } else {
                    behind.get_pixel(x, y, INK)
                }
            },
            "light rain",
        );
    }

    #[test]
    fn test_single_fog_band_is_opaque() {
        let mut composer = IconComposer::new();
        composer.compose(IconCode(26));

        let mut sun = blank_frame();
        sun.draw_sprite(0, 0, &assets::SUNNY, INK);
        let band = &assets::FOG_TOP;
        let top = band.info.offset_y;
        let in_band = |y: i32| (top..top + band.info.height).contains(&y);

        assert_same(
            composer.scratch(),
            |x, y| if in_band(y) { band.is_ink(y - top, x) } else { sun.get_pixel(x, y, INK) },
            "high fog",
        );
        // some of the sun was blanked out under the band
        let erased = (0..ICON_WIDTH as i32)
            .flat_map(|x| (top..top + band.info.height).map(move |y| (x, y)))
            .filter(|&(x, y)| sun.get_pixel(x, y, INK) && !composer.scratch().get_pixel(x, y, INK))
            .count();
        assert!(erased > 0);
    }

    #[test]
    fn test_double_fog_lets_sky_through() {
        let mut composer = IconComposer::new();
        composer.compose(IconCode(28));

        let mut expected = blank_frame();
        expected.draw_sprite(0, 0, &assets::SUNNY, INK);
        expected.draw_sprite(0, 0, &assets::FOG_TOP, INK);
        expected.draw_sprite(0, 0, &assets::FOG_BOTTOM, INK);
        assert_eq!(composer.scratch().buffer(), expected.buffer());
    }

    #[test]
    fn test_fog_blend_modes() {
        assert_eq!(Fog::High.blend(), Blend::Opaque);
        assert_eq!(Fog::Low.blend(), Blend::Opaque);
        assert_eq!(Fog::Both.blend(), Blend::Transparent);
        assert_eq!(Fog::Both.bands().len(), 2);
    }
}
