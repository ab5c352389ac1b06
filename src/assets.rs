/*
 *  assets.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Packed icon, notice and font blobs with their descriptors
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

//! Blobs under `data/` use the shared packing (row-major, continuous bit
//! index, MSB first, cleared bit = ink). Overlay masks live next to their
//! sprite as `*_alpha.bin`.

use crate::font::Font;
use crate::sprite::{AlphaSprite, Sprite, SpriteInfo};

// base sky
pub const SUNNY: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(36, 36, 10, 6),
    include_bytes!("../data/icons/sunny.bin"),
);
pub const MOON: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(30, 30, 13, 9),
    include_bytes!("../data/icons/moon.bin"),
);
pub const MOSTLY_SUNNY: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(48, 38, 4, 2),
    include_bytes!("../data/icons/mostly_sunny.bin"),
);
pub const MOSTLY_MOON: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(48, 38, 4, 2),
    include_bytes!("../data/icons/mostly_moon.bin"),
);
pub const MOSTLY_CLOUDY: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(52, 32, 2, 4),
    include_bytes!("../data/icons/mostly_cloudy.bin"),
);
pub const MOON_CLOUDY: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(52, 32, 2, 4),
    include_bytes!("../data/icons/moon_cloudy.bin"),
);
pub const CLOUDY: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(52, 30, 2, 6),
    include_bytes!("../data/icons/cloudy.bin"),
);
pub const CLOUD_DARK: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(36, 22, 0, 0),
    include_bytes!("../data/icons/cloud_dark.bin"),
);

// fog bands, 56 px wide, drawn across the whole icon frame
pub const FOG_TOP: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(56, 8, 0, 12),
    include_bytes!("../data/icons/fog_top.bin"),
);
pub const FOG_BOTTOM: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(56, 8, 0, 38),
    include_bytes!("../data/icons/fog_bottom.bin"),
);

pub const PRECIPITATION: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(10, 12, 0, 0),
    include_bytes!("../data/icons/precipitation.bin"),
);

// update failure notices
pub const NOTIME: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(24, 24, 0, 0),
    include_bytes!("../data/icons/notime.bin"),
);
pub const NOCONNECTION: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(24, 24, 0, 0),
    include_bytes!("../data/icons/noconnection.bin"),
);
pub const NOWEATHER: Sprite<'static> = Sprite::from_static(
    SpriteInfo::new(24, 24, 0, 0),
    include_bytes!("../data/icons/noweather.bin"),
);

// precipitation overlays, all share one frame anchored under the cloud
const OVERLAY: SpriteInfo = SpriteInfo::new(36, 14, 0, 34);

pub const BOLT_1: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/bolt_1.bin"),
    include_bytes!("../data/icons/bolt_1_alpha.bin"),
);
pub const BOLT_1_RAIN_2: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/bolt_1_rain_2.bin"),
    include_bytes!("../data/icons/bolt_1_rain_2_alpha.bin"),
);
pub const BOLT_2_RAIN_2: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/bolt_2_rain_2.bin"),
    include_bytes!("../data/icons/bolt_2_rain_2_alpha.bin"),
);
pub const BOLT_2_RAIN_4: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/bolt_2_rain_4.bin"),
    include_bytes!("../data/icons/bolt_2_rain_4_alpha.bin"),
);
pub const RAIN_1: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/rain_1.bin"),
    include_bytes!("../data/icons/rain_1_alpha.bin"),
);
pub const RAIN_2: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/rain_2.bin"),
    include_bytes!("../data/icons/rain_2_alpha.bin"),
);
pub const RAIN_3: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/rain_3.bin"),
    include_bytes!("../data/icons/rain_3_alpha.bin"),
);
pub const RAIN_4: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/rain_4.bin"),
    include_bytes!("../data/icons/rain_4_alpha.bin"),
);
pub const SNOW_1: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/snow_1.bin"),
    include_bytes!("../data/icons/snow_1_alpha.bin"),
);
pub const SNOW_2: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/snow_2.bin"),
    include_bytes!("../data/icons/snow_2_alpha.bin"),
);
pub const SNOW_3: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/snow_3.bin"),
    include_bytes!("../data/icons/snow_3_alpha.bin"),
);
pub const SNOW_4: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/snow_4.bin"),
    include_bytes!("../data/icons/snow_4_alpha.bin"),
);
pub const RAIN_1_SNOW_1: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/rain_1_snow_1.bin"),
    include_bytes!("../data/icons/rain_1_snow_1_alpha.bin"),
);
pub const RAIN_2_SNOW_1: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/rain_2_snow_1.bin"),
    include_bytes!("../data/icons/rain_2_snow_1_alpha.bin"),
);
pub const RAIN_2_SNOW_2: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/rain_2_snow_2.bin"),
    include_bytes!("../data/icons/rain_2_snow_2_alpha.bin"),
);
pub const RAIN_3_SNOW_3: AlphaSprite<'static> = AlphaSprite::from_static(
    OVERLAY,
    include_bytes!("../data/icons/rain_3_snow_3.bin"),
    include_bytes!("../data/icons/rain_3_snow_3_alpha.bin"),
);

/// Printable ASCII subset and degree sign, 9 px.
const FONT_SMALL_TABLE: [i32; 311] = [
    77, 343, 9,
    32, 0, 2, 1, // space
    33, 2, 1, 1, // !
    37, 3, 5, 1, // %
    39, 8, 1, 1, // '
    40, 9, 2, 1, // (
    41, 11, 2, 1, // )
    43, 13, 5, 1, // +
    44, 18, 2, 1, // ,
    45, 20, 4, 1, // -
    46, 24, 1, 1, // .
    47, 25, 5, 1, // /
    48, 30, 5, 1, // 0
    49, 35, 5, 1, // 1
    50, 40, 5, 1, // 2
    51, 45, 5, 1, // 3
    52, 50, 5, 1, // 4
    53, 55, 5, 1, // 5
    54, 60, 5, 1, // 6
    55, 65, 5, 1, // 7
    56, 70, 5, 1, // 8
    57, 75, 5, 1, // 9
    58, 80, 1, 1, // :
    63, 81, 5, 1, // ?
    65, 86, 5, 1, // A
    66, 91, 5, 1, // B
    67, 96, 5, 1, // C
    68, 101, 5, 1, // D
    69, 106, 5, 1, // E
    70, 111, 5, 1, // F
    71, 116, 5, 1, // G
    72, 121, 5, 1, // H
    73, 126, 3, 1, // I
    74, 129, 5, 1, // J
    75, 134, 5, 1, // K
    76, 139, 5, 1, // L
    77, 144, 5, 1, // M
    78, 149, 5, 1, // N
    79, 154, 5, 1, // O
    80, 159, 5, 1, // P
    81, 164, 5, 1, // Q
    82, 169, 5, 1, // R
    83, 174, 5, 1, // S
    84, 179, 5, 1, // T
    85, 184, 5, 1, // U
    86, 189, 5, 1, // V
    87, 194, 5, 1, // W
    88, 199, 5, 1, // X
    89, 204, 5, 1, // Y
    90, 209, 5, 1, // Z
    97, 214, 5, 1, // a
    98, 219, 5, 1, // b
    99, 224, 5, 1, // c
    100, 229, 5, 1, // d
    101, 234, 5, 1, // e
    102, 239, 5, 1, // f
    103, 244, 5, 1, // g
    104, 249, 5, 1, // h
    105, 254, 3, 1, // i
    106, 257, 4, 1, // j
    107, 261, 4, 1, // k
    108, 265, 3, 1, // l
    109, 268, 5, 1, // m
    110, 273, 5, 1, // n
    111, 278, 5, 1, // o
    112, 283, 5, 1, // p
    113, 288, 5, 1, // q
    114, 293, 5, 1, // r
    115, 298, 5, 1, // s
    116, 303, 5, 1, // t
    117, 308, 5, 1, // u
    118, 313, 5, 1, // v
    119, 318, 5, 1, // w
    120, 323, 5, 1, // x
    121, 328, 5, 1, // y
    122, 333, 5, 1, // z
    124, 338, 1, 1, // |
    176, 339, 4, 1, // °
];
pub const FONT_SMALL: Font<'static> =
    Font::from_static(&FONT_SMALL_TABLE, include_bytes!("../data/fonts/font_small.bin"));

/// Digits and unit symbols, 18 px.
const FONT_MEDIUM_TABLE: [i32; 91] = [
    22, 186, 18,
    32, 0, 4, 2, // space
    37, 4, 10, 2, // %
    43, 14, 10, 2, // +
    45, 24, 8, 2, // -
    46, 32, 2, 2, // .
    47, 34, 10, 2, // /
    48, 44, 10, 2, // 0
    49, 54, 10, 2, // 1
    50, 64, 10, 2, // 2
    51, 74, 10, 2, // 3
    52, 84, 10, 2, // 4
    53, 94, 10, 2, // 5
    54, 104, 10, 2, // 6
    55, 114, 10, 2, // 7
    56, 124, 10, 2, // 8
    57, 134, 10, 2, // 9
    58, 144, 2, 2, // :
    67, 146, 10, 2, // C
    70, 156, 10, 2, // F
    109, 166, 10, 2, // m
    124, 176, 2, 2, // |
    176, 178, 8, 2, // °
];
pub const FONT_MEDIUM: Font<'static> =
    Font::from_static(&FONT_MEDIUM_TABLE, include_bytes!("../data/fonts/font_medium.bin"));

/// Digits, minus, point and degree sign, 27 px.
const FONT_LARGE_TABLE: [i32; 55] = [
    13, 177, 27,
    45, 0, 12, 3, // -
    46, 12, 3, 3, // .
    48, 15, 15, 3, // 0
    49, 30, 15, 3, // 1
    50, 45, 15, 3, // 2
    51, 60, 15, 3, // 3
    52, 75, 15, 3, // 4
    53, 90, 15, 3, // 5
    54, 105, 15, 3, // 6
    55, 120, 15, 3, // 7
    56, 135, 15, 3, // 8
    57, 150, 15, 3, // 9
    176, 165, 12, 3, // °
];
pub const FONT_LARGE: Font<'static> =
    Font::from_static(&FONT_LARGE_TABLE, include_bytes!("../data/fonts/font_large.bin"));
