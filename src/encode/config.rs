//! Qualifier encoder: configuration descriptor → wire configuration record.
//!
//! Every independently-masked field is matched against a small ordered table
//! of known bit patterns. An exact match sets the output enum; anything else
//! (zero or unrecognized bits) leaves the field absent. That silent
//! "unspecified" policy is load-bearing for backward compatibility and is
//! never an error.

use crate::config::ConfigDescription;
use crate::schema::{
    Configuration, Hdr, Keyboard, KeysHidden, LayoutDirection, NavHidden, Navigation, Orientation,
    ScreenLayoutLong, ScreenLayoutSize, ScreenRound, Touchscreen, UiModeNight, UiModeType,
    WideColorGamut,
};

/// Looks `value & mask` up in a `(bits, enum)` table; no match means the
/// qualifier stays unset.
fn lookup<T: Copy>(value: u8, mask: u8, table: &[(u8, T)]) -> Option<T> {
    let bits = value & mask;
    table.iter().find(|(b, _)| *b == bits).map(|(_, out)| *out)
}

const LAYOUT_DIRECTION: &[(u8, LayoutDirection)] = &[
    (ConfigDescription::LAYOUTDIR_LTR, LayoutDirection::Ltr),
    (ConfigDescription::LAYOUTDIR_RTL, LayoutDirection::Rtl),
];

const SCREEN_LAYOUT_SIZE: &[(u8, ScreenLayoutSize)] = &[
    (ConfigDescription::SCREENSIZE_SMALL, ScreenLayoutSize::Small),
    (ConfigDescription::SCREENSIZE_NORMAL, ScreenLayoutSize::Normal),
    (ConfigDescription::SCREENSIZE_LARGE, ScreenLayoutSize::Large),
    (ConfigDescription::SCREENSIZE_XLARGE, ScreenLayoutSize::Xlarge),
];

const SCREEN_LAYOUT_LONG: &[(u8, ScreenLayoutLong)] = &[
    (ConfigDescription::SCREENLONG_YES, ScreenLayoutLong::Long),
    (ConfigDescription::SCREENLONG_NO, ScreenLayoutLong::Notlong),
];

const SCREEN_ROUND: &[(u8, ScreenRound)] = &[
    (ConfigDescription::SCREENROUND_YES, ScreenRound::Round),
    (ConfigDescription::SCREENROUND_NO, ScreenRound::Notround),
];

const WIDE_COLOR_GAMUT: &[(u8, WideColorGamut)] = &[
    (ConfigDescription::WIDE_COLOR_GAMUT_YES, WideColorGamut::Widecg),
    (ConfigDescription::WIDE_COLOR_GAMUT_NO, WideColorGamut::Nowidecg),
];

const HDR: &[(u8, Hdr)] = &[
    (ConfigDescription::HDR_YES, Hdr::Highdr),
    (ConfigDescription::HDR_NO, Hdr::Lowdr),
];

const ORIENTATION: &[(u8, Orientation)] = &[
    (ConfigDescription::ORIENTATION_PORT, Orientation::Port),
    (ConfigDescription::ORIENTATION_LAND, Orientation::Land),
    (ConfigDescription::ORIENTATION_SQUARE, Orientation::Square),
];

const UI_MODE_TYPE: &[(u8, UiModeType)] = &[
    (ConfigDescription::UI_MODE_TYPE_NORMAL, UiModeType::Normal),
    (ConfigDescription::UI_MODE_TYPE_DESK, UiModeType::Desk),
    (ConfigDescription::UI_MODE_TYPE_CAR, UiModeType::Car),
    (ConfigDescription::UI_MODE_TYPE_TELEVISION, UiModeType::Television),
    (ConfigDescription::UI_MODE_TYPE_APPLIANCE, UiModeType::Appliance),
    (ConfigDescription::UI_MODE_TYPE_WATCH, UiModeType::Watch),
    (ConfigDescription::UI_MODE_TYPE_VR_HEADSET, UiModeType::Vrheadset),
];

const UI_MODE_NIGHT: &[(u8, UiModeNight)] = &[
    (ConfigDescription::UI_MODE_NIGHT_YES, UiModeNight::Night),
    (ConfigDescription::UI_MODE_NIGHT_NO, UiModeNight::Notnight),
];

const TOUCHSCREEN: &[(u8, Touchscreen)] = &[
    (ConfigDescription::TOUCHSCREEN_NOTOUCH, Touchscreen::Notouch),
    (ConfigDescription::TOUCHSCREEN_STYLUS, Touchscreen::Stylus),
    (ConfigDescription::TOUCHSCREEN_FINGER, Touchscreen::Finger),
];

const KEYS_HIDDEN: &[(u8, KeysHidden)] = &[
    (ConfigDescription::KEYSHIDDEN_NO, KeysHidden::Keysexposed),
    (ConfigDescription::KEYSHIDDEN_YES, KeysHidden::Keyshidden),
    (ConfigDescription::KEYSHIDDEN_SOFT, KeysHidden::Keyssoft),
];

const KEYBOARD: &[(u8, Keyboard)] = &[
    (ConfigDescription::KEYBOARD_NOKEYS, Keyboard::Nokeys),
    (ConfigDescription::KEYBOARD_QWERTY, Keyboard::Qwerty),
    (ConfigDescription::KEYBOARD_TWELVEKEY, Keyboard::Twelvekey),
];

const NAV_HIDDEN: &[(u8, NavHidden)] = &[
    (ConfigDescription::NAVHIDDEN_NO, NavHidden::Navexposed),
    (ConfigDescription::NAVHIDDEN_YES, NavHidden::Navhidden),
];

const NAVIGATION: &[(u8, Navigation)] = &[
    (ConfigDescription::NAVIGATION_NONAV, Navigation::Nonav),
    (ConfigDescription::NAVIGATION_DPAD, Navigation::Dpad),
    (ConfigDescription::NAVIGATION_TRACKBALL, Navigation::Trackball),
    (ConfigDescription::NAVIGATION_WHEEL, Navigation::Wheel),
];

/// Encodes a configuration descriptor into its wire record.
///
/// Unmasked fields copy verbatim; masked fields go through their lookup
/// tables. The `product` field is left empty here, the table encoder fills
/// it per config value.
pub fn encode_config(config: &ConfigDescription) -> Configuration {
    Configuration {
        mcc: config.mcc.into(),
        mnc: config.mnc.into(),
        locale: config.locale_tag(),

        layout_direction: lookup(
            config.screen_layout,
            ConfigDescription::MASK_LAYOUTDIR,
            LAYOUT_DIRECTION,
        ),
        screen_width: config.screen_width.into(),
        screen_height: config.screen_height.into(),
        screen_width_dp: config.screen_width_dp.into(),
        screen_height_dp: config.screen_height_dp.into(),
        smallest_screen_width_dp: config.smallest_screen_width_dp.into(),
        screen_layout_size: lookup(
            config.screen_layout,
            ConfigDescription::MASK_SCREENSIZE,
            SCREEN_LAYOUT_SIZE,
        ),
        screen_layout_long: lookup(
            config.screen_layout,
            ConfigDescription::MASK_SCREENLONG,
            SCREEN_LAYOUT_LONG,
        ),
        screen_round: lookup(
            config.screen_layout2,
            ConfigDescription::MASK_SCREENROUND,
            SCREEN_ROUND,
        ),
        wide_color_gamut: lookup(
            config.color_mode,
            ConfigDescription::MASK_WIDE_COLOR_GAMUT,
            WIDE_COLOR_GAMUT,
        ),
        hdr: lookup(config.color_mode, ConfigDescription::MASK_HDR, HDR),
        orientation: lookup(config.orientation, u8::MAX, ORIENTATION),
        ui_mode_type: lookup(
            config.ui_mode,
            ConfigDescription::MASK_UI_MODE_TYPE,
            UI_MODE_TYPE,
        ),
        ui_mode_night: lookup(
            config.ui_mode,
            ConfigDescription::MASK_UI_MODE_NIGHT,
            UI_MODE_NIGHT,
        ),
        density: config.density.into(),
        touchscreen: lookup(config.touchscreen, u8::MAX, TOUCHSCREEN),
        keys_hidden: lookup(
            config.input_flags,
            ConfigDescription::MASK_KEYSHIDDEN,
            KEYS_HIDDEN,
        ),
        keyboard: lookup(config.keyboard, u8::MAX, KEYBOARD),
        nav_hidden: lookup(
            config.input_flags,
            ConfigDescription::MASK_NAVHIDDEN,
            NAV_HIDDEN,
        ),
        navigation: lookup(config.navigation, u8::MAX, NAVIGATION),
        sdk_version: config.sdk_version.into(),

        product: String::new(),
    }
}
