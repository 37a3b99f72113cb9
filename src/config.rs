//! The resource configuration descriptor and its packed qualifier fields.
//!
//! A [`ConfigDescription`] is a flat record of device-characteristic
//! qualifiers. Several qualifiers share a host byte via bitmasks (layout
//! direction, screen size, and screen-long all live in `screen_layout`, for
//! example). The mask and bit constants below mirror the binary configuration
//! layout this descriptor is read from; the qualifier encoder matches
//! sub-bits against them and treats anything unrecognized as "not specified".

use unic_langid::LanguageIdentifier;

/// A set of device-characteristic constraints (locale, density, screen size,
/// etc.) selecting which resource variant applies at runtime.
///
/// A default-constructed descriptor matches any configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigDescription {
    /// Mobile country code. `0` means any.
    pub mcc: u16,
    /// Mobile network code. `0` means any.
    pub mnc: u16,
    /// Locale, emitted as a BCP-47 tag. `None` means any.
    pub locale: Option<LanguageIdentifier>,

    /// Packed byte: layout direction, screen size, and screen-long.
    pub screen_layout: u8,
    /// Packed byte: screen roundness.
    pub screen_layout2: u8,
    /// Packed byte: wide color gamut and HDR.
    pub color_mode: u8,
    pub orientation: u8,
    /// Packed byte: UI mode type and night mode.
    pub ui_mode: u8,
    pub touchscreen: u8,
    /// Packed byte: keys-hidden and nav-hidden.
    pub input_flags: u8,
    pub keyboard: u8,
    pub navigation: u8,

    pub screen_width: u16,
    pub screen_height: u16,
    pub screen_width_dp: u16,
    pub screen_height_dp: u16,
    pub smallest_screen_width_dp: u16,
    pub density: u16,
    pub sdk_version: u16,
}

impl ConfigDescription {
    pub const MASK_LAYOUTDIR: u8 = 0xc0;
    pub const LAYOUTDIR_LTR: u8 = 0x40;
    pub const LAYOUTDIR_RTL: u8 = 0x80;

    pub const MASK_SCREENSIZE: u8 = 0x0f;
    pub const SCREENSIZE_SMALL: u8 = 0x01;
    pub const SCREENSIZE_NORMAL: u8 = 0x02;
    pub const SCREENSIZE_LARGE: u8 = 0x03;
    pub const SCREENSIZE_XLARGE: u8 = 0x04;

    pub const MASK_SCREENLONG: u8 = 0x30;
    pub const SCREENLONG_NO: u8 = 0x10;
    pub const SCREENLONG_YES: u8 = 0x20;

    pub const MASK_SCREENROUND: u8 = 0x03;
    pub const SCREENROUND_NO: u8 = 0x01;
    pub const SCREENROUND_YES: u8 = 0x02;

    pub const MASK_WIDE_COLOR_GAMUT: u8 = 0x03;
    pub const WIDE_COLOR_GAMUT_NO: u8 = 0x01;
    pub const WIDE_COLOR_GAMUT_YES: u8 = 0x02;

    pub const MASK_HDR: u8 = 0x0c;
    pub const HDR_NO: u8 = 0x04;
    pub const HDR_YES: u8 = 0x08;

    pub const ORIENTATION_PORT: u8 = 0x01;
    pub const ORIENTATION_LAND: u8 = 0x02;
    pub const ORIENTATION_SQUARE: u8 = 0x03;

    pub const MASK_UI_MODE_TYPE: u8 = 0x0f;
    pub const UI_MODE_TYPE_NORMAL: u8 = 0x01;
    pub const UI_MODE_TYPE_DESK: u8 = 0x02;
    pub const UI_MODE_TYPE_CAR: u8 = 0x03;
    pub const UI_MODE_TYPE_TELEVISION: u8 = 0x04;
    pub const UI_MODE_TYPE_APPLIANCE: u8 = 0x05;
    pub const UI_MODE_TYPE_WATCH: u8 = 0x06;
    pub const UI_MODE_TYPE_VR_HEADSET: u8 = 0x07;

    pub const MASK_UI_MODE_NIGHT: u8 = 0x30;
    pub const UI_MODE_NIGHT_NO: u8 = 0x10;
    pub const UI_MODE_NIGHT_YES: u8 = 0x20;

    pub const TOUCHSCREEN_NOTOUCH: u8 = 0x01;
    pub const TOUCHSCREEN_STYLUS: u8 = 0x02;
    pub const TOUCHSCREEN_FINGER: u8 = 0x03;

    pub const MASK_KEYSHIDDEN: u8 = 0x03;
    pub const KEYSHIDDEN_NO: u8 = 0x01;
    pub const KEYSHIDDEN_YES: u8 = 0x02;
    pub const KEYSHIDDEN_SOFT: u8 = 0x03;

    pub const KEYBOARD_NOKEYS: u8 = 0x01;
    pub const KEYBOARD_QWERTY: u8 = 0x02;
    pub const KEYBOARD_TWELVEKEY: u8 = 0x03;

    pub const MASK_NAVHIDDEN: u8 = 0x0c;
    pub const NAVHIDDEN_NO: u8 = 0x04;
    pub const NAVHIDDEN_YES: u8 = 0x08;

    pub const NAVIGATION_NONAV: u8 = 0x01;
    pub const NAVIGATION_DPAD: u8 = 0x02;
    pub const NAVIGATION_TRACKBALL: u8 = 0x03;
    pub const NAVIGATION_WHEEL: u8 = 0x04;

    /// Returns the BCP-47 language tag for the locale, or an empty string
    /// when no locale qualifier is set.
    pub fn locale_tag(&self) -> String {
        self.locale
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_any() {
        let config = ConfigDescription::default();
        assert_eq!(config.mcc, 0);
        assert_eq!(config.screen_layout, 0);
        assert_eq!(config.locale_tag(), "");
    }

    #[test]
    fn test_locale_tag() {
        let config = ConfigDescription {
            locale: Some("fr-CA".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(config.locale_tag(), "fr-CA");
    }

    #[test]
    fn test_shared_host_fields_do_not_overlap() {
        assert_eq!(
            ConfigDescription::MASK_LAYOUTDIR
                & (ConfigDescription::MASK_SCREENSIZE | ConfigDescription::MASK_SCREENLONG),
            0
        );
        assert_eq!(
            ConfigDescription::MASK_UI_MODE_TYPE & ConfigDescription::MASK_UI_MODE_NIGHT,
            0
        );
        assert_eq!(
            ConfigDescription::MASK_KEYSHIDDEN & ConfigDescription::MASK_NAVHIDDEN,
            0
        );
        assert_eq!(
            ConfigDescription::MASK_WIDE_COLOR_GAMUT & ConfigDescription::MASK_HDR,
            0
        );
    }
}
