//! ANSI terminal styles.
//!
//! Every named [`Style`] maps to one SGR escape sequence. Painting wraps text
//! as `code + text + reset`. Styles do not nest: the trailing reset clears
//! everything, including styles applied by an outer paint.
//!
//! ```
//! use omnos_utils::color::{colors, Style};
//!
//! assert_eq!(colors::red("hi"), "\x1b[31mhi\x1b[0m");
//! assert_eq!(Style::Bold.code(), "\x1b[1m");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::config::ColorConfig;

/// A named terminal style.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Reset,
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,

    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,

    BgBlack,
    BgRed,
    BgGreen,
    BgYellow,
    BgBlue,
    BgMagenta,
    BgCyan,
    BgWhite,

    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,

    BgBrightBlack,
    BgBrightRed,
    BgBrightGreen,
    BgBrightYellow,
    BgBrightBlue,
    BgBrightMagenta,
    BgBrightCyan,
    BgBrightWhite,
}

/// Generates the name/code tables and one free painting function per style.
macro_rules! styles {
    ($($variant:ident => $name:ident, $code:literal;)+) => {
        impl Style {
            /// Every style, in declaration order.
            pub const ALL: &'static [Style] = &[$(Style::$variant),+];

            /// The raw escape sequence for this style.
            #[must_use]
            pub const fn code(self) -> &'static str {
                match self {
                    $(Style::$variant => concat!("\x1b[", $code, "m"),)+
                }
            }

            /// The `snake_case` name accepted by [`Style::from_str`].
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Style::$variant => stringify!($name),)+
                }
            }
        }

        impl FromStr for Style {
            type Err = UnknownStyle;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($name) => Ok(Style::$variant),)+
                    _ => Err(UnknownStyle(s.to_string())),
                }
            }
        }

        /// One function per style: `colors::red("hi")`.
        pub mod colors {
            use super::Style;

            $(
                #[doc = concat!("Wrap `text` in the `", stringify!($name), "` style.")]
                #[must_use]
                pub fn $name(text: &str) -> String {
                    Style::$variant.paint(text)
                }
            )+
        }
    };
}

styles! {
    Reset => reset, "0";
    Bold => bold, "1";
    Dim => dim, "2";
    Italic => italic, "3";
    Underline => underline, "4";
    Blink => blink, "5";
    Reverse => reverse, "7";
    Hidden => hidden, "8";

    Black => black, "30";
    Red => red, "31";
    Green => green, "32";
    Yellow => yellow, "33";
    Blue => blue, "34";
    Magenta => magenta, "35";
    Cyan => cyan, "36";
    White => white, "37";

    BgBlack => bg_black, "40";
    BgRed => bg_red, "41";
    BgGreen => bg_green, "42";
    BgYellow => bg_yellow, "43";
    BgBlue => bg_blue, "44";
    BgMagenta => bg_magenta, "45";
    BgCyan => bg_cyan, "46";
    BgWhite => bg_white, "47";

    BrightBlack => bright_black, "90";
    BrightRed => bright_red, "91";
    BrightGreen => bright_green, "92";
    BrightYellow => bright_yellow, "93";
    BrightBlue => bright_blue, "94";
    BrightMagenta => bright_magenta, "95";
    BrightCyan => bright_cyan, "96";
    BrightWhite => bright_white, "97";

    BgBrightBlack => bg_bright_black, "100";
    BgBrightRed => bg_bright_red, "101";
    BgBrightGreen => bg_bright_green, "102";
    BgBrightYellow => bg_bright_yellow, "103";
    BgBrightBlue => bg_bright_blue, "104";
    BgBrightMagenta => bg_bright_magenta, "105";
    BgBrightCyan => bg_bright_cyan, "106";
    BgBrightWhite => bg_bright_white, "107";
}

impl Style {
    /// Wrap `text` as `code + text + reset`.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        let code = self.code();
        let reset = Style::Reset.code();
        let mut out = String::with_capacity(code.len() + text.len() + reset.len());
        out.push_str(code);
        out.push_str(text);
        out.push_str(reset);
        out
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a style name is looked up that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style: {0:?}")]
pub struct UnknownStyle(pub String);

/// A switchable painter.
///
/// Disabled palettes return text untouched, for output going to files or
/// pipes. Whether to disable is the caller's decision; nothing here inspects
/// the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// A palette that emits escapes when `enabled`.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Build from the `[color]` config section.
    #[must_use]
    pub fn from_config(config: &ColorConfig) -> Self {
        Self::new(config.enabled)
    }

    /// Whether escapes are emitted.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Paint `text` in `style`, or return it as-is when disabled.
    #[must_use]
    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            style.paint(text)
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&ColorConfig::default())
    }
}
