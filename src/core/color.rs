//! Zero-alloc ANSI colour wrapper plus the per-algorithm palette.

use std::{fmt, str};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("invalid hex colour digit")]
    InvalidHexDigit,
    #[error("hex colour must be exactly 6 digits")]
    InvalidHexLength,
    #[error("style `{0}` must look like LABEL=COLOR")]
    BadStyle(String),
}

// --- AnsiCode ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnsiCode {
    Static(&'static str),
    Inline { buf: [u8; 20], len: u8 },
}

impl AnsiCode {
    pub const fn red() -> Self {
        Self::Static("\x1b[31m")
    }
    pub const fn green() -> Self {
        Self::Static("\x1b[32m")
    }
    pub const fn yellow() -> Self {
        Self::Static("\x1b[33m")
    }
    pub const fn blue() -> Self {
        Self::Static("\x1b[34m")
    }
    pub const fn magenta() -> Self {
        Self::Static("\x1b[35m")
    }
    pub const fn cyan() -> Self {
        Self::Static("\x1b[36m")
    }
    pub const fn white() -> Self {
        Self::Static("\x1b[37m")
    }
    pub const fn industrial_orange() -> Self {
        Self::Static("\x1b[38;2;210;135;10m")
    }
    #[inline]
    pub const fn reset() -> Self {
        Self::Static("\x1b[0m")
    }

    /// True-colour escape `ESC[38;2;R;G;Bm`.
    #[must_use]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        let mut buf = [0u8; 20];
        buf[..7].copy_from_slice(b"\x1b[38;2;");
        let mut len = 7;

        for (i, v) in [r, g, b].into_iter().enumerate() {
            len += write_u8(&mut buf[len..], v);
            if i != 2 {
                buf[len] = b';';
                len += 1;
            }
        }
        buf[len] = b'm';
        len += 1;
        Self::Inline {
            buf,
            len: u8::try_from(len).unwrap_or(20),
        }
    }

    /// Parse colour names or `#rrggbb`.  Falls back to hex parser on miss.
    pub fn from_name(s: &str) -> Result<Self, ColorError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Self::red()),
            "green" => Ok(Self::green()),
            "yellow" => Ok(Self::yellow()),
            "blue" => Ok(Self::blue()),
            "magenta" => Ok(Self::magenta()),
            "cyan" => Ok(Self::cyan()),
            "white" => Ok(Self::white()),
            "orange" | "industrial" => Ok(Self::industrial_orange()),
            _ => Self::from_hex(s),
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let h = hex.trim().trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return Err(ColorError::InvalidHexLength);
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit);
        Ok(Self::rgb(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Inline { buf, len } => str::from_utf8(&buf[..*len as usize]).unwrap_or(""),
        }
    }
}

// --- Helpers ---
fn write_u8(dst: &mut [u8], mut n: u8) -> usize {
    let mut tmp = [0u8; 3];
    let mut i = 3;
    loop {
        i -= 1;
        tmp[i] = b'0' + n % 10;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let len = 3 - i;
    dst[..len].copy_from_slice(&tmp[i..]);
    len
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `text` in colour + reset sequence.
#[inline]
#[must_use]
pub fn colorize(c: &AnsiCode, text: &str) -> String {
    format!("{c}{text}{}", AnsiCode::reset())
}

// --- Palette ---

/// Colours handed out, in order, to labels the palette does not know.
const FALLBACK: [AnsiCode; 4] = [
    AnsiCode::industrial_orange(),
    AnsiCode::cyan(),
    AnsiCode::yellow(),
    AnsiCode::white(),
];

/// Label -> colour mapping for the chart.  Lookups ignore ASCII case.
#[derive(Debug, Clone)]
pub struct Palette {
    styles: Vec<(String, AnsiCode)>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            styles: vec![
                ("Trial Division".into(), AnsiCode::red()),
                ("Sieve of Eratosthenes".into(), AnsiCode::blue()),
                ("Sieve of Atkin".into(), AnsiCode::green()),
                ("Miller-Rabin".into(), AnsiCode::magenta()),
            ],
        }
    }
}

impl Palette {
    /// Add or replace the colour for `label`.
    pub fn set(&mut self, label: &str, color: AnsiCode) {
        match self
            .styles
            .iter_mut()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
        {
            Some(entry) => entry.1 = color,
            None => self.styles.push((label.to_owned(), color)),
        }
    }

    /// Apply a `LABEL=COLOR` override.
    pub fn apply(&mut self, style: &str) -> Result<(), ColorError> {
        let (label, color) = style
            .rsplit_once('=')
            .filter(|(l, _)| !l.trim().is_empty())
            .ok_or_else(|| ColorError::BadStyle(style.to_owned()))?;
        self.set(label.trim(), AnsiCode::from_name(color)?);
        Ok(())
    }

    /// Colour for `label`.  Unknown labels cycle through the fallback set by
    /// their position in the chart so neighbours stay distinguishable.
    #[must_use]
    pub fn color_for(&self, label: &str, position: usize) -> AnsiCode {
        self.styles
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .map_or(FALLBACK[position % FALLBACK.len()], |(_, c)| *c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_escape() {
        assert_eq!(AnsiCode::rgb(80, 0, 255).as_str(), "\x1b[38;2;80;0;255m");
    }

    #[test]
    fn names_and_hex() {
        assert_eq!(AnsiCode::from_name(" Blue ").unwrap(), AnsiCode::blue());
        assert_eq!(
            AnsiCode::from_name("#505050").unwrap(),
            AnsiCode::rgb(0x50, 0x50, 0x50)
        );
        assert!(matches!(
            AnsiCode::from_name("#5050"),
            Err(ColorError::InvalidHexLength)
        ));
        assert!(matches!(
            AnsiCode::from_name("#zz0000"),
            Err(ColorError::InvalidHexDigit)
        ));
    }

    #[test]
    fn palette_lookup_and_fallback() {
        let mut p = Palette::default();
        assert_eq!(p.color_for("sieve of atkin", 7), AnsiCode::green());
        assert_eq!(p.color_for("Unknown", 0), AnsiCode::industrial_orange());
        assert_eq!(p.color_for("Unknown", 1), AnsiCode::cyan());

        p.apply("Sieve of Atkin=#ff0000").unwrap();
        assert_eq!(p.color_for("Sieve of Atkin", 0), AnsiCode::rgb(255, 0, 0));
        p.apply("Custom=yellow").unwrap();
        assert_eq!(p.color_for("custom", 0), AnsiCode::yellow());
        assert!(matches!(p.apply("nocolor"), Err(ColorError::BadStyle(_))));
    }
}
