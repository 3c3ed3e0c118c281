//! Static font-metric tables for the two faces used on a quote card.
//!
//! Character widths are in em units (relative to font size). The rasterizer
//! shapes text with the real font files; these tables only drive line breaking,
//! so a small approximation error is tolerated by the horizontal padding.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Card fonts
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFont {
    /// Quote body.
    LatoBold,
    /// Attribution line.
    DejaVuSerifBold,
}

impl CardFont {
    /// `font-family` value written into the SVG; resolved against the font database.
    pub fn svg_family(&self) -> &'static str {
        match self {
            CardFont::LatoBold => "Lato",
            CardFont::DejaVuSerifBold => "DejaVu Serif",
        }
    }

    /// Generic CSS family used when the named face is not installed.
    pub fn generic_family(&self) -> &'static str {
        match self {
            CardFont::LatoBold => "sans-serif",
            CardFont::DejaVuSerifBold => "serif",
        }
    }

    pub fn metrics(&self) -> &'static FontMetricTable {
        match self {
            CardFont::LatoBold => &LATO_BOLD_TABLE,
            CardFont::DejaVuSerifBold => &DEJAVU_SERIF_BOLD_TABLE,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for characters outside the table.
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Measures the rendered width of a string in pixels at `font_size_px`.
    pub fn measure_px(&self, s: &str, font_size_px: f32) -> f32 {
        self.measure_str(s) * font_size_px
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            // Typographic quotes and apostrophes map to their ASCII counterparts.
            '\u{2018}' | '\u{2019}' => self.widths['\'' as usize - 32],
            '\u{201C}' | '\u{201D}' => self.widths['"' as usize - 32],
            '\u{2013}' => 0.5,
            '\u{2014}' => 1.0,
            '\u{2026}' => self.widths['.' as usize - 32] * 3.0,
            _ => self.average_char_width,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static LATO_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.20, 0.30, 0.40, 0.58, 0.58, 0.78, 0.72, 0.23, 0.30, 0.30, 0.41, 0.58, 0.22, 0.37, 0.22, 0.38,
        // 0     1     2     3     4     5     6     7     8     9
        0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58,
        // :     ;     <     =     >     ?     @
        0.24, 0.24, 0.58, 0.58, 0.58, 0.43, 0.84,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.69, 0.65, 0.67, 0.75, 0.57, 0.55, 0.73, 0.76, 0.30, 0.40, 0.68, 0.50, 0.93,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.76, 0.80, 0.61, 0.80, 0.64, 0.54, 0.59, 0.73, 0.69, 1.04, 0.67, 0.64, 0.62,
        // [     \     ]     ^     _     `
        0.30, 0.38, 0.30, 0.58, 0.44, 0.30,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.51, 0.56, 0.47, 0.56, 0.52, 0.33, 0.50, 0.56, 0.25, 0.25, 0.52, 0.25, 0.84,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.55, 0.56, 0.38, 0.43, 0.36, 0.56, 0.51, 0.78, 0.51, 0.51, 0.46,
        // {     |     }     ~
        0.30, 0.29, 0.30, 0.58,
    ],
    average_char_width: 0.52,
};

static DEJAVU_SERIF_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.35, 0.44, 0.52, 0.84, 0.70, 1.00, 0.87, 0.31, 0.46, 0.46, 0.52, 0.84, 0.38, 0.42, 0.38, 0.37,
        // 0     1     2     3     4     5     6     7     8     9
        0.70, 0.70, 0.70, 0.70, 0.70, 0.70, 0.70, 0.70, 0.70, 0.70,
        // :     ;     <     =     >     ?     @
        0.40, 0.40, 0.84, 0.84, 0.84, 0.58, 1.00,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.78, 0.84, 0.80, 0.87, 0.80, 0.76, 0.87, 0.95, 0.47, 0.47, 0.85, 0.74, 1.09,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.94, 0.87, 0.77, 0.87, 0.83, 0.72, 0.74, 0.88, 0.78, 1.12, 0.79, 0.74, 0.75,
        // [     \     ]     ^     _     `
        0.46, 0.37, 0.46, 0.84, 0.50, 0.50,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.65, 0.70, 0.59, 0.70, 0.65, 0.42, 0.70, 0.76, 0.38, 0.37, 0.72, 0.38, 1.12,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.76, 0.66, 0.70, 0.70, 0.55, 0.58, 0.46, 0.76, 0.65, 0.92, 0.69, 0.65, 0.60,
        // {     |     }     ~
        0.71, 0.37, 0.71, 0.84,
    ],
    average_char_width: 0.68,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(CardFont::LatoBold.metrics().measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = CardFont::LatoBold.metrics();
        // "Love" = L(0.50) + o(0.56) + v(0.51) + e(0.52) = 2.09
        let width = metrics.measure_str("Love");
        assert!((width - 2.09).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_measure_px_scales_with_size() {
        let metrics = CardFont::LatoBold.metrics();
        let em = metrics.measure_str("peace");
        assert!((metrics.measure_px("peace", 64.0) - em * 64.0).abs() < 1e-3);
    }

    #[test]
    fn test_typographic_punctuation_matches_ascii() {
        let metrics = CardFont::LatoBold.metrics();
        assert_eq!(metrics.measure_str("don\u{2019}t"), metrics.measure_str("don't"));
        assert_eq!(metrics.measure_str("\u{2014}"), 1.0);
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = CardFont::DejaVuSerifBold.metrics();
        assert_eq!(metrics.measure_str("é"), metrics.average_char_width);
    }

    #[test]
    fn test_serif_attribution_face_is_wider() {
        let text = "Modern Life Notes";
        assert!(
            CardFont::DejaVuSerifBold.metrics().measure_str(text)
                > CardFont::LatoBold.metrics().measure_str(text)
        );
    }
}
