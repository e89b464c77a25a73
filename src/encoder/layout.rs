//! Fixed-width column layout for monospace receipt text.
//!
//! All widths count `char`s, not bytes, so multi-byte UTF-8 labels line up
//! the same as ASCII ones.

/// Separator line styles and their glyphs.
///
/// | Style | Glyph |
/// |-------|-------|
/// | Single | `-` |
/// | Double | `=` |
/// | Dotted | `.` |
/// | Thick | `█` |
/// | Wave | `~` |
/// | Star | `*` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Single,
    Double,
    Dotted,
    Thick,
    Wave,
    Star,
}

impl LineStyle {
    pub fn glyph(self) -> char {
        match self {
            LineStyle::Single => '-',
            LineStyle::Double => '=',
            LineStyle::Dotted => '.',
            LineStyle::Thick => '█',
            LineStyle::Wave => '~',
            LineStyle::Star => '*',
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "single" => Self::Single,
            "double" => Self::Double,
            "dotted" => Self::Dotted,
            "thick" => Self::Thick,
            "wave" => Self::Wave,
            "star" => Self::Star,
            _ => return None,
        })
    }
}

/// First `n` characters of `s`.
pub fn truncate(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Right-pad `s` with `pad` to `n` characters. Longer input is unchanged.
pub fn pad_end(s: &str, n: usize, pad: char) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat_n(pad, n.saturating_sub(s.chars().count())));
    out
}

/// Left-pad `s` with `pad` to `n` characters. Longer input is unchanged.
pub fn pad_start(s: &str, n: usize, pad: char) -> String {
    let fill = n.saturating_sub(s.chars().count());
    let mut out: String = std::iter::repeat_n(pad, fill).collect();
    out.push_str(s);
    out
}

/// The default label/left column share: `floor(width × 0.6)`.
#[inline]
pub fn label_width(width: usize) -> usize {
    width * 3 / 5
}

/// Label and value segments of a `formatted_line`.
///
/// The label column is `floor(width × 0.6)` wide: the label is cut and
/// padded to one less than that, then a single space. The value is
/// right-aligned in the remaining columns.
///
/// ```
/// use setu::encoder::layout::formatted_segments;
///
/// let (label, value) = formatted_segments("Subtotal", "9.99", 20, '.');
/// assert_eq!(label, "Subtotal... ");
/// assert_eq!(value, "    9.99");
/// ```
pub fn formatted_segments(label: &str, value: &str, width: usize, pad: char) -> (String, String) {
    let label_cols = label_width(width);
    let value_cols = width - label_cols;
    let body = label_cols.saturating_sub(1);

    let mut label_seg = pad_end(&truncate(label, body), body, pad);
    label_seg.push(' ');
    (label_seg, pad_start(value, value_cols, ' '))
}

/// Left and right segments of a `two_columns` line.
///
/// `left_width` of `None` or `Some(0)` selects the default 60% column.
///
/// ```
/// use setu::encoder::layout::column_segments;
///
/// let (l, r) = column_segments("Coffee", "3.50", 16, None);
/// assert_eq!(format!("{}{}", l, r), "Coffee      3.50");
/// ```
pub fn column_segments(
    left: &str,
    right: &str,
    width: usize,
    left_width: Option<usize>,
) -> (String, String) {
    let left_cols = left_width
        .filter(|&cols| cols > 0)
        .unwrap_or_else(|| label_width(width))
        .min(width);
    let right_cols = width - left_cols;

    let left_seg = pad_end(&truncate(left, left_cols), left_cols, ' ');
    let right_seg = pad_start(&truncate(right, right_cols), right_cols, ' ');
    (left_seg, right_seg)
}
