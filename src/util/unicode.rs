use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '\u{2026}';

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` down to `max_cells` terminal cells, ending in `…` when anything
/// was removed. Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push(ELLIPSIS);
    out
}

/// Truncate or right-pad with spaces to exactly `cells` columns.
pub fn fit_to_width(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let w = display_width(&out);
    out.extend(std::iter::repeat_n(' ', cells.saturating_sub(w)));
    out
}

/// Byte offset of the grapheme after the one at `byte_offset`, or None at
/// the end of the string.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let rest = s.get(byte_offset..)?;
    let g = rest.graphemes(true).next()?;
    Some(byte_offset + g.len())
}

/// Byte offset of the grapheme before `byte_offset`, or None at the start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let head = s.get(..byte_offset)?;
    let g = head.graphemes(true).next_back()?;
    Some(byte_offset - g.len())
}

/// Terminal column of the cursor sitting at `byte_offset`
pub fn cursor_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_ascii_and_wide() {
        assert_eq!(display_width("rust"), 4);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_fits_unchanged() {
        assert_eq!(truncate_to_width("Docker", 6), "Docker");
        assert_eq!(truncate_to_width("Docker", 10), "Docker");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Kubernetes", 5), "Kube…");
        assert_eq!(truncate_to_width("Kubernetes", 1), "…");
        assert_eq!(truncate_to_width("Kubernetes", 0), "");
    }

    #[test]
    fn truncate_wide_chars_never_split() {
        // 日 is two cells: budget of 2 after the ellipsis fits one
        assert_eq!(truncate_to_width("日本語", 3), "日…");
        assert_eq!(truncate_to_width("日本語", 4), "日…");
        assert!(display_width(&truncate_to_width("日本語", 4)) <= 4);
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit_to_width("Go", 4), "Go  ");
        assert_eq!(fit_to_width("Haskell", 4), "Has…");
        assert_eq!(fit_to_width("日本語", 4), "日… ");
    }

    #[test]
    fn grapheme_stepping() {
        let s = "ae\u{301}b"; // a, e + combining acute, b
        assert_eq!(next_grapheme_boundary(s, 0), Some(1));
        assert_eq!(next_grapheme_boundary(s, 1), Some(4));
        assert_eq!(next_grapheme_boundary(s, 4), Some(5));
        assert_eq!(next_grapheme_boundary(s, 5), None);

        assert_eq!(prev_grapheme_boundary(s, 5), Some(4));
        assert_eq!(prev_grapheme_boundary(s, 4), Some(1));
        assert_eq!(prev_grapheme_boundary(s, 0), None);
    }

    #[test]
    fn grapheme_stepping_emoji() {
        let s = "👍🏽x";
        let after = next_grapheme_boundary(s, 0).unwrap();
        assert_eq!(&s[after..], "x");
        assert_eq!(prev_grapheme_boundary(s, after), Some(0));
    }

    #[test]
    fn cursor_col_counts_cells() {
        assert_eq!(cursor_col("日本", 3), 2);
        assert_eq!(cursor_col("ab", 10), 2);
    }
}
