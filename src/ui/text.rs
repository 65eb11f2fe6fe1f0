//! Text layout helpers measured in terminal columns

use ratatui::style::Style;
use ratatui::text::Span;
use std::ops::Range;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns taken by `text`
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Word-wraps `text` to `width` columns
///
/// Existing line breaks are kept. Words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();

            while display_width(&word) > width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                let (head, rest) = split_at_width(&word, width);
                lines.push(head.to_string());
                word = rest.to_string();
            }

            let word_width = display_width(&word);
            let needed = if current_width == 0 {
                word_width
            } else {
                current_width + 1 + word_width
            };
            if needed > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(&word);
            current_width += word_width;
        }

        lines.push(current);
    }

    lines
}

/// Splits after the longest prefix that fits in `width` columns, taking at least one char
fn split_at_width(text: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = char_width(c);
        if used + w > width && i > 0 {
            return text.split_at(i);
        }
        used += w;
    }
    (text, "")
}

/// Shortens `text` to at most `width` columns, ending in `…` when cut
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = char_width(c);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Char ranges of the non-overlapping, case-insensitive occurrences of `needle`
pub fn match_ranges(text: &str, needle: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    let same = |a: char, b: char| a == b || a.to_lowercase().eq(b.to_lowercase());

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= chars.len() {
        if needle.iter().enumerate().all(|(j, &n)| same(chars[i + j], n)) {
            ranges.push(i..i + needle.len());
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Splits `text` into spans, styling occurrences of `needle` with `matched`
pub fn highlight(text: &str, needle: &str, base: Style, matched: Style) -> Vec<Span<'static>> {
    let ranges = match_ranges(text, needle);
    if ranges.is_empty() {
        return vec![Span::styled(text.to_string(), base)];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut cursor = 0;
    for range in ranges {
        if range.start > cursor {
            spans.push(Span::styled(
                chars[cursor..range.start].iter().collect::<String>(),
                base,
            ));
        }
        spans.push(Span::styled(
            chars[range.clone()].iter().collect::<String>(),
            matched,
        ));
        cursor = range.end;
    }
    if cursor < chars.len() {
        spans.push(Span::styled(chars[cursor..].iter().collect::<String>(), base));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("the quick brown fox", 9),
            vec!["the quick", "brown fox"]
        );
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_wrap_counts_wide_chars() {
        // each kana is two columns
        assert_eq!(wrap_text("ユーザー 設定", 8), vec!["ユーザー", "設定"]);
        assert_eq!(wrap_text("ユーザー", 4), vec!["ユー", "ザー"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("/pets/{petId}/photos", 8), "/pets/{…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_truncate_fits_display_width() {
        let cut = truncate("/ユーザー/プロフィール/設定", 10);
        assert!(display_width(&cut) <= 10);
        assert_eq!(cut, "/ユーザー…");
    }

    #[test]
    fn test_match_ranges() {
        assert_eq!(match_ranges("/pets/{petId}", "PET"), vec![1..4, 7..10]);
        assert!(match_ranges("/pets", "").is_empty());
        assert!(match_ranges("/pets", "users").is_empty());
        assert_eq!(match_ranges("aaaa", "aa"), vec![0..2, 2..4]);
    }

    #[test]
    fn test_highlight_splits_spans() {
        let base = Style::default();
        let matched = base.add_modifier(Modifier::UNDERLINED);
        let spans = highlight("/users/pets", "pet", base, matched);

        let parts: Vec<(&str, bool)> = spans
            .iter()
            .map(|s| {
                (
                    s.content.as_ref(),
                    s.style.add_modifier.contains(Modifier::UNDERLINED),
                )
            })
            .collect();
        assert_eq!(
            parts,
            vec![("/users/", false), ("pet", true), ("s", false)]
        );
    }
}
