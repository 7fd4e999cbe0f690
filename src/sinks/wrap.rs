//! Word wrapping for console output

/// Wrap `text` into lines of at most `width` characters.
///
/// Greedy word fill with single-space joins. Words longer than `width`
/// flush the current line and are hard-split into width-sized chunks.
/// Paragraphs (separated by newlines) wrap independently; an empty
/// paragraph produces one empty line. Empty input, or a width below 1,
/// produces no lines.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if text.is_empty() || width < 1 {
        return lines;
    }

    let normalized = text.replace("\r\n", "\n");

    for paragraph in normalized.split('\n') {
        let paragraph = paragraph.trim();

        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut line = String::new();
        let mut line_length = 0;

        for word in paragraph.split_whitespace() {
            let word_length = word.chars().count();

            if word_length > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_length = 0;
                }

                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(width) {
                    lines.push(chunk.iter().collect());
                }
                continue;
            }

            if line.is_empty() {
                line.push_str(word);
                line_length = word_length;
            } else if line_length + 1 + word_length > width {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
                line_length = word_length;
            } else {
                line.push(' ');
                line.push_str(word);
                line_length += 1 + word_length;
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_word_is_hard_split() {
        assert_eq!(wrap_lines("abcdefg", 3), ["abc", "def", "g"]);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap_lines("hello world", 20), ["hello world"]);
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        assert!(wrap_lines("", 20).is_empty());
    }

    #[test]
    fn test_zero_width_yields_no_lines() {
        assert!(wrap_lines("hello", 0).is_empty());
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        assert_eq!(
            wrap_lines("the quick brown fox", 9),
            ["the quick", "brown", "fox"]
        );
    }

    #[test]
    fn test_word_exactly_at_width() {
        assert_eq!(wrap_lines("alpha beta", 5), ["alpha", "beta"]);
    }

    #[test]
    fn test_long_word_flushes_pending_line() {
        assert_eq!(
            wrap_lines("ok abcdefgh", 4),
            ["ok", "abcd", "efgh"]
        );
    }

    #[test]
    fn test_paragraphs_wrap_independently() {
        assert_eq!(
            wrap_lines("first paragraph\nsecond one", 10),
            ["first", "paragraph", "second one"]
        );
    }

    #[test]
    fn test_blank_paragraph_becomes_empty_line() {
        assert_eq!(wrap_lines("one\n\ntwo", 10), ["one", "", "two"]);
    }

    #[test]
    fn test_crlf_is_normalized() {
        assert_eq!(wrap_lines("one\r\ntwo", 10), ["one", "two"]);
    }

    #[test]
    fn test_runs_of_spaces_collapse() {
        assert_eq!(wrap_lines("a   b", 10), ["a b"]);
    }
}
