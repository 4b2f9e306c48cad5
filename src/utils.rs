use regex::Regex;
use std::path::PathBuf;

pub fn data_dir() -> PathBuf {
    if cfg!(target_os = "macos") || cfg!(target_os = "linux") {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/classfi")
    } else if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\classfi")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/classfi")
    }
}

/// Truncate to at most `max_len` characters, appending "..." when cut.
/// Counts chars, not bytes, so multibyte backend text cannot split a
/// character.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let cut = s
        .char_indices()
        .nth(keep)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    format!("{}...", &s[..cut])
}

/// Strip HTML tags from card content for terminal display.
/// Block-level closing tags become newlines so paragraphs stay separated.
pub fn strip_html(content: &str) -> String {
    lazy_static::lazy_static! {
        static ref BLOCK_END: Regex = Regex::new(r"(?i)</(p|div|h[1-6]|li|br)\s*>|<br\s*/?>").unwrap();
        static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    }

    let with_breaks = BLOCK_END.replace_all(content, "\n");
    let stripped = TAG.replace_all(&with_breaks, "");

    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    // Collapse runs of blank lines left behind by nested tags
    let mut out = String::with_capacity(decoded.len());
    let mut blank_run = 0;
    for line in decoded.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        let s = "Short string";
        let result = truncate_string(s, 20);
        assert_eq!(result, "Short string");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let s = "This is a very long string that should be truncated";
        let result = truncate_string(s, 20);
        assert_eq!(result, "This is a very lo...");
        assert!(result.len() <= 20);
    }

    #[test]
    fn test_truncate_string_exact_length() {
        let s = "Exactly twenty!!";
        let result = truncate_string(s, 20);
        assert_eq!(result, "Exactly twenty!!");
    }

    #[test]
    fn test_truncate_string_empty() {
        let s = "";
        let result = truncate_string(s, 20);
        assert_eq!(result, "");
    }

    #[test]
    fn test_truncate_string_multibyte_cuts_on_char_boundary() {
        let s = "é".repeat(30);
        let result = truncate_string(&s, 20);
        assert_eq!(result, format!("{}...", "é".repeat(17)));
        assert_eq!(result.chars().count(), 20);
    }

    #[test]
    fn test_truncate_string_multibyte_short_enough_untouched() {
        let s = "Éducation à la santé";
        assert_eq!(truncate_string(s, 48), s);
    }

    #[test]
    fn test_truncate_string_tiny_max_len() {
        assert_eq!(truncate_string("abcdef", 2), "...");
        assert_eq!(truncate_string("abcdef", 0), "...");
    }

    #[test]
    fn test_strip_html_plain_text() {
        assert_eq!(strip_html("The heart has four chambers."), "The heart has four chambers.");
    }

    #[test]
    fn test_strip_html_paragraphs() {
        let html = "<p>First paragraph.</p><p>Second paragraph.</p>";
        let text = strip_html(html);
        assert!(text.contains("First paragraph."));
        assert!(text.contains("Second paragraph."));
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_strip_html_inline_tags() {
        let html = "The <b>left atrium</b> receives <i>oxygenated</i> blood.";
        assert_eq!(strip_html(html), "The left atrium receives oxygenated blood.");
    }

    #[test]
    fn test_strip_html_entities() {
        let html = "Kingdom &amp; Phylum &gt; Class";
        assert_eq!(strip_html(html), "Kingdom & Phylum > Class");
    }

    #[test]
    fn test_strip_html_br_becomes_newline() {
        let html = "Line one<br/>Line two";
        assert_eq!(strip_html(html), "Line one\nLine two");
    }

    #[test]
    fn test_strip_html_collapses_blank_runs() {
        let html = "<div><p>One</p></div><div><p>Two</p></div>";
        let text = strip_html(html);
        assert!(!text.contains("\n\n\n"));
    }
}
