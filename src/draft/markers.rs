//! @acp:module "Draft Markers"
//! @acp:summary "Strip generation markers from free text and split it into blocks"
//! @acp:domain draft
//! @acp:layer parser
//!
//! Edited sections are free text. They usually start from a rendered draft,
//! so they can still carry the input echo and the draft label. These are
//! removed before a section reaches the preview or the exported document.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Input echo block: `**Your input:** ...` up to the first blank line, the
/// line before a draft label, or the end of the text. A following label start
/// is captured so it can be put back.
static INPUT_ECHO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\*\*Your input:\*\*.*?(?:\n\n|\n(\*\*AI-generated draft for )|\z)").unwrap()
});

/// Draft label line: `**AI-generated draft for <label>:**` and its line break
static DRAFT_LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*AI-generated draft for [^\n]*?:\*\*(?:\n\n|\n|\z)").unwrap()
});

/// Structural piece of a cleaned section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextBlock {
    Paragraph(String),
    /// Header row first, then data rows
    Table(Vec<Vec<String>>),
}

/// Remove input echoes and draft labels, then trim
pub fn clean_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let without_input = INPUT_ECHO_PATTERN.replace_all(content, |caps: &Captures| {
        caps.get(1).map(|label| label.as_str().to_string()).unwrap_or_default()
    });
    let without_label = DRAFT_LABEL_PATTERN.replace_all(&without_input, "");
    without_label.trim().to_string()
}

/// Split cleaned text into paragraphs and pipe tables
///
/// A table is a run of lines starting with `|` whose second line is a
/// separator row (`| --- | :-: |`). Runs without a separator stay text.
pub fn parse_blocks(text: &str) -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut table: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('|') {
            flush_paragraph(&mut paragraph, &mut blocks);
            table.push(trimmed);
            continue;
        }

        flush_table(&mut table, &mut blocks);
        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
        } else {
            paragraph.push(line.trim_end());
        }
    }

    flush_table(&mut table, &mut blocks);
    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<TextBlock>) {
    if !lines.is_empty() {
        blocks.push(TextBlock::Paragraph(lines.join("\n")));
        lines.clear();
    }
}

fn flush_table(lines: &mut Vec<&str>, blocks: &mut Vec<TextBlock>) {
    if lines.is_empty() {
        return;
    }

    if lines.len() >= 2 && is_separator_row(lines[1]) {
        let rows = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 1)
            .map(|(_, line)| split_row(line))
            .collect();
        blocks.push(TextBlock::Table(rows));
    } else {
        blocks.push(TextBlock::Paragraph(lines.join("\n")));
    }
    lines.clear();
}

fn split_row(line: &str) -> Vec<String> {
    let inner = line.trim().trim_start_matches('|').trim_end_matches('|');
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn is_separator_row(line: &str) -> bool {
    let cells = split_row(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            !cell.is_empty() && cell.contains('-') && cell.chars().all(|c| matches!(c, '-' | ':'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_strips_both_markers() {
        let text = "**Your input:** Solar\nmicrogrid\n\n**AI-generated draft for Target Group:**\n\nBody text.";
        assert_eq!(clean_content(text), "Body text.");
    }

    #[test]
    fn test_clean_single_newline_after_markers() {
        let text = "**Your input:** Rural SMEs\n**AI-generated draft for Target Group:**\nBody";
        assert_eq!(clean_content(text), "Body");
    }

    #[test]
    fn test_clean_markers_at_end_of_text() {
        assert_eq!(clean_content("Body\n\n**AI-generated draft for Target Group:**"), "Body");
        assert_eq!(clean_content("Body\n\n**Your input:** Rural SMEs"), "Body");
        assert_eq!(clean_content("**Your input:** only the echo"), "");
    }

    #[test]
    fn test_clean_multiline_echo_before_label() {
        let text = "**Your input:** Solar\nmicrogrid\n**AI-generated draft for Target Group:**\n\nBody";
        assert_eq!(clean_content(text), "Body");
    }

    #[test]
    fn test_clean_keeps_plain_text() {
        assert_eq!(clean_content("  Revised risk text \n"), "Revised risk text");
        assert_eq!(clean_content(""), "");
    }

    #[test]
    fn test_parse_paragraphs_and_table() {
        let text = "Intro line\nsecond line\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\nOutro";
        assert_eq!(
            parse_blocks(text),
            vec![
                TextBlock::Paragraph("Intro line\nsecond line".to_string()),
                TextBlock::Table(vec![
                    vec!["A".to_string(), "B".to_string()],
                    vec!["1".to_string(), "2".to_string()],
                ]),
                TextBlock::Paragraph("Outro".to_string()),
            ]
        );
    }

    #[test]
    fn test_pipes_without_separator_stay_text() {
        let text = "| not | a table |\n| still | text |";
        assert_eq!(
            parse_blocks(text),
            vec![TextBlock::Paragraph(text.to_string())]
        );
    }

    #[test]
    fn test_hyphen_and_pipe_alone_is_not_a_table() {
        let text = "Costs - approx. 10k | tbc";
        assert_eq!(parse_blocks(text), vec![TextBlock::Paragraph(text.to_string())]);
    }
}
