//! @acp:module "Markdown Preview"
//! @acp:summary "Renders the assembled document as a markdown preview"
//! @acp:domain document
//! @acp:layer output

use handlebars::Handlebars;
use serde::Serialize;

use super::{Block, Document};
use crate::error::Result;

const PREVIEW_TEMPLATE: &str = "# {{title}}\n\n{{#each sections}}## {{this.title}}\n\n{{this.body}}\n\n{{#unless @last}}---\n\n{{/unless}}{{/each}}";

#[derive(Serialize)]
struct PreviewSection {
    title: String,
    body: String,
}

#[derive(Serialize)]
struct PreviewData<'a> {
    title: &'a str,
    sections: Vec<PreviewSection>,
}

/// Render a single block as markdown
pub fn block_markdown(block: &Block) -> String {
    match block {
        Block::Paragraph(text) => text.clone(),
        Block::Note(text) => format!("*{}*", text),
        Block::Table(rows) => {
            let mut lines = Vec::with_capacity(rows.len() + 1);
            for (i, row) in rows.iter().enumerate() {
                lines.push(format!("| {} |", row.join(" | ")));
                if i == 0 {
                    let separator: Vec<&str> = row.iter().map(|_| "---").collect();
                    lines.push(format!("| {} |", separator.join(" | ")));
                }
            }
            lines.join("\n")
        }
    }
}

/// Render the blocks of one section, separated by blank lines
pub fn blocks_markdown(blocks: &[Block]) -> String {
    blocks.iter().map(block_markdown).collect::<Vec<_>>().join("\n\n")
}

/// Render the full document preview
pub fn render_preview(document: &Document) -> Result<String> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry.register_template_string("preview", PREVIEW_TEMPLATE)?;

    let data = PreviewData {
        title: &document.title,
        sections: document
            .sections
            .iter()
            .map(|s| PreviewSection {
                title: s.title.clone(),
                body: blocks_markdown(&s.blocks),
            })
            .collect(),
    };

    let rendered = registry.render("preview", &data)?;
    Ok(rendered.trim_end().to_string())
}
