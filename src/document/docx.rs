//! @acp:module "DOCX Writer"
//! @acp:summary "Serializes an assembled document into a WordprocessingML package"
//! @acp:domain document
//! @acp:layer output
//!
//! Writes the minimal set of OPC parts Word needs: content types, package
//! relationships, core properties, styles and the main document. Entries use
//! a fixed timestamp so equal documents produce equal bytes.

use std::io::{Cursor, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::{Block, Document};
use crate::error::{Result, WizardError};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:pPr><w:spacing w:after="160"/></w:pPr><w:rPr><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:rPr><w:sz w:val="56"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style><w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/></w:tblBorders></w:tblPr></w:style></w:styles>"#;

/// Writes [`Document`]s as `.docx` bytes
#[derive(Debug, Clone)]
pub struct DocxWriter {
    author: Option<String>,
    created: Option<DateTime<Utc>>,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxWriter {
    pub fn new() -> Self {
        Self {
            author: None,
            created: None,
        }
    }

    /// Set the creator recorded in the core properties
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the creation time recorded in the core properties
    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Serialize the document into an in-memory package
    ///
    /// Fails with [`WizardError::Export`] when any text holds a character
    /// XML 1.0 cannot represent.
    pub fn to_bytes(&self, document: &Document) -> Result<Vec<u8>> {
        self.check_text(document)?;

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", PACKAGE_RELS.to_string()),
            ("docProps/core.xml", self.core_properties(document)),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
            ("word/styles.xml", STYLES.to_string()),
            ("word/document.xml", document_xml(document)),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .last_modified_time(zip::DateTime::default())
            .compression_method(zip::CompressionMethod::Deflated);

        for (name, content) in &parts {
            zip.start_file(*name, options)?;
            zip.write_all(content.as_bytes())
                .map_err(|e| WizardError::Export(format!("{}: {}", name, e)))?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    /// Serialize and write to `path`
    ///
    /// Nothing is written unless serialization succeeds.
    pub fn write_to<P: AsRef<Path>>(&self, document: &Document, path: P) -> Result<usize> {
        let bytes = self.to_bytes(document)?;
        std::fs::write(path.as_ref(), &bytes)?;
        Ok(bytes.len())
    }

    fn check_text(&self, document: &Document) -> Result<()> {
        check_xml_chars("document title", &document.title)?;
        if let Some(ref author) = self.author {
            check_xml_chars("author", author)?;
        }
        for section in &document.sections {
            check_xml_chars(&section.title, &section.title)?;
            for block in &section.blocks {
                match block {
                    Block::Paragraph(text) | Block::Note(text) => {
                        check_xml_chars(&section.title, text)?
                    }
                    Block::Table(rows) => {
                        for cell in rows.iter().flatten() {
                            check_xml_chars(&section.title, cell)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn core_properties(&self, document: &Document) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        );
        xml.push_str(&format!("<dc:title>{}</dc:title>", xml_escape(&document.title)));
        if let Some(ref author) = self.author {
            xml.push_str(&format!("<dc:creator>{}</dc:creator>", xml_escape(author)));
        }
        if let Some(created) = self.created {
            xml.push_str(&format!(
                r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
                created.format("%Y-%m-%dT%H:%M:%SZ")
            ));
        }
        xml.push_str("</cp:coreProperties>");
        xml
    }
}

fn document_xml(document: &Document) -> String {
    let mut body = String::new();
    body.push_str(&styled_paragraph("Title", &document.title));

    for section in &document.sections {
        body.push_str(&styled_paragraph("Heading1", &section.title));
        for block in &section.blocks {
            match block {
                Block::Paragraph(text) => body.push_str(&paragraph(text, false)),
                Block::Note(text) => body.push_str(&paragraph(text, true)),
                Block::Table(rows) => body.push_str(&table(rows)),
            }
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        body
    )
}

fn styled_paragraph(style: &str, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr>{}</w:p>"#,
        style,
        runs(text, "")
    )
}

fn paragraph(text: &str, italic: bool) -> String {
    let props = if italic { "<w:rPr><w:i/></w:rPr>" } else { "" };
    format!("<w:p>{}</w:p>", runs(text, props))
}

/// One run per line, separated by line breaks
fn runs(text: &str, props: &str) -> String {
    text.split('\n')
        .map(|line| {
            format!(
                r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
                props,
                xml_escape(line)
            )
        })
        .collect::<Vec<_>>()
        .join("<w:r><w:br/></w:r>")
}

fn table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0).max(1);

    let mut xml = String::from(
        r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/></w:tblPr><w:tblGrid>"#,
    );
    for _ in 0..columns {
        xml.push_str("<w:gridCol/>");
    }
    xml.push_str("</w:tblGrid>");

    for (i, row) in rows.iter().enumerate() {
        let props = if i == 0 { "<w:rPr><w:b/></w:rPr>" } else { "" };
        xml.push_str("<w:tr>");
        for c in 0..columns {
            let cell = row.get(c).map(String::as_str).unwrap_or("");
            xml.push_str(&format!("<w:tc><w:p>{}</w:p></w:tc>", runs(cell, props)));
        }
        xml.push_str("</w:tr>");
    }

    xml.push_str("</w:tbl>");
    xml
}

/// Characters allowed by the XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
}

fn check_xml_chars(context: &str, text: &str) -> Result<()> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(WizardError::Export(format!(
            "{} contains control character U+{:04X}, which a .docx cannot store",
            context, c as u32
        ))),
        None => Ok(()),
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
