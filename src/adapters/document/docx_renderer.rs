//! DOCX Renderer - Fills `{{key}}` placeholders inside an Office Open XML
//! word-processing archive.
//!
//! The main document part plus every header and footer part are rewritten;
//! every other archive entry is copied across untouched. Word often splits a
//! single visible token over several runs (`{{na` + `me}}`), so text is
//! joined per `<w:p>` paragraph before substitution. When a paragraph
//! changes, its full new text goes into the first `<w:t>` and the remaining
//! text runs are emptied.

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::domain::document::{placeholders, TemplateFormat};
use crate::domain::questionnaire::AnswerSet;
use crate::ports::{RenderError, TemplateRenderer};

const DOCUMENT_PART: &str = "word/document.xml";
const PARAGRAPH: &[u8] = b"w:p";
const TEXT_RUN: &[u8] = b"w:t";

/// Renderer for `.docx` templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for DocxRenderer {
    fn format(&self) -> TemplateFormat {
        TemplateFormat::Docx
    }

    fn render(&self, template: &[u8], answers: &AnswerSet) -> Result<Vec<u8>, RenderError> {
        let mut archive = ZipArchive::new(Cursor::new(template)).map_err(archive_error)?;
        if !archive.file_names().any(|name| name == DOCUMENT_PART) {
            return Err(RenderError::Archive(format!("missing {}", DOCUMENT_PART)));
        }

        let mut output = ZipWriter::new(Cursor::new(Vec::with_capacity(template.len())));

        for index in 0..archive.len() {
            let rewrite = {
                let entry = archive.by_index_raw(index).map_err(archive_error)?;
                is_text_part(entry.name())
            };

            if rewrite {
                let mut entry = archive.by_index(index).map_err(archive_error)?;
                let name = entry.name().to_string();
                let mut xml = String::new();
                entry.read_to_string(&mut xml).map_err(|e| {
                    RenderError::Encoding(format!("{}: {}", name, e))
                })?;
                drop(entry);

                let filled = fill_part(&xml, answers)?;
                output
                    .start_file(name, rewritten_part_options())
                    .map_err(archive_error)?;
                output
                    .write_all(filled.as_bytes())
                    .map_err(|e| RenderError::Archive(e.to_string()))?;
            } else {
                let entry = archive.by_index_raw(index).map_err(archive_error)?;
                output.raw_copy_file(entry).map_err(archive_error)?;
            }
        }

        let cursor = output.finish().map_err(archive_error)?;
        Ok(cursor.into_inner())
    }
}

/// Fixed timestamp keeps output a pure function of the inputs.
fn rewritten_part_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

fn archive_error(err: zip::result::ZipError) -> RenderError {
    RenderError::Archive(err.to_string())
}

/// `word/document.xml`, `word/headerN.xml` and `word/footerN.xml`.
fn is_text_part(name: &str) -> bool {
    if name == DOCUMENT_PART {
        return true;
    }
    match name.strip_prefix("word/") {
        Some(rest) => {
            !rest.contains('/')
                && rest.ends_with(".xml")
                && (rest.starts_with("header") || rest.starts_with("footer"))
        }
        None => false,
    }
}

enum Kind {
    ParagraphStart,
    ParagraphEnd,
    TextStart,
    TextEnd,
    Text,
    Other,
    Eof,
}

fn classify(event: &Event<'_>) -> Kind {
    match event {
        Event::Start(e) if e.name().as_ref() == PARAGRAPH => Kind::ParagraphStart,
        Event::End(e) if e.name().as_ref() == PARAGRAPH => Kind::ParagraphEnd,
        Event::Start(e) if e.name().as_ref() == TEXT_RUN => Kind::TextStart,
        Event::End(e) if e.name().as_ref() == TEXT_RUN => Kind::TextEnd,
        Event::Text(_) => Kind::Text,
        Event::Eof => Kind::Eof,
        _ => Kind::Other,
    }
}

/// Position of one text node inside a buffered paragraph.
struct TextSlot {
    /// Index of the enclosing `<w:t>` start tag.
    start: usize,
    /// Index of the text event.
    text: usize,
}

/// A `<w:p>` whose events are held back until its end tag is seen.
struct ParagraphFrame<'a> {
    events: Vec<Event<'a>>,
    text: String,
    slots: Vec<TextSlot>,
    open_run: Option<usize>,
}

impl<'a> ParagraphFrame<'a> {
    fn new(start: Event<'a>) -> Self {
        Self {
            events: vec![start],
            text: String::new(),
            slots: Vec::new(),
            open_run: None,
        }
    }

    fn push_text(&mut self, event: Event<'a>) -> Result<(), RenderError> {
        if let (Some(start), Event::Text(text)) = (self.open_run, &event) {
            let unescaped = text
                .unescape()
                .map_err(|e| RenderError::Xml(e.to_string()))?;
            self.text.push_str(&unescaped);
            self.slots.push(TextSlot {
                start,
                text: self.events.len(),
            });
        }
        self.events.push(event);
        Ok(())
    }

    /// Applies substitution to the joined paragraph text.
    fn finish(mut self, answers: &AnswerSet) -> Vec<Event<'a>> {
        let replaced = match placeholders::substitute(&self.text, answers) {
            Cow::Owned(text) => text,
            Cow::Borrowed(_) => return self.events,
        };

        let mut slots = self.slots.iter();
        if let Some(first) = slots.next() {
            if replaced.starts_with(char::is_whitespace) || replaced.ends_with(char::is_whitespace)
            {
                preserve_space(&mut self.events[first.start]);
            }
            self.events[first.text] = Event::Text(BytesText::new(&replaced).into_owned());
        }
        for slot in slots {
            self.events[slot.text] = Event::Text(BytesText::new(""));
        }

        self.events
    }
}

/// Word drops leading/trailing spaces unless the run says otherwise.
fn preserve_space(event: &mut Event<'_>) {
    if let Event::Start(start) = event {
        let present = matches!(start.try_get_attribute("xml:space"), Ok(Some(_)));
        if !present {
            start.push_attribute(("xml:space", "preserve"));
        }
    }
}

fn forward<'a>(
    stack: &mut [ParagraphFrame<'a>],
    writer: &mut Writer<Vec<u8>>,
    event: Event<'a>,
) -> Result<(), RenderError> {
    match stack.last_mut() {
        Some(frame) => {
            frame.events.push(event);
            Ok(())
        }
        None => writer
            .write_event(event)
            .map_err(|e| RenderError::Xml(e.to_string())),
    }
}

/// Rewrites one XML part, substituting tokens paragraph by paragraph.
fn fill_part(xml: &str, answers: &AnswerSet) -> Result<String, RenderError> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    let mut stack: Vec<ParagraphFrame<'_>> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            RenderError::Xml(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;

        match classify(&event) {
            Kind::Eof => break,
            Kind::ParagraphStart => stack.push(ParagraphFrame::new(event)),
            Kind::ParagraphEnd => {
                let mut frame = stack
                    .pop()
                    .ok_or_else(|| RenderError::Xml("unbalanced </w:p>".to_string()))?;
                frame.events.push(event);
                for finished in frame.finish(answers) {
                    forward(&mut stack, &mut writer, finished)?;
                }
            }
            Kind::TextStart => {
                if let Some(frame) = stack.last_mut() {
                    frame.open_run = Some(frame.events.len());
                }
                forward(&mut stack, &mut writer, event)?;
            }
            Kind::TextEnd => {
                if let Some(frame) = stack.last_mut() {
                    frame.open_run = None;
                }
                forward(&mut stack, &mut writer, event)?;
            }
            Kind::Text => match stack.last_mut() {
                Some(frame) => frame.push_text(event)?,
                None => forward(&mut stack, &mut writer, event)?,
            },
            Kind::Other => forward(&mut stack, &mut writer, event)?,
        }
    }

    if !stack.is_empty() {
        return Err(RenderError::Xml("unterminated <w:p>".to_string()));
    }

    String::from_utf8(writer.into_inner()).map_err(|e| RenderError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;
    const TAIL: &str = "</w:body></w:document>";

    fn body(paragraphs: &str) -> String {
        format!("{}{}{}", HEAD, paragraphs, TAIL)
    }

    fn docx(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn part(docx: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        text
    }

    fn answers() -> AnswerSet {
        [("name", "Alice"), ("age", "thirty")].into_iter().collect()
    }

    #[test]
    fn replaces_token_in_single_run() {
        let template = docx(&[(
            DOCUMENT_PART,
            &body("<w:p><w:r><w:t>Name: {{name}}</w:t></w:r></w:p>"),
        )]);

        let filled = DocxRenderer::new().render(&template, &answers()).unwrap();

        assert_eq!(
            part(&filled, DOCUMENT_PART),
            body("<w:p><w:r><w:t>Name: Alice</w:t></w:r></w:p>")
        );
    }

    #[test]
    fn joins_token_split_across_runs() {
        let template = docx(&[(
            DOCUMENT_PART,
            &body(
                "<w:p><w:r><w:t>Age: {{a</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>ge}}</w:t></w:r></w:p>",
            ),
        )]);

        let filled = DocxRenderer::new().render(&template, &answers()).unwrap();

        assert_eq!(
            part(&filled, DOCUMENT_PART),
            body("<w:p><w:r><w:t>Age: thirty</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t></w:t></w:r></w:p>")
        );
    }

    #[test]
    fn unknown_tokens_and_plain_paragraphs_are_untouched() {
        let xml = body(
            "<w:p><w:r><w:t xml:space=\"preserve\">Keep {{unknown}} &amp; this</w:t></w:r></w:p><w:p/>",
        );
        let template = docx(&[(DOCUMENT_PART, &xml)]);

        let filled = DocxRenderer::new().render(&template, &answers()).unwrap();

        assert_eq!(part(&filled, DOCUMENT_PART), xml);
    }

    #[test]
    fn values_are_xml_escaped() {
        let template = docx(&[(
            DOCUMENT_PART,
            &body("<w:p><w:r><w:t>{{name}}</w:t></w:r></w:p>"),
        )]);
        let answers: AnswerSet = [("name", "A & B <c>")].into_iter().collect();

        let filled = DocxRenderer::new().render(&template, &answers).unwrap();

        assert!(part(&filled, DOCUMENT_PART).contains("<w:t>A &amp; B &lt;c&gt;</w:t>"));
    }

    #[test]
    fn leading_space_in_value_marks_run_preserved() {
        let template = docx(&[(
            DOCUMENT_PART,
            &body("<w:p><w:r><w:t>{{name}}</w:t></w:r></w:p>"),
        )]);
        let answers: AnswerSet = [("name", "  indented")].into_iter().collect();

        let filled = DocxRenderer::new().render(&template, &answers).unwrap();

        assert!(part(&filled, DOCUMENT_PART)
            .contains(r#"<w:t xml:space="preserve">  indented</w:t>"#));
    }

    #[test]
    fn rewrites_headers_and_footers_but_copies_other_parts() {
        let styles = "<w:styles>{{name}}</w:styles>";
        let template = docx(&[
            ("[Content_Types].xml", "<Types/>"),
            (DOCUMENT_PART, &body("<w:p><w:r><w:t>{{name}}</w:t></w:r></w:p>")),
            ("word/header1.xml", "<w:hdr><w:p><w:r><w:t>{{age}}</w:t></w:r></w:p></w:hdr>"),
            ("word/footer2.xml", "<w:ftr><w:p><w:r><w:t>{{name}}</w:t></w:r></w:p></w:ftr>"),
            ("word/styles.xml", styles),
        ]);

        let filled = DocxRenderer::new().render(&template, &answers()).unwrap();

        assert!(part(&filled, "word/header1.xml").contains("<w:t>thirty</w:t>"));
        assert!(part(&filled, "word/footer2.xml").contains("<w:t>Alice</w:t>"));
        assert_eq!(part(&filled, "word/styles.xml"), styles);
        assert_eq!(part(&filled, "[Content_Types].xml"), "<Types/>");
    }

    #[test]
    fn nested_paragraph_text_stays_with_its_own_paragraph() {
        let template = docx(&[(
            DOCUMENT_PART,
            &body(
                "<w:p><w:r><w:t>{{</w:t></w:r><w:r><w:txbxContent><w:p><w:r><w:t>inner {{age}}</w:t></w:r></w:p></w:txbxContent></w:r><w:r><w:t>name}}</w:t></w:r></w:p>",
            ),
        )]);

        let filled = DocxRenderer::new().render(&template, &answers()).unwrap();
        let xml = part(&filled, DOCUMENT_PART);

        assert!(xml.contains("<w:t>inner thirty</w:t>"));
        assert!(xml.contains("<w:t>Alice</w:t>"));
    }

    #[test]
    fn output_is_deterministic() {
        let template = docx(&[(
            DOCUMENT_PART,
            &body("<w:p><w:r><w:t>{{name}} is {{age}}</w:t></w:r></w:p>"),
        )]);
        let renderer = DocxRenderer::new();

        let first = renderer.render(&template, &answers()).unwrap();
        let second = renderer.render(&template, &answers()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn rejects_non_archive_bytes() {
        let result = DocxRenderer::new().render(b"not a zip", &answers());
        assert!(matches!(result, Err(RenderError::Archive(_))));
    }

    #[test]
    fn rejects_archive_without_main_document() {
        let template = docx(&[("readme.txt", "hello")]);
        let result = DocxRenderer::new().render(&template, &answers());
        assert!(matches!(result, Err(RenderError::Archive(ref m)) if m.contains(DOCUMENT_PART)));
    }

    #[test]
    fn text_part_selection() {
        assert!(is_text_part("word/document.xml"));
        assert!(is_text_part("word/header1.xml"));
        assert!(is_text_part("word/footer3.xml"));
        assert!(!is_text_part("word/footnotes.xml"));
        assert!(!is_text_part("word/_rels/header1.xml.rels"));
        assert!(!is_text_part("word/styles.xml"));
    }
}
