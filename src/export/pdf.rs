//! PDF export
//!
//! Lays the content out on US Letter pages with half-inch margins in 12pt
//! Helvetica, writes it to a fixed file name and shares the file.

use super::{ensure_content, ShareItem, ShareSurface};
use crate::{Error, Result};
use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_FILE_NAME: &str = "CreativeIdeaAssistant_Idea.pdf";

const PAGE_WIDTH: f32 = 8.5 * 72.0;
const PAGE_HEIGHT: f32 = 11.0 * 72.0;
const MARGIN: f32 = 36.0;
const FONT_SIZE: f32 = 12.0;
const LEADING: f32 = FONT_SIZE * 1.2;
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const TEXT_HEIGHT: f32 = PAGE_HEIGHT - 2.0 * MARGIN;

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];
const DEFAULT_GLYPH_WIDTH: u16 = 556;

/// WinAnsiEncoding's 0x80..=0x9F block: character, code, Helvetica width.
const WIN_ANSI_HIGH: [(char, u8, u16); 27] = [
    ('\u{20AC}', 0x80, 556),  // €
    ('\u{201A}', 0x82, 222),  // ‚
    ('\u{0192}', 0x83, 556),  // ƒ
    ('\u{201E}', 0x84, 333),  // „
    ('\u{2026}', 0x85, 1000), // …
    ('\u{2020}', 0x86, 556),  // †
    ('\u{2021}', 0x87, 556),  // ‡
    ('\u{02C6}', 0x88, 333),  // ˆ
    ('\u{2030}', 0x89, 1000), // ‰
    ('\u{0160}', 0x8A, 667),  // Š
    ('\u{2039}', 0x8B, 333),  // ‹
    ('\u{0152}', 0x8C, 1000), // Œ
    ('\u{017D}', 0x8E, 611),  // Ž
    ('\u{2018}', 0x91, 222),  // ‘
    ('\u{2019}', 0x92, 222),  // ’
    ('\u{201C}', 0x93, 333),  // “
    ('\u{201D}', 0x94, 333),  // ”
    ('\u{2022}', 0x95, 350),  // •
    ('\u{2013}', 0x96, 556),  // –
    ('\u{2014}', 0x97, 1000), // —
    ('\u{02DC}', 0x98, 333),  // ˜
    ('\u{2122}', 0x99, 1000), // ™
    ('\u{0161}', 0x9A, 500),  // š
    ('\u{203A}', 0x9B, 333),  // ›
    ('\u{0153}', 0x9C, 944),  // œ
    ('\u{017E}', 0x9E, 500),  // ž
    ('\u{0178}', 0x9F, 667),  // Ÿ
];

/// Document information written into the PDF trailer.
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    pub creator: String,
    pub author: String,
    pub title: String,
    pub created: DateTime<Local>,
}

impl Default for PdfMetadata {
    fn default() -> Self {
        Self {
            creator: "Creative Idea Assistant".to_string(),
            author: "Idea Assistant User".to_string(),
            title: "Generated Idea".to_string(),
            created: Local::now(),
        }
    }
}

pub struct PdfExporter {
    output_dir: PathBuf,
    file_name: String,
}

impl PdfExporter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }

    /// Where exports are written. Each export overwrites this file.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Render `content`, write it to [`Self::output_path`] and share the file.
    pub fn export(
        &self,
        content: &str,
        metadata: &PdfMetadata,
        surface: &dyn ShareSurface,
    ) -> Result<PathBuf> {
        let content = ensure_content(content)?;
        let bytes = render(content, metadata)?;

        let path = self.output_path();
        fs::create_dir_all(&self.output_dir)?;
        fs::write(&path, &bytes).map_err(|e| {
            tracing::error!("Failed to write PDF to {}: {}", path.display(), e);
            e
        })?;
        tracing::info!("Wrote {} byte PDF to {}", bytes.len(), path.display());

        surface.present(&[ShareItem::File(path.clone())])?;
        Ok(path)
    }
}

/// Render `text` into a PDF document held in memory.
pub fn render(text: &str, metadata: &PdfMetadata) -> Result<Vec<u8>> {
    let lines = wrap_text(text, TEXT_WIDTH, FONT_SIZE);
    let lines_per_page = ((TEXT_HEIGHT - FONT_SIZE) / LEADING).floor() as usize + 1;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    let chunks: Vec<&[String]> = if lines.is_empty() {
        vec![lines.as_slice()]
    } else {
        lines.chunks(lines_per_page).collect()
    };
    for page_lines in chunks {
        let page_id = add_page(&mut doc, pages_id, page_lines)?;
        kids.push(page_id.into());
    }
    let page_count = kids.len() as i64;

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH as i64),
            Object::Integer(PAGE_HEIGHT as i64),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Creator" => Object::string_literal(encode_win_ansi(&metadata.creator)),
        "Author" => Object::string_literal(encode_win_ansi(&metadata.author)),
        "Title" => Object::string_literal(encode_win_ansi(&metadata.title)),
        "CreationDate" => Object::string_literal(
            metadata.created.format("D:%Y%m%d%H%M%S").to_string()
        ),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(pdf_error)?;
    Ok(bytes)
}

fn add_page(doc: &mut Document, pages_id: ObjectId, lines: &[String]) -> Result<ObjectId> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), real(FONT_SIZE)]),
        Operation::new("rg", vec![real(0.0), real(0.0), real(0.0)]),
        Operation::new("TL", vec![real(LEADING)]),
        Operation::new(
            "Td",
            vec![real(MARGIN), real(PAGE_HEIGHT - MARGIN - FONT_SIZE)],
        ),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(line))],
        ));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().map_err(pdf_error)?,
    ));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

fn pdf_error(e: impl std::fmt::Display) -> Error {
    Error::Io(std::io::Error::other(format!("PDF rendering failed: {}", e)))
}

fn glyph_width(c: char, font_size: f32) -> f32 {
    let units = match c as u32 {
        code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize],
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(ch, _, _)| *ch == c)
            .map(|(_, _, width)| *width)
            .unwrap_or(DEFAULT_GLYPH_WIDTH),
    };
    f32::from(units) * font_size / 1000.0
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(|c| glyph_width(c, font_size)).sum()
}

/// Greedy word wrap. Newlines start a new line; words wider than `max_width`
/// are split between characters.
pub(crate) fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let space = glyph_width(' ', font_size);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = text_width(word, font_size);
            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + space + word_width
            };

            if needed <= max_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width = needed;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for c in word.chars() {
                let w = glyph_width(c, font_size);
                if current_width + w > max_width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += w;
            }
        }

        lines.push(current);
    }

    lines
}

/// Map text onto WinAnsiEncoding bytes; unrepresentable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            0x09 => b' ',
            _ => WIN_ANSI_HIGH
                .iter()
                .find(|(ch, _, _)| *ch == c)
                .map(|(_, code, _)| *code)
                .unwrap_or(b'?'),
        })
        .collect()
}
