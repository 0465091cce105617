//! Reference document loading (`.txt` and `.docx`)

use super::files_in;
use crate::demand::Category;
use crate::error::{Result, StudioError};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Archive member holding the body of a Word document
const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Txt,
    Docx,
}

impl DocumentKind {
    fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Txt => "txt",
            DocumentKind::Docx => "docx",
        }
    }
}

/// One reference document as handed to the text capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub filename: String,
    pub content: String,
}

/// Per-category reference documents under one root directory
#[derive(Debug, Clone)]
pub struct ReferenceLibrary {
    root: PathBuf,
}

impl ReferenceLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.label())
    }

    /// All readable documents of a category: text files first, then Word
    /// documents, each group in file-name order.
    ///
    /// Returns `None` when the category directory does not exist.
    pub async fn load(&self, category: Category) -> Option<Vec<ReferenceDocument>> {
        let dir = self.category_dir(category);
        if !dir.is_dir() {
            debug!("No reference documents for {} at {:?}", category, dir);
            return None;
        }

        let files = files_in(&dir);
        let mut documents = Vec::new();

        for kind in [DocumentKind::Txt, DocumentKind::Docx] {
            for path in files.iter().filter(|p| has_extension(p, kind.extension())) {
                match read_document(path, kind).await {
                    Ok(content) => documents.push(ReferenceDocument {
                        kind,
                        filename: file_name(path),
                        content,
                    }),
                    Err(e) => warn!("Failed to read reference document {:?}: {}", path, e),
                }
            }
        }

        debug!("Loaded {} reference documents for {}", documents.len(), category);
        Some(documents)
    }

    /// JSON array of the category's documents, or an empty string when the
    /// category has no directory
    pub async fn reference_text(&self, category: Category) -> String {
        let Some(documents) = self.load(category).await else {
            return String::new();
        };

        match serde_json::to_string(&documents) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize reference documents: {}", e);
                String::new()
            }
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
}

async fn read_document(path: &Path, kind: DocumentKind) -> Result<String> {
    match kind {
        DocumentKind::Txt => {
            let content = tokio::fs::read_to_string(path).await?;
            Ok(content.strip_prefix('\u{FEFF}').map(str::to_string).unwrap_or(content))
        }
        DocumentKind::Docx => {
            let bytes = tokio::fs::read(path).await?;
            docx_text(&bytes)
        }
    }
}

/// Paragraph text of a `.docx` archive, one paragraph per line
pub fn docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut body = archive.by_name(DOCX_BODY).map_err(|e| StudioError::Document {
        message: format!("{}: {}", DOCX_BODY, e),
    })?;

    let mut xml = String::new();
    body.read_to_string(&mut xml)?;
    Ok(body_paragraphs(&xml)?.join("\n"))
}

fn parent_is_body(path: &[Vec<u8>]) -> bool {
    path.last().is_some_and(|name| name == b"body")
}

/// Text of each `w:p` directly under `w:body`, empty paragraphs included.
///
/// All `w:t` runs inside a paragraph count toward it, nested text-box
/// paragraphs too.
fn body_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && parent_is_body(&path) {
                    current = Some(String::new());
                }
                path.push(name);
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"p" && parent_is_body(&path) {
                    paragraphs.push(String::new());
                }
            }
            Event::End(_) => {
                let name = path.pop();
                if name.as_deref() == Some(b"p".as_slice()) && parent_is_body(&path) {
                    paragraphs.extend(current.take());
                }
            }
            Event::Text(t) => {
                let in_run_text = path.last().is_some_and(|name| name == b"t");
                if let (true, Some(text)) = (in_run_text, current.as_mut()) {
                    text.push_str(&t.unescape().map_err(|e| StudioError::Document { message: e.to_string() })?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document><w:body>{}</w:body></w:document>"#,
            body
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file(DOCX_BODY, options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_text() {
        let bytes = docx_bytes(&["第一段", "第二段"]);
        assert_eq!(docx_text(&bytes).unwrap(), "第一段\n第二段");
    }

    fn body(paragraphs: &str) -> String {
        format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:document><w:body>{}</w:body></w:document>"#, paragraphs)
    }

    #[test]
    fn test_body_paragraphs_runs_and_entities() {
        let xml = body(
            r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>第一段</w:t></w:r></w:p><w:p w:rsidR="1"><w:r><w:t xml:space="preserve">A &amp; </w:t></w:r><w:r><w:tab/><w:t>B</w:t></w:r></w:p>"#,
        );
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["第一段", "A & B"]);
    }

    #[test]
    fn test_body_paragraphs_keeps_empty_paragraphs() {
        let xml = body(r#"<w:p><w:r><w:t>一</w:t></w:r></w:p><w:p w:rsidR="00A1"/><w:p></w:p><w:p><w:r><w:t>二</w:t></w:r></w:p>"#);
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["一", "", "", "二"]);
    }

    #[test]
    fn test_body_paragraphs_text_box_stays_in_outer_paragraph() {
        let xml = body(concat!(
            "<w:p><w:r><w:t>前</w:t></w:r><w:r><mc:AlternateContent><mc:Choice><w:drawing><wps:txbx>",
            "<w:txbxContent><w:p><w:r><w:t>框</w:t></w:r></w:p></w:txbxContent>",
            "</wps:txbx></w:drawing></mc:Choice></mc:AlternateContent></w:r><w:r><w:t>后</w:t></w:r></w:p>",
            "<w:p><w:r><w:t>下一段</w:t></w:r></w:p>",
        ));
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["前框后", "下一段"]);
    }

    #[test]
    fn test_body_paragraphs_decodes_character_references() {
        let xml = body("<w:p><w:r><w:t>A&#x4E2D;B&#25991;</w:t></w:r></w:p>");
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["A中B文"]);
    }

    #[test]
    fn test_body_paragraphs_rejects_malformed_xml() {
        let xml = body("<w:p><w:r><w:t>未闭合</w:r></w:p>");
        assert!(matches!(body_paragraphs(&xml), Err(StudioError::Document { .. })));
    }

    #[test]
    fn test_docx_text_rejects_non_archive() {
        assert!(matches!(docx_text(b"plain text"), Err(StudioError::Document { .. })));
    }

    #[tokio::test]
    async fn test_load_category_documents() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("讲座类");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("b.txt"), "\u{FEFF}第二篇").unwrap();
        std::fs::write(dir.join("a.txt"), "第一篇").unwrap();
        std::fs::write(dir.join("0.docx"), docx_bytes(&["讲座回顾"])).unwrap();
        std::fs::write(dir.join("broken.docx"), b"not a zip").unwrap();
        std::fs::write(dir.join("poster.png"), b"ignored").unwrap();

        let library = ReferenceLibrary::new(temp_dir.path());
        let documents = library.load(Category::Lecture).await.unwrap();

        let names: Vec<_> = documents.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "0.docx"]);
        assert_eq!(documents[1].content, "第二篇");
        assert_eq!(documents[2].kind, DocumentKind::Docx);
        assert_eq!(documents[2].content, "讲座回顾");
    }

    #[tokio::test]
    async fn test_reference_text() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("比赛类");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("a.txt"), "赛事回顾").unwrap();

        let library = ReferenceLibrary::new(temp_dir.path());
        assert_eq!(
            library.reference_text(Category::Competition).await,
            r#"[{"type":"txt","filename":"a.txt","content":"赛事回顾"}]"#
        );
        assert_eq!(library.reference_text(Category::Gala).await, "");
    }
}
