mod docx;
mod pdf;
mod pptx;

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};

/// Extract plain text from a supported document type based on file extension.
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    match ext.as_str() {
        ".txt" => String::from_utf8(data.to_vec())
            .map_err(|_| Error::DocumentParse("text file is not valid UTF-8".to_string())),
        ".docx" => docx::extract(data),
        ".pdf" => pdf::extract(data),
        ".pptx" => pptx::extract(data),
        _ => Err(Error::UnsupportedFormat(ext)),
    }
}

/// Collect the text runs of an OOXML part, one output line per paragraph.
/// Both WordprocessingML (`w:p`/`w:t`) and DrawingML (`a:p`/`a:t`) share the
/// same local names.
fn xml_paragraph_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| Error::DocumentParse(format!("malformed document XML: {}", e)))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::DocumentParse(format!("malformed document XML: {}", e)))
            }
            Ok(_) => {}
        }
    }

    // Text runs outside any closed paragraph still count.
    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n"))
}
