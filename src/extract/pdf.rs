use lopdf::Document;

use crate::error::{Error, Result};

pub fn extract(data: &[u8]) -> Result<String> {
    let document = Document::load_mem(data)
        .map_err(|e| Error::DocumentParse(format!("not a valid pdf: {}", e)))?;

    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Ok(String::new());
    }

    document
        .extract_text(&pages)
        .map_err(|e| Error::DocumentParse(format!("failed to extract pdf text: {}", e)))
}
