use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::error::{Error, Result};

pub fn extract(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| Error::DocumentParse(format!("not a valid docx archive: {}", e)))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| Error::DocumentParse(format!("docx is missing word/document.xml: {}", e)))?
        .read_to_string(&mut document_xml)
        .map_err(|e| Error::DocumentParse(format!("failed to read word/document.xml: {}", e)))?;

    super::xml_paragraph_text(&document_xml)
}
