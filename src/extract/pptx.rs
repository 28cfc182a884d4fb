use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::error::{Error, Result};

pub fn extract(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| Error::DocumentParse(format!("not a valid pptx archive: {}", e)))?;

    // Archive entry order is arbitrary; present slides in slide-number order.
    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| Some((slide_number(name)?, name.to_string())))
        .collect();
    slides.sort_by_key(|(number, _)| *number);

    let mut texts = Vec::new();
    for (_, name) in slides {
        let mut slide_xml = String::new();
        archive
            .by_name(&name)
            .map_err(|e| Error::DocumentParse(format!("failed to open {}: {}", name, e)))?
            .read_to_string(&mut slide_xml)
            .map_err(|e| Error::DocumentParse(format!("failed to read {}: {}", name, e)))?;
        let text = super::xml_paragraph_text(&slide_xml)?;
        if !text.is_empty() {
            texts.push(text);
        }
    }

    Ok(texts.join("\n"))
}

fn slide_number(name: &str) -> Option<u32> {
    name.strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}
