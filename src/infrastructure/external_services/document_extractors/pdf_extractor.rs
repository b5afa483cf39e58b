use async_trait::async_trait;
use lopdf::Document;
use lopdf::Object;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};

pub struct PdfExtractor {
    password: String,
    max_file_size: usize,
}

impl PdfExtractor {
    pub fn new(max_file_size: usize) -> Self {
        Self {
            password: String::new(),
            max_file_size,
        }
    }

    /// Drops layout-only dictionary keys before the page walk.
    fn strip_layout_keys(object: &mut Object) {
        static IGNORE: &[&[u8]] = &[
            b"BBox",
            b"Matrix",
            b"ColorSpace",
            b"Width",
            b"Height",
            b"BitsPerComponent",
            b"PTEX.FileName",
            b"PTEX.PageNumber",
            b"PTEX.InfoDict",
            b"ExtGState",
            b"MediaBox",
        ];

        if let Object::Dictionary(dict) = object {
            let keys_to_remove: Vec<_> = dict
                .iter()
                .filter(|(key, _)| IGNORE.contains(&key.as_slice()))
                .map(|(key, _)| key.clone())
                .collect();
            for key in keys_to_remove {
                dict.remove(&key);
            }
        }
    }

    fn load(data: &[u8], password: &str) -> Result<Document, DocumentExtractionError> {
        if !data.starts_with(b"%PDF") {
            return Err(DocumentExtractionError::CorruptedFile(
                "missing %PDF header".to_string(),
            ));
        }

        let mut doc = Document::load_mem(data)
            .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            doc.decrypt(password).map_err(|_e| {
                DocumentExtractionError::ExtractionFailed(
                    "Failed to decrypt PDF - password protected".to_string(),
                )
            })?;
        }

        for object in doc.objects.values_mut() {
            Self::strip_layout_keys(object);
        }

        Ok(doc)
    }

    /// Extracts every page in parallel. Pages that fail are reported in
    /// `page_errors` and left out of the text.
    fn extract_pages(doc: &Document) -> ExtractedContent {
        let pages: Vec<u32> = doc.get_pages().into_keys().collect();
        let page_count = pages.len();

        let mut extracted: Vec<(u32, Result<String, String>)> = pages
            .into_par_iter()
            .map(|page_num| {
                let text = doc.extract_text(&[page_num]).map_err(|e| {
                    format!("Failed to extract text from page {}: {}", page_num, e)
                });
                (page_num, text)
            })
            .collect();
        extracted.sort_by_key(|(page_num, _)| *page_num);

        let mut page_texts = Vec::with_capacity(page_count);
        let mut page_errors = Vec::new();
        for (_, result) in extracted {
            match result {
                Ok(text) => page_texts.push(text.trim_end().to_string()),
                Err(e) => page_errors.push(e),
            }
        }

        ExtractedContent {
            text: page_texts.join("\n").trim().to_string(),
            page_count,
            page_errors,
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(100 * 1024 * 1024)
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_text(&self, data: &[u8]) -> Result<ExtractedContent, DocumentExtractionError> {
        if data.len() > self.max_file_size {
            return Err(DocumentExtractionError::UnsupportedFormat(format!(
                "PDF is {} bytes, the limit is {}",
                data.len(),
                self.max_file_size
            )));
        }

        let data = data.to_vec();
        let password = self.password.clone();

        tokio::task::spawn_blocking(move || {
            let doc = Self::load(&data, &password)?;
            Ok(Self::extract_pages(&doc))
        })
        .await
        .map_err(|e| DocumentExtractionError::ExtractionFailed(e.to_string()))?
    }

    fn can_extract(&self, file_name: &str) -> bool {
        file_name.to_lowercase().ends_with(".pdf")
    }
}
