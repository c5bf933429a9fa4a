//! PDF page counting

use lopdf::Document;
use std::path::Path;

use crate::error::{Error, Result};

/// Count pages by reading the Count field from the catalog's Pages dictionary.
/// More reliable than walking `get_pages()` for nested page trees.
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    let pages_id = doc
        .get_object(catalog_id)?
        .as_dict()?
        .get(b"Pages")?
        .as_reference()?;
    let count = doc
        .get_object(pages_id)?
        .as_dict()?
        .get(b"Count")?
        .as_i64()?;
    Ok(count as usize)
}

/// Count the number of pages in a PDF file.
///
/// This is the only inspection the archiver performs on a downloaded episode;
/// a PDF that loads but reports zero pages is rejected.
pub fn count_pages(path: &Path) -> Result<usize> {
    let doc = Document::load(path)?;
    let page_count = count_pages_from_catalog(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}
