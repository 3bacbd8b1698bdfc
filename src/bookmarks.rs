//! PDF outline (bookmark) injection built on top of `lopdf`.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::layout::OutlineEntry;

/// Errors that can occur while embedding an outline into a rendered PDF document.
#[derive(Debug)]
pub enum BookmarkError {
    /// The PDF bytes could not be parsed or written by `lopdf`.
    Parse(lopdf::Error),
    /// The trailer has no catalog reference.
    MissingCatalog,
    /// The catalog object is not a dictionary.
    InvalidCatalog,
    /// An outline entry points past the last page of the document.
    MissingPage {
        /// Title of the entry whose page is missing.
        title: String,
        /// The requested (1-indexed) page number.
        page_number: usize,
    },
}

impl From<lopdf::Error> for BookmarkError {
    fn from(err: lopdf::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<std::io::Error> for BookmarkError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(err.into())
    }
}

impl std::fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Failed to process PDF bytes for the outline: {err}"),
            Self::MissingCatalog => write!(f, "PDF catalog entry is missing"),
            Self::InvalidCatalog => write!(f, "PDF catalog entry is not a dictionary"),
            Self::MissingPage { title, page_number } => write!(
                f,
                "Outline entry '{}' refers to missing page {}",
                title, page_number
            ),
        }
    }
}

impl std::error::Error for BookmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::MissingCatalog | Self::InvalidCatalog | Self::MissingPage { .. } => None,
        }
    }
}

/// Adds a flat `/Outlines` tree with one `/Dest [page /Fit]` item per entry.
///
/// Returns the input unchanged when there are no entries.
pub fn apply_outline(pdf_bytes: &[u8], entries: &[OutlineEntry]) -> Result<Vec<u8>, BookmarkError> {
    if entries.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();
    let items = collect_items(&mut document, entries, &pages)?;

    let outlines_id = document.new_object_id();
    link_items(outlines_id, &mut document, &items);
    insert_outlines_root(outlines_id, &mut document, &items)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

struct OutlineItem {
    object_id: ObjectId,
    page_ref: ObjectId,
    title: String,
}

fn collect_items(
    document: &mut Document,
    entries: &[OutlineEntry],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<OutlineItem>, BookmarkError> {
    entries
        .iter()
        .map(|entry| {
            let page_ref = u32::try_from(entry.page)
                .ok()
                .and_then(|page| pages.get(&page).copied())
                .ok_or_else(|| BookmarkError::MissingPage {
                    title: entry.title.clone(),
                    page_number: entry.page,
                })?;
            Ok(OutlineItem {
                object_id: document.new_object_id(),
                page_ref,
                title: entry.title.clone(),
            })
        })
        .collect()
}

fn link_items(outlines_id: ObjectId, document: &mut Document, items: &[OutlineItem]) {
    for (index, item) in items.iter().enumerate() {
        let mut dictionary = Dictionary::new();
        dictionary.set("Title", Object::string_literal(item.title.as_str()));
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(item.page_ref),
                Object::Name("Fit".into()),
            ]),
        );
        dictionary.set("Parent", Object::Reference(outlines_id));
        if let Some(previous) = index.checked_sub(1).and_then(|prev| items.get(prev)) {
            dictionary.set("Prev", Object::Reference(previous.object_id));
        }
        if let Some(next) = items.get(index + 1) {
            dictionary.set("Next", Object::Reference(next.object_id));
        }
        document
            .objects
            .insert(item.object_id, Object::Dictionary(dictionary));
    }
}

fn insert_outlines_root(
    outlines_id: ObjectId,
    document: &mut Document,
    items: &[OutlineItem],
) -> Result<(), BookmarkError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;

    let mut dictionary = Dictionary::new();
    dictionary.set("Type", Object::Name("Outlines".into()));
    dictionary.set("Count", Object::Integer(items.len() as i64));
    if let (Some(first), Some(last)) = (items.first(), items.last()) {
        dictionary.set("First", Object::Reference(first.object_id));
        dictionary.set("Last", Object::Reference(last.object_id));
    }
    document
        .objects
        .insert(outlines_id, Object::Dictionary(dictionary));

    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;
    catalog.set("Outlines", Object::Reference(outlines_id));
    catalog.set("PageMode", Object::Name("UseOutlines".into()));
    Ok(())
}
