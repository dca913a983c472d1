//! lopdf-backed implementation of the document capabilities.
//!
//! Reading walks the catalog's `Outlines` dictionary chain
//! (`First`/`Next`, children under `First` of an item) into
//! [`OutlineNode`]s. Writing buffers bookmarks in an arena and only
//! materializes the outline item dictionaries on save, so nothing touches
//! the document until every entry has been validated.

use crate::document::{OutlineSink, OutlineSource};
use crate::error::{OutlineError, Result};
use crate::tree::OutlineNode;
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat, dictionary};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// An opened PDF with its pages in document order.
pub struct PdfDocument {
    doc: Document,
    pages: Vec<ObjectId>,
}

impl PdfDocument {
    /// Load a PDF from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let doc = Document::load(path)?;
        Ok(Self::from_document(doc))
    }

    pub(crate) fn from_document(doc: Document) -> Self {
        let pages = doc.get_pages().into_values().collect();
        Self { doc, pages }
    }

    /// Clone this document into a writer that accepts new bookmarks.
    pub fn writer(&self) -> PdfWriter {
        PdfWriter {
            doc: self.doc.clone(),
            pages: self.pages.clone(),
            bookmarks: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn deref<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj.as_reference() {
            Ok(id) => self.doc.get_object(id).unwrap_or(obj),
            Err(_) => obj,
        }
    }

    /// Read one sibling chain of outline items. An item's children become a
    /// `Group` immediately after the item's own entry, one level deeper.
    fn read_chain(
        &self,
        mut item_id: ObjectId,
        page_index: &HashMap<ObjectId, usize>,
        out: &mut Vec<OutlineNode>,
    ) -> Result<()> {
        loop {
            let item = self.doc.get_dictionary(item_id)?;

            let title = item
                .get(b"Title")
                .map(|obj| decode_pdf_string(self.deref(obj)))
                .unwrap_or_default();
            let page = self.destination_page(item, page_index);
            out.push(OutlineNode::Entry { title, page });

            if let Ok(first) = item.get(b"First") {
                let mut children = Vec::new();
                self.read_chain(first.as_reference()?, page_index, &mut children)?;
                out.push(OutlineNode::Group(children));
            }

            match item.get(b"Next") {
                Ok(next) => item_id = next.as_reference()?,
                Err(_) => break,
            }
        }
        Ok(())
    }

    /// Resolve an outline item's target page index. Falls back to page 0
    /// when the destination cannot be resolved.
    fn destination_page(&self, item: &Dictionary, page_index: &HashMap<ObjectId, usize>) -> usize {
        self.destination_array(item)
            .and_then(|dest| dest.first())
            .and_then(|obj| obj.as_reference().ok())
            .and_then(|id| page_index.get(&id).copied())
            .unwrap_or(0)
    }

    /// The destination array from `Dest`, or from a `GoTo` action's `D`.
    fn destination_array<'a>(&'a self, item: &'a Dictionary) -> Option<&'a Vec<Object>> {
        let target = item.get(b"Dest").ok().or_else(|| {
            let action = self.deref(item.get(b"A").ok()?).as_dict().ok()?;
            action.get(b"D").ok()
        })?;
        self.deref(target).as_array().ok()
    }
}

impl OutlineSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn outline(&self) -> Result<Vec<OutlineNode>> {
        let page_index: HashMap<ObjectId, usize> = self
            .pages
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();

        let catalog_id = self.doc.trailer.get(b"Root")?.as_reference()?;
        let catalog = self.doc.get_dictionary(catalog_id)?;

        let Ok(outlines_obj) = catalog.get(b"Outlines") else {
            return Ok(Vec::new());
        };
        let outlines = self.doc.get_dictionary(outlines_obj.as_reference()?)?;

        let mut nodes = Vec::new();
        if let Ok(first) = outlines.get(b"First") {
            self.read_chain(first.as_reference()?, &page_index, &mut nodes)?;
        }
        Ok(nodes)
    }
}

/// Handle to a bookmark buffered in a [`PdfWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookmarkId(usize);

#[derive(Debug, Clone)]
struct BufferedBookmark {
    title: String,
    page: usize,
    children: Vec<usize>,
}

/// Writer over a cloned document. Bookmarks accumulate in memory; `save`
/// builds the outline dictionaries, points the catalog at them, and writes
/// the new file.
pub struct PdfWriter {
    doc: Document,
    pages: Vec<ObjectId>,
    bookmarks: Vec<BufferedBookmark>,
    roots: Vec<usize>,
}

impl OutlineSink for PdfWriter {
    type Handle = BookmarkId;

    fn add_bookmark(
        &mut self,
        title: &str,
        page: usize,
        parent: Option<BookmarkId>,
    ) -> BookmarkId {
        let id = self.bookmarks.len();
        self.bookmarks.push(BufferedBookmark {
            title: title.to_string(),
            page,
            children: Vec::new(),
        });
        match parent {
            Some(BookmarkId(parent_id)) => self.bookmarks[parent_id].children.push(id),
            None => self.roots.push(id),
        }
        BookmarkId(id)
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        if !self.roots.is_empty() {
            let outline_root_id = self.build_outline_objects();
            let catalog_id = self.doc.trailer.get(b"Root")?.as_reference()?;
            if let Ok(Object::Dictionary(catalog)) = self.doc.get_object_mut(catalog_id) {
                catalog.set("Outlines", Object::Reference(outline_root_id));
                catalog.set("PageMode", "UseOutlines");
            }
        }

        let file = File::create(path).map_err(|e| OutlineError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save_to(&mut writer)
            .map_err(|e| OutlineError::io(path, e))?;
        Ok(())
    }
}

impl PdfWriter {
    /// Materialize the buffered bookmarks as outline item dictionaries and
    /// return the id of the root `Outlines` dictionary.
    fn build_outline_objects(&mut self) -> ObjectId {
        let mut ids = Vec::with_capacity(self.bookmarks.len());
        for _ in 0..self.bookmarks.len() {
            ids.push(self.doc.new_object_id());
        }

        let outline_root_id = self.doc.add_object(dictionary! {
            "Type" => "Outlines",
            "First" => Object::Reference(ids[self.roots[0]]),
            "Last" => Object::Reference(ids[self.roots[self.roots.len() - 1]]),
            "Count" => self.roots.len() as i64,
        });

        let roots = self.roots.clone();
        self.insert_level(&roots, outline_root_id, &ids);
        outline_root_id
    }

    fn insert_level(&mut self, items: &[usize], parent_id: ObjectId, ids: &[ObjectId]) {
        for (pos, &idx) in items.iter().enumerate() {
            let bookmark = self.bookmarks[idx].clone();

            let mut dict = dictionary! {
                "Title" => Object::String(encode_pdf_string(&bookmark.title), StringFormat::Literal),
                "Parent" => Object::Reference(parent_id),
            };
            if let Some(page_ref) = self.pages.get(bookmark.page).copied() {
                dict.set(
                    "Dest",
                    vec![Object::Reference(page_ref), "Fit".into()],
                );
            }
            if pos > 0 {
                dict.set("Prev", Object::Reference(ids[items[pos - 1]]));
            }
            if pos < items.len() - 1 {
                dict.set("Next", Object::Reference(ids[items[pos + 1]]));
            }
            if !bookmark.children.is_empty() {
                dict.set("First", Object::Reference(ids[bookmark.children[0]]));
                dict.set(
                    "Last",
                    Object::Reference(ids[bookmark.children[bookmark.children.len() - 1]]),
                );
                dict.set("Count", -(bookmark.children.len() as i64));
                self.insert_level(&bookmark.children, ids[idx], ids);
            }

            self.doc.objects.insert(ids[idx], Object::Dictionary(dict));
        }
    }
}

/// Decode a PDF text string: UTF-16BE when BOM-prefixed, byte text
/// otherwise.
fn decode_pdf_string(obj: &Object) -> String {
    match obj {
        Object::String(bytes, _) => {
            let text = if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let units: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            } else {
                String::from_utf8_lossy(bytes).into_owned()
            };
            text.trim().to_string()
        }
        _ => String::new(),
    }
}

/// Encode a title: plain bytes when it is pure ASCII, BOM-prefixed
/// UTF-16BE otherwise. Everything above ASCII goes through UTF-16BE so
/// the decoder's non-BOM byte-text path never sees it.
fn encode_pdf_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        text.bytes().collect()
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        bytes
    }
}

/// Build a minimal valid document with `page_count` empty pages.
#[cfg(test)]
pub(crate) fn minimal_document(page_count: usize) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..page_count)
        .map(|_| {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
            });
            Object::Reference(page_id)
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", catalog_id);
    doc
}
