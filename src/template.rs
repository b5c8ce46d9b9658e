//! Background template loading and page compositing
//!
//! The first page of the template PDF is the background for every card.
//! Each card page is a copy of that page dictionary whose `/Contents`
//! array gets the card's text overlay appended, so the template content
//! streams are shared by all cards instead of being duplicated.

use std::path::{Path, PathBuf};

use log::{debug, info};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{BingoError, BingoResult};
use crate::font_registry::{PdfFont, OVERLAY_FONT_RESOURCE};
use crate::types::Rect;

/// Page attributes that may be inherited from the page tree.
const INHERITABLE: [&[u8]; 2] = [b"Rotate", b"CropBox"];

/// Guard against reference cycles in malformed files.
const MAX_DEPTH: usize = 32;

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> BingoResult<&'a Object> {
    let mut current = obj;
    for _ in 0..MAX_DEPTH {
        match current {
            Object::Reference(id) => current = doc.get_object(*id)?,
            _ => return Ok(current),
        }
    }
    Err(BingoError::Pdf("reference chain too deep".to_string()))
}

fn resolve_dict(doc: &Document, obj: &Object) -> BingoResult<Dictionary> {
    match resolve(doc, obj)? {
        Object::Dictionary(dict) => Ok(dict.clone()),
        _ => Err(BingoError::Pdf("expected a dictionary".to_string())),
    }
}

fn number(doc: &Document, obj: &Object) -> BingoResult<f64> {
    match resolve(doc, obj)? {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(r) => Ok(f64::from(*r)),
        _ => Err(BingoError::Pdf("expected a number".to_string())),
    }
}

fn pdf_number(value: f64) -> Object {
    if value.fract() == 0.0 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as _)
    }
}

/// Look up a page attribute, walking up `/Parent` links when the page
/// itself does not carry it.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = page_id;
    for _ in 0..MAX_DEPTH {
        let dict = doc.get_dictionary(node).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        node = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
    None
}

/// The background page of every card
pub struct Template {
    path: PathBuf,
    doc: Document,
    page_id: ObjectId,
    page_box: Rect,
    media_box: Object,
    resources: Dictionary,
    contents: Vec<Object>,
}

impl Template {
    /// Load the template PDF and resolve its first page.
    pub fn load(path: &Path) -> BingoResult<Self> {
        if !path.exists() {
            return Err(BingoError::SourceNotFound(path.to_path_buf()));
        }
        let doc = Document::load(path)?;
        Self::from_document(doc, path)
    }

    pub fn from_document(doc: Document, path: &Path) -> BingoResult<Self> {
        let pages = doc.get_pages();
        let Some(&page_id) = pages.values().next() else {
            return Err(BingoError::EmptyTemplate(path.to_path_buf()));
        };
        if pages.len() > 1 {
            info!("Template has {} pages, using only the first one", pages.len());
        }

        let media_box = inherited_attribute(&doc, page_id, b"MediaBox")
            .ok_or_else(|| BingoError::Pdf("template page has no MediaBox".to_string()))?;
        let media_box = match resolve(&doc, &media_box)? {
            Object::Array(items) if items.len() == 4 => items
                .iter()
                .map(|item| number(&doc, item))
                .collect::<BingoResult<Vec<f64>>>()?,
            _ => return Err(BingoError::Pdf("malformed MediaBox".to_string())),
        };
        let page_box = Rect::from_corners(media_box[0], media_box[1], media_box[2], media_box[3]);

        let resources = match inherited_attribute(&doc, page_id, b"Resources") {
            Some(obj) => resolve_dict(&doc, &obj)?,
            None => Dictionary::new(),
        };

        let contents = match doc.get_dictionary(page_id)?.get(b"Contents") {
            Err(_) => Vec::new(),
            Ok(Object::Array(items)) => items.clone(),
            Ok(Object::Reference(id)) => match doc.get_object(*id)? {
                Object::Array(items) => items.clone(),
                _ => vec![Object::Reference(*id)],
            },
            Ok(_) => return Err(BingoError::Pdf("unsupported page /Contents entry".to_string())),
        };

        debug!(
            "Template page {:?}: {}x{} pt at ({}, {}), {} content stream(s)",
            page_id,
            page_box.width,
            page_box.height,
            page_box.x,
            page_box.y,
            contents.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            page_box,
            media_box: Object::Array(media_box.into_iter().map(pdf_number).collect()),
            page_id,
            resources,
            contents,
            doc,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// MediaBox of the background page
    pub fn page_box(&self) -> Rect {
        self.page_box
    }
}

/// Output document: one template copy plus text overlay per card
pub struct CardDocument {
    doc: Document,
    page_template: Dictionary,
    pages_root: ObjectId,
    save_state_id: ObjectId,
    contents: Vec<Object>,
    card_pages: Vec<ObjectId>,
}

impl CardDocument {
    /// Prepare the template document for compositing with `font`.
    pub fn new(template: Template, font: &PdfFont) -> BingoResult<Self> {
        let Template {
            mut doc,
            page_id,
            media_box,
            mut resources,
            contents,
            ..
        } = template;

        let font_id = font.register(&mut doc);
        let mut fonts = match resources.get(b"Font") {
            Ok(obj) => resolve_dict(&doc, obj)?,
            Err(_) => Dictionary::new(),
        };
        fonts.set(OVERLAY_FONT_RESOURCE, font_id);
        resources.set("Font", fonts);

        let mut page_template = doc.get_dictionary(page_id)?.clone();
        for key in INHERITABLE {
            if let Some(value) = inherited_attribute(&doc, page_id, key) {
                page_template.set(key, value);
            }
        }
        page_template.set("MediaBox", media_box);
        page_template.set("Resources", resources);
        // Annotations are bound to a single page.
        page_template.remove(b"Annots");

        let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
        let pages_root = doc.get_dictionary(catalog_id)?.get(b"Pages")?.as_reference()?;

        // Isolates the template's graphics state from the overlay.
        let save_state_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));

        Ok(Self {
            doc,
            page_template,
            pages_root,
            save_state_id,
            contents,
            card_pages: Vec::new(),
        })
    }

    /// Append a card page: the template with `overlay` drawn on top.
    pub fn push_card(&mut self, overlay: &[u8]) -> ObjectId {
        let mut stream = b"Q\n".to_vec();
        stream.extend_from_slice(overlay);
        let overlay_id = self.doc.add_object(Stream::new(Dictionary::new(), stream));

        let mut contents = Vec::with_capacity(self.contents.len() + 2);
        contents.push(Object::Reference(self.save_state_id));
        contents.extend(self.contents.iter().cloned());
        contents.push(Object::Reference(overlay_id));

        let mut page = self.page_template.clone();
        page.set("Parent", self.pages_root);
        page.set("Contents", contents);

        let page_id = self.doc.add_object(page);
        self.card_pages.push(page_id);
        page_id
    }

    pub fn page_count(&self) -> usize {
        self.card_pages.len()
    }

    /// Replace the page tree with the card pages and serialize the document.
    pub fn finish(mut self) -> BingoResult<Vec<u8>> {
        let kids: Vec<Object> = self
            .card_pages
            .iter()
            .map(|id| Object::Reference(*id))
            .collect();
        let count = kids.len() as i64;

        let root = self.doc.get_object_mut(self.pages_root)?.as_dict_mut()?;
        root.set("Kids", kids);
        root.set("Count", count);

        let pruned = self.doc.prune_objects();
        debug!("Pruned {} unreachable template objects", pruned.len());
        self.doc.compress();

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| BingoError::Pdf(format!("failed to serialize output: {}", e)))?;
        Ok(bytes)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pdf_writer::{Content, Finish, Pdf, Rect as PdfRect, Ref};

    /// A template with `pages` pages of `width`×`height`, each with a filled box.
    pub(crate) fn template_pdf(pages: usize, width: f32, height: f32) -> Vec<u8> {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        pdf.catalog(catalog_id).pages(page_tree_id);

        let page_ids: Vec<Ref> = (0..pages).map(|i| Ref::new(10 + 2 * i as i32)).collect();
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().copied())
            .count(pages as i32);

        for page_id in &page_ids {
            let content_id = Ref::new(page_id.get() + 1);
            let mut page = pdf.page(*page_id);
            page.media_box(PdfRect::new(0.0, 0.0, width, height));
            page.parent(page_tree_id);
            page.contents(content_id);
            page.finish();

            let mut content = Content::new();
            content.set_fill_rgb(0.9, 0.9, 0.9);
            content.rect(10.0, 10.0, width - 20.0, height - 20.0);
            content.fill_nonzero();
            pdf.stream(content_id, &content.finish());
        }

        pdf.finish()
    }

    fn load(bytes: &[u8]) -> BingoResult<Template> {
        let doc = Document::load_mem(bytes)?;
        Template::from_document(doc, Path::new("template.pdf"))
    }

    #[test]
    fn reads_first_page_box() {
        let template = load(&template_pdf(2, 595.0, 842.0)).unwrap();
        assert_eq!(template.page_box(), Rect::new(0.0, 0.0, 595.0, 842.0));
        assert_eq!(template.contents.len(), 1);
    }

    #[test]
    fn zero_pages_is_empty_template() {
        let err = load(&template_pdf(0, 595.0, 842.0)).err().unwrap();
        assert!(matches!(err, BingoError::EmptyTemplate(_)));
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let err = Template::load(Path::new("/no/such/template.pdf")).err().unwrap();
        assert!(matches!(err, BingoError::SourceNotFound(_)));
    }

    #[test]
    fn composited_document_has_one_page_per_card() {
        let template = load(&template_pdf(3, 300.0, 400.0)).unwrap();
        let mut cards = CardDocument::new(template, &PdfFont::builtin("Helvetica")).unwrap();
        for i in 0..4 {
            cards.push_card(format!("BT /FBingo 9 Tf 10 10 Td (card {}) Tj ET", i).as_bytes());
        }
        assert_eq!(cards.page_count(), 4);

        let bytes = cards.finish().unwrap();
        let out = Document::load_mem(&bytes).unwrap();
        let pages = out.get_pages();
        assert_eq!(pages.len(), 4);

        for (i, page_id) in pages.values().enumerate() {
            let page = out.get_dictionary(*page_id).unwrap();
            let contents = page.get(b"Contents").unwrap().as_array().unwrap();
            // q, template stream, Q + overlay
            assert_eq!(contents.len(), 3);

            let text = out.get_page_content(*page_id).unwrap();
            let text = String::from_utf8_lossy(&text);
            assert!(text.contains(&format!("(card {})", i)));

            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
            assert!(fonts.has(OVERLAY_FONT_RESOURCE));
        }
    }
}
