//! Document Assembler
//!
//! Sorts successful per-page PDFs by their discovery index and concatenates
//! them into one artifact. Failure isolation extends through this step: a
//! blob that turned out unreadable is skipped with a warning, never aborts
//! the merge. Only a batch with zero usable documents is fatal.

use crate::render::RenderResult;
use crate::{BindError, Result};
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

/// Merges the successful render results into a single PDF at `output_path`
///
/// Successes are sorted by index ascending; the merge order is therefore
/// the discovery order regardless of which worker finished first. Any
/// prior artifact at `output_path` is overwritten.
///
/// Returns the number of documents that made it into the artifact.
///
/// # Errors
///
/// * [`BindError::NoDocumentsProduced`] - no success results, or every
///   blob was unreadable; nothing is written
/// * [`BindError::Merge`] / [`BindError::Pdf`] - the merged page tree
///   could not be built or saved
pub fn merge_documents(results: &[RenderResult], output_path: &Path) -> Result<usize> {
    let mut successes: Vec<(usize, &Path)> = results
        .iter()
        .filter_map(|r| match r {
            RenderResult::Success { index, path } => Some((*index, path.as_path())),
            RenderResult::Failure { .. } => None,
        })
        .collect();

    if successes.is_empty() {
        return Err(BindError::NoDocumentsProduced);
    }

    successes.sort_by_key(|(index, _)| *index);

    let mut documents = Vec::with_capacity(successes.len());
    for (index, path) in successes {
        match Document::load(path) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                tracing::warn!("[{}] Skipping corrupt PDF {}: {}", index, path.display(), e);
            }
        }
    }

    if documents.is_empty() {
        return Err(BindError::NoDocumentsProduced);
    }

    let merged_count = documents.len();
    let mut merged = merge_loaded(documents)?;
    merged.save(output_path)?;

    tracing::info!(
        "Merged PDF created: {} ({} documents)",
        output_path.display(),
        merged_count
    );
    Ok(merged_count)
}

/// Concatenates loaded documents into one, preserving input order
///
/// Standard lopdf merge: renumber every document's objects into one id
/// space, collect page objects, then rebuild a single Pages tree and
/// Catalog over them.
fn merge_loaded(documents: Vec<Document>) -> Result<Document> {
    let mut max_id = 1;
    let mut pages: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for (_, object_id) in doc.get_pages() {
            if let Ok(object) = doc.get_object(object_id) {
                pages.insert(object_id, object.to_owned());
            }
        }
        objects.extend(doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    let mut catalog_entry: Option<(ObjectId, Object)> = None;
    let mut pages_entry: Option<(ObjectId, Object)> = None;

    for (object_id, object) in objects {
        match object.type_name().unwrap_or("") {
            "Catalog" => {
                // Keep the first catalog's id; later ones are redundant
                let id = catalog_entry.map(|(id, _)| id).unwrap_or(object_id);
                catalog_entry = Some((id, object));
            }
            "Pages" => {
                if let Some((existing_id, existing)) = pages_entry.take() {
                    let mut dictionary = existing
                        .as_dict()
                        .map_err(|e| BindError::Merge(format!("Pages dictionary: {}", e)))?
                        .clone();
                    if let Ok(dict) = object.as_dict() {
                        dictionary.extend(dict);
                    }
                    pages_entry = Some((existing_id, Object::Dictionary(dictionary)));
                } else {
                    pages_entry = Some((object_id, object));
                }
            }
            // Page objects are re-inserted below with their new parent;
            // outline trees from individual pages are meaningless merged
            "Page" | "Outlines" | "Outline" => {}
            _ => {
                merged.objects.insert(object_id, object);
            }
        }
    }

    let (pages_root_id, pages_root) = pages_entry
        .ok_or_else(|| BindError::Merge("no Pages root found in any document".to_string()))?;
    let (catalog_id, catalog) = catalog_entry
        .ok_or_else(|| BindError::Merge("no Catalog found in any document".to_string()))?;

    for (object_id, object) in &pages {
        let mut dictionary = object
            .as_dict()
            .map_err(|e| BindError::Merge(format!("Page dictionary: {}", e)))?
            .clone();
        dictionary.set("Parent", pages_root_id);
        merged
            .objects
            .insert(*object_id, Object::Dictionary(dictionary));
    }

    let mut pages_dict = pages_root
        .as_dict()
        .map_err(|e| BindError::Merge(format!("Pages dictionary: {}", e)))?
        .clone();
    pages_dict.set("Count", pages.len() as u32);
    pages_dict.set(
        "Kids",
        pages
            .keys()
            .map(|id| Object::Reference(*id))
            .collect::<Vec<_>>(),
    );
    merged
        .objects
        .insert(pages_root_id, Object::Dictionary(pages_dict));

    let mut catalog_dict = catalog
        .as_dict()
        .map_err(|e| BindError::Merge(format!("Catalog dictionary: {}", e)))?
        .clone();
    catalog_dict.set("Pages", pages_root_id);
    catalog_dict.remove(b"Outlines");
    merged
        .objects
        .insert(catalog_id, Object::Dictionary(catalog_dict));

    merged.trailer.set("Root", catalog_id);
    merged.max_id = merged.objects.len() as u32;
    merged.renumber_objects();
    merged.compress();

    Ok(merged)
}
