//! Page selection and page-level operations.
//!
//! Selection is pure: given a source's page count, its resolved options and
//! the remaining budget, [`select_pages`] computes the exact ordered slice
//! of zero-based indices to copy. Copying and rotation mutate the output
//! document the way the lopdf merge idiom does: renumber the source past
//! the output's highest object id, splice its object map in, and pick the
//! selected page objects out by index.

use lopdf::{Document, Object, ObjectId};

use crate::config::{PageBudget, PageRange, Rotation, SourceOptions};
use crate::error::{MergeError, Result};

/// Compute the ordered page indices to copy from one source.
///
/// The range is resolved first (absent means all pages in natural order),
/// the order is reversed afterwards if requested, and only then is the
/// sequence truncated to the budget, keeping the leading entries. Reversal
/// before truncation matters: a 5-page source with range `"1-3"` reversed
/// yields pages 3,2,1 and a budget of 2 keeps 3,2.
pub fn select_pages(page_count: usize, options: &SourceOptions, budget: PageBudget) -> Vec<usize> {
    let mut wanted: Vec<usize> = match options.range.as_deref() {
        Some(expr) => PageRange::parse(expr).to_pages(page_count),
        None => (0..page_count).collect(),
    };

    if options.reverse {
        wanted.reverse();
    }

    wanted.truncate(budget.cap(wanted.len()));
    wanted
}

/// Copy the selected pages of a source document into the output.
///
/// All of the source's objects are spliced into the output so that page
/// content, resources and fonts stay intact; only the selected pages will
/// be referenced from the output page tree. Returns the copied pages'
/// object ids in selection order.
pub fn copy_pages(
    output: &mut Document,
    mut source: Document,
    selected: &[usize],
) -> Result<Vec<ObjectId>> {
    source.renumber_objects_with(output.max_id + 1);

    let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
    let page_ids: Vec<ObjectId> = selected
        .iter()
        .filter_map(|&index| source_pages.get(index).copied())
        .collect();

    if page_ids.len() != selected.len() {
        return Err(MergeError::merge_failed(
            "selected page index outside the source document",
        ));
    }

    output.max_id = source.max_id;
    output.objects.extend(source.objects);

    Ok(page_ids)
}

/// Apply a rotation to one page, on top of any rotation it already carries.
pub fn rotate_page(document: &mut Document, page_id: ObjectId, rotation: Rotation) -> Result<()> {
    let page = document
        .get_object_mut(page_id)
        .map_err(|err| MergeError::merge_failed(format!("failed to get page: {err}")))?;

    if let Object::Dictionary(dict) = page {
        let current = dict.get(b"Rotate").and_then(|r| r.as_i64()).unwrap_or(0);
        dict.set("Rotate", (current + rotation.as_degrees()) % 360);
        Ok(())
    } else {
        Err(MergeError::merge_failed("page object is not a dictionary"))
    }
}
