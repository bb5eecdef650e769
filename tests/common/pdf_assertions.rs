use lopdf::Document as LopdfDocument;
use lopdf::content::Operation;
use lopdf::{Dictionary, Object};

/// Decoded content operations of a page (1-based).
pub fn page_operations(doc: &LopdfDocument, page_number: u32) -> Vec<Operation> {
    let pages = doc.get_pages();
    let page_id = pages[&page_number];
    doc.get_and_decode_page_content(page_id)
        .map(|content| content.operations)
        .unwrap_or_default()
}

/// Number of times `operator` appears across all pages.
pub fn count_operator(doc: &LopdfDocument, operator: &str) -> usize {
    (1..=doc.get_pages().len() as u32)
        .map(|page| {
            page_operations(doc, page)
                .iter()
                .filter(|op| op.operator == operator)
                .count()
        })
        .sum()
}

/// Every `Tj` operand on a page, decoded as Latin-1.
pub fn page_strings(doc: &LopdfDocument, page_number: u32) -> Vec<String> {
    page_operations(doc, page_number)
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| bytes.iter().map(|&b| b as char).collect())
        .collect()
}

fn resolve_dict<'a>(doc: &'a LopdfDocument, object: &'a Object) -> Option<&'a Dictionary> {
    match object.as_reference() {
        Ok(id) => doc.get_object(id).ok().and_then(|obj| obj.as_dict().ok()),
        Err(_) => object.as_dict().ok(),
    }
}

/// The resources dictionary of the first page.
fn first_page_resources(doc: &LopdfDocument) -> Option<&Dictionary> {
    let page_id = *doc.get_pages().get(&1)?;
    let page = doc.get_object(page_id).ok()?.as_dict().ok()?;
    resolve_dict(doc, page.get(b"Resources").ok()?)
}

/// Base font names referenced by the page resources, sorted.
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut names: Vec<String> = first_page_resources(doc)
        .and_then(|resources| resources.get(b"Font").ok())
        .and_then(|fonts| resolve_dict(doc, fonts))
        .map(|fonts| {
            fonts
                .iter()
                .filter_map(|(_, font)| resolve_dict(doc, font))
                .filter_map(|font| font.get(b"BaseFont").ok())
                .filter_map(|name| name.as_name().ok())
                .map(|name| String::from_utf8_lossy(name).to_string())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Number of image XObjects registered in the page resources.
pub fn image_xobject_count(doc: &LopdfDocument) -> usize {
    first_page_resources(doc)
        .and_then(|resources| resources.get(b"XObject").ok())
        .and_then(|xobjects| resolve_dict(doc, xobjects))
        .map(|xobjects| xobjects.len())
        .unwrap_or(0)
}

/// `[x0, y0, x1, y1]` of a page's MediaBox (1-based).
pub fn media_box(doc: &LopdfDocument, page_number: u32) -> Vec<f32> {
    let page_id = doc.get_pages()[&page_number];
    doc.get_object(page_id)
        .and_then(|page| page.as_dict())
        .and_then(|page| page.get(b"MediaBox"))
        .and_then(|mb| mb.as_array())
        .map(|values| values.iter().filter_map(|v| v.as_float().ok()).collect())
        .unwrap_or_default()
}
