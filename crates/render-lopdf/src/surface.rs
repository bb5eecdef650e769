use crate::fonts::{FontLibrary, to_win_ansi};
use crate::writer::PdfWriter;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use spotdeck_render_core::{RenderError, Surface};
use spotdeck_types::{DecodedImage, Point, SymbolId, Transform};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

/// Control point distance for a quarter circle drawn as a cubic Bézier.
const KAPPA: f32 = 0.552_284_8;

const PDF_VERSION: &str = "1.7";

/// One embedded bitmap and the resource name pages draw it with.
struct ImageXObject {
    bitmap: Arc<DecodedImage>,
    resource: String,
    object_id: ObjectId,
}

struct OpenPage {
    ops: Vec<Operation>,
    width: f32,
    height: f32,
}

/// A `Surface` that writes an in-memory PDF document.
pub struct PdfSurface {
    writer: PdfWriter<Cursor<Vec<u8>>>,
    fonts: FontLibrary,
    /// Registered font name to page resource name, in order of first use.
    used_fonts: BTreeMap<String, String>,
    /// Image XObjects by symbol id; an id drawn with several distinct
    /// bitmaps gets one XObject per bitmap.
    images: BTreeMap<SymbolId, Vec<ImageXObject>>,
    image_count: usize,
    page: Option<OpenPage>,
    depth: usize,
}

impl PdfSurface {
    pub fn new(fonts: FontLibrary) -> Result<Self, RenderError> {
        Ok(Self {
            writer: PdfWriter::new(Cursor::new(Vec::new()), PDF_VERSION)?,
            fonts,
            used_fonts: BTreeMap::new(),
            images: BTreeMap::new(),
            image_count: 0,
            page: None,
            depth: 0,
        })
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.writer.set_title(title);
    }

    pub fn page_count(&self) -> usize {
        self.writer.page_count()
    }

    /// Writes the shared resources and returns the finished document.
    pub fn finish(self) -> Result<Vec<u8>, RenderError> {
        if self.page.is_some() {
            return Err(RenderError::Other("finish called with a page still open".into()));
        }
        let Self {
            mut writer,
            fonts,
            used_fonts,
            images,
            image_count,
            ..
        } = self;

        let mut font_dict = Dictionary::new();
        for (name, resource) in &used_fonts {
            let font = fonts
                .get(name)
                .ok_or_else(|| RenderError::Font(format!("font '{}' vanished", name)))?;
            let dict = font.to_pdf(|object| writer.buffer_object(object));
            font_dict.set(resource.as_bytes(), Object::Dictionary(dict));
        }

        let mut xobject_dict = Dictionary::new();
        for image in images.values().flatten() {
            xobject_dict.set(image.resource.as_bytes(), Object::Reference(image.object_id));
        }

        let mut resources = dictionary! {
            "ProcSet" => vec!["PDF".into(), "Text".into(), "ImageC".into()],
        };
        if !font_dict.is_empty() {
            resources.set("Font", font_dict);
        }
        if !xobject_dict.is_empty() {
            resources.set("XObject", xobject_dict);
        }

        let pages = writer.page_count();
        let bytes = writer.finish(resources)?.into_inner();
        log::info!(
            "Wrote PDF: {} pages, {} fonts, {} images, {} bytes",
            pages,
            used_fonts.len(),
            image_count,
            bytes.len()
        );
        Ok(bytes)
    }

    fn ops(&mut self) -> Result<&mut Vec<Operation>, RenderError> {
        self.page
            .as_mut()
            .map(|page| &mut page.ops)
            .ok_or_else(|| RenderError::Other("no page is open".into()))
    }

    fn font_resource(&mut self, font: &str) -> String {
        let next = format!("F{}", self.used_fonts.len() + 1);
        self.used_fonts
            .entry(font.to_string())
            .or_insert(next)
            .clone()
    }

    fn image_resource(
        &mut self,
        id: &SymbolId,
        image: &Arc<DecodedImage>,
    ) -> Result<String, RenderError> {
        let known = self.images.get(id).and_then(|embedded| {
            embedded
                .iter()
                .find(|xobject| Arc::ptr_eq(&xobject.bitmap, image) || xobject.bitmap == *image)
        });
        if let Some(xobject) = known {
            return Ok(xobject.resource.clone());
        }
        if image.rgb.len() != image.pixel_count() * 3 {
            return Err(RenderError::Other(format!(
                "image '{}' has {} bytes for {}x{} pixels",
                id,
                image.rgb.len(),
                image.width,
                image.height
            )));
        }

        let mut dict = image_dict(image.width, image.height, "DeviceRGB");
        if let Some(alpha) = &image.alpha {
            let mask = Stream::new(
                image_dict(image.width, image.height, "DeviceGray"),
                alpha.clone(),
            );
            let mask_id = self.writer.buffer_object(Object::Stream(mask));
            dict.set("SMask", mask_id);
        }
        let object_id = self
            .writer
            .buffer_object(Object::Stream(Stream::new(dict, image.rgb.clone())));

        self.image_count += 1;
        let resource = format!("Im{}", self.image_count);
        let embedded = self.images.entry(id.clone()).or_default();
        if !embedded.is_empty() {
            log::warn!("Symbol '{}' is drawn with more than one bitmap", id);
        }
        embedded.push(ImageXObject {
            bitmap: Arc::clone(image),
            resource: resource.clone(),
            object_id,
        });
        Ok(resource)
    }

    fn push_circle(&mut self, center: Point, radius: f32) -> Result<(), RenderError> {
        let (cx, cy, r) = (center.x, center.y, radius);
        let k = KAPPA * r;
        let ops = self.ops()?;
        ops.push(op("m", &[cx + r, cy]));
        ops.push(op("c", &[cx + r, cy + k, cx + k, cy + r, cx, cy + r]));
        ops.push(op("c", &[cx - k, cy + r, cx - r, cy + k, cx - r, cy]));
        ops.push(op("c", &[cx - r, cy - k, cx - k, cy - r, cx, cy - r]));
        ops.push(op("c", &[cx + k, cy - r, cx + r, cy - k, cx + r, cy]));
        ops.push(op("h", &[]));
        Ok(())
    }
}

fn op(operator: &str, operands: &[f32]) -> Operation {
    Operation::new(operator, operands.iter().map(|&v| v.into()).collect())
}

fn name(resource: &str) -> Object {
    Object::Name(resource.as_bytes().to_vec())
}

fn image_dict(width: u32, height: u32, color_space: &str) -> Dictionary {
    dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => Object::Integer(width as i64),
        "Height" => Object::Integer(height as i64),
        "ColorSpace" => Object::Name(color_space.as_bytes().to_vec()),
        "BitsPerComponent" => Object::Integer(8),
    }
}

impl Surface for PdfSurface {
    type Font = String;

    fn begin_page(&mut self, width_pt: f32, height_pt: f32) -> Result<(), RenderError> {
        if self.page.is_some() {
            return Err(RenderError::Other("begin_page called twice".into()));
        }
        self.page = Some(OpenPage {
            ops: Vec::new(),
            width: width_pt,
            height: height_pt,
        });
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), RenderError> {
        if self.depth != 0 {
            return Err(RenderError::Other(format!(
                "page ended with {} unrestored graphics states",
                self.depth
            )));
        }
        let page = self
            .page
            .take()
            .ok_or_else(|| RenderError::Other("end_page without begin_page".into()))?;
        let content_id = self.writer.buffer_content_stream(Content {
            operations: page.ops,
        })?;
        self.writer.add_page(content_id, page.width, page.height);
        Ok(())
    }

    fn save(&mut self) -> Result<(), RenderError> {
        self.ops()?.push(op("q", &[]));
        self.depth += 1;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        if self.depth == 0 {
            return Err(RenderError::Other("restore without save".into()));
        }
        self.ops()?.push(op("Q", &[]));
        self.depth -= 1;
        Ok(())
    }

    fn transform(&mut self, transform: &Transform) -> Result<(), RenderError> {
        self.ops()?.push(op("cm", &transform.to_array()));
        Ok(())
    }

    fn clip_circle(&mut self, center: Point, radius: f32) -> Result<(), RenderError> {
        self.push_circle(center, radius)?;
        let ops = self.ops()?;
        ops.push(op("W", &[]));
        ops.push(op("n", &[]));
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f32,
        line_width: f32,
    ) -> Result<(), RenderError> {
        {
            let ops = self.ops()?;
            ops.push(op("w", &[line_width]));
            ops.push(op("G", &[0.0]));
        }
        self.push_circle(center, radius)?;
        self.ops()?.push(op("S", &[]));
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, line_width: f32) -> Result<(), RenderError> {
        let ops = self.ops()?;
        ops.push(op("w", &[line_width]));
        ops.push(op("G", &[0.0]));
        ops.push(op("m", &[from.x, from.y]));
        ops.push(op("l", &[to.x, to.y]));
        ops.push(op("S", &[]));
        Ok(())
    }

    fn resolve_font(&mut self, family: &str) -> String {
        self.fonts.resolve(family).to_string()
    }

    fn text_width(&self, font: &String, text: &str, size: f32) -> f32 {
        self.fonts.text_width(font, text, size)
    }

    fn draw_text(
        &mut self,
        font: &String,
        size: f32,
        origin: Point,
        text: &str,
    ) -> Result<(), RenderError> {
        let encoded = to_win_ansi(text);
        if encoded.iter().zip(text.chars()).any(|(&b, c)| b == b'?' && c != '?') {
            log::warn!("Text '{}' has characters outside WinAnsi; they print as '?'", text);
        }
        let resource = self.font_resource(font);
        let ops = self.ops()?;
        ops.push(op("g", &[0.0]));
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![name(&resource), size.into()]));
        ops.push(op("Td", &[origin.x, origin.y]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encoded, StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn draw_image(
        &mut self,
        id: &SymbolId,
        image: &Arc<DecodedImage>,
        origin: Point,
        side: f32,
    ) -> Result<(), RenderError> {
        let resource = self.image_resource(id, image)?;
        let ops = self.ops()?;
        ops.push(op("q", &[]));
        ops.push(op("cm", &[side, 0.0, 0.0, side, origin.x, origin.y]));
        ops.push(Operation::new("Do", vec![name(&resource)]));
        ops.push(op("Q", &[]));
        Ok(())
    }
}
