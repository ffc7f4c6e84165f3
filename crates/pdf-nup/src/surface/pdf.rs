//! Sheet surface that writes each sheet as a PDF page
//!
//! This is the print destination: each `advance_page` closes the current
//! sheet and opens a new one. Device units are printer pixels at the
//! configured resolution, with a top-left origin, so layout code sees the
//! same coordinate system it sees on screen.

use super::{SheetSurface, Surface, TransformStack};
use crate::constants::{pixels_to_points, points_to_pixels};
use crate::layout::Affine;
use crate::source::Raster;
use crate::types::{NupError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Content of the sheet currently being drawn
#[derive(Default)]
struct SheetContent {
    ops: Vec<String>,
    xobjects: Dictionary,
}

/// A print destination producing one PDF page per sheet
pub struct PdfSheetSurface {
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    sheet: SheetContent,
    width_pt: f32,
    height_pt: f32,
    dpi: f32,
    transforms: TransformStack,
    image_count: usize,
}

impl PdfSheetSurface {
    /// Create a surface whose sheets are `width_pt` x `height_pt` and whose
    /// device resolution is `dpi`
    pub fn new(width_pt: f32, height_pt: f32, dpi: f32) -> Result<Self> {
        if !(width_pt > 0.0 && height_pt > 0.0) {
            return Err(NupError::Config(format!(
                "Invalid sheet size: {}x{} pt",
                width_pt, height_pt
            )));
        }
        if !(dpi > 0.0 && dpi.is_finite()) {
            return Err(NupError::Config(format!("Invalid printer resolution: {}", dpi)));
        }

        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();
        Ok(Self {
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            sheet: SheetContent::default(),
            width_pt,
            height_pt,
            dpi,
            transforms: TransformStack::new(),
            image_count: 0,
        })
    }

    /// Number of sheets started so far, including the current one
    pub fn sheet_count(&self) -> usize {
        self.page_refs.len() + 1
    }

    /// Maps device pixels (top-left origin) to PDF user space (points, bottom-left origin)
    fn device_to_pdf(&self) -> Affine {
        let pt_per_px = pixels_to_points(1.0, self.dpi);
        Affine::new(pt_per_px, 0.0, 0.0, -pt_per_px, 0.0, self.height_pt)
    }

    /// Write the current sheet as a page and reset drawing state
    fn flush_sheet(&mut self) -> Result<()> {
        let sheet = std::mem::take(&mut self.sheet);

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.width_pt),
                Object::Real(self.height_pt),
            ]),
        );

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(sheet.xobjects));

        let content = sheet.ops.join("");
        let mut content_stream = Stream::new(Dictionary::new(), content.into_bytes());
        content_stream.compress()?;
        let content_id = self.output.add_object(content_stream);

        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        self.transforms.reset();
        Ok(())
    }

    /// Close the last sheet and return the finished document
    pub fn finish(mut self) -> Result<Document> {
        self.flush_sheet()?;

        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        Ok(self.output)
    }
}

impl Surface for PdfSheetSurface {
    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transforms.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f32) {
        self.transforms.rotate(degrees);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.transforms.scale(sx, sy);
    }

    fn draw_image(&mut self, raster: &Raster, x: i32, y: i32) -> Result<()> {
        let (width, height) = raster.dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }

        let image_id = self.output.add_object(image_xobject(raster)?);
        let name = format!("Im{}", self.image_count);
        self.image_count += 1;
        self.sheet
            .xobjects
            .set(name.as_bytes(), Object::Reference(image_id));

        // PDF images fill the unit square with their first row at the top
        let placement = Affine::new(
            width as f32,
            0.0,
            0.0,
            -(height as f32),
            x as f32,
            y as f32 + height as f32,
        );
        let m = self
            .device_to_pdf()
            .pre_concat(&self.transforms.current())
            .pre_concat(&placement);
        self.sheet.ops.push(format!(
            "q {} {} {} {} {} {} cm /{} Do Q\n",
            m.a, m.b, m.c, m.d, m.e, m.f, name
        ));
        Ok(())
    }
}

impl SheetSurface for PdfSheetSurface {
    fn advance_page(&mut self) -> Result<()> {
        self.flush_sheet()
    }

    fn sheet_size(&self) -> (f32, f32) {
        (
            points_to_pixels(self.width_pt, self.dpi),
            points_to_pixels(self.height_pt, self.dpi),
        )
    }
}

/// Build a DeviceRGB image XObject, flattening alpha onto white paper
fn image_xobject(raster: &Raster) -> Result<Stream> {
    let (width, height) = raster.dimensions();
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in raster.pixels() {
        let [r, g, b, a] = pixel.0;
        let a = a as u16;
        for channel in [r, g, b] {
            rgb.push(((channel as u16 * a + 255 * (255 - a)) / 255) as u8);
        }
    }

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));

    let mut stream = Stream::new(dict, rgb);
    stream.compress()?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_device_size_follows_dpi() {
        let surface = PdfSheetSurface::new(612.0, 792.0, 144.0).unwrap();
        assert_eq!(surface.sheet_size(), (1224.0, 1584.0));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        assert!(PdfSheetSurface::new(0.0, 792.0, 72.0).is_err());
        assert!(PdfSheetSurface::new(612.0, 792.0, 0.0).is_err());
    }

    #[test]
    fn test_advance_page_adds_sheets() {
        let mut surface = PdfSheetSurface::new(612.0, 792.0, 72.0).unwrap();
        assert_eq!(surface.sheet_count(), 1);
        surface.advance_page().unwrap();
        surface.advance_page().unwrap();
        assert_eq!(surface.sheet_count(), 3);

        let doc = surface.finish().unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_image_placement_at_72_dpi() {
        let mut surface = PdfSheetSurface::new(100.0, 200.0, 72.0).unwrap();
        let raster = Raster::from_pixel(10, 20, Rgba([0, 0, 0, 255]));
        surface.draw_image(&raster, 5, 5).unwrap();

        // Top-left device (5, 5) is PDF (5, 195); the image spans 10x20 pt downward
        let op = &surface.sheet.ops[0];
        assert_eq!(op, "q 10 0 0 20 5 175 cm /Im0 Do Q\n");
    }

    #[test]
    fn test_alpha_is_flattened_onto_white() {
        let raster = Raster::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let mut stream = image_xobject(&raster).unwrap();
        stream.decompress().unwrap();
        assert_eq!(stream.content, vec![255, 255, 255]);
    }
}
