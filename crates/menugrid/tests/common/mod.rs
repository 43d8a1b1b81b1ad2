//! Shared fixtures: a synthetic weekly menu page, as decoded content and as
//! a generated PDF.

#![allow(dead_code)]

use menugrid::menugrid_core::{Fill, PageContent, TextItem};

pub const COL_WIDTH: f64 = 6.5;
pub const ROW_HEIGHT: f64 = 9.0;
pub const ORIGIN: f64 = 1.0;
pub const THICKNESS: f64 = 0.1;

/// Landscape Letter page size in points.
pub const PAGE_WIDTH_PT: f64 = 792.0;
pub const PAGE_HEIGHT_PT: f64 = 612.0;
pub const POINTS_PER_UNIT: f64 = 16.0;

pub fn col_x(j: usize) -> f64 {
    ORIGIN + COL_WIDTH * j as f64
}

pub fn row_y(i: usize) -> f64 {
    ORIGIN + ROW_HEIGHT * i as f64
}

/// The `rows * (2 * cols + 1) + cols` line fills of a template grid.
pub fn grid_fills(rows: usize, cols: usize) -> Vec<Fill> {
    let mut fills = Vec::new();
    for i in 0..=rows {
        for j in 0..cols {
            fills.push(Fill::new(
                col_x(j),
                row_y(i) - THICKNESS / 2.0,
                COL_WIDTH,
                THICKNESS,
            ));
        }
        if i < rows {
            for k in 0..=cols {
                fills.push(Fill::new(col_x(k), row_y(i), THICKNESS, ROW_HEIGHT));
            }
        }
    }
    fills
}

/// Five decorative line fills away from the grid: a connected chain of three
/// and two isolated dividers.
pub fn noise_fills() -> Vec<Fill> {
    vec![
        Fill::new(20.0, 30.0, 7.0, THICKNESS),
        Fill::new(27.0, 30.0, 7.0, THICKNESS),
        Fill::new(34.0, 30.0, 7.0, THICKNESS),
        Fill::new(3.0, 25.0, THICKNESS, ROW_HEIGHT),
        Fill::new(45.0, 25.0, THICKNESS, ROW_HEIGHT),
    ]
}

/// A large background fill that neither line band accepts.
pub fn background_fill() -> Fill {
    Fill::new(
        0.0,
        0.0,
        PAGE_WIDTH_PT / POINTS_PER_UNIT,
        PAGE_HEIGHT_PT / POINTS_PER_UNIT,
    )
}

pub fn text(x: f64, y: f64, font_size: f64, text: &str) -> TextItem {
    TextItem {
        x,
        y,
        w: text.chars().count() as f64 * 0.3,
        font_size,
        text: text.to_string(),
    }
}

/// Text items of the weekly menu: three runs in Wednesday's lunch cell, of
/// which the smallest is a footnote, plus runs elsewhere on the page.
pub fn menu_texts() -> Vec<TextItem> {
    let wednesday = col_x(2) + 1.0;
    vec![
        text(ORIGIN, 0.2, 12.0, "Menu settimanale"),
        text(wednesday, 3.0, 4.0, "Allergeni"),
        text(wednesday, 4.0, 6.0, "Pasta al pomodoro"),
        text(wednesday, 5.0, 8.0, "Risotto"),
        text(col_x(0) + 1.0, 3.0, 8.0, "Lasagne Pollo arrosto"),
        text(col_x(4) + 1.0, row_y(1) + 1.0, 8.0, "Insalata mistaPIZZA"),
        text(col_x(6) + 1.0, row_y(1) + 2.0, 8.0, "Minestrone"),
    ]
}

/// The decoded form of the weekly menu page.
pub fn menu_page() -> PageContent {
    let mut fills = vec![background_fill()];
    fills.extend(noise_fills());
    fills.extend(grid_fills(2, 7));
    PageContent {
        width: PAGE_WIDTH_PT / POINTS_PER_UNIT,
        height: PAGE_HEIGHT_PT / POINTS_PER_UNIT,
        fills,
        texts: menu_texts(),
    }
}

/// Render page content as a one-page landscape Letter PDF, converting units
/// back to points with a bottom-left origin. Text `y` is the top of the em box.
pub fn page_to_pdf(page: &PageContent) -> Vec<u8> {
    use lopdf::{Document, Object, ObjectId, Stream, dictionary};

    let pt = |v: f64| v * POINTS_PER_UNIT;
    let mut content = String::from("0 0 0 rg\n");
    for fill in &page.fills {
        content.push_str(&format!(
            "{} {} {} {} re f\n",
            pt(fill.x),
            PAGE_HEIGHT_PT - pt(fill.y + fill.h),
            pt(fill.w),
            pt(fill.h),
        ));
    }
    for item in &page.texts {
        let baseline = PAGE_HEIGHT_PT - pt(item.y) - item.font_size;
        content.push_str(&format!(
            "BT /F1 {} Tf {} {} Td ({}) Tj ET\n",
            item.font_size,
            pt(item.x),
            baseline,
            item.text,
        ));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
            "MediaBox" => vec![0.into(), 0.into(), 792.into(), 612.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}
