//! End-to-end tests through real PDF bytes: lopdf-generated documents are
//! decoded by `LopdfDecoder` and queried through `MenuParser`.

mod common;

use std::io::Write;

use menugrid::{DocumentDecoder, LopdfDecoder, MealPeriod, MenuParser, MenuProfile};

use common::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn decoder_recovers_fills_and_text_positions() {
    let page = menu_page();
    let decoded = LopdfDecoder::default()
        .decode(&page_to_pdf(&page))
        .unwrap();

    assert_close(decoded.width, page.width);
    assert_close(decoded.height, page.height);

    assert_eq!(decoded.fills.len(), page.fills.len());
    for (got, want) in decoded.fills.iter().zip(&page.fills) {
        assert_close(got.x, want.x);
        assert_close(got.y, want.y);
        assert_close(got.w, want.w);
        assert_close(got.h, want.h);
    }

    assert_eq!(decoded.texts.len(), page.texts.len());
    for (got, want) in decoded.texts.iter().zip(&page.texts) {
        assert_eq!(got.text, want.text);
        assert_close(got.x, want.x);
        assert_close(got.y, want.y);
        assert_close(got.font_size, want.font_size);
    }
}

#[tokio::test]
async fn menu_from_pdf_bytes() {
    let pdf = page_to_pdf(&menu_page());
    let parser = MenuParser::new(pdf, MenuProfile::martiri());

    assert_eq!(
        parser.get_menu(2, "lunch").await.unwrap(),
        vec!["Pasta al pomodoro", "Risotto"]
    );
    assert_eq!(
        parser.get_menu(4, "dinner").await.unwrap(),
        vec!["Insalata mista", "Pizza"]
    );

    let grid = parser.grid().await.unwrap();
    assert_eq!((grid.rows(), grid.cols()), (2, 7));
}

#[tokio::test]
async fn menu_from_pdf_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&page_to_pdf(&menu_page())).unwrap();
    file.flush().unwrap();

    let parser = MenuParser::new(file.path(), MenuProfile::martiri());
    let dinner = parser.week(MealPeriod::Dinner).await.unwrap();
    assert_eq!(dinner[6], vec!["Minestrone"]);
    assert!(parser.is_loaded());
}

#[tokio::test]
async fn non_pdf_bytes_fail_to_load() {
    let parser = MenuParser::new(b"plain text".to_vec(), MenuProfile::martiri());
    let err = parser.get_menu(0, "lunch").await.unwrap_err();
    assert!(matches!(
        err,
        menugrid::MenuError::Decode(menugrid::DecodeError::Parse(_))
    ));
    assert!(!parser.is_loaded());
}
