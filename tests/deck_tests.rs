mod common;

use common::fixtures::{letter_symbols, png_data_url, seeded_request};
use common::pdf_assertions::{
    count_operator, extract_font_names, image_xobject_count, page_strings,
};
use common::{GeneratedPdf, TestResult, render_request};
use spotdeck::{
    DeckError, DeckRequest, PipelineError, RandomizationConfig, SymbolDef, SymbolId,
};

#[test]
fn test_order_two_deck_end_to_end() -> TestResult {
    let pdf = render_request(&seeded_request(2, 42))?;
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    assert_eq!(pdf.page_count(), 2);

    // Seven cards of three symbols each.
    let drawn: usize = (1..=2).map(|p| page_strings(&pdf.doc, p).len()).sum();
    assert_eq!(drawn, 21);

    let repeat = seeded_request(2, 42).render()?;
    assert_eq!(pdf.bytes, repeat);
    Ok(())
}

#[test]
fn test_same_seed_gives_identical_bytes() -> TestResult {
    let first = seeded_request(3, 7).render()?;
    let second = seeded_request(3, 7).render()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_different_seeds_differ() -> TestResult {
    let first = seeded_request(3, 1).render()?;
    let second = seeded_request(3, 2).render()?;
    assert_ne!(first, second);
    Ok(())
}

#[test]
fn test_every_pair_shares_one_symbol_on_the_page() -> TestResult {
    let mut request = seeded_request(2, 3);
    request.card.per_page = 1;
    let pdf = render_request(&request)?;
    assert_eq!(pdf.page_count(), 7);

    let cards: Vec<Vec<String>> = (1..=7).map(|p| page_strings(&pdf.doc, p)).collect();
    for (i, a) in cards.iter().enumerate() {
        for b in &cards[i + 1..] {
            let shared = a.iter().filter(|s| b.contains(s)).count();
            assert_eq!(shared, 1, "{:?} and {:?}", a, b);
        }
    }
    Ok(())
}

#[test]
fn test_explicit_cards_are_drawn_in_order() -> TestResult {
    let request = DeckRequest {
        symbols: vec![
            SymbolDef::text("sun", "S"),
            SymbolDef::text("moon", "M"),
            SymbolDef::text("star", "T"),
        ],
        cards: Some(vec![
            vec![SymbolId::from("sun"), SymbolId::from("moon")],
            vec![SymbolId::from("moon"), SymbolId::from("star")],
        ]),
        random: RandomizationConfig::default().with_seed(5),
        ..Default::default()
    };
    let pdf = render_request(&request)?;
    assert_eq!(pdf.page_count(), 1);
    assert_eq!(page_strings(&pdf.doc, 1), vec!["S", "M", "M", "T"]);
    Ok(())
}

#[test]
fn test_unknown_symbol_reference_fails() {
    let request = DeckRequest {
        symbols: letter_symbols(2),
        cards: Some(vec![vec![SymbolId::from("A0"), SymbolId::from("nope")]]),
        ..Default::default()
    };
    assert!(matches!(
        request.render(),
        Err(PipelineError::Deck(DeckError::UnresolvedSymbolReference(id))) if id == "nope"
    ));
}

#[test]
fn test_mismatched_card_lengths_fail_before_rendering() {
    let request = DeckRequest {
        symbols: letter_symbols(3),
        cards: Some(vec![
            vec![SymbolId::from("A0"), SymbolId::from("B0")],
            vec![SymbolId::from("A0"), SymbolId::from("B0"), SymbolId::from("C0")],
        ]),
        ..Default::default()
    };
    assert!(matches!(
        request.render(),
        Err(PipelineError::CardLengthMismatch {
            index: 1,
            expected: 2,
            actual: 3
        })
    ));
}

#[test]
fn test_empty_card_list_fails() {
    let request = DeckRequest {
        symbols: letter_symbols(3),
        cards: Some(Vec::new()),
        ..Default::default()
    };
    assert!(matches!(request.render(), Err(PipelineError::EmptyDeck)));
}

#[test]
fn test_unknown_font_falls_back_to_helvetica_bold() -> TestResult {
    let json = r#"{
        "symbols": [
            { "id": "a", "type": "text", "text": "A", "fontFamily": "NoSuchFont" },
            { "id": "b", "type": "text", "text": "B" }
        ],
        "cards": [["a", "b"]],
        "randomization": { "seed": 1 }
    }"#;
    let pdf = render_request(&DeckRequest::from_json_str(json)?)?;
    assert_eq!(extract_font_names(&pdf.doc), vec!["Helvetica-Bold"]);
    Ok(())
}

#[test]
fn test_bold_weight_selects_bold_variant() -> TestResult {
    let json = r#"{
        "symbols": [
            { "id": "a", "type": "text", "text": "A", "fontFamily": "Times", "fontWeight": 700 },
            { "id": "b", "type": "text", "text": "B", "fontFamily": "Courier" }
        ],
        "cards": [["a", "b"]],
        "randomization": { "seed": 1 }
    }"#;
    let pdf = render_request(&DeckRequest::from_json_str(json)?)?;
    assert_eq!(extract_font_names(&pdf.doc), vec!["Courier", "Times-Bold"]);
    Ok(())
}

#[test]
fn test_image_symbols_share_one_xobject() -> TestResult {
    let request = DeckRequest {
        symbols: vec![
            SymbolDef::image("red", png_data_url([255, 0, 0, 128])),
            SymbolDef::text("x", "X"),
            SymbolDef::text("y", "Y"),
        ],
        cards: Some(vec![
            vec![SymbolId::from("red"), SymbolId::from("x")],
            vec![SymbolId::from("red"), SymbolId::from("y")],
        ]),
        random: RandomizationConfig::default().with_seed(11),
        ..Default::default()
    };
    let pdf = render_request(&request)?;
    assert_eq!(image_xobject_count(&pdf.doc), 1);
    assert_eq!(count_operator(&pdf.doc, "Do"), 2);
    Ok(())
}

#[test]
fn test_invalid_image_data_fails() {
    let request = DeckRequest {
        symbols: vec![SymbolDef::image("bad", "data:image/png;base64,!!!!")],
        cards: Some(vec![vec![SymbolId::from("bad")]]),
        ..Default::default()
    };
    assert!(matches!(
        request.render(),
        Err(PipelineError::Deck(DeckError::UnsupportedImageData { .. }))
    ));
}

#[test]
fn test_request_file_round_trip() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("deck.json");
    std::fs::write(&path, serde_json::to_string(&seeded_request(2, 9))?)?;

    let loaded = DeckRequest::from_file(&path)?;
    assert_eq!(loaded, seeded_request(2, 9));

    let pdf = GeneratedPdf::from_bytes(loaded.render()?)?;
    assert_eq!(pdf.page_count(), 2);
    Ok(())
}

#[test]
fn test_missing_request_file_reports_path() {
    let err = DeckRequest::from_file("/no/such/deck.json").unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
    assert!(err.to_string().contains("/no/such/deck.json"));
}
