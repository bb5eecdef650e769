use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgba, RgbaImage};
use spotdeck::{DeckRequest, RandomizationConfig, SymbolDef};
use std::io::Cursor;

/// `count` single-letter text symbols with ids "A", "B", ...
pub fn letter_symbols(count: usize) -> Vec<SymbolDef> {
    (0..count)
        .map(|i| {
            let label = ((b'A' + (i % 26) as u8) as char).to_string();
            let id = format!("{}{}", label, i / 26);
            SymbolDef::text(id, label)
        })
        .collect()
}

/// A small PNG with transparency, as a data URL.
pub fn png_data_url(rgba: [u8; 4]) -> String {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(4, 4, Rgba(rgba))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    format!("data:image/png;base64,{}", STANDARD.encode(&bytes))
}

/// A generated deck of the given order with a fixed seed.
pub fn seeded_request(order: usize, seed: u64) -> DeckRequest {
    DeckRequest {
        symbols: letter_symbols(order * order + order + 1),
        order: Some(order),
        random: RandomizationConfig::default().with_seed(seed),
        ..Default::default()
    }
}
