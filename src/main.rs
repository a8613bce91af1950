use anyhow::Result;
use rustdp::{Parser, ParserEngine};

fn main() -> Result<()> {
    println!("=== rustdp: dependency parsing demo ===");

    let engine = ParserEngine::builtin()?;
    println!(
        "Model: {} ({} tags, {} labels)",
        engine.model().name,
        engine.model().tag_set.len(),
        engine.model().label_vocabulary.len()
    );

    // Example sentences
    let texts = vec![
        "The cat sleeps.",
        "John eats pizza.",
        "John Smith works at Microsoft.",
        "The quick brown fox jumps over the lazy dog.",
    ];

    for text in &texts {
        println!("\n--- Input: '{}' ---", text);
        match engine.sentence_detail(text) {
            Ok(detail) => println!("{}", detail),
            Err(e) => println!("Error parsing input: {}", e),
        }
    }

    // Structured access to the parts
    println!("--- Structured parts for '{}' ---", texts[0]);
    for part in engine.parse(texts[0])? {
        let head = if part.is_root() {
            "ROOT".to_string()
        } else {
            part.head.to_string()
        };
        println!(
            "  {} '{}' [{}] -> {} ({})",
            part.index, part.text, part.tag, head, part.label
        );
    }

    Ok(())
}
