//! Rewrite samples — real-shaped catalogue prose through the rewriter.
//!
//! The duplicate-mention merge is a heuristic, so its exact boundary is
//! pinned here by concrete samples rather than derived from a grammar.
//! The final test drives a whole document through resolution and per-block
//! rewriting, the same order the rendering layer uses.

use fieldguide_core::JsonValue;
use fieldguide_markup::{rewrite, SemanticLink, SemanticScheme};
use fieldguide_resolve::resolve;

#[test]
fn test_paragraph_with_mixed_reference_styles() {
    let input = "The **Tagus** landscape://Tejo estuary frames the city. \
                 Start in Alfama place://Alfama, then ride tram 28.";
    let expected = "The **Tagus** [Tejo](landscape://Tejo) estuary frames the city. \
                    Start in [Alfama](place://Alfama), then ride tram 28.";
    assert_eq!(rewrite(input), expected);
}

#[test]
fn test_encoded_display_text_and_bare_reference_together() {
    let input =
        "[Bacalhau%20à%20Brás](dish://Bacalhau%20à%20Brás) pairs with cuisine://Alentejana wines.";
    let expected =
        "[Bacalhau à Brás](dish://Bacalhau%20à%20Brás) pairs with [Alentejana](cuisine://Alentejana) wines.";
    assert_eq!(rewrite(input), expected);
}

#[test]
fn test_foreign_schemes_and_correct_links_are_untouched() {
    let input = "tram://28 runs past [Sé](place://S%C3%A9) daily.";
    assert_eq!(rewrite(input), input);
}

#[test]
fn test_emphasized_mention_keeps_its_emphasis() {
    let input = "Built by **Afonso I**place://Afonso%20I in 1147.";
    let expected = "Built by **[Afonso I](place://Afonso%20I)** in 1147.";
    assert_eq!(rewrite(input), expected);
}

#[test]
fn test_golden_samples_are_fixed_points() {
    let samples = [
        "The **Tagus** [Tejo](landscape://Tejo) estuary frames the city.",
        "Start in [Alfama](place://Alfama), then ride tram 28.",
        "**[Afonso I](place://Afonso%20I)** took the city in 1147.",
        "[Bacalhau à Brás](dish://Bacalhau%20à%20Brás) pairs with [Alentejana](cuisine://Alentejana) wines.",
    ];
    for sample in samples {
        assert_eq!(rewrite(sample), sample, "rewrite moved {:?}", sample);
    }
}

#[test]
fn test_rewritten_destination_parses_back_for_the_click_handler() {
    let rewritten = rewrite("Visit Torre de Belém place://Torre%20de%20Bel%C3%A9m at dawn.");
    assert_eq!(
        rewritten,
        "Visit [Torre de Belém](place://Torre%20de%20Bel%C3%A9m) at dawn."
    );

    // the UI intercepts the destination and recovers the typed reference
    let destination = "place://Torre%20de%20Bel%C3%A9m";
    assert!(rewritten.contains(&format!("({})", destination)));
    let link = SemanticLink::parse(destination).unwrap();
    assert_eq!(link.scheme, SemanticScheme::Place);
    assert_eq!(link.term, "Torre de Belém");
}

#[test]
fn test_document_to_rendered_markdown_pipeline() {
    let document = JsonValue::decode(
        r#"{
            "belem": {
                "markdown": "Visit Torre de Belém place://Torre%20de%20Bel%C3%A9m at dawn.",
                "_metadata": {"geo_scope": "poi"}
            },
            "lisbon_food": {
                "markdown": "Try dish://Pastel%20de%20nata with coffee.",
                "_metadata": {"geo_scope": "city"}
            }
        }"#,
    )
    .unwrap();

    let blocks = resolve(&document);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].id, "belem");

    let rendered: Vec<String> = blocks
        .iter()
        .filter_map(|b| b.markdown.as_deref().map(rewrite))
        .collect();
    assert_eq!(
        rendered[0],
        "Visit [Torre de Belém](place://Torre%20de%20Bel%C3%A9m) at dawn."
    );
    assert_eq!(
        rendered[1],
        "Try [Pastel de nata](dish://Pastel%20de%20nata) with coffee."
    );
}
