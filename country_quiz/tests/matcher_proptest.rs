/// Property-based tests for input normalization and matching
///
/// These tests check the folding rules over generated input and confirm
/// that every catalog spelling resolves back to its own country however it
/// is cased or padded.
use std::sync::Arc;

use country_quiz::{
    Catalog,
    matcher::{Matcher, normalize},
};
use proptest::prelude::*;

// Latin text with accents, mixed case and assorted whitespace
fn latin_text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-ZÀ-ÖØ-öø-ÿ' \t\n-]{0,40}"
}

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().unwrap())
}

// Flip the case of every other character
fn alternate_case(text: &str) -> String {
    text.chars()
        .enumerate()
        .flat_map(|(idx, c)| {
            if idx % 2 == 0 {
                c.to_uppercase().collect::<Vec<_>>()
            } else {
                c.to_lowercase().collect::<Vec<_>>()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn test_normalize_is_idempotent(text in latin_text_strategy()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_normalize_has_no_edge_or_double_spaces(text in latin_text_strategy()) {
        let folded = normalize(&text);
        prop_assert!(!folded.starts_with(' '));
        prop_assert!(!folded.ends_with(' '));
        prop_assert!(!folded.contains("  "));
        prop_assert!(!folded.chars().any(|c| c.is_uppercase()));
    }

    #[test]
    fn test_padding_never_changes_match(
        idx in 0usize..200,
        left in "[ \t]{0,4}",
        right in "[ \t]{0,4}",
    ) {
        let catalog = catalog();
        let matcher = Matcher::new(Arc::clone(&catalog));
        let country = catalog.at(idx).unwrap();
        let padded = format!("{left}{}{right}", country.name);
        prop_assert_eq!(&matcher.find(&padded).unwrap().id, &country.id);
    }
}

#[test]
fn test_every_canonical_name_resolves_to_itself() {
    let catalog = catalog();
    let matcher = Matcher::new(Arc::clone(&catalog));

    for country in catalog.iter() {
        for variant in [
            country.name.clone(),
            country.name.to_uppercase(),
            alternate_case(&country.name),
            normalize(&country.name),
        ] {
            let found = matcher
                .find(&variant)
                .unwrap_or_else(|| panic!("'{variant}' did not match"));
            assert_eq!(found.id, country.id, "'{variant}' matched {}", found.name);
        }
    }
}

#[test]
fn test_every_alternate_resolves_to_its_country() {
    let catalog = catalog();
    let matcher = Matcher::new(Arc::clone(&catalog));

    for country in catalog.iter() {
        for alternate in &country.alternates {
            assert_eq!(
                matcher.find(alternate).map(|found| &found.id),
                Some(&country.id),
                "alternate '{alternate}'"
            );
        }
    }
}
