//! Two-column `front,back` text used to export and import deck cards.
//!
//! Neither direction escapes delimiters: a comma or newline inside card text
//! does not survive a round trip.

use crate::model::{Card, CardDraft};

/// Render cards as `front,back` lines joined by `\n`.
#[must_use]
pub fn export_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| format!("{},{}", c.front, c.back))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Download file name for a deck: whitespace runs become `_`.
#[must_use]
pub fn export_file_name(deck_name: &str) -> String {
    let mut out = String::with_capacity(deck_name.len() + 4);
    let mut in_space = false;
    for ch in deck_name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out.push_str(".csv");
    out
}

/// Parse `front,back` lines into card drafts.
///
/// Blank lines and lines without a comma are skipped. The first comma splits
/// the sides; one surrounding `"` is stripped from each side before trimming.
#[must_use]
pub fn import_cards(text: &str) -> Vec<CardDraft> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let (front, back) = line.split_once(',')?;
            Some(CardDraft::text_only(
                strip_quotes(front).trim(),
                strip_quotes(back).trim(),
            ))
        })
        .collect()
}

fn strip_quotes(side: &str) -> &str {
    let side = side.strip_prefix('"').unwrap_or(side);
    side.strip_suffix('"').unwrap_or(side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CardId;

    fn card(front: &str, back: &str) -> Card {
        Card {
            id: CardId::generate(),
            front: front.into(),
            back: back.into(),
            front_image_url: None,
            back_image_url: None,
            hint: None,
        }
    }

    #[test]
    fn export_joins_lines_without_trailing_newline() {
        let text = export_cards(&[card("hola", "hello"), card("gato", "cat")]);
        assert_eq!(text, "hola,hello\ngato,cat");
        assert_eq!(export_cards(&[]), "");
    }

    #[test]
    fn round_trip_preserves_pairs_and_order() {
        let cards = vec![card("uno", "one"), card("dos", "two"), card("tres", "three")];
        let drafts = import_cards(&export_cards(&cards));
        let pairs: Vec<_> = drafts.iter().map(|d| (d.front.as_str(), d.back.as_str())).collect();
        assert_eq!(pairs, vec![("uno", "one"), ("dos", "two"), ("tres", "three")]);
    }

    #[test]
    fn import_splits_on_first_comma_only() {
        let drafts = import_cards("capital of France,Paris, the city of light");
        assert_eq!(drafts[0].front, "capital of France");
        assert_eq!(drafts[0].back, "Paris, the city of light");
    }

    #[test]
    fn import_strips_quotes_and_handles_crlf() {
        let drafts = import_cards("\"Hund\",\"dog\"\r\n\r\n  \nKatze , cat \r\n");
        assert_eq!(drafts.len(), 2);
        assert_eq!((drafts[0].front.as_str(), drafts[0].back.as_str()), ("Hund", "dog"));
        assert_eq!((drafts[1].front.as_str(), drafts[1].back.as_str()), ("Katze", "cat"));
    }

    #[test]
    fn import_discards_lines_without_comma() {
        let drafts = import_cards("header only\nfront,back\nnope");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].front, "front");
    }

    // Embedded commas are not escaped on export, so the back side absorbs them.
    #[test]
    fn embedded_comma_is_lossy() {
        let drafts = import_cards(&export_cards(&[card("a,b", "c")]));
        assert_eq!(drafts[0].front, "a");
        assert_eq!(drafts[0].back, "b,c");
    }

    #[test]
    fn file_name_collapses_whitespace() {
        assert_eq!(export_file_name("Spanish  Verbs\tB1"), "Spanish_Verbs_B1.csv");
        assert_eq!(export_file_name("Deck"), "Deck.csv");
    }
}
