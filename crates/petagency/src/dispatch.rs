//! Mention-text dispatch: an ordered rule list, first match wins.
//!
//! Rules are evaluated case-insensitively against the raw mention text and
//! compile to a [`Command`]; the agency executes the command and owns the
//! reply text. Order matters and is part of the contract: restock, adopt,
//! thanks, abandon, social-rule apology, then the fallback.

use crate::catalog::MANNERS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Restock,
    Adopt { species: String },
    Thanks,
    Abandon { species: String },
    SocialRules,
    Fallback,
}

pub fn dispatch(text: &str) -> Command {
    let lower = text.to_lowercase();

    if lower.contains("time to restock") {
        return Command::Restock;
    }
    if let Some(species) = parse_adopt(&lower) {
        return Command::Adopt { species };
    }
    if lower.contains("thank") {
        return Command::Thanks;
    }
    if let Some(species) = parse_abandon(&lower) {
        return Command::Abandon { species };
    }
    if violates_social_rules(&lower) {
        return Command::SocialRules;
    }
    Command::Fallback
}

/// Politeness gate for adoptions: any of the accepted tokens, anywhere in
/// the message.
pub fn is_polite(text: &str) -> bool {
    let lower = text.to_lowercase();
    MANNERS.iter().any(|m| lower.contains(m))
}

/// "a cat" / "an owl", for suggestion replies.
pub fn a_an(noun: &str) -> String {
    match noun.chars().next() {
        Some(c) if "aeiou".contains(c.to_ascii_lowercase()) => format!("an {noun}"),
        _ => format!("a {noun}"),
    }
}

/// "adopt [a|an|the|one] <species>". The article is optional.
fn parse_adopt(lower: &str) -> Option<String> {
    for (i, _) in lower.match_indices("adopt") {
        let rest = &lower[i + "adopt".len()..];
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let mut words = rest.split_whitespace();
        let Some(first) = words.next() else { continue };
        let candidate = match first {
            "a" | "an" | "the" | "one" => match words.next() {
                Some(w) => w,
                None => continue,
            },
            _ => first,
        };
        let species = species_token(candidate);
        if !species.is_empty() {
            return Some(species.to_string());
        }
    }
    None
}

/// "abandon my <species>".
fn parse_abandon(lower: &str) -> Option<String> {
    for (i, _) in lower.match_indices("abandon my") {
        let rest = &lower[i + "abandon my".len()..];
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let Some(word) = rest.split_whitespace().next() else {
            continue;
        };
        let species = species_token(word);
        if !species.is_empty() {
            return Some(species.to_string());
        }
    }
    None
}

/// Longest leading run of letters and hyphens ("t-rex", "dog," -> "dog").
fn species_token(word: &str) -> &str {
    let end = word
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '-'))
        .unwrap_or(word.len());
    &word[..end]
}

fn violates_social_rules(lower: &str) -> bool {
    if lower.contains("well actually") || lower.contains("well-actually") {
        return true;
    }
    if lower.contains("feigning surprise") || lower.contains("backseat driving") {
        return true;
    }
    // "subtleism", "subtle-ism", "subtle ism", any mix of separators.
    lower.match_indices("subtle").any(|(i, _)| {
        lower[i + "subtle".len()..]
            .trim_start_matches(['-', ' '])
            .starts_with("ism")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adopt(species: &str) -> Command {
        Command::Adopt {
            species: species.to_string(),
        }
    }

    #[test]
    fn restock_matches_anywhere_case_insensitive() {
        assert_eq!(dispatch("hey genie, Time To Restock!"), Command::Restock);
    }

    #[test]
    fn adopt_with_and_without_article() {
        assert_eq!(dispatch("adopt a dog please"), adopt("dog"));
        assert_eq!(dispatch("adopt an owl please"), adopt("owl"));
        assert_eq!(dispatch("adopt the t-rex please"), adopt("t-rex"));
        assert_eq!(dispatch("adopt one cat please"), adopt("cat"));
        assert_eq!(dispatch("adopt dog please"), adopt("dog"));
        assert_eq!(dispatch("please ADOPT A DOG"), adopt("dog"));
    }

    #[test]
    fn adopt_trims_trailing_punctuation_from_species() {
        assert_eq!(dispatch("adopt a dog, please!"), adopt("dog"));
    }

    #[test]
    fn adopt_needs_whitespace_after_keyword() {
        // "adoption" is not an adoption request.
        assert_eq!(dispatch("the adoption fell through"), Command::Fallback);
    }

    #[test]
    fn restock_wins_over_adopt() {
        assert_eq!(
            dispatch("time to restock so I can adopt a dog"),
            Command::Restock
        );
    }

    #[test]
    fn thanks_wins_over_abandon() {
        assert_eq!(
            dispatch("thanks, but I'll abandon my dog"),
            Command::Thanks
        );
    }

    #[test]
    fn abandon_extracts_species() {
        assert_eq!(dispatch("abandon my dog"), Command::Abandon {
            species: "dog".to_string()
        });
        assert_eq!(dispatch("Abandon My T-Rex."), Command::Abandon {
            species: "t-rex".to_string()
        });
    }

    #[test]
    fn social_rule_variants() {
        assert_eq!(dispatch("that was a well actually"), Command::SocialRules);
        assert_eq!(dispatch("well-actually..."), Command::SocialRules);
        assert_eq!(dispatch("no feigning surprise"), Command::SocialRules);
        assert_eq!(dispatch("stop backseat driving"), Command::SocialRules);
        assert_eq!(dispatch("that's a subtleism"), Command::SocialRules);
        assert_eq!(dispatch("subtle-ism alert"), Command::SocialRules);
        assert_eq!(dispatch("a subtle ism"), Command::SocialRules);
        assert_eq!(dispatch("a subtle hint"), Command::Fallback);
    }

    #[test]
    fn unmatched_text_falls_back() {
        assert_eq!(dispatch("what pets do you have?"), Command::Fallback);
    }

    #[test]
    fn politeness_tokens_match_anywhere() {
        assert!(is_polite("adopt a dog please"));
        assert!(is_polite("adopt a dog PLEASE"));
        assert!(is_polite("sudo adopt a dog"));
        assert!(is_polite("adopt a dog por favor"));
        assert!(is_polite("oh mighty djinn, a dog"));
        assert!(!is_polite("adopt a dog"));
        assert!(!is_polite("give me a dog now"));
    }

    #[test]
    fn a_an_picks_the_article() {
        assert_eq!(a_an("dog"), "a dog");
        assert_eq!(a_an("owl"), "an owl");
        assert_eq!(a_an("elephant"), "an elephant");
        assert_eq!(a_an("unicorn"), "an unicorn"); // by spelling, not sound
    }
}
