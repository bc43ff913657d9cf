//! Rule-based sentence segmentation for article body text.

/// Tokens ending in a period that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "al.", "etc.", "fig.", "figs.", "ref.", "refs.", "vs.", "approx.", "ca.",
    "cf.", "no.", "nos.", "vol.", "eq.", "dr.", "mr.", "mrs.", "ms.", "prof.", "st.", "resp.",
    "suppl.", "sp.", "spp.",
];

/// Split `text` into sentences.
///
/// A sentence ends at `.`, `!` or `?` (optionally followed by closing quotes or
/// brackets) when the next non-space character starts a new sentence: an
/// uppercase letter, a digit, or an opening bracket or quote. Known
/// abbreviations and single-letter initials never end a sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0usize;

    while i < chars.len() {
        let (_, c) = chars[i];
        if !matches!(c, '.' | '!' | '?') {
            i += 1;
            continue;
        }

        // Swallow runs like "?!" and trailing closers like `.)` or `."`.
        let mut end = i + 1;
        while end < chars.len() && is_closer(chars[end].1) {
            end += 1;
        }

        if end < chars.len() && !chars[end].1.is_whitespace() {
            i = end;
            continue;
        }

        let mut next = end;
        while next < chars.len() && chars[next].1.is_whitespace() {
            next += 1;
        }

        let byte_end = chars.get(end).map(|(b, _)| *b).unwrap_or(text.len());
        let at_text_end = next >= chars.len();
        let starts_sentence = chars
            .get(next)
            .map(|(_, n)| starts_sentence(*n))
            .unwrap_or(false);

        if c == '.' && !at_text_end && ends_with_abbreviation(&text[start..byte_end]) {
            i = end;
            continue;
        }

        if at_text_end || starts_sentence {
            push_trimmed(&mut sentences, &text[start..byte_end]);
            start = chars.get(next).map(|(b, _)| *b).unwrap_or(text.len());
        }
        i = end;
    }

    if start < text.len() {
        push_trimmed(&mut sentences, &text[start..]);
    }
    sentences
}

fn starts_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || matches!(c, '(' | '[' | '"' | '“')
}

fn is_closer(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | ')' | ']' | '"' | '\'' | '”' | '’')
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

fn ends_with_abbreviation(segment: &str) -> bool {
    let mut words = segment.split_whitespace().rev();
    let Some(last) = words.next() else {
        return false;
    };
    let word = last.trim_start_matches(['(', '[', '"']);
    let lower = word.to_lowercase();

    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }

    // Initials ("Smith J. R.") open the segment or follow a capitalised word;
    // after "chromosome X." or "hepatitis B." the sentence ends.
    is_initial(word)
        && words
            .next()
            .map(|prev| is_initial(prev) || prev.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(true)
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(a), Some('.'), None) if a.is_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_split() {
        let s = split_sentences("First sentence here. Second one! Is this third? Yes.");
        assert_eq!(
            s,
            vec!["First sentence here.", "Second one!", "Is this third?", "Yes."]
        );
    }

    #[test]
    fn test_identifier_colon_does_not_split() {
        let s = split_sentences(
            "Mutations in COL4A3 (HGNC:2204) cause Alport syndrome. Another gene was normal.",
        );
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], "Mutations in COL4A3 (HGNC:2204) cause Alport syndrome.");
    }

    #[test]
    fn test_abbreviations_and_initials() {
        let s = split_sentences(
            "As shown by Smith et al. The result (see Fig. 2) held, e.g. In vitro. J. Doe agreed.",
        );
        assert_eq!(
            s,
            vec![
                "As shown by Smith et al. The result (see Fig. 2) held, e.g. In vitro.",
                "J. Doe agreed."
            ]
        );
    }

    #[test]
    fn test_single_letter_after_lowercase_word_ends_sentence() {
        let s = split_sentences("COL4A5 (HGNC:2207) maps to chromosome X. Alport syndrome is rare.");
        assert_eq!(
            s,
            vec!["COL4A5 (HGNC:2207) maps to chromosome X.", "Alport syndrome is rare."]
        );

        let s = split_sentences(
            "Patients had hepatitis B. Deficiency of complex I. Blood group type A. Done.",
        );
        assert_eq!(
            s,
            vec![
                "Patients had hepatitis B.",
                "Deficiency of complex I.",
                "Blood group type A.",
                "Done."
            ]
        );
    }

    #[test]
    fn test_initials_after_names() {
        let s = split_sentences("Data from Smith J. R. Tolkien were used. Next.");
        assert_eq!(s, vec!["Data from Smith J. R. Tolkien were used.", "Next."]);
    }

    #[test]
    fn test_decimal_numbers_and_lowercase_continuation() {
        let s = split_sentences("The ratio was 1.5 in cases. the gene p.R123X was found.");
        assert_eq!(s, vec!["The ratio was 1.5 in cases. the gene p.R123X was found."]);
    }

    #[test]
    fn test_closing_bracket_after_period() {
        let s = split_sentences("It was reported (in 2019.) Then it was confirmed.");
        assert_eq!(s, vec!["It was reported (in 2019.)", "Then it was confirmed."]);
    }

    #[test]
    fn test_trailing_fragment_and_empty() {
        assert_eq!(split_sentences("No terminal punctuation"), vec!["No terminal punctuation"]);
        assert!(split_sentences("   ").is_empty());
    }
}
