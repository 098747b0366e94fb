use log::trace;

use super::units;
use super::ParsedIngredient;

const FRACTION_GLYPHS: &[(char, &str)] = &[
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];

/// Words that link a unit to the ingredient name ("2 cups of flour").
const CONNECTORS: &[&str] = &["of"];

/// Parse a free-text ingredient line into count, unit and name.
///
/// Consumption is greedy and happens in three stages: leading quantity
/// tokens, then at most one unit token, then everything else as the name.
/// The function never fails; lines it cannot make sense of come back with
/// no count and no unit.
pub fn parse(raw: &str) -> ParsedIngredient {
    let normalized = replace_fraction_glyphs(raw);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let (count, consumed) = read_quantity(&tokens);
    let mut rest = &tokens[consumed..];

    let mut unit = "";
    if let Some(long) = rest.first().and_then(|token| units::normalize(token)) {
        let after_unit = skip_connectors(&rest[1..]);
        // A unit with nothing after it is more likely the name itself ("2 cups").
        if !strip_trailing_remarks(&after_unit.join(" ")).is_empty() {
            unit = long;
            rest = after_unit;
        }
    }

    let mut ingredient = strip_trailing_remarks(&rest.join(" "));
    let mut count = count;
    if ingredient.is_empty() {
        // Nothing but a quantity: keep the whole line as the name.
        count = None;
        unit = "";
        ingredient = strip_trailing_remarks(&tokens.join(" "));
    }
    if ingredient.is_empty() {
        ingredient = tokens.join(" ");
    }

    trace!(
        "Parsed {:?} into count={:?} unit={:?} ingredient={:?}",
        raw,
        count,
        unit,
        ingredient
    );

    ParsedIngredient {
        count,
        unit: unit.to_string(),
        ingredient,
    }
}

/// Replace unicode vulgar fractions with ASCII ones, splitting a glyph that
/// is glued to a whole number ("1½" becomes "1 1/2").
fn replace_fraction_glyphs(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match FRACTION_GLYPHS.iter().find(|(glyph, _)| *glyph == ch) {
            Some((_, ascii)) => {
                if out.chars().last().is_some_and(|prev| prev.is_ascii_digit()) {
                    out.push(' ');
                }
                out.push_str(ascii);
            }
            None => out.push(ch),
        }
    }
    out
}

/// Read the leading quantity, returning its value and how many tokens it used.
fn read_quantity(tokens: &[&str]) -> (Option<f64>, usize) {
    let Some(first) = tokens.first() else {
        return (None, 0);
    };

    if let Some(mixed) = parse_hyphenated_mixed(first) {
        return (Some(mixed), 1);
    }

    if let Some(whole) = parse_whole(first) {
        if let Some(fraction) = tokens.get(1).and_then(|token| parse_fraction(token)) {
            return (Some(whole + fraction), 2);
        }
        return (Some(whole), 1);
    }

    match parse_fraction(first) {
        Some(fraction) => (Some(fraction), 1),
        None => (None, 0),
    }
}

/// An integer or a plain decimal such as "1.5".
fn parse_whole(token: &str) -> Option<f64> {
    let digits_only = !token.is_empty()
        && token.chars().all(|c| c.is_ascii_digit() || c == '.')
        && token.chars().next().is_some_and(|c| c.is_ascii_digit());
    if !digits_only {
        return None;
    }
    token.parse::<f64>().ok()
}

/// A simple fraction "a/b" with a non-zero denominator.
fn parse_fraction(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    let numerator = parse_integer(numerator)?;
    let denominator = parse_integer(denominator)?;
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64)
}

/// A mixed number written with a hyphen, such as "1-1/2".
fn parse_hyphenated_mixed(token: &str) -> Option<f64> {
    let (whole, fraction) = token.split_once('-')?;
    let whole = parse_integer(whole)?;
    let fraction = parse_fraction(fraction)?;
    Some(whole as f64 + fraction)
}

fn parse_integer(token: &str) -> Option<u64> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn skip_connectors<'a, 'b>(tokens: &'a [&'b str]) -> &'a [&'b str] {
    match tokens.first() {
        Some(first) if CONNECTORS.contains(&first.to_lowercase().as_str()) => &tokens[1..],
        _ => tokens,
    }
}

/// Drop trailing parenthetical remarks: "butter (softened)" -> "butter".
fn strip_trailing_remarks(text: &str) -> String {
    let mut text = text.trim_end();
    while text.ends_with(')') {
        match text.rfind('(') {
            Some(open) => text = text[..open].trim_end(),
            None => break,
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(count: Option<f64>, unit: &str, ingredient: &str) -> ParsedIngredient {
        ParsedIngredient {
            count,
            unit: unit.to_string(),
            ingredient: ingredient.to_string(),
        }
    }

    #[test]
    fn test_integer_with_unit() {
        assert_eq!(parse("2 cups sugar"), parsed(Some(2.0), "cup", "sugar"));
        assert_eq!(
            parse("3 tbsp olive oil"),
            parsed(Some(3.0), "tablespoon", "olive oil")
        );
    }

    #[test]
    fn test_simple_fraction() {
        assert_eq!(parse("1/2 tsp salt"), parsed(Some(0.5), "teaspoon", "salt"));
    }

    #[test]
    fn test_mixed_number_keeps_casing_of_name() {
        assert_eq!(
            parse("1 1/2 cups Plain Flour, sifted"),
            parsed(Some(1.5), "cup", "Plain Flour, sifted")
        );
    }

    #[test]
    fn test_hyphenated_mixed_number() {
        assert_eq!(
            parse("1-1/2 pounds ground beef"),
            parsed(Some(1.5), "pound", "ground beef")
        );
    }

    #[test]
    fn test_decimal_quantity() {
        assert_eq!(parse("2.5 kg potatoes"), parsed(Some(2.5), "kilogram", "potatoes"));
    }

    #[test]
    fn test_unicode_fractions() {
        assert_eq!(parse("½ cup milk"), parsed(Some(0.5), "cup", "milk"));
        assert_eq!(parse("1½ cups milk"), parsed(Some(1.5), "cup", "milk"));
        assert_eq!(parse("1 ¼ oz yeast"), parsed(Some(1.25), "ounce", "yeast"));
    }

    #[test]
    fn test_no_unit() {
        assert_eq!(parse("4 eggs"), parsed(Some(4.0), "", "eggs"));
    }

    #[test]
    fn test_no_quantity() {
        assert_eq!(
            parse("a pinch of salt"),
            parsed(None, "", "a pinch of salt")
        );
        assert_eq!(
            parse("  Salt and pepper to taste  "),
            parsed(None, "", "Salt and pepper to taste")
        );
    }

    #[test]
    fn test_unit_without_quantity() {
        assert_eq!(parse("pinch of salt"), parsed(None, "pinch", "salt"));
    }

    #[test]
    fn test_connector_after_unit_is_dropped() {
        assert_eq!(parse("2 cups of flour"), parsed(Some(2.0), "cup", "flour"));
    }

    #[test]
    fn test_trailing_parenthetical_is_stripped() {
        assert_eq!(
            parse("1 cup butter (softened)"),
            parsed(Some(1.0), "cup", "butter")
        );
        assert_eq!(
            parse("fresh basil (optional) (to garnish)"),
            parsed(None, "", "fresh basil")
        );
    }

    #[test]
    fn test_ingredient_never_empty() {
        assert_eq!(parse("2 cups"), parsed(Some(2.0), "", "cups"));
        assert_eq!(parse("3"), parsed(None, "", "3"));
        assert_eq!(parse("(optional)"), parsed(None, "", "(optional)"));
    }

    #[test]
    fn test_zero_denominator_is_not_a_number() {
        assert_eq!(parse("1/0 cup water"), parsed(None, "", "1/0 cup water"));
    }

    #[test]
    fn test_word_ending_in_es_is_not_a_unit() {
        assert_eq!(parse("3 gales wind"), parsed(Some(3.0), "", "gales wind"));
    }

    #[test]
    fn test_two_integers_only_first_is_count() {
        assert_eq!(parse("2 3 eggs"), parsed(Some(2.0), "", "3 eggs"));
    }
}
