//! Recognised measurement units.
//!
//! Every entry carries its long form, which is what parsed ingredients
//! report, its short form, and a handful of extra spellings seen in
//! catalog data.

/// A single measurement unit and the tokens that spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    /// Normalised singular long form, e.g. "tablespoon"
    pub long: &'static str,
    /// Normalised short form, e.g. "tbsp"
    pub short: &'static str,
    aliases: &'static [&'static str],
}

impl Unit {
    const fn new(long: &'static str, short: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            long,
            short,
            aliases,
        }
    }

    fn spelled_as(&self, token: &str) -> bool {
        self.long == token || self.short == token || self.aliases.contains(&token)
    }
}

pub static UNITS: &[Unit] = &[
    Unit::new("tablespoon", "tbsp", &["tbs", "tbl"]),
    Unit::new("teaspoon", "tsp", &[]),
    Unit::new("cup", "cup", &[]),
    Unit::new("ounce", "oz", &[]),
    Unit::new("pound", "lb", &["lbs"]),
    Unit::new("gram", "g", &["gr", "gm"]),
    Unit::new("kilogram", "kg", &["kgs"]),
    Unit::new("milliliter", "ml", &["millilitre"]),
    Unit::new("liter", "l", &["litre"]),
    Unit::new("pint", "pt", &[]),
    Unit::new("quart", "qt", &[]),
    Unit::new("gallon", "gal", &[]),
    Unit::new("pinch", "pinch", &[]),
    Unit::new("dash", "dash", &[]),
];

/// Look up a token in the unit table.
///
/// Matching ignores case, trailing `.`/`,` and a plural `s`/`es` suffix.
pub fn lookup(token: &str) -> Option<&'static Unit> {
    let token = token.trim_end_matches(['.', ',']).to_lowercase();
    if token.is_empty() {
        return None;
    }

    find(&token)
        .or_else(|| {
            token
                .strip_suffix("es")
                .filter(|stem| ["ch", "sh", "s", "x"].iter().any(|end| stem.ends_with(end)))
                .and_then(find)
        })
        .or_else(|| token.strip_suffix('s').and_then(find))
}

/// Normalise a unit token to its long form, if it is a known unit.
pub fn normalize(token: &str) -> Option<&'static str> {
    lookup(token).map(|unit| unit.long)
}

fn find(token: &str) -> Option<&'static Unit> {
    UNITS.iter().find(|unit| unit.spelled_as(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_forms_normalize_to_long() {
        assert_eq!(normalize("tbsp"), Some("tablespoon"));
        assert_eq!(normalize("tsp"), Some("teaspoon"));
        assert_eq!(normalize("oz"), Some("ounce"));
        assert_eq!(normalize("kg"), Some("kilogram"));
    }

    #[test]
    fn test_plurals_and_case() {
        assert_eq!(normalize("Cups"), Some("cup"));
        assert_eq!(normalize("tablespoons"), Some("tablespoon"));
        assert_eq!(normalize("pinches"), Some("pinch"));
        assert_eq!(normalize("lbs"), Some("pound"));
        assert_eq!(normalize("ounces"), Some("ounce"));
    }

    #[test]
    fn test_es_plural_only_after_sibilant() {
        assert_eq!(normalize("dashes"), Some("dash"));
        assert_eq!(normalize("gales"), None);
        assert_eq!(normalize("gals"), Some("gallon"));
    }

    #[test]
    fn test_trailing_punctuation() {
        assert_eq!(normalize("tbsp."), Some("tablespoon"));
        assert_eq!(normalize("cups,"), Some("cup"));
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(normalize("flour"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("."), None);
        assert_eq!(normalize("s"), None);
    }
}
