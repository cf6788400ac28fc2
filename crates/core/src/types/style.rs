//! Beer style enumeration.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known [`BeerStyle`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown beer style: {0}")]
pub struct UnknownBeerStyle(pub String);

/// Style of a beer.
///
/// Serialized (JSON, form values, database enum labels) in
/// `SCREAMING_SNAKE_CASE`, e.g. `PALE_ALE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    Lager,
    Pilsner,
    Stout,
    Gose,
    Porter,
    Ale,
    Wheat,
    Ipa,
    PaleAle,
    Saison,
}

impl BeerStyle {
    /// Every style, in display order.
    pub const ALL: [Self; 10] = [
        Self::Lager,
        Self::Pilsner,
        Self::Stout,
        Self::Gose,
        Self::Porter,
        Self::Ale,
        Self::Wheat,
        Self::Ipa,
        Self::PaleAle,
        Self::Saison,
    ];

    /// Wire code, e.g. `PALE_ALE`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Lager => "LAGER",
            Self::Pilsner => "PILSNER",
            Self::Stout => "STOUT",
            Self::Gose => "GOSE",
            Self::Porter => "PORTER",
            Self::Ale => "ALE",
            Self::Wheat => "WHEAT",
            Self::Ipa => "IPA",
            Self::PaleAle => "PALE_ALE",
            Self::Saison => "SAISON",
        }
    }

    /// Human-readable label, e.g. `Pale Ale`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Lager => "Lager",
            Self::Pilsner => "Pilsner",
            Self::Stout => "Stout",
            Self::Gose => "Gose",
            Self::Porter => "Porter",
            Self::Ale => "Ale",
            Self::Wheat => "Wheat",
            Self::Ipa => "IPA",
            Self::PaleAle => "Pale Ale",
            Self::Saison => "Saison",
        }
    }
}

impl std::fmt::Display for BeerStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for BeerStyle {
    type Err = UnknownBeerStyle;

    /// Accepts the wire code in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownBeerStyle(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("IPA".parse::<BeerStyle>().unwrap(), BeerStyle::Ipa);
        assert_eq!("pale_ale".parse::<BeerStyle>().unwrap(), BeerStyle::PaleAle);
        assert_eq!(" Stout ".parse::<BeerStyle>().unwrap(), BeerStyle::Stout);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "LAMBIC".parse::<BeerStyle>().unwrap_err();
        assert_eq!(err.to_string(), "unknown beer style: LAMBIC");
    }

    #[test]
    fn test_display_matches_serde() {
        for style in BeerStyle::ALL {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{style}\""));
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(BeerStyle::PaleAle.label(), "Pale Ale");
        assert_eq!(BeerStyle::Ipa.label(), "IPA");
    }
}
