use crate::client::ServerInfo;

/// Gameplay rule families a server can be classified into. The entities
/// overlay asset is picked per family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ruleset {
    FDDrace,
    DDNet,
    DDRace,
    Race,
    Fng,
    Vanilla,
}

impl Ruleset {
    /// Key used to build the entities-overlay asset path. DDRace servers in
    /// the wild run the DDNet port and ship ddnet entities, so the family
    /// aliases onto that asset.
    #[inline(always)]
    pub fn asset_key(self) -> &'static str {
        match self {
            Ruleset::FDDrace => "f-ddrace",
            Ruleset::DDNet => "ddnet",
            Ruleset::DDRace => "ddnet",
            Ruleset::Race => "race",
            Ruleset::Fng => "fng",
            Ruleset::Vanilla => "vanilla",
        }
    }
}

impl core::fmt::Display for Ruleset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FDDrace => write!(f, "f-ddrace"),
            Self::DDNet => write!(f, "ddnet"),
            Self::DDRace => write!(f, "ddrace"),
            Self::Race => write!(f, "race"),
            Self::Fng => write!(f, "fng"),
            Self::Vanilla => write!(f, "vanilla"),
        }
    }
}

/// Precedence for classification: specific variants before the generic
/// families they extend, most common family first among peers.
pub const DEFAULT_PRECEDENCE: &[Ruleset] = &[
    Ruleset::FDDrace,
    Ruleset::DDNet,
    Ruleset::DDRace,
    Ruleset::Race,
    Ruleset::Fng,
    Ruleset::Vanilla,
];

/// Family assumed when no predicate matches, so entities show without delay.
pub const DEFAULT_RULESET: Ruleset = Ruleset::DDNet;

/// Server-ruleset detection, one predicate per family. The heuristics
/// (gametype string matching and friends) live with the server browser, not
/// here.
pub trait RulesetClassifier {
    fn matches(&self, info: &ServerInfo, family: Ruleset) -> bool;
}

/// Picks the first family in `precedence` whose predicate matches `info`,
/// falling back to `fallback` when none does.
pub fn classify(
    classifier: &dyn RulesetClassifier,
    info: &ServerInfo,
    precedence: &[Ruleset],
    fallback: Ruleset,
) -> Ruleset {
    precedence
        .iter()
        .copied()
        .find(|&family| classifier.matches(info, family))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct GameTypeIs(&'static str);

    impl RulesetClassifier for GameTypeIs {
        fn matches(&self, info: &ServerInfo, family: Ruleset) -> bool {
            info.game_type == self.0 && format!("{family}") == self.0
        }
    }

    fn info(game_type: &str) -> ServerInfo {
        ServerInfo {
            name: "unit".to_string(),
            game_type: game_type.to_string(),
        }
    }

    #[test]
    fn classify_walks_precedence_in_order() {
        struct MatchAll;
        impl RulesetClassifier for MatchAll {
            fn matches(&self, _info: &ServerInfo, _family: Ruleset) -> bool {
                true
            }
        }
        let got = classify(&MatchAll, &info("x"), DEFAULT_PRECEDENCE, DEFAULT_RULESET);
        assert_eq!(got, Ruleset::FDDrace, "first entry wins when all match");
    }

    #[test]
    fn classify_falls_back_when_nothing_matches() {
        let got = classify(
            &GameTypeIs("ctf"),
            &info("idm"),
            DEFAULT_PRECEDENCE,
            DEFAULT_RULESET,
        );
        assert_eq!(got, Ruleset::DDNet);
    }

    #[test]
    fn classify_honors_a_custom_precedence_table() {
        let only_vanilla: &[Ruleset] = &[Ruleset::Vanilla];
        let got = classify(
            &GameTypeIs("vanilla"),
            &info("vanilla"),
            only_vanilla,
            Ruleset::Fng,
        );
        assert_eq!(got, Ruleset::Vanilla);
    }

    #[test]
    fn ddrace_aliases_onto_the_ddnet_asset() {
        assert_eq!(Ruleset::DDRace.asset_key(), "ddnet");
        assert_eq!(Ruleset::FDDrace.asset_key(), "f-ddrace");
        assert_eq!(Ruleset::Race.asset_key(), "race");
    }
}
