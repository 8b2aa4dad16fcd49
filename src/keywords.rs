// Default hostile-term lexicon.
//
// A first-pass filter for hostile-narrative language. Many of these terms
// appear in legitimate criticism — the lexicon forces the Hostile label so
// an analyst always sees the post, and the rest of the analysis (polarity,
// network position, engagement) determines how much it matters.
//
// Analysts running a real investigation replace this list with a
// campaign-specific one via `ARGUS_KEYWORDS_FILE` (one term per line).

/// Generic hostile-narrative terms matched case-insensitively as substrings.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    // Delegitimization
    "failed state",
    "fake nation",
    "puppet government",
    "corrupt regime",
    "illegitimate government",
    "state terrorism",
    // Calls to action
    "boycott",
    "rise up against",
    "down with",
    "overthrow",
    // Dehumanization and threat framing
    "destroying our",
    "destroying the",
    "invaders",
    "infest",
    "eradicate them",
    "crush them",
    "enemy of the people",
    "traitor",
    "traitors",
    // Atrocity framing
    "genocide",
    "ethnic cleansing",
    "occupation forces",
    "war crimes",
    // Shaming hashtag stems
    "#shameon",
    "#boycott",
    "#isfailing",
];

/// Normalize a keyword list for matching: lowercase, trimmed, empties dropped.
pub fn normalize(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// The default lexicon as owned strings, already normalized.
pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_lowercase()).collect()
}
