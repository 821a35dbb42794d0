/// Badge colour for languages missing from [`LANGUAGE_COLORS`].
pub const DEFAULT_LANGUAGE_COLOR: &str = "#7c6af7";

/// Well-known languages and their badge colours.
pub const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("Java", "#b07219"),
    ("C", "#555555"),
    ("C++", "#f34b7d"),
    ("C#", "#178600"),
    ("Ruby", "#701516"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("PHP", "#4F5D95"),
    ("Swift", "#F05138"),
    ("Kotlin", "#A97BFF"),
    ("Dart", "#00B4AB"),
    ("Shell", "#89e051"),
    ("Vue", "#41b883"),
];

/// Colour for a language badge. Lookup is exact; anything unknown, and no
/// language at all, gets [`DEFAULT_LANGUAGE_COLOR`].
pub fn language_color(language: Option<&str>) -> &'static str {
    language
        .and_then(|lang| {
            LANGUAGE_COLORS
                .iter()
                .find(|(name, _)| *name == lang)
                .map(|(_, color)| *color)
        })
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}

/// Display form of a counter: `999`, `1.0k`, `12.3k`.
///
/// Values from 1000 up are divided by 1000 and rounded to one decimal
/// place. Rounding follows the binary value of `n / 1000`, so `1150`
/// becomes `1.1k`; the only exact ties (`n % 1000` of 250 or 750) round up.
pub fn format_count(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }

    let rem = n % 1000;
    if rem == 250 || rem == 750 {
        return format!("{}.{}k", n / 1000, rem / 100 + 1);
    }

    format!("{:.1}k", n as f64 / 1000.0)
}
