//! Text shown around the prediction: the headline metric and the fixed
//! description of how the model was built.

use std::fmt::Write;

pub const TITLE: &str = "Steam Game Quality Predictor";
pub const VERSION: &str = "v0.0.1";
pub const METRIC_LABEL: &str = "Probability to get 'Mostly Positive' Reviews";

pub const SUMMARY: &str = "\
Steam Game Quality Predictor is an XGBoost machine learning model trained on data from
more than 25,000 commercial games on Steam that predicts how it will be received by
players and whether it will achieve \"Mostly Positive\" reviews (70%+ positive rating
with 10+ reviews) or above based on attributes available before launch.

Simply input your game's planned price, supported languages, genres, and Steam tags to
get a prediction of its likelihood to be well-received by players.";

pub const METHODOLOGY: &str = "\
Training Data: SteamSpy API
Filter: Games with >=20,000 owners (filtering out ultra-niche/unreleased titles)
Target Variable: \"Mostly Positive\" or better Steam rating (70%+ positive)
Algorithm: XGBoost (Tuned)

Why 20K owners? Games below this threshold often have too few reviews for statistically
meaningful ratings, or may be abandoned projects rather than commercial releases.";

pub const PERFORMANCE: [(&str, &str); 5] = [
    ("Precision", "76.3%"),
    ("Recall", "83.1%"),
    ("F1-Score", "79.6%"),
    ("Accuracy", "73.3%"),
    ("ROC-AUC", "70.0%"),
];

pub const FEATURE_IMPORTANCE: [(&str, f64); 25] = [
    ("Great Soundtrack", 1.59),
    ("Classic", 0.72),
    ("Initial Price", 0.67),
    ("Hentai", 0.63),
    ("Massively Multiplayer", 0.58),
    ("Free to Play", 0.53),
    ("Sexual Content", 0.50),
    ("Japanese Language", 0.49),
    ("Moddable", 0.48),
    ("Difficult", 0.47),
    ("Cats", 0.44),
    ("Cute", 0.43),
    ("Visual Novel", 0.42),
    ("Massively Multiplayer (Genre)", 0.40),
    ("Romance", 0.40),
    ("Short", 0.38),
    ("Political Sim", 0.38),
    ("Funny", 0.38),
    ("Emotional", 0.37),
    ("Portuguese (BR)", 0.37),
    ("Extraction Shooter", 0.35),
    ("Politics", 0.34),
    ("3D Vision", 0.34),
    ("Anime", 0.34),
    ("Psychological Horror", 0.33),
];

const BAR_WIDTH: usize = 40;

pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// The headline metric, or the error that prevented computing it.
pub fn render_prediction(outcome: &Result<f64, String>) -> String {
    match outcome {
        Ok(probability) => format!("{}\n  {}\n", METRIC_LABEL, format_percent(*probability)),
        Err(message) => format!("Error during prediction: {}\n", message),
    }
}

pub fn render_header() -> String {
    format!("{}  {}\n", TITLE, VERSION)
}

pub fn render_about() -> String {
    let mut out = String::new();
    section(&mut out, "What is this?", SUMMARY);
    section(&mut out, "Data Source & Methodology", METHODOLOGY);
    section(&mut out, "Model Performance", &render_performance());
    section(
        &mut out,
        "Top 25 important features for quality",
        &render_bar_chart(&FEATURE_IMPORTANCE),
    );
    out
}

fn section(out: &mut String, title: &str, body: &str) {
    let _ = writeln!(out, "\n### {}\n", title);
    let _ = writeln!(out, "{}", body.trim_end());
}

fn render_performance() -> String {
    PERFORMANCE
        .iter()
        .map(|(metric, value)| format!("{}: {}", metric, value))
        .collect::<Vec<_>>()
        .join("   ")
}

/// Horizontal bars scaled so the largest value spans the full width.
pub fn render_bar_chart(rows: &[(&str, f64)]) -> String {
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max);

    let mut out = String::new();
    for (label, value) in rows {
        let len = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:<width$} {} {:.2}",
            label,
            "#".repeat(len),
            value,
            width = label_width
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prediction_metric_as_percentage() {
        assert_eq!(
            render_prediction(&Ok(0.76)),
            "Probability to get 'Mostly Positive' Reviews\n  76.0%\n"
        );
    }

    #[test]
    fn test_prediction_error_is_inline() {
        assert_eq!(
            render_prediction(&Err("connection refused".to_string())),
            "Error during prediction: connection refused\n"
        );
    }

    #[test]
    fn test_bar_chart_scales_to_largest_value() {
        let chart = render_bar_chart(&[("Classic", 1.0), ("Cats", 0.5)]);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], format!("Classic {} 1.00", "#".repeat(40)));
        assert_eq!(lines[1], format!("Cats    {} 0.50", "#".repeat(20)));
    }

    #[test]
    fn test_about_contains_every_section() {
        let about = render_about();
        assert!(about.contains("### What is this?"));
        assert!(about.contains("Algorithm: XGBoost (Tuned)"));
        assert!(about.contains("ROC-AUC: 70.0%"));
        assert!(about.contains("Great Soundtrack"));
        assert_eq!(render_bar_chart(&FEATURE_IMPORTANCE).lines().count(), 25);
    }
}
