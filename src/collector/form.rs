use crate::{Error, Result, predictor::PredictionRequest};
use std::io::{BufRead, Write};

pub struct NumberField {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

pub struct TagField {
    pub label: &'static str,
    pub hint: &'static str,
    pub default: &'static [&'static str],
    pub suggestions: &'static [&'static str],
    pub max_tags: usize,
}

pub const PRICE: NumberField = NumberField {
    label: "Current Price(USD)",
    min: 0.0,
    max: 100.0,
    default: 2.99,
};

pub const INITIAL_PRICE: NumberField = NumberField {
    label: "Initial Release Price(USD)",
    min: 0.0,
    max: 100.0,
    default: 2.99,
};

pub const LANGUAGES: TagField = TagField {
    label: "Languages",
    hint: "comma separated (e.g., Japanese, Spanish)",
    default: &["English"],
    suggestions: &[
        "English",
        "Simplified Chinese",
        "Spanish",
        "Japanese",
        "Russian",
        "German",
        "French",
        "Portuguese",
        "Korean",
        "Italian",
        "Polish",
    ],
    max_tags: 20,
};

pub const GENRES: TagField = TagField {
    label: "Genres",
    hint: "comma separated (e.g., Action, RPG)",
    default: &["Indie"],
    suggestions: &["Action", "Adventure", "RPG", "Strategy", "Simulation"],
    max_tags: 10,
};

pub const TAGS: TagField = TagField {
    label: "Tags",
    hint: "comma separated (e.g., FPS, Moddable)",
    default: &["Indie", "Action"],
    suggestions: &["FPS", "RPG", "Pixel Graphics", "Multiplayer", "Moddable"],
    max_tags: 50,
};

/// The values a user submits for prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub price: f64,
    pub initial_price: f64,
    pub languages: Vec<String>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            price: PRICE.default,
            initial_price: INITIAL_PRICE.default,
            languages: LANGUAGES.default_values(),
            genres: GENRES.default_values(),
            tags: TAGS.default_values(),
        }
    }
}

impl NumberField {
    pub fn check(&self, value: f64) -> Result<f64> {
        if value.is_finite() && value >= self.min && value <= self.max {
            Ok(value)
        } else {
            Err(Error::validation(format!(
                "{} must be between {} and {}, got {}",
                self.label, self.min, self.max, value
            )))
        }
    }
}

impl TagField {
    pub fn default_values(&self) -> Vec<String> {
        self.default.iter().map(|s| s.to_string()).collect()
    }

    pub fn check(&self, values: &[String]) -> Result<()> {
        if values.len() > self.max_tags {
            return Err(Error::validation(format!(
                "{} accepts at most {} entries, got {}",
                self.label,
                self.max_tags,
                values.len()
            )));
        }
        Ok(())
    }
}

/// Splits a comma separated answer into trimmed, non-empty entries.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl FormValues {
    pub fn validate(&self) -> Result<()> {
        PRICE.check(self.price)?;
        INITIAL_PRICE.check(self.initial_price)?;
        LANGUAGES.check(&self.languages)?;
        GENRES.check(&self.genres)?;
        TAGS.check(&self.tags)
    }

    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            price: self.price,
            initialprice: self.initial_price,
            languages: self.languages.clone(),
            genre: self.genres.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Asks for every field, offering the current values as defaults.
    /// An empty answer (or end of input) keeps the default; invalid answers are asked again.
    pub fn prompt<R: BufRead, W: Write>(self, input: &mut R, output: &mut W) -> Result<Self> {
        Ok(Self {
            price: ask_number(input, output, &PRICE, self.price)?,
            initial_price: ask_number(input, output, &INITIAL_PRICE, self.initial_price)?,
            languages: ask_tags(input, output, &LANGUAGES, self.languages)?,
            genres: ask_tags(input, output, &GENRES, self.genres)?,
            tags: ask_tags(input, output, &TAGS, self.tags)?,
        })
    }
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

fn ask_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: &NumberField,
    current: f64,
) -> Result<f64> {
    loop {
        write!(output, "{} [{:.2}]: ", field.label, current)?;
        output.flush()?;
        let Some(answer) = read_answer(input)? else {
            return Ok(current);
        };
        match answer.parse::<f64>() {
            Ok(value) => match field.check(value) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(output, "  {}", e)?,
            },
            Err(_) => writeln!(output, "  '{}' is not a number", answer)?,
        }
    }
}

fn ask_tags<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: &TagField,
    current: Vec<String>,
) -> Result<Vec<String>> {
    writeln!(output, "{}: {}", field.label, field.hint)?;
    writeln!(output, "  suggestions: {}", field.suggestions.join(", "))?;
    loop {
        write!(output, "  [{}]: ", current.join(", "))?;
        output.flush()?;
        let Some(answer) = read_answer(input)? else {
            return Ok(current);
        };
        let values = parse_tags(&answer);
        match field.check(&values) {
            Ok(()) => return Ok(values),
            Err(e) => writeln!(output, "  {}", e)?,
        }
    }
}
