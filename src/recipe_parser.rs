use serde::{Deserialize, Serialize};
use std::iter::Peekable;
use std::str::Chars;

pub const NUTRITION_LEN: usize = 7;

/// One row as it comes out of the record source. Every field is kept as raw
/// text; list-shaped columns still hold their textual list literal.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceRow {
    pub name: Option<String>,
    pub id: Option<String>,
    pub minutes: Option<String>,
    pub tags: Option<String>,
    pub nutrition: Option<String>,
    pub steps: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
}

/// Nutrition as published by the source: calories followed by six
/// percent-of-daily-value figures (fat, sugar, sodium, protein, saturated
/// fat, carbohydrates). Only calories, fat, protein and carbohydrates are read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionVector(pub [f64; NUTRITION_LEN]);

impl NutritionVector {
    /// Builds a vector from decoded values. Fewer than seven entries means the
    /// vector is absent; extra trailing entries are ignored.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.len() < NUTRITION_LEN {
            return None;
        }
        let mut slots = [0.0; NUTRITION_LEN];
        slots.copy_from_slice(&values[..NUTRITION_LEN]);
        Some(Self(slots))
    }

    pub fn calories(&self) -> f64 { self.0[0] }
    pub fn fat_pdv(&self) -> f64 { self.0[1] }
    pub fn protein_pdv(&self) -> f64 { self.0[4] }
    pub fn carbs_pdv(&self) -> f64 { self.0[6] }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub minutes: Option<i64>,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub nutrition: Option<NutritionVector>,
}

impl RawRecord {
    pub fn from_row(row: SourceRow) -> Self {
        RawRecord {
            id: row.id.unwrap_or_default().trim().to_string(),
            title: row.name.unwrap_or_default(),
            description: row.description,
            minutes: row.minutes.as_deref().and_then(parse_minutes),
            tags: parse_string_list(row.tags.as_deref()),
            ingredients: parse_string_list(row.ingredients.as_deref()),
            steps: parse_string_list(row.steps.as_deref()),
            nutrition: parse_nutrition(row.nutrition.as_deref()),
        }
    }
}

fn parse_minutes(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite() && m.fract() == 0.0)
            .map(|m| m as i64)
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralItem {
    Text(String),
    Number(f64),
    Bool(bool),
    None,
}

/// Decodes a textual list literal such as `['salt', "cook's choice"]` or
/// `[51.5, 0.0, 13]`. Missing, blank, or malformed input yields an empty list.
pub fn parse_list_literal(raw: Option<&str>) -> Vec<LiteralItem> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => LiteralScanner::new(text).list().unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Text items of a list literal. Numbers keep their textual form; booleans
/// and `None` carry no name and are dropped.
pub fn parse_string_list(raw: Option<&str>) -> Vec<String> {
    parse_list_literal(raw)
        .into_iter()
        .filter_map(|item| match item {
            LiteralItem::Text(s) => Some(s),
            LiteralItem::Number(n) => Some(n.to_string()),
            LiteralItem::Bool(_) | LiteralItem::None => None,
        })
        .collect()
}

/// Any non-numeric element makes the whole vector absent.
pub fn parse_nutrition(raw: Option<&str>) -> Option<NutritionVector> {
    let values: Option<Vec<f64>> = parse_list_literal(raw)
        .into_iter()
        .map(|item| match item {
            LiteralItem::Number(n) => Some(n),
            _ => None,
        })
        .collect();
    values.and_then(|v| NutritionVector::from_values(&v))
}

struct LiteralScanner<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> LiteralScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { chars: text.chars().peekable() }
    }

    fn skip_ws(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn list(&mut self) -> Option<Vec<LiteralItem>> {
        self.skip_ws();
        if self.chars.next()? != '[' {
            return None;
        }
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            match *self.chars.peek()? {
                ']' => {
                    self.chars.next();
                    break;
                }
                _ => items.push(self.item()?),
            }
            self.skip_ws();
            match self.chars.next()? {
                ',' => continue,
                ']' => break,
                _ => return None,
            }
        }
        self.skip_ws();
        // Trailing content after the closing bracket is not a list literal.
        if self.chars.next().is_some() {
            return None;
        }
        Some(items)
    }

    fn item(&mut self) -> Option<LiteralItem> {
        match *self.chars.peek()? {
            quote @ ('\'' | '"') => {
                self.chars.next();
                self.string(quote).map(LiteralItem::Text)
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number(),
            c if c.is_ascii_alphabetic() => self.keyword(),
            _ => None,
        }
    }

    fn string(&mut self, quote: char) -> Option<String> {
        let mut out = String::new();
        loop {
            match self.chars.next()? {
                c if c == quote => return Some(out),
                '\\' => self.escape(&mut out)?,
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Option<()> {
        match self.chars.next()? {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'x' => out.push(self.hex_char(2)?),
            'u' => out.push(self.hex_char(4)?),
            'U' => out.push(self.hex_char(8)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Some(())
    }

    fn hex_char(&mut self, width: usize) -> Option<char> {
        let digits: String = (0..width).map(|_| self.chars.next()).collect::<Option<_>>()?;
        u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
    }

    fn number(&mut self) -> Option<LiteralItem> {
        let mut token = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                token.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        token.parse::<f64>().ok().map(LiteralItem::Number)
    }

    fn keyword(&mut self) -> Option<LiteralItem> {
        let mut token = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                token.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        match token.as_str() {
            "True" => Some(LiteralItem::Bool(true)),
            "False" => Some(LiteralItem::Bool(false)),
            "None" => Some(LiteralItem::None),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_list_mixed_quotes() {
        let parsed = parse_string_list(Some(r#"['salt', "cook's choice", 'a \'quoted\' word']"#));
        assert_eq!(parsed, vec!["salt", "cook's choice", "a 'quoted' word"]);
    }

    #[test]
    fn test_parse_list_degrades_to_empty() {
        assert!(parse_string_list(None).is_empty());
        assert!(parse_string_list(Some("")).is_empty());
        assert!(parse_string_list(Some("   ")).is_empty());
        assert!(parse_string_list(Some("not a list")).is_empty());
        assert!(parse_string_list(Some("['unterminated")).is_empty());
        assert!(parse_string_list(Some("['a', 'b'] trailing")).is_empty());
        assert!(parse_string_list(Some("['a' 'b']")).is_empty());
    }

    #[test]
    fn test_parse_empty_list_and_trailing_comma() {
        assert!(parse_list_literal(Some("[]")).is_empty());
        assert_eq!(parse_string_list(Some("['a', 'b',]")), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_escapes() {
        let parsed = parse_string_list(Some(r"['caf\xe9', 'tab\there', 'back\\slash']"));
        assert_eq!(parsed, vec!["café", "tab\there", "back\\slash"]);
    }

    #[test]
    fn test_parse_nutrition_vector() {
        let vector = parse_nutrition(Some("[300.0, 20.0, 5.0, 10.0, 40.0, 3.0, 30.0]")).unwrap();
        assert_eq!(vector.calories(), 300.0);
        assert_eq!(vector.fat_pdv(), 20.0);
        assert_eq!(vector.protein_pdv(), 40.0);
        assert_eq!(vector.carbs_pdv(), 30.0);
    }

    #[test]
    fn test_parse_nutrition_short_or_malformed_is_absent() {
        assert_eq!(parse_nutrition(Some("[300.0, 20.0, 5.0, 10.0, 40.0, 3.0]")), None);
        assert_eq!(parse_nutrition(Some("[300.0, 'x', 5.0, 10.0, 40.0, 3.0, 30.0]")), None);
        assert_eq!(parse_nutrition(Some("garbage")), None);
        assert_eq!(parse_nutrition(None), None);
    }

    #[test]
    fn test_parse_nutrition_accepts_integers_and_negatives() {
        let vector = parse_nutrition(Some("[120, -1, 0, 0, 2, 0, 1e1]")).unwrap();
        assert_eq!(vector.0, [120.0, -1.0, 0.0, 0.0, 2.0, 0.0, 10.0]);
    }

    #[test]
    fn test_record_from_row() {
        let row = SourceRow {
            name: Some("arriba baked squash".to_string()),
            id: Some(" 137739 ".to_string()),
            minutes: Some("55".to_string()),
            tags: Some("['60-minutes-or-less', 'mexican']".to_string()),
            nutrition: Some("[51.5, 0.0, 13.0, 0.0, 2.0, 0.0, 4.0]".to_string()),
            steps: Some("['make a choice', 'cut squash']".to_string()),
            description: Some("autumn is my favorite time".to_string()),
            ingredients: Some("['winter squash', 'mexican seasoning']".to_string()),
        };
        let record = RawRecord::from_row(row);
        assert_eq!(record.id, "137739");
        assert_eq!(record.minutes, Some(55));
        assert_eq!(record.tags.len(), 2);
        assert_eq!(record.steps.len(), 2);
        assert_eq!(record.ingredients[1], "mexican seasoning");
        assert!(record.nutrition.is_some());
    }

    #[test]
    fn test_minutes_parsing() {
        assert_eq!(parse_minutes("30"), Some(30));
        assert_eq!(parse_minutes(" 45.0 "), Some(45));
        assert_eq!(parse_minutes("12.5"), None);
        assert_eq!(parse_minutes("soon"), None);
    }
}
