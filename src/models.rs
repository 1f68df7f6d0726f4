use serde::{Deserialize, Serialize};
use std::fmt;

/// Form field carrying the article body.
pub const ARTICLE_FIELD: &str = "article_text";

/// Placeholder returned when the form carries no article text.
pub const NO_ARTICLE: &str = "No article provided";

/// The closed set of labels the trained model predicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Religion,
    Sport,
    Economy,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Religion, Category::Sport, Category::Economy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Religion => "religion",
            Category::Sport => "sport",
            Category::Economy => "economy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
pub struct PredictForm {
    pub article_text: Option<String>,
}

impl PredictForm {
    /// Picks the first `article_text` value out of the submitted fields.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let article_text = fields
            .into_iter()
            .find(|(name, _)| name == ARTICLE_FIELD)
            .map(|(_, value)| value);
        Self { article_text }
    }

    /// The submitted text, or `None` when the field is missing or empty.
    pub fn article(self) -> Option<String> {
        self.article_text.filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    pub prediction: String,
}

impl PredictionResponse {
    pub fn new(prediction: impl Into<String>) -> Self {
        Self {
            prediction: prediction.into(),
        }
    }

    pub fn no_article() -> Self {
        Self::new(NO_ARTICLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_article_is_treated_as_missing() {
        let form = PredictForm {
            article_text: Some(String::new()),
        };
        assert_eq!(form.article(), None);
        assert_eq!(PredictForm::default().article(), None);
    }

    #[test]
    fn first_article_field_wins() {
        let fields = vec![
            ("title".to_string(), "x".to_string()),
            (ARTICLE_FIELD.to_string(), "first".to_string()),
            (ARTICLE_FIELD.to_string(), "second".to_string()),
        ];
        assert_eq!(PredictForm::from_fields(fields).article(), Some("first".to_string()));

        let fields = vec![
            (ARTICLE_FIELD.to_string(), String::new()),
            (ARTICLE_FIELD.to_string(), "second".to_string()),
        ];
        assert_eq!(PredictForm::from_fields(fields).article(), None);
    }

    #[test]
    fn response_serializes_single_field() {
        let body = serde_json::to_value(PredictionResponse::new("1:sport")).unwrap();
        assert_eq!(body, serde_json::json!({ "prediction": "1:sport" }));
    }

    #[test]
    fn categories_render_in_model_order() {
        let names: Vec<_> = Category::ALL.iter().map(Category::to_string).collect();
        assert_eq!(names, ["religion", "sport", "economy"]);
    }
}
