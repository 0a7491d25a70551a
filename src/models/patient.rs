use serde::{Deserialize, Serialize};

/// A value the front-end sends either as a JSON string or as a number
/// (ages, weights, temperatures).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    /// Renders the value as text: `45` → "45", `36.6` → "36.6".
    pub fn to_text(&self) -> String {
        match self {
            TextOrNumber::Text(s) => s.clone(),
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for TextOrNumber {
    fn from(s: &str) -> Self {
        TextOrNumber::Text(s.to_string())
    }
}

impl From<u32> for TextOrNumber {
    fn from(n: u32) -> Self {
        TextOrNumber::Number(n.into())
    }
}

/// Patient object embedded in a prescription by the registration screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NestedPatient {
    pub id: Option<String>,
    pub patient_id: Option<String>,
    pub name: Option<String>,
    pub patient_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<TextOrNumber>,
    pub phone_number: Option<String>,
}

impl NestedPatient {
    pub fn age_text(&self) -> Option<String> {
        self.age.as_ref().map(TextOrNumber::to_text)
    }
}
