use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticTest {
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

/// Anything that can price a lab test by name.
pub trait PriceLookup {
    fn price_of(&self, test_name: &str) -> Option<f64>;
}

/// The lab's list of orderable tests with their prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestCatalog {
    pub tests: Vec<DiagnosticTest>,
}

impl TestCatalog {
    pub fn new(tests: Vec<DiagnosticTest>) -> Self {
        Self { tests }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticTest> {
        self.tests.iter()
    }
}

impl PriceLookup for TestCatalog {
    /// First test with an exactly matching name.
    fn price_of(&self, test_name: &str) -> Option<f64> {
        self.tests
            .iter()
            .find(|t| t.name == test_name)
            .map(|t| t.price)
    }
}

impl PriceLookup for HashMap<String, f64> {
    fn price_of(&self, test_name: &str) -> Option<f64> {
        self.get(test_name).copied()
    }
}
