//! Sample-question catalog for the SQL agent session.
//!
//! The catalog targets the Northwind sample database; the session shows a
//! random handful as "try one of these" suggestions. Example questions are
//! pre-validated, so selecting one submits directly without going through
//! the input gate.

use rand::seq::SliceRandom;

/// Questions known to work against the Northwind schema.
const NORTHWIND_QUESTIONS: &[&str] = &[
    "What products are available",
    "Which shippers can ship the orders?",
    "How many shipment Speedy Express did?",
    "How many customers did placed an order",
    "For the year 1996 give me subtotals for each order",
    "Show me the Sales by Year",
    "Which employee did largest order",
    "get an alphabetical list of products.",
    "List the discontinued products",
    "calculates sales price for each order after discount is applied",
    "Show top 10 Products by Category",
    "Display Products by Category",
    "Top 10 Customer and Suppliers by City",
    "List of the Products that are above average price",
    "List of the Products that are above average price, also show average price for each product",
    "Number of units in stock by category and supplier continent",
];

/// How many suggestions a session shows at once.
const SAMPLE_SIZE: usize = 5;

/// A fixed catalog of example questions with random sampling.
#[derive(Debug, Clone)]
pub struct ExampleCatalog {
    questions: Vec<String>,
}

impl ExampleCatalog {
    /// The built-in Northwind catalog.
    #[must_use]
    pub fn northwind() -> Self {
        Self {
            questions: NORTHWIND_QUESTIONS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Build a catalog from arbitrary questions; blank entries are dropped.
    #[must_use]
    pub fn new(questions: impl IntoIterator<Item = String>) -> Self {
        Self {
            questions: questions
                .into_iter()
                .filter(|q| !q.trim().is_empty())
                .collect(),
        }
    }

    /// All questions in the catalog.
    #[must_use]
    pub fn all(&self) -> &[String] {
        &self.questions
    }

    /// A random selection of up to [`SAMPLE_SIZE`] questions.
    #[must_use]
    pub fn sample(&self) -> Vec<String> {
        let mut rng = rand::thread_rng();
        self.questions
            .choose_multiple(&mut rng, SAMPLE_SIZE)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn northwind_catalog_is_non_empty() {
        let catalog = ExampleCatalog::northwind();
        assert!(catalog.all().len() >= SAMPLE_SIZE);
    }

    #[test]
    fn sample_returns_five_distinct_catalog_questions() {
        let catalog = ExampleCatalog::northwind();
        let sample = catalog.sample();
        assert_eq!(sample.len(), SAMPLE_SIZE);

        for question in &sample {
            assert!(catalog.all().contains(question));
        }

        let mut deduped = sample.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), SAMPLE_SIZE);
    }

    #[test]
    fn blank_entries_are_dropped() {
        let catalog = ExampleCatalog::new(vec![
            String::new(),
            "   ".to_string(),
            "Show me the Sales by Year".to_string(),
        ]);
        assert_eq!(catalog.all().len(), 1);
    }

    #[test]
    fn sample_of_small_catalog_returns_everything() {
        let catalog = ExampleCatalog::new(vec!["only one".to_string()]);
        assert_eq!(catalog.sample(), vec!["only one".to_string()]);
    }
}
