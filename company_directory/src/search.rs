//! Case-insensitive whole-word search over company names and descriptions.

use regex::{Regex, RegexBuilder};

use crate::error::SearchError;
use crate::record::Company;

/// Hard cap on the number of companies a search returns.
pub const MAX_SEARCH_RESULTS: usize = 50;

/// A compiled whole-word query.
///
/// The query text is matched literally. An empty query compiles to a pair of
/// adjacent word boundaries, which matches any text containing a word character.
#[derive(Debug, Clone)]
pub struct WholeWordQuery {
    pattern: Regex,
}

impl WholeWordQuery {
    pub fn new(query: &str) -> Result<Self, SearchError> {
        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(query)))
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Whether the company's name or description contains the query as a whole word.
    ///
    /// `index` is only used to report which record was missing a field.
    pub fn matches(&self, index: usize, company: &Company) -> Result<bool, SearchError> {
        let name = company.name().ok_or(SearchError::MissingField {
            field: "company_name",
            index,
        })?;
        let description = company.description().ok_or(SearchError::MissingField {
            field: "description",
            index,
        })?;

        Ok(self.is_match(name) || self.is_match(description))
    }
}

/// Return up to [`MAX_SEARCH_RESULTS`] matching companies in collection order.
///
/// Scanning stops once the cap is reached, so records past that point are
/// never inspected.
pub fn search(companies: &[Company], query: &str) -> Result<Vec<Company>, SearchError> {
    let query = WholeWordQuery::new(query)?;
    let mut results = Vec::new();

    for (index, company) in companies.iter().enumerate() {
        if results.len() == MAX_SEARCH_RESULTS {
            break;
        }
        if query.matches(index, company)? {
            results.push(company.clone());
        }
    }

    Ok(results)
}
