use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Maximum accepted length for a product name or URL.
const QUERY_MAX_LEN: usize = 2048;
const QUERY_MAX_LEN_VALIDATOR: u64 = QUERY_MAX_LEN as u64;

/// Errors that can occur while processing the add-product form.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The query is empty once surrounding whitespace is removed.
    #[error("enter a product name or URL")]
    EmptyQuery,
}

/// Form payload emitted when submitting the "Track product" form.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddProductForm {
    /// Product name or URL entered by the user.
    #[validate(length(min = 1, max = QUERY_MAX_LEN_VALIDATOR))]
    pub query: String,
}

impl AddProductForm {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Validate the payload and return the trimmed query.
    pub fn into_query(self) -> Result<String, ProductFormError> {
        self.validate()?;

        let query = self.query.trim();
        if query.is_empty() {
            return Err(ProductFormError::EmptyQuery);
        }
        Ok(query.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed() {
        let query = AddProductForm::new("  Sony Headphones \n").into_query();
        assert_eq!(query.ok().as_deref(), Some("Sony Headphones"));
    }

    #[test]
    fn blank_query_is_rejected() {
        assert!(matches!(
            AddProductForm::new("   ").into_query(),
            Err(ProductFormError::EmptyQuery)
        ));
        assert!(matches!(
            AddProductForm::new("").into_query(),
            Err(ProductFormError::Validation(_))
        ));
    }

    #[test]
    fn overly_long_query_is_rejected() {
        let query = "x".repeat(QUERY_MAX_LEN + 1);
        assert!(matches!(
            AddProductForm::new(query).into_query(),
            Err(ProductFormError::Validation(_))
        ));
    }
}
