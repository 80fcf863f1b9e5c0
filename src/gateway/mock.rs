use async_trait::async_trait;
use mockall::mock;

use super::{GatewayResult, ProductAnalyzer};
use crate::domain::product::AnalyzedProduct;

mock! {
    pub ProductAnalyzer {}

    #[async_trait]
    impl ProductAnalyzer for ProductAnalyzer {
        async fn analyze(&self, query: &str) -> GatewayResult<AnalyzedProduct>;
    }
}
