use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

use crate::domain::product::{AnalyzedProduct, DealStatus, PricePoint};
use crate::gateway::{GatewayError, GatewayResult, ProductAnalyzer};
use crate::models::config::GeminiConfig;

const TEMPERATURE: f32 = 0.4;
const DEFAULT_CURRENCY: &str = "$";

/// Analyzer calling the Gemini `generateContent` endpoint with a JSON
/// response schema.
pub struct GeminiAnalyzer {
    config: GeminiConfig,
    client: Client,
}

impl GeminiAnalyzer {
    pub fn new(config: GeminiConfig) -> GatewayResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    async fn generate(&self, request: &GenerateContentRequest) -> GatewayResult<String> {
        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ProductAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, query: &str) -> GatewayResult<AnalyzedProduct> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GatewayError::EmptyQuery);
        }

        log::info!("Analyzing product query with {}", self.config.model);
        let request = GenerateContentRequest::new(build_prompt(query, Utc::now().date_naive()));
        let body = self.generate(&request).await?;
        parse_generate_response(&body)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

impl GenerateContentRequest {
    fn new(prompt: String) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: product_schema(),
                temperature: TEMPERATURE,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Product object as the model returns it; optional fields get defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedProduct {
    title: String,
    #[serde(default)]
    category: String,
    current_price: f64,
    original_price: Option<f64>,
    currency: Option<String>,
    image: String,
    #[serde(default)]
    description: String,
    history: Vec<PricePoint>,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    review_count: u64,
    deal_status: DealStatus,
    advice: String,
}

impl From<GeneratedProduct> for AnalyzedProduct {
    fn from(value: GeneratedProduct) -> Self {
        Self {
            title: value.title,
            category: value.category,
            current_price: value.current_price,
            original_price: value.original_price.unwrap_or(value.current_price),
            currency: value
                .currency
                .filter(|currency| !currency.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            image: value.image,
            description: value.description,
            history: value.history,
            rating: value.rating,
            review_count: value.review_count,
            deal_status: value.deal_status,
            advice: value.advice,
        }
    }
}

fn build_prompt(query: &str, today: NaiveDate) -> String {
    format!(
        "You simulate an online-store price tracker.\n\
         Input from the user (a product page URL or a product name): \"{query}\".\n\
         - For a URL, describe the product it points to and give its main image URL.\n\
         - For a name, describe a realistic matching product and a representative image URL.\n\
         - Give a realistic current price and list price.\n\
         - Give one price per day for the 30 days ending on {today} (format YYYY-MM-DD), \
         oldest first, fluctuating realistically.\n\
         - Judge the current price against that history as a \"Great\", \"Good\", \"Fair\" or \"Bad\" deal.\n\
         - Give concrete advice on buying now or waiting.",
        today = today.format("%Y-%m-%d"),
    )
}

fn product_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "Short product title, at most 50 characters." },
            "category": { "type": "STRING", "description": "Product category, e.g. Electronics." },
            "currentPrice": { "type": "NUMBER", "description": "Current price." },
            "originalPrice": { "type": "NUMBER", "description": "List price." },
            "currency": { "type": "STRING", "description": "Currency symbol, e.g. $." },
            "image": { "type": "STRING", "description": "URL of the main product image." },
            "description": { "type": "STRING", "description": "Two-sentence description." },
            "rating": { "type": "NUMBER", "description": "Rating out of 5." },
            "reviewCount": { "type": "INTEGER", "description": "Number of reviews." },
            "dealStatus": { "type": "STRING", "enum": ["Great", "Good", "Fair", "Bad"] },
            "advice": { "type": "STRING", "description": "Whether to buy now or wait." },
            "history": {
                "type": "ARRAY",
                "description": "Daily prices for the last 30 days, oldest first.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "date": { "type": "STRING", "description": "Date as YYYY-MM-DD." },
                        "price": { "type": "NUMBER", "description": "Price on that date." }
                    },
                    "required": ["date", "price"]
                }
            }
        },
        "required": ["title", "currentPrice", "history", "dealStatus", "advice", "image"]
    })
}

/// Extract and validate the product from a `generateContent` response body.
fn parse_generate_response(body: &str) -> GatewayResult<AnalyzedProduct> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::Malformed(e.to_string()))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }

    parse_product(&text)
}

fn parse_product(text: &str) -> GatewayResult<AnalyzedProduct> {
    let generated: GeneratedProduct =
        serde_json::from_str(text).map_err(|e| GatewayError::Malformed(e.to_string()))?;
    let product = AnalyzedProduct::from(generated);
    product.validate()?;
    Ok(product)
}
