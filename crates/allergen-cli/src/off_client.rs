use std::time::Duration;

use allergen_core::{LookupError, Product, ProductQuery, ProductSource};
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Blocking Open Food Facts client. One request per lookup, no retries.
pub struct OpenFoodFactsClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, LookupError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LookupError::Transport(Box::new(e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, url: &str) -> Result<String, LookupError> {
        debug!(url, "fetching product");
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| LookupError::Transport(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        response
            .text()
            .map_err(|e| LookupError::Transport(Box::new(e)))
    }
}

impl ProductSource for OpenFoodFactsClient {
    fn fetch(&self, query: &ProductQuery) -> Result<Option<Product>, LookupError> {
        let product = match query {
            ProductQuery::Barcode(code) => {
                Product::from_barcode_response(&self.get(&barcode_url(&self.base_url, code))?)?
            }
            ProductQuery::Name(name) => {
                Product::from_search_response(&self.get(&search_url(&self.base_url, name))?)?
            }
        };

        if let Some(ref p) = product {
            if !p.has_ingredients() {
                warn!(query = query.as_str(), code = %p.code, "product has no ingredient text");
            }
        }
        Ok(product)
    }
}

pub fn barcode_url(base_url: &str, code: &str) -> String {
    format!("{base_url}/api/v0/product/{code}.json")
}

pub fn search_url(base_url: &str, name: &str) -> String {
    format!(
        "{base_url}/cgi/search.pl?search_terms={}&search_simple=1&json=1&page_size=1",
        urlencoding::encode(name)
    )
}
