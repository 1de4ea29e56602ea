use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::QuoteError;

pub async fn make_request(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<Value, QuoteError> {
    let url = Url::parse_with_params(&format!("{}/{}", base_url, endpoint), params)
        .map_err(|e| QuoteError::Network(format!("Invalid endpoint {}: {}", base_url, e)))?;

    let res = client
        .get(url)
        .send()
        .await
        .map_err(|e| QuoteError::Network(e.to_string()))?;

    if res.status() != StatusCode::OK {
        return Err(QuoteError::Server(res.status()));
    }

    let text = res
        .text()
        .await
        .map_err(|e| QuoteError::Network(e.to_string()))?;

    serde_json::from_str::<Value>(&text).map_err(|e| QuoteError::Decode(e.to_string()))
}

pub fn parse_response_object<T>(data: Value, error_msg: &str) -> Result<T, QuoteError>
where
    T: DeserializeOwned,
{
    match data {
        Value::Object(obj) => serde_json::from_value(Value::Object(obj))
            .map_err(|e| QuoteError::Decode(format!("{}: {}", error_msg, e))),
        _ => Err(QuoteError::Decode(String::from(
            "Unexpected API response format: not an object",
        ))),
    }
}
