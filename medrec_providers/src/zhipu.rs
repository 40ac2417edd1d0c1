use async_trait::async_trait;
use medrec_core::{ChatMessage, LLMProvider, LLMResponse, Usage, util::schema_instruction};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

/// OpenAI-compatible chat-completions client, pointed at Zhipu by default.
///
/// Each call is a single attempt; failures are returned to the caller.
pub struct ZhipuProvider {
    client: Client,
    api_key: String,
    base_url: String,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
}

impl ZhipuProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating ZhipuProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: None,
            temperature: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn with_generation(mut self, max_tokens: usize, temperature: f32) -> Self {
        self.max_tokens = Some(max_tokens);
        self.temperature = Some(temperature);
        self
    }

    fn build_request(
        &self,
        messages: &[ChatMessage],
        model: &str,
        json_mode: bool,
    ) -> serde_json::Value {
        let mut request = json!({
            "model": model,
            "messages": messages,
        });
        if let Some(max_tokens) = self.max_tokens {
            request["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            request["temperature"] = json!(temperature);
        }
        if json_mode {
            request["response_format"] = json!({ "type": "json_object" });
        }
        request
    }

    async fn send(&self, request: &serde_json::Value) -> anyhow::Result<LLMResponse> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        parse_response(&response)
    }
}

fn parse_response(response: &serde_json::Value) -> anyhow::Result<LLMResponse> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
        .to_string();

    let usage = response["usage"].as_object().map(|u| {
        let count = |key: &str| {
            u.get(key)
                .and_then(serde_json::Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0)
        };
        Usage {
            prompt_tokens: count("prompt_tokens"),
            completion_tokens: count("completion_tokens"),
            total_tokens: count("total_tokens"),
        }
    });

    if let Some(usage) = &usage {
        debug!(
            "Token usage: prompt={}, completion={}, total={}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    Ok(LLMResponse { content, usage })
}

#[async_trait]
impl LLMProvider for ZhipuProvider {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
        let request = self.build_request(messages, model, false);

        info!("Sending request to Zhipu API: model={}", model);
        let response = self.send(&request).await?;
        info!("Received response from Zhipu API");
        Ok(response)
    }

    async fn chat_structured(
        &self,
        messages: &[ChatMessage],
        model: &str,
        schema: &serde_json::Value,
    ) -> anyhow::Result<LLMResponse> {
        let mut messages = messages.to_vec();
        messages.push(ChatMessage::system(schema_instruction(schema)));
        let request = self.build_request(&messages, model, true);

        info!("Sending structured request to Zhipu API: model={}", model);
        let response = self.send(&request).await?;
        info!("Received structured response from Zhipu API");
        Ok(response)
    }

    fn get_default_model(&self) -> &'static str {
        "glm-4-flash"
    }
}
