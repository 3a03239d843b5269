//! Model trait implementation for the Claude (Anthropic) provider.

use super::{Claude, Request};
use anyhow::Result;
use compact_str::CompactString;
use reqwest::Method;
use wcore::{FinishReason, FunctionCall, Model, Response, ToolCall, Usage};

/// Raw Anthropic non-streaming response.
#[derive(serde::Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<CompactString>,
    usage: AnthropicUsage,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: CompactString,
        name: CompactString,
        input: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

#[derive(serde::Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

impl Model for Claude {
    async fn send(&self, req: &wcore::Request) -> Result<Response> {
        let body = self.body(req);
        tracing::trace!("request: {}", serde_json::to_string(&body)?);
        let response = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::trace!("response: {text}");
        if !status.is_success() {
            anyhow::bail!("anthropic returned {status}: {text}");
        }

        parse(&text)
    }

    fn active_model(&self) -> CompactString {
        self.model.clone()
    }
}

impl Claude {
    /// The wire body for `req`, on this provider's model unless the request
    /// names one.
    fn body(&self, req: &wcore::Request) -> Request {
        let mut body = Request::from(req);
        if body.model.is_empty() {
            body.model = self.active_model().into();
        }
        body
    }
}

/// Parse an Anthropic response body into the unified `Response`.
fn parse(text: &str) -> Result<Response> {
    let raw: AnthropicResponse = serde_json::from_str(text)?;
    Ok(to_response(raw))
}

/// Convert an Anthropic response to the unified `Response` format.
fn to_response(raw: AnthropicResponse) -> Response {
    let mut content = String::new();
    let mut tool_calls = Vec::new();

    for block in raw.content {
        match block {
            ContentBlock::Text { text } => {
                if !content.is_empty() {
                    content.push('\n');
                }
                content.push_str(&text);
            }
            ContentBlock::ToolUse { id, name, input } => {
                tool_calls.push(ToolCall {
                    id,
                    function: FunctionCall {
                        name,
                        arguments: serde_json::to_string(&input).unwrap_or_default(),
                    },
                });
            }
            ContentBlock::Other => {}
        }
    }

    let finish_reason = raw.stop_reason.as_deref().map(|r| match r {
        "max_tokens" => FinishReason::Length,
        "tool_use" => FinishReason::ToolCalls,
        _ => FinishReason::Stop,
    });

    Response {
        content,
        tool_calls,
        finish_reason,
        usage: Usage {
            prompt_tokens: raw.usage.input_tokens,
            completion_tokens: raw.usage.output_tokens,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_response() {
        let response = parse(
            r#"{
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "model": "claude-3-5-sonnet-latest",
                "content": [{"type": "text", "text": "Sunny day!"}],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 12, "output_tokens": 4}
            }"#,
        )
        .unwrap();
        assert_eq!(response.content(), Some("Sunny day!"));
        assert!(response.tool_calls().is_empty());
        assert_eq!(response.reason(), Some(&FinishReason::Stop));
        assert_eq!(response.usage.prompt_tokens, 12);
    }

    #[test]
    fn tool_use_response() {
        let response = parse(
            r#"{
                "content": [
                    {"type": "text", "text": "Checking the weather first."},
                    {"type": "tool_use", "id": "toolu_1", "name": "weather-lookup",
                     "input": {"location": "Sinchon"}}
                ],
                "stop_reason": "tool_use",
                "usage": {"input_tokens": 20, "output_tokens": 9}
            }"#,
        )
        .unwrap();
        assert_eq!(response.content(), Some("Checking the weather first."));
        assert_eq!(response.reason(), Some(&FinishReason::ToolCalls));
        let call = &response.tool_calls()[0];
        assert_eq!(call.id, "toolu_1");
        assert_eq!(call.function.name, "weather-lookup");
        assert_eq!(call.function.arguments, r#"{"location":"Sinchon"}"#);
    }

    #[test]
    fn unknown_blocks_are_skipped() {
        let response = parse(
            r#"{
                "content": [{"type": "thinking", "thinking": "hmm"}, {"type": "text", "text": "ok"}],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 1, "output_tokens": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(response.content(), Some("ok"));
    }

    #[test]
    fn empty_model_falls_back_to_provider() {
        let claude =
            Claude::anthropic(reqwest::Client::new(), "sk-test", "claude-3-5-haiku-latest")
                .unwrap();
        let unnamed = wcore::Request::new("");
        assert_eq!(claude.body(&unnamed).model, "claude-3-5-haiku-latest");

        let named = wcore::Request::new("claude-3-opus-latest");
        assert_eq!(claude.body(&named).model, "claude-3-opus-latest");
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse("{\"error\": {\"type\": \"overloaded_error\"}}").is_err());
    }
}
