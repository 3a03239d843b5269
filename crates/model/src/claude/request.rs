//! Request body for the Anthropic Messages API.

use serde::Serialize;
use serde_json::{Value, json};
use wcore::{Message, Role, Tool};

/// The request body for the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: usize,
    /// System prompt (top-level, not in messages array).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// The messages array (Anthropic content block format).
    pub messages: Vec<Value>,
    /// Tools the model may call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    /// Temperature.
    pub temperature: f32,
}

impl From<&wcore::Request> for Request {
    fn from(req: &wcore::Request) -> Self {
        let mut system = (!req.system.is_empty()).then(|| req.system.clone());
        let mut messages: Vec<Value> = Vec::with_capacity(req.messages.len());

        for msg in &req.messages {
            match msg.role {
                Role::System => {
                    system = Some(msg.content.clone());
                }
                Role::User => {
                    messages.push(json!({
                        "role": "user",
                        "content": msg.content,
                    }));
                }
                Role::Assistant => messages.push(assistant(msg)),
                Role::Tool => {
                    let block = json!({
                        "type": "tool_result",
                        "tool_use_id": msg.tool_call_id,
                        "content": msg.content,
                    });
                    // Results for one assistant turn share a single user message.
                    if let Some(blocks) = messages
                        .last_mut()
                        .filter(|last| is_tool_results(last))
                        .and_then(|last| last["content"].as_array_mut())
                    {
                        blocks.push(block);
                    } else {
                        messages.push(json!({
                            "role": "user",
                            "content": [block],
                        }));
                    }
                }
            }
        }

        let tools = (!req.tools.is_empty()).then(|| req.tools.iter().map(tool).collect());

        Self {
            model: req.model.to_string(),
            max_tokens: req.max_tokens,
            system,
            messages,
            tools,
            temperature: req.temperature,
        }
    }
}

fn assistant(msg: &Message) -> Value {
    let mut content = Vec::new();
    if !msg.content.is_empty() {
        content.push(json!({
            "type": "text",
            "text": msg.content,
        }));
    }
    for tc in &msg.tool_calls {
        let input: Value = serde_json::from_str(&tc.function.arguments).unwrap_or(json!({}));
        content.push(json!({
            "type": "tool_use",
            "id": tc.id,
            "name": tc.function.name,
            "input": input,
        }));
    }
    if content.is_empty() {
        content.push(json!({
            "type": "text",
            "text": "",
        }));
    }
    json!({
        "role": "assistant",
        "content": content,
    })
}

fn is_tool_results(message: &Value) -> bool {
    message["role"] == "user"
        && message["content"]
            .as_array()
            .is_some_and(|blocks| blocks.iter().all(|b| b["type"] == "tool_result"))
}

fn tool(tool: &Tool) -> Value {
    json!({
        "name": tool.name,
        "description": tool.description,
        "input_schema": tool.parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcore::ToolCall;

    fn lookup() -> Tool {
        Tool {
            name: "weather-lookup".into(),
            description: "Current weather".into(),
            parameters: schemars::json_schema!({"type": "object"}),
        }
    }

    #[test]
    fn system_is_top_level() {
        let req = wcore::Request::new("claude-test")
            .with_system("be brief")
            .with_messages(vec![Message::user("hi")]);
        let body = Request::from(&req);
        assert_eq!(body.system.as_deref(), Some("be brief"));
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0]["role"], "user");
        assert_eq!(body.messages[0]["content"], "hi");
        assert!(body.tools.is_none());
    }

    #[test]
    fn tool_round_trip_blocks() {
        let calls = [
            ToolCall::new("toolu_1", "weather-lookup", r#"{"location":"Seoul"}"#),
            ToolCall::new("toolu_2", "restaurant-search", ""),
        ];
        let req = wcore::Request::new("claude-test")
            .with_messages(vec![
                Message::user("plan a picnic"),
                Message::assistant("Let me check.", &calls),
                Message::tool("Sunny", "toolu_1"),
                Message::tool("[]", "toolu_2"),
            ])
            .with_tools(vec![lookup()]);
        let body = Request::from(&req);

        assert_eq!(body.messages.len(), 3);
        let assistant = &body.messages[1]["content"];
        assert_eq!(assistant[0]["type"], "text");
        assert_eq!(assistant[1]["type"], "tool_use");
        assert_eq!(assistant[1]["input"]["location"], "Seoul");
        assert_eq!(assistant[2]["input"], json!({}));

        let results = body.messages[2]["content"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["tool_use_id"], "toolu_1");
        assert_eq!(results[1]["content"], "[]");

        let tools = body.tools.unwrap();
        assert_eq!(tools[0]["name"], "weather-lookup");
        assert_eq!(tools[0]["input_schema"]["type"], "object");
    }
}
