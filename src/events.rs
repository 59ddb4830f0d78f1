/// UI Message Contract
///
/// This module defines the message contract between the reasoning
/// coalescer and the chat frontend. Messages flow in one direction:
/// processor → UI, via the emit callback supplied at construction.
use serde::{Deserialize, Serialize};

/// Name of the synthetic tool used to surface titled reasoning blocks
pub const THINKING_TOOL_NAME: &str = "thinking";

/// A message emitted towards the chat UI.
///
/// Serializes with a `type` tag so the frontend can dispatch on it:
/// `"reasoning"`, `"tool-call"`, `"tool-call-result"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    /// A chunk of untitled reasoning text, streamed live
    Reasoning { message: String },
    /// Start of a titled reasoning block, rendered as a tool invocation
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        title: String,
    },
    /// Completed body of a titled reasoning block, paired by id
    ToolCallResult {
        tool_call_id: String,
        tool_name: String,
        result: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasoning_tag() {
        let message = UiMessage::Reasoning {
            message: "thinking out loud".to_string(),
        };
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["type"], "reasoning");
        assert_eq!(value["message"], "thinking out loud");
    }

    #[test]
    fn test_tool_call_tags() {
        let call = UiMessage::ToolCall {
            tool_call_id: "id-1".to_string(),
            tool_name: THINKING_TOOL_NAME.to_string(),
            title: "Plan".to_string(),
        };
        let result = UiMessage::ToolCallResult {
            tool_call_id: "id-1".to_string(),
            tool_name: THINKING_TOOL_NAME.to_string(),
            result: "Think step".to_string(),
        };

        assert_eq!(serde_json::to_value(&call).unwrap()["type"], "tool-call");
        assert_eq!(
            serde_json::to_value(&result).unwrap()["type"],
            "tool-call-result"
        );
    }

    #[test]
    fn test_roundtrip() {
        let message = UiMessage::ToolCall {
            tool_call_id: "id-2".to_string(),
            tool_name: THINKING_TOOL_NAME.to_string(),
            title: "Review".to_string(),
        };
        let json = serde_json::to_string(&message).unwrap();
        let back: UiMessage = serde_json::from_str(&json).unwrap();

        assert_eq!(back, message);
    }
}
