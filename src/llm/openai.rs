use crate::llm::client::{LLMClient, LLMResponse};
use crate::types::{AppError, ChatMessage, MessageRole, Result, ToolCall, ToolDefinition};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessage,
        ChatCompletionTool, ChatCompletionToolChoiceOption, ChatCompletionToolType,
        CreateChatCompletionRequestArgs, FunctionCall,
    },
};
use async_trait::async_trait;

pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model,
        }
    }

    fn to_request_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
        match message.role {
            MessageRole::System => Ok(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage::from(message.content.clone()),
            )),
            MessageRole::User => Ok(ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage::from(message.content.clone()),
            )),
            MessageRole::Assistant => {
                let mut builder = ChatCompletionRequestAssistantMessageArgs::default();
                builder.content(message.content.clone());
                if !message.tool_calls.is_empty() {
                    let calls: Vec<ChatCompletionMessageToolCall> = message
                        .tool_calls
                        .iter()
                        .map(|call| ChatCompletionMessageToolCall {
                            id: call.id.clone(),
                            r#type: ChatCompletionToolType::Function,
                            function: FunctionCall {
                                name: call.name.clone(),
                                arguments: call.arguments.to_string(),
                            },
                        })
                        .collect();
                    builder.tool_calls(calls);
                }
                Ok(ChatCompletionRequestMessage::Assistant(
                    builder
                        .build()
                        .map_err(|e| AppError::Llm(format!("Failed to build message: {}", e)))?,
                ))
            }
            MessageRole::Tool => Ok(ChatCompletionRequestMessage::Tool(
                ChatCompletionRequestToolMessageArgs::default()
                    .content(message.content.clone())
                    .tool_call_id(message.tool_call_id.clone().unwrap_or_default())
                    .build()
                    .map_err(|e| AppError::Llm(format!("Failed to build message: {}", e)))?,
            )),
        }
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        let chat_messages: Vec<ChatCompletionRequestMessage> = messages
            .iter()
            .map(Self::to_request_message)
            .collect::<Result<_>>()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.model)
            .messages(chat_messages)
            .temperature(0.7);

        if !tools.is_empty() {
            let openai_tools: Vec<ChatCompletionTool> = tools
                .iter()
                .map(|tool| ChatCompletionTool {
                    r#type: ChatCompletionToolType::Function,
                    function: async_openai::types::FunctionObject {
                        name: tool.name.clone(),
                        description: Some(tool.description.clone()),
                        parameters: Some(tool.parameters.clone()),
                        strict: None,
                    },
                })
                .collect();
            builder
                .tools(openai_tools)
                .tool_choice(ChatCompletionToolChoiceOption::Auto);
        }

        let request = builder
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::Llm(format!("OpenAI API error: {}", e)))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| AppError::Llm("No response from OpenAI".to_string()))?;

        let content = choice.message.content.clone().unwrap_or_default();
        let finish_reason = choice
            .finish_reason
            .as_ref()
            .map(|r| format!("{:?}", r).to_lowercase())
            .unwrap_or_else(|| "unknown".to_string());

        let tool_calls = if let Some(calls) = &choice.message.tool_calls {
            calls
                .iter()
                .map(|call| ToolCall {
                    id: call.id.clone(),
                    name: call.function.name.clone(),
                    // Malformed argument JSON from the model degrades to {}
                    arguments: serde_json::from_str(&call.function.arguments)
                        .unwrap_or(serde_json::json!({})),
                })
                .collect()
        } else {
            vec![]
        };

        Ok(LLMResponse {
            content,
            tool_calls,
            finish_reason,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
