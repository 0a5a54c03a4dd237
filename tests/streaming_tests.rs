mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;

use azure_foundry::error::FoundryError;
use azure_foundry::models::ModelDefinition;
use azure_foundry::provider::wire::ChatCompletionChunk;
use azure_foundry::types::*;

use common::*;

fn chat_request(text: &str) -> GenerateRequest {
    GenerateRequest::new(vec![Message::user(text)])
}

#[tokio::test]
async fn split_tool_arguments_are_reassembled() {
    let api = MockApi::new();
    api.queue_chunks(vec![
        Ok(tool_chunk(0, Some("call_kyiv1"), Some("search"), r#"{"query""#)),
        Ok(tool_chunk(0, None, None, ":")),
        Ok(tool_chunk(0, None, None, r#""kyiv"}"#)),
        Ok(finish_chunk("tool_calls")),
    ]);
    let model = api
        .plugin()
        .define_model(ModelDefinition::chat("gpt-4o", true), None);

    let mut sink = |_chunk: ModelResponseChunk| Ok::<_, FoundryError>(());
    let resp = model
        .generate(&chat_request("weather in Kyiv?"), Some(&mut sink))
        .await
        .unwrap();

    assert_eq!(resp.finish_reason, FinishReason::Stop);
    assert_eq!(
        resp.message.content,
        vec![Part::ToolRequest(ToolRequest {
            name: "search".into(),
            input: json!({"query": "kyiv"}),
            reference: Some("call_kyiv1".into()),
        })]
    );
}

#[tokio::test]
async fn text_deltas_reach_the_sink_in_order() {
    let api = MockApi::new();
    api.queue_chunks(vec![
        Ok(text_chunk("The ")),
        Ok(text_chunk("")),
        Ok(text_chunk("answer")),
        Ok(finish_chunk("stop")),
        Ok(usage_chunk(9, 2)),
    ]);
    let model = api
        .plugin()
        .define_model(ModelDefinition::chat("gpt-4o-mini", true), None);

    let mut seen = Vec::new();
    let mut sink = |chunk: ModelResponseChunk| {
        seen.push(chunk.text());
        Ok::<_, FoundryError>(())
    };
    let resp = model
        .generate(&chat_request("?"), Some(&mut sink))
        .await
        .unwrap();

    assert_eq!(seen, vec!["The ".to_string(), "answer".to_string()]);
    assert_eq!(resp.message.content, vec![Part::text("The answer")]);
    assert_eq!(
        resp.usage,
        Usage {
            input_tokens: 9,
            output_tokens: 2,
            total_tokens: 11
        }
    );

    let sent = api.chat_requests.lock().unwrap();
    assert!(sent[0].stream);
    assert_eq!(sent[0].model, "gpt-4o-mini");
}

#[tokio::test]
async fn malformed_streamed_arguments_fail_the_call() {
    let api = MockApi::new();
    api.queue_chunks(vec![
        Ok(text_chunk("calling")),
        Ok(tool_chunk(0, Some("call_1"), Some("search"), "not valid json")),
        Ok(finish_chunk("tool_calls")),
    ]);
    let model = api
        .plugin()
        .define_model(ModelDefinition::chat("gpt-4o", true), None);

    let mut sink = |_chunk: ModelResponseChunk| Ok::<_, FoundryError>(());
    let err = model
        .generate(&chat_request("go"), Some(&mut sink))
        .await
        .unwrap_err();

    assert!(
        matches!(&err, FoundryError::ToolArguments { tool_name, .. } if tool_name == "search"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn null_streamed_arguments_keep_the_call() {
    let api = MockApi::new();
    api.queue_chunks(vec![
        Ok(tool_chunk(0, Some("call_ping"), Some("ping"), "null")),
        Ok(finish_chunk("tool_calls")),
    ]);
    let model = api
        .plugin()
        .define_model(ModelDefinition::chat("gpt-4o", true), None);

    let mut sink = |_chunk: ModelResponseChunk| Ok::<_, FoundryError>(());
    let resp = model
        .generate(&chat_request("ping"), Some(&mut sink))
        .await
        .unwrap();

    assert_eq!(
        resp.message.content,
        vec![Part::ToolRequest(ToolRequest {
            name: "ping".into(),
            input: serde_json::Value::Null,
            reference: Some("call_ping".into()),
        })]
    );
}

#[tokio::test]
async fn sink_failure_aborts_the_stream() {
    let pulled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pulled);
    let chunks: Vec<Result<ChatCompletionChunk, FoundryError>> = vec![
        Ok(text_chunk("one")),
        Ok(text_chunk("two")),
        Ok(text_chunk("three")),
    ];
    let stream = futures::stream::iter(chunks).inspect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let api = MockApi::new();
    api.queue_stream(Box::pin(stream));
    let model = api
        .plugin()
        .define_model(ModelDefinition::chat("gpt-4o", true), None);

    let mut calls = 0;
    let mut sink = |_chunk: ModelResponseChunk| {
        calls += 1;
        Err::<(), _>(FoundryError::InvalidState("client went away".into()))
    };
    let err = model
        .generate(&chat_request("hi"), Some(&mut sink))
        .await
        .unwrap_err();

    assert_eq!(calls, 1);
    assert_eq!(pulled.load(Ordering::SeqCst), 1);
    assert!(matches!(err, FoundryError::Callback(_)));
    assert_eq!(
        err.to_string(),
        "streaming callback error: Invalid state: client went away"
    );
}

#[tokio::test]
async fn transport_error_surfaces_as_stream_error() {
    let api = MockApi::new();
    api.queue_chunks(vec![
        Ok(text_chunk("partial")),
        Err(FoundryError::Timeout(500)),
        Ok(text_chunk("never seen")),
    ]);
    let model = api
        .plugin()
        .define_model(ModelDefinition::chat("gpt-4o", true), None);

    let mut sink = |_chunk: ModelResponseChunk| Ok::<_, FoundryError>(());
    let err = model
        .generate(&chat_request("hi"), Some(&mut sink))
        .await
        .unwrap_err();

    assert!(matches!(err, FoundryError::Stream(_)));
    assert!(matches!(err.root_cause(), FoundryError::Timeout(500)));
}

#[tokio::test]
async fn failure_to_open_stream_is_a_stream_error() {
    let api = MockApi::failing(503, "overloaded");
    let model = api
        .plugin()
        .define_model(ModelDefinition::chat("gpt-4o", true), None);

    let mut sink = |_chunk: ModelResponseChunk| Ok::<_, FoundryError>(());
    let err = model
        .generate(&chat_request("hi"), Some(&mut sink))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "stream error: API error (status 503): overloaded"
    );
}

#[tokio::test]
async fn multiple_tool_calls_finish_in_slot_order() {
    let api = MockApi::new();
    api.queue_chunks(vec![
        Ok(tool_chunk(1, Some("call_b"), Some("time"), "{}")),
        Ok(tool_chunk(0, Some("call_a"), Some("weather"), r#"{"city":"Lviv"}"#)),
        Ok(tool_chunk(2, Some("call_c"), None, "{}")),
    ]);
    let model = api
        .plugin()
        .define_model(ModelDefinition::chat("gpt-4o", true), None);

    let mut sink = |_chunk: ModelResponseChunk| Ok::<_, FoundryError>(());
    let resp = model
        .generate(&chat_request("both please"), Some(&mut sink))
        .await
        .unwrap();

    let refs: Vec<_> = resp
        .message
        .tool_requests()
        .into_iter()
        .map(|r| r.reference.clone().unwrap_or_default())
        .collect();
    assert_eq!(refs, vec!["call_a".to_string(), "call_b".to_string()]);
}
