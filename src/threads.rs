//! Create threads that assistants can interact with.

use crate::{client::OpenAiClient, ApiResponseOrError};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A conversation thread as the service last reported it. The service owns
/// the state; this value is a disconnected snapshot, valid until the next
/// fetch.
#[derive(Debug, Deserialize, Clone)]
pub struct Thread {
    pub id: String,
    pub object: String,
    pub created_at: u32,
    /// A set of resources that are made available to the assistant's tools in this thread. The resources are specific to the type of tool. For example, the file_search tool requires a list of vector store IDs.
    pub tool_resources: Option<ToolResources>,
    /// Set of 16 key-value pairs that can be attached to an object. This can be useful for storing additional information about the object in a structured format. Keys can be a maximum of 64 characters long and values can be a maximum of 512 characters long.
    pub metadata: Option<HashMap<String, Value>>,
}

/// Acknowledgment returned by [`OpenAiClient::delete_thread`].
#[derive(Debug, Deserialize, Clone)]
pub struct ThreadDeletionStatus {
    pub id: String,
    pub object: String,
    pub deleted: bool,
}

#[derive(Serialize, Builder, Debug, Clone, Default)]
#[builder(pattern = "owned")]
#[builder(setter(strip_option, into), default)]
pub struct CreateThreadRequest {
    /// A list of messages to start the thread with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ThreadMessage>>,
    /// A set of resources that are made available to the assistant's tools in this thread. The resources are specific to the type of tool. For example, the file_search tool requires a list of vector store IDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<ToolResources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl CreateThreadRequest {
    pub fn builder() -> CreateThreadRequestBuilder {
        CreateThreadRequestBuilder::create_empty()
    }
}

/// Replaces a thread's metadata wholesale. The `metadata` field is always
/// serialized, empty or not; sending an empty map is how metadata gets
/// cleared server-side.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ModifyThreadRequest {
    pub metadata: HashMap<String, Value>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ThreadMessage {
    pub role: ThreadMessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl ThreadMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ThreadMessageRole::User,
            content: content.into(),
            file_ids: None,
            metadata: None,
        }
    }
}

/// The entity authoring a seed message. Only `user` is accepted by the
/// create-thread endpoint today.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThreadMessageRole {
    User,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ToolResources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_search: Option<FileSearchResources>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FileSearchResources {
    /// The IDs of vector stores already attached to this thread. There can be a maximum of 1 vector store attached to the thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_store_ids: Option<Vec<String>>,
    /// A helper to create a vector store with file IDs and attach it to this thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_stores: Option<Vec<VectorStoreSpec>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct VectorStoreSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl OpenAiClient {
    /// Creates a new thread. Unset request fields are omitted from the
    /// payload entirely.
    pub async fn create_thread(&self, request: CreateThreadRequest) -> ApiResponseOrError<Thread> {
        self.post("threads", &request).await
    }

    /// Retrieves a thread.
    pub async fn retrieve_thread(&self, thread_id: &str) -> ApiResponseOrError<Thread> {
        self.get(&format!("threads/{thread_id}")).await
    }

    /// Modifies a thread, replacing its metadata with the supplied map.
    pub async fn modify_thread(
        &self,
        thread_id: &str,
        request: ModifyThreadRequest,
    ) -> ApiResponseOrError<Thread> {
        self.post(&format!("threads/{thread_id}"), &request).await
    }

    /// Deletes a thread.
    pub async fn delete_thread(
        &self,
        thread_id: &str,
    ) -> ApiResponseOrError<ThreadDeletionStatus> {
        self.delete(&format!("threads/{thread_id}")).await
    }
}
