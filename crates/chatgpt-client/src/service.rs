//! The public client: one blocking method per remote operation.

use std::path::Path;
use std::time::Duration;

use chatgpt_core::{
    ChatCompletionRequest, ChatCompletionResult, CompletionRequest, CompletionResult,
    CreateImageEditRequest, CreateImageRequest, CreateImageVariationRequest, DeleteResult,
    EditRequest, EditResult, EmbeddingRequest, EmbeddingResult, Engine, Error, File,
    FineTuneEvent, FineTuneRequest, FineTuneResult, ImageResult, Model, ModerationRequest,
    ModerationResult, Result,
};
use reqwest::Url;

use crate::config::ClientConfig;
use crate::dispatch::{Call, Dispatcher};
use crate::endpoint::Endpoint;
use crate::multipart;
use crate::transport::Transport;

/// Blocking OpenAI API client.
///
/// Cheap to clone; clones share the connection pool. Safe to use from several
/// threads at once, each call being an independent request.
#[derive(Debug, Clone)]
pub struct OpenAiService {
    dispatcher: Dispatcher,
    base_url: Url,
}

impl OpenAiService {
    /// Client for the public API with the given token and read timeout.
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::from_config(ClientConfig::new(token).with_timeout(timeout))
    }

    /// Client from an explicit configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("invalid base_url {}: {}", config.base_url, e)))?;
        let transport = Transport::new(&config)?;

        Ok(Self {
            dispatcher: Dispatcher::new(transport),
            base_url,
        })
    }

    /// Client configured from `CHATGPT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn call(&self, endpoint: Endpoint, params: &[&str]) -> Result<Call> {
        Call::new(endpoint, &self.base_url, params)
    }

    // =========================================================================
    // MODELS
    // =========================================================================

    /// Models available to the account, in server order.
    pub fn list_models(&self) -> Result<Vec<Model>> {
        self.dispatcher.execute_list(self.call(Endpoint::LIST_MODELS, &[])?)
    }

    pub fn get_model(&self, model_id: &str) -> Result<Model> {
        self.dispatcher.execute(self.call(Endpoint::GET_MODEL, &[model_id])?)
    }

    // =========================================================================
    // GENERATION
    // =========================================================================

    pub fn create_completion(&self, request: &CompletionRequest) -> Result<CompletionResult> {
        self.dispatcher.execute(self.call(Endpoint::CREATE_COMPLETION, &[])?.json(request)?)
    }

    pub fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResult> {
        self.dispatcher.execute(self.call(Endpoint::CREATE_CHAT_COMPLETION, &[])?.json(request)?)
    }

    pub fn create_edit(&self, request: &EditRequest) -> Result<EditResult> {
        self.dispatcher.execute(self.call(Endpoint::CREATE_EDIT, &[])?.json(request)?)
    }

    pub fn create_embeddings(&self, request: &EmbeddingRequest) -> Result<EmbeddingResult> {
        self.dispatcher.execute(self.call(Endpoint::CREATE_EMBEDDINGS, &[])?.json(request)?)
    }

    // =========================================================================
    // FILES
    // =========================================================================

    pub fn list_files(&self) -> Result<Vec<File>> {
        self.dispatcher.execute_list(self.call(Endpoint::LIST_FILES, &[])?)
    }

    /// Upload a local file. The path as given becomes the remote file name.
    ///
    /// The file is read before anything is sent; a missing file yields
    /// [`Error::Io`] and no request.
    pub fn upload_file(&self, purpose: &str, path: impl AsRef<Path>) -> Result<File> {
        let body = multipart::upload_file(purpose, path)?;
        self.dispatcher.execute(self.call(Endpoint::UPLOAD_FILE, &[])?.multipart(body)?)
    }

    pub fn delete_file(&self, file_id: &str) -> Result<DeleteResult> {
        self.dispatcher.execute(self.call(Endpoint::DELETE_FILE, &[file_id])?)
    }

    pub fn retrieve_file(&self, file_id: &str) -> Result<File> {
        self.dispatcher.execute(self.call(Endpoint::RETRIEVE_FILE, &[file_id])?)
    }

    // =========================================================================
    // FINE-TUNES
    // =========================================================================

    pub fn create_fine_tune(&self, request: &FineTuneRequest) -> Result<FineTuneResult> {
        self.dispatcher.execute(self.call(Endpoint::CREATE_FINE_TUNE, &[])?.json(request)?)
    }

    /// Completion against a fine-tuned model; `request.model` names it.
    pub fn create_fine_tune_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult> {
        self.dispatcher.execute(
            self.call(Endpoint::CREATE_FINE_TUNE_COMPLETION, &[])?
                .json(request)?,
        )
    }

    pub fn list_fine_tunes(&self) -> Result<Vec<FineTuneResult>> {
        self.dispatcher.execute_list(self.call(Endpoint::LIST_FINE_TUNES, &[])?)
    }

    pub fn retrieve_fine_tune(&self, fine_tune_id: &str) -> Result<FineTuneResult> {
        self.dispatcher.execute(self.call(Endpoint::RETRIEVE_FINE_TUNE, &[fine_tune_id])?)
    }

    pub fn cancel_fine_tune(&self, fine_tune_id: &str) -> Result<FineTuneResult> {
        self.dispatcher.execute(self.call(Endpoint::CANCEL_FINE_TUNE, &[fine_tune_id])?)
    }

    pub fn list_fine_tune_events(&self, fine_tune_id: &str) -> Result<Vec<FineTuneEvent>> {
        self.dispatcher.execute_list(self.call(Endpoint::LIST_FINE_TUNE_EVENTS, &[fine_tune_id])?)
    }

    /// Delete the model produced by a fine-tune.
    pub fn delete_fine_tune(&self, fine_tune_id: &str) -> Result<DeleteResult> {
        self.dispatcher.execute(self.call(Endpoint::DELETE_FINE_TUNE, &[fine_tune_id])?)
    }

    // =========================================================================
    // IMAGES
    // =========================================================================

    pub fn create_image(&self, request: &CreateImageRequest) -> Result<ImageResult> {
        self.dispatcher.execute(self.call(Endpoint::CREATE_IMAGE, &[])?.json(request)?)
    }

    /// Edit an image. `mask` is optional; without it no mask part is sent.
    pub fn create_image_edit(
        &self,
        request: &CreateImageEditRequest,
        image: impl AsRef<Path>,
        mask: Option<&Path>,
    ) -> Result<ImageResult> {
        let body = multipart::image_edit(request, image, mask)?;
        self.dispatcher.execute(self.call(Endpoint::CREATE_IMAGE_EDIT, &[])?.multipart(body)?)
    }

    pub fn create_image_variation(
        &self,
        request: &CreateImageVariationRequest,
        image: impl AsRef<Path>,
    ) -> Result<ImageResult> {
        let body = multipart::image_variation(request, image)?;
        self.dispatcher.execute(self.call(Endpoint::CREATE_IMAGE_VARIATION, &[])?.multipart(body)?)
    }

    // =========================================================================
    // MODERATION
    // =========================================================================

    pub fn create_moderation(&self, request: &ModerationRequest) -> Result<ModerationResult> {
        self.dispatcher.execute(self.call(Endpoint::CREATE_MODERATION, &[])?.json(request)?)
    }

    // =========================================================================
    // ENGINE-SCOPED (LEGACY)
    // =========================================================================

    #[deprecated(note = "engine-scoped endpoints are retired; use create_completion")]
    pub fn create_completion_for_engine(
        &self,
        engine_id: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResult> {
        self.dispatcher.execute(
            self.call(Endpoint::CREATE_ENGINE_COMPLETION, &[engine_id])?
                .json(request)?,
        )
    }

    #[deprecated(note = "engine-scoped endpoints are retired; use create_edit")]
    pub fn create_edit_for_engine(
        &self,
        engine_id: &str,
        request: &EditRequest,
    ) -> Result<EditResult> {
        self.dispatcher.execute(
            self.call(Endpoint::CREATE_ENGINE_EDIT, &[engine_id])?
                .json(request)?,
        )
    }

    #[deprecated(note = "engine-scoped endpoints are retired; use create_embeddings")]
    pub fn create_embeddings_for_engine(
        &self,
        engine_id: &str,
        request: &EmbeddingRequest,
    ) -> Result<EmbeddingResult> {
        self.dispatcher.execute(
            self.call(Endpoint::CREATE_ENGINE_EMBEDDINGS, &[engine_id])?
                .json(request)?,
        )
    }

    #[deprecated(note = "engines are replaced by models; use list_models")]
    pub fn list_engines(&self) -> Result<Vec<Engine>> {
        self.dispatcher.execute_list(self.call(Endpoint::LIST_ENGINES, &[])?)
    }

    #[deprecated(note = "engines are replaced by models; use get_model")]
    pub fn get_engine(&self, engine_id: &str) -> Result<Engine> {
        self.dispatcher.execute(self.call(Endpoint::GET_ENGINE, &[engine_id])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_creation() {
        let service = OpenAiService::new("sk-test", Duration::from_secs(5)).unwrap();
        assert_eq!(service.base_url().as_str(), "https://api.openai.com/");
    }

    #[test]
    fn test_service_rejects_invalid_config() {
        let err = OpenAiService::new("", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_upload_file_never_dispatches() {
        // Unroutable base URL: reaching the network would yield Error::Http instead.
        let config = ClientConfig::new("sk-test").with_base_url("http://0.0.0.0:9");
        let service = OpenAiService::from_config(config).unwrap();
        let err = service
            .upload_file("fine-tune", "/no/such/training.jsonl")
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
