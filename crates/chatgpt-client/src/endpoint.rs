//! Static description of every remote operation.
//!
//! Each [`Endpoint`] is a verb, a path template with `{name}` placeholders and
//! the kind of body it takes. The table is closed: every operation the service
//! exposes has exactly one constant here, and [`Endpoint::ALL`] lists them.

use std::fmt;

use chatgpt_core::{Error, Result};
use reqwest::{Method, Url};

/// HTTP verb of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Get => write!(f, "GET"),
            Verb::Post => write!(f, "POST"),
            Verb::Delete => write!(f, "DELETE"),
        }
    }
}

/// How the request body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    None,
    Json,
    Multipart,
}

/// One remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    name: &'static str,
    verb: Verb,
    template: &'static str,
    body: BodyKind,
    deprecated: bool,
}

impl Endpoint {
    const fn new(name: &'static str, verb: Verb, template: &'static str, body: BodyKind) -> Self {
        Self {
            name,
            verb,
            template,
            body,
            deprecated: false,
        }
    }

    const fn legacy(
        name: &'static str,
        verb: Verb,
        template: &'static str,
        body: BodyKind,
    ) -> Self {
        Self {
            name,
            verb,
            template,
            body,
            deprecated: true,
        }
    }

    // Models
    pub const LIST_MODELS: Self = Self::new("list_models", Verb::Get, "/v1/models", BodyKind::None);
    pub const GET_MODEL: Self =
        Self::new("get_model", Verb::Get, "/v1/models/{model_id}", BodyKind::None);

    // Generation
    pub const CREATE_COMPLETION: Self =
        Self::new("create_completion", Verb::Post, "/v1/completions", BodyKind::Json);
    pub const CREATE_CHAT_COMPLETION: Self = Self::new(
        "create_chat_completion",
        Verb::Post,
        "/v1/chat/completions",
        BodyKind::Json,
    );
    pub const CREATE_EDIT: Self = Self::new("create_edit", Verb::Post, "/v1/edits", BodyKind::Json);
    pub const CREATE_EMBEDDINGS: Self =
        Self::new("create_embeddings", Verb::Post, "/v1/embeddings", BodyKind::Json);

    // Files
    pub const LIST_FILES: Self = Self::new("list_files", Verb::Get, "/v1/files", BodyKind::None);
    pub const UPLOAD_FILE: Self =
        Self::new("upload_file", Verb::Post, "/v1/files", BodyKind::Multipart);
    pub const DELETE_FILE: Self =
        Self::new("delete_file", Verb::Delete, "/v1/files/{file_id}", BodyKind::None);
    pub const RETRIEVE_FILE: Self =
        Self::new("retrieve_file", Verb::Get, "/v1/files/{file_id}", BodyKind::None);

    // Fine-tunes
    pub const CREATE_FINE_TUNE: Self =
        Self::new("create_fine_tune", Verb::Post, "/v1/fine-tunes", BodyKind::Json);
    pub const CREATE_FINE_TUNE_COMPLETION: Self = Self::new(
        "create_fine_tune_completion",
        Verb::Post,
        "/v1/completions",
        BodyKind::Json,
    );
    pub const LIST_FINE_TUNES: Self =
        Self::new("list_fine_tunes", Verb::Get, "/v1/fine-tunes", BodyKind::None);
    pub const RETRIEVE_FINE_TUNE: Self = Self::new(
        "retrieve_fine_tune",
        Verb::Get,
        "/v1/fine-tunes/{fine_tune_id}",
        BodyKind::None,
    );
    pub const CANCEL_FINE_TUNE: Self = Self::new(
        "cancel_fine_tune",
        Verb::Post,
        "/v1/fine-tunes/{fine_tune_id}/cancel",
        BodyKind::None,
    );
    pub const LIST_FINE_TUNE_EVENTS: Self = Self::new(
        "list_fine_tune_events",
        Verb::Get,
        "/v1/fine-tunes/{fine_tune_id}/events",
        BodyKind::None,
    );
    /// Fine-tuned models are deleted through the models resource.
    pub const DELETE_FINE_TUNE: Self = Self::new(
        "delete_fine_tune",
        Verb::Delete,
        "/v1/models/{fine_tune_id}",
        BodyKind::None,
    );

    // Images
    pub const CREATE_IMAGE: Self =
        Self::new("create_image", Verb::Post, "/v1/images/generations", BodyKind::Json);
    pub const CREATE_IMAGE_EDIT: Self =
        Self::new("create_image_edit", Verb::Post, "/v1/images/edits", BodyKind::Multipart);
    pub const CREATE_IMAGE_VARIATION: Self = Self::new(
        "create_image_variation",
        Verb::Post,
        "/v1/images/variations",
        BodyKind::Multipart,
    );

    // Moderation
    pub const CREATE_MODERATION: Self =
        Self::new("create_moderation", Verb::Post, "/v1/moderations", BodyKind::Json);

    // Engine-scoped legacy paths
    pub const CREATE_ENGINE_COMPLETION: Self = Self::legacy(
        "create_engine_completion",
        Verb::Post,
        "/v1/engines/{engine_id}/completions",
        BodyKind::Json,
    );
    pub const CREATE_ENGINE_EDIT: Self = Self::legacy(
        "create_engine_edit",
        Verb::Post,
        "/v1/engines/{engine_id}/edits",
        BodyKind::Json,
    );
    pub const CREATE_ENGINE_EMBEDDINGS: Self = Self::legacy(
        "create_engine_embeddings",
        Verb::Post,
        "/v1/engines/{engine_id}/embeddings",
        BodyKind::Json,
    );
    pub const LIST_ENGINES: Self =
        Self::legacy("list_engines", Verb::Get, "/v1/engines", BodyKind::None);
    pub const GET_ENGINE: Self =
        Self::legacy("get_engine", Verb::Get, "/v1/engines/{engine_id}", BodyKind::None);

    /// Every endpoint, in table order.
    pub const ALL: &'static [Endpoint] = &[
        Self::LIST_MODELS,
        Self::GET_MODEL,
        Self::CREATE_COMPLETION,
        Self::CREATE_CHAT_COMPLETION,
        Self::CREATE_EDIT,
        Self::CREATE_EMBEDDINGS,
        Self::LIST_FILES,
        Self::UPLOAD_FILE,
        Self::DELETE_FILE,
        Self::RETRIEVE_FILE,
        Self::CREATE_FINE_TUNE,
        Self::CREATE_FINE_TUNE_COMPLETION,
        Self::LIST_FINE_TUNES,
        Self::RETRIEVE_FINE_TUNE,
        Self::CANCEL_FINE_TUNE,
        Self::LIST_FINE_TUNE_EVENTS,
        Self::DELETE_FINE_TUNE,
        Self::CREATE_IMAGE,
        Self::CREATE_IMAGE_EDIT,
        Self::CREATE_IMAGE_VARIATION,
        Self::CREATE_MODERATION,
        Self::CREATE_ENGINE_COMPLETION,
        Self::CREATE_ENGINE_EDIT,
        Self::CREATE_ENGINE_EMBEDDINGS,
        Self::LIST_ENGINES,
        Self::GET_ENGINE,
    ];

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn method(&self) -> Method {
        self.verb.method()
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn body(&self) -> BodyKind {
        self.body
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Placeholder names in template order.
    pub fn path_params(&self) -> Vec<&'static str> {
        self.template.split('/').filter_map(placeholder).collect()
    }

    /// Resolve the template against `base`, filling placeholders in order.
    ///
    /// Parameters are pushed as single percent-encoded path segments, so a
    /// value containing `/` cannot escape its segment.
    pub fn url(&self, base: &Url, params: &[&str]) -> Result<Url> {
        let expected = self.path_params().len();
        if params.len() != expected {
            return Err(Error::InvalidInput(format!(
                "{} takes {} path parameter(s), got {}",
                self.name,
                expected,
                params.len()
            )));
        }
        if let Some(position) = params.iter().position(|p| p.is_empty()) {
            return Err(Error::InvalidInput(format!(
                "{}: path parameter {{{}}} is empty",
                self.name,
                self.path_params()[position]
            )));
        }

        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::InvalidInput(format!("base URL cannot carry a path: {}", base))
            })?;
            segments.pop_if_empty();

            let mut values = params.iter();
            for segment in self.template.trim_start_matches('/').split('/') {
                match placeholder(segment) {
                    Some(_) => {
                        if let Some(value) = values.next() {
                            segments.push(value);
                        }
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.template)
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
