//! Scripted `TextGenerator` used by unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationConfig, LlmError, TextGenerator};

/// What the double should do on each call.
#[derive(Debug, Clone)]
pub enum Script {
    Reply(String),
    Fail(FailureKind),
}

#[derive(Debug, Clone, Copy)]
pub enum FailureKind {
    MissingCredential,
    Auth,
    RateLimited,
    EmptyResponse,
    Network,
    Api,
    Decode,
}

impl FailureKind {
    fn to_error(self) -> LlmError {
        match self {
            FailureKind::MissingCredential => LlmError::MissingCredential,
            FailureKind::Auth => LlmError::Auth {
                status: 401,
                message: "invalid key".to_string(),
            },
            FailureKind::RateLimited => LlmError::RateLimited("quota exceeded".to_string()),
            FailureKind::EmptyResponse => LlmError::EmptyResponse,
            FailureKind::Network => LlmError::Network(transport_error()),
            FailureKind::Api => LlmError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            },
            FailureKind::Decode => LlmError::Decode("expected value at line 1".to_string()),
        }
    }
}

/// A genuine `reqwest::Error`; an unparsable URL fails while building the request.
fn transport_error() -> reqwest::Error {
    match reqwest::Client::new().get("not a url").build() {
        Err(e) => e,
        Ok(_) => panic!("request with an invalid URL was built"),
    }
}

/// Returns scripted results in order; the last script repeats once the queue is drained.
/// Every prompt it receives is recorded for assertions.
pub struct ScriptedGenerator {
    scripts: Mutex<Vec<Script>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(vec![Script::Reply(text.into())])
    }

    pub fn failing(kind: FailureKind) -> Self {
        Self::new(vec![Script::Fail(kind)])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, _config: &GenerationConfig) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let script = {
            let mut scripts = self.scripts.lock().unwrap();
            if scripts.len() > 1 {
                scripts.remove(0)
            } else {
                scripts
                    .first()
                    .cloned()
                    .unwrap_or(Script::Fail(FailureKind::EmptyResponse))
            }
        };
        match script {
            Script::Reply(text) => Ok(text),
            Script::Fail(kind) => Err(kind.to_error()),
        }
    }

    fn model(&self) -> &str {
        "scripted-test-model"
    }

    fn default_config(&self) -> GenerationConfig {
        GenerationConfig {
            max_output_tokens: 1024,
            temperature: 0.7,
        }
    }

    fn is_configured(&self) -> bool {
        true
    }
}
