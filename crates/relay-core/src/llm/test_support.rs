//! Scripted clients and builders shared by the retry and fallback tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::RelayResult;
use crate::llm::factory::BackendBuilder;
use crate::llm::messages::{GenerationRequest, GenerationResult};
use crate::llm::normalizer::ErrorNormalizer;
use crate::llm::provider_types::LlmProvider;
use crate::llm::providers::{BackendClient, BackendConfig};

/// What a scripted client does on one call
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    /// Return this text
    Succeed(&'static str),
    /// Fail with this HTTP status
    Fail(u16),
    /// Never complete
    Hang,
}

/// Client that replays a script, then repeats `then` forever
#[derive(Debug)]
pub(crate) struct ScriptedClient {
    provider: String,
    model: String,
    steps: Mutex<VecDeque<Step>>,
    then: Step,
    calls: Arc<AtomicU32>,
}

impl ScriptedClient {
    pub(crate) fn new(provider: &str, model: &str, steps: Vec<Step>, then: Step) -> Self {
        Self {
            provider: provider.to_string(),
            model: model.to_string(),
            steps: Mutex::new(steps.into()),
            then,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    fn with_counter(mut self, calls: Arc<AtomicU32>) -> Self {
        self.calls = calls;
        self
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendClient for ScriptedClient {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, _request: &GenerationRequest) -> RelayResult<GenerationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.then.clone());

        match step {
            Step::Succeed(text) => Ok(GenerationResult::new(text, &self.provider, &self.model)),
            Step::Fail(status) => Err(ErrorNormalizer::new(&self.provider, &self.model)
                .from_status(status, "scripted failure")),
            Step::Hang => std::future::pending().await,
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    steps: Vec<Step>,
    then: Option<Step>,
}

/// Builder handing out scripted clients per provider and recording every construction
#[derive(Debug, Default)]
pub(crate) struct ScriptedBackends {
    scripts: HashMap<LlmProvider, Script>,
    built: Mutex<Vec<String>>,
    calls: Mutex<HashMap<LlmProvider, Arc<AtomicU32>>>,
}

impl ScriptedBackends {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Script the clients built for `provider`; unscripted providers always succeed
    pub(crate) fn script(mut self, provider: LlmProvider, steps: Vec<Step>, then: Step) -> Self {
        self.scripts.insert(
            provider,
            Script {
                steps,
                then: Some(then),
            },
        );
        self
    }

    /// Labels (`provider/model`) of every client built, in order
    pub(crate) fn built(&self) -> Vec<String> {
        self.built.lock().unwrap().clone()
    }

    /// Total backend calls made against `provider`
    pub(crate) fn calls(&self, provider: LlmProvider) -> u32 {
        self.calls
            .lock()
            .unwrap()
            .get(&provider)
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }
}

impl BackendBuilder for ScriptedBackends {
    type Client = ScriptedClient;

    fn build(&self, config: BackendConfig) -> RelayResult<ScriptedClient> {
        let provider = config.provider.name();
        self.built
            .lock()
            .unwrap()
            .push(format!("{}/{}", provider, config.model));

        let counter = self
            .calls
            .lock()
            .unwrap()
            .entry(config.provider)
            .or_default()
            .clone();

        let (steps, then) = match self.scripts.get(&config.provider) {
            Some(script) => (
                script.steps.clone(),
                script.then.clone().unwrap_or(Step::Succeed("ok")),
            ),
            None => (Vec::new(), Step::Succeed("ok")),
        };

        Ok(ScriptedClient::new(provider, &config.model, steps, then).with_counter(counter))
    }
}
