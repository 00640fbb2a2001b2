//! Utilities for the admin integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;

use kafka_admin::admin::{
    AdminClient, AdminEvent, AdminRequest, ConfigEntry, ConfigResourceResult, ConfigSource,
    OwnedResourceSpecifier, TopicResult,
};
use kafka_admin::client::{AdminTransport, CompletionSender};
use kafka_admin::config::FromClientConfig;
use kafka_admin::error::{ErrorCode, KafkaError, KafkaResult};
use kafka_admin::ClientConfig;

pub fn configure_logging_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn create_config() -> ClientConfig {
    let mut config = ClientConfig::new();
    config.set("bootstrap.servers", "localhost:9092");
    config
}

pub fn create_admin_client() -> AdminClient<MockBroker> {
    configure_logging_for_tests();
    create_config()
        .create()
        .expect("admin client creation failed")
}

pub fn admin_client_with(mock: MockBroker) -> AdminClient<MockBroker> {
    configure_logging_for_tests();
    AdminClient::new(mock)
}

/// Which completion a [`MockBroker`] delivers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MockBehavior {
    /// Per-item outcomes, honoring the configured per-target errors.
    Normal,
    /// Whole-batch failure: every item carries the given code.
    FailBatch(ErrorCode),
    /// A completion carrying no batch at all.
    BareError(ErrorCode),
    /// Drop the completion sender without completing.
    DropCompletion,
    /// Deliver a completion of the wrong kind.
    WrongEvent,
}

/// An in-process stand-in for the broker-facing transport.
///
/// Outcomes are computed from the configured per-target error table and
/// delivered from a separate thread, so every completion crosses a thread
/// boundary the way it would with a real broker.
#[derive(Clone)]
pub struct MockBroker {
    behavior: MockBehavior,
    target_errors: HashMap<String, (ErrorCode, String)>,
    requests: Arc<Mutex<Vec<AdminRequest>>>,
}

impl MockBroker {
    pub fn new() -> MockBroker {
        MockBroker {
            behavior: MockBehavior::Normal,
            target_errors: HashMap::new(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Makes the named target (topic or resource) fail with the given code.
    pub fn with_target_error(mut self, target: &str, code: ErrorCode, detail: &str) -> MockBroker {
        self.target_errors
            .insert(target.to_string(), (code, detail.to_string()));
        self
    }

    pub fn with_behavior(mut self, behavior: MockBehavior) -> MockBroker {
        self.behavior = behavior;
        self
    }

    /// The requests dispatched so far, in dispatch order.
    pub fn requests(&self) -> Vec<AdminRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn topic_outcome(&self, name: &str) -> TopicResult {
        match self.target_errors.get(name) {
            Some((code, detail)) => TopicResult::new(name, *code, Some(detail)),
            None => TopicResult::ok(name),
        }
    }

    fn config_outcome(
        &self,
        specifier: &OwnedResourceSpecifier,
        describe: bool,
    ) -> ConfigResourceResult {
        match self.target_errors.get(&specifier.name()) {
            Some((code, detail)) => {
                ConfigResourceResult::err(specifier.clone(), *code, Some(detail))
            }
            None if describe => ConfigResourceResult::ok(specifier.clone(), default_entries()),
            None => ConfigResourceResult::ok(specifier.clone(), Vec::new()),
        }
    }

    fn event_for(&self, request: &AdminRequest) -> AdminEvent {
        if let MockBehavior::BareError(code) = self.behavior {
            return AdminEvent::Error(code);
        }
        if self.behavior == MockBehavior::WrongEvent {
            return match request {
                AdminRequest::DeleteTopics { .. } => AdminEvent::CreateTopics(Vec::new()),
                _ => AdminEvent::DeleteTopics(Vec::new()),
            };
        }
        match request {
            AdminRequest::CreateTopics { topics, .. } => {
                let results = match self.behavior {
                    MockBehavior::FailBatch(code) => TopicResult::batch_error(
                        topics.iter().map(|t| t.name.as_str()),
                        code,
                        "batch failed before reaching the broker",
                    ),
                    _ => topics.iter().map(|t| self.topic_outcome(&t.name)).collect(),
                };
                AdminEvent::CreateTopics(results)
            }
            AdminRequest::DeleteTopics { topics, .. } => {
                let results = match self.behavior {
                    MockBehavior::FailBatch(code) => TopicResult::batch_error(
                        topics.iter().map(String::as_str),
                        code,
                        "batch failed before reaching the broker",
                    ),
                    _ => topics.iter().map(|t| self.topic_outcome(t)).collect(),
                };
                AdminEvent::DeleteTopics(results)
            }
            AdminRequest::CreatePartitions { partitions, .. } => {
                let results = match self.behavior {
                    MockBehavior::FailBatch(code) => TopicResult::batch_error(
                        partitions.iter().map(|p| p.topic_name.as_str()),
                        code,
                        "batch failed before reaching the broker",
                    ),
                    _ => partitions
                        .iter()
                        .map(|p| self.topic_outcome(&p.topic_name))
                        .collect(),
                };
                AdminEvent::CreatePartitions(results)
            }
            AdminRequest::AlterConfigs { configs, .. } => {
                let results = match self.behavior {
                    MockBehavior::FailBatch(code) => ConfigResourceResult::batch_error(
                        configs.iter().map(|c| c.specifier.clone()),
                        code,
                        "batch failed before reaching the broker",
                    ),
                    _ => configs
                        .iter()
                        .map(|c| self.config_outcome(&c.specifier, false))
                        .collect(),
                };
                AdminEvent::AlterConfigs(results)
            }
            AdminRequest::DescribeConfigs { resources, .. } => {
                let results = match self.behavior {
                    MockBehavior::FailBatch(code) => ConfigResourceResult::batch_error(
                        resources.iter().cloned(),
                        code,
                        "batch failed before reaching the broker",
                    ),
                    _ => resources
                        .iter()
                        .map(|r| self.config_outcome(r, true))
                        .collect(),
                };
                AdminEvent::DescribeConfigs(results)
            }
        }
    }
}

impl Default for MockBroker {
    fn default() -> MockBroker {
        MockBroker::new()
    }
}

impl AdminTransport for MockBroker {
    fn dispatch(&self, request: AdminRequest, completion: CompletionSender) {
        self.requests.lock().unwrap().push(request.clone());
        if self.behavior == MockBehavior::DropCompletion {
            // Dropping the sender without completing cancels the caller.
            return;
        }
        let event = self.event_for(&request);
        thread::spawn(move || completion.complete(event));
    }
}

impl FromClientConfig for MockBroker {
    fn from_config(config: &ClientConfig) -> KafkaResult<MockBroker> {
        if config.get("bootstrap.servers").is_none() {
            return Err(KafkaError::ClientConfig(
                "required property not set".to_string(),
                "bootstrap.servers".to_string(),
                String::new(),
            ));
        }
        Ok(MockBroker::new())
    }
}

/// The canned configuration a [`MockBroker`] describes for any resource.
pub fn default_entries() -> Vec<ConfigEntry> {
    vec![
        ConfigEntry {
            name: "cleanup.policy".to_string(),
            value: Some("delete".to_string()),
            source: ConfigSource::Default,
            is_read_only: false,
            is_default: true,
            is_sensitive: false,
        },
        ConfigEntry {
            name: "retention.ms".to_string(),
            value: Some("604800000".to_string()),
            source: ConfigSource::Default,
            is_read_only: false,
            is_default: true,
            is_sensitive: false,
        },
    ]
}
