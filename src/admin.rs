//! Admin client.
//!
//! The main object is the [`AdminClient`] struct.
//!
//! An [`AdminClient`] submits batches of cluster-management operations to a
//! broker through an [`AdminTransport`] and delivers, for every submitted
//! batch, exactly one batch of per-target outcomes. Outcomes are positionally
//! aligned with the submitted specs and fail independently: one topic's
//! rejection never withholds or reorders another topic's result.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::task::{Context, Poll};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use futures_channel::oneshot;
use futures_util::future::{self, Either, FutureExt};
use futures_util::ready;

use crate::client::{AdminTransport, CompletionEvent, CompletionSender};
use crate::config::{ClientConfig, FromClientConfig};
use crate::confval::{ConfVal, OptionValue};
use crate::error::{
    ConstructionError, ErrorCode, IsError, KafkaError, KafkaResult, ValidationError,
};
use crate::log::{trace, warn};
use crate::util::Timeout;

/// Sentinel requesting the broker's default partition count or replication
/// factor.
pub const BROKER_DEFAULT: i32 = -1;

//
// ********** ADMIN CLIENT **********
//

/// A client for the Kafka admin API.
///
/// `AdminClient` provides programmatic access to managing a Kafka cluster,
/// notably manipulating topics, partitions, and configuration parameters.
///
/// The actual broker exchange is delegated to the [`AdminTransport`] the
/// client was created with; completions flow back through an internal queue
/// that is drained by a background polling thread.
pub struct AdminClient<T: AdminTransport> {
    transport: T,
    queue: mpsc::Sender<CompletionEvent>,
    should_stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl<T: AdminTransport> AdminClient<T> {
    /// Creates a new admin client on top of the given transport.
    pub fn new(transport: T) -> AdminClient<T> {
        let (queue, completions) = mpsc::channel();
        let should_stop = Arc::new(AtomicBool::new(false));
        let handle = start_poll_thread(completions, should_stop.clone());
        AdminClient {
            transport,
            queue,
            should_stop,
            handle: Some(handle),
        }
    }

    /// Creates new topics according to the provided `NewTopic` specifications.
    ///
    /// Note that while the API supports creating multiple topics at once, it
    /// is not transactional. Creation of some topics may succeed while others
    /// fail. Be sure to check the result of each individual operation.
    pub fn create_topics<'a, I>(
        &self,
        topics: I,
        opts: &AdminOptions,
    ) -> impl Future<Output = KafkaResult<Vec<TopicResult>>>
    where
        I: IntoIterator<Item = &'a NewTopic<'a>>,
    {
        match self.create_topics_inner(topics, opts) {
            Ok(rx) => Either::Left(CreateTopicsFuture { rx }),
            Err(err) => Either::Right(future::err(err)),
        }
    }

    fn create_topics_inner<'a, I>(
        &self,
        topics: I,
        opts: &AdminOptions,
    ) -> KafkaResult<oneshot::Receiver<AdminEvent>>
    where
        I: IntoIterator<Item = &'a NewTopic<'a>>,
    {
        let mut owned = Vec::new();
        for t in topics {
            owned.push(t.to_owned_spec()?);
        }
        if owned.is_empty() {
            return Err(ConstructionError::EmptyBatch.into());
        }
        Ok(self.submit(AdminRequest::CreateTopics {
            topics: owned,
            options: opts.resolved(),
        }))
    }

    /// Deletes the named topics.
    ///
    /// Note that while the API supports deleting multiple topics at once, it is
    /// not transactional. Deletion of some topics may succeed while others
    /// fail. Be sure to check the result of each individual operation.
    pub fn delete_topics(
        &self,
        topic_names: &[&str],
        opts: &AdminOptions,
    ) -> impl Future<Output = KafkaResult<Vec<TopicResult>>> {
        match self.delete_topics_inner(topic_names, opts) {
            Ok(rx) => Either::Left(DeleteTopicsFuture { rx }),
            Err(err) => Either::Right(future::err(err)),
        }
    }

    fn delete_topics_inner(
        &self,
        topic_names: &[&str],
        opts: &AdminOptions,
    ) -> KafkaResult<oneshot::Receiver<AdminEvent>> {
        let mut owned = Vec::with_capacity(topic_names.len());
        for tn in topic_names {
            if tn.is_empty() {
                return Err(ConstructionError::EmptyName("topic name").into());
            }
            owned.push((*tn).to_string());
        }
        if owned.is_empty() {
            return Err(ConstructionError::EmptyBatch.into());
        }
        Ok(self.submit(AdminRequest::DeleteTopics {
            topics: owned,
            options: opts.resolved(),
        }))
    }

    /// Adds additional partitions to existing topics according to the provided
    /// `NewPartitions` specifications.
    ///
    /// Note that while the API supports creating partitions for multiple topics
    /// at once, it is not transactional. Creation of partitions for some topics
    /// may succeed while others fail. Be sure to check the result of each
    /// individual operation.
    pub fn create_partitions<'a, I>(
        &self,
        partitions: I,
        opts: &AdminOptions,
    ) -> impl Future<Output = KafkaResult<Vec<TopicResult>>>
    where
        I: IntoIterator<Item = &'a NewPartitions<'a>>,
    {
        match self.create_partitions_inner(partitions, opts) {
            Ok(rx) => Either::Left(CreatePartitionsFuture { rx }),
            Err(err) => Either::Right(future::err(err)),
        }
    }

    fn create_partitions_inner<'a, I>(
        &self,
        partitions: I,
        opts: &AdminOptions,
    ) -> KafkaResult<oneshot::Receiver<AdminEvent>>
    where
        I: IntoIterator<Item = &'a NewPartitions<'a>>,
    {
        let mut owned = Vec::new();
        for p in partitions {
            owned.push(p.to_owned_spec()?);
        }
        if owned.is_empty() {
            return Err(ConstructionError::EmptyBatch.into());
        }
        Ok(self.submit(AdminRequest::CreatePartitions {
            partitions: owned,
            options: opts.resolved(),
        }))
    }

    /// Retrieves the configuration parameters for the specified resources.
    ///
    /// Note that while the API supports describing multiple configurations at
    /// once, it is not transactional. There is no guarantee that you will see
    /// a consistent snapshot of the configuration across different resources.
    pub fn describe_configs<'a, I>(
        &self,
        configs: I,
        opts: &AdminOptions,
    ) -> impl Future<Output = KafkaResult<Vec<ConfigResourceResult>>>
    where
        I: IntoIterator<Item = &'a ResourceSpecifier<'a>>,
    {
        match self.describe_configs_inner(configs, opts) {
            Ok(rx) => Either::Left(DescribeConfigsFuture { rx }),
            Err(err) => Either::Right(future::err(err)),
        }
    }

    fn describe_configs_inner<'a, I>(
        &self,
        configs: I,
        opts: &AdminOptions,
    ) -> KafkaResult<oneshot::Receiver<AdminEvent>>
    where
        I: IntoIterator<Item = &'a ResourceSpecifier<'a>>,
    {
        let mut owned = Vec::new();
        for c in configs {
            owned.push(c.to_owned_spec()?);
        }
        if owned.is_empty() {
            return Err(ConstructionError::EmptyBatch.into());
        }
        Ok(self.submit(AdminRequest::DescribeConfigs {
            resources: owned,
            options: opts.resolved(),
        }))
    }

    /// Sets configuration parameters for the specified resources.
    ///
    /// Note that while the API supports altering multiple resources at once, it
    /// is not transactional. Alteration of some resources may succeed while
    /// others fail. Be sure to check the result of each individual operation.
    pub fn alter_configs<'a, I>(
        &self,
        configs: I,
        opts: &AdminOptions,
    ) -> impl Future<Output = KafkaResult<Vec<ConfigResourceResult>>>
    where
        I: IntoIterator<Item = &'a AlterConfig<'a>>,
    {
        match self.alter_configs_inner(configs, opts) {
            Ok(rx) => Either::Left(AlterConfigsFuture { rx }),
            Err(err) => Either::Right(future::err(err)),
        }
    }

    fn alter_configs_inner<'a, I>(
        &self,
        configs: I,
        opts: &AdminOptions,
    ) -> KafkaResult<oneshot::Receiver<AdminEvent>>
    where
        I: IntoIterator<Item = &'a AlterConfig<'a>>,
    {
        let mut owned = Vec::new();
        for c in configs {
            owned.push(c.to_owned_spec()?);
        }
        if owned.is_empty() {
            return Err(ConstructionError::EmptyBatch.into());
        }
        Ok(self.submit(AdminRequest::AlterConfigs {
            configs: owned,
            options: opts.resolved(),
        }))
    }

    fn submit(&self, request: AdminRequest) -> oneshot::Receiver<AdminEvent> {
        let (tx, rx) = oneshot::channel();
        self.transport
            .dispatch(request, CompletionSender::new(self.queue.clone(), tx));
        rx
    }

    /// Returns the transport underlying this admin client.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: AdminTransport + FromClientConfig> FromClientConfig for AdminClient<T> {
    fn from_config(config: &ClientConfig) -> KafkaResult<AdminClient<T>> {
        Ok(AdminClient::new(T::from_config(config)?))
    }
}

impl<T: AdminTransport> Drop for AdminClient<T> {
    fn drop(&mut self) {
        trace!("Stopping polling");
        self.should_stop.store(true, Ordering::Relaxed);
        trace!("Waiting for polling thread termination");
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(()) => trace!("Polling stopped"),
                Err(e) => warn!("Failure while terminating thread: {:?}", e),
            }
        }
    }
}

fn start_poll_thread(
    completions: mpsc::Receiver<CompletionEvent>,
    should_stop: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("admin client polling thread".into())
        .spawn(move || {
            trace!("Admin polling thread loop started");
            loop {
                match completions.recv_timeout(Duration::from_millis(100)) {
                    Ok(completion) => {
                        // The caller may have abandoned its future; nothing to
                        // deliver then.
                        let _ = completion.reply.send(completion.event);
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        if should_stop.load(Ordering::Relaxed) {
                            break;
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }
            trace!("Admin polling thread loop terminated");
        })
        .expect("Failed to start polling thread")
}

//
// ********** ADMIN OPTIONS **********
//

/// The kind of an admin operation.
///
/// Fixes which option names an [`AdminOptions`] set resolves.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdminOp {
    /// Any operation; every option name resolves.
    Any,
    /// A CreateTopics operation.
    CreateTopics,
    /// A DeleteTopics operation.
    DeleteTopics,
    /// A CreatePartitions operation.
    CreatePartitions,
    /// An AlterConfigs operation.
    AlterConfigs,
    /// A DescribeConfigs operation.
    DescribeConfigs,
}

impl AdminOp {
    fn accepts(self, name: &str) -> bool {
        match name {
            "timeout" | "broker" => true,
            "operation_timeout" => matches!(
                self,
                AdminOp::Any
                    | AdminOp::CreateTopics
                    | AdminOp::DeleteTopics
                    | AdminOp::CreatePartitions
            ),
            "validate_only" => matches!(
                self,
                AdminOp::Any
                    | AdminOp::CreateTopics
                    | AdminOp::CreatePartitions
                    | AdminOp::AlterConfigs
            ),
            _ => false,
        }
    }
}

/// Options for an admin API request.
///
/// Every option is a named, typed value validated at set time; the set of
/// resolvable names depends on the operation kind the options were created
/// for. Unset options fall back to their defaults when the request is
/// resolved for dispatch.
#[derive(Debug)]
pub struct AdminOptions {
    op: AdminOp,
    request_timeout: ConfVal,
    operation_timeout: ConfVal,
    validate_only: ConfVal,
    broker: ConfVal,
}

impl AdminOptions {
    /// Creates a new `AdminOptions` for the given operation kind.
    pub fn new(op: AdminOp) -> AdminOptions {
        AdminOptions {
            op,
            request_timeout: ConfVal::int32("timeout", -1, 3_600_000, 0),
            operation_timeout: ConfVal::int32("operation_timeout", -1, 3_600_000, 0),
            validate_only: ConfVal::boolean("validate_only", false),
            // Default -1: let the transport pick a suitable broker.
            broker: ConfVal::int32("broker", 0, i32::MAX, -1),
        }
    }

    /// The operation kind these options were created for.
    pub fn op(&self) -> AdminOp {
        self.op
    }

    /// Sets an option by name.
    ///
    /// Fails with [`ValidationError::UnknownOption`] if `name` does not
    /// resolve for this option set's operation kind, and with
    /// [`ValidationError::TypeMismatch`] or [`ValidationError::OutOfRange`]
    /// if the value does not fit the option. Setting an option twice simply
    /// overwrites the prior value.
    pub fn set_by_name<V: Into<OptionValue>>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<(), ValidationError> {
        match self.confval_mut(name) {
            Some(confval) => confval.set(value.into()),
            None => Err(ValidationError::UnknownOption(name.to_string())),
        }
    }

    /// Returns the effective value of the named option: the set value if one
    /// was set, the default otherwise. `None` if the name does not resolve
    /// for this option set's operation kind.
    pub fn get_or_default(&self, name: &str) -> Option<&OptionValue> {
        self.confval(name).map(ConfVal::get_or_default)
    }

    /// Reports whether the named option has been set explicitly. `None` if
    /// the name does not resolve for this option set's operation kind.
    pub fn is_set(&self, name: &str) -> Option<bool> {
        self.confval(name).map(ConfVal::is_set)
    }

    /// Sets the overall request timeout, including broker lookup, request
    /// transmission, operation time on broker, and response.
    ///
    /// Defaults to the transport's own timeout configuration.
    pub fn request_timeout<T: Into<Timeout>>(
        mut self,
        timeout: Option<T>,
    ) -> KafkaResult<AdminOptions> {
        if let Some(timeout) = timeout {
            self.set_by_name("timeout", timeout.into().as_millis())?;
        }
        Ok(self)
    }

    /// Sets the broker's operation timeout, such as the timeout for
    /// CreateTopics to complete the creation of topics on the controller
    /// before returning a result to the application.
    ///
    /// If unset (the default), the API calls will return immediately after
    /// triggering the operation.
    ///
    /// Only the CreateTopics, DeleteTopics, and CreatePartitions API calls
    /// respect this option.
    pub fn operation_timeout<T: Into<Timeout>>(
        mut self,
        timeout: Option<T>,
    ) -> KafkaResult<AdminOptions> {
        if let Some(timeout) = timeout {
            self.set_by_name("operation_timeout", timeout.into().as_millis())?;
        }
        Ok(self)
    }

    /// Tells the broker to only validate the request, without performing the
    /// requested operation.
    ///
    /// Defaults to false.
    pub fn validate_only(mut self, validate_only: bool) -> KafkaResult<AdminOptions> {
        self.set_by_name("validate_only", validate_only)?;
        Ok(self)
    }

    /// Overrides which broker the admin request will be sent to.
    ///
    /// By default, the transport selects a reasonable broker automatically.
    pub fn broker_id<T: Into<Option<i32>>>(mut self, broker_id: T) -> KafkaResult<AdminOptions> {
        if let Some(broker_id) = broker_id.into() {
            self.set_by_name("broker", broker_id)?;
        }
        Ok(self)
    }

    /// Resolves every option to its effective value for dispatch.
    pub fn resolved(&self) -> ResolvedAdminOptions {
        // The tag of each value is fixed at construction, so the fallbacks
        // are unreachable.
        ResolvedAdminOptions {
            request_timeout_ms: self.request_timeout.get_or_default().as_i32().unwrap_or(0),
            operation_timeout_ms: self
                .operation_timeout
                .get_or_default()
                .as_i32()
                .unwrap_or(0),
            validate_only: self
                .validate_only
                .get_or_default()
                .as_bool()
                .unwrap_or(false),
            broker_id: match self.broker.get_or_default().as_i32() {
                Some(id) if id >= 0 => Some(id),
                _ => None,
            },
        }
    }

    fn confval(&self, name: &str) -> Option<&ConfVal> {
        if !self.op.accepts(name) {
            return None;
        }
        match name {
            "timeout" => Some(&self.request_timeout),
            "operation_timeout" => Some(&self.operation_timeout),
            "validate_only" => Some(&self.validate_only),
            "broker" => Some(&self.broker),
            _ => None,
        }
    }

    fn confval_mut(&mut self, name: &str) -> Option<&mut ConfVal> {
        if !self.op.accepts(name) {
            return None;
        }
        match name {
            "timeout" => Some(&mut self.request_timeout),
            "operation_timeout" => Some(&mut self.operation_timeout),
            "validate_only" => Some(&mut self.validate_only),
            "broker" => Some(&mut self.broker),
            _ => None,
        }
    }
}

impl Default for AdminOptions {
    fn default() -> AdminOptions {
        AdminOptions::new(AdminOp::Any)
    }
}

/// The effective option values a request is dispatched with.
///
/// Every option is resolved; an unset option appears here as its default, so
/// transports never observe an "unset" state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedAdminOptions {
    /// Full request timeout in milliseconds; -1 means no limit, 0 means the
    /// transport's default.
    pub request_timeout_ms: i32,
    /// Broker-side operation timeout in milliseconds; 0 means return as soon
    /// as the operation is triggered.
    pub operation_timeout_ms: i32,
    /// Validate the request on the broker without applying it.
    pub validate_only: bool,
    /// Target broker, if the caller pinned one.
    pub broker_id: Option<i32>,
}

//
// ********** REQUEST / COMPLETION BOUNDARY **********
//

/// A validated admin request, ready for a transport.
///
/// All spec data is owned; nothing borrows from the caller once a request has
/// been built.
#[derive(Clone, Debug)]
pub enum AdminRequest {
    /// Create the given topics.
    CreateTopics {
        /// Validated topic specs, in submission order.
        topics: Vec<OwnedNewTopic>,
        /// Effective options.
        options: ResolvedAdminOptions,
    },
    /// Delete the named topics.
    DeleteTopics {
        /// Topic names, in submission order.
        topics: Vec<String>,
        /// Effective options.
        options: ResolvedAdminOptions,
    },
    /// Add partitions to the given topics.
    CreatePartitions {
        /// Validated partition specs, in submission order.
        partitions: Vec<OwnedNewPartitions>,
        /// Effective options.
        options: ResolvedAdminOptions,
    },
    /// Alter configuration of the given resources.
    AlterConfigs {
        /// Validated config alterations, in submission order.
        configs: Vec<OwnedAlterConfig>,
        /// Effective options.
        options: ResolvedAdminOptions,
    },
    /// Describe configuration of the given resources.
    DescribeConfigs {
        /// Resources to describe, in submission order.
        resources: Vec<OwnedResourceSpecifier>,
        /// Effective options.
        options: ResolvedAdminOptions,
    },
}

impl AdminRequest {
    /// The operation kind of this request.
    pub fn op(&self) -> AdminOp {
        match self {
            AdminRequest::CreateTopics { .. } => AdminOp::CreateTopics,
            AdminRequest::DeleteTopics { .. } => AdminOp::DeleteTopics,
            AdminRequest::CreatePartitions { .. } => AdminOp::CreatePartitions,
            AdminRequest::AlterConfigs { .. } => AdminOp::AlterConfigs,
            AdminRequest::DescribeConfigs { .. } => AdminOp::DescribeConfigs,
        }
    }

    /// The effective options this request was submitted with.
    pub fn options(&self) -> &ResolvedAdminOptions {
        match self {
            AdminRequest::CreateTopics { options, .. } => options,
            AdminRequest::DeleteTopics { options, .. } => options,
            AdminRequest::CreatePartitions { options, .. } => options,
            AdminRequest::AlterConfigs { options, .. } => options,
            AdminRequest::DescribeConfigs { options, .. } => options,
        }
    }
}

/// A completion event delivered by a transport.
///
/// Exactly one event is delivered per dispatched request, and its variant
/// must match the submitted operation. `Error` is reserved for completions
/// that carry no per-item batch at all; a transport that can attribute a
/// batch-wide failure to its items should deliver a full batch built with
/// [`TopicResult::batch_error`] or [`ConfigResourceResult::batch_error`]
/// instead, so that no item is silently dropped.
#[derive(Debug)]
pub enum AdminEvent {
    /// Outcome of a CreateTopics request.
    CreateTopics(Vec<TopicResult>),
    /// Outcome of a DeleteTopics request.
    DeleteTopics(Vec<TopicResult>),
    /// Outcome of a CreatePartitions request.
    CreatePartitions(Vec<TopicResult>),
    /// Outcome of an AlterConfigs request.
    AlterConfigs(Vec<ConfigResourceResult>),
    /// Outcome of a DescribeConfigs request.
    DescribeConfigs(Vec<ConfigResourceResult>),
    /// The request failed in a way that produced no per-item outcomes.
    Error(ErrorCode),
}

//
// ********** RESPONSE HANDLING **********
//

/// The per-topic outcome of an individual CreateTopics, DeleteTopics, or
/// CreatePartitions operation.
///
/// The topic name and the optional error detail share a single allocation;
/// the accessors expose the two ranges. Construction never fails.
#[derive(Clone, Eq, PartialEq)]
pub struct TopicResult {
    data: Box<str>,
    topic_len: usize,
    err: ErrorCode,
}

impl TopicResult {
    /// Creates a result from a topic name, an outcome code, and an optional
    /// error detail. An empty detail string is treated as absent.
    pub fn new(topic: &str, err: ErrorCode, errstr: Option<&str>) -> TopicResult {
        let errstr = errstr.filter(|s| !s.is_empty());
        let mut data = String::with_capacity(topic.len() + errstr.map_or(0, str::len));
        data.push_str(topic);
        if let Some(errstr) = errstr {
            data.push_str(errstr);
        }
        TopicResult {
            data: data.into_boxed_str(),
            topic_len: topic.len(),
            err,
        }
    }

    /// Creates a successful result for the given topic.
    pub fn ok(topic: &str) -> TopicResult {
        TopicResult::new(topic, ErrorCode::NoError, None)
    }

    /// Builds a full batch of results carrying the same error, one item per
    /// topic, in input order.
    ///
    /// Used when an entire batch fails before any per-item outcome exists.
    pub fn batch_error<I, S>(topics: I, err: ErrorCode, errstr: &str) -> Vec<TopicResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        topics
            .into_iter()
            .map(|topic| TopicResult::new(topic.as_ref(), err, Some(errstr)))
            .collect()
    }

    /// The name of the topic this result refers to.
    pub fn topic(&self) -> &str {
        &self.data[..self.topic_len]
    }

    /// The outcome code.
    pub fn error(&self) -> ErrorCode {
        self.err
    }

    /// The error detail supplied by the broker or transport, if any.
    pub fn error_string(&self) -> Option<&str> {
        if self.data.len() > self.topic_len {
            Some(&self.data[self.topic_len..])
        } else {
            None
        }
    }

    /// Reports whether this result represents a failure.
    pub fn is_error(&self) -> bool {
        self.err.is_error()
    }
}

impl fmt::Debug for TopicResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TopicResult")
            .field("topic", &self.topic())
            .field("error", &self.err)
            .field("error_string", &self.error_string())
            .finish()
    }
}

fn check_duplicate_keys<'a, I>(name: &str, keys: I) -> Result<(), ConstructionError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(ConstructionError::DuplicateKey {
                name: name.to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

//
// Create topic handling
//

/// Configuration for a CreateTopic operation.
#[derive(Debug)]
pub struct NewTopic<'a> {
    /// The name of the new topic.
    pub name: &'a str,
    /// The initial number of partitions, or [`BROKER_DEFAULT`].
    pub num_partitions: i32,
    /// The initial replication configuration.
    pub replication: TopicReplication<'a>,
    /// The initial configuration parameters for the topic.
    pub config: Vec<(&'a str, &'a str)>,
}

impl<'a> NewTopic<'a> {
    /// Creates a new `NewTopic`.
    pub fn new(
        name: &'a str,
        num_partitions: i32,
        replication: TopicReplication<'a>,
    ) -> NewTopic<'a> {
        NewTopic {
            name,
            num_partitions,
            replication,
            config: Vec::new(),
        }
    }

    /// Sets a new parameter in the initial topic configuration.
    pub fn set(mut self, key: &'a str, value: &'a str) -> NewTopic<'a> {
        self.config.push((key, value));
        self
    }

    fn to_owned_spec(&self) -> KafkaResult<OwnedNewTopic> {
        if self.name.is_empty() {
            return Err(ConstructionError::EmptyName("topic name").into());
        }
        if self.num_partitions != BROKER_DEFAULT && self.num_partitions < 1 {
            return Err(ConstructionError::InvalidCount {
                name: self.name.to_string(),
                what: "partition count",
                count: self.num_partitions as i64,
            }
            .into());
        }
        let (replication_factor, replica_assignment) = match self.replication {
            TopicReplication::Fixed(n) => {
                if n != BROKER_DEFAULT && n < 1 {
                    return Err(ConstructionError::InvalidCount {
                        name: self.name.to_string(),
                        what: "replication factor",
                        count: n as i64,
                    }
                    .into());
                }
                (n, None)
            }
            TopicReplication::Variable(assignment) => {
                // Checkable only when the partition count is known locally;
                // with BROKER_DEFAULT the broker does the checking.
                if self.num_partitions >= 0 && assignment.len() > self.num_partitions as usize {
                    return Err(ConstructionError::AssignmentMismatch {
                        name: self.name.to_string(),
                        assigned: assignment.len(),
                        partitions: self.num_partitions as i64,
                    }
                    .into());
                }
                let owned = assignment.iter().map(|brokers| brokers.to_vec()).collect();
                (BROKER_DEFAULT, Some(owned))
            }
        };
        check_duplicate_keys(self.name, self.config.iter().map(|(k, _)| *k))?;
        Ok(OwnedNewTopic {
            name: self.name.to_string(),
            num_partitions: self.num_partitions,
            replication_factor,
            replica_assignment,
            config: self
                .config
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }
}

/// An assignment of partitions to replicas.
///
/// Each element in the outer slice corresponds to the partition with that
/// index. The inner slice specifies the broker IDs to which replicas of that
/// partition should be assigned.
pub type PartitionAssignment<'a> = &'a [&'a [i32]];

/// Replication configuration for a new topic.
#[derive(Debug)]
pub enum TopicReplication<'a> {
    /// All partitions should use the same fixed replication factor, or
    /// [`BROKER_DEFAULT`].
    Fixed(i32),
    /// Each partition should use the replica assignment from
    /// `PartitionAssignment`.
    Variable(PartitionAssignment<'a>),
}

/// An owned, shape-validated CreateTopics spec, as handed to a transport.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnedNewTopic {
    /// The name of the new topic.
    pub name: String,
    /// The initial number of partitions, or [`BROKER_DEFAULT`].
    pub num_partitions: i32,
    /// The replication factor; [`BROKER_DEFAULT`] when a replica assignment
    /// is given.
    pub replication_factor: i32,
    /// Per-partition replica assignment, if the caller supplied one.
    pub replica_assignment: Option<Vec<Vec<i32>>>,
    /// The initial configuration parameters for the topic.
    pub config: Vec<(String, String)>,
}

struct CreateTopicsFuture {
    rx: oneshot::Receiver<AdminEvent>,
}

impl Future for CreateTopicsFuture {
    type Output = KafkaResult<Vec<TopicResult>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let event = ready!(self.rx.poll_unpin(cx)).map_err(|_| KafkaError::Canceled)?;
        match event {
            AdminEvent::CreateTopics(results) => Poll::Ready(Ok(results)),
            AdminEvent::Error(err) => Poll::Ready(Err(KafkaError::AdminOp(err))),
            _ => Poll::Ready(Err(KafkaError::MismatchedCompletion(AdminOp::CreateTopics))),
        }
    }
}

//
// Delete topic handling
//

struct DeleteTopicsFuture {
    rx: oneshot::Receiver<AdminEvent>,
}

impl Future for DeleteTopicsFuture {
    type Output = KafkaResult<Vec<TopicResult>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let event = ready!(self.rx.poll_unpin(cx)).map_err(|_| KafkaError::Canceled)?;
        match event {
            AdminEvent::DeleteTopics(results) => Poll::Ready(Ok(results)),
            AdminEvent::Error(err) => Poll::Ready(Err(KafkaError::AdminOp(err))),
            _ => Poll::Ready(Err(KafkaError::MismatchedCompletion(AdminOp::DeleteTopics))),
        }
    }
}

//
// Create partitions handling
//

/// Configuration for a CreatePartitions operation.
pub struct NewPartitions<'a> {
    /// The name of the topic to which partitions should be added.
    pub topic_name: &'a str,
    /// The total number of partitions after the operation completes.
    pub new_partition_count: usize,
    /// The replica assignments for the new partitions.
    pub assignment: Option<PartitionAssignment<'a>>,
}

impl<'a> NewPartitions<'a> {
    /// Creates a new `NewPartitions`.
    pub fn new(topic_name: &'a str, new_partition_count: usize) -> NewPartitions<'a> {
        NewPartitions {
            topic_name,
            new_partition_count,
            assignment: None,
        }
    }

    /// Sets the partition replica assignment for the new partitions. Only
    /// assignments for newly created replicas should be included.
    pub fn assign(mut self, assignment: PartitionAssignment<'a>) -> NewPartitions<'a> {
        self.assignment = Some(assignment);
        self
    }

    fn to_owned_spec(&self) -> KafkaResult<OwnedNewPartitions> {
        if self.topic_name.is_empty() {
            return Err(ConstructionError::EmptyName("topic name").into());
        }
        if self.new_partition_count == 0 {
            return Err(ConstructionError::InvalidCount {
                name: self.topic_name.to_string(),
                what: "new partition count",
                count: 0,
            }
            .into());
        }
        if let Some(assignment) = self.assignment {
            // The assignment covers only the partitions being added, so it
            // can never exceed the requested total. Whether it overlaps the
            // topic's existing partitions is for the broker to decide.
            if assignment.len() > self.new_partition_count {
                return Err(ConstructionError::AssignmentMismatch {
                    name: self.topic_name.to_string(),
                    assigned: assignment.len(),
                    partitions: self.new_partition_count as i64,
                }
                .into());
            }
        }
        Ok(OwnedNewPartitions {
            topic_name: self.topic_name.to_string(),
            new_partition_count: self.new_partition_count,
            assignment: self
                .assignment
                .map(|a| a.iter().map(|brokers| brokers.to_vec()).collect()),
        })
    }
}

/// An owned, shape-validated CreatePartitions spec, as handed to a transport.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnedNewPartitions {
    /// The name of the topic to which partitions should be added.
    pub topic_name: String,
    /// The total number of partitions after the operation completes.
    pub new_partition_count: usize,
    /// The replica assignments for the new partitions.
    pub assignment: Option<Vec<Vec<i32>>>,
}

struct CreatePartitionsFuture {
    rx: oneshot::Receiver<AdminEvent>,
}

impl Future for CreatePartitionsFuture {
    type Output = KafkaResult<Vec<TopicResult>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let event = ready!(self.rx.poll_unpin(cx)).map_err(|_| KafkaError::Canceled)?;
        match event {
            AdminEvent::CreatePartitions(results) => Poll::Ready(Ok(results)),
            AdminEvent::Error(err) => Poll::Ready(Err(KafkaError::AdminOp(err))),
            _ => Poll::Ready(Err(KafkaError::MismatchedCompletion(
                AdminOp::CreatePartitions,
            ))),
        }
    }
}

//
// Describe configs handling
//

/// Specification of a configurable resource.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ResourceSpecifier<'a> {
    /// A topic resource, identified by its name.
    Topic(&'a str),
    /// A broker resource, identified by its ID.
    Broker(i32),
}

impl ResourceSpecifier<'_> {
    fn to_owned_spec(&self) -> KafkaResult<OwnedResourceSpecifier> {
        match self {
            ResourceSpecifier::Topic(name) => {
                if name.is_empty() {
                    return Err(ConstructionError::EmptyName("resource name").into());
                }
                Ok(OwnedResourceSpecifier::Topic((*name).to_string()))
            }
            ResourceSpecifier::Broker(id) => {
                if *id < 0 {
                    return Err(ConstructionError::InvalidCount {
                        name: id.to_string(),
                        what: "broker id",
                        count: *id as i64,
                    }
                    .into());
                }
                Ok(OwnedResourceSpecifier::Broker(*id))
            }
        }
    }
}

/// A `ResourceSpecifier` that owns its data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OwnedResourceSpecifier {
    /// A topic resource, identified by its name.
    Topic(String),
    /// A broker resource, identified by its ID.
    Broker(i32),
}

impl OwnedResourceSpecifier {
    /// The resource's name: the topic name, or the broker ID in decimal.
    pub fn name(&self) -> String {
        match self {
            OwnedResourceSpecifier::Topic(name) => name.clone(),
            OwnedResourceSpecifier::Broker(id) => id.to_string(),
        }
    }
}

/// The source of a configuration entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSource {
    /// Unknown. Brokers predating configuration-source reporting do not
    /// reliably provide this information.
    Unknown,
    /// A dynamic topic configuration.
    DynamicTopic,
    /// A dynamic broker configuration.
    DynamicBroker,
    /// The default dynamic broker configuration.
    DynamicDefaultBroker,
    /// The static broker configuration.
    StaticBroker,
    /// The hardcoded default configuration.
    Default,
}

/// An individual configuration parameter for a configurable resource.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigEntry {
    /// The name of the configuration parameter.
    pub name: String,
    /// The value of the configuration parameter.
    pub value: Option<String>,
    /// The source of the configuration parameter.
    pub source: ConfigSource,
    /// Whether the configuration parameter is read only.
    pub is_read_only: bool,
    /// Whether the configuration parameter currently has the default value.
    pub is_default: bool,
    /// Whether the configuration parameter contains sensitive data.
    pub is_sensitive: bool,
}

/// The per-resource outcome of an individual AlterConfigs or DescribeConfigs
/// operation.
///
/// For a successful describe, `entries` holds the resource's current
/// configuration; for alter operations it is empty.
#[derive(Debug, Eq, PartialEq)]
pub struct ConfigResourceResult {
    /// Identifies the resource.
    pub specifier: OwnedResourceSpecifier,
    /// The outcome code.
    pub error: ErrorCode,
    /// The error detail supplied by the broker or transport, if any.
    pub error_string: Option<String>,
    /// The current configuration parameters.
    pub entries: Vec<ConfigEntry>,
}

impl ConfigResourceResult {
    /// Creates a successful result carrying the given configuration entries.
    pub fn ok(specifier: OwnedResourceSpecifier, entries: Vec<ConfigEntry>) -> ConfigResourceResult {
        ConfigResourceResult {
            specifier,
            error: ErrorCode::NoError,
            error_string: None,
            entries,
        }
    }

    /// Creates a failed result. An empty detail string is treated as absent.
    pub fn err(
        specifier: OwnedResourceSpecifier,
        error: ErrorCode,
        error_string: Option<&str>,
    ) -> ConfigResourceResult {
        ConfigResourceResult {
            specifier,
            error,
            error_string: error_string
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string()),
            entries: Vec::new(),
        }
    }

    /// Builds a full batch of results carrying the same error, one item per
    /// resource, in input order.
    pub fn batch_error<I>(
        specifiers: I,
        error: ErrorCode,
        errstr: &str,
    ) -> Vec<ConfigResourceResult>
    where
        I: IntoIterator<Item = OwnedResourceSpecifier>,
    {
        specifiers
            .into_iter()
            .map(|specifier| ConfigResourceResult::err(specifier, error, Some(errstr)))
            .collect()
    }

    /// Reports whether this result represents a failure.
    pub fn is_error(&self) -> bool {
        self.error.is_error()
    }

    /// Builds a `HashMap` of configuration entries, keyed by configuration
    /// entry name.
    pub fn entry_map(&self) -> HashMap<&str, &ConfigEntry> {
        self.entries.iter().map(|e| (&*e.name, e)).collect()
    }

    /// Searches the configuration entries to find the named parameter.
    ///
    /// For more efficient lookups, use `entry_map` to build a `HashMap`
    /// instead.
    pub fn get(&self, name: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

struct DescribeConfigsFuture {
    rx: oneshot::Receiver<AdminEvent>,
}

impl Future for DescribeConfigsFuture {
    type Output = KafkaResult<Vec<ConfigResourceResult>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let event = ready!(self.rx.poll_unpin(cx)).map_err(|_| KafkaError::Canceled)?;
        match event {
            AdminEvent::DescribeConfigs(results) => Poll::Ready(Ok(results)),
            AdminEvent::Error(err) => Poll::Ready(Err(KafkaError::AdminOp(err))),
            _ => Poll::Ready(Err(KafkaError::MismatchedCompletion(
                AdminOp::DescribeConfigs,
            ))),
        }
    }
}

//
// Alter configs handling
//

/// Configuration for an AlterConfig operation.
pub struct AlterConfig<'a> {
    /// Identifies the resource to be altered.
    pub specifier: ResourceSpecifier<'a>,
    /// The configuration parameters to be updated, in application order.
    pub entries: Vec<(&'a str, &'a str)>,
}

impl<'a> AlterConfig<'a> {
    /// Creates a new `AlterConfig`.
    pub fn new(specifier: ResourceSpecifier<'_>) -> AlterConfig<'_> {
        AlterConfig {
            specifier,
            entries: Vec::new(),
        }
    }

    /// Sets the configuration parameter named `key` to the specified `value`.
    pub fn set(mut self, key: &'a str, value: &'a str) -> AlterConfig<'a> {
        self.entries.push((key, value));
        self
    }

    fn to_owned_spec(&self) -> KafkaResult<OwnedAlterConfig> {
        let specifier = self.specifier.to_owned_spec()?;
        check_duplicate_keys(&specifier.name(), self.entries.iter().map(|(k, _)| *k))?;
        Ok(OwnedAlterConfig {
            specifier,
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }
}

/// An owned, shape-validated AlterConfigs spec, as handed to a transport.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnedAlterConfig {
    /// Identifies the resource to be altered.
    pub specifier: OwnedResourceSpecifier,
    /// The configuration parameters to be updated, in application order.
    pub entries: Vec<(String, String)>,
}

struct AlterConfigsFuture {
    rx: oneshot::Receiver<AdminEvent>,
}

impl Future for AlterConfigsFuture {
    type Output = KafkaResult<Vec<ConfigResourceResult>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let event = ready!(self.rx.poll_unpin(cx)).map_err(|_| KafkaError::Canceled)?;
        match event {
            AdminEvent::AlterConfigs(results) => Poll::Ready(Ok(results)),
            AdminEvent::Error(err) => Poll::Ready(Err(KafkaError::AdminOp(err))),
            _ => Poll::Ready(Err(KafkaError::MismatchedCompletion(AdminOp::AlterConfigs))),
        }
    }
}
