//! Error manipulations.

use std::{error, fmt};

use crate::admin::AdminOp;
use crate::confval::OptionKind;

/// Kafka result.
pub type KafkaResult<T> = Result<T, KafkaError>;

/// Verify if the value represents an error condition.
///
/// Some outcome codes are informational, rather than true errors.
pub trait IsError {
    /// Reports whether the value represents an error.
    fn is_error(self) -> bool;
}

impl IsError for ErrorCode {
    fn is_error(self) -> bool {
        self != ErrorCode::NoError
    }
}

/// Per-target outcome code reported for an admin operation.
///
/// Codes whose description starts with "Broker:" originate from the broker;
/// the remaining codes are produced by the transport layer before a request
/// reaches any broker.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    /// Operation completed successfully.
    NoError,
    /// Operation timed out before a response was received.
    OperationTimedOut,
    /// Broker transport failure.
    BrokerTransportFailure,
    /// All broker connections are down.
    AllBrokersDown,
    /// Invalid argument detected by the transport.
    InvalidArgument,
    /// Broker: request timed out on the broker.
    RequestTimedOut,
    /// Broker: unknown topic or partition.
    UnknownTopicOrPartition,
    /// Broker: this broker is not the controller.
    NotController,
    /// Broker: the request is malformed.
    InvalidRequest,
    /// Broker: topic already exists.
    TopicAlreadyExists,
    /// Broker: invalid number of partitions.
    InvalidPartitions,
    /// Broker: invalid replication factor.
    InvalidReplicationFactor,
    /// Broker: invalid replica assignment.
    InvalidReplicaAssignment,
    /// Broker: invalid configuration.
    InvalidConfig,
    /// Broker: topic authorization failed.
    TopicAuthorizationFailed,
    /// Broker: cluster authorization failed.
    ClusterAuthorizationFailed,
    /// Broker: the request violated a configured policy.
    PolicyViolation,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match self {
            ErrorCode::NoError => "Success",
            ErrorCode::OperationTimedOut => "Operation timed out",
            ErrorCode::BrokerTransportFailure => "Broker transport failure",
            ErrorCode::AllBrokersDown => "All broker connections are down",
            ErrorCode::InvalidArgument => "Invalid argument or configuration",
            ErrorCode::RequestTimedOut => "Broker: request timed out",
            ErrorCode::UnknownTopicOrPartition => "Broker: unknown topic or partition",
            ErrorCode::NotController => "Broker: not controller for cluster",
            ErrorCode::InvalidRequest => "Broker: invalid request",
            ErrorCode::TopicAlreadyExists => "Broker: topic already exists",
            ErrorCode::InvalidPartitions => "Broker: invalid number of partitions",
            ErrorCode::InvalidReplicationFactor => "Broker: invalid replication factor",
            ErrorCode::InvalidReplicaAssignment => "Broker: invalid replica assignment",
            ErrorCode::InvalidConfig => "Broker: invalid configuration",
            ErrorCode::TopicAuthorizationFailed => "Broker: topic authorization failed",
            ErrorCode::ClusterAuthorizationFailed => "Broker: cluster authorization failed",
            ErrorCode::PolicyViolation => "Broker: policy violation",
        };
        write!(f, "{}", description)
    }
}

impl error::Error for ErrorCode {}

/// A failure to set an option on an [`AdminOptions`] set.
///
/// These errors are detected locally and returned synchronously; they indicate
/// caller misuse and are never retried.
///
/// [`AdminOptions`]: crate::admin::AdminOptions
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// The option name is not part of the schema for the targeted operation
    /// kind.
    UnknownOption(String),
    /// The supplied value does not match the option's declared kind.
    TypeMismatch {
        /// Name of the option.
        option: &'static str,
        /// The kind the option was declared with.
        expected: OptionKind,
        /// The kind of the supplied value.
        found: OptionKind,
    },
    /// The supplied numeric value is outside the option's inclusive range.
    OutOfRange {
        /// Name of the option.
        option: &'static str,
        /// The supplied value.
        value: i64,
        /// Lower inclusive bound.
        min: i64,
        /// Upper inclusive bound.
        max: i64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::UnknownOption(name) => {
                write!(f, "unknown admin option \"{}\"", name)
            }
            ValidationError::TypeMismatch {
                option,
                expected,
                found,
            } => write!(
                f,
                "admin option \"{}\" expects a {} value, got a {} value",
                option, expected, found
            ),
            ValidationError::OutOfRange {
                option,
                value,
                min,
                max,
            } => write!(
                f,
                "admin option \"{}\" value {} is outside range {}..={}",
                option, value, min, max
            ),
        }
    }
}

impl error::Error for ValidationError {}

/// A failure to construct an admin operation from its specs.
///
/// Only shape problems that are knowable without contacting a broker are
/// reported here; everything else comes back per item in the result batch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConstructionError {
    /// A required name was empty.
    EmptyName(&'static str),
    /// A count field was outside its valid range.
    InvalidCount {
        /// Name of the topic or resource the count belongs to.
        name: String,
        /// Which count was invalid.
        what: &'static str,
        /// The supplied value.
        count: i64,
    },
    /// A replica assignment covers more partitions than the spec declares.
    AssignmentMismatch {
        /// Name of the topic the assignment belongs to.
        name: String,
        /// Number of partitions covered by the assignment.
        assigned: usize,
        /// Number of partitions declared by the spec.
        partitions: i64,
    },
    /// A configuration key appeared more than once within one spec.
    DuplicateKey {
        /// Name of the topic or resource the key belongs to.
        name: String,
        /// The duplicated key.
        key: String,
    },
    /// The submitted spec list was empty.
    EmptyBatch,
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstructionError::EmptyName(what) => write!(f, "{} must not be empty", what),
            ConstructionError::InvalidCount { name, what, count } => {
                write!(f, "invalid {} ({}) for '{}'", what, count, name)
            }
            ConstructionError::AssignmentMismatch {
                name,
                assigned,
                partitions,
            } => write!(
                f,
                "replica assignment for topic '{}' covers {} partition(s), \
                 which is more than the specified number of partitions ({})",
                name, assigned, partitions
            ),
            ConstructionError::DuplicateKey { name, key } => write!(
                f,
                "configuration key '{}' appears more than once for '{}'",
                key, name
            ),
            ConstructionError::EmptyBatch => write!(f, "at least one spec must be supplied"),
        }
    }
}

impl error::Error for ConstructionError {}

/// Represents all possible Kafka errors.
///
/// If applicable, check the underlying [`ErrorCode`] to get details.
#[derive(Clone, PartialEq, Eq)]
pub enum KafkaError {
    /// The admin operation itself failed.
    AdminOp(ErrorCode),
    /// Creation of admin operation failed.
    AdminOpCreation(ConstructionError),
    /// Setting an admin option failed.
    AdminOptions(ValidationError),
    /// The client was dropped before the operation completed.
    Canceled,
    /// Invalid client configuration.
    ClientConfig(String, String, String),
    /// Client creation failed.
    ClientCreation(String),
    /// An admin operation received a completion event of a different kind.
    MismatchedCompletion(AdminOp),
}

impl fmt::Debug for KafkaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KafkaError::AdminOp(err) => write!(f, "KafkaError (Admin operation error: {})", err),
            KafkaError::AdminOpCreation(err) => {
                write!(f, "KafkaError (Admin operation creation error: {})", err)
            }
            KafkaError::AdminOptions(err) => {
                write!(f, "KafkaError (Admin option error: {})", err)
            }
            KafkaError::Canceled => write!(f, "KafkaError (Client dropped)"),
            KafkaError::ClientConfig(desc, key, value) => write!(
                f,
                "KafkaError (Client config error: {} {} {})",
                desc, key, value
            ),
            KafkaError::ClientCreation(err) => {
                write!(f, "KafkaError (Client creation error: {})", err)
            }
            KafkaError::MismatchedCompletion(op) => {
                write!(f, "KafkaError (Mismatched completion for {:?})", op)
            }
        }
    }
}

impl fmt::Display for KafkaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KafkaError::AdminOp(err) => write!(f, "Admin operation error: {}", err),
            KafkaError::AdminOpCreation(err) => {
                write!(f, "Admin operation creation error: {}", err)
            }
            KafkaError::AdminOptions(err) => write!(f, "Admin option error: {}", err),
            KafkaError::Canceled => write!(f, "Client dropped"),
            KafkaError::ClientConfig(desc, key, value) => {
                write!(f, "Client config error: {} {} {}", desc, key, value)
            }
            KafkaError::ClientCreation(err) => write!(f, "Client creation error: {}", err),
            KafkaError::MismatchedCompletion(op) => {
                write!(f, "Mismatched completion event for {:?} operation", op)
            }
        }
    }
}

impl error::Error for KafkaError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            KafkaError::AdminOp(err) => Some(err),
            KafkaError::AdminOpCreation(err) => Some(err),
            KafkaError::AdminOptions(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for KafkaError {
    fn from(err: ValidationError) -> KafkaError {
        KafkaError::AdminOptions(err)
    }
}

impl From<ConstructionError> for KafkaError {
    fn from(err: ConstructionError) -> KafkaError {
        KafkaError::AdminOpCreation(err)
    }
}

impl KafkaError {
    /// Returns the [`ErrorCode`] underlying this error, if any.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            KafkaError::AdminOp(err) => Some(*err),
            _ => None,
        }
    }
}
