//! Typed error handling for the stockroom engine
//!
//! The pure pipeline (filter, sort, paginate, line calculation) never fails.
//! Errors only exist at the boundaries: repository operations, configuration
//! loading and caller-side validation of invoice lines.
//!
//! # Error Categories
//!
//! - [`EntityError`]: repository CRUD failures
//! - [`ConfigError`]: configuration parsing and validation
//! - [`ValidationError`]: rejected input (e.g. negative invoice quantities)
//! - [`StorageError`]: storage backend failures
//!
//! # Example
//!
//! ```rust,ignore
//! match LineItemInput::new(100.0, -1.0, 0.0, 19.0).validate() {
//!     Ok(line) => println!("total: {}", line.total),
//!     Err(ValidationError::FieldErrors(errors)) => {
//!         for e in errors {
//!             eprintln!("{}: {}", e.field, e.message);
//!         }
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the engine
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Entity-related errors (CRUD operations)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Serializable error description handed to the presentation layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl InventoryError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            InventoryError::Entity(e) => e.error_code(),
            InventoryError::Config(_) => "CONFIG_ERROR",
            InventoryError::Validation(_) => "VALIDATION_ERROR",
            InventoryError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            InventoryError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            InventoryError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },

    /// Entity already exists (conflict)
    #[error("{entity_type} with id '{id}' already exists")]
    AlreadyExists { entity_type: String, id: Uuid },
}

impl EntityError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", describe_file(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

fn describe_file(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Names of the fields that failed validation
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldError { field, .. } => vec![field.as_str()],
            ValidationError::FieldErrors(errors) => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
            ValidationError::InvalidJson { .. } => Vec::new(),
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// A lock guarding in-memory state was poisoned
    #[error("Failed to acquire {kind} lock: {message}")]
    LockPoisoned { kind: &'static str, message: String },
}
