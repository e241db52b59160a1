//! Result type alias for Nexus
//!
//! This module provides a convenient Result type alias that uses NexusError
//! as the error type.

use super::errors::NexusError;

/// Result type alias for Nexus operations
///
/// # Examples
///
/// ```
/// use nexus::domain::result::Result;
/// use nexus::domain::errors::NexusError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(NexusError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, NexusError>;
