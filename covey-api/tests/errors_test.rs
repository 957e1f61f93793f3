use covey_api::errors::{JobError, PoolError, StateError};
use std::error::Error;
use anyhow::anyhow;

#[cfg(test)]
mod tests {
    use super::*;

    // Test invalid configuration error
    #[test]
    fn test_invalid_configuration_error() {
        let error =
            PoolError::InvalidConfiguration("worker count must be at least 1".to_string());

        // Test error message formatting
        assert_eq!(
            error.to_string(),
            "Invalid worker pool configuration: worker count must be at least 1"
        );

        // Verify error is a source of errors
        assert!(error.source().is_none());
    }

    // Test closed pool error
    #[test]
    fn test_closed_error() {
        let error = PoolError::Closed;

        // Test error message formatting
        assert_eq!(error.to_string(), "Worker pool is closed");

        // Verify error is a source of errors
        assert!(error.source().is_none());
    }

    // Test stopped actor error
    #[test]
    fn test_stopped_error() {
        let error = StateError::Stopped;

        // Test error message formatting
        assert_eq!(error.to_string(), "State actor stopped");

        // Verify error is a source of errors
        assert!(error.source().is_none());
    }

    // Test execution failure wrapping
    #[test]
    fn test_execution_error() {
        let original_error = anyhow!("division by zero");
        let error = JobError::Execution(original_error);

        // Test error message formatting
        assert_eq!(error.to_string(), "Job execution failed: division by zero");

        // Verify error propagates source
        assert!(error.source().is_some());
    }

    // Test panic capture formatting
    #[test]
    fn test_panicked_error() {
        let error = JobError::Panicked("index out of bounds".to_string());

        // Test error message formatting
        assert_eq!(error.to_string(), "Job panicked: index out of bounds");

        // Verify error is a source of errors
        assert!(error.source().is_none());
    }

    // Test error conversion from anyhow
    #[test]
    fn test_from_anyhow() {
        let anyhow_error = anyhow!("executor refused the payload");
        let job_error: JobError = anyhow_error.into();

        match job_error {
            JobError::Execution(_) => {
                // Success: error was correctly wrapped
            }
            _ => {
                panic!("Expected Execution error variant");
            }
        }
    }

    // Test error in Result context
    #[test]
    fn test_in_result_context() {
        // Helper function returning PoolError in Result
        fn submission_that_fails() -> Result<(), PoolError> {
            Err(PoolError::Closed)
        }

        // Use the result
        let result = submission_that_fails();
        assert!(result.is_err());

        match result {
            Err(PoolError::Closed) => {
                // Success: correctly matched error variant
            }
            _ => {
                panic!("Expected Closed error");
            }
        }
    }
}
