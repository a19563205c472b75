// SDK error -> ProbeError mapping

use aws_sdk_ecs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use ecswait_core::port::ProbeError;
use std::error::Error;
use std::fmt::Debug;

/// Map an ECS error code to a probe error
pub fn classify_code(code: Option<&str>, message: String) -> ProbeError {
    match code {
        Some("ClusterNotFoundException") | Some("ServiceNotFoundException") => {
            ProbeError::TargetNotFound(message)
        }
        Some("AccessDeniedException")
        | Some("UnrecognizedClientException")
        | Some("InvalidSignatureException")
        | Some("ExpiredTokenException")
        | Some("InvalidClientTokenId") => ProbeError::AccessDenied(message),
        _ => ProbeError::Other(message),
    }
}

/// Map any SDK operation error
pub fn map_sdk_error<E, R>(err: &SdkError<E, R>) -> ProbeError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    let message = DisplayErrorContext(err).to_string();
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => ProbeError::Transport(message),
        _ => classify_code(err.code(), message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cluster_is_target_not_found() {
        let err = classify_code(Some("ClusterNotFoundException"), "Cluster not found.".into());
        assert_eq!(err, ProbeError::TargetNotFound("Cluster not found.".into()));
    }

    #[test]
    fn test_auth_codes_are_access_denied() {
        for code in ["AccessDeniedException", "UnrecognizedClientException"] {
            assert!(matches!(
                classify_code(Some(code), String::new()),
                ProbeError::AccessDenied(_)
            ));
        }
    }

    #[test]
    fn test_unknown_code_is_other() {
        assert!(matches!(
            classify_code(Some("ThrottlingException"), "slow down".into()),
            ProbeError::Other(_)
        ));
        assert!(matches!(classify_code(None, String::new()), ProbeError::Other(_)));
    }
}
