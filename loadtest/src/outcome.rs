use hyper::StatusCode;
use lb_test_util::ReplicaTag;

/// What a single attempt amounted to once its exchange is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success { replica: Option<String> },
    Failure,
}

/// Status codes in [200, 400) count as success, everything else as failure.
/// A success body is probed for a replica tag; a body that is not JSON or
/// carries no tag still counts as a plain success.
pub fn classify<E>(exchange: Result<(StatusCode, Vec<u8>), E>) -> AttemptOutcome {
    match exchange {
        Ok((status, body)) if (200..400).contains(&status.as_u16()) => {
            let replica = serde_json::from_slice::<ReplicaTag>(&body)
                .ok()
                .and_then(|tag| tag.container_id);
            AttemptOutcome::Success { replica }
        }
        Ok(_) | Err(_) => AttemptOutcome::Failure,
    }
}
