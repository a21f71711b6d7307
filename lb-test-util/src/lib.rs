pub mod collect;

use bytes::Bytes;
use http_body_util::Full;
use serde::{Deserialize, Serialize};

#[inline]
pub fn empty_body() -> Full<Bytes> {
    Full::new(Bytes::new())
}

/// Payload every replica serves on its health routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub project: String,
    pub message: String,
    pub container_id: String,
    pub client_ip: String,
    pub system_metrics: SystemMetrics,
}

/// The camelCase field names are part of the wire contract.
#[derive(Debug, Serialize, Deserialize)]
pub struct SystemMetrics {
    #[serde(rename = "uptimeSeconds")]
    pub uptime_seconds: u64,
    #[serde(rename = "freeMemoryMB")]
    pub free_memory_mb: u64,
    #[serde(rename = "totalMemoryMB")]
    pub total_memory_mb: u64,
    #[serde(rename = "cpuLoadAvg")]
    pub cpu_load_avg: [f64; 3],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            error: "Not Found".to_string(),
        }
    }
}

/// Lenient read-side view of a response body: only the replica tag matters,
/// and a body without one is still a valid response.
#[derive(Debug, Deserialize)]
pub struct ReplicaTag {
    pub container_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_health() -> HealthResponse {
        HealthResponse {
            status: "success".to_string(),
            project: "project-a".to_string(),
            message: "Infrastructure health check successful!".to_string(),
            container_id: "0a1b2c3d4e5f".to_string(),
            client_ip: "10.0.0.7".to_string(),
            system_metrics: SystemMetrics {
                uptime_seconds: 4242,
                free_memory_mb: 512,
                total_memory_mb: 2048,
                cpu_load_avg: [0.5, 0.25, 0.1],
            },
        }
    }

    #[test]
    fn metrics_serialize_with_wire_casing() {
        let value = serde_json::to_value(sample_health().system_metrics).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("uptimeSeconds"));
        assert!(obj.contains_key("freeMemoryMB"));
        assert!(obj.contains_key("totalMemoryMB"));
        assert!(obj.contains_key("cpuLoadAvg"));
    }

    #[test]
    fn replica_tag_reads_health_payload() {
        let body = serde_json::to_vec(&sample_health()).unwrap();
        let tag: ReplicaTag = serde_json::from_slice(&body).unwrap();
        assert_eq!(tag.container_id.as_deref(), Some("0a1b2c3d4e5f"));
    }

    #[test]
    fn replica_tag_tolerates_missing_field() {
        let tag: ReplicaTag = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(tag.container_id.is_none());
    }

    #[test]
    fn replica_tag_rejects_non_object_bodies() {
        assert!(serde_json::from_str::<ReplicaTag>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<ReplicaTag>("not json at all").is_err());
    }
}
