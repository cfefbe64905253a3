use crate::error::ApiError;
use crate::model::{AcknowledgeRequest, PullRequest, PullResponse, ReceivedMessage};
use crate::transport::{ApiRequest, Transport};

/// Cloud Pub/Sub v1 subscription operations.
pub struct PubSub<'t> {
    transport: &'t dyn Transport,
}

impl<'t> PubSub<'t> {
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self { transport }
    }

    /// Pull up to `max_messages` from `subscription` (a full
    /// `projects/{project}/subscriptions/{name}` resource name).
    pub fn pull(
        &self,
        subscription: &str,
        max_messages: i64,
    ) -> Result<Vec<ReceivedMessage>, ApiError> {
        let request =
            ApiRequest::post(format!("{subscription}:pull"), &PullRequest { max_messages })?;
        let value = self.transport.execute(request)?;
        let response: PullResponse =
            serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        tracing::debug!(count = response.received_messages.len(), "pulled messages");
        Ok(response.received_messages)
    }

    /// Acknowledge messages by ack ID. An empty list sends nothing.
    pub fn acknowledge(&self, subscription: &str, ack_ids: Vec<String>) -> Result<(), ApiError> {
        if ack_ids.is_empty() {
            return Ok(());
        }
        let request = ApiRequest::post(
            format!("{subscription}:acknowledge"),
            &AcknowledgeRequest { ack_ids },
        )?;
        self.transport.execute(request)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;

    const SUBSCRIPTION: &str = "projects/realtimebidding-pubsub/subscriptions/sub-1";

    #[test]
    fn pull_then_acknowledge() {
        let mock = MockTransport::new();
        mock.respond(json!({
            "receivedMessages": [
                {"ackId": "ack-1", "message": {
                    "messageId": "m1",
                    "attributes": {"accountId": "1", "creativeId": "c1"}
                }},
                {"ackId": "ack-2", "message": {"messageId": "m2"}}
            ]
        }));
        let pubsub = PubSub::new(&mock);

        let messages = pubsub.pull(SUBSCRIPTION, 10).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message.attribute("creativeId"), Some("c1"));

        let ack_ids = messages.into_iter().map(|m| m.ack_id).collect();
        pubsub.acknowledge(SUBSCRIPTION, ack_ids).unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].path, format!("{SUBSCRIPTION}:pull"));
        assert_eq!(requests[0].body, Some(json!({"maxMessages": 10})));
        assert_eq!(requests[1].path, format!("{SUBSCRIPTION}:acknowledge"));
        assert_eq!(requests[1].body, Some(json!({"ackIds": ["ack-1", "ack-2"]})));
    }

    #[test]
    fn empty_pull_skips_acknowledge() {
        let mock = MockTransport::new();
        let pubsub = PubSub::new(&mock);
        let messages = pubsub.pull(SUBSCRIPTION, 1).unwrap();
        assert!(messages.is_empty());
        pubsub.acknowledge(SUBSCRIPTION, Vec::new()).unwrap();
        assert_eq!(mock.request_count(), 1);
    }
}
