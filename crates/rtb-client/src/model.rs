//! Resource and envelope types for the Real-time Bidding v1 and Pub/Sub v1 APIs.
//!
//! Field names follow the JSON wire format (camelCase). `int64` fields are carried as
//! strings because that is how the APIs encode them.

use crate::paging::{Page, Paged};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bidder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_matching_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_matching_network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_nonguaranteed_deals_pretargeting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deals_billing_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_creative_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_active_creative_count: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub billing_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_qps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trading_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_protocol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creative {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declared_attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declared_click_through_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declared_restricted_categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declared_vendor_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub impression_tracking_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<HtmlContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<NativeContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_serving_decision: Option<CreativeServingDecision>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_tracking_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_icon: Option<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_vast_xml: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCompliance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeServingDecision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deals_policy_compliance: Option<PolicyCompliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_policy_compliance: Option<PolicyCompliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_policy_compliance: Option<PolicyCompliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub china_policy_compliance: Option<PolicyCompliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub russia_policy_compliance: Option<PolicyCompliance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_click_through_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status_update: Option<String>,
}

/// Targeting on a list of int64 IDs, such as geo or vertical IDs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericTargetingDimension {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_ids: Vec<String>,
}

/// Targeting on string values with an INCLUSIVE/EXCLUSIVE mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringTargetingDimension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeting_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTargeting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_app_targeting: Option<StringTargetingDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_app_category_targeting: Option<NumericTargetingDimension>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeDimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PretargetingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_formats: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_qps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_targeting: Option<NumericTargetingDimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_geo_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_list_targeting: Option<NumericTargetingDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interstitial_targeting: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_user_targeting_modes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_content_label_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_user_id_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_mobile_operating_system_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_targeting: Option<NumericTargetingDimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_creative_dimensions: Vec<CreativeDimensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_environments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_targeting: Option<StringTargetingDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_targeting: Option<AppTargeting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_targeting: Option<StringTargetingDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_viewability_decile: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidding_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub day: u32,
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRestriction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_duration_days: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_restriction: Option<UrlRestriction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchCreativesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTargetedSitesRequest {
    pub sites: Vec<String>,
    pub targeting_mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTargetedSitesRequest {
    pub sites: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTargetedAppsRequest {
    pub app_ids: Vec<String>,
    pub targeting_mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTargetedAppsRequest {
    pub app_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTargetedPublishersRequest {
    pub publisher_ids: Vec<String>,
    pub targeting_mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTargetedPublishersRequest {
    pub publisher_ids: Vec<String>,
}

/// Body of `publisherConnections:batchApprove` and `:batchReject`; `names` are full
/// resource names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchPublisherConnectionsRequest {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPublisherConnectionsResponse {
    #[serde(default)]
    pub publisher_connections: Vec<PublisherConnection>,
}

macro_rules! list_response {
    ($name:ident, $field:ident, $item:ty) => {
        #[derive(Debug, Clone, Default, PartialEq, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            #[serde(default)]
            pub $field: Vec<$item>,
            #[serde(default)]
            pub next_page_token: Option<String>,
        }

        impl Paged for $name {
            type Item = $item;

            fn into_page(self) -> Page<$item> {
                Page::new(self.$field, self.next_page_token)
            }
        }
    };
}

list_response!(ListBiddersResponse, bidders, Bidder);
list_response!(ListBuyersResponse, buyers, Buyer);
list_response!(ListEndpointsResponse, endpoints, Endpoint);
list_response!(ListCreativesResponse, creatives, Creative);
list_response!(ListPretargetingConfigsResponse, pretargeting_configs, PretargetingConfig);
list_response!(ListPublisherConnectionsResponse, publisher_connections, PublisherConnection);
list_response!(ListUserListsResponse, user_lists, UserList);

// Pub/Sub

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub max_messages: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullResponse {
    #[serde(default)]
    pub received_messages: Vec<ReceivedMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedMessage {
    #[serde(default)]
    pub ack_id: String,
    #[serde(default)]
    pub message: PubsubMessage,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PubsubMessage {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub publish_time: Option<String>,
    /// Base64-encoded payload.
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl PubsubMessage {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Decode the base64 payload as JSON. Returns `Ok(None)` when the message has no data.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<Option<T>, crate::ApiError> {
        let Some(data) = self.data.as_deref().filter(|d| !d.is_empty()) else {
            return Ok(None);
        };
        let bytes = STANDARD
            .decode(data)
            .map_err(|e| crate::ApiError::Decode(format!("message data is not base64: {e}")))?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| crate::ApiError::Decode(format!("message data is not valid JSON: {e}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeRequest {
    pub ack_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn creative_decodes_nested_content() {
        let creative: Creative = serde_json::from_value(json!({
            "name": "buyers/1/creatives/c1",
            "accountId": "1",
            "creativeId": "c1",
            "version": 3,
            "declaredVendorIds": [10, 20],
            "html": {"snippet": "<b>hi</b>", "height": 250, "width": 300},
            "creativeServingDecision": {
                "networkPolicyCompliance": {"status": "APPROVED"}
            }
        }))
        .unwrap();
        assert_eq!(creative.creative_id.as_deref(), Some("c1"));
        assert_eq!(creative.declared_vendor_ids, vec![10, 20]);
        assert_eq!(creative.html.as_ref().and_then(|h| h.width), Some(300));
        let status = creative
            .creative_serving_decision
            .and_then(|d| d.network_policy_compliance)
            .and_then(|p| p.status);
        assert_eq!(status.as_deref(), Some("APPROVED"));
    }

    #[test]
    fn endpoint_patch_body_skips_unset_fields() {
        let endpoint = Endpoint {
            maximum_qps: Some("1".to_string()),
            bid_protocol: Some("GOOGLE_RTB".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&endpoint).unwrap(),
            json!({"maximumQps": "1", "bidProtocol": "GOOGLE_RTB"})
        );
    }

    #[test]
    fn list_response_becomes_page() {
        let resp: ListPretargetingConfigsResponse = serde_json::from_value(json!({
            "pretargetingConfigs": [{"name": "bidders/1/pretargetingConfigs/2"}],
            "nextPageToken": "abc"
        }))
        .unwrap();
        let page = resp.into_page();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));

        let empty: ListBuyersResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.into_page().items.is_empty());
    }

    #[test]
    fn pubsub_message_data_decodes_from_base64_json() {
        let payload = json!({"networkPolicyCompliance": {"status": "DISAPPROVED"}});
        let message = PubsubMessage {
            data: Some(STANDARD.encode(payload.to_string())),
            attributes: BTreeMap::from([("creativeId".to_string(), "c9".to_string())]),
            ..Default::default()
        };
        let decision: CreativeServingDecision = message.decode_data().unwrap().unwrap();
        assert_eq!(
            decision.network_policy_compliance.and_then(|p| p.status).as_deref(),
            Some("DISAPPROVED")
        );
        assert_eq!(message.attribute("creativeId"), Some("c9"));
        assert_eq!(message.attribute("accountId"), None);
    }

    #[test]
    fn pubsub_message_rejects_bad_base64() {
        let message = PubsubMessage {
            data: Some("***".to_string()),
            ..Default::default()
        };
        assert!(message.decode_data::<serde_json::Value>().is_err());
        assert!(PubsubMessage::default().decode_data::<serde_json::Value>().unwrap().is_none());
    }

    #[test]
    fn date_displays_iso() {
        let date = Date { year: 2024, month: 3, day: 7 };
        assert_eq!(date.to_string(), "2024-03-07");
    }
}
