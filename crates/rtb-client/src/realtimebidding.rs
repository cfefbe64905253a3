use crate::error::ApiError;
use crate::model::*;
use crate::paging::{Page, Paged};
use crate::paths;
use crate::transport::{ApiRequest, Transport};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Optional parameters shared by the `list` operations. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page_size: Option<i64>,
    pub page_token: Option<String>,
    pub filter: Option<String>,
    pub order_by: Option<String>,
    pub view: Option<String>,
}

impl ListParams {
    pub fn with_page_size(page_size: i64) -> Self {
        Self {
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    /// Copy of these parameters pointing at another page.
    pub fn at_page(&self, page_token: Option<&str>) -> Self {
        Self {
            page_token: page_token.map(str::to_string),
            ..self.clone()
        }
    }

    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("pageSize", self.page_size)
            .query_opt("pageToken", self.page_token.as_deref())
            .query_opt("filter", self.filter.as_deref())
            .query_opt("orderBy", self.order_by.as_deref())
            .query_opt("view", self.view.as_deref())
    }
}

/// Real-time Bidding v1 operations. Each method issues exactly one request.
pub struct RealTimeBidding<'t> {
    transport: &'t dyn Transport,
}

impl<'t> RealTimeBidding<'t> {
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self { transport }
    }

    fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let value = self.transport.execute(request)?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn list<R>(&self, path: String, params: &ListParams) -> Result<Page<R::Item>, ApiError>
    where
        R: Paged + DeserializeOwned,
    {
        let response: R = self.call(params.apply(ApiRequest::get(path)))?;
        Ok(response.into_page())
    }

    fn empty_post<T: DeserializeOwned>(&self, path: String) -> Result<T, ApiError> {
        self.call(ApiRequest::post(path, &json!({}))?)
    }

    // bidders

    pub fn get_bidder(&self, account_id: &str) -> Result<Bidder, ApiError> {
        self.call(ApiRequest::get(paths::bidder(account_id)))
    }

    pub fn list_bidders(&self, params: &ListParams) -> Result<Page<Bidder>, ApiError> {
        self.list::<ListBiddersResponse>("bidders".to_string(), params)
    }

    // bidders.endpoints

    pub fn get_endpoint(&self, account_id: &str, endpoint_id: &str) -> Result<Endpoint, ApiError> {
        self.call(ApiRequest::get(paths::endpoint(account_id, endpoint_id)))
    }

    pub fn list_endpoints(
        &self,
        account_id: &str,
        params: &ListParams,
    ) -> Result<Page<Endpoint>, ApiError> {
        let path = format!("{}/endpoints", paths::bidder(account_id));
        self.list::<ListEndpointsResponse>(path, params)
    }

    pub fn patch_endpoint(
        &self,
        account_id: &str,
        endpoint_id: &str,
        endpoint: &Endpoint,
        update_mask: &str,
    ) -> Result<Endpoint, ApiError> {
        let request = ApiRequest::patch(paths::endpoint(account_id, endpoint_id), endpoint)?
            .query("updateMask", update_mask);
        self.call(request)
    }

    // bidders.creatives

    pub fn list_bidder_creatives(
        &self,
        account_id: &str,
        params: &ListParams,
    ) -> Result<Page<Creative>, ApiError> {
        let path = format!("{}/creatives", paths::bidder(account_id));
        self.list::<ListCreativesResponse>(path, params)
    }

    /// Start watching creative status changes; the response names the Pub/Sub
    /// topic and subscription.
    pub fn watch_creatives(&self, account_id: &str) -> Result<WatchCreativesResponse, ApiError> {
        self.empty_post(format!("{}/creatives:watch", paths::bidder(account_id)))
    }

    // bidders.pretargetingConfigs

    pub fn get_pretargeting_config(
        &self,
        account_id: &str,
        config_id: &str,
    ) -> Result<PretargetingConfig, ApiError> {
        self.call(ApiRequest::get(paths::pretargeting_config(account_id, config_id)))
    }

    pub fn list_pretargeting_configs(
        &self,
        account_id: &str,
        params: &ListParams,
    ) -> Result<Page<PretargetingConfig>, ApiError> {
        let path = format!("{}/pretargetingConfigs", paths::bidder(account_id));
        self.list::<ListPretargetingConfigsResponse>(path, params)
    }

    pub fn create_pretargeting_config(
        &self,
        account_id: &str,
        config: &PretargetingConfig,
    ) -> Result<PretargetingConfig, ApiError> {
        let path = format!("{}/pretargetingConfigs", paths::bidder(account_id));
        self.call(ApiRequest::post(path, config)?)
    }

    pub fn patch_pretargeting_config(
        &self,
        account_id: &str,
        config_id: &str,
        config: &PretargetingConfig,
        update_mask: &str,
    ) -> Result<PretargetingConfig, ApiError> {
        let request = ApiRequest::patch(paths::pretargeting_config(account_id, config_id), config)?
            .query("updateMask", update_mask);
        self.call(request)
    }

    pub fn delete_pretargeting_config(
        &self,
        account_id: &str,
        config_id: &str,
    ) -> Result<(), ApiError> {
        self.transport
            .execute(ApiRequest::delete(paths::pretargeting_config(account_id, config_id)))?;
        Ok(())
    }

    pub fn activate_pretargeting_config(
        &self,
        account_id: &str,
        config_id: &str,
    ) -> Result<PretargetingConfig, ApiError> {
        let name = paths::pretargeting_config(account_id, config_id);
        self.empty_post(format!("{name}:activate"))
    }

    pub fn suspend_pretargeting_config(
        &self,
        account_id: &str,
        config_id: &str,
    ) -> Result<PretargetingConfig, ApiError> {
        let name = paths::pretargeting_config(account_id, config_id);
        self.empty_post(format!("{name}:suspend"))
    }

    pub fn add_targeted_sites(
        &self,
        account_id: &str,
        config_id: &str,
        body: &AddTargetedSitesRequest,
    ) -> Result<PretargetingConfig, ApiError> {
        self.config_verb(account_id, config_id, "addTargetedSites", body)
    }

    pub fn remove_targeted_sites(
        &self,
        account_id: &str,
        config_id: &str,
        body: &RemoveTargetedSitesRequest,
    ) -> Result<PretargetingConfig, ApiError> {
        self.config_verb(account_id, config_id, "removeTargetedSites", body)
    }

    pub fn add_targeted_apps(
        &self,
        account_id: &str,
        config_id: &str,
        body: &AddTargetedAppsRequest,
    ) -> Result<PretargetingConfig, ApiError> {
        self.config_verb(account_id, config_id, "addTargetedApps", body)
    }

    pub fn remove_targeted_apps(
        &self,
        account_id: &str,
        config_id: &str,
        body: &RemoveTargetedAppsRequest,
    ) -> Result<PretargetingConfig, ApiError> {
        self.config_verb(account_id, config_id, "removeTargetedApps", body)
    }

    pub fn add_targeted_publishers(
        &self,
        account_id: &str,
        config_id: &str,
        body: &AddTargetedPublishersRequest,
    ) -> Result<PretargetingConfig, ApiError> {
        self.config_verb(account_id, config_id, "addTargetedPublishers", body)
    }

    pub fn remove_targeted_publishers(
        &self,
        account_id: &str,
        config_id: &str,
        body: &RemoveTargetedPublishersRequest,
    ) -> Result<PretargetingConfig, ApiError> {
        self.config_verb(account_id, config_id, "removeTargetedPublishers", body)
    }

    fn config_verb<B: serde::Serialize>(
        &self,
        account_id: &str,
        config_id: &str,
        verb: &str,
        body: &B,
    ) -> Result<PretargetingConfig, ApiError> {
        let name = paths::pretargeting_config(account_id, config_id);
        self.call(ApiRequest::post(format!("{name}:{verb}"), body)?)
    }

    // bidders.publisherConnections

    pub fn get_publisher_connection(
        &self,
        account_id: &str,
        connection_id: &str,
    ) -> Result<PublisherConnection, ApiError> {
        self.call(ApiRequest::get(paths::publisher_connection(account_id, connection_id)))
    }

    pub fn list_publisher_connections(
        &self,
        account_id: &str,
        params: &ListParams,
    ) -> Result<Page<PublisherConnection>, ApiError> {
        let path = format!("{}/publisherConnections", paths::bidder(account_id));
        self.list::<ListPublisherConnectionsResponse>(path, params)
    }

    pub fn batch_approve_publisher_connections(
        &self,
        account_id: &str,
        connection_ids: &[String],
    ) -> Result<BatchPublisherConnectionsResponse, ApiError> {
        self.batch_publisher_connections(account_id, connection_ids, "batchApprove")
    }

    pub fn batch_reject_publisher_connections(
        &self,
        account_id: &str,
        connection_ids: &[String],
    ) -> Result<BatchPublisherConnectionsResponse, ApiError> {
        self.batch_publisher_connections(account_id, connection_ids, "batchReject")
    }

    fn batch_publisher_connections(
        &self,
        account_id: &str,
        connection_ids: &[String],
        verb: &str,
    ) -> Result<BatchPublisherConnectionsResponse, ApiError> {
        let body = BatchPublisherConnectionsRequest {
            names: connection_ids
                .iter()
                .map(|id| paths::publisher_connection(account_id, id))
                .collect(),
        };
        let path = format!("{}/publisherConnections:{verb}", paths::bidder(account_id));
        self.call(ApiRequest::post(path, &body)?)
    }

    // buyers

    pub fn get_buyer(&self, account_id: &str) -> Result<Buyer, ApiError> {
        self.call(ApiRequest::get(paths::buyer(account_id)))
    }

    pub fn list_buyers(&self, params: &ListParams) -> Result<Page<Buyer>, ApiError> {
        self.list::<ListBuyersResponse>("buyers".to_string(), params)
    }

    // buyers.creatives

    pub fn get_creative(
        &self,
        account_id: &str,
        creative_id: &str,
        view: Option<&str>,
    ) -> Result<Creative, ApiError> {
        let request =
            ApiRequest::get(paths::buyer_creative(account_id, creative_id)).query_opt("view", view);
        self.call(request)
    }

    pub fn list_creatives(
        &self,
        account_id: &str,
        params: &ListParams,
    ) -> Result<Page<Creative>, ApiError> {
        let path = format!("{}/creatives", paths::buyer(account_id));
        self.list::<ListCreativesResponse>(path, params)
    }

    pub fn create_creative(
        &self,
        account_id: &str,
        creative: &Creative,
    ) -> Result<Creative, ApiError> {
        let path = format!("{}/creatives", paths::buyer(account_id));
        self.call(ApiRequest::post(path, creative)?)
    }

    pub fn patch_creative(
        &self,
        account_id: &str,
        creative_id: &str,
        creative: &Creative,
        update_mask: &str,
    ) -> Result<Creative, ApiError> {
        let request = ApiRequest::patch(paths::buyer_creative(account_id, creative_id), creative)?
            .query("updateMask", update_mask);
        self.call(request)
    }

    // buyers.userLists

    pub fn get_user_list(
        &self,
        account_id: &str,
        user_list_id: &str,
    ) -> Result<UserList, ApiError> {
        self.call(ApiRequest::get(paths::user_list(account_id, user_list_id)))
    }

    pub fn list_user_lists(
        &self,
        account_id: &str,
        params: &ListParams,
    ) -> Result<Page<UserList>, ApiError> {
        let path = format!("{}/userLists", paths::buyer(account_id));
        self.list::<ListUserListsResponse>(path, params)
    }

    pub fn create_user_list(
        &self,
        account_id: &str,
        user_list: &UserList,
    ) -> Result<UserList, ApiError> {
        let path = format!("{}/userLists", paths::buyer(account_id));
        self.call(ApiRequest::post(path, user_list)?)
    }

    /// Replace a user list. Fields left unset in `user_list` are cleared.
    pub fn update_user_list(
        &self,
        account_id: &str,
        user_list_id: &str,
        user_list: &UserList,
    ) -> Result<UserList, ApiError> {
        self.call(ApiRequest::put(paths::user_list(account_id, user_list_id), user_list)?)
    }

    pub fn close_user_list(
        &self,
        account_id: &str,
        user_list_id: &str,
    ) -> Result<UserList, ApiError> {
        let name = paths::user_list(account_id, user_list_id);
        self.empty_post(format!("{name}:close"))
    }

    pub fn open_user_list(
        &self,
        account_id: &str,
        user_list_id: &str,
    ) -> Result<UserList, ApiError> {
        let name = paths::user_list(account_id, user_list_id);
        self.empty_post(format!("{name}:open"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::paging::collect_pages;
    use crate::transport::Method;

    #[test]
    fn list_sends_only_set_params() {
        let mock = MockTransport::new();
        mock.respond(json!({
            "endpoints": [{"name": "bidders/1/endpoints/2", "maximumQps": "100"}]
        }));
        let rtb = RealTimeBidding::new(&mock);

        let page = rtb
            .list_endpoints("1", &ListParams::with_page_size(50))
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].maximum_qps.as_deref(), Some("100"));
        assert_eq!(page.next_page_token, None);

        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "bidders/1/endpoints");
        assert_eq!(requests[0].query, vec![("pageSize".to_string(), "50".to_string())]);
    }

    #[test]
    fn paging_through_creatives_forwards_tokens() {
        let mock = MockTransport::new();
        mock.respond(json!({"creatives": [{"creativeId": "a"}], "nextPageToken": "p2"}))
            .respond(json!({"creatives": [{"creativeId": "b"}], "nextPageToken": "p3"}))
            .respond(json!({"creatives": [{"creativeId": "c"}]}));
        let rtb = RealTimeBidding::new(&mock);
        let params = ListParams {
            page_size: Some(50),
            view: Some("FULL".to_string()),
            ..ListParams::default()
        };

        let creatives =
            collect_pages(|token| rtb.list_creatives("7", &params.at_page(token))).unwrap();
        let ids: Vec<_> = creatives
            .iter()
            .filter_map(|c| c.creative_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].query_value("pageToken"), None);
        assert_eq!(requests[1].query_value("pageToken"), Some("p2"));
        assert_eq!(requests[2].query_value("pageToken"), Some("p3"));
        assert!(requests.iter().all(|r| r.query_value("view") == Some("FULL")));
    }

    #[test]
    fn patch_endpoint_sends_update_mask_and_body() {
        let mock = MockTransport::new();
        mock.respond(json!({"name": "bidders/1/endpoints/2", "tradingLocation": "US_EAST"}));
        let rtb = RealTimeBidding::new(&mock);
        let endpoint = Endpoint {
            maximum_qps: Some("1".to_string()),
            trading_location: Some("US_EAST".to_string()),
            bid_protocol: Some("GOOGLE_RTB".to_string()),
            ..Endpoint::default()
        };

        let updated = rtb
            .patch_endpoint("1", "2", &endpoint, "maximumQps,tradingLocation,bidProtocol")
            .unwrap();
        assert_eq!(updated.trading_location.as_deref(), Some("US_EAST"));

        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "bidders/1/endpoints/2");
        assert_eq!(
            request.query_value("updateMask"),
            Some("maximumQps,tradingLocation,bidProtocol")
        );
        assert_eq!(
            request.body,
            Some(json!({
                "maximumQps": "1",
                "tradingLocation": "US_EAST",
                "bidProtocol": "GOOGLE_RTB"
            }))
        );
    }

    #[test]
    fn custom_verbs_post_to_resource_name() {
        let mock = MockTransport::new();
        let rtb = RealTimeBidding::new(&mock);

        rtb.activate_pretargeting_config("1", "9").unwrap();
        rtb.close_user_list("5", "6").unwrap();
        rtb.watch_creatives("1").unwrap();
        rtb.add_targeted_sites(
            "1",
            "9",
            &AddTargetedSitesRequest {
                sites: vec!["a.com".to_string()],
                targeting_mode: "INCLUSIVE".to_string(),
            },
        )
        .unwrap();

        let requests = mock.requests();
        let paths: Vec<_> = requests.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "bidders/1/pretargetingConfigs/9:activate",
                "buyers/5/userLists/6:close",
                "bidders/1/creatives:watch",
                "bidders/1/pretargetingConfigs/9:addTargetedSites",
            ]
        );
        assert!(requests.iter().all(|r| r.method == Method::Post));
        assert_eq!(
            requests[3].body,
            Some(json!({"sites": ["a.com"], "targetingMode": "INCLUSIVE"}))
        );
    }

    #[test]
    fn batch_approve_expands_connection_names() {
        let mock = MockTransport::new();
        mock.respond(json!({
            "publisherConnections": [{
                "name": "bidders/1/publisherConnections/p1",
                "biddingState": "APPROVED"
            }]
        }));
        let rtb = RealTimeBidding::new(&mock);

        let response = rtb
            .batch_approve_publisher_connections("1", &["p1".to_string(), "p2".to_string()])
            .unwrap();
        assert_eq!(response.publisher_connections.len(), 1);

        let request = &mock.requests()[0];
        assert_eq!(request.path, "bidders/1/publisherConnections:batchApprove");
        assert_eq!(
            request.body,
            Some(json!({"names": [
                "bidders/1/publisherConnections/p1",
                "bidders/1/publisherConnections/p2"
            ]}))
        );
    }

    #[test]
    fn update_user_list_uses_put() {
        let mock = MockTransport::new();
        let rtb = RealTimeBidding::new(&mock);
        let list = UserList {
            display_name: Some("Mars".to_string()),
            ..UserList::default()
        };
        rtb.update_user_list("5", "6", &list).unwrap();
        assert_eq!(mock.requests()[0].method, Method::Put);
        assert_eq!(mock.requests()[0].path, "buyers/5/userLists/6");
    }

    #[test]
    fn status_errors_pass_through() {
        let mock = MockTransport::new();
        mock.fail(ApiError::Status {
            status: 404,
            message: "Requested entity was not found.".to_string(),
        });
        let rtb = RealTimeBidding::new(&mock);

        let err = rtb.get_buyer("42").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(mock.requests()[0].path, "buyers/42");
    }

    #[test]
    fn undecodable_body_is_a_decode_error() {
        let mock = MockTransport::new();
        mock.respond(json!({"creatives": "not-a-list"}));
        let rtb = RealTimeBidding::new(&mock);
        let err = rtb.list_creatives("1", &ListParams::default()).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
