//! Resource names, built by interpolating account and resource IDs.

pub fn bidder(account_id: &str) -> String {
    format!("bidders/{account_id}")
}

pub fn endpoint(account_id: &str, endpoint_id: &str) -> String {
    format!("bidders/{account_id}/endpoints/{endpoint_id}")
}

pub fn pretargeting_config(account_id: &str, config_id: &str) -> String {
    format!("bidders/{account_id}/pretargetingConfigs/{config_id}")
}

pub fn publisher_connection(account_id: &str, connection_id: &str) -> String {
    format!("bidders/{account_id}/publisherConnections/{connection_id}")
}

pub fn buyer(account_id: &str) -> String {
    format!("buyers/{account_id}")
}

pub fn buyer_creative(account_id: &str, creative_id: &str) -> String {
    format!("buyers/{account_id}/creatives/{creative_id}")
}

pub fn user_list(account_id: &str, user_list_id: &str) -> String {
    format!("buyers/{account_id}/userLists/{user_list_id}")
}
