fn connection_ids() -> rtb_argparse::OptionSpec {
    rtb_argparse::OptionSpec::repeated("publisher_connection_ids")
        .short('p')
        .required()
        .value_name("ID")
        .help("Resource IDs of the publisher connections. Repeat the flag for each ID.")
}

fn print_batch(
    out: &mut dyn std::io::Write,
    response: &rtb_client::model::BatchPublisherConnectionsResponse,
) -> std::io::Result<()> {
    for connection in &response.publisher_connections {
        crate::output::publisher_connection(out, connection)?;
    }
    Ok(())
}

pub mod get {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, found, req_str};
    use anyhow::Result;
    use rtb_argparse::{OptionSet, OptionSpec, ParsedArguments};
    use rtb_client::paths;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(account_id(
                "The resource ID of the bidders resource under which the publisher connection \
                 exists.",
            ))
            .option(
                OptionSpec::string("publisher_connection_id")
                    .short('p')
                    .required()
                    .help("The resource ID of the publisher connection that is being retrieved."),
            )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let connection_id = req_str(args, "publisher_connection_id")?;
        let name = paths::publisher_connection(&account_id, &connection_id);
        writeln!(env.out, "Getting publisher connection with name \"{name}\":")?;

        let what = format!("Publisher connection \"{name}\"");
        let result = env.rtb.get_publisher_connection(&account_id, &connection_id);
        let connection = found(env.out, &what, result)?;
        output::publisher_connection(env.out, &connection)?;
        Ok(())
    }
}

pub mod list {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{
        account_id, opt_str, page_size, print_all_pages, req_str, resolve_page_size,
    };
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, OptionSpec, ParsedArguments};
    use rtb_client::ListParams;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(account_id(
                "The resource ID of the bidders resource under which the publisher connections \
                 exist.",
            ))
            .option(
                OptionSpec::string("filter")
                    .short('f')
                    .default_str("publisherPlatform = GOOGLE_AD_MANAGER")
                    .help("Query string used to filter publisher connections."),
            )
            .option(
                OptionSpec::string("order_by")
                    .short('o')
                    .default_str("createTime DESC")
                    .help("Field and direction used to order the results."),
            )
            .option(page_size())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let params = ListParams {
            page_size: Some(resolve_page_size(args, env)?),
            filter: opt_str(args, "filter"),
            order_by: opt_str(args, "order_by"),
            ..ListParams::default()
        };
        writeln!(
            env.out,
            "Listing publisher connections for bidder account \"{account_id}\":"
        )?;

        let rtb = &env.rtb;
        let count = print_all_pages(
            &mut *env.out,
            |token| rtb.list_publisher_connections(&account_id, &params.at_page(token)),
            output::publisher_connection,
        )
        .context("failed to list publisher connections")?;
        if count == 0 {
            writeln!(env.out, "No publisher connections found for bidder account.")?;
        }
        Ok(())
    }
}

pub mod batch_approve {
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, list, req_str};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::paths;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(account_id(
                "The resource ID of the bidders resource under which the publisher connections \
                 exist.",
            ))
            .option(super::connection_ids())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let ids = list(args, "publisher_connection_ids");
        writeln!(
            env.out,
            "Batch approving publisher connections for bidder with name \"{}\":",
            paths::bidder(&account_id)
        )?;
        let response = env
            .rtb
            .batch_approve_publisher_connections(&account_id, &ids)
            .context("failed to approve publisher connections")?;
        super::print_batch(env.out, &response)?;
        Ok(())
    }
}

pub mod batch_reject {
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, list, req_str};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::paths;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(account_id(
                "The resource ID of the bidders resource under which the publisher connections \
                 exist.",
            ))
            .option(super::connection_ids())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let ids = list(args, "publisher_connection_ids");
        writeln!(
            env.out,
            "Batch rejecting publisher connections for bidder with name \"{}\":",
            paths::bidder(&account_id)
        )?;
        let response = env
            .rtb
            .batch_reject_publisher_connections(&account_id, &ids)
            .context("failed to reject publisher connections")?;
        super::print_batch(env.out, &response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::samples::testing::run;
    use rtb_client::{MockTransport, Method};
    use serde_json::json;

    #[test]
    fn list_sends_default_filter_and_order() {
        let mock = MockTransport::new();
        mock.respond(json!({"publisherConnections": [{
            "name": "bidders/1/publisherConnections/pub-1",
            "biddingState": "APPROVED"
        }]}));
        let (result, out) = run("bidders.publisher_connections.list", &["-a", "1"], &mock);
        result.unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.path, "bidders/1/publisherConnections");
        assert_eq!(
            request.query_value("filter"),
            Some("publisherPlatform = GOOGLE_AD_MANAGER")
        );
        assert_eq!(request.query_value("orderBy"), Some("createTime DESC"));
        assert!(out.contains("\t- Bidding state: APPROVED"));
    }

    #[test]
    fn batch_approve_sends_full_names() {
        let mock = MockTransport::new();
        mock.respond(json!({"publisherConnections": [
            {"name": "bidders/1/publisherConnections/a", "biddingState": "APPROVED"},
            {"name": "bidders/1/publisherConnections/b", "biddingState": "APPROVED"}
        ]}));
        let argv = ["-a", "1", "-p", "a", "-p", "b"];
        let (result, out) = run("bidders.publisher_connections.batch_approve", &argv, &mock);
        result.unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "bidders/1/publisherConnections:batchApprove");
        assert_eq!(
            request.body,
            Some(json!({"names": [
                "bidders/1/publisherConnections/a",
                "bidders/1/publisherConnections/b"
            ]}))
        );
        assert_eq!(out.matches("* Publisher connection name:").count(), 2);
    }

    #[test]
    fn batch_reject_posts_to_reject_verb() {
        let mock = MockTransport::new();
        let argv = ["-a", "1", "--publisher_connection_ids", "a"];
        let (result, _) = run("bidders.publisher_connections.batch_reject", &argv, &mock);
        result.unwrap();
        assert_eq!(mock.requests()[0].path, "bidders/1/publisherConnections:batchReject");
    }

    #[test]
    fn get_builds_connection_name() {
        let mock = MockTransport::new();
        mock.respond(json!({"name": "bidders/1/publisherConnections/a"}));
        let (result, _) = run("bidders.publisher_connections.get", &["-a", "1", "-p", "a"], &mock);
        result.unwrap();
        assert_eq!(mock.requests()[0].path, "bidders/1/publisherConnections/a");
    }
}
