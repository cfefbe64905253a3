pub mod list {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{
        account_id, creative_filter, creative_list_params, creative_view, page_size,
        print_all_pages, req_str,
    };
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(account_id(
                "The resource ID of the bidders resource under which the creatives were created.",
            ))
            .option(page_size())
            .option(creative_filter())
            .option(creative_view())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let params = creative_list_params(args, env)?;
        writeln!(env.out, "Listing creatives for bidder account \"{account_id}\":")?;

        let rtb = &env.rtb;
        let count = print_all_pages(
            &mut *env.out,
            |token| rtb.list_bidder_creatives(&account_id, &params.at_page(token)),
            output::creative,
        )
        .context("failed to list bidder creatives")?;
        if count == 0 {
            writeln!(env.out, "No creatives found for bidder account.")?;
        }
        Ok(())
    }
}

pub mod watch {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, req_str};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::paths;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default().option(account_id(
            "The resource ID of the bidders resource for which creative status changes are \
             watched. Changes for the bidder and all of its child buyers are published to the \
             returned Pub/Sub topic.",
        ))
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        writeln!(
            env.out,
            "Watching creative status changes for bidder account with name \"{}\":",
            paths::bidder(&account_id)
        )?;
        let response = env
            .rtb
            .watch_creatives(&account_id)
            .context("failed to watch creatives")?;
        output::watch_response(env.out, &response)?;
        Ok(())
    }
}

pub mod pull {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::req_str;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, OptionSpec, ParseError, ParsedArguments};
    use rtb_client::model::CreativeServingDecision;
    use std::io::Write;

    struct Args {
        subscription_name: String,
        max_messages: i64,
        acknowledge: bool,
    }

    impl Args {
        fn from_parsed(args: &ParsedArguments) -> Result<Self, ParseError> {
            Ok(Self {
                subscription_name: req_str(args, "subscription_name")?,
                max_messages: args.require_int("max_messages")?,
                acknowledge: args.get_bool("acknowledge"),
            })
        }
    }

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(
                OptionSpec::string("subscription_name")
                    .short('s')
                    .required()
                    .help(
                        "The Pub/Sub subscription to pull from, as returned by \
                         bidders.creatives.watch: projects/{project}/subscriptions/{subscription}.",
                    ),
            )
            .option(
                OptionSpec::integer("max_messages")
                    .short('m')
                    .default_int(100)
                    .help("The maximum number of messages to pull from the subscription."),
            )
            .option(OptionSpec::boolean("acknowledge").short('a').help(
                "Acknowledge the pulled messages so they are not delivered again.",
            ))
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let args = Args::from_parsed(args)?;
        let subscription = args.subscription_name.as_str();
        writeln!(env.out, "Retrieving messages from subscription: \"{subscription}\"")?;

        let messages = env
            .pubsub
            .pull(subscription, args.max_messages)
            .with_context(|| format!("failed to pull from {subscription}"))?;
        if messages.is_empty() {
            writeln!(env.out, "No messages received from the subscription.")?;
            return Ok(());
        }

        let mut ack_ids = Vec::with_capacity(messages.len());
        for received in messages {
            let message = &received.message;
            writeln!(
                env.out,
                "* Creative found for buyer account ID \"{}\" with creative ID \"{}\" has been \
                 updated with the following creative status:",
                message.attribute("accountId").unwrap_or("unknown"),
                message.attribute("creativeId").unwrap_or("unknown"),
            )?;
            match message.decode_data::<CreativeServingDecision>() {
                Ok(Some(decision)) => output::serving_decision(env.out, &decision)?,
                Ok(None) => writeln!(env.out, "\t(no serving decision in message)")?,
                Err(err) => {
                    tracing::warn!(
                        ack_id = %received.ack_id,
                        "skipping undecodable message: {err}"
                    );
                    writeln!(env.out, "\t(message data could not be decoded)")?;
                }
            }
            ack_ids.push(received.ack_id);
        }

        if args.acknowledge {
            writeln!(
                env.out,
                "Acknowledging all {} messages pulled from the subscription.",
                ack_ids.len()
            )?;
            env.pubsub
                .acknowledge(subscription, ack_ids)
                .context("failed to acknowledge messages")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::samples::testing::run;
    use rtb_client::MockTransport;
    use serde_json::json;

    const SUBSCRIPTION: &str = "projects/realtimebidding-pubsub/subscriptions/sub-1";

    fn notification() -> serde_json::Value {
        // base64 of {"networkPolicyCompliance":{"status":"DISAPPROVED"}}
        json!({
            "receivedMessages": [{
                "ackId": "ack-1",
                "message": {
                    "data": "eyJuZXR3b3JrUG9saWN5Q29tcGxpYW5jZSI6eyJzdGF0dXMiOiJESVNBUFBST1ZFRCJ9fQ==",
                    "attributes": {"accountId": "7", "creativeId": "c9"}
                }
            }]
        })
    }

    #[test]
    fn pull_prints_decoded_status_without_acknowledging() {
        let mock = MockTransport::new();
        mock.respond(notification());
        let (result, out) = run(
            "bidders.creatives.pull_watched_creatives_subscription",
            &["-s", SUBSCRIPTION, "-m", "5"],
            &mock,
        );
        result.unwrap();
        assert!(out.contains("buyer account ID \"7\" with creative ID \"c9\""));
        assert!(out.contains("\tNetwork policy compliance: DISAPPROVED"));
        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, Some(json!({"maxMessages": 5})));
    }

    #[test]
    fn pull_acknowledges_when_asked() {
        let mock = MockTransport::new();
        mock.respond(notification());
        let (result, out) = run(
            "bidders.creatives.pull_watched_creatives_subscription",
            &["-s", SUBSCRIPTION, "--acknowledge"],
            &mock,
        );
        result.unwrap();
        assert!(out.contains("Acknowledging all 1 messages"));
        let requests = mock.requests();
        assert_eq!(requests[0].body, Some(json!({"maxMessages": 100})));
        assert_eq!(requests[1].path, format!("{SUBSCRIPTION}:acknowledge"));
        assert_eq!(requests[1].body, Some(json!({"ackIds": ["ack-1"]})));
    }

    #[test]
    fn pull_with_no_messages() {
        let mock = MockTransport::new();
        let (result, out) = run(
            "bidders.creatives.pull_watched_creatives_subscription",
            &["-s", SUBSCRIPTION, "-a"],
            &mock,
        );
        result.unwrap();
        assert!(out.contains("No messages received"));
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn watch_prints_topic_and_subscription() {
        let mock = MockTransport::new();
        mock.respond(json!({
            "topic": "projects/realtimebidding-pubsub/topics/t",
            "subscription": SUBSCRIPTION
        }));
        let (result, out) = run("bidders.creatives.watch", &["-a", "7"], &mock);
        result.unwrap();
        assert_eq!(mock.requests()[0].path, "bidders/7/creatives:watch");
        assert!(out.contains(&format!("\t- Pub/Sub subscription: {SUBSCRIPTION}")));
    }

    #[test]
    fn list_sends_filter_and_view() {
        let mock = MockTransport::new();
        let argv = ["-a", "7", "--view=serving_decision_only", "-f", "creativeFormat=VIDEO"];
        let (result, out) = run("bidders.creatives.list", &argv, &mock);
        result.unwrap();
        let request = &mock.requests()[0];
        assert_eq!(request.path, "bidders/7/creatives");
        assert_eq!(request.query_value("view"), Some("SERVING_DECISION_ONLY"));
        assert_eq!(request.query_value("filter"), Some("creativeFormat=VIDEO"));
        assert!(out.contains("No creatives found for bidder account."));
    }
}
