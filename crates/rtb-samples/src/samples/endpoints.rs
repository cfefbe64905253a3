fn endpoint_id() -> rtb_argparse::OptionSpec {
    rtb_argparse::OptionSpec::string("endpoint_id")
        .short('e')
        .required()
        .help("The resource ID of the endpoints resource.")
}

pub mod get {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, found, req_str};
    use anyhow::Result;
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::paths;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(account_id(
                "The resource ID of the bidders resource under which the endpoint exists.",
            ))
            .option(super::endpoint_id())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let endpoint_id = req_str(args, "endpoint_id")?;
        let name = paths::endpoint(&account_id, &endpoint_id);
        writeln!(env.out, "Getting endpoint with name \"{name}\":")?;

        let what = format!("Endpoint \"{name}\"");
        let endpoint = found(env.out, &what, env.rtb.get_endpoint(&account_id, &endpoint_id))?;
        output::endpoint(env.out, &endpoint)?;
        Ok(())
    }
}

pub mod list {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, page_size, print_all_pages, req_str, resolve_page_size};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::ListParams;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(account_id(
                "The resource ID of the bidders resource under which the endpoints exist.",
            ))
            .option(page_size())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let params = ListParams::with_page_size(resolve_page_size(args, env)?);
        writeln!(env.out, "Listing endpoints for bidder account \"{account_id}\":")?;

        let rtb = &env.rtb;
        let count = print_all_pages(
            &mut *env.out,
            |token| rtb.list_endpoints(&account_id, &params.at_page(token)),
            output::endpoint,
        )
        .context("failed to list endpoints")?;
        if count == 0 {
            writeln!(env.out, "No endpoints found for bidder account.")?;
        }
        Ok(())
    }
}

pub mod patch {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, req_str};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, OptionSpec, ParseError, ParsedArguments};
    use rtb_client::model::Endpoint;
    use rtb_client::paths;
    use std::io::Write;

    const UPDATE_MASK: &str = "maximumQps,tradingLocation,bidProtocol";

    struct Args {
        account_id: String,
        endpoint_id: String,
        bid_protocol: String,
        maximum_qps: i64,
        trading_location: String,
    }

    impl Args {
        fn from_parsed(args: &ParsedArguments) -> Result<Self, ParseError> {
            Ok(Self {
                account_id: req_str(args, "account_id")?,
                endpoint_id: req_str(args, "endpoint_id")?,
                bid_protocol: req_str(args, "bid_protocol")?,
                maximum_qps: args.require_int("maximum_qps")?,
                trading_location: req_str(args, "trading_location")?,
            })
        }
    }

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(account_id(
                "The resource ID of the bidders resource under which the endpoint exists.",
            ))
            .option(super::endpoint_id())
            .option(
                OptionSpec::string("bid_protocol")
                    .short('b')
                    .default_str("GOOGLE_RTB")
                    .allowed_values(["GOOGLE_RTB", "OPENRTB_JSON", "OPENRTB_PROTOBUF"])
                    .help("The real-time bidding protocol that the endpoint is using."),
            )
            .option(
                OptionSpec::integer("maximum_qps")
                    .short('m')
                    .default_int(1)
                    .help(
                        "The maximum number of queries per second allowed to be sent to the \
                         endpoint.",
                    ),
            )
            .option(
                OptionSpec::string("trading_location")
                    .short('t')
                    .default_str("US_EAST")
                    .allowed_values(["US_WEST", "US_EAST", "EUROPE", "ASIA"])
                    .help("Region where the endpoint and its infrastructure are located."),
            )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let args = Args::from_parsed(args)?;
        let name = paths::endpoint(&args.account_id, &args.endpoint_id);
        let body = Endpoint {
            maximum_qps: Some(args.maximum_qps.to_string()),
            trading_location: Some(args.trading_location),
            bid_protocol: Some(args.bid_protocol),
            ..Endpoint::default()
        };

        writeln!(env.out, "Patching an endpoint with name \"{name}\":")?;
        let endpoint = env
            .rtb
            .patch_endpoint(&args.account_id, &args.endpoint_id, &body, UPDATE_MASK)
            .with_context(|| format!("failed to patch endpoint {name}"))?;
        output::endpoint(env.out, &endpoint)?;
        Ok(())
    }
}
