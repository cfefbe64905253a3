pub mod get {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, found, req_str};
    use anyhow::Result;
    use rtb_argparse::{OptionSet, ParseError, ParsedArguments};
    use rtb_client::paths;
    use std::io::Write;

    struct Args {
        account_id: String,
    }

    impl Args {
        fn from_parsed(args: &ParsedArguments) -> Result<Self, ParseError> {
            Ok(Self {
                account_id: req_str(args, "account_id")?,
            })
        }
    }

    pub fn options() -> OptionSet {
        OptionSet::default().option(account_id(
            "The resource ID of the bidders resource that is being retrieved. This will be used \
             to construct the name used as a path parameter for the bidders.get request.",
        ))
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let args = Args::from_parsed(args)?;
        let name = paths::bidder(&args.account_id);
        writeln!(env.out, "Getting bidder with name \"{name}\":")?;

        let what = format!("Bidder \"{name}\"");
        let bidder = found(env.out, &what, env.rtb.get_bidder(&args.account_id))?;
        output::bidder(env.out, &bidder)?;
        Ok(())
    }
}

pub mod list {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{page_size, print_all_pages, resolve_page_size};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::ListParams;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default().option(page_size())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let params = ListParams::with_page_size(resolve_page_size(args, env)?);
        writeln!(env.out, "Listing bidders for the authorized account:")?;

        let rtb = &env.rtb;
        let count = print_all_pages(
            &mut *env.out,
            |token| rtb.list_bidders(&params.at_page(token)),
            output::bidder,
        )
        .context("failed to list bidders")?;
        if count == 0 {
            writeln!(env.out, "No bidders found.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::samples::testing::run;
    use rtb_client::{ApiError, MockTransport};
    use serde_json::json;

    #[test]
    fn get_prints_bidder() {
        let mock = MockTransport::new();
        mock.respond(json!({
            "name": "bidders/12345",
            "cookieMatchingUrl": "https://cm.example.com",
            "dealsBillingId": "99"
        }));
        let (result, out) = run("bidders.get", &["-a", "12345"], &mock);
        result.unwrap();
        assert_eq!(mock.requests()[0].path, "bidders/12345");
        assert!(out.contains("* Bidder name: bidders/12345"));
        assert!(out.contains("\t- Cookie matching URL: https://cm.example.com"));
    }

    #[test]
    fn get_reports_missing_bidder_and_fails() {
        let mock = MockTransport::new();
        mock.fail(ApiError::Status {
            status: 404,
            message: "not found".to_string(),
        });
        let (result, out) = run("bidders.get", &["--account_id=1"], &mock);
        assert!(result.is_err());
        assert!(out.contains("Bidder \"bidders/1\" was not found"));
    }

    #[test]
    fn list_uses_configured_page_size_and_reports_empty() {
        let mock = MockTransport::new();
        let (result, out) = run("bidders.list", &[], &mock);
        result.unwrap();
        assert_eq!(mock.requests()[0].query_value("pageSize"), Some("50"));
        assert!(out.contains("No bidders found."));
    }

    #[test]
    fn list_explicit_page_size_wins() {
        let mock = MockTransport::new();
        let (result, _) = run("bidders.list", &["-p", "5"], &mock);
        result.unwrap();
        assert_eq!(mock.requests()[0].query_value("pageSize"), Some("5"));
    }
}
