pub mod get {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, found, req_str};
    use anyhow::Result;
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::paths;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default().option(account_id(
            "The resource ID of the buyers resource that is being retrieved. This will be used \
             to construct the name used as a path parameter for the buyers.get request.",
        ))
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let name = paths::buyer(&account_id);
        writeln!(env.out, "Getting buyer with name \"{name}\":")?;

        let what = format!("Buyer \"{name}\"");
        let buyer = found(env.out, &what, env.rtb.get_buyer(&account_id))?;
        output::buyer(env.out, &buyer)?;
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
        writeln!(env.out, "Listing buyers for the authorized account:")?;

        let rtb = &env.rtb;
        let count = print_all_pages(
            &mut *env.out,
            |token| rtb.list_buyers(&params.at_page(token)),
            output::buyer,
        )
        .context("failed to list buyers")?;
        if count == 0 {
            writeln!(env.out, "No buyers found.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::samples::testing::run;
    use rtb_client::MockTransport;
    use serde_json::json;

    #[test]
    fn get_prints_buyer() {
        let mock = MockTransport::new();
        mock.respond(json!({
            "name": "buyers/77",
            "displayName": "Mars Cruises",
            "billingIds": ["1", "2"]
        }));
        let (result, out) = run("buyers.get", &["-a", "77"], &mock);
        result.unwrap();
        assert!(out.contains("* Buyer name: buyers/77"));
        assert!(out.contains("\t- Billing IDs: 1, 2"));
    }

    #[test]
    fn list_pages_until_token_runs_out() {
        let mock = MockTransport::new();
        mock.respond(json!({"buyers": [{"name": "buyers/1"}], "nextPageToken": "t"}))
            .respond(json!({"buyers": [{"name": "buyers/2"}], "nextPageToken": ""}));
        let (result, out) = run("buyers.list", &[], &mock);
        result.unwrap();
        assert_eq!(mock.request_count(), 2);
        assert_eq!(mock.requests()[1].query_value("pageToken"), Some("t"));
        assert!(out.contains("buyers/1") && out.contains("buyers/2"));
    }
}
