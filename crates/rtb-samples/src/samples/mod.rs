//! Sample implementations, one inline module per operation.
//!
//! Each operation module exposes `options()` (its declared arguments) and `run()`,
//! which reads the parsed arguments, builds the request and prints the response.

pub mod bidder_creatives;
pub mod bidders;
pub mod buyer_creatives;
pub mod buyers;
pub mod endpoints;
pub mod pretargeting_configs;
pub mod publisher_connections;
pub mod user_lists;

use crate::config::DEFAULT_MAX_PAGE_SIZE;
use crate::registry::SampleEnv;
use anyhow::Result;
use rtb_argparse::{OptionSpec, ParseError, ParsedArguments};
use rtb_client::{ApiError, ListParams, Page, for_each_page};
use std::io::{self, Write};

pub(crate) fn account_id(help: &str) -> OptionSpec {
    OptionSpec::string("account_id").short('a').required().help(help)
}

pub(crate) fn page_size() -> OptionSpec {
    OptionSpec::integer("page_size")
        .short('p')
        .default_int(DEFAULT_MAX_PAGE_SIZE)
        .help(
            "The number of rows to return per page. The server may return fewer rows than \
             specified.",
        )
}

/// `--page_size` when given explicitly, otherwise the configured maximum.
pub(crate) fn resolve_page_size(
    args: &ParsedArguments,
    env: &SampleEnv<'_>,
) -> Result<i64, ParseError> {
    if args.is_explicit("page_size") {
        args.require_int("page_size")
    } else {
        Ok(env.max_page_size)
    }
}

pub(crate) fn creative_filter() -> OptionSpec {
    OptionSpec::string("filter")
        .short('f')
        .default_str(
            "creativeServingDecision.networkPolicyCompliance.status=APPROVED AND creativeFormat=HTML",
        )
        .help(
            "Query string to filter creatives. By default only approved HTML snippet creatives \
             are returned.",
        )
}

pub(crate) fn creative_view() -> OptionSpec {
    OptionSpec::string("view")
        .short('v')
        .default_str("FULL")
        .allowed_values(["SERVING_DECISION_ONLY", "FULL"])
        .help("Controls the amount of information included in the response.")
}

/// List parameters shared by the creative list samples.
pub(crate) fn creative_list_params(
    args: &ParsedArguments,
    env: &SampleEnv<'_>,
) -> Result<ListParams, ParseError> {
    Ok(ListParams {
        page_size: Some(resolve_page_size(args, env)?),
        filter: opt_str(args, "filter"),
        view: opt_str(args, "view"),
        ..ListParams::default()
    })
}

pub(crate) fn targeting_mode() -> [&'static str; 2] {
    ["INCLUSIVE", "EXCLUSIVE"]
}

/// Suffix for generated display names and IDs, unique per run.
pub(crate) fn unique_suffix() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S%6f").to_string()
}

/// Owned copy of a repeated option's values.
pub(crate) fn list(args: &ParsedArguments, name: &str) -> Vec<String> {
    args.get_list(name).to_vec()
}

/// Owned copy of an optional string option.
pub(crate) fn opt_str(args: &ParsedArguments, name: &str) -> Option<String> {
    args.get_str(name).map(str::to_string)
}

pub(crate) fn req_str(args: &ParsedArguments, name: &str) -> Result<String, ParseError> {
    args.require_str(name).map(str::to_string)
}

/// Print every item across all pages. Returns the number of items printed.
pub(crate) fn print_all_pages<T>(
    out: &mut dyn Write,
    mut fetch: impl FnMut(Option<&str>) -> Result<Page<T>, ApiError>,
    print: fn(&mut dyn Write, &T) -> io::Result<()>,
) -> Result<usize> {
    let mut count = 0usize;
    for_each_page(
        |token| fetch(token).map_err(anyhow::Error::from),
        |items| {
            for item in &items {
                print(out, item)?;
            }
            count += items.len();
            Ok(())
        },
    )?;
    Ok(count)
}

/// Unwrap a `get` result, telling the user when the resource is missing or hidden.
pub(crate) fn found<T>(out: &mut dyn Write, what: &str, result: Result<T, ApiError>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if err.is_not_found() => {
            writeln!(out, "{what} was not found or is inaccessible to this account.")?;
            Err(anyhow::Error::new(err).context(format!("failed to get {what}")))
        }
        Err(err) => Err(anyhow::Error::new(err).context(format!("failed to get {what}"))),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::registry::{self, SampleEnv};
    use anyhow::Result;
    use rtb_argparse::ParseOutcome;
    use rtb_client::MockTransport;

    /// Run a registered sample against `mock`, returning its result and output.
    pub fn run(name: &str, argv: &[&str], mock: &MockTransport) -> (Result<()>, String) {
        let sample = registry::find(name).expect("sample is registered");
        let parsed = match sample.option_set().parse(argv).expect("arguments parse") {
            ParseOutcome::Parsed(parsed) => parsed,
            ParseOutcome::Help(text) => panic!("unexpected help:\n{text}"),
        };

        let mut buf = Vec::new();
        let result = {
            let mut env = SampleEnv::new(mock, mock, 50, &mut buf);
            (sample.run)(&parsed, &mut env)
        };
        (result, String::from_utf8(buf).expect("utf-8 output"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtb_client::MockTransport;
    use serde_json::json;

    #[test]
    fn found_reports_missing_resources() {
        let mut buf = Vec::new();
        let err = found::<()>(
            &mut buf,
            "Bidder \"bidders/1\"",
            Err(ApiError::Status {
                status: 403,
                message: "denied".to_string(),
            }),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to get"));
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("not found or is inaccessible"));
    }

    #[test]
    fn other_errors_are_not_reported_as_missing() {
        let mut buf = Vec::new();
        let result = found::<()>(&mut buf, "x", Err(ApiError::Transport("reset".to_string())));
        assert!(result.is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn unique_suffix_is_digits() {
        let suffix = unique_suffix();
        assert!(suffix.len() >= 20);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn print_all_pages_counts_every_page() {
        let mock = MockTransport::new();
        mock.respond(json!({"buyers": [{"name": "buyers/1"}], "nextPageToken": "n"}))
            .respond(json!({"buyers": [{"name": "buyers/2"}, {"name": "buyers/3"}]}));
        let rtb = rtb_client::RealTimeBidding::new(&mock);
        let params = rtb_client::ListParams::with_page_size(2);
        let mut buf = Vec::new();

        let count = print_all_pages(
            &mut buf,
            |token| rtb.list_buyers(&params.at_page(token)),
            crate::output::buyer,
        )
        .unwrap();
        assert_eq!(count, 3);
        assert_eq!(mock.request_count(), 2);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("buyers/3"));
    }
}
