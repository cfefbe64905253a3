//! Declarative, typed option parsing and help rendering.
//!
//! Each command declares an [`OptionSet`] of [`OptionSpec`]s; [`OptionSet::parse`]
//! turns argv into [`ParsedArguments`] (every declared option present, default or parsed),
//! a help request, or a single [`ParseError`] listing every input problem at once.
//!
//! ```
//! use rtb_argparse::{OptionSet, OptionSpec, ParseOutcome};
//!
//! let set = OptionSet::new("list-endpoints")
//!     .option(OptionSpec::string("account_id").short('a').required())
//!     .option(OptionSpec::integer("page_size").short('p').default_int(50));
//!
//! let ParseOutcome::Parsed(args) = set.parse(["--account_id=123"]).unwrap() else {
//!     panic!("expected parsed arguments");
//! };
//! assert_eq!(args.get_str("account_id"), Some("123"));
//! assert_eq!(args.get_int("page_size"), Some(50));
//! ```

mod error;
mod help;
mod options;
mod parsed;
mod parser;

pub use error::{ParseError, Problem};
pub use options::{OptionSet, OptionSpec, OptionValue, ValueType};
pub use parsed::ParsedArguments;
pub use parser::ParseOutcome;

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> OptionSet {
        OptionSet::new("bidders.endpoints.list")
            .summary("List endpoints for a bidder")
            .option(
                OptionSpec::string("account_id")
                    .short('a')
                    .required()
                    .help("Bidder account ID"),
            )
            .option(
                OptionSpec::integer("page_size")
                    .short('p')
                    .default_int(50)
                    .help("Rows per page"),
            )
    }

    fn parsed(set: &OptionSet, argv: &[&str]) -> ParsedArguments {
        match set.parse(argv) {
            Ok(ParseOutcome::Parsed(args)) => args,
            other => panic!("expected Parsed, got: {other:?}"),
        }
    }

    fn failed(set: &OptionSet, argv: &[&str]) -> ParseError {
        match set.parse(argv) {
            Err(err) => err,
            other => panic!("expected failure, got: {other:?}"),
        }
    }

    #[test]
    fn required_present_fills_defaults() {
        let args = parsed(&endpoints(), &["--account_id=123"]);
        assert_eq!(args.get_str("account_id"), Some("123"));
        assert_eq!(args.get_int("page_size"), Some(50));
        assert!(args.is_explicit("account_id"));
        assert!(!args.is_explicit("page_size"));
    }

    #[test]
    fn missing_required_fails() {
        let err = failed(&endpoints(), &["--page_size=10"]);
        assert_eq!(err.missing_required(), vec!["account_id"]);
        assert!(err.to_string().contains("missing required argument: --account_id"));
    }

    #[test]
    fn help_short_circuits_required_checks() {
        let outcome = endpoints().parse(["-h"]).unwrap();
        let ParseOutcome::Help(text) = outcome else {
            panic!("expected Help");
        };
        assert!(text.contains("--account_id"));
        assert!(text.contains("Bidder account ID"));
        assert!(text.contains("--page_size"));
        assert!(text.contains("Rows per page"));
    }

    #[test]
    fn empty_input_without_required_options_uses_defaults() {
        let set = OptionSet::new("cmd")
            .option(OptionSpec::string("filter").default_str("state = ACTIVE"))
            .option(OptionSpec::string("order_by"))
            .option(OptionSpec::boolean("acknowledge"))
            .option(OptionSpec::repeated("ids"));
        let args = parsed(&set, &[]);
        assert_eq!(args.len(), 4);
        assert!(args.contains("order_by"));
        assert_eq!(args.get_str("filter"), Some("state = ACTIVE"));
        assert_eq!(args.get("order_by"), None);
        assert!(!args.get_bool("acknowledge"));
        assert!(args.get_list("ids").is_empty());

        let names: Vec<&str> = args.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["filter", "order_by", "acknowledge", "ids"]);
    }

    #[test]
    fn empty_input_with_required_option_fails() {
        let err = failed(&endpoints(), &[]);
        assert_eq!(err.missing_required(), vec!["account_id"]);
    }

    #[test]
    fn short_alias_and_separate_value() {
        let args = parsed(&endpoints(), &["-a", "42", "-p", "7"]);
        assert_eq!(args.get_str("account_id"), Some("42"));
        assert_eq!(args.get_int("page_size"), Some(7));
    }

    #[test]
    fn single_dash_long_name_is_accepted() {
        let args = parsed(&endpoints(), &["-account_id=9", "--page_size", "3"]);
        assert_eq!(args.get_str("account_id"), Some("9"));
        assert_eq!(args.get_int("page_size"), Some(3));
    }

    #[test]
    fn integer_coercion_failure_names_option() {
        let err = failed(&endpoints(), &["-a", "1", "--page_size=ten"]);
        match &err.problems()[0] {
            Problem::InvalidValue { option, value, .. } => {
                assert_eq!(option, "page_size");
                assert_eq!(value, "ten");
            }
            other => panic!("expected InvalidValue, got: {other:?}"),
        }
    }

    #[test]
    fn repeated_values_keep_order_and_duplicates() {
        let set = OptionSet::new("cmd").option(OptionSpec::repeated("web_targeting_urls"));
        let args = parsed(
            &set,
            &[
                "--web_targeting_urls=a.com",
                "--web_targeting_urls",
                "b.com",
                "--web_targeting_urls=a.com",
            ],
        );
        assert_eq!(args.get_list("web_targeting_urls"), ["a.com", "b.com", "a.com"]);
    }

    #[test]
    fn allowed_values_are_case_insensitive_and_normalized() {
        let set = OptionSet::new("cmd").option(
            OptionSpec::string("view")
                .allowed_values(["FULL", "SERVING_DECISION_ONLY"])
                .default_str("FULL"),
        );
        let args = parsed(&set, &["--view=serving_decision_only"]);
        assert_eq!(args.get_str("view"), Some("SERVING_DECISION_ONLY"));
    }

    #[test]
    fn disallowed_value_reports_value_and_allowed_set() {
        let set = OptionSet::new("cmd").option(
            OptionSpec::string("view").allowed_values(["FULL", "SERVING_DECISION_ONLY"]),
        );
        let err = failed(&set, &["--view=partial"]);
        let msg = err.to_string();
        assert!(msg.contains("'partial'"), "{msg}");
        assert!(msg.contains("FULL, SERVING_DECISION_ONLY"), "{msg}");
    }

    #[test]
    fn allowed_values_checked_per_repeated_element() {
        let set = OptionSet::new("cmd").option(
            OptionSpec::repeated("included_formats").allowed_values(["HTML", "NATIVE", "VAST"]),
        );
        let err = failed(
            &set,
            &[
                "--included_formats=html",
                "--included_formats=banner",
                "--included_formats=Vast",
            ],
        );
        assert_eq!(err.problems().len(), 1);
        assert!(matches!(
            &err.problems()[0],
            Problem::DisallowedValue { value, .. } if value == "banner"
        ));

        let args = parsed(&set, &["--included_formats=html", "--included_formats=Vast"]);
        assert_eq!(args.get_list("included_formats"), ["HTML", "VAST"]);
    }

    #[test]
    fn allowed_values_apply_to_integer_and_boolean_options() {
        let set = OptionSet::new("cmd")
            .option(OptionSpec::integer("decile").allowed_values(["1", "5", "10"]))
            .option(OptionSpec::boolean("ack").allowed_values(["true"]));

        let err = failed(&set, &["--decile=7", "--ack=false"]);
        assert_eq!(err.problems().len(), 2);
        assert!(matches!(
            &err.problems()[0],
            Problem::DisallowedValue { option, value, .. } if option == "decile" && value == "7"
        ));
        assert!(matches!(
            &err.problems()[1],
            Problem::DisallowedValue { option, value, .. } if option == "ack" && value == "false"
        ));

        let args = parsed(&set, &["--decile=10", "--ack"]);
        assert_eq!(args.get_int("decile"), Some(10));
        assert!(args.get_bool("ack"));
    }

    #[test]
    fn unknown_tokens_are_collected_together_with_missing_required() {
        let err = failed(&endpoints(), &["--bogus=1", "stray", "-z"]);
        assert_eq!(err.unknown_tokens(), vec!["--bogus=1", "stray", "-z"]);
        assert_eq!(err.missing_required(), vec!["account_id"]);
        assert_eq!(err.problems().len(), 4);
    }

    #[test]
    fn boolean_flags_are_presence_based() {
        let set = OptionSet::new("cmd")
            .option(OptionSpec::boolean("acknowledge").short('k'))
            .option(OptionSpec::string("subscription_name").short('s'));
        let args = parsed(&set, &["-k", "-s", "projects/p/subscriptions/s"]);
        assert!(args.get_bool("acknowledge"));
        assert_eq!(args.get_str("subscription_name"), Some("projects/p/subscriptions/s"));

        let args = parsed(&set, &["--acknowledge=false"]);
        assert!(!args.get_bool("acknowledge"));

        let err = failed(&set, &["--acknowledge=maybe"]);
        assert!(matches!(&err.problems()[0], Problem::InvalidValue { .. }));
    }

    #[test]
    fn trailing_value_option_reports_missing_value() {
        let err = failed(&endpoints(), &["--account_id"]);
        assert!(matches!(
            &err.problems()[0],
            Problem::MissingValue { flag } if flag == "--account_id"
        ));
    }

    #[test]
    fn last_value_wins_for_single_options() {
        let args = parsed(&endpoints(), &["-a", "1", "--account_id=2"]);
        assert_eq!(args.get_str("account_id"), Some("2"));
    }

    #[test]
    fn required_option_ignores_default_when_absent() {
        let set = OptionSet::new("cmd").option(
            OptionSpec::string("account_id")
                .required()
                .default_str("ENTER_BIDDER_RESOURCE_ID_HERE"),
        );
        let err = failed(&set, &[]);
        assert_eq!(err.missing_required(), vec!["account_id"]);
    }

    #[test]
    fn conflicting_short_aliases_are_definition_errors() {
        let set = OptionSet::new("cmd")
            .option(OptionSpec::string("account_id").short('a'))
            .option(OptionSpec::boolean("acknowledge").short('a'));
        let err = failed(&set, &[]);
        assert!(matches!(err, ParseError::Definition(_)));
    }

    #[test]
    fn declared_h_alias_shadows_builtin_short_help() {
        let set = OptionSet::new("cmd").option(OptionSpec::integer("html_height").short('h'));
        let args = parsed(&set, &["-h", "250"]);
        assert_eq!(args.get_int("html_height"), Some(250));

        let outcome = set.parse(["--help"]).unwrap();
        assert!(matches!(outcome, ParseOutcome::Help(_)));
    }

    #[test]
    fn help_lists_type_marker_default_and_allowed_values() {
        let set = OptionSet::new("bidders.creatives.list")
            .summary("List creatives")
            .usage("rtb-samples run bidders.creatives.list [OPTIONS]")
            .option(OptionSpec::string("account_id").short('a').required().help("Bidder"))
            .option(
                OptionSpec::string("view")
                    .short('v')
                    .allowed_values(["FULL", "SERVING_DECISION_ONLY"])
                    .default_str("FULL")
                    .help("Response view"),
            )
            .option(OptionSpec::repeated("ids").help("IDs"))
            .option(OptionSpec::boolean("acknowledge"));
        let text = set.render_help();

        assert!(text.starts_with("bidders.creatives.list - List creatives\n"));
        assert!(text.contains("Usage: rtb-samples run bidders.creatives.list [OPTIONS]"));
        assert!(text.contains("-a, --account_id <STRING>"));
        assert!(text.contains("Bidder (required)"));
        assert!(text.contains("[possible values: FULL, SERVING_DECISION_ONLY]"));
        assert!(text.contains("[default: FULL]"));
        assert!(text.contains("--ids <STRING>..."));
        assert!(text.contains("--acknowledge[=<BOOLEAN>]"));
        assert!(text.contains("-h, --help"));

        let account = text.find("--account_id").unwrap();
        let view = text.find("--view").unwrap();
        let ids = text.find("--ids").unwrap();
        assert!(account < view && view < ids);
    }

    #[test]
    fn option_set_serializes_to_json() {
        let json = serde_json::to_value(endpoints()).unwrap();
        assert_eq!(json["name"], "bidders.endpoints.list");
        assert_eq!(json["options"][0]["name"], "account_id");
        assert_eq!(json["options"][0]["short"], "a");
        assert_eq!(json["options"][1]["value-type"], "integer");
        assert_eq!(json["options"][1]["default"], 50);
    }
}
