use crate::samples::{opt_str, req_str, unique_suffix};
use chrono::{Datelike, Days, Local, NaiveDate};
use rtb_argparse::{OptionSet, OptionSpec, ParseError, ParsedArguments, Problem};
use rtb_client::model::{Date, UrlRestriction, UserList};

const RESTRICTION_TYPES: [&str; 8] = [
    "CONTAINS",
    "EQUALS",
    "STARTS_WITH",
    "ENDS_WITH",
    "DOES_NOT_EQUAL",
    "DOES_NOT_CONTAIN",
    "DOES_NOT_START_WITH",
    "DOES_NOT_END_WITH",
];

fn user_list_id() -> OptionSpec {
    OptionSpec::string("user_list_id")
        .short('u')
        .required()
        .help("The resource ID of the buyers.userLists resource.")
}

fn user_list_account_id() -> OptionSpec {
    crate::samples::account_id(
        "The resource ID of the buyers resource under which the user list was created.",
    )
}

fn date_options(set: OptionSet, which: &str, default: NaiveDate) -> OptionSet {
    set.option(
        OptionSpec::integer(format!("{which}_day"))
            .default_int(i64::from(default.day()))
            .help(format!("Day of the month of the URL restriction's {which} date.")),
    )
    .option(
        OptionSpec::integer(format!("{which}_month"))
            .default_int(i64::from(default.month()))
            .help(format!("Month (1-12) of the URL restriction's {which} date.")),
    )
    .option(
        OptionSpec::integer(format!("{which}_year"))
            .default_int(i64::from(default.year()))
            .help(format!("Year of the URL restriction's {which} date.")),
    )
}

/// Options shared by create and update. The restriction starts today and ends
/// tomorrow unless dates are given.
fn body_options(set: OptionSet) -> OptionSet {
    let today = Local::now().date_naive();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);

    let set = set
        .option(OptionSpec::string("display_name").short('n').help(
            "The display name of the user list. Defaults to a generated name.",
        ))
        .option(
            OptionSpec::string("description")
                .short('d')
                .help("The description of the user list."),
        )
        .option(
            OptionSpec::string("url")
                .default_str("https://luxurymarscruises.com")
                .help("The URL to use for applying the URL restriction on the user list."),
        )
        .option(
            OptionSpec::string("restriction_type")
                .short('r')
                .default_str("EQUALS")
                .allowed_values(RESTRICTION_TYPES)
                .help("The restriction type for the specified URL."),
        );
    let set = date_options(set, "start", today);
    date_options(set, "end", tomorrow)
}

/// Read `{which}_year/month/day` and reject dates that are not on the calendar.
fn date(args: &ParsedArguments, which: &str) -> Result<Date, ParseError> {
    let year = args.require_int(&format!("{which}_year"))?;
    let month = args.require_int(&format!("{which}_month"))?;
    let day = args.require_int(&format!("{which}_day"))?;

    let valid = i32::try_from(year)
        .ok()
        .zip(u32::try_from(month).ok())
        .zip(u32::try_from(day).ok())
        .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d));
    match valid {
        Some(date) => Ok(Date {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }),
        None => Err(ParseError::from(Problem::InvalidValue {
            option: format!("{which}_year/{which}_month/{which}_day"),
            value: format!("{year}-{month:02}-{day:02}"),
            expected: "a valid calendar date",
        })),
    }
}

fn user_list_body(args: &ParsedArguments) -> Result<UserList, ParseError> {
    Ok(UserList {
        display_name: Some(
            opt_str(args, "display_name")
                .unwrap_or_else(|| format!("Test UserList #{}", unique_suffix())),
        ),
        description: opt_str(args, "description"),
        url_restriction: Some(UrlRestriction {
            url: opt_str(args, "url"),
            restriction_type: opt_str(args, "restriction_type"),
            start_date: Some(date(args, "start")?),
            end_date: Some(date(args, "end")?),
        }),
        ..UserList::default()
    })
}

fn user_list_ref(args: &ParsedArguments) -> Result<(String, String), ParseError> {
    Ok((req_str(args, "account_id")?, req_str(args, "user_list_id")?))
}

pub mod get {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::found;
    use anyhow::Result;
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::paths;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(super::user_list_account_id())
            .option(super::user_list_id())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let (account_id, user_list_id) = super::user_list_ref(args)?;
        let name = paths::user_list(&account_id, &user_list_id);
        writeln!(env.out, "Getting user list with name \"{name}\":")?;

        let what = format!("User list \"{name}\"");
        let user_list = found(env.out, &what, env.rtb.get_user_list(&account_id, &user_list_id))?;
        output::user_list(env.out, &user_list)?;
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
                "The resource ID of the buyers resource under which the user lists were created.",
            ))
            .option(page_size())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let params = ListParams::with_page_size(resolve_page_size(args, env)?);
        writeln!(env.out, "Listing user lists for buyer account \"{account_id}\":")?;

        let rtb = &env.rtb;
        let count = print_all_pages(
            &mut *env.out,
            |token| rtb.list_user_lists(&account_id, &params.at_page(token)),
            output::user_list,
        )
        .context("failed to list user lists")?;
        if count == 0 {
            writeln!(env.out, "No user lists found for buyer account.")?;
        }
        Ok(())
    }
}

pub mod create {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::req_str;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use std::io::Write;

    pub fn options() -> OptionSet {
        super::body_options(OptionSet::default().option(crate::samples::account_id(
            "The resource ID of the buyers resource under which the user list is to be created.",
        )))
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let body = super::user_list_body(args)?;
        writeln!(env.out, "Creating user list for buyer account ID \"{account_id}\":")?;
        let created = env
            .rtb
            .create_user_list(&account_id, &body)
            .context("failed to create user list")?;
        output::user_list(env.out, &created)?;
        Ok(())
    }
}

pub mod update {
    use crate::output;
    use crate::registry::SampleEnv;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::paths;
    use std::io::Write;

    pub fn options() -> OptionSet {
        super::body_options(
            OptionSet::default()
                .option(super::user_list_account_id())
                .option(super::user_list_id()),
        )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let (account_id, user_list_id) = super::user_list_ref(args)?;
        let body = super::user_list_body(args)?;
        let name = paths::user_list(&account_id, &user_list_id);
        writeln!(env.out, "Updating user list with name \"{name}\":")?;
        let updated = env
            .rtb
            .update_user_list(&account_id, &user_list_id, &body)
            .with_context(|| format!("failed to update {name}"))?;
        output::user_list(env.out, &updated)?;
        Ok(())
    }
}

pub mod close {
    use crate::output;
    use crate::registry::SampleEnv;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(super::user_list_account_id())
            .option(super::user_list_id())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let (account_id, user_list_id) = super::user_list_ref(args)?;
        writeln!(
            env.out,
            "Closing user list \"{user_list_id}\" for buyer account ID \"{account_id}\":"
        )?;
        let closed = env
            .rtb
            .close_user_list(&account_id, &user_list_id)
            .context("failed to close user list")?;
        output::user_list(env.out, &closed)?;
        Ok(())
    }
}

pub mod open {
    use crate::output;
    use crate::registry::SampleEnv;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(super::user_list_account_id())
            .option(super::user_list_id())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let (account_id, user_list_id) = super::user_list_ref(args)?;
        writeln!(
            env.out,
            "Opening user list \"{user_list_id}\" for buyer account ID \"{account_id}\":"
        )?;
        let opened = env
            .rtb
            .open_user_list(&account_id, &user_list_id)
            .context("failed to open user list")?;
        output::user_list(env.out, &opened)?;
        Ok(())
    }
}
