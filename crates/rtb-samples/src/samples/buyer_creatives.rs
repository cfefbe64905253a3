use crate::samples::{list, opt_str, req_str, unique_suffix};
use rtb_argparse::{OptionSet, OptionSpec, ParseError, ParsedArguments, Problem};
use rtb_client::model::Creative;

fn creative_id() -> OptionSpec {
    OptionSpec::string("creative_id")
        .short('c')
        .required()
        .help("The resource ID of the buyers.creatives resource.")
}

/// Options shared by the create samples: the owning buyer, the new creative's ID
/// and its declared fields.
fn create_options(id_prefix: &str, declared_attribute: &str) -> OptionSet {
    OptionSet::default()
        .option(crate::samples::account_id(
            "The resource ID of the buyers resource under which the creative is to be created.",
        ))
        .option(
            OptionSpec::string("advertiser_name")
                .default_str("Test")
                .help("The name of the company being advertised in the creative."),
        )
        .option(OptionSpec::string("creative_id").short('c').help(format!(
            "The user-specified creative ID, at most 128 bytes. Defaults to {id_prefix} followed \
             by a unique suffix."
        )))
        .option(
            OptionSpec::repeated("declared_attributes")
                .default_list([declared_attribute])
                .help("The creative attributes being declared. Repeat the flag for each value."),
        )
        .option(
            OptionSpec::repeated("declared_click_urls")
                .value_name("URL")
                .default_list(["http://test.com"])
                .help("The click-through URLs being declared."),
        )
        .option(
            OptionSpec::repeated("declared_restricted_categories")
                .help("The restricted categories being declared."),
        )
        .option(
            OptionSpec::repeated("declared_vendor_ids")
                .value_name("ID")
                .help("The vendor IDs being declared. Each must be an integer."),
        )
}

/// Vendor IDs as integers; every malformed element is reported in one error.
fn vendor_ids(args: &ParsedArguments) -> Result<Vec<i64>, ParseError> {
    let mut ids = Vec::new();
    let mut problems = Vec::new();
    for raw in args.get_list("declared_vendor_ids") {
        match raw.trim().parse::<i64>() {
            Ok(id) => ids.push(id),
            Err(_) => problems.push(Problem::InvalidValue {
                option: "declared_vendor_ids".to_string(),
                value: raw.clone(),
                expected: "an integer",
            }),
        }
    }
    if problems.is_empty() {
        Ok(ids)
    } else {
        Err(ParseError::Invalid { problems })
    }
}

/// Account ID and the declared part of a new creative.
fn declared_creative(
    args: &ParsedArguments,
    id_prefix: &str,
) -> Result<(String, Creative), ParseError> {
    let creative = Creative {
        advertiser_name: opt_str(args, "advertiser_name"),
        creative_id: Some(
            opt_str(args, "creative_id")
                .unwrap_or_else(|| format!("{id_prefix}{}", unique_suffix())),
        ),
        declared_attributes: list(args, "declared_attributes"),
        declared_click_through_urls: list(args, "declared_click_urls"),
        declared_restricted_categories: list(args, "declared_restricted_categories"),
        declared_vendor_ids: vendor_ids(args)?,
        ..Creative::default()
    };
    Ok((req_str(args, "account_id")?, creative))
}

fn submit(
    env: &mut crate::registry::SampleEnv<'_>,
    kind: &str,
    account_id: &str,
    creative: &Creative,
) -> anyhow::Result<()> {
    use anyhow::Context;
    use std::io::Write;

    writeln!(env.out, "Creating {kind} creative for buyer account ID \"{account_id}\":")?;
    let created = env
        .rtb
        .create_creative(account_id, creative)
        .with_context(|| format!("failed to create {kind} creative"))?;
    crate::output::creative(env.out, &created)?;
    Ok(())
}

pub mod get {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, creative_view, found, opt_str, req_str};
    use anyhow::Result;
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::paths;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(account_id(
                "The resource ID of the buyers resource under which the creative was created.",
            ))
            .option(super::creative_id())
            .option(creative_view())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let creative_id = req_str(args, "creative_id")?;
        let view = opt_str(args, "view");
        let name = paths::buyer_creative(&account_id, &creative_id);
        writeln!(env.out, "Getting creative with name \"{name}\":")?;

        let what = format!("Creative \"{name}\"");
        let result = env.rtb.get_creative(&account_id, &creative_id, view.as_deref());
        let creative = found(env.out, &what, result)?;
        output::creative(env.out, &creative)?;
        Ok(())
    }
}

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
                "The resource ID of the buyers resource under which the creatives were created.",
            ))
            .option(page_size())
            .option(creative_filter())
            .option(creative_view())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let params = creative_list_params(args, env)?;
        writeln!(env.out, "Listing creatives for buyer account \"{account_id}\":")?;

        let rtb = &env.rtb;
        let count = print_all_pages(
            &mut *env.out,
            |token| rtb.list_creatives(&account_id, &params.at_page(token)),
            output::creative,
        )
        .context("failed to list creatives")?;
        if count == 0 {
            writeln!(env.out, "No creatives found for buyer account.")?;
        }
        Ok(())
    }
}

pub mod create_html {
    use crate::registry::SampleEnv;
    use crate::samples::req_str;
    use anyhow::Result;
    use rtb_argparse::{OptionSet, OptionSpec, ParsedArguments};
    use rtb_client::model::HtmlContent;

    const ID_PREFIX: &str = "HTML_Creative_";
    const DEFAULT_SNIPPET: &str = "<iframe marginwidth=0 marginheight=0 height=600 frameborder=0 \
        width=160 scrolling=no src=\"https://test.com/ads?id=123456&curl=%%CLICK_URL_ESC%%\
        &wprice=%%WINNING_PRICE_ESC%%\"></iframe>";

    pub fn options() -> OptionSet {
        super::create_options(ID_PREFIX, "CREATIVE_TYPE_HTML")
            .option(
                OptionSpec::string("html_snippet")
                    .default_str(DEFAULT_SNIPPET)
                    .help("The HTML snippet that displays the ad when inserted in the web page."),
            )
            .option(
                OptionSpec::integer("html_height")
                    .default_int(250)
                    .help("The height of the HTML snippet in pixels."),
            )
            .option(
                OptionSpec::integer("html_width")
                    .default_int(300)
                    .help("The width of the HTML snippet in pixels."),
            )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let (account_id, mut creative) = super::declared_creative(args, ID_PREFIX)?;
        creative.html = Some(HtmlContent {
            snippet: Some(req_str(args, "html_snippet")?),
            height: Some(args.require_int("html_height")?),
            width: Some(args.require_int("html_width")?),
        });
        super::submit(env, "HTML", &account_id, &creative)
    }
}

pub mod create_native {
    use crate::registry::SampleEnv;
    use crate::samples::opt_str;
    use anyhow::Result;
    use rtb_argparse::{OptionSet, OptionSpec, ParseError, ParsedArguments};
    use rtb_client::model::{Image, NativeContent};

    const ID_PREFIX: &str = "Native_Creative_";

    fn text(name: &str, default: &str, help: &str) -> OptionSpec {
        OptionSpec::string(name).default_str(default).help(help)
    }

    fn pixels(name: &str, default: i64, help: &str) -> OptionSpec {
        OptionSpec::integer(name).default_int(default).help(help)
    }

    fn image(args: &ParsedArguments, prefix: &str) -> Result<Image, ParseError> {
        Ok(Image {
            url: opt_str(args, &format!("{prefix}_url")),
            height: Some(args.require_int(&format!("{prefix}_height"))?),
            width: Some(args.require_int(&format!("{prefix}_width"))?),
        })
    }

    pub fn options() -> OptionSet {
        super::create_options(ID_PREFIX, "NATIVE_ELIGIBILITY_ELIGIBLE")
            .option(text(
                "native_headline",
                "Luxury Mars Cruises",
                "A short title for the ad.",
            ))
            .option(text(
                "native_body",
                "Visit the planet in a luxury spaceship.",
                "A long description of the ad.",
            ))
            .option(text(
                "native_call_to_action",
                "Book today",
                "A label for the button that the user is supposed to click.",
            ))
            .option(text(
                "native_advertiser_name",
                "Galactic Luxury Cruises",
                "The name of the advertiser or sponsor, to be displayed in the ad creative.",
            ))
            .option(text(
                "native_image_url",
                "https://native.test.com/image?id=123456",
                "The URL of the large image to be included in the native ad.",
            ))
            .option(pixels("native_image_height", 627, "The height in pixels of the large image."))
            .option(pixels("native_image_width", 1200, "The width in pixels of the large image."))
            .option(text(
                "native_logo_url",
                "https://native.test.com/logo?id=123456",
                "The URL of a smaller image to be included in the native ad.",
            ))
            .option(pixels("native_logo_height", 100, "The height in pixels of the smaller image."))
            .option(pixels("native_logo_width", 100, "The width in pixels of the smaller image."))
            .option(text(
                "native_click_link_url",
                "https://www.google.com",
                "The URL that the browser/SDK will load when the user clicks the ad.",
            ))
            .option(text(
                "native_click_tracking_url",
                "https://native.test.com/click?id=123456",
                "The URL to use for click tracking.",
            ))
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let (account_id, mut creative) = super::declared_creative(args, ID_PREFIX)?;
        creative.native = Some(NativeContent {
            headline: opt_str(args, "native_headline"),
            body: opt_str(args, "native_body"),
            call_to_action: opt_str(args, "native_call_to_action"),
            advertiser_name: opt_str(args, "native_advertiser_name"),
            image: Some(image(args, "native_image")?),
            logo: Some(image(args, "native_logo")?),
            click_link_url: opt_str(args, "native_click_link_url"),
            click_tracking_url: opt_str(args, "native_click_tracking_url"),
            ..NativeContent::default()
        });
        super::submit(env, "native", &account_id, &creative)
    }
}

pub mod create_video {
    use crate::registry::SampleEnv;
    use crate::samples::opt_str;
    use anyhow::Result;
    use rtb_argparse::{OptionSet, OptionSpec, ParsedArguments};
    use rtb_client::model::VideoContent;

    const ID_PREFIX: &str = "Video_Creative_";

    pub fn options() -> OptionSet {
        super::create_options(ID_PREFIX, "CREATIVE_TYPE_VAST_VIDEO").option(
            OptionSpec::string("video_url")
                .default_str("https://video.test.com/ads?id=123456&wprice=%%WINNING_PRICE%%")
                .help("The URL to fetch a video ad."),
        )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let (account_id, mut creative) = super::declared_creative(args, ID_PREFIX)?;
        creative.video = Some(VideoContent {
            video_url: opt_str(args, "video_url"),
            video_vast_xml: None,
        });
        super::submit(env, "video", &account_id, &creative)
    }
}

pub mod patch {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{account_id, req_str, unique_suffix};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::model::Creative;
    use std::io::Write;

    const UPDATE_MASK: &str = "advertiserName,declaredClickThroughUrls";

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(account_id(
                "The resource ID of the buyers resource under which the creative was created.",
            ))
            .option(super::creative_id())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let creative_id = req_str(args, "creative_id")?;
        let suffix = unique_suffix();
        let body = Creative {
            advertiser_name: Some(format!("Test-Advertiser-{suffix}")),
            declared_click_through_urls: (0..3)
                .map(|i| format!("https://test.clickurl.com/{suffix}-{i}"))
                .collect(),
            ..Creative::default()
        };

        writeln!(
            env.out,
            "Patching creative with ID \"{creative_id}\" for buyer account ID \"{account_id}\":"
        )?;
        let patched = env
            .rtb
            .patch_creative(&account_id, &creative_id, &body, UPDATE_MASK)
            .with_context(|| format!("failed to patch creative {creative_id}"))?;
        output::creative(env.out, &patched)?;
        Ok(())
    }
}
