use crate::samples::req_str;
use rtb_argparse::{OptionSpec, ParseError, ParsedArguments};
use rtb_client::paths;

fn config_account_id() -> OptionSpec {
    crate::samples::account_id(
        "The resource ID of the bidders resource under which the pretargeting configuration was \
         created.",
    )
}

fn config_id() -> OptionSpec {
    OptionSpec::string("pretargeting_config_id")
        .short('p')
        .required()
        .help("The resource ID of the pretargeting configuration.")
}

/// Account and configuration IDs shared by every single-configuration sample.
struct ConfigRef {
    account_id: String,
    config_id: String,
}

impl ConfigRef {
    fn from_parsed(args: &ParsedArguments) -> Result<Self, ParseError> {
        Ok(Self {
            account_id: req_str(args, "account_id")?,
            config_id: req_str(args, "pretargeting_config_id")?,
        })
    }

    fn name(&self) -> String {
        paths::pretargeting_config(&self.account_id, &self.config_id)
    }
}

fn targeting_mode(name: &str, target: &str) -> OptionSpec {
    OptionSpec::string(name)
        .allowed_values(crate::samples::targeting_mode())
        .help(format!("The targeting mode for the configuration's {target} targeting."))
}

pub mod get {
    use super::ConfigRef;
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::found;
    use anyhow::Result;
    use rtb_argparse::{OptionSet, ParsedArguments};
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(super::config_account_id())
            .option(super::config_id())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let name = config.name();
        writeln!(env.out, "Getting pretargeting configuration with name \"{name}\":")?;

        let what = format!("Pretargeting configuration \"{name}\"");
        let result = env
            .rtb
            .get_pretargeting_config(&config.account_id, &config.config_id);
        let pretargeting_config = found(env.out, &what, result)?;
        output::pretargeting_config(env.out, &pretargeting_config)?;
        Ok(())
    }
}

pub mod list {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{page_size, print_all_pages, req_str, resolve_page_size};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::ListParams;
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(crate::samples::account_id(
                "The resource ID of the bidders resource under which the pretargeting \
                 configurations were created.",
            ))
            .option(page_size())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let account_id = req_str(args, "account_id")?;
        let params = ListParams::with_page_size(resolve_page_size(args, env)?);
        writeln!(
            env.out,
            "Listing pretargeting configurations for bidder account \"{account_id}\":"
        )?;

        let rtb = &env.rtb;
        let count = print_all_pages(
            &mut *env.out,
            |token| rtb.list_pretargeting_configs(&account_id, &params.at_page(token)),
            output::pretargeting_config,
        )
        .context("failed to list pretargeting configurations")?;
        if count == 0 {
            writeln!(env.out, "No pretargeting configurations found for bidder account.")?;
        }
        Ok(())
    }
}

pub mod create {
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{list, opt_str, req_str, unique_suffix};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, OptionSpec, ParseError, ParsedArguments};
    use rtb_client::model::{
        AppTargeting, CreativeDimensions, NumericTargetingDimension, PretargetingConfig,
        StringTargetingDimension,
    };
    use std::io::Write;

    fn ids(name: &str, help: &str) -> OptionSpec {
        OptionSpec::repeated(name).value_name("ID").help(help)
    }

    fn values(name: &str, help: &str) -> OptionSpec {
        OptionSpec::repeated(name).value_name("VALUE").help(help)
    }

    /// `None` when neither list has entries, so untouched dimensions stay out of the body.
    fn numeric(
        included_ids: Vec<String>,
        excluded_ids: Vec<String>,
    ) -> Option<NumericTargetingDimension> {
        if included_ids.is_empty() && excluded_ids.is_empty() {
            return None;
        }
        Some(NumericTargetingDimension {
            included_ids,
            excluded_ids,
        })
    }

    fn string(
        targeting_mode: Option<String>,
        values: Vec<String>,
    ) -> Option<StringTargetingDimension> {
        if targeting_mode.is_none() && values.is_empty() {
            return None;
        }
        Some(StringTargetingDimension {
            targeting_mode,
            values,
        })
    }

    fn build(args: &ParsedArguments) -> Result<(String, PretargetingConfig), ParseError> {
        let mobile_app_targeting = string(
            opt_str(args, "mobile_app_targeting_mode"),
            list(args, "mobile_app_targeting_app_ids"),
        );
        let mobile_app_category_targeting = numeric(
            list(args, "included_mobile_app_targeting_category_ids"),
            list(args, "excluded_mobile_app_targeting_category_ids"),
        );
        let app_targeting = (mobile_app_targeting.is_some()
            || mobile_app_category_targeting.is_some())
        .then(|| AppTargeting {
            mobile_app_targeting,
            mobile_app_category_targeting,
        });

        let config = PretargetingConfig {
            display_name: Some(
                opt_str(args, "display_name")
                    .unwrap_or_else(|| format!("TEST_PRETARGETING_CONFIG_{}", unique_suffix())),
            ),
            included_formats: list(args, "included_formats"),
            geo_targeting: numeric(list(args, "included_geo_ids"), list(args, "excluded_geo_ids")),
            user_list_targeting: numeric(
                list(args, "included_user_list_ids"),
                list(args, "excluded_user_list_ids"),
            ),
            interstitial_targeting: opt_str(args, "interstitial_targeting"),
            allowed_user_targeting_modes: list(args, "allowed_user_targeting_modes"),
            excluded_content_label_ids: list(args, "excluded_content_label_ids"),
            included_user_id_types: list(args, "included_user_id_types"),
            included_languages: list(args, "included_language_codes"),
            included_mobile_operating_system_ids: list(args, "included_mobile_os_ids"),
            vertical_targeting: numeric(
                list(args, "included_vertical_ids"),
                list(args, "excluded_vertical_ids"),
            ),
            included_platforms: list(args, "included_platforms"),
            included_creative_dimensions: vec![CreativeDimensions {
                height: Some(args.require_int("included_creative_dimension_height")?.to_string()),
                width: Some(args.require_int("included_creative_dimension_width")?.to_string()),
            }],
            included_environments: list(args, "included_environments"),
            web_targeting: string(
                opt_str(args, "web_targeting_mode"),
                list(args, "web_targeting_urls"),
            ),
            app_targeting,
            publisher_targeting: string(
                opt_str(args, "publisher_targeting_mode"),
                list(args, "publisher_ids"),
            ),
            minimum_viewability_decile: Some(args.require_int("minimum_viewability_decile")?),
            ..PretargetingConfig::default()
        };
        Ok((req_str(args, "account_id")?, config))
    }

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(crate::samples::account_id(
                "The resource ID of the bidders resource under which the pretargeting \
                 configuration is to be created.",
            ))
            .option(OptionSpec::string("display_name").short('d').help(
                "The display name to associate with the new configuration. Must be unique among \
                 all of a bidder's pretargeting configurations. Defaults to a generated name.",
            ))
            .option(values(
                "included_formats",
                "Creative formats included by this configuration: HTML, NATIVE or VAST.",
            ))
            .option(ids("included_geo_ids", "Geo IDs to include in targeting."))
            .option(ids("excluded_geo_ids", "Geo IDs to exclude from targeting."))
            .option(ids("included_user_list_ids", "User list IDs to include in targeting."))
            .option(ids("excluded_user_list_ids", "User list IDs to exclude from targeting."))
            .option(
                OptionSpec::string("interstitial_targeting")
                    .default_str("ONLY_NON_INTERSTITIAL_REQUESTS")
                    .allowed_values([
                        "ONLY_INTERSTITIAL_REQUESTS",
                        "ONLY_NON_INTERSTITIAL_REQUESTS",
                    ])
                    .help("The interstitial targeting specified for this configuration."),
            )
            .option(values(
                "allowed_user_targeting_modes",
                "User targeting modes: REMARKETING_ADS or INTEREST_BASED_TARGETING.",
            ))
            .option(ids(
                "excluded_content_label_ids",
                "Sensitive content category IDs excluded from targeting.",
            ))
            .option(values(
                "included_user_id_types",
                "User identifier types: HOSTED_MATCH_DATA, GOOGLE_COOKIE or DEVICE_ID.",
            ))
            .option(values("included_language_codes", "Language codes to include in targeting."))
            .option(ids("included_mobile_os_ids", "Mobile operating system IDs to include."))
            .option(ids("included_vertical_ids", "Vertical IDs to include in targeting."))
            .option(ids("excluded_vertical_ids", "Vertical IDs to exclude from targeting."))
            .option(values(
                "included_platforms",
                "Platforms to include: PERSONAL_COMPUTER, PHONE, TABLET or CONNECTED_TV.",
            ))
            .option(
                OptionSpec::integer("included_creative_dimension_height")
                    .default_int(300)
                    .help("Height of the creative dimension included in targeting."),
            )
            .option(
                OptionSpec::integer("included_creative_dimension_width")
                    .default_int(250)
                    .help("Width of the creative dimension included in targeting."),
            )
            .option(values("included_environments", "Environments to include: APP or WEB."))
            .option(super::targeting_mode("web_targeting_mode", "web"))
            .option(
                OptionSpec::repeated("web_targeting_urls")
                    .value_name("URL")
                    .help("Site URLs for web targeting."),
            )
            .option(super::targeting_mode("mobile_app_targeting_mode", "mobile app"))
            .option(ids("mobile_app_targeting_app_ids", "Mobile app IDs for app targeting."))
            .option(ids(
                "included_mobile_app_targeting_category_ids",
                "Mobile app category IDs to include in targeting.",
            ))
            .option(ids(
                "excluded_mobile_app_targeting_category_ids",
                "Mobile app category IDs to exclude from targeting.",
            ))
            .option(super::targeting_mode("publisher_targeting_mode", "publisher"))
            .option(ids("publisher_ids", "Publisher IDs for publisher targeting."))
            .option(
                OptionSpec::integer("minimum_viewability_decile")
                    .short('m')
                    .default_int(5)
                    .help("Minimum predicted viewability decile, from 0 to 10."),
            )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let (account_id, body) = build(args)?;
        writeln!(
            env.out,
            "Creating pretargeting configuration for bidder account \"{account_id}\":"
        )?;
        let config = env
            .rtb
            .create_pretargeting_config(&account_id, &body)
            .context("failed to create pretargeting configuration")?;
        output::pretargeting_config(env.out, &config)?;
        Ok(())
    }
}

pub mod patch {
    use super::ConfigRef;
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{opt_str, unique_suffix};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, OptionSpec, ParsedArguments};
    use rtb_client::model::{CreativeDimensions, NumericTargetingDimension, PretargetingConfig};
    use std::io::Write;

    const UPDATE_MASK: &str =
        "displayName,includedFormats,geoTargeting.includedIds,includedCreativeDimensions";

    // Austin, Boulder, Hoboken, New Orleans, New York, Mountain View, San Francisco.
    const GEO_IDS: [&str; 7] = [
        "200635", "1014448", "1022183", "200622", "1023191", "9061237", "1014221",
    ];

    fn dimensions(height: u32, width: u32) -> CreativeDimensions {
        CreativeDimensions {
            height: Some(height.to_string()),
            width: Some(width.to_string()),
        }
    }

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(super::config_account_id())
            .option(super::config_id())
            .option(OptionSpec::string("display_name").short('d').help(
                "The new display name for the configuration. Defaults to a generated name.",
            ))
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let display_name = opt_str(args, "display_name")
            .unwrap_or_else(|| format!("TEST_PRETARGETING_CONFIG_{}", unique_suffix()));

        // Repeated fields named in the mask are overwritten, not merged.
        let body = PretargetingConfig {
            display_name: Some(display_name),
            included_formats: vec!["HTML".to_string(), "VAST".to_string()],
            geo_targeting: Some(NumericTargetingDimension {
                included_ids: GEO_IDS.iter().map(|id| id.to_string()).collect(),
                excluded_ids: Vec::new(),
            }),
            included_creative_dimensions: vec![dimensions(480, 320), dimensions(1080, 1920)],
            ..PretargetingConfig::default()
        };

        let name = config.name();
        writeln!(env.out, "Patching a pretargeting configuration with name \"{name}\":")?;
        let patched = env
            .rtb
            .patch_pretargeting_config(&config.account_id, &config.config_id, &body, UPDATE_MASK)
            .with_context(|| format!("failed to patch {name}"))?;
        output::pretargeting_config(env.out, &patched)?;
        Ok(())
    }
}

pub mod delete {
    use super::ConfigRef;
    use crate::registry::SampleEnv;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(super::config_account_id())
            .option(super::config_id())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let name = config.name();
        writeln!(env.out, "Deleting a pretargeting configuration with name \"{name}\".")?;
        env.rtb
            .delete_pretargeting_config(&config.account_id, &config.config_id)
            .with_context(|| format!("failed to delete {name}"))?;
        writeln!(env.out, "Pretargeting configuration deleted successfully.")?;
        Ok(())
    }
}

pub mod activate {
    use super::ConfigRef;
    use crate::output;
    use crate::registry::SampleEnv;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(super::config_account_id())
            .option(super::config_id())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let name = config.name();
        writeln!(env.out, "Activating a pretargeting configuration with name \"{name}\":")?;
        let activated = env
            .rtb
            .activate_pretargeting_config(&config.account_id, &config.config_id)
            .with_context(|| format!("failed to activate {name}"))?;
        output::pretargeting_config(env.out, &activated)?;
        Ok(())
    }
}

pub mod suspend {
    use super::ConfigRef;
    use crate::output;
    use crate::registry::SampleEnv;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use std::io::Write;

    pub fn options() -> OptionSet {
        OptionSet::default()
            .option(super::config_account_id())
            .option(super::config_id())
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let name = config.name();
        writeln!(env.out, "Suspending a pretargeting configuration with name \"{name}\":")?;
        let suspended = env
            .rtb
            .suspend_pretargeting_config(&config.account_id, &config.config_id)
            .with_context(|| format!("failed to suspend {name}"))?;
        output::pretargeting_config(env.out, &suspended)?;
        Ok(())
    }
}

/// Options for the add/remove targeting samples: the configuration plus a
/// required list of values and, for additions, a required targeting mode.
fn targeting_options(
    list_name: &str,
    list_help: &str,
    mode: Option<(&str, &str)>,
) -> rtb_argparse::OptionSet {
    let mut set = rtb_argparse::OptionSet::default()
        .option(config_account_id())
        .option(config_id());
    if let Some((mode_name, target)) = mode {
        set = set.option(targeting_mode(mode_name, target).required());
    }
    set.option(OptionSpec::repeated(list_name).required().help(list_help))
}

pub mod add_targeted_sites {
    use super::ConfigRef;
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{list, req_str};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::model::AddTargetedSitesRequest;
    use std::io::Write;

    pub fn options() -> OptionSet {
        super::targeting_options(
            "web_targeting_urls",
            "Site URLs to add to the configuration's web targeting.",
            Some(("web_targeting_mode", "web")),
        )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let body = AddTargetedSitesRequest {
            sites: list(args, "web_targeting_urls"),
            targeting_mode: req_str(args, "web_targeting_mode")?,
        };
        let name = config.name();
        writeln!(
            env.out,
            "Updating web targeting with new site URLs for pretargeting configuration with name \
             \"{name}\":"
        )?;
        let updated = env
            .rtb
            .add_targeted_sites(&config.account_id, &config.config_id, &body)
            .with_context(|| format!("failed to add targeted sites to {name}"))?;
        output::pretargeting_config(env.out, &updated)?;
        Ok(())
    }
}

pub mod remove_targeted_sites {
    use super::ConfigRef;
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::list;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::model::RemoveTargetedSitesRequest;
    use std::io::Write;

    pub fn options() -> OptionSet {
        super::targeting_options(
            "web_targeting_urls",
            "Site URLs to remove from the configuration's web targeting.",
            None,
        )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let body = RemoveTargetedSitesRequest {
            sites: list(args, "web_targeting_urls"),
        };
        let name = config.name();
        writeln!(
            env.out,
            "Removing site URLs from web targeting for pretargeting configuration with name \
             \"{name}\":"
        )?;
        let updated = env
            .rtb
            .remove_targeted_sites(&config.account_id, &config.config_id, &body)
            .with_context(|| format!("failed to remove targeted sites from {name}"))?;
        output::pretargeting_config(env.out, &updated)?;
        Ok(())
    }
}

pub mod add_targeted_apps {
    use super::ConfigRef;
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{list, req_str};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::model::AddTargetedAppsRequest;
    use std::io::Write;

    pub fn options() -> OptionSet {
        super::targeting_options(
            "mobile_app_targeting_app_ids",
            "Mobile app IDs to add to the configuration's mobile app targeting.",
            Some(("mobile_app_targeting_mode", "mobile app")),
        )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let body = AddTargetedAppsRequest {
            app_ids: list(args, "mobile_app_targeting_app_ids"),
            targeting_mode: req_str(args, "mobile_app_targeting_mode")?,
        };
        let name = config.name();
        writeln!(
            env.out,
            "Updating mobile app targeting with new app IDs for pretargeting configuration with \
             name \"{name}\":"
        )?;
        let updated = env
            .rtb
            .add_targeted_apps(&config.account_id, &config.config_id, &body)
            .with_context(|| format!("failed to add targeted apps to {name}"))?;
        output::pretargeting_config(env.out, &updated)?;
        Ok(())
    }
}

pub mod remove_targeted_apps {
    use super::ConfigRef;
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::list;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::model::RemoveTargetedAppsRequest;
    use std::io::Write;

    pub fn options() -> OptionSet {
        super::targeting_options(
            "mobile_app_targeting_app_ids",
            "Mobile app IDs to remove from the configuration's mobile app targeting.",
            None,
        )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let body = RemoveTargetedAppsRequest {
            app_ids: list(args, "mobile_app_targeting_app_ids"),
        };
        let name = config.name();
        writeln!(
            env.out,
            "Removing app IDs from mobile app targeting for pretargeting configuration with name \
             \"{name}\":"
        )?;
        let updated = env
            .rtb
            .remove_targeted_apps(&config.account_id, &config.config_id, &body)
            .with_context(|| format!("failed to remove targeted apps from {name}"))?;
        output::pretargeting_config(env.out, &updated)?;
        Ok(())
    }
}

pub mod add_targeted_publishers {
    use super::ConfigRef;
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::{list, req_str};
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::model::AddTargetedPublishersRequest;
    use std::io::Write;

    pub fn options() -> OptionSet {
        super::targeting_options(
            "publisher_ids",
            "Publisher IDs to add to the configuration's publisher targeting.",
            Some(("publisher_targeting_mode", "publisher")),
        )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let body = AddTargetedPublishersRequest {
            publisher_ids: list(args, "publisher_ids"),
            targeting_mode: req_str(args, "publisher_targeting_mode")?,
        };
        let name = config.name();
        writeln!(
            env.out,
            "Updating publisher targeting with new publisher IDs for pretargeting configuration \
             with name \"{name}\":"
        )?;
        let updated = env
            .rtb
            .add_targeted_publishers(&config.account_id, &config.config_id, &body)
            .with_context(|| format!("failed to add targeted publishers to {name}"))?;
        output::pretargeting_config(env.out, &updated)?;
        Ok(())
    }
}

pub mod remove_targeted_publishers {
    use super::ConfigRef;
    use crate::output;
    use crate::registry::SampleEnv;
    use crate::samples::list;
    use anyhow::{Context, Result};
    use rtb_argparse::{OptionSet, ParsedArguments};
    use rtb_client::model::RemoveTargetedPublishersRequest;
    use std::io::Write;

    pub fn options() -> OptionSet {
        super::targeting_options(
            "publisher_ids",
            "Publisher IDs to remove from the configuration's publisher targeting.",
            None,
        )
    }

    pub fn run(args: &ParsedArguments, env: &mut SampleEnv<'_>) -> Result<()> {
        let config = ConfigRef::from_parsed(args)?;
        let body = RemoveTargetedPublishersRequest {
            publisher_ids: list(args, "publisher_ids"),
        };
        let name = config.name();
        writeln!(
            env.out,
            "Removing publisher IDs from publisher targeting for pretargeting configuration with \
             name \"{name}\":"
        )?;
        let updated = env
            .rtb
            .remove_targeted_publishers(&config.account_id, &config.config_id, &body)
            .with_context(|| format!("failed to remove targeted publishers from {name}"))?;
        output::pretargeting_config(env.out, &updated)?;
        Ok(())
    }
}
