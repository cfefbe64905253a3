//! Labeled, indented text renderings of API resources.

use rtb_client::model::{
    Bidder, Buyer, Creative, CreativeServingDecision, Endpoint, Image, NumericTargetingDimension,
    PretargetingConfig, PublisherConnection, StringTargetingDimension, UserList,
    WatchCreativesResponse,
};
use std::fmt::Display;
use std::io::{self, Write};

fn field<T: Display>(
    out: &mut dyn Write,
    depth: usize,
    label: &str,
    value: Option<T>,
) -> io::Result<()> {
    match value {
        Some(v) => writeln!(out, "{}{label}: {v}", indent(depth)),
        None => Ok(()),
    }
}

fn joined(out: &mut dyn Write, depth: usize, label: &str, values: &[String]) -> io::Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}{label}: {}", indent(depth), values.join(", "))
}

fn listed<T: Display>(
    out: &mut dyn Write,
    depth: usize,
    label: &str,
    values: &[T],
) -> io::Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}{label}:", indent(depth))?;
    for v in values {
        writeln!(out, "{}{v}", indent(depth + 1))?;
    }
    Ok(())
}

fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

fn header(out: &mut dyn Write, label: &str, name: Option<&str>) -> io::Result<()> {
    writeln!(out, "* {label}: {}", name.unwrap_or("<unnamed>"))
}

pub fn bidder(out: &mut dyn Write, bidder: &Bidder) -> io::Result<()> {
    header(out, "Bidder name", bidder.name.as_deref())?;
    field(out, 1, "- Cookie matching URL", bidder.cookie_matching_url.as_deref())?;
    field(out, 1, "- Cookie matching network ID", bidder.cookie_matching_network_id.as_deref())?;
    field(
        out,
        1,
        "- Bypass non-guaranteed deals pretargeting",
        bidder.bypass_nonguaranteed_deals_pretargeting,
    )?;
    field(out, 1, "- Deals billing ID", bidder.deals_billing_id.as_deref())
}

pub fn buyer(out: &mut dyn Write, buyer: &Buyer) -> io::Result<()> {
    header(out, "Buyer name", buyer.name.as_deref())?;
    field(out, 1, "- Display name", buyer.display_name.as_deref())?;
    field(out, 1, "- Bidder", buyer.bidder.as_deref())?;
    field(out, 1, "- Active creative count", buyer.active_creative_count.as_deref())?;
    field(
        out,
        1,
        "- Maximum active creative count",
        buyer.maximum_active_creative_count.as_deref(),
    )?;
    joined(out, 1, "- Billing IDs", &buyer.billing_ids)
}

pub fn endpoint(out: &mut dyn Write, endpoint: &Endpoint) -> io::Result<()> {
    header(out, "Endpoint name", endpoint.name.as_deref())?;
    field(out, 1, "- URL", endpoint.url.as_deref())?;
    field(out, 1, "- Maximum QPS", endpoint.maximum_qps.as_deref())?;
    field(out, 1, "- Trading location", endpoint.trading_location.as_deref())?;
    field(out, 1, "- Bid protocol", endpoint.bid_protocol.as_deref())
}

fn image(out: &mut dyn Write, label: &str, image: Option<&Image>) -> io::Result<()> {
    let Some(image) = image else {
        return Ok(());
    };
    writeln!(out, "\t\t{label} contents:")?;
    field(out, 3, "URL", image.url.as_deref())?;
    field(out, 3, "Height", image.height)?;
    field(out, 3, "Width", image.width)
}

pub fn creative(out: &mut dyn Write, creative: &Creative) -> io::Result<()> {
    header(out, "Creative ID", creative.creative_id.as_deref())?;
    field(out, 1, "- Name", creative.name.as_deref())?;
    field(out, 1, "- Version", creative.version)?;
    field(out, 1, "- Advertiser name", creative.advertiser_name.as_deref())?;
    field(out, 1, "- Creative format", creative.creative_format.as_deref())?;

    if let Some(decision) = &creative.creative_serving_decision {
        writeln!(out, "\t- Creative serving decision")?;
        policy_statuses(out, 2, decision)?;
    }

    listed(out, 1, "- Declared click-through URLs", &creative.declared_click_through_urls)?;
    listed(out, 1, "- Declared attributes", &creative.declared_attributes)?;
    listed(out, 1, "- Declared vendor IDs", &creative.declared_vendor_ids)?;
    listed(
        out,
        1,
        "- Declared restricted categories",
        &creative.declared_restricted_categories,
    )?;

    if let Some(html) = &creative.html {
        writeln!(out, "\t- HTML creative contents:")?;
        field(out, 2, "Snippet", html.snippet.as_deref())?;
        field(out, 2, "Height", html.height)?;
        field(out, 2, "Width", html.width)?;
    }

    if let Some(native) = &creative.native {
        writeln!(out, "\t- Native creative contents:")?;
        field(out, 2, "Headline", native.headline.as_deref())?;
        field(out, 2, "Body", native.body.as_deref())?;
        field(out, 2, "Call to action", native.call_to_action.as_deref())?;
        field(out, 2, "Advertiser name", native.advertiser_name.as_deref())?;
        field(out, 2, "Star rating", native.star_rating)?;
        field(out, 2, "Click link URL", native.click_link_url.as_deref())?;
        field(out, 2, "Click tracking URL", native.click_tracking_url.as_deref())?;
        field(out, 2, "Price display text", native.price_display_text.as_deref())?;
        image(out, "Image", native.image.as_ref())?;
        image(out, "Logo", native.logo.as_ref())?;
        image(out, "App icon", native.app_icon.as_ref())?;
    }

    if let Some(video) = &creative.video {
        writeln!(out, "\t- Video creative contents:")?;
        field(out, 2, "Video URL", video.video_url.as_deref())?;
        field(out, 2, "Video VAST XML", video.video_vast_xml.as_deref())?;
    }
    Ok(())
}

fn policy_statuses(
    out: &mut dyn Write,
    depth: usize,
    decision: &CreativeServingDecision,
) -> io::Result<()> {
    let status = |p: &Option<rtb_client::model::PolicyCompliance>| {
        p.as_ref().and_then(|p| p.status.clone())
    };
    field(out, depth, "Deals policy compliance", status(&decision.deals_policy_compliance))?;
    field(out, depth, "Network policy compliance", status(&decision.network_policy_compliance))?;
    field(
        out,
        depth,
        "Platform policy compliance",
        status(&decision.platform_policy_compliance),
    )?;
    field(out, depth, "China policy compliance", status(&decision.china_policy_compliance))?;
    field(out, depth, "Russia policy compliance", status(&decision.russia_policy_compliance))
}

/// Serving decision carried in a creative status notification.
pub fn serving_decision(out: &mut dyn Write, decision: &CreativeServingDecision) -> io::Result<()> {
    policy_statuses(out, 1, decision)?;
    joined(out, 1, "Detected domains", &decision.detected_domains)?;
    joined(out, 1, "Detected languages", &decision.detected_languages)?;
    field(out, 1, "Last status update", decision.last_status_update.as_deref())
}

fn numeric_dimension(
    out: &mut dyn Write,
    label: &str,
    noun: &str,
    dimension: Option<&NumericTargetingDimension>,
) -> io::Result<()> {
    let Some(dimension) = dimension else {
        return Ok(());
    };
    writeln!(out, "\t- {label}:")?;
    joined(out, 2, &format!("Included {noun} IDs"), &dimension.included_ids)?;
    joined(out, 2, &format!("Excluded {noun} IDs"), &dimension.excluded_ids)
}

fn string_dimension(
    out: &mut dyn Write,
    depth: usize,
    label: &str,
    values_label: &str,
    dimension: Option<&StringTargetingDimension>,
) -> io::Result<()> {
    let Some(dimension) = dimension else {
        return Ok(());
    };
    writeln!(out, "{}{label}:", indent(depth))?;
    field(out, depth + 1, "Targeting mode", dimension.targeting_mode.as_deref())?;
    joined(out, depth + 1, values_label, &dimension.values)
}

pub fn pretargeting_config(out: &mut dyn Write, config: &PretargetingConfig) -> io::Result<()> {
    header(out, "Pretargeting configuration name", config.name.as_deref())?;
    field(out, 1, "- Display name", config.display_name.as_deref())?;
    field(out, 1, "- Billing ID", config.billing_id.as_deref())?;
    field(out, 1, "- State", config.state.as_deref())?;
    joined(out, 1, "- Included formats", &config.included_formats)?;
    field(out, 1, "- Maximum QPS", config.maximum_qps.as_deref())?;
    numeric_dimension(out, "Geo targeting", "geo", config.geo_targeting.as_ref())?;
    joined(out, 1, "- Invalid geo IDs", &config.invalid_geo_ids)?;
    numeric_dimension(
        out,
        "User list targeting",
        "user list",
        config.user_list_targeting.as_ref(),
    )?;
    field(out, 1, "- Interstitial targeting", config.interstitial_targeting.as_deref())?;
    joined(out, 1, "- Allowed user targeting modes", &config.allowed_user_targeting_modes)?;
    joined(out, 1, "- Excluded content label IDs", &config.excluded_content_label_ids)?;
    joined(out, 1, "- Included user ID types", &config.included_user_id_types)?;
    joined(out, 1, "- Included languages", &config.included_languages)?;
    joined(
        out,
        1,
        "- Included mobile operating system IDs",
        &config.included_mobile_operating_system_ids,
    )?;
    numeric_dimension(out, "Vertical targeting", "vertical", config.vertical_targeting.as_ref())?;
    joined(out, 1, "- Included platforms", &config.included_platforms)?;

    if !config.included_creative_dimensions.is_empty() {
        writeln!(out, "\t- Included creative dimensions:")?;
        for d in &config.included_creative_dimensions {
            writeln!(
                out,
                "\t\tHeight: {}; Width: {}",
                d.height.as_deref().unwrap_or("?"),
                d.width.as_deref().unwrap_or("?")
            )?;
        }
    }

    joined(out, 1, "- Included environments", &config.included_environments)?;
    string_dimension(out, 1, "- Web targeting", "Site URLs", config.web_targeting.as_ref())?;

    if let Some(apps) = &config.app_targeting {
        writeln!(out, "\t- App targeting:")?;
        string_dimension(
            out,
            2,
            "* Mobile app targeting",
            "App IDs",
            apps.mobile_app_targeting.as_ref(),
        )?;
        if let Some(categories) = &apps.mobile_app_category_targeting {
            writeln!(out, "\t\t* Mobile app category targeting:")?;
            joined(out, 3, "Included category IDs", &categories.included_ids)?;
            joined(out, 3, "Excluded category IDs", &categories.excluded_ids)?;
        }
    }

    string_dimension(
        out,
        1,
        "- Publisher targeting",
        "Publisher IDs",
        config.publisher_targeting.as_ref(),
    )?;
    field(out, 1, "- Minimum viewability decile", config.minimum_viewability_decile)
}

pub fn publisher_connection(
    out: &mut dyn Write,
    connection: &PublisherConnection,
) -> io::Result<()> {
    header(out, "Publisher connection name", connection.name.as_deref())?;
    field(out, 1, "- Publisher platform", connection.publisher_platform.as_deref())?;
    field(out, 1, "- Display name", connection.display_name.as_deref())?;
    field(out, 1, "- Bidding state", connection.bidding_state.as_deref())?;
    field(out, 1, "- Create time", connection.create_time.as_deref())
}

pub fn user_list(out: &mut dyn Write, list: &UserList) -> io::Result<()> {
    header(out, "User list name", list.name.as_deref())?;
    field(out, 1, "- Display name", list.display_name.as_deref())?;
    field(out, 1, "- Description", list.description.as_deref())?;
    field(out, 1, "- Status", list.status.as_deref())?;
    field(out, 1, "- Membership duration days", list.membership_duration_days.as_deref())?;
    if let Some(restriction) = &list.url_restriction {
        writeln!(out, "\t- URL restriction:")?;
        field(out, 2, "Restriction type", restriction.restriction_type.as_deref())?;
        field(out, 2, "URL", restriction.url.as_deref())?;
        field(out, 2, "Start date", restriction.start_date)?;
        field(out, 2, "End date", restriction.end_date)?;
    }
    Ok(())
}

pub fn watch_response(out: &mut dyn Write, response: &WatchCreativesResponse) -> io::Result<()> {
    writeln!(out, "* Watched creative status changes")?;
    field(out, 1, "- Pub/Sub topic", response.topic.as_deref())?;
    field(out, 1, "- Pub/Sub subscription", response.subscription.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtb_client::model::{HtmlContent, PolicyCompliance};

    fn render<T>(print: fn(&mut dyn Write, &T) -> io::Result<()>, value: &T) -> String {
        let mut buf = Vec::new();
        print(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn endpoint_skips_missing_fields() {
        let text = render(
            endpoint,
            &Endpoint {
                name: Some("bidders/1/endpoints/2".to_string()),
                maximum_qps: Some("10".to_string()),
                ..Endpoint::default()
            },
        );
        assert_eq!(
            text,
            "* Endpoint name: bidders/1/endpoints/2\n\t- Maximum QPS: 10\n"
        );
    }

    #[test]
    fn creative_lists_declared_values_and_html() {
        let text = render(
            creative,
            &Creative {
                creative_id: Some("c1".to_string()),
                declared_attributes: vec!["CREATIVE_TYPE_HTML".to_string()],
                html: Some(HtmlContent {
                    snippet: Some("<b/>".to_string()),
                    height: Some(250),
                    width: Some(300),
                }),
                creative_serving_decision: Some(CreativeServingDecision {
                    network_policy_compliance: Some(PolicyCompliance {
                        status: Some("APPROVED".to_string()),
                    }),
                    ..CreativeServingDecision::default()
                }),
                ..Creative::default()
            },
        );
        assert!(text.starts_with("* Creative ID: c1\n"));
        assert!(text.contains("\t\tNetwork policy compliance: APPROVED\n"));
        assert!(text.contains("\t- Declared attributes:\n\t\tCREATIVE_TYPE_HTML\n"));
        assert!(text.contains("\t- HTML creative contents:\n\t\tSnippet: <b/>\n\t\tHeight: 250\n"));
    }

    #[test]
    fn pretargeting_config_renders_targeting() {
        let text = render(
            pretargeting_config,
            &PretargetingConfig {
                name: Some("bidders/1/pretargetingConfigs/2".to_string()),
                web_targeting: Some(StringTargetingDimension {
                    targeting_mode: Some("INCLUSIVE".to_string()),
                    values: vec!["a.com".to_string(), "b.com".to_string()],
                }),
                geo_targeting: Some(NumericTargetingDimension {
                    included_ids: vec!["200635".to_string()],
                    excluded_ids: Vec::new(),
                }),
                ..PretargetingConfig::default()
            },
        );
        assert!(text.contains("\t- Geo targeting:\n\t\tIncluded geo IDs: 200635\n"));
        assert!(text.contains(
            "\t- Web targeting:\n\t\tTargeting mode: INCLUSIVE\n\t\tSite URLs: a.com, b.com\n"
        ));
    }
}
