use crate::samples::{
    bidder_creatives, bidders, buyer_creatives, buyers, endpoints, pretargeting_configs,
    publisher_connections, user_lists,
};
use anyhow::Result;
use rtb_argparse::{OptionSet, ParsedArguments};
use rtb_client::{PubSub, RealTimeBidding, Transport};
use std::io::Write;

/// What a sample gets to work with: API services, limits and an output sink.
pub struct SampleEnv<'a> {
    pub rtb: RealTimeBidding<'a>,
    pub pubsub: PubSub<'a>,
    pub max_page_size: i64,
    pub out: &'a mut dyn Write,
}

impl<'a> SampleEnv<'a> {
    pub fn new(
        rtb: &'a dyn Transport,
        pubsub: &'a dyn Transport,
        max_page_size: i64,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            rtb: RealTimeBidding::new(rtb),
            pubsub: PubSub::new(pubsub),
            max_page_size,
            out,
        }
    }
}

pub type RunFn = fn(&ParsedArguments, &mut SampleEnv<'_>) -> Result<()>;

/// One runnable sample: declared options plus the function that runs it.
pub struct Sample {
    pub name: &'static str,
    pub description: &'static str,
    pub options: fn() -> OptionSet,
    pub run: RunFn,
}

impl Sample {
    /// Declared options, with the sample's name and description filled in for help.
    pub fn option_set(&self) -> OptionSet {
        (self.options)()
            .named(format!("rtb-samples run {}", self.name))
            .summary(self.description)
    }
}

macro_rules! sample {
    ($name:literal, $module:ident :: $item:ident, $description:literal) => {
        Sample {
            name: $name,
            description: $description,
            options: $module::$item::options,
            run: $module::$item::run,
        }
    };
}

static CATALOG: &[Sample] = &[
    sample!("bidders.get", bidders::get, "Gets a bidder account."),
    sample!("bidders.list", bidders::list, "Lists bidder accounts available to the caller."),
    sample!(
        "bidders.creatives.list",
        bidder_creatives::list,
        "Lists creatives for a bidder and its buyers."
    ),
    sample!(
        "bidders.creatives.watch",
        bidder_creatives::watch,
        "Enables creative status notifications over Pub/Sub."
    ),
    sample!(
        "bidders.creatives.pull_watched_creatives_subscription",
        bidder_creatives::pull,
        "Pulls creative status notifications from a Pub/Sub subscription."
    ),
    sample!("bidders.endpoints.get", endpoints::get, "Gets a bidder endpoint."),
    sample!("bidders.endpoints.list", endpoints::list, "Lists a bidder's endpoints."),
    sample!(
        "bidders.endpoints.patch",
        endpoints::patch,
        "Patches QPS, trading location and protocol of an endpoint."
    ),
    sample!(
        "bidders.pretargeting_configs.get",
        pretargeting_configs::get,
        "Gets a pretargeting configuration."
    ),
    sample!(
        "bidders.pretargeting_configs.list",
        pretargeting_configs::list,
        "Lists a bidder's pretargeting configurations."
    ),
    sample!(
        "bidders.pretargeting_configs.create",
        pretargeting_configs::create,
        "Creates a pretargeting configuration."
    ),
    sample!(
        "bidders.pretargeting_configs.patch",
        pretargeting_configs::patch,
        "Patches a pretargeting configuration."
    ),
    sample!(
        "bidders.pretargeting_configs.delete",
        pretargeting_configs::delete,
        "Deletes a pretargeting configuration."
    ),
    sample!(
        "bidders.pretargeting_configs.activate",
        pretargeting_configs::activate,
        "Activates a suspended pretargeting configuration."
    ),
    sample!(
        "bidders.pretargeting_configs.suspend",
        pretargeting_configs::suspend,
        "Suspends an active pretargeting configuration."
    ),
    sample!(
        "bidders.pretargeting_configs.add_targeted_sites",
        pretargeting_configs::add_targeted_sites,
        "Adds sites to web targeting."
    ),
    sample!(
        "bidders.pretargeting_configs.remove_targeted_sites",
        pretargeting_configs::remove_targeted_sites,
        "Removes sites from web targeting."
    ),
    sample!(
        "bidders.pretargeting_configs.add_targeted_apps",
        pretargeting_configs::add_targeted_apps,
        "Adds apps to mobile app targeting."
    ),
    sample!(
        "bidders.pretargeting_configs.remove_targeted_apps",
        pretargeting_configs::remove_targeted_apps,
        "Removes apps from mobile app targeting."
    ),
    sample!(
        "bidders.pretargeting_configs.add_targeted_publishers",
        pretargeting_configs::add_targeted_publishers,
        "Adds publishers to publisher targeting."
    ),
    sample!(
        "bidders.pretargeting_configs.remove_targeted_publishers",
        pretargeting_configs::remove_targeted_publishers,
        "Removes publishers from publisher targeting."
    ),
    sample!(
        "bidders.publisher_connections.get",
        publisher_connections::get,
        "Gets a publisher connection."
    ),
    sample!(
        "bidders.publisher_connections.list",
        publisher_connections::list,
        "Lists a bidder's publisher connections."
    ),
    sample!(
        "bidders.publisher_connections.batch_approve",
        publisher_connections::batch_approve,
        "Approves one or more publisher connections."
    ),
    sample!(
        "bidders.publisher_connections.batch_reject",
        publisher_connections::batch_reject,
        "Rejects one or more publisher connections."
    ),
    sample!("buyers.get", buyers::get, "Gets a buyer account."),
    sample!("buyers.list", buyers::list, "Lists buyer accounts available to the caller."),
    sample!("buyers.creatives.get", buyer_creatives::get, "Gets a buyer's creative."),
    sample!("buyers.creatives.list", buyer_creatives::list, "Lists a buyer's creatives."),
    sample!(
        "buyers.creatives.create_html",
        buyer_creatives::create_html,
        "Creates an HTML creative."
    ),
    sample!(
        "buyers.creatives.create_native",
        buyer_creatives::create_native,
        "Creates a native creative."
    ),
    sample!(
        "buyers.creatives.create_video",
        buyer_creatives::create_video,
        "Creates a VAST video creative."
    ),
    sample!(
        "buyers.creatives.patch",
        buyer_creatives::patch,
        "Patches a creative's advertiser name and click-through URLs."
    ),
    sample!("buyers.user_lists.get", user_lists::get, "Gets a user list."),
    sample!("buyers.user_lists.list", user_lists::list, "Lists a buyer's user lists."),
    sample!("buyers.user_lists.create", user_lists::create, "Creates a user list."),
    sample!("buyers.user_lists.update", user_lists::update, "Replaces a user list."),
    sample!("buyers.user_lists.close", user_lists::close, "Closes a user list."),
    sample!("buyers.user_lists.open", user_lists::open, "Reopens a closed user list."),
];

pub fn catalog() -> &'static [Sample] {
    CATALOG
}

pub fn find(name: &str) -> Option<&'static Sample> {
    CATALOG.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();
        for sample in catalog() {
            assert!(seen.insert(sample.name), "duplicate sample {}", sample.name);
        }
    }

    #[test]
    fn every_option_set_is_well_formed() {
        // Definition conflicts surface on parse; help never validates input.
        for sample in catalog() {
            let outcome = sample.option_set().parse(["--help"]);
            assert!(
                matches!(outcome, Ok(rtb_argparse::ParseOutcome::Help(_))),
                "{} has conflicting option declarations",
                sample.name
            );
        }
    }

    #[test]
    fn find_by_dotted_name() {
        let sample = find("bidders.endpoints.patch").unwrap();
        let help = match sample.option_set().parse(["-h"]).unwrap() {
            rtb_argparse::ParseOutcome::Help(text) => text,
            other => panic!("expected help, got {other:?}"),
        };
        assert!(help.starts_with("rtb-samples run bidders.endpoints.patch - "));
        assert!(help.contains("--maximum_qps"));
        assert!(find("bidders.endpoints.nope").is_none());
    }
}
