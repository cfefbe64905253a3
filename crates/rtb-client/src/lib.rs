//! Synchronous callers for the Authorized Buyers Real-time Bidding v1 API and the
//! Cloud Pub/Sub v1 API.
//!
//! Every operation goes through a [`Transport`]. [`HttpTransport`] performs real
//! HTTPS calls with a bearer token; [`MockTransport`] records requests and replays
//! canned responses.
//!
//! ```
//! use rtb_client::{ListParams, MockTransport, RealTimeBidding, collect_pages};
//!
//! let mock = MockTransport::new();
//! mock.respond(serde_json::json!({"buyers": [{"name": "buyers/1"}]}));
//! let rtb = RealTimeBidding::new(&mock);
//! let params = ListParams::with_page_size(50);
//! let buyers = collect_pages(|token| rtb.list_buyers(&params.at_page(token))).unwrap();
//! assert_eq!(buyers[0].name.as_deref(), Some("buyers/1"));
//! ```

mod auth;
mod endpoint;
mod error;
mod mock;
pub mod model;
mod paging;
pub mod paths;
mod pubsub;
mod realtimebidding;
mod transport;

pub use auth::{ACCESS_TOKEN_ENV, Credentials, PUBSUB_SCOPE, REALTIME_BIDDING_SCOPE};
pub use endpoint::{PUBSUB_V1, REALTIME_BIDDING_V1, ServiceEndpoint};
pub use error::ApiError;
pub use mock::MockTransport;
pub use paging::{Page, Paged, collect_pages, for_each_page};
pub use pubsub::PubSub;
pub use realtimebidding::{ListParams, RealTimeBidding};
pub use transport::{ApiRequest, HttpTransport, Method, Transport};
