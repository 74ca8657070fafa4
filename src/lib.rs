pub mod api_client;
pub mod cascade;
pub mod config;
pub mod error;
pub mod http_client;
pub mod models;
pub mod shape;

pub use api_client::FootballApi;
pub use cascade::{Cascade, LeagueScope, TeamScope};
pub use error::{ApiError, ApiResult};
pub use http_client::{ClientConfig, HttpTransport, RawResponse, Transport};
