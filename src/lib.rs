pub mod digest;
pub mod fetcher;
pub mod gate;
pub mod mailer;
pub mod pipeline;
pub mod sources;
pub mod state;
pub mod types;

pub use fetcher::{http_client, FetchConfig};
pub use gate::ScheduleConfig;
pub use mailer::Mailer;
pub use pipeline::{DigestPipeline, RunOutcome};
pub use sources::{IpoSource, NasdaqSource, NyseSource};
pub use state::SendStateStore;
pub use types::*;
