pub mod allow_list;
pub mod config;
pub mod error;
pub mod feed;
pub mod session;
pub mod sink;

pub use allow_list::AllowList;
pub use config::{ConfigSource, HostConfig, default_base_dir, load_config};
pub use error::{HostError, Result};
pub use feed::{FeedEntry, FeedState, Frame, parse_feed, read_feed};
pub use session::{Activation, Session};
pub use sink::{NotificationSink, NullSink, RecordingSink};
