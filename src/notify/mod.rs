pub mod discord;
pub mod message;
pub mod mock_sink;
mod notifier;
mod sink;


pub use discord::DiscordSink;
pub use mock_sink::MockSink;
pub use notifier::{select_new, ChangeNotifier, DeliverySettings, TickOutcome};
pub use sink::{ChannelInfo, ChatSink};
