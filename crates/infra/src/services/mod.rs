mod transport;

pub use transport::{HttpPushTransport, ITransport};
