pub mod tracking;
pub mod users;

pub use tracking::TrackingStore;
pub use users::{UserRecord, UserRepository};
