mod store;

pub use store::{AccountError, AccountStore, UserRecord};
