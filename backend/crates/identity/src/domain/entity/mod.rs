pub mod account;
pub mod account_profile;

pub use account::Account;
pub use account_profile::AccountProfile;
