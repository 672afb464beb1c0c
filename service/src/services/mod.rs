pub mod continuation;
pub mod published_items;
pub mod subscriptions;
