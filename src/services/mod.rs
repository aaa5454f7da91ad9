pub mod health;
pub mod notifier;
pub mod registry;
pub mod reminder;
pub mod timer;
