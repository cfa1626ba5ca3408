//! Notification Port - User-visible messages

/// Port for showing a message to the user
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait NotificationPort: Send + Sync {
    fn show_message(&self, message: &str);
}
