//! Notifications Config

use clap::Args;

/// Outbound notification settings.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// Recipient for administrative notifications (new orders, new partners)
    #[arg(long, env = "ADMIN_EMAIL")]
    pub admin_email: String,
}
