use tarefa_utils::create_random_secret;
use tracing::{info, warn};

/// SMTP relay settings for the email channel. All fields default to empty,
/// in which case the email sender reports itself as not configured.
#[derive(Debug, Clone, Default)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from: String,
}

impl SmtpSettings {
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.user.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign and verify user JWTs
    pub jwt_secret: String,
    /// Origins allowed by CORS. Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<String>,
    /// Master switch for the reminder subsystem. When false the scheduler
    /// is never started.
    pub notifications_enabled: bool,
    /// 5-field cron expression driving the reminder check cadence
    pub notification_check_interval: String,
    pub smtp: SmtpSettings,
    /// Telegram bot token; empty means the telegram sender reports itself
    /// as not configured.
    pub telegram_bot_token: String,
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("JWT secret was generated. Sessions will not survive a restart.");
                secret
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty() && origin != "*")
            .collect();

        let notifications_enabled = match std::env::var("NOTIFICATIONS_ENABLED") {
            Ok(enabled) => enabled == "true" || enabled == "1",
            Err(_) => true,
        };

        // Default: every hour, on the hour
        let notification_check_interval =
            std::env::var("NOTIFICATION_CHECK_INTERVAL").unwrap_or_else(|_| "0 * * * *".into());

        let smtp_port = std::env::var("SMTP_PORT").unwrap_or_else(|_| "587".into());
        let smtp_port = match smtp_port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given SMTP_PORT: {} is not valid, falling back to 587.",
                    smtp_port
                );
                587
            }
        };
        let smtp = SmtpSettings {
            host: std::env::var("SMTP_HOST").unwrap_or_default(),
            port: smtp_port,
            user: std::env::var("SMTP_USER").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from: std::env::var("SMTP_FROM").unwrap_or_default(),
        };

        let telegram_bot_token = std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default();

        let config = Self {
            port,
            jwt_secret,
            cors_allowed_origins,
            notifications_enabled,
            notification_check_interval,
            smtp,
            telegram_bot_token,
        };
        config.log_status();
        config
    }

    fn log_status(&self) {
        info!("Notifications enabled: {}", self.notifications_enabled);
        info!(
            "Notification check interval: {}",
            self.notification_check_interval
        );
        info!("SMTP relay: {}", mask_if_empty(&self.smtp.host));
        info!("Telegram bot token: {}", mask_if_empty(&self.telegram_bot_token));
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn mask_if_empty(value: &str) -> &'static str {
    if value.is_empty() {
        "[NOT CONFIGURED]"
    } else {
        "[CONFIGURED]"
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn smtp_settings_require_host_user_and_password() {
        let mut smtp = SmtpSettings::default();
        assert!(!smtp.is_configured());

        smtp.host = "smtp.example.com".into();
        smtp.user = "mailer".into();
        assert!(!smtp.is_configured());

        smtp.password = "hunter2".into();
        assert!(smtp.is_configured());
    }
}
