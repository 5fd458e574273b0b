//! Server Configuration
//!
//! Everything comes from environment variables with local-dev defaults.

/// Runtime configuration for the HTTP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub bind_addr: String,
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Emails granted the admin flag at login (lowercased).
    pub admin_emails: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            db_path: "dailyread.db".to_string(),
            admin_emails: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    ///
    /// `DAILYREAD_ADDR`, `DAILYREAD_DB`, and `DAILYREAD_ADMIN_EMAILS`
    /// (comma-separated) override the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("DAILYREAD_ADDR").unwrap_or(defaults.bind_addr),
            db_path: std::env::var("DAILYREAD_DB").unwrap_or(defaults.db_path),
            admin_emails: std::env::var("DAILYREAD_ADMIN_EMAILS")
                .map(|raw| parse_email_list(&raw))
                .unwrap_or_default(),
        }
    }

    /// Should this email carry the admin flag?
    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }
}

fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}
