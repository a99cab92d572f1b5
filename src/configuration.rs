//! src/configuration.rs
use crate::email_client::MailError;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub smtp: SmtpSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

/// Outbound mail settings as they were found in the environment.
///
/// Every field is optional: a half-configured environment must not stop the
/// server from starting. Completeness is checked by [`SmtpSettings::transport_config`]
/// each time the mail adapter is used.
#[derive(serde::Deserialize, Clone, Debug, Default)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<Secret<String>>,
    pub from: Option<String>,
}

/// Fully present SMTP settings, ready to hand to a transport.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub from: String,
}

impl TransportConfig {
    /// Port 465 speaks TLS from the first byte, everything else upgrades with STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

impl SmtpSettings {
    /// Read `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASSWORD` and `SMTP_FROM`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("SMTP").prefix_separator("_"))
            .build()?
            .try_deserialize::<SmtpSettings>()
    }

    pub fn transport_config(&self) -> Result<TransportConfig, MailError> {
        let missing: Vec<&str> = [
            ("SMTP_HOST", present(&self.host)),
            ("SMTP_PORT", present(&self.port)),
            ("SMTP_USER", present(&self.user)),
            (
                "SMTP_PASSWORD",
                self.password
                    .as_ref()
                    .map(|p| p.expose_secret().as_str())
                    .filter(|p| !p.is_empty()),
            ),
            ("SMTP_FROM", present(&self.from)),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.is_none().then_some(name))
        .collect();
        if !missing.is_empty() {
            return Err(MailError::Configuration(format!(
                "SMTP env vars are missing: {}",
                missing.join(", ")
            )));
        }

        let raw_port = present(&self.port).unwrap_or_default();
        let port = raw_port.trim().parse::<u16>().map_err(|_| {
            MailError::Configuration(format!("SMTP_PORT is not a valid port number: {raw_port}"))
        })?;

        Ok(TransportConfig {
            host: present(&self.host).unwrap_or_default().trim().to_string(),
            port,
            username: present(&self.user).unwrap_or_default().to_string(),
            password: self
                .password
                .clone()
                .unwrap_or_else(|| Secret::new(String::new())),
            from: present(&self.from).unwrap_or_default().trim().to_string(),
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let mut settings = settings.try_deserialize::<Settings>()?;
    settings.smtp = SmtpSettings::from_env()?;
    Ok(settings)
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
