//! per-type value synthesis and input validation
use crate::metadata::FieldType;
use crate::network::{AddressDiscovery, AddressFamily, Discovery, RouteDiscovery};
use crate::secret::{RandomSourceError, SecretGenerator};
use rand::RngCore;
use std::net::IpAddr;

impl FieldType {
    /// Address family to discover for IP types, `None` for everything else
    pub fn address_family(self) -> Option<AddressFamily> {
        match self {
            FieldType::Ip => Some(AddressFamily::Any),
            FieldType::Ipv4 => Some(AddressFamily::V4),
            FieldType::Ipv6 => Some(AddressFamily::V6),
            _ => None,
        }
    }

    /// Check user input against this type
    ///
    /// Returns the normalized value, or `None` if the input is invalid. Empty input is always
    /// valid and is returned unchanged.
    pub fn validate(self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return Some(String::new());
        }

        let valid = match self {
            FieldType::String => true,
            FieldType::Int => input.parse::<i64>().is_ok(),
            FieldType::Float => input.parse::<f64>().is_ok(),
            FieldType::Bool => {
                return match input.to_lowercase().as_str() {
                    "true" | "yes" | "1" => Some("true".to_string()),
                    "false" | "no" | "0" => Some("false".to_string()),
                    _ => None,
                };
            }
            FieldType::Url => input.starts_with("http://") || input.starts_with("https://"),
            FieldType::Email => input.contains('@') && input.contains('.') && !input.contains(' '),
            FieldType::Ip => input.parse::<IpAddr>().is_ok(),
            FieldType::Ipv4 => input.parse::<IpAddr>().is_ok_and(|ip| ip.is_ipv4()),
            FieldType::Ipv6 => input.parse::<IpAddr>().is_ok_and(|ip| ip.is_ipv6()),
        };

        valid.then(|| input.to_string())
    }

    /// Hint shown when [FieldType::validate] rejects input
    pub fn hint(self) -> &'static str {
        match self {
            FieldType::String => "Please enter a value.",
            FieldType::Int => "Invalid integer value. Please enter a valid number.",
            FieldType::Float => "Invalid float value. Please enter a valid number.",
            FieldType::Bool => "Invalid boolean value. Please enter true/false, yes/no, or 1/0.",
            FieldType::Url => "Invalid URL. URL should start with http:// or https://",
            FieldType::Email => "Invalid email address. Please enter a valid email.",
            FieldType::Ip => "Invalid IP address. Please enter a valid IPv4 or IPv6 address.",
            FieldType::Ipv4 => "Invalid IP address. Please enter a valid IPv4 address.",
            FieldType::Ipv6 => "Invalid IP address. Please enter a valid IPv6 address.",
        }
    }
}

/// Produces values for fields that need one
pub struct ValueProvider {
    generator: SecretGenerator,
    rng: Box<dyn RngCore>,
    discovery: Box<dyn AddressDiscovery>,
}

impl ValueProvider {
    /// Provider backed by the OS random source and route based address discovery
    pub fn new(generator: SecretGenerator) -> Self {
        Self {
            generator,
            rng: Box::new(rand::rngs::OsRng),
            discovery: Box::new(RouteDiscovery),
        }
    }

    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_discovery(mut self, discovery: impl AddressDiscovery + 'static) -> Self {
        self.discovery = Box::new(discovery);
        self
    }

    pub fn generator(&self) -> &SecretGenerator {
        &self.generator
    }

    /// A random value from the configured length and charset
    pub fn secret(&mut self) -> Result<String, RandomSourceError> {
        self.generator.generate_with(self.rng.as_mut())
    }

    /// A value for a field of the given type
    ///
    /// IP types use a discovered local address and fall back to a random value when discovery
    /// is unavailable. Every other type gets a random value.
    pub fn synthesize(&mut self, field_type: FieldType) -> Result<String, RandomSourceError> {
        let Some(family) = field_type.address_family() else {
            return self.secret();
        };

        match self.discovery.discover(family) {
            Discovery::Found(addr) => Ok(addr.to_string()),
            Discovery::Unavailable(reason) => {
                tracing::debug!(%field_type, %reason, "address discovery unavailable, generating");
                self.secret()
            }
        }
    }
}

impl std::fmt::Debug for ValueProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueProvider")
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}
