//! CRM configuration

use std::collections::HashSet;

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::sync::CrmFieldNames;

/// Where and how discovery status is mirrored into the CRM
#[derive(Debug, Clone, Deserialize)]
pub struct CrmConfig {
    /// API domain of the CRM data center
    #[serde(default = "default_api_domain")]
    pub api_domain: String,

    /// API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// CRM module holding the synced records
    #[serde(default = "default_module")]
    pub module: String,

    /// Ask the CRM to run workflow rules on each update
    #[serde(default)]
    pub run_workflows: bool,

    /// API names of the status fields on the CRM layout
    #[serde(default)]
    pub fields: CrmFieldNames,
}

impl CrmConfig {
    /// Endpoint a record update is PUT to.
    pub fn record_endpoint(&self, record_id: &str) -> String {
        format!(
            "{}/crm/{}/{}/{}",
            self.api_domain.trim_end_matches('/'),
            self.api_version,
            self.module,
            record_id
        )
    }

    /// Validate CRM configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.module.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CRM__MODULE"));
        }
        if self.api_version.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CRM__API_VERSION"));
        }
        let https = self.api_domain.starts_with("https://");
        if !https && !self.api_domain.starts_with("http://") {
            return Err(ValidationError::InvalidCrmDomain);
        }
        if production && !https {
            return Err(ValidationError::CrmDomainMustBeHttps);
        }

        let mut seen = HashSet::new();
        for (setting, name) in self.fields.entries() {
            if name.trim().is_empty() {
                return Err(ValidationError::BlankCrmField(setting));
            }
            if !seen.insert(name) {
                return Err(ValidationError::DuplicateCrmField(name.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            api_domain: default_api_domain(),
            api_version: default_api_version(),
            module: default_module(),
            run_workflows: false,
            fields: CrmFieldNames::default(),
        }
    }
}

fn default_api_domain() -> String {
    "https://www.zohoapis.com".to_string()
}

fn default_api_version() -> String {
    "v2".to_string()
}

fn default_module() -> String {
    "Deals".to_string()
}
