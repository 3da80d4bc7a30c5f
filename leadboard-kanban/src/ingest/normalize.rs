//! Field-name normalization for webhook payloads

use super::RawPayload;
use crate::types::LeadFields;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name given to leads whose payload carried none
pub const UNNAMED_LEAD: &str = "Unnamed";

/// Lead fields recovered from a payload; any of them may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub campaign_source: Option<String>,
}

impl NormalizedLead {
    /// Lead fields, with [`UNNAMED_LEAD`] standing in for a missing name
    pub fn into_fields(self) -> LeadFields {
        LeadFields {
            name: self.name.unwrap_or_else(|| UNNAMED_LEAD.to_string()),
            email: self.email,
            phone: self.phone,
            company: self.company,
            notes: self.message,
            campaign_source: self.campaign_source,
        }
    }
}

/// Maps arbitrary payload keys onto lead fields
pub trait LeadNormalizer: Send + Sync {
    fn normalize(&self, payload: &RawPayload) -> NormalizedLead;
}

const NAME_KEYS: &[&str] = &[
    "name",
    "nome",
    "nome_completo",
    "full_name",
    "fullname",
    "Name",
    "Nome",
    "Nome Completo",
];
const EMAIL_KEYS: &[&str] = &[
    "email",
    "e-mail",
    "Email",
    "E-mail",
    "email_corporativo",
    "Email Corporativo",
];
const PHONE_KEYS: &[&str] = &[
    "phone",
    "telefone",
    "whatsapp",
    "celular",
    "tel",
    "Phone",
    "Telefone",
    "WhatsApp",
    "Celular",
];
const COMPANY_KEYS: &[&str] = &["company", "empresa", "Company", "Empresa", "company_name"];
const MESSAGE_KEYS: &[&str] = &[
    "message",
    "mensagem",
    "notes",
    "observacoes",
    "Message",
    "Mensagem",
    "Observações",
];
const CAMPAIGN_KEYS: &[&str] = &[
    "campaign_source",
    "utm_campaign",
    "utm_source",
    "campaign",
    "campanha",
];

/// Alias-list normalizer covering common English and Portuguese form
/// field names. For each field the first alias with a non-blank value wins.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedNormalizer;

impl RuleBasedNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl LeadNormalizer for RuleBasedNormalizer {
    fn normalize(&self, payload: &RawPayload) -> NormalizedLead {
        let fields = payload.fields();
        NormalizedLead {
            name: first_value(fields, NAME_KEYS),
            email: first_value(fields, EMAIL_KEYS),
            phone: first_value(fields, PHONE_KEYS),
            company: first_value(fields, COMPANY_KEYS),
            message: first_value(fields, MESSAGE_KEYS),
            campaign_source: first_value(fields, CAMPAIGN_KEYS),
        }
    }
}

fn first_value(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(stringify)
}

/// Scalars become strings; null and blank strings count as absent
fn stringify(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}
