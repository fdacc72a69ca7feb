use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type JobId = i64;

/// Literal shown for any optional field that is absent or blank.
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_COMPANY: &str = "No Name";
pub const NO_TITLE: &str = "No Title";

/// One job listing as served by the feed and as stored in the bookmark list.
///
/// Fields the feed sends that are not modelled here are kept in `extra`, so a
/// record written back to storage carries everything the feed gave us.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "PrimaryDetails::is_empty"
    )]
    pub primary_details: PrimaryDetails,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub whatsapp_no: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrimaryDetails {
    #[serde(
        rename = "Place",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub place: Option<String>,
    #[serde(
        rename = "Salary",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary: Option<String>,
    #[serde(
        rename = "Job_Type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_type: Option<String>,
    #[serde(
        rename = "Experience",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub experience: Option<String>,
    #[serde(
        rename = "Fees_Charged",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub fees: Option<String>,
    #[serde(
        rename = "Qualification",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub qualification: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// Minimal record, mostly useful for tests and fixtures.
    pub fn new(id: JobId, company_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            company_name: Some(company_name.into()),
            title: Some(title.into()),
            primary_details: PrimaryDetails::default(),
            whatsapp_no: None,
            extra: Map::new(),
        }
    }

    pub fn display_company(&self) -> String {
        or_fallback(self.company_name.as_deref(), NO_COMPANY)
    }

    pub fn display_title(&self) -> String {
        or_fallback(self.title.as_deref(), NO_TITLE)
    }

    pub fn display_phone(&self) -> String {
        or_fallback(self.whatsapp_no.as_deref(), NOT_AVAILABLE)
    }
}

impl PrimaryDetails {
    pub fn is_empty(&self) -> bool {
        self.place.is_none()
            && self.salary.is_none()
            && self.job_type.is_none()
            && self.experience.is_none()
            && self.fees.is_none()
            && self.qualification.is_none()
            && self.extra.is_empty()
    }

    pub fn display_place(&self) -> String {
        or_fallback(self.place.as_deref(), NOT_AVAILABLE)
    }

    pub fn display_salary(&self) -> String {
        or_fallback(self.salary.as_deref(), NOT_AVAILABLE)
    }

    pub fn display_job_type(&self) -> String {
        or_fallback(self.job_type.as_deref(), NOT_AVAILABLE)
    }

    pub fn display_experience(&self) -> String {
        or_fallback(self.experience.as_deref(), NOT_AVAILABLE)
    }

    pub fn display_fees(&self) -> String {
        or_fallback(self.fees.as_deref(), NOT_AVAILABLE)
    }

    pub fn display_qualification(&self) -> String {
        or_fallback(self.qualification.as_deref(), NOT_AVAILABLE)
    }
}

/// Blank strings count as missing, same as an absent field.
pub fn or_fallback(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
