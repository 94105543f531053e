//! The visitor/lead record consumed by every search operation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A visitor or lead as returned by the data service.
///
/// Every attribute is optional. Unknown JSON keys are ignored when
/// deserializing, so records coming straight from the API can be used as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRecord {
  pub id: Option<String>,
  pub name: Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub organization: Option<String>,

  pub region: Option<String>,
  pub service: Option<String>,
  pub subservice: Option<String>,
  pub status: Option<String>,
  pub source: Option<String>,
  pub priority: Option<String>,

  pub agent_name: Option<String>,
  pub assigned_agent: Option<String>,
  pub sales_executive_name: Option<String>,
  pub sales_executive: Option<String>,

  pub enquiry_details: Option<String>,
  pub comments: Option<String>,

  pub created_at: Option<DateTime<Utc>>,
  pub last_interaction_at: Option<DateTime<Utc>>,
  pub amount: Option<f64>,
  pub lead_score: Option<f64>,
}

impl SearchRecord {
  /// Creates an empty record.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the value of `field` rendered as text.
  ///
  /// Timestamps render as ISO-8601 with millisecond precision, numbers via
  /// their `Display` impl. Absent attributes yield `None`; an empty string is
  /// returned as-is and left to the caller to skip.
  pub fn field_value(&self, field: RecordField) -> Option<Cow<'_, str>> {
    use RecordField::*;

    let text = match field {
      Id => self.id.as_deref(),
      Name => self.name.as_deref(),
      Email => self.email.as_deref(),
      Phone => self.phone.as_deref(),
      Organization => self.organization.as_deref(),
      Region => self.region.as_deref(),
      Service => self.service.as_deref(),
      Subservice => self.subservice.as_deref(),
      Status => self.status.as_deref(),
      Source => self.source.as_deref(),
      Priority => self.priority.as_deref(),
      AgentName => self.agent_name.as_deref(),
      AssignedAgent => self.assigned_agent.as_deref(),
      SalesExecutiveName => self.sales_executive_name.as_deref(),
      SalesExecutive => self.sales_executive.as_deref(),
      EnquiryDetails => self.enquiry_details.as_deref(),
      Comments => self.comments.as_deref(),
      CreatedAt => return self.created_at.as_ref().map(render_timestamp),
      LastInteractionAt => return self.last_interaction_at.as_ref().map(render_timestamp),
      Amount => return self.amount.map(|n| Cow::Owned(n.to_string())),
      LeadScore => return self.lead_score.map(|n| Cow::Owned(n.to_string())),
    };

    text.map(Cow::Borrowed)
  }

  /// Replaces a text attribute. Returns `false` when `field` is not a text
  /// attribute (timestamps and numbers).
  pub fn set_text(&mut self, field: RecordField, value: impl Into<String>) -> bool {
    use RecordField::*;

    let slot = match field {
      Id => &mut self.id,
      Name => &mut self.name,
      Email => &mut self.email,
      Phone => &mut self.phone,
      Organization => &mut self.organization,
      Region => &mut self.region,
      Service => &mut self.service,
      Subservice => &mut self.subservice,
      Status => &mut self.status,
      Source => &mut self.source,
      Priority => &mut self.priority,
      AgentName => &mut self.agent_name,
      AssignedAgent => &mut self.assigned_agent,
      SalesExecutiveName => &mut self.sales_executive_name,
      SalesExecutive => &mut self.sales_executive,
      EnquiryDetails => &mut self.enquiry_details,
      Comments => &mut self.comments,
      CreatedAt | LastInteractionAt | Amount | LeadScore => return false,
    };
    *slot = Some(value.into());
    true
  }

  /// Sets a text attribute in a chained manner. Non-text fields are ignored.
  pub fn with(mut self, field: RecordField, value: impl Into<String>) -> Self {
    self.set_text(field, value);
    self
  }
}

fn render_timestamp(ts: &DateTime<Utc>) -> Cow<'static, str> {
  Cow::Owned(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Every attribute of a [`SearchRecord`] that can be addressed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
  Id,
  Name,
  Email,
  Phone,
  Organization,
  Region,
  Service,
  Subservice,
  Status,
  Source,
  Priority,
  AgentName,
  AssignedAgent,
  SalesExecutiveName,
  SalesExecutive,
  EnquiryDetails,
  Comments,
  CreatedAt,
  LastInteractionAt,
  Amount,
  LeadScore,
}

impl RecordField {
  /// All fields, in declaration order.
  pub const ALL: [RecordField; 21] = [
    RecordField::Id,
    RecordField::Name,
    RecordField::Email,
    RecordField::Phone,
    RecordField::Organization,
    RecordField::Region,
    RecordField::Service,
    RecordField::Subservice,
    RecordField::Status,
    RecordField::Source,
    RecordField::Priority,
    RecordField::AgentName,
    RecordField::AssignedAgent,
    RecordField::SalesExecutiveName,
    RecordField::SalesExecutive,
    RecordField::EnquiryDetails,
    RecordField::Comments,
    RecordField::CreatedAt,
    RecordField::LastInteractionAt,
    RecordField::Amount,
    RecordField::LeadScore,
  ];

  /// The camelCase name used by the data service.
  pub fn as_str(self) -> &'static str {
    use RecordField::*;

    match self {
      Id => "id",
      Name => "name",
      Email => "email",
      Phone => "phone",
      Organization => "organization",
      Region => "region",
      Service => "service",
      Subservice => "subservice",
      Status => "status",
      Source => "source",
      Priority => "priority",
      AgentName => "agentName",
      AssignedAgent => "assignedAgent",
      SalesExecutiveName => "salesExecutiveName",
      SalesExecutive => "salesExecutive",
      EnquiryDetails => "enquiryDetails",
      Comments => "comments",
      CreatedAt => "createdAt",
      LastInteractionAt => "lastInteractionAt",
      Amount => "amount",
      LeadScore => "leadScore",
    }
  }

  /// Looks a field up by its camelCase name. Unknown names yield `None`.
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.iter().copied().find(|f| f.as_str() == name)
  }
}

impl fmt::Display for RecordField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
