use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::errors::ValidationError;

fn required_text(value: impl Into<String>, field: &str, max: usize) -> Result<String, ValidationError> {
  let value = value.into().trim().to_string();

  if value.is_empty() {
    return Err(ValidationError::FieldRequired {
      field: field.to_string(),
    });
  }

  if value.chars().count() > max {
    return Err(ValidationError::FieldTooLong {
      field: field.to_string(),
      max,
    });
  }

  Ok(value)
}

/// Project name value object with validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
  const MAX_LENGTH: usize = 255;

  pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
    required_text(name, "name", Self::MAX_LENGTH).map(Self)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

/// Optional free text; blank input becomes `None`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Description(Option<String>);

impl Description {
  const MAX_LENGTH: usize = 5000;

  pub fn new(description: Option<String>) -> Result<Self, ValidationError> {
    let description = description
      .map(|d| d.trim().to_string())
      .filter(|d| !d.is_empty());

    if let Some(d) = &description {
      if d.chars().count() > Self::MAX_LENGTH {
        return Err(ValidationError::FieldTooLong {
          field: "description".to_string(),
          max: Self::MAX_LENGTH,
        });
      }
    }

    Ok(Self(description))
  }

  pub fn into_inner(self) -> Option<String> {
    self.0
  }
}

/// Start and end date pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
}

impl Schedule {
  pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ValidationError> {
    if end_date < start_date {
      return Err(ValidationError::EndBeforeStart);
    }

    Ok(Self {
      start_date,
      end_date,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveContent(String);

impl ObjectiveContent {
  const MAX_LENGTH: usize = 1000;

  pub fn new(content: impl Into<String>) -> Result<Self, ValidationError> {
    required_text(content, "content", Self::MAX_LENGTH).map(Self)
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorItemName(String);

impl MajorItemName {
  const MAX_LENGTH: usize = 255;

  pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
    required_text(name, "name", Self::MAX_LENGTH).map(Self)
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

/// Task title ("minor item")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
  const MAX_LENGTH: usize = 500;

  pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
    required_text(title, "minor_item", Self::MAX_LENGTH).map(Self)
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostDescription(String);

impl CostDescription {
  const MAX_LENGTH: usize = 500;

  pub fn new(description: impl Into<String>) -> Result<Self, ValidationError> {
    required_text(description, "description", Self::MAX_LENGTH).map(Self)
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

/// Strictly positive money amount that fits NUMERIC(14, 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
  const MAX_SCALE: u32 = 2;
  const LIMIT: i64 = 1_000_000_000_000;

  pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
    if amount <= Decimal::ZERO {
      return Err(ValidationError::NonPositiveAmount);
    }
    // Trailing zeros do not count: 12.500 is stored as 12.50
    if amount.normalize().scale() > Self::MAX_SCALE {
      return Err(ValidationError::AmountTooPrecise {
        max: Self::MAX_SCALE,
      });
    }
    let limit = Decimal::from(Self::LIMIT);
    if amount >= limit {
      return Err(ValidationError::AmountTooLarge { limit });
    }

    Ok(Self(amount))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}
