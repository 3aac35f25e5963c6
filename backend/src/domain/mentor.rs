//! Mentor profiles.
//!
//! A [`Mentor`] is created by self-registration and read by the directory.
//! Registration input arrives as a loose [`MentorProfileInput`] which must be
//! validated into a [`MentorProfile`] before anything reaches the store.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Error, MentorId, OfferedSlots};

/// Field-level validation failures for a mentor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentorValidationError {
    EmptyName,
    EmptyAlmaMater,
    EmptyExpertiseArea,
    EmptyDesignation,
    EmptyCompanyName,
    NoSlots,
}

impl MentorValidationError {
    /// Name of the offending input field.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyAlmaMater => "almaMater",
            Self::EmptyExpertiseArea => "expertiseArea",
            Self::EmptyDesignation => "currentDesignation",
            Self::EmptyCompanyName => "companyName",
            Self::NoSlots => "slotsForMentoring",
        }
    }
}

impl fmt::Display for MentorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::EmptyName => "Name is required",
            Self::EmptyAlmaMater => "Alma Mater is required",
            Self::EmptyExpertiseArea => "Expertise Area is required",
            Self::EmptyDesignation => "Current Designation is required",
            Self::EmptyCompanyName => "Company Name is required",
            Self::NoSlots => "At least one mentoring slot is required",
        };
        f.write_str(message)
    }
}

impl std::error::Error for MentorValidationError {}

impl From<MentorValidationError> for Error {
    fn from(value: MentorValidationError) -> Self {
        Self::validation_failed(value.to_string()).with_details(json!({ "field": value.field() }))
    }
}

/// Unvalidated registration form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MentorProfileInput {
    pub is_alumni: bool,
    pub available_to_mentor: bool,
    pub name: String,
    pub alma_mater: String,
    pub expertise_area: String,
    pub current_designation: String,
    pub company_name: String,
    pub slots_for_mentoring: OfferedSlots,
}

/// Validated mentor profile.
///
/// ## Invariants
/// - Every text field is trimmed and non-empty.
/// - At least one slot is offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorProfile {
    is_alumni: bool,
    available_to_mentor: bool,
    name: String,
    alma_mater: String,
    expertise_area: String,
    current_designation: String,
    company_name: String,
    slots: OfferedSlots,
}

fn required(value: &str, error: MentorValidationError) -> Result<String, MentorValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

impl MentorProfile {
    /// Validate form values, reporting the first failing field in form order.
    ///
    /// # Examples
    /// ```
    /// use mentorship::domain::{MentorProfile, MentorProfileInput, MentorValidationError};
    ///
    /// let input = MentorProfileInput {
    ///     name: "Ada".into(),
    ///     ..MentorProfileInput::default()
    /// };
    /// let err = MentorProfile::try_from_input(&input).unwrap_err();
    /// assert_eq!(err, MentorValidationError::EmptyAlmaMater);
    /// ```
    pub fn try_from_input(input: &MentorProfileInput) -> Result<Self, MentorValidationError> {
        let name = required(&input.name, MentorValidationError::EmptyName)?;
        let alma_mater = required(&input.alma_mater, MentorValidationError::EmptyAlmaMater)?;
        let expertise_area =
            required(&input.expertise_area, MentorValidationError::EmptyExpertiseArea)?;
        let current_designation =
            required(&input.current_designation, MentorValidationError::EmptyDesignation)?;
        let company_name = required(&input.company_name, MentorValidationError::EmptyCompanyName)?;
        if input.slots_for_mentoring.is_empty() {
            return Err(MentorValidationError::NoSlots);
        }

        Ok(Self {
            is_alumni: input.is_alumni,
            available_to_mentor: input.available_to_mentor,
            name,
            alma_mater,
            expertise_area,
            current_designation,
            company_name,
            slots: input.slots_for_mentoring.clone(),
        })
    }

    /// Offered slots.
    pub fn slots(&self) -> &OfferedSlots {
        &self.slots
    }

    /// Attach the registering identity to produce a [`Mentor`].
    pub fn into_mentor(self, id: MentorId) -> Mentor {
        Mentor {
            id,
            name: self.name,
            current_designation: self.current_designation,
            company_name: self.company_name,
            expertise_area: self.expertise_area,
            alma_mater: self.alma_mater,
            is_alumni: self.is_alumni,
            available_to_mentor: self.available_to_mentor,
            slots: self.slots,
        }
    }
}

/// A registered mentor as read from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: MentorId,
    pub name: String,
    pub current_designation: String,
    pub company_name: String,
    pub expertise_area: String,
    pub alma_mater: String,
    #[serde(default)]
    pub is_alumni: bool,
    pub available_to_mentor: bool,
    #[serde(rename = "slotsForMentoring")]
    pub slots: OfferedSlots,
}

impl Mentor {
    /// Display fields denormalised onto bookings.
    pub fn summary(&self) -> MentorSummary {
        MentorSummary {
            name: self.name.clone(),
            current_designation: self.current_designation.clone(),
            company_name: self.company_name.clone(),
            expertise_area: self.expertise_area.clone(),
        }
    }
}

/// Mentor display fields joined onto a booking at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorSummary {
    pub name: String,
    pub current_designation: String,
    pub company_name: String,
    pub expertise_area: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn complete_input() -> MentorProfileInput {
        let slot = Utc
            .with_ymd_and_hms(2025, 1, 10, 9, 0, 0)
            .single()
            .expect("valid slot");
        MentorProfileInput {
            is_alumni: true,
            available_to_mentor: true,
            name: "  Grace Hopper ".to_owned(),
            alma_mater: "Yale".to_owned(),
            expertise_area: "Compilers".to_owned(),
            current_designation: "Rear Admiral".to_owned(),
            company_name: "US Navy".to_owned(),
            slots_for_mentoring: OfferedSlots::from(vec![slot]),
        }
    }

    #[rstest]
    fn complete_input_validates_and_trims(complete_input: MentorProfileInput) {
        let profile = MentorProfile::try_from_input(&complete_input).expect("valid profile");
        let mentor = profile.into_mentor(MentorId::new("user_grace").expect("valid id"));
        assert_eq!(mentor.name, "Grace Hopper");
        assert!(mentor.available_to_mentor);
        assert_eq!(mentor.slots.len(), 1);
    }

    #[rstest]
    #[case(|input: &mut MentorProfileInput| input.name.clear(), MentorValidationError::EmptyName)]
    #[case(|input: &mut MentorProfileInput| input.alma_mater = "  ".to_owned(), MentorValidationError::EmptyAlmaMater)]
    #[case(|input: &mut MentorProfileInput| input.expertise_area.clear(), MentorValidationError::EmptyExpertiseArea)]
    #[case(|input: &mut MentorProfileInput| input.current_designation.clear(), MentorValidationError::EmptyDesignation)]
    #[case(|input: &mut MentorProfileInput| input.company_name.clear(), MentorValidationError::EmptyCompanyName)]
    #[case(|input: &mut MentorProfileInput| input.slots_for_mentoring.clear(), MentorValidationError::NoSlots)]
    fn missing_fields_are_reported(
        mut complete_input: MentorProfileInput,
        #[case] mutate: fn(&mut MentorProfileInput),
        #[case] expected: MentorValidationError,
    ) {
        mutate(&mut complete_input);
        let error = MentorProfile::try_from_input(&complete_input).expect_err("invalid profile");
        assert_eq!(error, expected);
    }

    #[rstest]
    fn validation_errors_convert_to_domain_errors() {
        let error = Error::from(MentorValidationError::NoSlots);
        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        assert_eq!(error.message(), "At least one mentoring slot is required");
        assert_eq!(error.details(), Some(&json!({"field": "slotsForMentoring"})));
    }

    #[rstest]
    fn input_deserialises_from_camel_case_json() {
        let input: MentorProfileInput = serde_json::from_str(
            r#"{
                "name": "Ada",
                "almaMater": "Cambridge",
                "availableToMentor": true,
                "slotsForMentoring": ["2025-01-10T09:00:00Z"]
            }"#,
        )
        .expect("valid input");
        assert!(input.available_to_mentor);
        assert!(!input.is_alumni);
        assert_eq!(input.slots_for_mentoring.len(), 1);
    }
}
