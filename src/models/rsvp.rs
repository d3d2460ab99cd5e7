use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub name: String,
    pub meal_choice: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: Uuid,
    pub name: String,
    pub guests: Option<Json<Vec<Guest>>>,
    pub attending: Option<bool>,
    pub plus_one: bool,
    pub plus_one_name: String,
    pub plus_one_meal_choice: String,
    pub meal_choice: String,
    pub accommodation: bool,
    pub number_of_kids: i32,
    pub submitted: bool,
    pub is_predefined: bool,
    pub ask_for_plus_one: bool,
    pub ask_for_kids: bool,
    pub max_number_of_kids: i32,
    pub ask_for_accommodation: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRsvpRequest {
    pub name: String,
    pub guests: Option<Vec<Guest>>,
    pub attending: Option<bool>,
    pub plus_one: bool,
    pub plus_one_name: Option<String>,
    pub plus_one_meal_choice: Option<String>,
    pub meal_choice: Option<String>,
    pub accommodation: bool,
    pub number_of_kids: Option<i32>,
}

/// Which set of answer fields is authoritative for a submission. A non-empty
/// guest list means a pre-defined group invite; everything else is a single
/// guest answering for themselves (optionally with a plus one).
#[derive(Debug)]
pub enum GuestMode<'a> {
    Group(&'a [Guest]),
    Single {
        meal_choice: &'a str,
        plus_one: bool,
        plus_one_name: &'a str,
        plus_one_meal_choice: &'a str,
    },
}

/// Normalized field set written to the store on every submit. Callers must
/// resend the complete record; fields absent from the request are reset to
/// their empty defaults, not preserved.
#[derive(Debug, Clone)]
pub struct RsvpPayload {
    pub name: String,
    pub guests: Option<Json<Vec<Guest>>>,
    pub attending: Option<bool>,
    pub plus_one: bool,
    pub plus_one_name: String,
    pub plus_one_meal_choice: String,
    pub meal_choice: String,
    pub accommodation: bool,
    pub number_of_kids: i32,
    pub submitted: bool,
}

impl SubmitRsvpRequest {
    pub fn guest_mode(&self) -> GuestMode<'_> {
        match self.guests.as_deref() {
            Some(guests) if !guests.is_empty() => GuestMode::Group(guests),
            _ => GuestMode::Single {
                meal_choice: self.meal_choice.as_deref().unwrap_or(""),
                plus_one: self.plus_one,
                plus_one_name: self.plus_one_name.as_deref().unwrap_or(""),
                plus_one_meal_choice: self.plus_one_meal_choice.as_deref().unwrap_or(""),
            },
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }

        if self.number_of_kids.unwrap_or(0) < 0 {
            return Err("Number of kids cannot be negative".to_string());
        }

        // Meal answers are only mandatory for guests who are coming.
        if self.attending != Some(true) {
            return Ok(());
        }

        match self.guest_mode() {
            GuestMode::Group(guests) => {
                if guests.iter().any(|g| g.meal_choice.is_empty()) {
                    return Err("Meal preferences are required for all guests".to_string());
                }
            }
            GuestMode::Single {
                meal_choice,
                plus_one,
                plus_one_name,
                plus_one_meal_choice,
            } => {
                if meal_choice.is_empty() {
                    return Err("Meal preference is required".to_string());
                }
                if plus_one {
                    if plus_one_name.is_empty() {
                        return Err("Plus one name is required".to_string());
                    }
                    if plus_one_meal_choice.is_empty() {
                        return Err("Plus one meal preference is required".to_string());
                    }
                }
            }
        }

        Ok(())
    }

    pub fn into_payload(self) -> RsvpPayload {
        let submitted = self.attending.is_some();
        RsvpPayload {
            name: self.name,
            guests: self.guests.filter(|g| !g.is_empty()).map(Json),
            attending: self.attending,
            plus_one: self.plus_one,
            plus_one_name: self.plus_one_name.unwrap_or_default(),
            plus_one_meal_choice: self.plus_one_meal_choice.unwrap_or_default(),
            meal_choice: self.meal_choice.unwrap_or_default(),
            accommodation: self.accommodation,
            number_of_kids: self.number_of_kids.unwrap_or(0),
            submitted,
        }
    }
}

/// Per-invite question toggles, set at invite creation and editable by the
/// admin without touching the guest's answers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteConfig {
    pub ask_for_plus_one: bool,
    pub ask_for_kids: bool,
    pub max_number_of_kids: i32,
    pub ask_for_accommodation: bool,
}

impl InviteConfig {
    /// The kids limit is meaningless when the kids question is off.
    pub fn normalized(mut self) -> Self {
        if !self.ask_for_kids {
            self.max_number_of_kids = 0;
        }
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    pub name: String,
    pub guests: Vec<String>,
    #[serde(flatten)]
    pub config: InviteConfig,
}

impl CreateInviteRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.guests.is_empty() {
            return Err("At least one guest is required".to_string());
        }
        Ok(())
    }

    pub fn guest_list(&self) -> Vec<Guest> {
        self.guests
            .iter()
            .map(|name| Guest {
                name: name.clone(),
                meal_choice: String::new(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_request() -> SubmitRsvpRequest {
        SubmitRsvpRequest {
            name: "jdoe".to_string(),
            guests: None,
            attending: Some(true),
            plus_one: false,
            plus_one_name: None,
            plus_one_meal_choice: None,
            meal_choice: Some("fish".to_string()),
            accommodation: false,
            number_of_kids: None,
        }
    }

    #[test]
    fn validate_accepts_single_guest_with_meal() {
        assert!(submit_request().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_name() {
        let mut req = submit_request();
        req.name = "  ".to_string();
        assert_eq!(req.validate().unwrap_err(), "Name is required");
    }

    #[test]
    fn validate_rejects_attending_without_meal() {
        let mut req = submit_request();
        req.meal_choice = None;
        assert_eq!(req.validate().unwrap_err(), "Meal preference is required");
    }

    #[test]
    fn validate_skips_meal_checks_when_declining() {
        let mut req = submit_request();
        req.attending = Some(false);
        req.meal_choice = None;
        assert!(req.validate().is_ok());

        req.attending = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn validate_requires_plus_one_details() {
        let mut req = submit_request();
        req.plus_one = true;
        assert_eq!(req.validate().unwrap_err(), "Plus one name is required");

        req.plus_one_name = Some("Mark Wilson".to_string());
        assert_eq!(
            req.validate().unwrap_err(),
            "Plus one meal preference is required"
        );

        req.plus_one_meal_choice = Some("beef".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn validate_requires_meal_for_every_group_guest() {
        let mut req = submit_request();
        req.guests = Some(vec![
            Guest {
                name: "Amy".to_string(),
                meal_choice: "beef".to_string(),
            },
            Guest {
                name: "Bob".to_string(),
                meal_choice: String::new(),
            },
        ]);
        assert_eq!(
            req.validate().unwrap_err(),
            "Meal preferences are required for all guests"
        );
    }

    #[test]
    fn validate_rejects_negative_kids() {
        let mut req = submit_request();
        req.number_of_kids = Some(-1);
        assert_eq!(
            req.validate().unwrap_err(),
            "Number of kids cannot be negative"
        );
    }

    #[test]
    fn guest_mode_treats_empty_list_as_single() {
        let mut req = submit_request();
        req.guests = Some(vec![]);
        assert!(matches!(req.guest_mode(), GuestMode::Single { .. }));

        req.guests = Some(vec![Guest {
            name: "Amy".to_string(),
            meal_choice: "fish".to_string(),
        }]);
        assert!(matches!(req.guest_mode(), GuestMode::Group(_)));
    }

    #[test]
    fn payload_fills_defaults_and_derives_submitted() {
        let mut req = submit_request();
        req.meal_choice = None;
        req.attending = None;
        let payload = req.into_payload();

        assert_eq!(payload.meal_choice, "");
        assert_eq!(payload.plus_one_name, "");
        assert_eq!(payload.plus_one_meal_choice, "");
        assert_eq!(payload.number_of_kids, 0);
        assert!(!payload.submitted);

        let payload = submit_request().into_payload();
        assert!(payload.submitted);
        assert_eq!(payload.meal_choice, "fish");
    }

    #[test]
    fn payload_drops_empty_guest_list() {
        let mut req = submit_request();
        req.guests = Some(vec![]);
        assert!(req.into_payload().guests.is_none());
    }

    #[test]
    fn submit_request_deserializes_camel_case() {
        let req: SubmitRsvpRequest = serde_json::from_str(
            r#"{
                "name": "smiths",
                "guests": [{"name": "Amy", "mealChoice": "beef"}],
                "attending": true,
                "plusOne": false,
                "accommodation": true,
                "numberOfKids": 2
            }"#,
        )
        .unwrap();

        assert_eq!(req.guests.as_ref().unwrap()[0].meal_choice, "beef");
        assert_eq!(req.number_of_kids, Some(2));
        assert!(req.plus_one_name.is_none());
    }

    #[test]
    fn invite_config_zeroes_kids_limit_when_question_off() {
        let config = InviteConfig {
            ask_for_plus_one: true,
            ask_for_kids: false,
            max_number_of_kids: 4,
            ask_for_accommodation: true,
        }
        .normalized();
        assert_eq!(config.max_number_of_kids, 0);

        let config = InviteConfig {
            ask_for_plus_one: true,
            ask_for_kids: true,
            max_number_of_kids: 4,
            ask_for_accommodation: true,
        }
        .normalized();
        assert_eq!(config.max_number_of_kids, 4);
    }

    #[test]
    fn create_invite_requires_guests() {
        let req: CreateInviteRequest = serde_json::from_str(
            r#"{
                "name": "smiths",
                "guests": [],
                "askForPlusOne": false,
                "askForKids": false,
                "maxNumberOfKids": 0,
                "askForAccommodation": true
            }"#,
        )
        .unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            "At least one guest is required"
        );
    }

    #[test]
    fn create_invite_maps_names_to_blank_meal_choices() {
        let req: CreateInviteRequest = serde_json::from_str(
            r#"{
                "name": "smiths",
                "guests": ["Amy", "Bob"],
                "askForPlusOne": false,
                "askForKids": true,
                "maxNumberOfKids": 2,
                "askForAccommodation": true
            }"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());

        let guests = req.guest_list();
        assert_eq!(guests.len(), 2);
        assert_eq!(guests[0].name, "Amy");
        assert_eq!(guests[0].meal_choice, "");
        assert_eq!(guests[1].name, "Bob");
    }
}
