// Rule sets for every endpoint that accepts a body.
use super::{FieldRule, Kind, Rule, RuleSet};

const FLIGHT_STATUSES: &[&str] = &["scheduled", "delayed", "cancelled", "completed"];
const PAYMENT_STATUSES: &[&str] = &["pending", "completed", "failed"];
const GENDERS: &[&str] = &["male", "female"];

const REQUIRED_STRING: &[Rule] = &[Rule::Required, Rule::String, Rule::Max(255)];

pub const REGISTER: RuleSet = RuleSet::new(&[
    FieldRule::new("name", Kind::Text, REQUIRED_STRING),
    FieldRule::new("email", Kind::Text, &[Rule::Required, Rule::String, Rule::Email, Rule::Max(255)]),
    FieldRule::new(
        "password",
        Kind::Text,
        &[Rule::Required, Rule::String, Rule::Min(8.0), Rule::Confirmed],
    ),
]);

pub const LOGIN: RuleSet = RuleSet::new(&[
    FieldRule::new("email", Kind::Text, &[Rule::Required, Rule::String, Rule::Email]),
    FieldRule::new("password", Kind::Text, &[Rule::Required, Rule::String]),
]);

pub const FLIGHT: RuleSet = RuleSet::new(&[
    FieldRule::new("flight_number", Kind::Text, REQUIRED_STRING),
    FieldRule::new("airline", Kind::Text, REQUIRED_STRING),
    FieldRule::new("origin", Kind::Text, REQUIRED_STRING),
    FieldRule::new("destination", Kind::Text, REQUIRED_STRING),
    FieldRule::new("departure_time", Kind::DateTime, &[Rule::Required, Rule::Date]),
    FieldRule::new("arrival_time", Kind::DateTime, &[Rule::Required, Rule::Date]),
    FieldRule::new("price", Kind::Real, &[Rule::Required, Rule::Numeric, Rule::Min(0.0)]),
    FieldRule::new("seats_available", Kind::Integer, &[Rule::Required, Rule::Integer, Rule::Min(0.0)]),
    FieldRule::new("status", Kind::Text, &[Rule::String, Rule::In(FLIGHT_STATUSES)]),
]);

pub const TODO: RuleSet = RuleSet::new(&[
    FieldRule::new("title", Kind::Text, REQUIRED_STRING),
    FieldRule::new("description", Kind::Text, REQUIRED_STRING),
    FieldRule::new("status", Kind::Text, REQUIRED_STRING),
    FieldRule::new("due_date", Kind::Text, REQUIRED_STRING),
]);

pub const CHECKLIST: RuleSet = RuleSet::new(&[FieldRule::new("name", Kind::Text, REQUIRED_STRING)]);

pub const CHECKLIST_ITEM_NAME: RuleSet =
    RuleSet::new(&[FieldRule::new("item_name", Kind::Text, REQUIRED_STRING)]);

pub const CHECKLIST_ITEM_STATUS: RuleSet =
    RuleSet::new(&[FieldRule::new("is_completed", Kind::Bool, &[Rule::Required, Rule::Boolean])]);

pub const BOOKING_CREATE: RuleSet = RuleSet::new(&[
    FieldRule::new("flight_id", Kind::Integer, &[Rule::Required, Rule::Integer]),
    FieldRule::new("payment_status", Kind::Text, &[Rule::String, Rule::In(PAYMENT_STATUSES)]),
]);

pub const BOOKING_UPDATE: RuleSet = RuleSet::new(&[FieldRule::new(
    "payment_status",
    Kind::Text,
    &[Rule::Required, Rule::String, Rule::In(PAYMENT_STATUSES)],
)]);

pub const PASSENGER: RuleSet = RuleSet::new(&[
    FieldRule::new("name", Kind::Text, REQUIRED_STRING),
    FieldRule::new("gender", Kind::Text, &[Rule::Required, Rule::String, Rule::In(GENDERS)]),
    FieldRule::new("seat_number", Kind::Text, &[Rule::Required, Rule::String, Rule::Max(10)]),
    FieldRule::new("date_of_birth", Kind::Date, &[Rule::Nullable, Rule::Date]),
    FieldRule::new("passport_number", Kind::Text, &[Rule::Nullable, Rule::String, Rule::Max(50)]),
]);
