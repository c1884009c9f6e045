// src/validation.rs
//
// Field validation for every form-submitted payload. Each field category has
// a named regex; a field reports either its empty-value message or its
// format message, whichever rule fails first. Messages are part of the
// product surface and are kept exactly as the frontend displays them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{
    house::HousePayload,
    room::{RoomPayload, RoomType},
    user::{SignupRequest, UpdateProfileRequest, User},
};

pub static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ\s-]+$").unwrap());
pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{8,15}$").unwrap());
pub static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9À-ÖØ-öø-ÿ\s,.-]+$").unwrap());
pub static HOUSE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ0-9\s'-]{3,50}$").unwrap());
pub static CITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ\s-]{2,30}$").unwrap());
pub static LOCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ0-9\s,.-]{3,100}$").unwrap());
pub static HOUSE_DESC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[A-Za-zÀ-ÖØ-öø-ÿ0-9\s.,;:'"!?()%-]{10,100}$"#).unwrap());
pub static ROOM_DESC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[A-Za-zÀ-ÖØ-öø-ÿ0-9\s.,;:'"!?()%-]{10,200}$"#).unwrap());

/// Fixed vocabulary of room services.
pub const ROOM_SERVICES: &[&str] = &[
    "Wifi",
    "Air Conditioning",
    "TV",
    "Room Services",
    "Kitchenette",
    "Bathtub",
];

/// A single failed field with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Empty check first, then the regex. Whitespace-only counts as empty.
pub fn check_field(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: &str,
    regex: Option<&Regex>,
    msg_empty: &str,
    msg_format: &str,
) -> bool {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, msg_empty));
        return false;
    }
    if let Some(re) = regex {
        if !re.is_match(value) {
            errors.push(FieldError::new(field, msg_format));
            return false;
        }
    }
    true
}

/// Password rule: at least 6 characters, letters and digits only, with at
/// least one of each. (The source expressed this with lookaheads, which the
/// regex crate does not support.)
pub fn password_ok(password: &str) -> bool {
    password.len() >= 6
        && password.chars().all(|c| c.is_ascii_alphanumeric())
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn check_password(errors: &mut Vec<FieldError>, field: &str, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, "Please enter a password"));
        return false;
    }
    if !password_ok(value) {
        errors.push(FieldError::new(
            field,
            "Password must be at least 6 chars, with letters and numbers",
        ));
        return false;
    }
    true
}

pub fn check_range(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: u32,
    min: u32,
    max: u32,
    msg_range: &str,
) -> bool {
    if value < min || value > max {
        errors.push(FieldError::new(field, msg_range));
        return false;
    }
    true
}

fn check_image(errors: &mut Vec<FieldError>, field: &str, value: &str, msg_empty: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, msg_empty));
        return false;
    }
    if !value.starts_with("data:image/") {
        errors.push(FieldError::new(field, "Image must be an embedded data URI"));
        return false;
    }
    true
}

/// Case-sensitive exact scan over users, with optional self-exclusion by id
/// for profile edits. The candidate is trimmed first, since that is the form
/// the record is stored in.
pub fn email_taken(users: &[User], email: &str, exclude_id: Option<i64>) -> bool {
    let email = email.trim();
    users
        .iter()
        .any(|u| u.email == email && Some(u.id) != exclude_id)
}

fn check_identity_fields(
    errors: &mut Vec<FieldError>,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    address: &str,
) {
    check_field(
        errors,
        "firstName",
        first_name,
        Some(&*NAME_RE),
        "Please enter your first name",
        "Only letters and spaces are allowed",
    );
    check_field(
        errors,
        "lastName",
        last_name,
        Some(&*NAME_RE),
        "Please enter your last name",
        "Only letters and spaces are allowed",
    );
    check_field(
        errors,
        "email",
        email,
        Some(&*EMAIL_RE),
        "Please enter your email",
        "Invalid email format",
    );
    check_field(
        errors,
        "phone",
        phone,
        Some(&*PHONE_RE),
        "Please enter your phone number",
        "Phone must be 8-15 digits",
    );
    check_field(
        errors,
        "address",
        address,
        Some(&*ADDRESS_RE),
        "Please enter your address",
        "Address contains invalid characters",
    );
}

/// Full signup validation, including password confirmation and email
/// uniqueness over the current users collection.
pub fn validate_signup(req: &SignupRequest, users: &[User]) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_identity_fields(
        &mut errors,
        &req.first_name,
        &req.last_name,
        &req.email,
        &req.phone,
        &req.address,
    );
    check_password(&mut errors, "password", &req.password);

    if req.confirm_password.trim().is_empty() {
        errors.push(FieldError::new(
            "confirmPassword",
            "Please confirm your password",
        ));
    } else if req.password != req.confirm_password {
        errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
    }

    if email_taken(users, &req.email, None) {
        errors.push(FieldError::new("email", "Email already in use"));
    }

    errors
}

/// Profile edit validation. The email uniqueness check excludes the user's
/// own record, so saving an unchanged email passes. Password rules apply
/// only when a new password is provided.
pub fn validate_profile_edit(
    req: &UpdateProfileRequest,
    users: &[User],
    self_id: i64,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_identity_fields(
        &mut errors,
        &req.first_name,
        &req.last_name,
        &req.email,
        &req.phone,
        &req.address,
    );

    let password = req.password.as_deref().unwrap_or("");
    let confirm = req.confirm_password.as_deref().unwrap_or("");
    if !password.is_empty() || !confirm.is_empty() {
        check_password(&mut errors, "password", password);
        if confirm.trim().is_empty() {
            errors.push(FieldError::new(
                "confirmPassword",
                "Please confirm your password",
            ));
        } else if password != confirm {
            errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
        }
    }

    if email_taken(users, &req.email, Some(self_id)) {
        errors.push(FieldError::new("email", "Email already in use"));
    }

    errors
}

/// House create/edit validation.
pub fn validate_house(payload: &HousePayload) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_field(
        &mut errors,
        "houseName",
        &payload.house_name,
        Some(&*HOUSE_NAME_RE),
        "Please enter house name",
        "Only letters and spaces are allowed",
    );
    check_field(
        &mut errors,
        "housePhone",
        &payload.house_phone,
        Some(&*PHONE_RE),
        "Please enter house phone number",
        "Phone must be 8–15 digits",
    );
    check_field(
        &mut errors,
        "houseCity",
        &payload.house_city,
        Some(&*CITY_RE),
        "Please enter city",
        "City must be 2–30 characters long",
    );
    check_field(
        &mut errors,
        "houseLocation",
        &payload.house_location,
        Some(&*LOCATION_RE),
        "Please enter location",
        "Location must be 3–100 characters long",
    );
    check_field(
        &mut errors,
        "houseDescription",
        &payload.house_description,
        Some(&*HOUSE_DESC_RE),
        "Please enter description",
        "Description must be 10–100 characters long",
    );
    check_range(
        &mut errors,
        "houseCapacity",
        payload.house_capacity,
        1,
        100,
        "Capacity must be between 1 and 100 guests.",
    );
    check_image(
        &mut errors,
        "houseImg",
        &payload.house_img,
        "Please upload an image of the guesthouse",
    );

    errors
}

/// Room create/edit validation.
pub fn validate_room(payload: &RoomPayload) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_field(
        &mut errors,
        "roomName",
        &payload.room_name,
        Some(&*HOUSE_NAME_RE),
        "Please enter room name",
        "Only letters and spaces are allowed",
    );
    if RoomType::parse(payload.room_type.trim()).is_none() {
        errors.push(FieldError::new("roomType", "Please select room type"));
    }
    check_field(
        &mut errors,
        "roomDescription",
        &payload.room_description,
        Some(&*ROOM_DESC_RE),
        "Please enter description",
        "Description must be 10–200 characters long",
    );
    check_range(
        &mut errors,
        "roomPrice",
        payload.room_price,
        100,
        1000,
        "The room price must be between 100 and 1000 TND.",
    );
    check_range(
        &mut errors,
        "roomCapacity",
        payload.room_capacity,
        1,
        5,
        "The room capacity must be between 1 and 5",
    );
    check_range(
        &mut errors,
        "numBeds",
        payload.num_beds,
        1,
        5,
        "Please enter a number between 1 and 5.",
    );
    for service in &payload.room_services {
        if !ROOM_SERVICES.contains(&service.as_str()) {
            errors.push(FieldError::new(
                "roomServices",
                format!("Unknown room service '{}'", service),
            ));
        }
    }
    check_image(
        &mut errors,
        "roomImg",
        &payload.room_img,
        "Please upload a room image.",
    );

    errors
}
