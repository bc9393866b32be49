//! Modelo de User
//!
//! Conductores y pasajeros comparten la misma cuenta; `usertype` decide
//! qué endpoints pueden usar.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Driver,
    Passenger,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Driver => "driver",
            UserType::Passenger => "passenger",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driver" => Ok(UserType::Driver),
            "passenger" => Ok(UserType::Passenger),
            other => Err(format!("unknown user type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub name: String,
    pub gender: String,
    pub usertype: UserType,
    pub email: String,
    pub password_hash: String,
    pub contacts: String,
    pub date_joined: NaiveDateTime,
}

/// Response de usuario para la API (sin password)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
    pub gender: String,
    pub usertype: UserType,
    pub email: String,
    pub contacts: String,
    pub date_joined: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
            gender: user.gender.clone(),
            usertype: user.usertype,
            email: user.email.clone(),
            contacts: user.contacts.clone(),
            date_joined: crate::models::ride::format_timestamp(&user.date_joined),
        }
    }
}
