use serde::Deserialize;

use crate::store::{known_variant, Identity, Role};

/// Sign-in form. A missing role means student; an unknown one is `None`.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default = "default_role", deserialize_with = "known_variant")]
    pub role: Option<Role>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn default_role() -> Option<Role> {
    Some(Role::default())
}

/// Demo sign-in: any non-empty name, email and password is accepted and the
/// password is never checked. A real identity provider would plug in here.
pub fn verify(credentials: &Credentials) -> Option<(Role, Identity)> {
    let role = credentials.role?;
    if credentials.name.is_empty() || credentials.email.is_empty() || credentials.password.is_empty()
    {
        return None;
    }

    Some((
        role,
        Identity {
            name: credentials.name.clone(),
            email: credentials.email.clone(),
        },
    ))
}
