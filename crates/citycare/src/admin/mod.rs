//! Administrative access: the credential directory and the admin REST
//! surface over the report ledger.
//!
//! Authentication is a fixed credential list checked per request, with
//! no session state. Anything stronger belongs behind the city's SSO,
//! not here.

pub mod router;

use serde::Serialize;

pub use router::admin_router;

/// One entry in the administrator credential list.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    pub name: String,
    pub secret_key: String,
}

/// The authenticated identity returned to the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminIdentity {
    pub name: String,
    pub role: &'static str,
}

/// Fixed directory of administrator credentials. Names compare
/// case-insensitively; keys compare exactly.
#[derive(Debug, Clone)]
pub struct AdminDirectory {
    credentials: Vec<AdminCredential>,
}

impl AdminDirectory {
    pub fn new(credentials: Vec<AdminCredential>) -> Self {
        Self { credentials }
    }

    /// The credential set the service ships with.
    pub fn builtin() -> Self {
        let pairs = [
            ("admin", "admin123"),
            ("citycare", "citycare2024"),
            ("administrator", "admin@123"),
            ("superadmin", "super@2024"),
        ];
        Self::new(
            pairs
                .into_iter()
                .map(|(name, secret_key)| AdminCredential {
                    name: name.to_string(),
                    secret_key: secret_key.to_string(),
                })
                .collect(),
        )
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Option<AdminIdentity> {
        let matched = self.credentials.iter().any(|credential| {
            credential.name.eq_ignore_ascii_case(username) && credential.secret_key == password
        });

        matched.then(|| AdminIdentity {
            name: username.to_string(),
            role: "Administrator",
        })
    }
}
