//! Test: outside of tests, derived `Debug` hides sensitive fields.

use sensitive_capsule::{attach, detach, Sensitive};

#[derive(Clone, Sensitive)]
pub struct Login {
    pub username: String,
    #[sensitive = "true"]
    pub password: String,
    #[sensitive = "true"]
    hint: String,
}

#[derive(Clone, Sensitive)]
pub struct ApiKey(pub String, #[sensitive = "true"] pub String);

fn main() {
    let login = Login {
        username: "ada".to_string(),
        password: "hunter2".to_string(),
        hint: "cat".to_string(),
    };

    #[cfg(not(feature = "testing"))]
    {
        // `hint` is private, so it is neither zeroed nor hidden.
        assert_eq!(
            format!("{login:?}"),
            r#"Login { username: "ada", password: "[REDACTED]", hint: "cat" }"#
        );

        let key = ApiKey("prod".to_string(), "sk_live_123".to_string());
        assert_eq!(format!("{key:?}"), r#"ApiKey("prod", "[REDACTED]")"#);
    }

    let (insensitive, capsule) = detach(login).expect("Login is a struct");
    assert_eq!(insensitive.password, "");
    assert_eq!(insensitive.hint, "cat");
    let restored = attach(insensitive, capsule);
    assert_eq!(restored.password, "hunter2");
}
