//! Test: fields may share names with locals of the generated `Debug` impl.

use sensitive_capsule::{attach, detach, Sensitive};

#[derive(Clone, Sensitive)]
pub struct Reading {
    pub f: f64,
    pub debug: bool,
    #[sensitive = "true"]
    pub token: String,
}

fn main() {
    let reading = Reading {
        f: 1.5,
        debug: true,
        token: "t0k3n".to_string(),
    };

    #[cfg(not(feature = "testing"))]
    assert_eq!(
        format!("{reading:?}"),
        r#"Reading { f: 1.5, debug: true, token: "[REDACTED]" }"#
    );

    let (insensitive, capsule) = detach(reading).expect("Reading is a struct");
    assert_eq!(insensitive.token, "");
    assert!(insensitive.debug);
    let restored = attach(insensitive, capsule);
    assert_eq!(restored.token, "t0k3n");
}
