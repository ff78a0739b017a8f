//! Test: generic, lifetime-carrying and marker-carrying records derive cleanly.

use std::marker::PhantomData;

use sensitive_capsule::{attach, detach, Record, Sensitive};

/// Clone but not Debug.
#[derive(Clone)]
pub struct Opaque;

#[derive(Clone, Sensitive)]
pub struct TypedId<T> {
    pub id: String,
    #[sensitive = "true"]
    pub secret: String,
    _marker: PhantomData<T>,
}

#[derive(Clone, Sensitive)]
pub struct Envelope<'a, T, U>
where
    U: Clone,
{
    pub label: &'a str,
    #[sensitive = "true"]
    pub payload: Vec<T>,
    #[sensitive = "true"]
    pub extra: Option<U>,
}

fn main() {
    // The marker must not force a `Debug` bound onto `Opaque`.
    let id: TypedId<Opaque> = TypedId {
        id: "user-1".to_string(),
        secret: "s3cr3t".to_string(),
        _marker: PhantomData,
    };
    assert!(format!("{id:?}").starts_with("TypedId"));

    let (insensitive, capsule) = detach(id).expect("TypedId is a struct");
    assert_eq!(insensitive.secret, "");
    assert_eq!(attach(insensitive, capsule).secret, "s3cr3t");

    let mut envelope: Envelope<'_, u8, Opaque> = Envelope {
        label: "batch",
        payload: vec![1, 2, 3],
        extra: Some(Opaque),
    };
    let (_, capsule) = detach(&mut envelope).expect("Envelope is a struct");
    assert!(envelope.payload.is_empty());
    assert!(envelope.extra.is_none());
    assert_eq!(envelope.label, "batch");

    let restored = attach(&mut envelope, capsule);
    assert_eq!(restored.payload, vec![1, 2, 3]);
    assert!(restored.extra.is_some());

    let sensitive: Vec<&str> = Envelope::<u8, Opaque>::sensitive_fields()
        .map(|field| field.name)
        .collect();
    assert_eq!(sensitive, ["payload", "extra"]);
}
