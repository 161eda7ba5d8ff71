//! Serialization of the type-erased descriptors.

#![cfg(feature = "serde")]

use lanevec::{ByteOrder, ElementKind, Shape, SpeciesId};

#[test]
fn species_id_round_trips_through_json() {
    for id in SpeciesId::all() {
        let json = serde_json::to_string(&id).unwrap();
        let back: SpeciesId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

#[test]
fn enums_serialize_by_name() {
    assert_eq!(serde_json::to_string(&Shape::S256).unwrap(), "\"S256\"");
    assert_eq!(serde_json::to_string(&ElementKind::F32).unwrap(), "\"F32\"");
    assert_eq!(
        serde_json::from_str::<ByteOrder>("\"BigEndian\"").unwrap(),
        ByteOrder::BigEndian
    );
}

#[test]
fn species_id_fields() {
    let id = SpeciesId::new(ElementKind::I16, Shape::S128);
    let value: serde_json::Value = serde_json::to_value(id).unwrap();
    assert_eq!(value["kind"], "I16");
    assert_eq!(value["shape"], "S128");
}

#[test]
fn species_id_resolves_preferred_shape_on_deserialize() {
    let id: SpeciesId = serde_json::from_str(r#"{"kind":"I32","shape":"Preferred"}"#).unwrap();
    assert!(id.shape().is_concrete());
    assert_eq!(id, SpeciesId::new(ElementKind::I32, Shape::Preferred));
}
