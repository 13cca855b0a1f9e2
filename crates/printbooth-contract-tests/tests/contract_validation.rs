//! Validates contract fixtures against frozen JSON schemas.

use jsonschema::JSONSchema;
use printbooth_core::GridDescriptor;
use serde_json::Value;

fn load_json(path: &str) -> Value {
    let raw = std::fs::read_to_string(path).expect("json file should be readable");
    serde_json::from_str(&raw).expect("json file should be valid")
}

fn compile_validator(schema_path: &str) -> JSONSchema {
    let schema = load_json(schema_path);
    JSONSchema::compile(&schema).expect("schema should compile")
}

#[test]
fn grid_descriptor_fixture_matches_schema() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/grid-descriptor.schema.json"
    ));
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/grid-descriptor.valid.json"
    ));
    assert!(
        validator.is_valid(&fixture),
        "grid descriptor fixture should validate against schema"
    );
}

#[test]
fn compose_request_fixture_matches_schema() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/compose-request.schema.json"
    ));
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/compose-request.valid.json"
    ));
    assert!(
        validator.is_valid(&fixture),
        "compose request fixture should validate against schema"
    );
}

#[test]
fn core_grid_serialization_matches_schema() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/grid-descriptor.schema.json"
    ));

    let grid = GridDescriptor::new("4x6-grid", 2, 2, false).expect("grid should be valid");
    let serialized = serde_json::to_value(&grid).expect("grid should serialize");
    assert!(
        validator.is_valid(&serialized),
        "core grid serialization should stay on the boundary contract"
    );
}
