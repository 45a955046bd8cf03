use super::*;
use serde_json::json;

#[test]
fn accepts_well_formed_blocks_and_trims_names() {
    let doc = json!([
        {"Year": 2000, "Countries": [{"Country": "  France ", "Population": 60.5}]},
        {"Year": 2001, "Countries": []}
    ]);
    let blocks = validate_dataset(&doc).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].year, 2000);
    assert_eq!(blocks[0].countries[0].country, "France");
    assert_eq!(blocks[0].countries[0].population, 60.5);
    assert!(blocks[1].countries.is_empty());
}

#[test]
fn integral_float_year_is_accepted() {
    let doc = json!([{"Year": 1999.0, "Countries": []}]);
    assert_eq!(validate_dataset(&doc).unwrap()[0].year, 1999);
}

#[test]
fn unknown_fields_are_ignored() {
    let doc = json!([{"Year": 2000, "Source": "UN", "Countries": [
        {"Country": "A", "Population": 1, "Code": "AAA"}
    ]}]);
    assert_eq!(validate_dataset(&doc).unwrap()[0].countries.len(), 1);
}

#[test]
fn errors_carry_json_paths() {
    let doc = json!([
        {"Year": 2000, "Countries": [{"Country": "A", "Population": -1}]},
        {"Year": 2000.5, "Countries": [{"Country": "   ", "Population": 1}]}
    ]);
    let err = validate_dataset(&doc).unwrap_err();
    let text = err.to_string();
    assert_eq!(err.errors.len(), 3);
    assert!(text.contains("$[0].Countries[0].Population"));
    assert!(text.contains("$[1].Year"));
    assert!(text.contains("$[1].Countries[0].Country"));
}

#[test]
fn missing_and_mistyped_fields_are_reported() {
    let doc = json!([
        {"Countries": [{"Country": 7}]},
        {"Year": 2000, "Countries": "nope"}
    ]);
    let err = validate_dataset(&doc).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("$[0].Year: Year is required"));
    assert!(text.contains("$[0].Countries[0].Country: Country must be a string"));
    assert!(text.contains("$[0].Countries[0].Population: Population is required"));
    assert!(text.contains("$[1].Countries: Countries must be an array"));
}

#[test]
fn non_array_root_is_rejected() {
    let err = validate_dataset(&json!({"Year": 2000})).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert!(err.to_string().starts_with("$: "));
}

#[test]
fn safe_parse_fails_closed_to_empty() {
    let doc = json!([
        {"Year": 2000, "Countries": [{"Country": "A", "Population": 1}]},
        {"Year": 2001, "Countries": [{"Country": "", "Population": 1}]}
    ]);
    assert!(safe_parse_dataset(&doc).is_empty());
    assert!(safe_parse_dataset(&json!("not a dataset")).is_empty());
}
