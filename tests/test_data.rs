use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct JSanitizeCase {
    pub v: serde_json::Value,
    pub e: String,
}

#[derive(Deserialize, Debug)]
pub struct TestJson {
    pub sanitize_cases: Vec<JSanitizeCase>,
    pub fetch_response: serde_json::Value,
    pub mixed_response: serde_json::Value,
}

pub static TEST_DATA: Lazy<TestJson> = Lazy::new(|| {
    let file_content = include_str!("test_data.json");
    serde_json::from_str(file_content).expect("Failed to parse test_data.json")
});
