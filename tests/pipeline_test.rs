//! End-to-end tests for the screening pipeline over on-disk artifacts.

use std::collections::HashMap;
use std::path::Path;

use asdscreen::encoding::{encode_and_align, screening_table};
use asdscreen::error::{Result, ScreenError};
use asdscreen::model::{DecisionTree, ModelMetadata, RandomForest, StandardScaler};
use asdscreen::predict::{Likelihood, MODEL_FILE, Predictor, SCALER_FILE, SCHEMA_FILE};
use asdscreen::schema::FeatureSchema;
use asdscreen::survey::answer::SurveyResponse;
use tempfile::TempDir;

/// The column order the fixture model was "trained" on.
const COLUMNS: [&str; 13] = [
    "Age",
    "Sex_Label",
    "Race_Label",
    "Home_Language_Label",
    "Parental_Education_Label",
    "Sleep_Hours",
    "Screen_Time_Hours",
    "Premature_Birth",
    "Low_Birthweight",
    "Speech_Concern",
    "Interaction_Concern",
    "WordPhrase_Concern",
    "Maternal_Mental_Health_Label",
];

fn fixture_schema() -> FeatureSchema {
    FeatureSchema::new(COLUMNS.iter().map(|s| s.to_string()).collect()).unwrap()
}

fn fixture_metadata() -> ModelMetadata {
    ModelMetadata {
        name: "screening_random_forest".to_string(),
        version: "2024.1".to_string(),
        trained_at: chrono::Utc::now(),
        training_examples: 1800,
        hyperparameters: HashMap::from([("n_estimators".to_string(), 2.0)]),
        validation_metrics: HashMap::from([("auc".to_string(), 0.88)]),
    }
}

/// Write a consistent artifact set: identity scaler and a forest that
/// splits on the scaled Speech_Concern column (index 9).
fn write_artifacts(dir: &Path) -> Result<()> {
    fixture_schema().save(&dir.join(SCHEMA_FILE))?;
    StandardScaler::new(vec![0.0; COLUMNS.len()], vec![1.0; COLUMNS.len()])?
        .save(&dir.join(SCALER_FILE))?;
    RandomForest::new(
        vec![
            DecisionTree::stump(9, 0.5, 0.1, 0.9),
            DecisionTree::stump(9, 0.5, 0.3, 0.7),
        ],
        fixture_metadata(),
    )
    .save(&dir.join(MODEL_FILE))?;
    Ok(())
}

fn full_response() -> SurveyResponse {
    SurveyResponse::builder()
        .integer("Age", 5)
        .text("Sex", "Male")
        .text("Race", "White")
        .text("Home_Language", "English")
        .text("Parental_Education", "College or more")
        .integer("Sleep_Hours", 9)
        .integer("Screen_Time_Hours", 2)
        .text("Premature_Birth", "No")
        .text("Speech_Concern", "No")
        .text("Interaction_Concern", "No")
        .text("WordPhrase_Concern", "No")
        .text("Maternal_Mental_Health", "Good")
        .build()
}

#[test]
fn test_full_response_matches_hand_computed_vector() -> Result<()> {
    let response = full_response();
    let schema = fixture_schema();

    let vector = encode_and_align(&response, screening_table(), &schema)?;

    let expected = vec![
        5.0, // Age
        1.0, // Sex_Label (Male)
        0.0, // Race_Label (White)
        0.0, // Home_Language_Label (English)
        3.0, // Parental_Education_Label (College or more)
        9.0, // Sleep_Hours
        2.0, // Screen_Time_Hours
        0.0, // Premature_Birth
        0.0, // Low_Birthweight (forced default)
        0.0, // Speech_Concern
        0.0, // Interaction_Concern
        0.0, // WordPhrase_Concern
        0.0, // Maternal_Mental_Health_Label (Good)
    ];

    assert_eq!(vector, expected);
    assert_eq!(vector.len(), schema.len());
    Ok(())
}

#[test]
fn test_low_likelihood_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    write_artifacts(temp_dir.path())?;

    let predictor = Predictor::load(temp_dir.path())?;
    let prediction = predictor.predict(&full_response())?;

    // Both stumps route to their low branch: p1 = (0.1 + 0.3) / 2.
    assert_eq!(prediction.likelihood, Likelihood::Low);
    assert!((prediction.probability - 0.2).abs() < 1e-12);
    assert!((prediction.confidence - 0.8).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_high_likelihood_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    write_artifacts(temp_dir.path())?;

    let predictor = Predictor::load(temp_dir.path())?;

    let mut response = full_response();
    response.set("Speech_Concern", "Yes".into());
    let prediction = predictor.predict(&response)?;

    // p1 = (0.9 + 0.7) / 2.
    assert_eq!(prediction.likelihood, Likelihood::High);
    assert!((prediction.probability - 0.8).abs() < 1e-12);
    assert!((prediction.confidence - 0.8).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_omitted_field_defaults_to_zero_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    write_artifacts(temp_dir.path())?;

    let predictor = Predictor::load(temp_dir.path())?;

    // Sleep_Hours never answered: its column is 0, and the request succeeds.
    let response = SurveyResponse::builder()
        .integer("Age", 5)
        .text("Sex", "Female")
        .text("Race", "Other")
        .text("Home_Language", "Non-English")
        .text("Parental_Education", "High school")
        .integer("Screen_Time_Hours", 2)
        .text("Premature_Birth", "No")
        .text("Speech_Concern", "No")
        .text("Interaction_Concern", "No")
        .text("WordPhrase_Concern", "No")
        .text("Maternal_Mental_Health", "Average")
        .build();

    let vector = encode_and_align(&response, screening_table(), predictor.schema())?;
    let sleep_idx = predictor.schema().position("Sleep_Hours").unwrap();
    assert_eq!(vector[sleep_idx], 0.0);

    assert!(predictor.predict(&response).is_ok());
    Ok(())
}

#[test]
fn test_unrecognized_label_fails_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    write_artifacts(temp_dir.path()).unwrap();

    let predictor = Predictor::load(temp_dir.path()).unwrap();

    let mut response = full_response();
    response.set("Sex", "Other".into());

    match predictor.predict(&response) {
        Err(ScreenError::Encoding(msg)) => assert!(msg.contains("Other")),
        other => panic!("expected encoding error, got {other:?}"),
    }

    // The predictor keeps serving after the failed request.
    assert!(predictor.predict(&full_response()).is_ok());
}

#[test]
fn test_premature_no_forces_birthweight_default() -> Result<()> {
    let schema = fixture_schema();
    let lbw_idx = schema.position("Low_Birthweight").unwrap();

    // A stray Yes answer for the unsolicited field is overridden.
    let mut response = full_response();
    response.set("Low_Birthweight", "Yes".into());
    let forced = encode_and_align(&response, screening_table(), &schema)?;

    let mut explicit = full_response();
    explicit.set("Low_Birthweight", "No".into());
    let answered_no = encode_and_align(&explicit, screening_table(), &schema)?;

    assert_eq!(forced[lbw_idx], 0.0);
    assert_eq!(forced, answered_no);
    Ok(())
}

#[test]
fn test_stale_artifact_pairing_fails_per_request() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    write_artifacts(temp_dir.path())?;

    // Re-fit the scaler on a narrower column set, as a stale training run
    // would have left behind. Loading still succeeds.
    StandardScaler::new(vec![0.0; 4], vec![1.0; 4])?
        .save(&temp_dir.path().join(SCALER_FILE))?;

    let predictor = Predictor::load(temp_dir.path())?;
    match predictor.predict(&full_response()) {
        Err(ScreenError::Prediction(_)) => {}
        other => panic!("expected prediction error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_missing_or_malformed_artifacts_are_fatal() {
    let temp_dir = TempDir::new().unwrap();

    // Nothing written yet: the schema is the first artifact to fail.
    assert!(matches!(
        Predictor::load(temp_dir.path()),
        Err(ScreenError::ArtifactLoad(_))
    ));

    write_artifacts(temp_dir.path()).unwrap();
    std::fs::write(temp_dir.path().join(MODEL_FILE), "{}").unwrap();
    assert!(matches!(
        Predictor::load(temp_dir.path()),
        Err(ScreenError::ArtifactLoad(_))
    ));
}
