use std::collections::HashMap;
use std::env;
use std::fs;
use std::sync::Arc;

use complaint_analyser::{
    format_confidence, Analyser, ArtifactError, ArtifactStore, ClassifierError, LinearClassifier,
    ProbabilisticModel, TfidfVectorizer,
};

fn fixture_store(name: &str) -> ArtifactStore {
    let dir = env::temp_dir()
        .join("complaint-analyser-integration")
        .join(name);
    fs::create_dir_all(&dir).unwrap();
    let store = ArtifactStore::new(dir);
    fs::write(
        store.vectorizer_path(),
        r#"{
            "schema_version": 1,
            "vocabulary": {
                "billing": 0,
                "charge": 1,
                "wrong": 2,
                "delivery": 3,
                "late": 4,
                "package": 5
            },
            "idf": [1.4, 1.4, 1.0, 1.4, 1.4, 1.0]
        }"#,
    )
    .unwrap();
    fs::write(
        store.classifier_path(),
        r#"{
            "schema_version": 1,
            "classes": ["Billing Dispute", "Delivery Problem"],
            "weights": [
                [3.0, 3.0, 0.5, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 3.0, 3.0, 0.5]
            ],
            "intercepts": [0.0, 0.0]
        }"#,
    )
    .unwrap();
    store
}

fn setup_test_analyser(name: &str) -> Analyser {
    let store = fixture_store(name);
    Analyser::new(
        Arc::new(store.load_vectorizer().expect("Failed to load vectorizer")),
        Arc::new(store.load_classifier().expect("Failed to load classifier")),
    )
    .expect("Failed to create analyser")
}

#[test]
fn test_end_to_end_billing_complaint() -> Result<(), Box<dyn std::error::Error>> {
    let analyser = setup_test_analyser("billing");

    let prediction = analyser.analyse("the billing charge was wrong")?;
    assert_eq!(prediction.category, "Billing Dispute");
    assert!(prediction.confidence > 0.5);
    assert!(prediction.confidence <= 1.0);
    Ok(())
}

#[test]
fn test_end_to_end_delivery_complaint() -> Result<(), Box<dyn std::error::Error>> {
    let analyser = setup_test_analyser("delivery");

    let prediction = analyser.analyse("my package arrived late, terrible delivery")?;
    assert_eq!(prediction.category, "Delivery Problem");
    assert!(prediction.confidence > 0.5);
    Ok(())
}

#[test]
fn test_every_non_empty_input_gets_one_label_and_confidence() {
    let analyser = setup_test_analyser("non-empty");
    let store = fixture_store("non-empty");
    let classifier = store.load_classifier().unwrap();
    let label_space: Vec<String> = classifier.classes().to_vec();

    let inputs = [
        "the billing charge was wrong",
        "late delivery again",
        "no known words at all",
        "über-complaint with ünïcode",
    ];
    for input in inputs {
        let prediction = analyser.analyse(input).unwrap();
        assert!(
            label_space.contains(&prediction.category),
            "label '{}' not in the classifier's label space",
            prediction.category
        );
        assert!((0.0..=1.0).contains(&prediction.confidence));
    }
}

#[test]
fn test_empty_input_takes_the_warning_path() {
    let analyser = setup_test_analyser("empty");
    for input in ["", "   ", "\n\t "] {
        let result = analyser.analyse(input);
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
    }
}

#[test]
fn test_confidence_formatting() {
    assert_eq!(format_confidence(0.8734), "87.34%");
    assert_eq!(format_confidence(0.91), "91.00%");
}

#[test]
fn test_startup_fails_with_missing_vectorizer() {
    let store = fixture_store("missing-vectorizer");
    fs::remove_file(store.vectorizer_path()).unwrap();
    assert!(matches!(
        store.load_vectorizer(),
        Err(ArtifactError::NotFound { .. })
    ));
    // The classifier alone is not enough to start accepting input.
    assert!(!store.artifacts_present());
}

#[test]
fn test_startup_fails_with_missing_classifier() {
    let store = fixture_store("missing-classifier");
    fs::remove_file(store.classifier_path()).unwrap();
    assert!(matches!(
        store.load_classifier(),
        Err(ArtifactError::NotFound { .. })
    ));
    assert!(!store.artifacts_present());
}

#[test]
fn test_startup_fails_with_corrupt_classifier() {
    let store = fixture_store("corrupt-classifier");
    fs::write(store.classifier_path(), "not json at all").unwrap();
    assert!(matches!(
        store.load_classifier(),
        Err(ArtifactError::Deserialization { .. })
    ));
}

#[test]
fn test_analyser_is_shareable_across_threads() {
    let analyser = Arc::new(setup_test_analyser("threads"));

    let mut handles = vec![];
    for _ in 0..3 {
        let analyser = Arc::clone(&analyser);
        handles.push(std::thread::spawn(move || {
            analyser.analyse("billing charge dispute").unwrap()
        }));
    }

    for handle in handles {
        let prediction = handle.join().unwrap();
        assert_eq!(prediction.category, "Billing Dispute");
    }
}

#[test]
fn test_in_memory_fixture_matches_disk_fixture() {
    // Artifacts built directly in memory behave like deserialized ones.
    let vocabulary = HashMap::from([("billing".to_string(), 0), ("late".to_string(), 1)]);
    let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0, 1.0]).unwrap();
    let model = LinearClassifier::new(
        vec!["Billing Dispute".to_string(), "Delivery Problem".to_string()],
        vec![vec![2.0, 0.0], vec![0.0, 2.0]],
        vec![0.0, 0.0],
    )
    .unwrap();
    let analyser = Analyser::new(Arc::new(vectorizer), Arc::new(model)).unwrap();

    let prediction = analyser.analyse("billing issue").unwrap();
    assert_eq!(prediction.category, "Billing Dispute");
}
