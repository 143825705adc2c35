//! Bundled data files load and validate.

mod common;

use std::sync::Arc;

use viva::embedding::SentenceEncoder;
use viva::questions::QuestionIndex;
use viva::retrieval::{DenseRetriever, Retriever, load_corpus};

use common::harness::data_path;

#[test]
fn test_bundled_question_bank_loads() {
    let index = QuestionIndex::load(data_path("questions/questions.json")).unwrap();

    assert_eq!(index.ids(), vec!["ECE_AN_003", "ECE_DE_001", "ECE_SS_002"]);
    for id in index.ids() {
        let question = index.get(id).unwrap();
        assert!((question.evaluation.total() - 1.0).abs() <= 0.01);
        assert!(question.primary_answer().is_some());
    }
}

#[test]
fn test_bare_weights_and_default_answer_weight() {
    let index = QuestionIndex::load(data_path("questions/questions.json")).unwrap();
    let question = index.get("ECE_SS_002").unwrap();

    assert_eq!(question.evaluation.keyword.value(), 0.3);
    assert_eq!(question.ideal_answers[0].weight, 1.0);
    assert_eq!(
        question.ideal_answers[0].concept_strings(),
        vec!["frequency", "time-domain", "amplitude", "phase"]
    );
}

#[test]
fn test_bundled_corpus_loads() {
    let passages = load_corpus(data_path("corpus/corpus_chunks.json")).unwrap();

    assert_eq!(passages.len(), 4);
    assert_eq!(passages[0].authors, "M. Morris Mano, Michael D. Ciletti");
    assert_eq!(passages[1].authors, "Alan V. Oppenheim");
    assert_eq!(passages[0].chunk_id.as_deref(), Some("digital_design_0001"));
}

#[tokio::test]
async fn test_dense_retrieval_over_bundled_corpus() {
    let passages = load_corpus(data_path("corpus/corpus_chunks.json")).unwrap();
    let retriever = DenseRetriever::build(Arc::new(SentenceEncoder::stub()), passages).unwrap();

    let hits = retriever
        .retrieve("What is a flip-flop and how does it differ from a latch?", 2)
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].source_book, "Digital Design");
}
