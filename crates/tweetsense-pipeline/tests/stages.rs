//! Tests for `AnalyseTweets` and `SaveTweets` against in-memory fakes.

mod common;

use tweetsense_pipeline::{
    AnalyseTweets, AttributeValue, BatchWriteResponse, PipelineError, SaveTweets, SentimentLabel,
};

use common::{fixture_posts, fixture_results, FakeDetector, FakeStore};

#[tokio::test]
async fn analyse_annotates_every_tweet_by_position() {
    let detector = FakeDetector::returning(fixture_results());
    let calls = detector.calls.clone();
    let analyse = AnalyseTweets::new(detector);

    let posts = analyse.execute(fixture_posts()).await.expect("analysis");

    assert_eq!(posts.len(), 15);
    assert_eq!(posts[0].sentiment, Some(SentimentLabel::Mixed));
    for (post, result) in posts.iter().zip(fixture_results()) {
        assert_eq!(post.sentiment, Some(result.sentiment));
        assert_eq!(post.sentiment_score.as_ref(), Some(&result.sentiment_score));
    }

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (language_code, texts) = &calls[0];
    assert_eq!(language_code, "en");
    let expected: Vec<String> = fixture_posts().into_iter().map(|p| p.text).collect();
    assert_eq!(texts, &expected);
}

#[tokio::test]
async fn analyse_leaves_uncovered_tail_unannotated() {
    let results: Vec<_> = fixture_results().into_iter().take(10).collect();
    let analyse = AnalyseTweets::new(FakeDetector::returning(results));

    let posts = analyse.execute(fixture_posts()).await.expect("analysis");

    assert_eq!(posts.len(), 15);
    assert!(posts[..10].iter().all(|p| p.sentiment.is_some()));
    assert!(posts[10..].iter().all(|p| p.sentiment.is_none()));
    assert!(posts[10..].iter().all(|p| p.sentiment_score.is_none()));
}

#[tokio::test]
async fn analyse_preserves_tweet_order_and_fields() {
    let analyse = AnalyseTweets::new(FakeDetector::returning(fixture_results()));
    let before = fixture_posts();

    let after = analyse.execute(before.clone()).await.expect("analysis");

    for (a, b) in after.iter().zip(&before) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.text, b.text);
        assert_eq!(a.extra, b.extra);
    }
}

#[tokio::test]
async fn analyse_propagates_detector_failure() {
    let analyse = AnalyseTweets::new(FakeDetector::failing("ThrottlingException: Rate exceeded"));
    let err = analyse.execute(fixture_posts()).await.unwrap_err();
    assert_eq!(err.to_string(), "Comprehend error: ThrottlingException: Rate exceeded");
    assert_eq!(err.message(), "ThrottlingException: Rate exceeded");
}

#[tokio::test]
async fn analyse_with_no_tweets_returns_empty() {
    let detector = FakeDetector::returning(Vec::new());
    let calls = detector.calls.clone();
    let analyse = AnalyseTweets::new(detector);

    let posts = analyse.execute(Vec::new()).await.expect("analysis");

    assert!(posts.is_empty());
    assert!(calls.lock().unwrap()[0].1.is_empty());
}

#[tokio::test]
async fn save_writes_one_put_per_tweet_to_the_table() {
    let store = FakeStore::returning(BatchWriteResponse::default());
    let requests = store.requests.clone();
    let save = SaveTweets::new(store, "MKPTweets");

    let mut posts = fixture_posts();
    posts[0].sentiment = Some(SentimentLabel::Positive);

    let response = save.execute(&posts).await.expect("save");
    assert_eq!(response, BatchWriteResponse::default());

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let writes = &requests[0].request_items["MKPTweets"];
    assert_eq!(writes.len(), 15);

    let first = &writes[0].put_request.item;
    assert_eq!(first["id"], AttributeValue::S(posts[0].id.clone()));
    assert_eq!(first["text"], AttributeValue::S(posts[0].text.clone()));
    assert_eq!(first["timestamp"], AttributeValue::N("1704067200000".to_string()));
    assert_eq!(first["sentiment"], AttributeValue::S("POSITIVE".to_string()));

    // Tweets without sentiment carry no sentiment attribute at all.
    for write in &writes[1..] {
        assert!(!write.put_request.item.contains_key("sentiment"));
    }

    for (write, post) in writes.iter().zip(&posts) {
        assert_eq!(write.put_request.item["id"], AttributeValue::S(post.id.clone()));
    }
}

#[tokio::test]
async fn save_rejects_unparseable_timestamp_without_calling_store() {
    let store = FakeStore::returning(BatchWriteResponse::default());
    let requests = store.requests.clone();
    let save = SaveTweets::new(store, "MKPTweets");

    let mut posts = fixture_posts();
    posts[3].created_at = "sometime last week".to_string();

    let err = save.execute(&posts).await.unwrap_err();
    assert!(matches!(err, PipelineError::InvalidTimestamp { .. }));
    assert!(requests.lock().unwrap().is_empty());
}

#[test]
fn build_request_uses_configured_table() {
    let save = SaveTweets::new(FakeStore::returning(BatchWriteResponse::default()), "Tweets");
    let request = save.build_request(&fixture_posts()).unwrap();
    assert_eq!(request.request_items.len(), 1);
    assert_eq!(request.request_items["Tweets"].len(), 15);
}
