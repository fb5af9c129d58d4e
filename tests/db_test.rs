mod common;

use common::create_test_db;
use quizdeck::db::{NewQuestion, QuestionFilter};
use quizdeck::scoring::score_quiz;

fn sample_options() -> Vec<String> {
    vec!["1".to_string(), "2".to_string()]
}

fn sample_question<'a>(subject_id: i32, options: &'a [String]) -> NewQuestion<'a> {
    NewQuestion {
        subject_id,
        topic_id: None,
        text: "What is 1+1?",
        options,
        correct_index: 1,
        difficulty: "easy",
        explanation: Some("Basic arithmetic"),
    }
}

#[tokio::test]
async fn seeded_quiz_is_present_and_scorable() {
    let db = create_test_db().await;

    let questions = db.public_questions(Some(4)).await.unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0].options.len(), 4);

    let keys = db.scoring_keys(Some(4)).await.unwrap();
    let correct: Vec<i32> = keys.iter().map(|k| k.correct_index).collect();
    assert_eq!(correct, vec![3, 1, 0, 1, 2]);
}

#[tokio::test]
async fn user_round_trip_and_password_verification() {
    let db = create_test_db().await;

    db.create_user("a@example.com", "hunter2", Some("Alice"), "user")
        .await
        .unwrap();

    assert!(db.email_exists("a@example.com").await.unwrap());
    assert!(!db.email_exists("b@example.com").await.unwrap());
    assert_eq!(db.users_count().await.unwrap(), 1);

    let user = db
        .find_user_by_email("a@example.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(user.name.as_deref(), Some("Alice"));
    assert_eq!(user.role, "user");
    assert!(!user.is_admin());

    // Stored value is a hash, never the plaintext
    assert!(db
        .verify_user_password("a@example.com", "hunter2")
        .await
        .unwrap());
    assert!(!db
        .verify_user_password("a@example.com", "wrong")
        .await
        .unwrap());
    assert!(!db
        .verify_user_password("nobody@example.com", "hunter2")
        .await
        .unwrap());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let db = create_test_db().await;

    db.create_user("dup@example.com", "pw", None, "user")
        .await
        .unwrap();
    let second = db.create_user("dup@example.com", "pw2", None, "user").await;
    assert!(second.is_err());
}

#[tokio::test]
async fn session_round_trip_is_idempotent_on_delete() {
    let db = create_test_db().await;
    db.create_user("s@example.com", "pw", None, "user")
        .await
        .unwrap();

    let sid = db.create_session("s@example.com").await.unwrap();
    assert_eq!(sid.len(), 32);
    assert!(sid.chars().all(|c| c.is_ascii_hexdigit()));

    let user = db.get_user_by_session(&sid).await.unwrap();
    assert_eq!(user.unwrap().email, "s@example.com");

    db.delete_session(&sid).await.unwrap();
    assert!(db.get_user_by_session(&sid).await.unwrap().is_none());

    // Deleting an already-deleted session is fine
    db.delete_session(&sid).await.unwrap();
}

#[tokio::test]
async fn sessions_are_unique_per_login() {
    let db = create_test_db().await;
    db.create_user("u@example.com", "pw", None, "user")
        .await
        .unwrap();

    let first = db.create_session("u@example.com").await.unwrap();
    let second = db.create_session("u@example.com").await.unwrap();
    assert_ne!(first, second);

    db.delete_sessions_for_user("u@example.com").await.unwrap();
    assert!(db.get_user_by_session(&first).await.unwrap().is_none());
    assert!(db.get_user_by_session(&second).await.unwrap().is_none());
}

#[tokio::test]
async fn subject_and_topic_crud() {
    let db = create_test_db().await;

    let before = db.subjects().await.unwrap().len();
    let subject_id = db
        .create_subject("Geology", Some("Rocks and minerals"))
        .await
        .unwrap();
    assert_eq!(db.subjects().await.unwrap().len(), before + 1);
    assert!(db.subject_exists(subject_id).await.unwrap());

    let topic_id = db
        .create_topic(subject_id, "Volcanoes", None)
        .await
        .unwrap();
    let topics = db.topics_for_subject(subject_id).await.unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].id, topic_id);

    assert!(db
        .update_subject(subject_id, "Earth Science", None)
        .await
        .unwrap());
    assert!(db.delete_topic(topic_id).await.unwrap());
    assert!(db.delete_subject(subject_id).await.unwrap());
    assert!(!db.subject_exists(subject_id).await.unwrap());

    // Gone means gone
    assert!(!db.delete_subject(subject_id).await.unwrap());
}

#[tokio::test]
async fn question_crud_round_trip() {
    let db = create_test_db().await;
    db.create_user("author@example.com", "pw", None, "admin")
        .await
        .unwrap();

    let subject_id = db.create_subject("Trivia", None).await.unwrap();
    let options = sample_options();
    let question_id = db
        .create_question(sample_question(subject_id, &options), "author@example.com")
        .await
        .unwrap();

    let listed = db
        .questions_admin(QuestionFilter::Subject(subject_id))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, question_id);
    assert_eq!(listed[0].options, vec!["1", "2"]);
    assert_eq!(listed[0].correct_index, 1);
    assert_eq!(listed[0].created_by.as_deref(), Some("author@example.com"));
    assert_eq!(listed[0].subject_name.as_deref(), Some("Trivia"));

    let updated = NewQuestion {
        correct_index: 0,
        ..sample_question(subject_id, &options)
    };
    assert!(db.update_question(question_id, updated).await.unwrap());
    let keys = db.scoring_keys(Some(subject_id)).await.unwrap();
    assert_eq!(keys[0].correct_index, 0);

    assert!(db.delete_question(question_id).await.unwrap());
    assert!(!db.delete_question(question_id).await.unwrap());
}

#[tokio::test]
async fn deleting_a_subject_cascades_to_its_questions() {
    let db = create_test_db().await;
    db.create_user("author@example.com", "pw", None, "admin")
        .await
        .unwrap();

    let subject_id = db.create_subject("Doomed", None).await.unwrap();
    let options = sample_options();
    db.create_question(sample_question(subject_id, &options), "author@example.com")
        .await
        .unwrap();

    assert!(db.delete_subject(subject_id).await.unwrap());
    let remaining = db
        .questions_admin(QuestionFilter::Subject(subject_id))
        .await
        .unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn results_are_recorded_and_listed_newest_first() {
    let db = create_test_db().await;
    db.create_user("taker@example.com", "pw", None, "user")
        .await
        .unwrap();

    let keys = db.scoring_keys(Some(4)).await.unwrap();
    let perfect = score_quiz(&keys, &[Some(3), Some(1), Some(0), Some(1), Some(2)]);
    let partial = score_quiz(&keys, &[Some(0), Some(0), Some(0), Some(0), Some(0)]);

    db.record_result("taker@example.com", Some(4), &perfect, Some(120))
        .await
        .unwrap();
    db.record_result("taker@example.com", Some(4), &partial, None)
        .await
        .unwrap();

    let results = db.results_for_user("taker@example.com").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].score, 1);
    assert_eq!(results[1].score, 5);
    assert_eq!(results[1].percentage, 100.0);
    assert_eq!(results[1].time_taken, Some(120));
    assert_eq!(results[0].subject_name.as_deref(), Some("General Knowledge"));

    assert!(db
        .results_for_user("nobody@example.com")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn role_changes_are_visible_on_next_lookup() {
    let db = create_test_db().await;
    let user_id = db
        .create_user("promote@example.com", "pw", None, "user")
        .await
        .unwrap();

    assert!(db.set_user_role(user_id, "admin").await.unwrap());
    let user = db
        .find_user_by_email("promote@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.is_admin());

    assert!(!db.set_user_role(9999, "admin").await.unwrap());
}

#[tokio::test]
async fn scoring_keys_match_public_question_order() {
    let db = create_test_db().await;

    let questions = db.public_questions(None).await.unwrap();
    let keys = db.scoring_keys(None).await.unwrap();
    assert_eq!(questions.len(), keys.len());
    for (q, k) in questions.iter().zip(&keys) {
        assert_eq!(q.id, k.id);
    }
}
