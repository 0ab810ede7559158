use std::sync::Arc;

use provider::ScriptedQuestionSource;
use quiz_core::model::{
    CertificationTrack, OptionKey, Question, QuestionNumber, QuestionOption, UserId,
};
use quiz_core::time::fixed_now;
use services::{AdvanceOutcome, AttemptState, Clock, QuizRunner};

fn build_question(number: u32, correct: &[&str]) -> Question {
    Question::new(
        QuestionNumber::new(number),
        format!("Prompt {number}"),
        vec![
            QuestionOption::new(OptionKey::from("A"), "x"),
            QuestionOption::new(OptionKey::from("B"), "y"),
        ],
        correct.iter().map(|key| OptionKey::from(*key)),
        None,
    )
    .unwrap()
}

fn build_runner(source: &ScriptedQuestionSource) -> QuizRunner {
    QuizRunner::new(Clock::fixed(fixed_now()), Arc::new(source.clone()))
}

#[tokio::test]
async fn full_quiz_round_trip() {
    let source = ScriptedQuestionSource::new();
    source.push(build_question(1, &["A"]));
    source.push(build_question(2, &["B"]));
    let runner = build_runner(&source);

    let mut session = runner
        .start(UserId::new("u1"), CertificationTrack::new("saa-c03"))
        .await;
    assert_eq!(
        session.current_question().unwrap().number(),
        QuestionNumber::new(1)
    );

    // wrong answer first
    session.toggle_option(&OptionKey::from("B")).unwrap();
    assert!(!runner.submit(&mut session).unwrap());
    assert_eq!(
        session.attempt_state(),
        AttemptState::Submitted { correct: false }
    );

    // retry after reset
    session.reset().unwrap();
    assert_eq!(session.attempt_state(), AttemptState::Unanswered);
    assert!(session.selection().is_empty());

    session.toggle_option(&OptionKey::from("A")).unwrap();
    assert!(runner.submit(&mut session).unwrap());

    // forward to question 2
    assert_eq!(runner.advance(&mut session).await, AdvanceOutcome::Displayed);
    assert_eq!(
        session.current_question().unwrap().number(),
        QuestionNumber::new(2)
    );
    assert_eq!(session.progress().viewed, 2);
    assert_eq!(session.attempt_state(), AttemptState::Unanswered);

    // back to question 1, restored as submitted and correct
    assert_eq!(runner.retreat(&mut session), AdvanceOutcome::Displayed);
    assert_eq!(
        session.current_question().unwrap().number(),
        QuestionNumber::new(1)
    );
    assert_eq!(
        session.attempt_state(),
        AttemptState::Submitted { correct: true }
    );
    assert_eq!(session.selection(), [OptionKey::from("A")]);
    assert!(session.progress().at_first);

    // forward again is a replay, not a fetch
    assert_eq!(runner.advance(&mut session).await, AdvanceOutcome::Displayed);
    assert_eq!(
        session.current_question().unwrap().number(),
        QuestionNumber::new(2)
    );
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn exhausted_pool_is_a_silent_no_op() {
    let source = ScriptedQuestionSource::new();
    source.push(build_question(1, &["A"]));
    let runner = build_runner(&source);

    let mut session = runner
        .start(UserId::new("u1"), CertificationTrack::new("saa-c03"))
        .await;

    assert_eq!(
        runner.advance(&mut session).await,
        AdvanceOutcome::Unavailable
    );
    assert_eq!(session.progress().viewed, 1);
    assert_eq!(session.progress().fetched, 1);

    // a later retry can still succeed
    source.push(build_question(2, &["B"]));
    assert_eq!(runner.advance(&mut session).await, AdvanceOutcome::Displayed);
    assert_eq!(session.progress().viewed, 2);
}

#[tokio::test]
async fn session_without_a_first_question_stays_loading() {
    let source = ScriptedQuestionSource::new();
    let runner = build_runner(&source);

    let mut session = runner
        .start(UserId::new("u1"), CertificationTrack::new("saa-c03"))
        .await;
    assert!(session.current_question().is_none());
    assert_eq!(session.progress().viewed, 0);
    assert!(!session.can_submit());

    source.push(build_question(1, &["A"]));
    assert_eq!(runner.advance(&mut session).await, AdvanceOutcome::Displayed);
    assert_eq!(
        session.current_question().unwrap().number(),
        QuestionNumber::new(1)
    );
}
