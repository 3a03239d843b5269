//! Turn controller tests for the two chat tiers.

use tierchat_runtime::{Attachment, ChatSession, Settings, TurnController, TurnOutcome};
use wcore::{
    EntryRole, Error, Memory, Message, Payload, Response, Role,
    testing::{Recorder, ScriptedModel},
};

fn controller(model: ScriptedModel) -> TurnController<ScriptedModel> {
    TurnController::new(model, Settings::instant())
}

#[tokio::test]
async fn transcript_grows_by_two_per_turn() {
    let model = ScriptedModel::new()
        .reply(Response::text("Hello!"))
        .reply(Response::text("Sure."))
        .reply(Response::text("Bye."));
    let turns = controller(model);
    let mut session = ChatSession::no_tools();
    let mut recorder = Recorder::new();

    for (n, input) in ["hi", "plan a picnic", "thanks"].into_iter().enumerate() {
        let outcome = turns.submit(&mut session, input, &mut recorder).await.unwrap();
        assert!(outcome.is_replied());
        assert_eq!(session.transcript().len(), 2 * (n + 1));
    }

    let roles: Vec<_> = session.transcript().iter().map(|e| e.role()).collect();
    assert_eq!(
        roles,
        [
            EntryRole::User,
            EntryRole::Assistant,
            EntryRole::User,
            EntryRole::Assistant,
            EntryRole::User,
            EntryRole::Assistant,
        ]
    );
    assert_eq!(recorder.texts(), ["Hello!", "Sure.", "Bye."]);
}

#[tokio::test]
async fn memory_is_replayed_in_order() {
    let model = ScriptedModel::new()
        .reply(Response::text("first reply"))
        .reply(Response::text("second reply"));
    let turns = controller(model.clone());
    let mut session = ChatSession::no_tools();
    let mut recorder = Recorder::new();

    turns.submit(&mut session, "first", &mut recorder).await.unwrap();
    turns.submit(&mut session, "second", &mut recorder).await.unwrap();

    let requests = model.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].messages, [Message::user("first")]);
    assert_eq!(
        requests[1].messages,
        [
            Message::user("first"),
            Message::assistant("first reply", &[]),
            Message::user("second"),
        ]
    );
    assert!(requests[1].tools.is_empty());
    assert_eq!(session.memory().len(), 4);
}

#[tokio::test]
async fn model_failure_leaves_memory_untouched() {
    let model = ScriptedModel::new()
        .reply(Response::text("ok"))
        .fail("rate limited");
    let turns = controller(model);
    let mut session = ChatSession::no_tools();
    let mut recorder = Recorder::new();

    turns.submit(&mut session, "one", &mut recorder).await.unwrap();
    let before = session.memory().messages().to_vec();

    let outcome = turns.submit(&mut session, "two", &mut recorder).await.unwrap();
    let TurnOutcome::Failed(description) = outcome else {
        panic!("expected a failed turn");
    };
    assert!(description.contains("rate limited"));
    assert_eq!(session.memory().messages(), before);

    let errors: Vec<_> = session
        .transcript()
        .iter()
        .filter(|e| e.is_error())
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(session.transcript().len(), 4);
    assert_eq!(session.transcript().last().unwrap().role(), EntryRole::Error);
    assert!(recorder.entries().last().unwrap().is_error());
}

#[tokio::test]
async fn empty_reply_is_an_error_entry() {
    let turns = controller(ScriptedModel::new().reply(Response::text("")));
    let mut session = ChatSession::no_tools();
    let outcome = turns
        .submit(&mut session, "hello?", &mut Recorder::new())
        .await
        .unwrap();
    assert!(!outcome.is_replied());
    assert!(session.memory().is_empty());
}

#[tokio::test]
async fn empty_input_is_rejected() {
    let model = ScriptedModel::new().reply(Response::text("unused"));
    let turns = controller(model.clone());
    let mut session = ChatSession::no_tools();

    let err = turns
        .submit(&mut session, "   ", &mut Recorder::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
    assert!(session.transcript().is_empty());
    assert!(model.requests().is_empty());
}

#[tokio::test]
async fn attachments_augment_prompt_and_reset() {
    let model = ScriptedModel::new()
        .reply(Response::text("Sunny, so go to Bowl Room."))
        .reply(Response::text("Anything else?"));
    let turns = controller(model.clone());
    let mut session = ChatSession::context();
    let mut recorder = Recorder::new();

    assert!(session.toggle(Attachment::Weather, true));
    assert!(session.toggle(Attachment::Restaurants, true));
    turns
        .submit(&mut session, "plan a picnic", &mut recorder)
        .await
        .unwrap();

    let roles: Vec<_> = session.transcript().iter().map(|e| e.role()).collect();
    assert_eq!(
        roles,
        [
            EntryRole::User,
            EntryRole::ToolResult,
            EntryRole::ToolResult,
            EntryRole::Assistant,
        ]
    );
    let weather = &session.transcript().entries()[1];
    assert_eq!(weather.name(), Some("Weather (Seoul)"));
    assert_eq!(weather.payload(), Some(&Payload::Text("Sunny".into())));

    let prompt = &model.requests()[0].messages[0];
    assert_eq!(prompt.role, Role::User);
    assert!(prompt.content.starts_with("plan a picnic\n\n[Weather (Seoul)]\nSunny"));
    assert!(prompt.content.contains("\n\n[Restaurants (picnic food)]\n["));
    assert!(prompt.content.contains("Kitchen Maillard"));

    assert!(!session.toggles().is_on(Attachment::Weather));
    assert!(!session.toggles().is_on(Attachment::Restaurants));

    turns.submit(&mut session, "thanks", &mut recorder).await.unwrap();
    assert_eq!(model.requests()[1].messages.last().unwrap().content, "thanks");
    assert_eq!(session.transcript().len(), 6);
}

#[tokio::test]
async fn tiers_use_their_own_prompt() {
    let model = ScriptedModel::new()
        .reply(Response::text("a"))
        .reply(Response::text("b"));
    let turns = controller(model.clone());

    turns
        .submit(&mut ChatSession::no_tools(), "hi", &mut Recorder::new())
        .await
        .unwrap();
    turns
        .submit(&mut ChatSession::context(), "hi", &mut Recorder::new())
        .await
        .unwrap();

    let requests = model.requests();
    assert_eq!(requests[0].system, tierchat_runtime::prompt::NO_TOOLS);
    assert_eq!(requests[1].system, tierchat_runtime::prompt::CONTEXT);
}
