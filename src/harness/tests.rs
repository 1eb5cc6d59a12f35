use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::test_utils::{fast_app, HangingApp, Journal, JournalingApp};

fn recorder(journal: &Journal, event: &'static str) -> SyncStep<impl Fn(&mut CaseContext<()>) -> Result<(), Failure> + Send + Sync, ()> {
    let journal = journal.clone();
    sync_step(move |_: &mut CaseContext<()>| {
        journal.record(event);
        Ok(())
    })
}

fn boxed(suite: impl RunnableSuite + 'static) -> Vec<Box<dyn RunnableSuite>> {
    vec![Box::new(suite)]
}

#[tokio::test]
async fn test_phases_run_in_strict_order() {
    let journal = Journal::new();
    let app = Arc::new(JournalingApp::new(fast_app(), journal.clone()));
    let harness = Harness::new(app);

    let suite = Suite::<()>::new("Ordering")
        .before_each(LoadFeed(0))
        .after_each(recorder(&journal, "teardown"))
        .case(Case::new("first", recorder(&journal, "body:first")))
        .case(Case::new("second", recorder(&journal, "body:second")));

    let report = harness.run(&boxed(suite)).await;
    assert!(report.passed());
    assert_eq!(
        journal.events(),
        vec![
            "mount",
            "load:0:start",
            "load:0:done",
            "body:first",
            "teardown",
            "mount",
            "load:0:start",
            "load:0:done",
            "body:second",
            "teardown",
        ]
    );
}

#[tokio::test]
async fn test_failure_does_not_cascade() {
    let harness = Harness::new(Arc::new(fast_app()));
    let suite = Suite::<()>::new("Isolation")
        .it("fails", |ctx| expect(ctx.page().entry_count()).to_be_greater_than(0))
        .it("passes", |ctx| expect(ctx.page().body_class()).to_be("menu-hidden"));

    let report = harness.run(&boxed(suite)).await;
    assert_eq!(report.summary(), "2 specs, 1 failure");
    assert_eq!(
        report.find("Isolation fails").unwrap().state,
        CaseState::Failed(FailureKind::AssertionFailure)
    );
    assert_eq!(report.find("Isolation passes").unwrap().state, CaseState::Passed);
}

#[tokio::test]
async fn test_teardown_runs_after_failed_body() {
    let journal = Journal::new();
    let harness = Harness::new(Arc::new(fast_app()));
    let suite = Suite::<()>::new("Teardown")
        .after_each(recorder(&journal, "teardown"))
        .it("fails", |_| Err(Failure::assertion("broken")));

    let report = harness.run(&boxed(suite)).await;
    assert_eq!(journal.events(), vec!["teardown"]);
    let case = report.find("Teardown fails").unwrap();
    assert_eq!(case.failures.len(), 1);
    assert_eq!(case.failures[0].phase, Phase::Body);
}

#[tokio::test(start_paused = true)]
async fn test_hung_setup_skips_body_and_times_out() {
    let journal = Journal::new();
    let harness = Harness::new(Arc::new(HangingApp::default()))
        .with_phase_timeout(Duration::from_millis(300));
    let suite = Suite::<()>::new("Hang")
        .before_each(LoadFeed(0))
        .after_each(recorder(&journal, "teardown"))
        .case(Case::new("body", recorder(&journal, "body")));

    let report = harness.run(&boxed(suite)).await;
    let case = report.find("Hang body").unwrap();
    assert_eq!(case.state, CaseState::Failed(FailureKind::Timeout));
    assert_eq!(case.failures[0].phase, Phase::Setup);
    assert_eq!(
        case.failures[0].message,
        "setup timed out after 300ms waiting for its completion token"
    );
    assert_eq!(journal.events(), vec!["teardown"]);
}

#[tokio::test]
async fn test_state_is_fresh_per_case() {
    let harness = Harness::new(Arc::new(fast_app()));
    let suite = Suite::<u32>::new("State")
        .before_each(sync_step(|ctx: &mut CaseContext<u32>| {
            ctx.state += 1;
            Ok(())
        }))
        .it("first", |ctx| expect(ctx.state).to_be(1))
        .it("second", |ctx| expect(ctx.state).to_be(1));

    assert!(harness.run(&boxed(suite)).await.passed());
}

#[tokio::test]
async fn test_page_is_fresh_per_case() {
    let harness = Harness::new(Arc::new(fast_app()));
    let suite = Suite::<()>::new("Page")
        .it("opens the menu", |ctx| {
            ctx.page().click_menu_icon();
            expect(ctx.page().is_menu_hidden()).to_be(false)
        })
        .it("sees a hidden menu", |ctx| {
            expect(ctx.page().body_class()).to_be("menu-hidden")
        });

    assert!(harness.run(&boxed(suite)).await.passed());
}

#[tokio::test]
async fn test_filter_selects_cases() {
    let harness = Harness::new(Arc::new(fast_app())).with_filter("Menu is hidden");
    let suite = Suite::<()>::new("The Menu")
        .it("is hidden by default", |_| Ok(()))
        .it("changes visibility on click", |_| Err(Failure::assertion("not run")));

    let report = harness.run(&boxed(suite)).await;
    assert_eq!(report.total(), 1);
    assert!(report.passed());
}

#[tokio::test(start_paused = true)]
async fn test_case_timeout_override() {
    let harness = Harness::new(Arc::new(HangingApp::default()));
    let suite = Suite::<()>::new("Slow").case(
        Case::new("hangs", LoadFeed(2)).with_timeout(Duration::from_millis(100)),
    );

    let report = harness.run(&boxed(suite)).await;
    let case = report.find("Slow hangs").unwrap();
    assert_eq!(case.failures[0].kind, FailureKind::Timeout);
    assert!(case.failures[0].message.contains("100ms"));
}

#[tokio::test]
async fn test_every_teardown_hook_runs() {
    let journal = Journal::new();
    let harness = Harness::new(Arc::new(fast_app()));
    let suite = Suite::<()>::new("Hooks")
        .after_each(sync_step(|_: &mut CaseContext<()>| Err(Failure::assertion("first hook"))))
        .after_each(recorder(&journal, "second hook"))
        .it("passes", |_| Ok(()));

    let report = harness.run(&boxed(suite)).await;
    assert_eq!(journal.events(), vec!["second hook"]);
    let case = report.find("Hooks passes").unwrap();
    assert_eq!(case.state, CaseState::Failed(FailureKind::AssertionFailure));
    assert_eq!(case.failures[0].phase, Phase::Teardown);
}

#[tokio::test]
async fn test_panic_inside_callback_task_is_assertion() {
    let harness = Harness::new(Arc::new(fast_app()));
    let suite = Suite::<()>::new("Callback").it_with_done("checks entries later", |ctx, done| {
        let page = ctx.page().clone();
        done.spawn(move |done| async move {
            tokio::task::yield_now().await;
            assert_eq!(page.entry_count(), 99, "entries wrong");
            done.complete();
        });
        Ok(())
    });

    let report = harness.run_suite(&suite).await;
    let case = &report.cases[0];
    assert_eq!(case.state, CaseState::Failed(FailureKind::AssertionFailure));
    assert_eq!(case.failures[0].phase, Phase::Body);
    assert!(
        case.failures[0].message.contains("entries wrong"),
        "{}",
        case.failures[0].message
    );
}

#[tokio::test]
async fn test_structured_expectations() {
    let harness = Harness::new(Arc::new(fast_app()));
    let suite = Suite::<()>::new("Entries")
        .before_each(LoadFeed(1))
        .it("lists the loaded feed", |ctx| {
            let titles: Vec<String> = ctx.page().entries().into_iter().map(|e| e.title).collect();
            expect(titles).to_equal(vec![
                "CSS Tricks post 1",
                "CSS Tricks post 2",
                "CSS Tricks post 3",
                "CSS Tricks post 4",
            ])?;
            expect(ctx.page().feed_links().len()).not().to_equal(0)
        })
        .it("counts wrong", |ctx| expect(ctx.page().entry_count()).to_equal(5));

    let report = harness.run_suite(&suite).await;
    assert_eq!(report.failed_count(), 1);
    assert!(report.cases[0].passed());
    assert_eq!(report.cases[1].failures[0].message, "Expected 4 to equal 5.");
}
