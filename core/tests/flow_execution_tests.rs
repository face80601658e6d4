// tests/flow_execution_tests.rs
mod common;

use common::*;
use storefront::{Flow, FlowControl, FlowError, FlowOutcome, Shared, StepDef};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_flow_runs_steps_in_order() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::required("ordered", &["step1", "step2", "step3"]);

  flow.on("step1", create_simple_handler("step1", " S1"));
  flow.on("step2", create_simple_handler("step2", " S2"));
  flow.on("step3", create_simple_handler("step3", " S3"));

  let ctx = Shared::new(TestContext::default());
  let result = flow.run(ctx.clone()).await;

  assert_eq!(result.unwrap(), FlowOutcome::Completed);
  let guard = ctx.read();
  assert_eq!(guard.counter, 3);
  assert_eq!(guard.message, " S1 S2 S3");
  assert_eq!(guard.steps_executed, vec!["step1", "step2", "step3"]);
}

#[tokio::test]
#[serial]
async fn test_flow_stops_on_flow_control_stop() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::required("stopping", &["stepA", "stopStep", "stepC"]);

  flow.on("stepA", create_simple_handler("stepA", "A"));
  flow.on("stopStep", |ctx: Shared<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push("stopStep".to_string());
      Ok::<FlowControl, FlowError>(FlowControl::Stop)
    })
  });
  flow.on("stepC", create_simple_handler("stepC", "C"));

  let ctx = Shared::new(TestContext::default());
  let result = flow.run(ctx.clone()).await;

  assert_eq!(result.unwrap(), FlowOutcome::Stopped);
  let guard = ctx.read();
  assert_eq!(guard.counter, 1);
  assert_eq!(guard.steps_executed, vec!["stepA", "stopStep"]);
}

#[tokio::test]
#[serial]
async fn test_flow_propagates_handler_error() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::required("failing", &["good_step", "bad_step", "another_step"]);

  flow.on("good_step", create_simple_handler("good_step", "Good"));
  flow.on("bad_step", create_failing_handler("bad_step", "I am a bad step!"));
  flow.on("another_step", create_simple_handler("another_step", "NeverRun"));

  let ctx = Shared::new(TestContext::default());
  let result = flow.run(ctx.clone()).await;

  assert_eq!(result.unwrap_err(), TestError::Handler("I am a bad step!".to_string()));
  let guard = ctx.read();
  assert_eq!(guard.message, "Good");
  assert_eq!(guard.steps_executed, vec!["good_step", "bad_step"]);
}

#[tokio::test]
#[serial]
async fn test_flow_skips_step_if_condition_met() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new(
    "skipping",
    [
      StepDef::required("step1"),
      StepDef::required("step_to_skip").skip_if(|ctx: &Shared<TestContext>| ctx.read().counter > 0),
      StepDef::required("step3"),
    ],
  );

  flow.on("step1", create_simple_handler("step1", " S1"));
  flow.on("step_to_skip", create_simple_handler("step_to_skip", " SKIPPED_THIS"));
  flow.on("step3", create_simple_handler("step3", " S3"));

  let ctx = Shared::new(TestContext::default());
  assert_eq!(flow.run(ctx.clone()).await.unwrap(), FlowOutcome::Completed);

  let guard = ctx.read();
  assert_eq!(guard.message, " S1 S3");
  assert_eq!(guard.steps_executed, vec!["step1", "step3"]);
}

#[tokio::test]
#[serial]
async fn test_required_step_missing_handler_fails() {
  setup_tracing();
  let flow = Flow::<TestContext, TestError>::required("unwired", &["step_with_no_handler"]);

  let result = flow.run(Shared::new(TestContext::default())).await;

  match result {
    Err(TestError::Flow(s)) => {
      assert!(s.contains("HandlerMissing"));
      assert!(s.contains("step_with_no_handler"));
    }
    other => panic!("Expected FlowError::HandlerMissing, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_optional_step_missing_handler_succeeds() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new(
    "optional",
    [StepDef::optional("optional_step_no_handler"), StepDef::required("last")],
  );
  flow.on("last", create_simple_handler("last", "L"));

  let ctx = Shared::new(TestContext::default());
  assert_eq!(flow.run(ctx.clone()).await.unwrap(), FlowOutcome::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["last"]);
}

#[tokio::test]
#[serial]
async fn test_before_on_after_execution_order() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::required("phases", &["main_step"]);

  // Registered out of order on purpose; phases decide the order.
  flow.after("main_step", create_simple_handler("after_main", "After;"));
  flow.on("main_step", create_simple_handler("on_main", "On;"));
  flow.before("main_step", create_simple_handler("before_main", "Before;"));

  let ctx = Shared::new(TestContext::default());
  flow.run(ctx.clone()).await.unwrap();

  let guard = ctx.read();
  assert_eq!(guard.message, "Before;On;After;");
  assert_eq!(guard.steps_executed, vec!["before_main", "on_main", "after_main"]);
}

#[tokio::test]
#[serial]
async fn test_stop_in_before_phase_skips_rest_of_step() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::required("early_stop", &["main_step", "next"]);
  flow.before("main_step", create_simple_handler("before_main", "B"));
  flow.on("main_step", create_simple_handler("on_main", "O"));
  flow.on("next", create_simple_handler("next", "N"));

  let ctx = Shared::new(TestContext {
    should_stop_at: Some("before_main".to_string()),
    ..TestContext::default()
  });
  assert_eq!(flow.run(ctx.clone()).await.unwrap(), FlowOutcome::Stopped);
  assert_eq!(ctx.read().message, "B");
}

#[tokio::test]
#[serial]
async fn test_context_is_shared_between_steps() {
  setup_tracing();
  let mut flow = Flow::<TestContext, FlowError>::required("shared", &["write", "read_modify"]);

  flow.on("write", |ctx: Shared<TestContext>| {
    Box::pin(async move {
      ctx.update(|c| {
        c.counter = 10;
        c.message = "SetByStep1".to_string();
      });
      Ok::<FlowControl, FlowError>(FlowControl::Continue)
    })
  });
  flow.on("read_modify", |ctx: Shared<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      assert_eq!(guard.counter, 10);
      guard.counter += 5;
      guard.message.push_str("_ThenStep2");
      Ok::<FlowControl, FlowError>(FlowControl::Continue)
    })
  });

  let ctx = Shared::new(TestContext::default());
  flow.run(ctx.clone()).await.unwrap();

  assert_eq!(ctx.read().counter, 15);
  assert_eq!(ctx.map_read(|c| &c.message).as_str(), "SetByStep1_ThenStep2");
}

#[test]
#[should_panic(expected = "step 'nope' is not defined")]
fn test_registering_handler_for_unknown_step_panics() {
  let mut flow = Flow::<TestContext, TestError>::required("typo", &["real"]);
  flow.on("nope", create_simple_handler("nope", ""));
}

#[tokio::test]
#[serial]
async fn test_handler_error_from_anyhow_is_wrapped() {
  setup_tracing();
  let mut flow = Flow::<TestContext, FlowError>::required("anyhow", &["io"]);
  flow.on("io", |_ctx: Shared<TestContext>| {
    Box::pin(async move { Err::<FlowControl, FlowError>(anyhow::anyhow!("disk on fire").into()) })
  });

  match flow.run(Shared::new(TestContext::default())).await {
    Err(FlowError::HandlerError { source }) => assert_eq!(source.to_string(), "disk on fire"),
    other => panic!("Expected FlowError::HandlerError, got {:?}", other),
  }
}
