//! End-to-end chaining scenarios driven by the bundled event loop.

use std::cell::RefCell;
use std::rc::Rc;

use eventual::runtime::EventLoop;
use eventual::test_utils::init_test_logging;
use eventual::{
    Eventual, Panicked, Reason, Resolution, Status, assert_with_log, test_complete, test_phase,
};

fn init_test(test_name: &str) {
    init_test_logging();
    test_phase!(test_name);
}

#[test]
fn fulfilled_then_increment() {
    init_test("fulfilled_then_increment");
    let event_loop = EventLoop::new();
    let next = Eventual::<i32>::fulfilled(&event_loop.dispatcher(), 5).map(|v| v + 1);

    assert!(next.is_pending());
    event_loop.run_until_idle().expect("run");
    assert_with_log!(
        next.outcome() == Some(Ok(6)),
        "incremented value",
        Some(Ok::<i32, Reason>(6)),
        next.outcome()
    );
    test_complete!("fulfilled_then_increment");
}

#[test]
fn rejected_then_catch_recovers_reason() {
    init_test("rejected_then_catch_recovers_reason");
    let event_loop = EventLoop::new();
    let recovered = Eventual::<String>::rejected(&event_loop.dispatcher(), Reason::msg("boom"))
        .catch(|reason| Ok(Resolution::Immediate(reason.to_string())));

    event_loop.run_until_idle().expect("run");
    assert_eq!(recovered.outcome(), Some(Ok("boom".to_string())));
    test_complete!("rejected_then_catch_recovers_reason");
}

#[test]
fn nested_eventuals_flatten_to_the_inner_value() {
    init_test("nested_eventuals_flatten_to_the_inner_value");
    let event_loop = EventLoop::new();
    let dispatcher = event_loop.dispatcher();

    let innermost = Eventual::<u8>::fulfilled(&dispatcher, 5);
    let middle = Eventual::resolve(&dispatcher, Resolution::Deferred(innermost));
    let outer = Eventual::resolve(&dispatcher, Resolution::Deferred(middle));

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    outer.then(move |v| {
        *sink.borrow_mut() = Some(v);
        Ok(Resolution::Immediate(()))
    });

    event_loop.run_until_idle().expect("run");
    assert_eq!(*seen.borrow(), Some(5));
    assert_eq!(outer.status(), Status::Fulfilled);
    test_complete!("nested_eventuals_flatten_to_the_inner_value");
}

#[test]
fn initiator_resolving_with_an_eventual_flattens() {
    init_test("initiator_resolving_with_an_eventual_flattens");
    let event_loop = EventLoop::new();
    let dispatcher = event_loop.dispatcher();

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let checked = Eventual::<u8>::new(&dispatcher, |settle| {
        settle.resolve(Resolution::Deferred(Eventual::fulfilled(&dispatcher, 5)));
        Ok(())
    })
    .then(move |v| {
        *sink.borrow_mut() = Some(v);
        Ok(Resolution::Immediate(v == 5))
    });

    event_loop.run_until_idle().expect("run");
    assert_eq!(*seen.borrow(), Some(5));
    assert_eq!(checked.outcome(), Some(Ok(true)));
    test_complete!("initiator_resolving_with_an_eventual_flattens");
}

#[test]
fn initiator_error_after_adopting_is_ignored() {
    init_test("initiator_error_after_adopting_is_ignored");
    let event_loop = EventLoop::new();
    let dispatcher = event_loop.dispatcher();
    let (inner, settle_inner) = Eventual::<u8>::pending(&dispatcher);

    let outer = Eventual::<u8>::new(&dispatcher, |settle| {
        assert!(settle.resolve(Resolution::Deferred(inner)));
        assert!(!settle.reject(Reason::msg("late")));
        Err(Reason::msg("x"))
    });
    assert!(outer.is_pending());

    settle_inner.fulfill(5);
    event_loop.run_until_idle().expect("run");
    assert_with_log!(
        outer.outcome() == Some(Ok(5)),
        "outer follows the adopted eventual",
        Some(Ok::<u8, Reason>(5)),
        outer.outcome()
    );
    test_complete!("initiator_error_after_adopting_is_ignored");
}

#[test]
fn initiator_failures_reject() {
    init_test("initiator_failures_reject");
    let event_loop = EventLoop::new();
    let dispatcher = event_loop.dispatcher();

    let errored = Eventual::<u8>::new(&dispatcher, |_| Err(Reason::msg("x")));
    let panicked = Eventual::<u8>::new(&dispatcher, |_| panic!("x"));

    assert_eq!(errored.outcome(), Some(Err(Reason::msg("x"))));
    assert_eq!(
        panicked.outcome(),
        Some(Err(Reason::Panicked(Panicked::new("x"))))
    );
    test_complete!("initiator_failures_reject");
}

#[test]
fn settlement_from_a_later_macrotask() {
    init_test("settlement_from_a_later_macrotask");
    let event_loop = EventLoop::new();
    let dispatcher = event_loop.dispatcher();
    let (source, settle) = Eventual::<u8>::pending(&dispatcher);
    let doubled = source.map(|v| u16::from(v) * 2);

    event_loop.queue_macrotask("host-io", move || {
        settle.fulfill(21);
    });
    event_loop.run_until_idle().expect("run");
    assert_eq!(doubled.outcome(), Some(Ok(42)));
    test_complete!("settlement_from_a_later_macrotask");
}

#[test]
fn rejection_skips_fulfillment_reactions_until_caught() {
    init_test("rejection_skips_fulfillment_reactions_until_caught");
    let event_loop = EventLoop::new();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&calls);
    let log_after = Rc::clone(&calls);
    let result = Eventual::<u8>::rejected(&event_loop.dispatcher(), Reason::msg("early"))
        .then(move |v| {
            log.borrow_mut().push("then");
            Ok(Resolution::Immediate(v))
        })
        .catch(|reason| {
            assert_eq!(reason.message(), Some("early"));
            Ok(Resolution::Immediate(0))
        })
        .map(move |v| {
            log_after.borrow_mut().push("after-catch");
            v + 1
        });

    event_loop.run_until_idle().expect("run");
    assert_eq!(*calls.borrow(), vec!["after-catch"]);
    assert_eq!(result.outcome(), Some(Ok(1)));
    test_complete!("rejection_skips_fulfillment_reactions_until_caught");
}

#[derive(Debug, PartialEq)]
struct Code(u16);

#[test]
fn opaque_reasons_survive_the_chain() {
    init_test("opaque_reasons_survive_the_chain");
    let event_loop = EventLoop::new();
    let failed = Eventual::<u8>::rejected(&event_loop.dispatcher(), Reason::opaque(Code(404)))
        .map(|v| v + 1)
        .forward();

    event_loop.run_until_idle().expect("run");
    let Some(Err(reason)) = failed.outcome() else {
        panic!("expected a rejection");
    };
    assert_eq!(reason.downcast_ref::<Code>(), Some(&Code(404)));
    test_complete!("opaque_reasons_survive_the_chain");
}

#[test]
fn all_and_race_through_the_type() {
    init_test("all_and_race_through_the_type");
    let event_loop = EventLoop::new();
    let dispatcher = event_loop.dispatcher();
    let inputs = || {
        vec![
            Eventual::<u8>::fulfilled(&dispatcher, 1),
            Eventual::<u8>::fulfilled(&dispatcher, 2).map(|v| v * 10),
        ]
    };

    let every = Eventual::all(&dispatcher, inputs());
    let first = Eventual::race(&dispatcher, inputs());
    event_loop.run_until_idle().expect("run");

    assert_eq!(every.outcome(), Some(Ok(vec![1, 20])));
    assert_eq!(first.outcome(), Some(Ok(1)));
    test_complete!("all_and_race_through_the_type");
}
