#![cfg(feature = "transformers")]
//! How errors thrown and caught through each transformer interact with the
//! transformer's own context.

use lambars_error::effect::{
    ExceptT, ExceptTKind, IO, IOKind, IdentityT, IdentityTKind, ListT, ListTKind, MaybeT,
    MaybeTKind, MonadError, MonadTrans, RWST, RWSTKind, ReaderT, ReaderTKind, StateT, StateTKind,
    StrictRWST, StrictRWSTKind, StrictStateT, StrictStateTKind, StrictWriterT, StrictWriterTKind,
    WriterT, WriterTKind, try_error,
};
use lambars_error::typeclass::{Identity, IdentityKind, Monad, ResultKind};
use rstest::rstest;

fn boom() -> String {
    "boom".to_string()
}

// =============================================================================
// State: rollback versus write-through
// =============================================================================

type Counter = StateTKind<i32, ResultKind<String>>;
type StrictCounter = StrictStateTKind<i32, ResultKind<String>>;

fn counter_fails_after_put(value: i32) -> StateT<i32, ResultKind<String>, i32> {
    Counter::then(StateT::put(value), || Counter::throw_error(boom()))
}

fn strict_counter_fails_after_put(value: i32) -> StrictStateT<i32, ResultKind<String>, i32> {
    StrictCounter::then(StrictStateT::put(value), || StrictCounter::throw_error(boom()))
}

#[rstest]
fn lazy_state_handler_sees_entry_state() {
    let recovered = Counter::catch_error(counter_fails_after_put(5), |_| StateT::get());
    assert_eq!(recovered.run(1), Ok((1, 1)));
}

#[rstest]
fn lazy_state_entry_includes_updates_before_catch() {
    let program = Counter::then(StateT::put(3), || {
        Counter::catch_error(counter_fails_after_put(5), |_| StateT::get())
    });
    assert_eq!(program.run(1), Ok((3, 3)));
}

#[rstest]
fn strict_state_handler_sees_throw_point_state() {
    let recovered = StrictCounter::catch_error(strict_counter_fails_after_put(5), |_| {
        StrictStateT::get()
    });
    assert_eq!(recovered.run(1), Ok((5, 5)));
}

#[rstest]
fn state_handler_update_is_final() {
    let lazy = Counter::catch_error(counter_fails_after_put(5), |_| {
        Counter::then(StateT::put(9), StateT::get)
    });
    let strict = StrictCounter::catch_error(strict_counter_fails_after_put(5), |_| {
        StrictCounter::then(StrictStateT::put(9), StrictStateT::get)
    });
    assert_eq!(lazy.run(1), Ok((9, 9)));
    assert_eq!(strict.run(1), Ok((9, 9)));
}

#[rstest]
fn lazy_state_try_error_rolls_back() {
    let outcome = try_error::<Counter, i32>(counter_fails_after_put(5));
    assert_eq!(outcome.run(1), Ok((Err(boom()), 1)));
}

#[rstest]
fn strict_state_try_error_keeps_updates() {
    let outcome = try_error::<StrictCounter, i32>(strict_counter_fails_after_put(5));
    assert_eq!(outcome.run(1), Ok((Err(boom()), 5)));
}

#[rstest]
fn uncaught_error_discards_state() {
    assert_eq!(counter_fails_after_put(5).run(1), Err(boom()));
    assert_eq!(strict_counter_fails_after_put(5).run(1), Err(boom()));
}

// =============================================================================
// Writer: discarded versus kept output
// =============================================================================

type Logged = WriterTKind<Vec<String>, ResultKind<String>>;
type StrictLogged = StrictWriterTKind<Vec<String>, ResultKind<String>>;

fn note(message: &str) -> WriterT<Vec<String>, ResultKind<String>, ()> {
    WriterT::tell(vec![message.to_string()])
}

fn strict_note(message: &str) -> StrictWriterT<Vec<String>, ResultKind<String>, ()> {
    StrictWriterT::tell(vec![message.to_string()])
}

#[rstest]
fn lazy_writer_discards_failed_output() {
    let program = Logged::then(note("before"), || {
        Logged::catch_error(
            Logged::then(note("attempt"), || Logged::throw_error::<i32>(boom())),
            |_| Logged::then(note("fallback"), || Logged::pure(0)),
        )
    });
    assert_eq!(
        program.run(),
        Ok((0, vec!["before".to_string(), "fallback".to_string()]))
    );
}

#[rstest]
fn strict_writer_keeps_failed_output() {
    let program = StrictLogged::then(strict_note("before"), || {
        StrictLogged::catch_error(
            StrictLogged::then(strict_note("attempt"), || {
                StrictLogged::throw_error::<i32>(boom())
            }),
            |_| StrictLogged::then(strict_note("fallback"), || StrictLogged::pure(0)),
        )
    });
    assert_eq!(
        program.run(),
        Ok((
            0,
            vec![
                "before".to_string(),
                "attempt".to_string(),
                "fallback".to_string()
            ]
        ))
    );
}

#[rstest]
fn strict_writer_listen_hears_only_its_block() {
    let program = StrictLogged::then(strict_note("outside"), || {
        StrictWriterT::listen(StrictLogged::then(strict_note("inside"), || {
            StrictLogged::pure(1)
        }))
    });
    assert_eq!(
        program.run(),
        Ok((
            (1, vec!["inside".to_string()]),
            vec!["outside".to_string(), "inside".to_string()]
        ))
    );
}

#[rstest]
fn writer_censor_rewrites_output() {
    let shout = |output: Vec<String>| -> Vec<String> {
        output.into_iter().map(|line| line.to_uppercase()).collect()
    };
    let lazy = WriterT::censor(shout, note("quiet"));
    let strict = StrictWriterT::censor(shout, strict_note("quiet"));
    assert_eq!(lazy.exec(), Ok(vec!["QUIET".to_string()]));
    assert_eq!(strict.exec(), Ok(vec!["QUIET".to_string()]));
}

// =============================================================================
// Reader
// =============================================================================

type Configured = ReaderTKind<i32, ResultKind<String>>;

#[rstest]
fn reader_handler_sees_same_environment() {
    let recovered = Configured::catch_error(Configured::throw_error::<i32>(boom()), |_| {
        ReaderT::ask()
    });
    assert_eq!(recovered.run(7), Ok(7));
}

#[rstest]
fn reader_handler_sees_local_environment() {
    let scoped = ReaderT::local(
        |environment: i32| environment * 2,
        Configured::catch_error(Configured::throw_error::<i32>(boom()), |_| ReaderT::ask()),
    );
    assert_eq!(scoped.run(5), Ok(10));
}

#[rstest]
fn reader_asks_projects_environment() {
    let projected: ReaderT<String, ResultKind<String>, usize> = ReaderT::asks(|name: String| name.len());
    assert_eq!(projected.run("lambars".to_string()), Ok(7));
}

// =============================================================================
// Reader / Writer / State
// =============================================================================

type Session = RWSTKind<String, Vec<String>, i32, ResultKind<String>>;
type StrictSession = StrictRWSTKind<String, Vec<String>, i32, ResultKind<String>>;

fn session_fails() -> RWST<String, Vec<String>, i32, ResultKind<String>, String> {
    Session::then(RWST::put(5), || {
        Session::then(RWST::tell(vec!["failed".to_string()]), || {
            Session::throw_error(boom())
        })
    })
}

fn strict_session_fails() -> StrictRWST<String, Vec<String>, i32, ResultKind<String>, String> {
    StrictSession::then(StrictRWST::put(5), || {
        StrictSession::then(StrictRWST::tell(vec!["failed".to_string()]), || {
            StrictSession::throw_error(boom())
        })
    })
}

#[rstest]
fn rws_handler_sees_environment_and_entry_state() {
    let recovered = Session::catch_error(session_fails(), |error: String| {
        Session::flat_map(RWST::ask(), move |environment: String| {
            let error = error.clone();
            Session::flat_map(RWST::get(), move |state: i32| {
                Session::pure(format!("{environment}:{state}:{error}"))
            })
        })
    });
    assert_eq!(
        recovered.run("env".to_string(), 1),
        Ok(("env:1:boom".to_string(), 1, vec![]))
    );
}

#[rstest]
fn strict_rws_handler_sees_throw_point_state_and_output() {
    let recovered = StrictSession::catch_error(strict_session_fails(), |error: String| {
        StrictSession::flat_map(StrictRWST::ask(), move |environment: String| {
            let error = error.clone();
            StrictSession::flat_map(StrictRWST::get(), move |state: i32| {
                StrictSession::pure(format!("{environment}:{state}:{error}"))
            })
        })
    });
    assert_eq!(
        recovered.run("env".to_string(), 1),
        Ok(("env:5:boom".to_string(), 5, vec!["failed".to_string()]))
    );
}

#[rstest]
fn rws_eval_and_exec_split_results() {
    let program = || {
        Session::then(RWST::modify(|state: i32| state + 1), || {
            Session::then(RWST::tell(vec!["bumped".to_string()]), || Session::pure(0))
        })
    };
    assert_eq!(
        program().eval("env".to_string(), 1),
        Ok((0, vec!["bumped".to_string()]))
    );
    assert_eq!(
        program().exec("env".to_string(), 1),
        Ok((2, vec!["bumped".to_string()]))
    );
}

// =============================================================================
// List, Maybe, Identity
// =============================================================================

type Many = ListTKind<ResultKind<String>>;
type Optional = MaybeTKind<ResultKind<String>>;

#[rstest]
fn list_failure_in_any_branch_replaces_whole_list() {
    let failing = Many::flat_map(ListT::from_vec(vec![1, 2, 3]), |value: i32| {
        if value == 2 {
            Many::throw_error(boom())
        } else {
            Many::pure(value * 10)
        }
    });
    let recovered = Many::catch_error(failing, |_| ListT::from_vec(vec![0]));
    assert_eq!(recovered.run(), Ok(vec![0]));
}

#[rstest]
fn list_success_passes_every_branch_through() {
    let branches = Many::flat_map(ListT::from_vec(vec![1, 2]), |value: i32| {
        ListT::from_vec(vec![value, value * 10])
    });
    let kept = Many::catch_error(branches, |_| ListT::from_vec(vec![0]));
    assert_eq!(kept.run(), Ok(vec![1, 10, 2, 20]));
}

#[rstest]
fn maybe_absence_is_not_an_error() {
    let absent = Optional::catch_error(MaybeT::<ResultKind<String>, i32>::nothing(), |_| {
        MaybeT::from_option(Some(1))
    });
    assert_eq!(absent.run(), Ok(None));
}

#[rstest]
fn maybe_handler_receives_error() {
    let recovered = Optional::catch_error(Optional::throw_error::<usize>(boom()), |error: String| {
        MaybeT::from_option(Some(error.len()))
    });
    assert_eq!(recovered.run(), Ok(Some(4)));
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Fault(i32);

#[rstest]
fn identity_over_io_catches_native_failure() {
    type Task = IdentityTKind<IOKind<Fault>>;
    let recovered = Task::catch_error(Task::throw_error::<i32>(Fault(3)), |Fault(code)| {
        IdentityT::new(IO::pure(code * 2))
    });
    assert_eq!(recovered.run().run_unsafe(), 6);
}

// =============================================================================
// ExceptT
// =============================================================================

type Parse = ExceptT<Vec<String>, IdentityKind, i32>;

#[rstest]
fn except_plus_merges_errors_when_both_fail() {
    let both = Parse::fail("not hex").plus(|| Parse::fail("not decimal"));
    assert_eq!(
        both.run(),
        Identity(Err(vec!["not hex".to_string(), "not decimal".to_string()]))
    );
}

#[rstest]
fn except_plus_prefers_first_success() {
    let first = Parse::from_result(Ok(1)).plus(|| Parse::fail("unused"));
    assert_eq!(first.run(), Identity(Ok(1)));
}

#[rstest]
fn except_zero_carries_no_message() {
    assert_eq!(Parse::zero().run(), Identity(Err(Vec::new())));
}

#[rstest]
fn except_modify_error_discharges_into_inner_kind() {
    type Layered = ExceptTKind<String, ResultKind<usize>>;
    let discharged = Layered::throw_error::<i32>(boom()).modify_error(|error| error.len());
    assert_eq!(discharged, Err(4));
}

// =============================================================================
// Deep Stack
// =============================================================================

type Checked = ExceptTKind<String, IdentityKind>;
type Audited = WriterTKind<Vec<String>, Checked>;
type Balance = StateTKind<i32, Audited>;
type Bank = ReaderTKind<i32, Balance>;

type Account<A> = ReaderT<i32, Balance, A>;

fn withdraw(amount: i32) -> Account<i32> {
    Bank::flat_map(ReaderT::ask(), move |limit: i32| {
        if amount > limit {
            Bank::throw_error(format!("{amount} exceeds {limit}"))
        } else {
            Bank::lift(Balance::then(
                StateT::modify(move |balance: i32| balance - amount),
                move || {
                    Balance::then(
                        Balance::lift(WriterT::tell(vec![format!("withdrew {amount}")])),
                        move || Balance::pure(amount),
                    )
                },
            ))
        }
    })
}

fn audit(message: String) -> Account<()> {
    Bank::lift(Balance::lift(WriterT::tell(vec![message])))
}

fn settle(account: Account<i32>) -> Result<((i32, i32), Vec<String>), String> {
    account.run(20).run(100).run().run().into_inner()
}

#[rstest]
fn deep_stack_success_threads_every_layer() {
    assert_eq!(
        settle(withdraw(10)),
        Ok(((10, 90), vec!["withdrew 10".to_string()]))
    );
}

#[rstest]
fn deep_stack_uncaught_error_reaches_base() {
    assert_eq!(settle(withdraw(50)), Err("50 exceeds 20".to_string()));
}

#[rstest]
fn deep_stack_error_from_base_is_caught_at_top() {
    let rejected = Bank::lift(Balance::lift(Audited::lift(ExceptT::fail("frozen"))));
    let recovered = Bank::catch_error(rejected, |error: String| {
        Bank::then(audit(error), || Bank::pure(0))
    });
    assert_eq!(settle(recovered), Ok(((0, 100), vec!["frozen".to_string()])));
}

#[rstest]
fn deep_stack_handler_rolls_back_lazy_layers() {
    let program = Bank::then(withdraw(10), || {
        Bank::catch_error(Bank::then(withdraw(5), || withdraw(50)), |error: String| {
            Bank::then(audit(error), || Bank::pure(0))
        })
    });
    assert_eq!(
        settle(program),
        Ok((
            (0, 90),
            vec!["withdrew 10".to_string(), "50 exceeds 20".to_string()]
        ))
    );
}
