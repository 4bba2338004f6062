//! qeval-ffi: flat C-linkage surface over one process-wide question store.
//!
//! Every entry point takes and returns plain integers. The store sits behind
//! a mutex so callers on different threads see the same questions;
//! `reset_questions` returns it to the empty state.

use std::os::raw::c_int;
use std::sync::{Mutex, MutexGuard, PoisonError};

use qeval_core::QuestionStore;

static STORE: Mutex<QuestionStore> = Mutex::new(QuestionStore::new());

// Store mutations are single pushes/pops; a poisoned lock is reused as is.
fn store() -> MutexGuard<'static, QuestionStore> {
    STORE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Add a question with the given marks and difficulty.
#[no_mangle]
pub extern "C" fn add_question(marks: c_int, difficulty: c_int) {
    store().add_question(marks, difficulty);
}

/// Sum of marks over every added question; 0 when empty.
#[no_mangle]
pub extern "C" fn get_total_marks() -> c_int {
    store().total_marks()
}

/// Truncated mean difficulty; 0 when empty.
#[no_mangle]
pub extern "C" fn get_average_difficulty() -> c_int {
    store().average_difficulty()
}

/// Marks of the highest-difficulty question; 0 when empty.
#[no_mangle]
pub extern "C" fn get_top_question_marks() -> c_int {
    store().top_question_marks()
}

/// Drop the most recent question from the undo history.
///
/// Aggregate queries are unaffected.
#[no_mangle]
pub extern "C" fn undo_last_question() {
    store().undo_last_question();
}

/// Empty the store.
#[no_mangle]
pub extern "C" fn reset_questions() {
    let mut guard = store();
    tracing::debug!(discarded = guard.len(), "resetting question store");
    *guard = QuestionStore::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The store is process-wide; serialize the tests that touch it.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    fn fresh() -> MutexGuard<'static, ()> {
        let guard = TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        reset_questions();
        guard
    }

    #[test]
    fn empty_store_returns_zero() {
        let _guard = fresh();
        assert_eq!(get_total_marks(), 0);
        assert_eq!(get_average_difficulty(), 0);
        assert_eq!(get_top_question_marks(), 0);
        undo_last_question();
        assert_eq!(get_total_marks(), 0);
    }

    #[test]
    fn scenario_with_undo() {
        let _guard = fresh();
        add_question(5, 1);
        add_question(8, 3);
        add_question(3, 2);
        assert_eq!(get_total_marks(), 16);
        assert_eq!(get_average_difficulty(), 2);
        assert_eq!(get_top_question_marks(), 8);

        undo_last_question();
        assert_eq!(get_total_marks(), 16);
        assert_eq!(get_average_difficulty(), 2);
        assert_eq!(get_top_question_marks(), 8);
    }

    #[test]
    fn reset_clears_everything() {
        let _guard = fresh();
        add_question(10, 3);
        assert_eq!(get_total_marks(), 10);
        reset_questions();
        assert_eq!(get_total_marks(), 0);
        assert_eq!(get_top_question_marks(), 0);
    }

    #[test]
    fn shared_across_threads() {
        let _guard = fresh();
        let handles: Vec<_> = (1..=4)
            .map(|i| std::thread::spawn(move || add_question(i, i % 3 + 1)))
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(get_total_marks(), 10);
    }
}
