#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use timetable_export::models::RawTimetableSet;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the process
/// environment, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// A generation result with every category, an unrecognized table, days out
/// of order and an unknown day.
pub const SAMPLE_DATASET: &str = r#"{
    "TT-Sem-sem3_cse": {
        "Day": ["9-10", "10-11", "11-12"],
        "Wednesday": ["DS-LEC", "", "Lunch"],
        "Monday": ["OS-LEC", "CN-LAB", "lunch"],
        "Saturday": ["Seminar", "0", ""],
        "Tuesday": [" Math-LEC ", "0", "Lunch"]
    },
    "TT-Inst-JSmith": {
        "Day": ["9-10", "10-11", "11-12"],
        "Friday": ["OS-LEC", "", ""],
        "Monday": ["", "CN-LAB", "Office hours, room 4"]
    },
    "Summary": {
        "Day": ["total"],
        "Monday": [42]
    },
    "TT-Lab-L1": {
        "Day": ["9-10", "10-11", "11-12"],
        "Monday": ["", "CN-LAB", ""]
    },
    "TT-Sem-sem1_it": {
        "Day": ["9-10", "10-11", "11-12"],
        "Thursday": ["Physics-LEC", "Chem-LAB", "Lunch"]
    }
}"#;

pub fn sample_dataset() -> RawTimetableSet {
    RawTimetableSet::from_json_str(SAMPLE_DATASET).expect("sample dataset parses")
}
