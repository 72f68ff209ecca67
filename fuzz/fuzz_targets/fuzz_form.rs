//! Fuzz target for the form state machine.
//!
//! Replays arbitrary edits and submits against a form.

#![no_main]

use arbitrary::Arbitrary;
use card_vault::{form::CardForm, CardField};
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Action {
    Input(u8, String),
    Submit(Option<String>),
    Reset,
}

fuzz_target!(|actions: Vec<Action>| {
    let Some(now) = NaiveDate::from_ymd_opt(2025, 1, 15) else {
        return;
    };
    let mut form = CardForm::new();

    for action in actions {
        match action {
            Action::Input(idx, raw) => {
                let field = CardField::ALL[idx as usize % CardField::ALL.len()];
                form.input(field, &raw);
                assert!(form.report().error(field).is_none());
            }
            Action::Submit(email) => {
                if form.submit(email.as_deref(), &now).is_ok() {
                    assert!(form.record().is_empty());
                }
            }
            Action::Reset => form.reset(),
        }
        let _ = form.preview();
    }
});
