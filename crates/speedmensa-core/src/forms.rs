//! Submit and click guards
//!
//! The browser layer extracts the relevant field values from a form and
//! asks this module whether the submission may proceed. Confirmation
//! prompts go through the [`Confirm`] trait so the verdicts can be
//! tested without a window.

/// A blocking yes/no prompt.
///
/// Implementations must not return until the user has answered.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Field values of a form at submit time
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitFields<'a> {
    /// Value of `input[name="password"]`, if the form has one
    pub password: Option<&'a str>,
    /// Value of `input[name="password2"]`, if the form has one
    pub password_confirm: Option<&'a str>,
    /// Text of the form's `data-confirm` attribute
    pub confirm_message: Option<&'a str>,
}

/// Outcome of the submit guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitVerdict {
    /// Both password fields exist and differ
    pub password_mismatch: bool,
    /// The user answered "no" to the form's confirmation prompt
    pub declined: bool,
}

impl SubmitVerdict {
    pub fn allows_submit(&self) -> bool {
        !self.password_mismatch && !self.declined
    }
}

/// Exact string comparison, no trimming or normalization
pub fn passwords_match(password: &str, confirm: &str) -> bool {
    password == confirm
}

/// Run both submit checks.
///
/// The checks are independent: a mismatch does not suppress the
/// confirmation prompt.
pub fn evaluate_submit<C: Confirm + ?Sized>(
    fields: &SubmitFields<'_>,
    confirmer: &C,
) -> SubmitVerdict {
    let password_mismatch = match (fields.password, fields.password_confirm) {
        (Some(password), Some(confirm)) => !passwords_match(password, confirm),
        _ => false,
    };

    let declined = match fields.confirm_message {
        Some(message) if !message.is_empty() => !confirmer.confirm(message),
        _ => false,
    };

    SubmitVerdict {
        password_mismatch,
        declined,
    }
}

/// Whether a click on a `data-confirm-click` element keeps its default action
pub fn click_allowed<C: Confirm + ?Sized>(message: &str, confirmer: &C) -> bool {
    confirmer.confirm(message)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a form with both password fields submits iff they are equal
        #[test]
        fn submit_iff_passwords_equal(a in ".{0,16}", b in ".{0,16}") {
            let fields = SubmitFields {
                password: Some(a.as_str()),
                password_confirm: Some(b.as_str()),
                confirm_message: None,
            };
            let verdict = evaluate_submit(&fields, &|_: &str| true);
            prop_assert_eq!(verdict.allows_submit(), a == b);
        }

        /// Property: a confirmation click is cancelled iff the answer is negative
        #[test]
        fn click_cancelled_iff_declined(message in ".{1,32}", answer in any::<bool>()) {
            prop_assert_eq!(click_allowed(&message, &move |_: &str| answer), answer);
        }
    }
}
