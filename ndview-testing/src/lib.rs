//! Tools to run table-driven tests.

use std::fmt::Debug;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Run a test function over a collection of cases, reporting all of the
/// failures at the end.
///
/// This differs from running the function in a plain loop in that a failing
/// case does not prevent the remaining cases from running, and every
/// failing case is named in the output.
///
/// ```
/// use ndview_testing::TestCases;
///
/// #[derive(Debug)]
/// struct Case {
///     input: i32,
///     expected: i32,
/// }
///
/// let cases = [
///     Case { input: 1, expected: 2 },
///     Case { input: 3, expected: 6 },
/// ];
///
/// cases.test_each(|case| {
///     assert_eq!(case.input * 2, case.expected);
/// })
/// ```
pub trait TestCases {
    type Case;

    /// Run `test` on a reference to each case in turn, then panic if any
    /// case failed.
    fn test_each(self, test: impl Fn(&Self::Case))
    where
        Self::Case: Debug;

    /// Variant of [`test_each`](TestCases::test_each) which passes cases to
    /// the test function by value.
    fn test_each_value(self, test: impl Fn(Self::Case))
    where
        Self::Case: Debug;
}

impl<I: IntoIterator> TestCases for I {
    type Case = I::Item;

    fn test_each(self, test: impl Fn(&Self::Case))
    where
        Self::Case: Debug,
    {
        let mut failures = Vec::new();
        for case in self {
            // Cases do not need to be unwind safe here: a failure fails the
            // whole test, so no state is reused after a panic.
            let result = catch_unwind(AssertUnwindSafe(|| test(&case)));
            if result.is_err() {
                failures.push(format!("{:?}", case));
            }
        }
        report_failures(failures);
    }

    fn test_each_value(self, test: impl Fn(Self::Case))
    where
        Self::Case: Debug,
    {
        let mut failures = Vec::new();
        for case in self {
            let desc = format!("{:?}", case);
            let result = catch_unwind(AssertUnwindSafe(|| test(case)));
            if result.is_err() {
                failures.push(desc);
            }
        }
        report_failures(failures);
    }
}

fn report_failures(failures: Vec<String>) {
    if !failures.is_empty() {
        panic!("{} test cases failed: {:?}", failures.len(), failures);
    }
}
