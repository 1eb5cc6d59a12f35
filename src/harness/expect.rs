//! Expectation matchers.
//!
//! Each matcher returns `Result<(), Failure>` so a step can bail out with `?`
//! on the first unmet expectation:
//!
//! ```ignore
//! expect(page.body_class()).to_be("menu-hidden")?;
//! expect(page.entry_count()).to_be_greater_than(0)?;
//! let feeds = expect(app.feeds()).to_be_defined()?;
//! expect(feeds.len()).not().to_be(0)?;
//! ```

use std::fmt::Debug;

use super::failure::Failure;

/// Start an expectation about `actual`.
pub fn expect<T>(actual: T) -> Expectation<T> {
    Expectation { actual }
}

/// Positive expectation.
#[derive(Debug)]
pub struct Expectation<T> {
    actual: T,
}

/// Negated expectation, created by [`Expectation::not`].
#[derive(Debug)]
pub struct Not<T> {
    actual: T,
}

fn mismatch(actual: &dyn Debug, negated: bool, matcher: &str, expected: &dyn Debug) -> Failure {
    let not = if negated { "not " } else { "" };
    Failure::mismatch(
        format!("Expected {actual:?} {not}{matcher} {expected:?}."),
        format!("{expected:?}"),
        format!("{actual:?}"),
    )
}

impl<T: Debug> Expectation<T> {
    pub fn not(self) -> Not<T> {
        Not {
            actual: self.actual,
        }
    }

    /// Equality check.
    pub fn to_be<U>(self, expected: U) -> Result<(), Failure>
    where
        T: PartialEq<U>,
        U: Debug,
    {
        if self.actual == expected {
            Ok(())
        } else {
            Err(mismatch(&self.actual, false, "to be", &expected))
        }
    }

    /// Alias of [`to_be`](Self::to_be) for structured values.
    pub fn to_equal<U>(self, expected: U) -> Result<(), Failure>
    where
        T: PartialEq<U>,
        U: Debug,
    {
        if self.actual == expected {
            Ok(())
        } else {
            Err(mismatch(&self.actual, false, "to equal", &expected))
        }
    }

    pub fn to_be_greater_than(self, bound: T) -> Result<(), Failure>
    where
        T: PartialOrd,
    {
        if self.actual > bound {
            Ok(())
        } else {
            Err(mismatch(&self.actual, false, "to be greater than", &bound))
        }
    }
}

impl<T: AsRef<str> + Debug> Expectation<T> {
    pub fn to_be_empty(self) -> Result<(), Failure> {
        if self.actual.as_ref().is_empty() {
            Ok(())
        } else {
            Err(mismatch(&self.actual, false, "to be", &""))
        }
    }
}

impl<T: Debug> Expectation<Option<T>> {
    /// Passes for `Some`, handing back the inner value.
    pub fn to_be_defined(self) -> Result<T, Failure> {
        self.actual.ok_or_else(|| {
            Failure::mismatch("Expected undefined to be defined.", "defined", "undefined")
        })
    }

    pub fn to_be_undefined(self) -> Result<(), Failure> {
        match self.actual {
            None => Ok(()),
            Some(value) => Err(Failure::mismatch(
                format!("Expected {value:?} to be undefined."),
                "undefined",
                format!("{value:?}"),
            )),
        }
    }
}

impl<T: Debug> Not<T> {
    pub fn to_be<U>(self, expected: U) -> Result<(), Failure>
    where
        T: PartialEq<U>,
        U: Debug,
    {
        if self.actual == expected {
            Err(mismatch(&self.actual, true, "to be", &expected))
        } else {
            Ok(())
        }
    }

    pub fn to_equal<U>(self, expected: U) -> Result<(), Failure>
    where
        T: PartialEq<U>,
        U: Debug,
    {
        if self.actual == expected {
            Err(mismatch(&self.actual, true, "to equal", &expected))
        } else {
            Ok(())
        }
    }
}

impl<T: AsRef<str> + Debug> Not<T> {
    pub fn to_be_empty(self) -> Result<(), Failure> {
        if self.actual.as_ref().is_empty() {
            Err(mismatch(&self.actual, true, "to be", &""))
        } else {
            Ok(())
        }
    }
}
