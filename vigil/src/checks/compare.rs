use crate::checks::numeric::parse_integer;
use crate::checks::pattern;
use crate::checks::placeholder::FUNCTION_SUFFIX;

const PATTERN_PREFIX: &str = "pat(";
const ANY_PREFIX: &str = "any(";

/// Functions that decide how the two sides of an equality compare rather than what a
/// side resolves to. They are only recognised in their resolved form, once both operands
/// are plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LeafFunction {
    /// `pat(glob)`
    Pattern,
    /// `any(a, b, c)`
    Any,
}

impl LeafFunction {
    fn prefix(self) -> &'static str {
        match self {
            LeafFunction::Pattern => PATTERN_PREFIX,
            LeafFunction::Any => ANY_PREFIX,
        }
    }

    /// The argument text when `operand` is a call to this function.
    pub(crate) fn argument(self, operand: &str) -> Option<&str> {
        operand
            .strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_suffix(FUNCTION_SUFFIX))
    }

    fn holds(self, argument: &str, other: &str) -> bool {
        match self {
            LeafFunction::Pattern => pattern::matches(argument, other),
            LeafFunction::Any => argument.split(',').any(|option| option.trim() == other),
        }
    }

    /// Applies the function when exactly one side is a call to it.
    fn compare(self, first: &str, second: &str) -> Option<bool> {
        match (self.argument(first), self.argument(second)) {
            (Some(argument), None) => Some(self.holds(argument, second)),
            (None, Some(argument)) => Some(self.holds(argument, first)),
            _ => None,
        }
    }
}

/// Equality of two resolved operands.
///
/// `pat(...)` is tried first, then `any(...)`; either applies only when exactly one side is
/// the call. Two integers compare by value in any base, so `1 == 0x1`. Everything else is
/// an exact string comparison.
pub(crate) fn is_equal(first: &str, second: &str) -> bool {
    if first.ends_with(FUNCTION_SUFFIX) || second.ends_with(FUNCTION_SUFFIX) {
        for function in [LeafFunction::Pattern, LeafFunction::Any].iter() {
            if let Some(equal) = function.compare(first, second) {
                return equal;
            }
        }
    }
    match (parse_integer(first), parse_integer(second)) {
        (Some(first), Some(second)) => first == second,
        _ => first == second,
    }
}
