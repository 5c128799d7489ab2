#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;

use pretty_assertions::assert_eq;
use crate::value::ValueType;

fn eval(left: impl Into<Value>, right: impl Into<Value>, op: BinaryOp) -> ValueResult {
    evaluate_binary(&left.into(), &right.into(), op)
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers() {
        assert_eq!(eval(2, 3, BinaryOp::Add).unwrap(), Value::from(5));
        assert_eq!(eval(2, 3, BinaryOp::Sub).unwrap(), Value::from(-1));
        assert_eq!(eval(6, 7, BinaryOp::Mul).unwrap(), Value::from(42));
        assert_eq!(eval(7, 2, BinaryOp::Div).unwrap(), Value::from(3.5));
        assert_eq!(eval(7, 2, BinaryOp::Mod).unwrap(), Value::from(1));
        assert_eq!(eval(3, 4, BinaryOp::Pow).unwrap(), Value::from(81));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval(1, 0, BinaryOp::Div), Err(ValueError::DivisionByZero));
        assert_eq!(eval(1, 0, BinaryOp::Mod), Err(ValueError::ModuloByZero));
        assert_eq!(Value::from(1) / 0, Value::ZERO);
        assert_eq!(Value::from(1) % 0, Value::ZERO);
    }

    #[test]
    fn non_numbers_mismatch() {
        assert_eq!(
            eval(Value::Null, 1, BinaryOp::Mul),
            Err(ValueError::TypeMismatch {
                op: BinaryOp::Mul,
                left: ValueType::Null,
                right: ValueType::Number,
            })
        );
        assert_eq!(Value::from("6") / 2, Value::ZERO);
        assert_eq!(Value::True + 1, Value::ZERO);
    }

    #[test]
    fn custom_policy_is_honored() {
        let policy = NumericPolicy::DEFAULT.with_division_scale(3);
        let result =
            evaluate_binary_with(&Value::from(1), &Value::from(7), BinaryOp::Div, &policy)
                .unwrap();
        assert_eq!(result.to_string(), "0.143");
    }
}

mod text {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plus_concatenates_display_forms() {
        assert_eq!(Value::from(10) + "Hello", Value::from("10Hello"));
        assert_eq!(Value::from("a") + Value::Null, Value::from("anull"));
        assert_eq!(Value::from("x") + 1.5, Value::from("x1.5"));
    }

    #[test]
    fn minus_removes_first_occurrence() {
        assert_eq!(Value::from("abcabc") - "bc", Value::from("aabc"));
        assert_eq!(Value::from("abc") - "z", Value::from("abc"));
        assert_eq!(Value::from(1234) - Value::from("23"), Value::from("14"));
    }

    #[test]
    fn times_repeats() {
        assert_eq!(Value::from("ab") * 3, Value::from("ababab"));
        assert_eq!(Value::from(2) * "ab", Value::from("abab"));
        assert_eq!(Value::from("ab") * 0, Value::from(""));
        assert_eq!(Value::from("ab") * -2, Value::from(""));
        assert_eq!(Value::from("ab") * 1.5, Value::from(""));
    }

    #[test]
    fn huge_repeat_is_an_error() {
        assert_eq!(
            eval("ab", i64::MAX, BinaryOp::Mul),
            Err(ValueError::RepeatTooLarge { count: i64::MAX })
        );
        assert_eq!(
            eval("ab", 1e15, BinaryOp::Mul),
            Err(ValueError::RepeatTooLarge {
                count: 1_000_000_000_000_000
            })
        );
        assert_eq!(Value::from("ab") * 1e15, Value::ZERO);
        assert_eq!(Value::from(1e15) * "ab", Value::ZERO);
    }

    #[test]
    fn repeat_limit_follows_policy() {
        let policy = NumericPolicy::DEFAULT.with_max_text_len(6);
        let repeat = |count: i32| {
            evaluate_binary_with(&Value::from("ab"), &Value::from(count), BinaryOp::Mul, &policy)
        };
        assert_eq!(repeat(3).unwrap(), Value::from("ababab"));
        assert_eq!(repeat(4), Err(ValueError::RepeatTooLarge { count: 4 }));
    }

    #[test]
    fn empty_text_repeats_to_empty() {
        assert_eq!(eval("", 1e15, BinaryOp::Mul).unwrap(), Value::from(""));
    }

    #[test]
    fn text_times_text_mismatches() {
        assert!(matches!(
            eval("a", "b", BinaryOp::Mul),
            Err(ValueError::TypeMismatch { .. })
        ));
    }
}

mod comparison {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_and_text() {
        assert_eq!(eval(1, 2, BinaryOp::Lt).unwrap(), Value::True);
        assert_eq!(eval(2, 2, BinaryOp::LtEq).unwrap(), Value::True);
        assert_eq!(eval("b", "a", BinaryOp::Gt).unwrap(), Value::True);
        assert_eq!(eval("a", "a", BinaryOp::GtEq).unwrap(), Value::True);
        assert_eq!(eval(1, 1.0, BinaryOp::Eq).unwrap(), Value::True);
        assert_eq!(eval(1, "1", BinaryOp::NotEq).unwrap(), Value::True);
    }

    #[test]
    fn incomparable_operands_are_never_ordered() {
        for op in [BinaryOp::Lt, BinaryOp::LtEq, BinaryOp::Gt, BinaryOp::GtEq] {
            assert_eq!(eval(1, "1", op).unwrap(), Value::False);
            assert_eq!(
                eval(Value::empty_map(), Value::empty_array(), op).unwrap(),
                Value::False
            );
        }
    }
}

mod bitwise {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integer_view() {
        assert_eq!(Value::from(12) & 10, Value::from(8));
        assert_eq!(Value::from(12) | 3, Value::from(15));
        assert_eq!(Value::from(6) ^ 3, Value::from(5));
        assert_eq!(Value::from(1) << 4, Value::from(16));
        assert_eq!(Value::from(-16) >> 2, Value::from(-4));
        assert_eq!(Value::from(7.9) & 7, Value::from(7));
    }

    #[test]
    fn wide_results_become_big() {
        let wide = eval(1, 62, BinaryOp::Shl).unwrap();
        assert_eq!(wide.value_type(), ValueType::BigNumber);
        assert_eq!(wide.to_string(), "4611686018427387904");
    }

    #[test]
    fn shift_range_is_checked() {
        assert_eq!(
            eval(1, 64, BinaryOp::Shl),
            Err(ValueError::ShiftOutOfRange { amount: 64 })
        );
        assert_eq!(
            eval(1, -1, BinaryOp::Shr),
            Err(ValueError::ShiftOutOfRange { amount: -1 })
        );
    }

    #[test]
    fn non_numbers_mismatch() {
        assert!(eval("3", 1, BinaryOp::BitAnd).is_err());
    }
}

mod assignment {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_append_reuses_unique_buffer() {
        let mut v = Value::from("Hello");
        v += " World";
        assert_eq!(v, Value::from("Hello World"));
    }

    #[test]
    fn compound_assignment_leaves_copies_alone() {
        let original = Value::from("Hello");
        let mut copy = original.clone();
        copy += "!";
        assert_eq!(original, Value::from("Hello"));
        assert_eq!(copy, Value::from("Hello!"));
    }

    #[test]
    fn numeric_compound_assignment() {
        let mut v = Value::from(10);
        v -= 4;
        v *= 2;
        v /= 3;
        v %= 3;
        assert_eq!(v, Value::from(1));
        v <<= 3;
        v |= 1;
        assert_eq!(v, Value::from(9));
    }

    #[test]
    fn failed_assignment_becomes_zero() {
        let mut v = Value::from(5);
        v /= 0;
        assert_eq!(v, Value::ZERO);
    }

    #[test]
    fn checked_assignment_reports_errors() {
        let mut v = Value::from(5);
        assert_eq!(
            assign_binary(&mut v, &Value::ZERO, BinaryOp::Mod),
            Err(ValueError::ModuloByZero)
        );
        assert_eq!(v, Value::from(5));
    }
}

mod stepping {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn increment_and_decrement() {
        let mut v = Value::from(41);
        v.increment();
        assert_eq!(v, Value::from(42));
        v.decrement();
        v.decrement();
        assert_eq!(v, Value::from(40));
    }

    #[test]
    fn non_numbers_are_left_alone() {
        let mut v = Value::from("7");
        v.increment();
        assert_eq!(v, Value::from("7"));
    }
}

#[test]
fn pow_helpers() {
    assert_eq!(Value::from(2).pow(8), Value::from(256));
    assert_eq!(Value::from("x").pow(2), Value::ZERO);
    assert!(Value::from(0).checked_pow(&Value::from(-1)).is_err());
}

#[test]
fn reference_operands() {
    let a = Value::from(3);
    let b = Value::from(4);
    assert_eq!(&a + &b, Value::from(7));
    assert_eq!(&a * &b, Value::from(12));
    assert_eq!(a - &b, Value::from(-1));
}
