#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;

use pretty_assertions::assert_eq;
use crate::value::ValueType;

fn run(op: Arith, a: f64, b: f64) -> Value {
    arith(op, Num::Small(a), Num::Small(b), &NumericPolicy::DEFAULT).unwrap()
}

mod digit_span {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integers() {
        assert_eq!(DigitSpan::of(123.0), Some(DigitSpan { high: 3, low: 0 }));
        assert_eq!(DigitSpan::of(1200.0), Some(DigitSpan { high: 4, low: 2 }));
        assert_eq!(DigitSpan::of(-7.0).unwrap().significant(), 1);
        assert_eq!(DigitSpan::of(1e20).unwrap().significant(), 1);
    }

    #[test]
    fn fractions() {
        assert_eq!(DigitSpan::of(123.45), Some(DigitSpan { high: 3, low: -2 }));
        assert_eq!(DigitSpan::of(0.05), Some(DigitSpan { high: -1, low: -2 }));
        assert_eq!(DigitSpan::of(0.5).unwrap().significant(), 1);
    }

    #[test]
    fn zero_and_non_finite_have_no_span() {
        assert_eq!(DigitSpan::of(0.0), None);
        assert_eq!(DigitSpan::of(f64::NAN), None);
        assert_eq!(DigitSpan::of(f64::INFINITY), None);
    }
}

mod fast_path {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn small_results_stay_numbers() {
        assert_eq!(run(Arith::Add, 2.0, 3.0).value_type(), ValueType::Number);
        assert_eq!(run(Arith::Div, 10.0, 4.0).as_f64(), Some(2.5));
        assert_eq!(run(Arith::Pow, 2.0, 10.0).as_f64(), Some(1024.0));
        assert_eq!(run(Arith::Rem, 7.0, 3.0).as_f64(), Some(1.0));
    }

    #[test]
    fn fractional_exponent_uses_powf() {
        assert_eq!(run(Arith::Pow, 4.0, 0.5).as_f64(), Some(2.0));
        assert_eq!(run(Arith::Pow, 2.0, 0.5).value_type(), ValueType::Number);
    }

    #[test]
    fn zero_divisors_are_errors() {
        let policy = NumericPolicy::DEFAULT;
        assert_eq!(
            arith(Arith::Div, Num::Small(1.0), Num::Small(0.0), &policy),
            Err(ValueError::DivisionByZero)
        );
        assert_eq!(
            arith(Arith::Rem, Num::Small(1.0), Num::Small(0.0), &policy),
            Err(ValueError::ModuloByZero)
        );
    }
}

mod promotion {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inexact_sum_is_recomputed_exactly() {
        let sum = run(Arith::Add, 0.1, 0.2);
        assert_eq!(sum.value_type(), ValueType::BigNumber);
        assert_eq!(sum.to_string(), "0.3");
    }

    #[test]
    fn wide_product_is_exact() {
        let product = run(Arith::Mul, 123_456_789.0, 987_654_321.0);
        assert_eq!(product.value_type(), ValueType::BigNumber);
        assert_eq!(product.to_string(), "121932631112635269");
    }

    #[test]
    fn long_division_keeps_policy_scale() {
        let third = run(Arith::Div, 1.0, 3.0);
        assert_eq!(third.to_string(), format!("0.{}", "3".repeat(32)));

        let policy = NumericPolicy::DEFAULT.with_division_scale(5);
        let short = arith(Arith::Div, Num::Small(2.0), Num::Small(3.0), &policy).unwrap();
        assert_eq!(short.to_string(), "0.66667");
    }

    #[test]
    fn large_powers_are_exact() {
        assert_eq!(
            run(Arith::Pow, 2.0, 64.0).to_string(),
            "18446744073709551616"
        );
        assert_eq!(
            arith(
                Arith::Pow,
                Num::Small(0.0),
                Num::Small(-1.0),
                &NumericPolicy::DEFAULT
            ),
            Err(ValueError::DivisionByZero)
        );
    }

    #[test]
    fn big_operand_keeps_result_big() {
        let two = BigNumber::from(2i64);
        let result = arith(
            Arith::Add,
            Num::Big(&two),
            Num::Small(1.0),
            &NumericPolicy::DEFAULT,
        )
        .unwrap();
        assert_eq!(result.value_type(), ValueType::BigNumber);
        assert_eq!(result.to_string(), "3");
    }

    #[test]
    fn non_finite_operand_against_big_stays_on_f64() {
        let policy = NumericPolicy::DEFAULT;
        let big = BigNumber::from(2i64);
        let sum = arith(Arith::Add, Num::Small(f64::INFINITY), Num::Big(&big), &policy).unwrap();
        assert_eq!(sum.as_f64(), Some(f64::INFINITY));
        let diff = arith(Arith::Sub, Num::Big(&big), Num::Small(f64::INFINITY), &policy).unwrap();
        assert_eq!(diff.as_f64(), Some(f64::NEG_INFINITY));
        let product = arith(Arith::Mul, Num::Small(f64::NAN), Num::Big(&big), &policy).unwrap();
        assert!(product.as_f64().is_some_and(f64::is_nan));
        assert_eq!(
            arith(Arith::Div, Num::Small(f64::INFINITY), Num::Big(&BigNumber::zero()), &policy),
            Err(ValueError::DivisionByZero)
        );
    }

    #[test]
    fn non_finite_operands_are_not_promoted() {
        let sum = run(Arith::Add, f64::INFINITY, 1.0);
        assert_eq!(sum.as_f64(), Some(f64::INFINITY));
    }

    #[test]
    fn huge_exponent_is_rejected() {
        let policy = NumericPolicy::DEFAULT;
        assert!(matches!(
            arith(Arith::Pow, Num::Small(2.0), Num::Small(1e6), &policy),
            Err(ValueError::ExponentTooLarge { .. })
        ));
        assert_eq!(run(Arith::Pow, 1.0, 1e6).as_f64(), Some(1.0));
    }
}

mod ordering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn compares_across_representations() {
        let big = BigNumber::from(10i64);
        assert_eq!(
            compare(Num::Small(10.0), Num::Big(&big)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            compare(Num::Small(f64::INFINITY), Num::Big(&big)),
            Some(Ordering::Greater)
        );
        assert_eq!(compare(Num::Big(&big), Num::Small(f64::NAN)), None);
    }

    #[test]
    fn total_order_puts_nan_last() {
        assert_eq!(
            total_cmp(Num::Small(f64::NAN), Num::Small(1.0)),
            Ordering::Greater
        );
        assert_eq!(
            total_cmp(Num::Small(f64::NAN), Num::Small(f64::NAN)),
            Ordering::Equal
        );
        assert_eq!(total_cmp(Num::Small(-1.0), Num::Small(1.0)), Ordering::Less);
    }
}

#[test]
fn exact_text_picks_representation() {
    let policy = NumericPolicy::DEFAULT;
    let small = from_exact("12.5".parse().unwrap(), &policy);
    assert_eq!(small.as_f64(), Some(12.5));

    let long = from_exact("123456789012345678".parse().unwrap(), &policy);
    assert_eq!(long.value_type(), ValueType::BigNumber);

    let tiny = from_exact("1e-400".parse().unwrap(), &policy);
    assert_eq!(tiny.value_type(), ValueType::BigNumber);
}
