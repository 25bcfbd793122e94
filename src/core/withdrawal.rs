use super::types::{PhaseThresholds, WithdrawalStrategy};

/// One withdrawal split into principal, gain and tax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithdrawalSplit {
    pub gross: f64,
    pub capital_portion: f64,
    pub gain_portion: f64,
    pub tax: f64,
    pub net: f64,
}

/// Fraction of `balance` treated as already-taxed principal.
pub fn cost_ratio(cumulative_contributions: f64, balance: f64) -> f64 {
    if balance > 0.0 {
        (cumulative_contributions / balance).min(1.0)
    } else {
        1.0
    }
}

/// Gross amount to draw so that, after tax on the gain portion only, exactly
/// `desired_net` is left. Requires `tax_rate < 1`.
pub fn gross_up(desired_net: f64, cost_ratio: f64, tax_rate: f64) -> WithdrawalSplit {
    let gross = desired_net / (1.0 - tax_rate * (1.0 - cost_ratio));
    let capital_portion = gross * cost_ratio;
    let gain_portion = gross - capital_portion;
    let tax = gain_portion * tax_rate;
    WithdrawalSplit {
        gross,
        capital_portion,
        gain_portion,
        tax,
        net: gross - tax,
    }
}

/// Annual net amount the investor wants from `balance` this year.
pub fn desired_annual_net(
    strategy: WithdrawalStrategy,
    target_net: f64,
    balance: f64,
    thresholds: &PhaseThresholds,
) -> f64 {
    match strategy {
        WithdrawalStrategy::FixedNetAmount => {
            if balance >= thresholds.upper_balance {
                target_net * 2.0
            } else {
                target_net
            }
        }
        WithdrawalStrategy::PercentOfBalance { rate } => rate * balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn thresholds() -> PhaseThresholds {
        PhaseThresholds {
            target_balance: 400_000.0,
            min_balance: 300_000.0,
            upper_balance: 600_000.0,
        }
    }

    #[test]
    fn cost_ratio_caps_at_one_and_defaults_for_empty_balance() {
        assert_approx(cost_ratio(50_000.0, 100_000.0), 0.5);
        assert_approx(cost_ratio(150_000.0, 100_000.0), 1.0);
        assert_approx(cost_ratio(10.0, 0.0), 1.0);
        assert_approx(cost_ratio(10.0, -500.0), 1.0);
    }

    #[test]
    fn oracle_percent_of_balance_gross_up_matches_hand_calculation() {
        let desired = desired_annual_net(
            WithdrawalStrategy::PercentOfBalance { rate: 0.04 },
            0.0,
            100_000.0,
            &thresholds(),
        );
        assert_approx(desired, 4_000.0);

        // 4000 / (1 - 0.198 * 0.5) = 4000 / 0.901
        let split = gross_up(desired, 0.5, 0.198);
        assert_approx(split.gross, 4_000.0 / 0.901);
        assert!((split.gross - 4_439.51).abs() < 0.01);
        assert_approx(split.net, 4_000.0);
        assert_approx(split.capital_portion + split.gain_portion, split.gross);
    }

    #[test]
    fn all_principal_withdrawal_pays_no_tax() {
        let split = gross_up(20_000.0, 1.0, 0.198);
        assert_approx(split.gross, 20_000.0);
        assert_approx(split.net, 20_000.0);
        assert_approx(split.tax, 0.0);
    }

    #[test]
    fn fixed_amount_doubles_at_upper_balance() {
        let t = thresholds();
        let strategy = WithdrawalStrategy::FixedNetAmount;
        assert_approx(desired_annual_net(strategy, 20_000.0, 599_999.0, &t), 20_000.0);
        assert_approx(desired_annual_net(strategy, 20_000.0, 600_000.0, &t), 40_000.0);
    }

    #[test]
    fn percent_of_balance_ignores_upper_balance() {
        let strategy = WithdrawalStrategy::PercentOfBalance { rate: 0.04 };
        assert_approx(
            desired_annual_net(strategy, 20_000.0, 1_000_000.0, &thresholds()),
            40_000.0,
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_gross_up_round_trips_to_desired_net(
            desired_cents in 1u64..100_000_000,
            cost_ratio_bp in 0u32..=10_000,
            tax_rate_bp in 0u32..9_900
        ) {
            let desired = desired_cents as f64 / 100.0;
            let ratio = cost_ratio_bp as f64 / 10_000.0;
            let tax_rate = tax_rate_bp as f64 / 10_000.0;

            let split = gross_up(desired, ratio, tax_rate);
            let tolerance = 1e-9 * desired.max(1.0);
            prop_assert!((split.net - desired).abs() <= tolerance);
            prop_assert!(split.gross + 1e-9 >= desired);
            prop_assert!(split.tax >= -1e-9);
        }
    }
}
