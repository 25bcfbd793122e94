use super::types::{ContributionPlan, ContributionTiming, StepSchedule};

/// Nominal monthly contribution for `year` (1-based) after the step rule and
/// its bound. Never negative.
pub fn stepped_monthly_contribution(plan: &ContributionPlan, year: u32) -> f64 {
    let interval = plan.step.interval_years().max(1);
    let steps = f64::from(year.saturating_sub(1) / interval);

    let stepped = match plan.step {
        StepSchedule::StepDown { amount, floor, .. } => {
            (plan.base_monthly - steps * amount).max(floor)
        }
        StepSchedule::StepUp {
            amount, ceiling, ..
        } => {
            let raised = plan.base_monthly + steps * amount;
            match ceiling {
                Some(ceiling) => raised.min(ceiling),
                None => raised,
            }
        }
    };
    stepped.max(0.0)
}

fn growth_multiplier(plan: &ContributionPlan, year: u32) -> f64 {
    (1.0 + plan.growth_rate).powi(year.saturating_sub(1) as i32)
}

/// Contribution due for the whole of `year` in annual-step runs.
pub fn annual_contribution(plan: &ContributionPlan, year: u32) -> f64 {
    stepped_monthly_contribution(plan, year) * plan.annual_multiplier * growth_multiplier(plan, year)
}

/// Contribution due in `month_of_year` (1..=12) of `year` in monthly-step runs.
pub fn monthly_contribution(
    plan: &ContributionPlan,
    timing: &ContributionTiming,
    year: u32,
    month_of_year: u8,
) -> f64 {
    let monthly = stepped_monthly_contribution(plan, year) * growth_multiplier(plan, year);
    match timing {
        ContributionTiming::ProRata => monthly * plan.annual_multiplier / 12.0,
        ContributionTiming::ExtraMonths { months } => {
            let extra = months.iter().filter(|m| **m == month_of_year).count() as f64;
            monthly * (1.0 + extra)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn step_down_plan() -> ContributionPlan {
        ContributionPlan {
            base_monthly: 400.0,
            annual_multiplier: 14.0,
            growth_rate: 0.0,
            step: StepSchedule::StepDown {
                interval_years: 15,
                amount: 200.0,
                floor: 200.0,
            },
            continue_during_withdrawal: false,
        }
    }

    fn step_up_plan(ceiling: Option<f64>) -> ContributionPlan {
        ContributionPlan {
            base_monthly: 200.0,
            annual_multiplier: 14.0,
            growth_rate: 0.0,
            step: StepSchedule::StepUp {
                interval_years: 5,
                amount: 100.0,
                ceiling,
            },
            continue_during_withdrawal: false,
        }
    }

    #[test]
    fn step_down_reduces_at_interval_and_respects_floor() {
        let plan = step_down_plan();
        assert_approx(stepped_monthly_contribution(&plan, 1), 400.0);
        assert_approx(stepped_monthly_contribution(&plan, 15), 400.0);
        assert_approx(stepped_monthly_contribution(&plan, 16), 200.0);
        assert_approx(stepped_monthly_contribution(&plan, 31), 200.0);
        assert_approx(stepped_monthly_contribution(&plan, 55), 200.0);
    }

    #[test]
    fn step_down_with_zero_floor_never_goes_negative() {
        let mut plan = step_down_plan();
        plan.step = StepSchedule::StepDown {
            interval_years: 1,
            amount: 150.0,
            floor: -1_000.0,
        };
        assert_approx(stepped_monthly_contribution(&plan, 3), 100.0);
        assert_approx(stepped_monthly_contribution(&plan, 4), 0.0);
        assert_approx(stepped_monthly_contribution(&plan, 10), 0.0);
    }

    #[test]
    fn step_up_raises_and_caps_at_ceiling() {
        let plan = step_up_plan(Some(350.0));
        assert_approx(stepped_monthly_contribution(&plan, 5), 200.0);
        assert_approx(stepped_monthly_contribution(&plan, 6), 300.0);
        assert_approx(stepped_monthly_contribution(&plan, 11), 350.0);

        let uncapped = step_up_plan(None);
        assert_approx(stepped_monthly_contribution(&uncapped, 21), 600.0);
    }

    #[test]
    fn annual_contribution_scales_by_multiplier_and_growth() {
        let mut plan = step_up_plan(None);
        plan.growth_rate = 0.10;
        assert_approx(annual_contribution(&plan, 1), 200.0 * 14.0);
        assert_approx(annual_contribution(&plan, 3), 200.0 * 14.0 * 1.21);
        assert_approx(annual_contribution(&plan, 6), 300.0 * 14.0 * 1.1f64.powi(5));
    }

    #[test]
    fn pro_rata_months_sum_to_annual_amount() {
        let plan = step_up_plan(None);
        let total: f64 = (1..=12)
            .map(|m| monthly_contribution(&plan, &ContributionTiming::ProRata, 2, m))
            .sum();
        assert_approx(total, annual_contribution(&plan, 2));
    }

    #[test]
    fn extra_months_double_the_listed_months() {
        let plan = step_up_plan(None);
        let timing = ContributionTiming::ExtraMonths { months: vec![6, 12] };
        assert_approx(monthly_contribution(&plan, &timing, 1, 5), 200.0);
        assert_approx(monthly_contribution(&plan, &timing, 1, 6), 400.0);
        assert_approx(monthly_contribution(&plan, &timing, 1, 12), 400.0);
        let total: f64 = (1..=12)
            .map(|m| monthly_contribution(&plan, &timing, 1, m))
            .sum();
        assert_approx(total, 200.0 * 14.0);
    }
}
