//! Advice derived from a forecast summary

use super::types::{ForecastSummary, ScenarioParameters, Tip, TipKind};

/// Tips in display order. "Plan large expenses" is always included.
pub fn forecast_tips(summary: &ForecastSummary, scenario: &ScenarioParameters) -> Vec<Tip> {
    let mut tips = Vec::new();

    if summary.end_balance < 0.0 {
        tips.push(Tip {
            kind: TipKind::ReduceSpending,
            title: "Cut back on non-essential spending".to_string(),
            message: "Your projection shows an accumulated deficit. Consider trimming categories \
                      like entertainment or finding additional income."
                .to_string(),
        });
    }

    if summary.months_negative > 0 {
        tips.push(Tip {
            kind: TipKind::EmergencyFund,
            title: "Build an emergency fund".to_string(),
            message: "Some months will end negative. Save now to cover them \
                      (3-6 months of expenses is recommended)."
                .to_string(),
        });
    }

    if summary.total_savings > 0.0 {
        tips.push(Tip {
            kind: TipKind::InvestSavings,
            title: "Put your savings potential to work".to_string(),
            message: format!(
                "You could save {:.2} over the next {} months. Consider investing it.",
                summary.total_savings, scenario.horizon_months
            ),
        });
    }

    tips.push(Tip {
        kind: TipKind::PlanLargeExpenses,
        title: "Plan large expenses ahead".to_string(),
        message: format!(
            "For planned expenses (like {:.2}), set a little aside every month instead of \
             absorbing it all at once.",
            scenario.extra_expense_amount
        ),
    });

    if scenario.expense_multiplier_percent > 100 {
        tips.push(Tip {
            kind: TipKind::ExpenseIncrease,
            title: "Watch the projected expense increase".to_string(),
            message: format!(
                "You projected a {}% increase in expenses. Keeping that growth in check \
                 will improve your financial health.",
                scenario.expense_multiplier_percent - 100
            ),
        });
    }

    tips
}
