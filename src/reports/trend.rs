//! Daily spending trend for expenses a user paid

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::SplitResult;
use crate::models::{Expense, UserId};
use crate::storage::Storage;

/// Default window, in days
pub const DEFAULT_TREND_DAYS: u32 = 7;

/// Longest window the trend covers, about ten years
pub const MAX_TREND_DAYS: u32 = 3660;

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Rounded to whole units
    pub amount: f64,
}

/// Spending per day over the last `days` days, oldest first
#[derive(Debug, Clone, Serialize)]
pub struct SpendingTrend {
    pub user: UserId,
    pub points: Vec<TrendPoint>,
    /// Everything the user has paid for, all time
    pub total_paid: f64,
}

impl SpendingTrend {
    pub fn generate(
        storage: &Storage,
        user: UserId,
        today: NaiveDate,
        days: u32,
        rate: f64,
    ) -> SplitResult<Self> {
        Ok(Self::from_expenses(
            &storage.expenses.get_all()?,
            user,
            today,
            days,
            rate,
        ))
    }

    /// Whole expense amounts are counted for every payer, not their share
    pub fn from_expenses(
        expenses: &[Expense],
        user: UserId,
        today: NaiveDate,
        days: u32,
        rate: f64,
    ) -> Self {
        let paid: Vec<&Expense> = expenses
            .iter()
            .filter(|e| e.payer_ids.contains(&user))
            .collect();

        // Days before the earliest representable date are dropped
        let mut points: Vec<TrendPoint> = (0..days.min(MAX_TREND_DAYS))
            .rev()
            .filter_map(|back| {
                today
                    .checked_sub_signed(Duration::days(i64::from(back)))
                    .map(|date| TrendPoint { date, amount: 0.0 })
            })
            .collect();

        let mut total_paid = 0.0;
        for expense in paid {
            let amount = expense.currency.normalize(expense.amount.to_major(), rate);
            total_paid += amount;
            if let Some(point) = points.iter_mut().find(|p| p.date == expense.date) {
                point.amount += amount;
            }
        }

        for point in &mut points {
            point.amount = point.amount.round();
        }

        Self {
            user,
            points,
            total_paid,
        }
    }

    /// Format the trend for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Spending Trend (Last {} Days)\n", self.points.len()));
        output.push_str(&"=".repeat(40));
        output.push('\n');

        let max = self.points.iter().map(|p| p.amount).fold(0.0, f64::max);
        for point in &self.points {
            let width = if max > 0.0 {
                (point.amount / max * 20.0).round() as usize
            } else {
                0
            };
            output.push_str(&format!(
                "{} {} {:>10.0} {}\n",
                point.date.format("%a"),
                point.date,
                point.amount,
                "#".repeat(width)
            ));
        }

        output.push_str(&format!("Total you paid (all time): {:.2}\n", self.total_paid));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, GroupId, Money};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn expense(date: NaiveDate, cents: i64, payer: u64) -> Expense {
        Expense::new(
            ExpenseId::new(1),
            GroupId::new(101),
            "Cafe",
            Money::from_cents(cents),
            date,
            vec![UserId::new(payer)],
            vec![UserId::new(1), UserId::new(2)],
        )
    }

    #[test]
    fn test_window_and_rounding() {
        let expenses = vec![
            expense(day(10), 10_040, 1),
            expense(day(10), 5_000, 1),
            expense(day(4), 9_900, 1),
            expense(day(2), 7_000, 1),
            expense(day(9), 1_000, 2),
        ];
        let trend = SpendingTrend::from_expenses(&expenses, UserId::new(1), day(10), 7, 83.5);

        assert_eq!(trend.points.len(), 7);
        assert_eq!(trend.points[0].date, day(4));
        assert_eq!(trend.points[0].amount, 99.0);
        assert_eq!(trend.points[6].amount, 150.0);
        assert_eq!(trend.points[5].amount, 0.0);
        assert!((trend.total_paid - 319.4).abs() < 1e-9);
    }

    #[test]
    fn test_huge_window_is_capped() {
        let trend =
            SpendingTrend::from_expenses(&[], UserId::new(1), day(10), 100_000_000, 83.5);
        assert_eq!(trend.points.len(), MAX_TREND_DAYS as usize);
        assert_eq!(trend.points.last().unwrap().date, day(10));
    }

    #[test]
    fn test_window_stops_at_earliest_date() {
        let trend = SpendingTrend::from_expenses(&[], UserId::new(1), NaiveDate::MIN, 5, 83.5);
        assert_eq!(trend.points.len(), 1);
        assert_eq!(trend.points[0].date, NaiveDate::MIN);
    }
}
