// 📊 Spending analytics - static series plus the few figures derived from them

use crate::entities::Category;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Days used for the average daily spend
const DAYS_PER_MONTH: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Timeframe {
    Week,
    #[default]
    Month,
    Year,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Week, Timeframe::Month, Timeframe::Year];

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Week => "Semaine",
            Timeframe::Month => "Mois",
            Timeframe::Year => "Année",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Timeframe::Week => Timeframe::Month,
            Timeframe::Month => Timeframe::Year,
            Timeframe::Year => Timeframe::Week,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Timeframe::Week => Timeframe::Year,
            Timeframe::Month => Timeframe::Week,
            Timeframe::Year => Timeframe::Month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyFlow {
    pub label: &'static str,
    pub income: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: Category,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub income: Decimal,
    pub expenses: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trends {
    pub average_daily_spend: Decimal,
    pub top_category: Option<CategorySpend>,
    pub savings: Decimal,
}

pub fn weekly_cash_flow() -> Vec<WeeklyFlow> {
    vec![
        WeeklyFlow { label: "Sem 1", income: dec!(2500), expenses: dec!(450) },
        WeeklyFlow { label: "Sem 2", income: dec!(0), expenses: dec!(320) },
        WeeklyFlow { label: "Sem 3", income: dec!(0), expenses: dec!(680) },
        WeeklyFlow { label: "Sem 4", income: dec!(700), expenses: dec!(0) },
    ]
}

pub fn spending_breakdown() -> Vec<CategorySpend> {
    vec![
        CategorySpend { category: Category::Alimentation, amount: dec!(380) },
        CategorySpend { category: Category::Transport, amount: dec!(280) },
        CategorySpend { category: Category::Shopping, amount: dec!(450) },
        CategorySpend { category: Category::Factures, amount: dec!(340) },
    ]
}

pub fn headline() -> Headline {
    let income = dec!(3200);
    let expenses = dec!(1450);
    Headline { income, expenses, remaining: income - expenses }
}

pub fn trends(headline: &Headline, breakdown: &[CategorySpend]) -> Trends {
    let top_category = breakdown.iter().max_by_key(|c| c.amount).cloned();

    Trends {
        average_daily_spend: (headline.expenses / Decimal::from(DAYS_PER_MONTH)).round_dp(2),
        top_category,
        savings: headline.remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_remaining() {
        let h = headline();
        assert_eq!(h.remaining, dec!(1750));
    }

    #[test]
    fn test_trends() {
        let t = trends(&headline(), &spending_breakdown());
        assert_eq!(t.average_daily_spend, dec!(48.33));
        assert_eq!(t.top_category.unwrap().category, Category::Shopping);
        assert_eq!(t.savings, dec!(1750));
    }

    #[test]
    fn test_trends_on_empty_breakdown() {
        assert!(trends(&headline(), &[]).top_category.is_none());
    }

    #[test]
    fn test_timeframe_cycles() {
        assert_eq!(Timeframe::default(), Timeframe::Month);
        assert_eq!(Timeframe::Year.next(), Timeframe::Week);
        assert_eq!(Timeframe::Week.previous(), Timeframe::Year);
    }
}
