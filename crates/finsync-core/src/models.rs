//! Domain models for FinSync

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction category
///
/// The first four variants are income categories, the rest are expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Salary,
    Investment,
    Bonus,
    OtherIncome,
    Housing,
    Transportation,
    Food,
    Utilities,
    Healthcare,
    Entertainment,
    Education,
    Debt,
    Savings,
    Personal,
    OtherExpense,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Investment => "investment",
            Self::Bonus => "bonus",
            Self::OtherIncome => "other_income",
            Self::Housing => "housing",
            Self::Transportation => "transportation",
            Self::Food => "food",
            Self::Utilities => "utilities",
            Self::Healthcare => "healthcare",
            Self::Entertainment => "entertainment",
            Self::Education => "education",
            Self::Debt => "debt",
            Self::Savings => "savings",
            Self::Personal => "personal",
            Self::OtherExpense => "other_expense",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Investment => "Investments",
            Self::Bonus => "Bonus",
            Self::OtherIncome => "Other Income",
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Food => "Food",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Entertainment => "Entertainment",
            Self::Education => "Education",
            Self::Debt => "Debt",
            Self::Savings => "Savings",
            Self::Personal => "Personal",
            Self::OtherExpense => "Other Expenses",
        }
    }

    /// The transaction type this category normally belongs to
    pub fn kind(&self) -> TransactionType {
        match self {
            Self::Salary | Self::Investment | Self::Bonus | Self::OtherIncome => {
                TransactionType::Income
            }
            _ => TransactionType::Expense,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Salary,
            Self::Investment,
            Self::Bonus,
            Self::OtherIncome,
            Self::Housing,
            Self::Transportation,
            Self::Food,
            Self::Utilities,
            Self::Healthcare,
            Self::Entertainment,
            Self::Education,
            Self::Debt,
            Self::Savings,
            Self::Personal,
            Self::OtherExpense,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
///
/// Field names serialize in camelCase (`isRecurring`, `dueDate`) so files
/// written by the web dashboard load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub title: String,
    /// Always a positive magnitude; `kind` carries the direction
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_paid: bool,
    /// Expected to repeat every month at the same amount
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_variable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Calendar month this transaction falls in
    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}

/// A transaction before it has been assigned an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub is_variable: Option<bool>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewTransaction {
    /// Attach an id, producing a stored transaction
    pub fn with_id(self, id: impl Into<String>) -> Transaction {
        Transaction {
            id: id.into(),
            title: self.title,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
            due_date: self.due_date,
            is_paid: self.is_paid,
            is_recurring: self.is_recurring,
            is_variable: self.is_variable,
            source: self.source,
            notes: self.notes,
        }
    }
}

/// Optional filters for listing transactions (all bounds inclusive)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionFilter {
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub category: Option<Category>,
    pub is_paid: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub source: Option<String>,
    pub is_variable: Option<bool>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.kind.is_some_and(|k| k != tx.kind) {
            return false;
        }
        if self.category.is_some_and(|c| c != tx.category) {
            return false;
        }
        if self.is_paid.is_some_and(|p| p != tx.is_paid) {
            return false;
        }
        if self.is_variable.is_some() && self.is_variable != tx.is_variable {
            return false;
        }
        if self.start_date.is_some_and(|d| tx.date < d) {
            return false;
        }
        if self.end_date.is_some_and(|d| tx.date > d) {
            return false;
        }
        if let Some(ref source) = self.source {
            if tx.source.as_deref() != Some(source.as_str()) {
                return false;
            }
        }
        true
    }

    /// Apply the filter, preserving store order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month, used as the bucketing key for history and projections.
///
/// Only months whose every day chrono can represent are constructible, so the
/// day range is always bounded by the month length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "MonthParts", into = "MonthParts")]
pub struct YearMonth {
    first: NaiveDate,
}

/// Wire form: `{"year": 2026, "month": 4}`
#[derive(Serialize, Deserialize)]
struct MonthParts {
    year: i32,
    month: u32,
}

impl TryFrom<MonthParts> for YearMonth {
    type Error = String;

    fn try_from(parts: MonthParts) -> std::result::Result<Self, Self::Error> {
        YearMonth::new(parts.year, parts.month)
            .ok_or_else(|| format!("Month out of range: {}-{}", parts.year, parts.month))
    }
}

impl From<YearMonth> for MonthParts {
    fn from(ym: YearMonth) -> Self {
        Self {
            year: ym.year(),
            month: ym.month(),
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last_day = days_in(year, month);
        // The final month of chrono's range must fit entirely
        NaiveDate::from_ymd_opt(year, month, last_day)?;
        Some(Self { first })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-12
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Shift by a number of months (negative goes back), rolling the year over.
    /// `None` when the result leaves the representable date range.
    pub fn offset(&self, months: i32) -> Option<Self> {
        let delta = Months::new(months.unsigned_abs());
        let first = if months >= 0 {
            self.first.checked_add_months(delta)?
        } else {
            self.first.checked_sub_months(delta)?
        };
        Self::new(first.year(), first.month())
    }

    pub fn previous(&self) -> Option<Self> {
        self.offset(-1)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in(self.year(), self.month())
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + Days::new(u64::from(self.days_in_month() - 1))
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take(self.days_in_month() as usize)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month() as usize - 1) % 12]
    }

    /// "October 2026"
    pub fn label(&self) -> String {
        format!("{} {}", self.name(), self.year())
    }
}

fn days_in(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    /// Parse `YYYY-MM`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Invalid month (use YYYY-MM): {}", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in month: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month number in month: {}", s))?;
        YearMonth::new(year, month).ok_or_else(|| format!("Month out of range: {}", s))
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_month_offset_rolls_over() {
        let dec = YearMonth::new(2025, 12).unwrap();
        assert_eq!(dec.offset(1), YearMonth::new(2026, 1));
        assert_eq!(dec.offset(14), YearMonth::new(2027, 2));

        let jan = YearMonth::new(2026, 1).unwrap();
        assert_eq!(jan.offset(-6), YearMonth::new(2025, 7));
        assert_eq!(jan.previous(), Some(dec));

        assert_eq!(jan.offset(i32::MAX), None);
        assert_eq!(jan.offset(i32::MIN), None);
    }

    #[test]
    fn test_year_month_bounds() {
        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(feb.first_day(), date(2024, 2, 1));
        assert_eq!(feb.last_day(), date(2024, 2, 29));
        assert_eq!(feb.days().count(), 29);
        assert!(feb.contains(date(2024, 2, 15)));
        assert!(!feb.contains(date(2024, 3, 1)));
    }

    #[test]
    fn test_year_month_label_and_parse() {
        let ym: YearMonth = "2026-10".parse().unwrap();
        assert_eq!(ym.label(), "October 2026");
        assert_eq!(ym.to_string(), "2026-10");
        assert!("2026-13".parse::<YearMonth>().is_err());
        assert!("october".parse::<YearMonth>().is_err());
        assert!(YearMonth::new(2026, 0).is_none());
    }

    #[test]
    fn test_year_month_rejects_years_outside_date_range() {
        assert!("300000-01".parse::<YearMonth>().is_err());
        assert!("-300000-01".parse::<YearMonth>().is_err());
        assert!(YearMonth::new(i32::MAX, 12).is_none());

        let dec = YearMonth::from_date(NaiveDate::MAX);
        assert_eq!(dec.last_day(), NaiveDate::MAX);
        assert_eq!(dec.days().count(), 31);
        assert_eq!(dec.offset(1), None);
    }

    #[test]
    fn test_year_month_json_shape() {
        let ym = YearMonth::new(2026, 4).unwrap();
        let value = serde_json::to_value(ym).unwrap();
        assert_eq!(value, serde_json::json!({"year": 2026, "month": 4}));

        let back: YearMonth = serde_json::from_value(value).unwrap();
        assert_eq!(back, ym);
        assert!(serde_json::from_str::<YearMonth>(r#"{"year": 2026, "month": 13}"#).is_err());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(
            "Other Income".parse::<Category>().unwrap(),
            Category::OtherIncome
        );
        assert_eq!(
            "other-expense".parse::<Category>().unwrap(),
            Category::OtherExpense
        );
        assert!("groceries".parse::<Category>().is_err());
        assert_eq!(Category::Salary.kind(), TransactionType::Income);
        assert_eq!(Category::Debt.kind(), TransactionType::Expense);
    }

    #[test]
    fn test_transaction_json_uses_dashboard_field_names() {
        let json = r#"{
            "id": "1",
            "title": "Monthly Salary",
            "amount": 5000,
            "type": "income",
            "category": "salary",
            "date": "2025-04-05",
            "isPaid": true,
            "isRecurring": true,
            "source": "Company XYZ"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionType::Income);
        assert!(tx.is_recurring);
        assert_eq!(tx.date, date(2025, 4, 5));
        assert_eq!(tx.source.as_deref(), Some("Company XYZ"));

        let out = serde_json::to_value(&tx).unwrap();
        assert_eq!(out["isRecurring"], true);
        assert_eq!(out["type"], "income");
        assert!(out.get("dueDate").is_none());
    }

    #[test]
    fn test_filter_matches() {
        let tx = NewTransaction {
            title: "Rent".into(),
            amount: 1200.0,
            kind: TransactionType::Expense,
            category: Category::Housing,
            date: date(2025, 4, 10),
            due_date: None,
            is_paid: false,
            is_recurring: true,
            is_variable: None,
            source: None,
            notes: None,
        }
        .with_id("2");

        let filter = TransactionFilter {
            kind: Some(TransactionType::Expense),
            start_date: Some(date(2025, 4, 10)),
            end_date: Some(date(2025, 4, 10)),
            ..Default::default()
        };
        assert!(filter.matches(&tx));

        let unpaid_income = TransactionFilter {
            kind: Some(TransactionType::Income),
            ..Default::default()
        };
        assert!(!unpaid_income.matches(&tx));

        let by_source = TransactionFilter {
            source: Some("Landlord".into()),
            ..Default::default()
        };
        assert!(!by_source.matches(&tx));
    }
}
