pub mod params;
pub mod result;
pub mod scenario;

pub use params::{ParameterSet, TaxRegime};
pub use result::PricingResult;
pub use scenario::{
    CustomExpense, ExpenseCategory, Lot, Scenario, ScenarioSummary, ShiftType, SupplyCategory,
    SupplyItem, WorkPost,
};
