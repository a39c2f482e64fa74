pub mod employee_store;
pub mod german;
pub mod roster_csv;
