pub mod chef;
pub mod meal_plan;
pub mod pantry;
pub mod recipes;
pub mod shopping;
