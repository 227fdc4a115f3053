pub mod health;
pub mod timecards;
