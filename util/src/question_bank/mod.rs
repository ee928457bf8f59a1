pub mod question_bank;
